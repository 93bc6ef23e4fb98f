//! Fuzz target: the debouncer fed arbitrary samples and restores.
//!
//! Each input byte is one operation: bit 7 set means `restore(byte & 0x7f)`,
//! otherwise bit 0 is the pressed level for one `step`.
//!
//! Invariants checked:
//! - No panics
//! - A press is only latched on the step that enters `Down` from `Falling`
//! - The latch is one-shot: a second read right after is always false
//!
//! cargo fuzz run fuzz_debounce

#![no_main]

use libfuzzer_sys::fuzz_target;
use uartcli::drivers::button::{ActiveLevel, DebounceState, Debouncer};

fuzz_target!(|data: &[u8]| {
    let mut db = Debouncer::new((), ActiveLevel::Low);
    for &op in data {
        if op & 0x80 != 0 {
            db.restore(op & 0x7f);
            continue;
        }
        let before = db.state();
        db.step(op & 1 == 1);
        let latched = db.read_and_clear_pressed();
        if latched {
            assert_eq!(before, DebounceState::Falling);
            assert_eq!(db.state(), DebounceState::Down);
        }
        assert!(!db.read_and_clear_pressed());
    }
});
