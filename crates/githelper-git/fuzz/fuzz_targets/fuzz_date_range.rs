#![no_main]

use githelper_git::DateRange;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let (start, end) = text.split_once('\n').unwrap_or((text, text));
    if let Ok(range) = DateRange::parse(start, end) {
        assert!(range.start() <= range.end());
        if let Ok(window) = range.window() {
            assert!(window.since < window.until);
        }
    }
});
