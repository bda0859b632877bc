#![no_main]
use libfuzzer_sys::fuzz_target;
use multisource::parsers::parse_currency;

/// Parsed currency values are always finite.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Some(value) = parse_currency(s) {
            assert!(value.is_finite());
        }
    }
});
