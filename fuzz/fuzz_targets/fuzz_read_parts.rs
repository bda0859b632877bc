#![no_main]
use libfuzzer_sys::fuzz_target;
use multisource::parsers::{normalize, read_parts_str, DEFAULT_DELIMITER};

const HEADER: &str = "Part Number;Title;Installs;Encompass;Marcone\n";

/// Fuzz the delimited reader and currency normalization.
///
/// Prefixes input with a valid header so most cases reach the price
/// columns instead of failing on the first line.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(table) = read_parts_str(s, DEFAULT_DELIMITER) {
            let _ = normalize(table, &["Encompass", "Marcone"]);
        }

        let wrapped = format!("{HEADER}{s}");
        if let Ok(table) = read_parts_str(&wrapped, DEFAULT_DELIMITER) {
            let _ = normalize(table, &["Encompass", "Marcone"]);
        }
    }
});
