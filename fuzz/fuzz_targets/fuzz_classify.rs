#![no_main]
use libfuzzer_sys::fuzz_target;

// Feed arbitrary UTF-8 lines to the line classifier.
// Catches panics on odd prefixes, unit suffixes and integer overflow.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        for line in s.lines() {
            let _ = benchlog::ingest::line::classify(line);
        }
    }
});
