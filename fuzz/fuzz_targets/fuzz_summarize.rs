#![no_main]
use libfuzzer_sys::fuzz_target;

use benchlog::input::LogSource;
use benchlog::labels::Labels;
use benchlog::pivot::SystemOrder;
use benchlog::report::{self, Format, ReportOptions};

// Whole pipeline on arbitrary logs: every input must end in a table or a
// typed error, never a panic (index-aligned pairing, empty runs, sums).
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let sources = [LogSource {
        name: "fuzz.log".to_string(),
        text: text.to_string(),
    }];
    if let Ok(pivot) = benchlog::summarize(&sources, &SystemOrder::FirstSeen, &Labels::builtin()) {
        let _ = report::render(&pivot, Format::Text, &ReportOptions::default());
    }
});
