#![no_main]

use libfuzzer_sys::fuzz_target;
use synthcheck_syntax::{Candidate, oracle, splitter};

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        for entry in oracle::parse_oracle(s) {
            if let oracle::OracleEntry::Case(case) = entry {
                let _ = splitter::split_arguments(&case.arguments);
            }
        }
        let _ = Candidate::prepare(s, "function", "target");
    }
});
