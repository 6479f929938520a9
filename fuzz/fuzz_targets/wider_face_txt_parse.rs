//! Fuzz target for WIDER FACE ground-truth parsing.
//!
//! This fuzzer feeds arbitrary UTF-8 documents to the block reader,
//! checking for panics, crashes, or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use widervoc::wider::fuzz_parse_wider_txt;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let _ = fuzz_parse_wider_txt(text);
});
