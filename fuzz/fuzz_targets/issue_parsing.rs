#![no_main]

//! Fuzz target for request body parsing and rendering.
//!
//! Feeds arbitrary bytes through the same parse, render and encode steps
//! the `/markdown` handler runs, checking that nothing panics and that
//! accepted bodies always yield one block per record.

use libfuzzer_sys::fuzz_target;
use relnotes_core::{encode_binary_digits, parse_issues, render_document};

fuzz_target!(|data: &[u8]| {
    let Ok(issues) = parse_issues(data) else {
        return;
    };

    let document = render_document(&issues).expect("rendering into a String cannot fail");
    assert_eq!(document.block_count(), issues.len());

    let encoded = encode_binary_digits(document.as_str());
    assert!(encoded.bytes().all(|b| b == b'0' || b == b'1'));
});
