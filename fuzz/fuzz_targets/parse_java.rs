#![no_main]

use arqforge_syntax::java::{lex, parse};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(tokens) = lex(s) {
            let _ = parse(s, &tokens);
        }
    }
});
