#![no_main]

use libfuzzer_sys::fuzz_target;
use pageaudit_probe::{robots_disallows, sitemap_directives};

const MAX_INPUT_SIZE: usize = 16 * 1024;
const SPLIT_BYTE: u8 = 0x1f;

fuzz_target!(|data: &[u8]| {
    if data.len() > MAX_INPUT_SIZE {
        return;
    }
    let mut parts = data.splitn(2, |b| *b == SPLIT_BYTE);
    let content = String::from_utf8_lossy(parts.next().unwrap_or_default());
    let path = String::from_utf8_lossy(parts.next().unwrap_or(b"/"));

    let _ = robots_disallows(&content, &path);
    for url in sitemap_directives(&content) {
        assert!(!url.is_empty());
    }
});
