#![no_main]

use libfuzzer_sys::fuzz_target;
use pageaudit_checks::{INVALID_JSON, validate_json_ld};

const MAX_INPUT_SIZE: usize = 16 * 1024;

fuzz_target!(|data: &[u8]| {
    if data.len() > MAX_INPUT_SIZE {
        return;
    }
    let Ok(block) = std::str::from_utf8(data) else {
        return;
    };

    let items = validate_json_ld(block);
    for item in &items {
        assert_eq!(item.valid, item.issues.is_empty());
        if item.issues.iter().any(|i| i == INVALID_JSON) {
            assert_eq!(items.len(), 1, "a parse failure yields exactly one item");
        }
    }
});
