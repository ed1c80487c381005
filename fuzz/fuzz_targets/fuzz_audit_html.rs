#![no_main]

use libfuzzer_sys::fuzz_target;
use pageaudit_core::audit_html;
use pageaudit_settings::AuditSettings;

const MAX_INPUT_SIZE: usize = 64 * 1024;
const SPLIT_BYTE: u8 = 0x1f;

fuzz_target!(|data: &[u8]| {
    if data.len() > MAX_INPUT_SIZE {
        return;
    }

    // Optional source URL before the separator.
    let (url, html) = match data.iter().position(|b| *b == SPLIT_BYTE) {
        Some(i) => (Some(String::from_utf8_lossy(&data[..i])), &data[i + 1..]),
        None => (None, data),
    };
    let html = String::from_utf8_lossy(html);

    let settings = AuditSettings::offline();
    let result = audit_html(&html, url.as_deref(), &settings);

    assert!(result.score <= 100);
    assert_eq!(result.summary.issue_count(), result.issues.len());
    assert_eq!(result.summary.passed_checks, result.passed.len());
    assert!(result.reports.content.ai_score <= 100);

    let mut ids: Vec<&str> = result.issues.iter().map(|i| i.id.as_str()).collect();
    ids.sort_unstable();
    let n = ids.len();
    ids.dedup();
    assert_eq!(n, ids.len(), "issue ids must be unique");
});
