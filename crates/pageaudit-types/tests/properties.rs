//! Property-based tests for pageaudit-types.
//!
//! These tests verify summary counting and enum serialization invariants.

use pageaudit_types::*;
use proptest::prelude::*;

fn arb_severity() -> impl Strategy<Value = Severity> {
    prop::sample::select(Severity::ALL.to_vec())
}

fn arb_issue() -> impl Strategy<Value = AuditIssue> {
    (arb_severity(), "[a-z-]{1,20}").prop_map(|(sev, id)| {
        AuditIssue::new(id, sev, Category::Content, "issue", "<body>", "fix")
    })
}

// ============================================================================
// Summary invariants
// ============================================================================

proptest! {
    /// Per-severity counts always add up to the number of issues.
    #[test]
    fn summary_counts_sum_to_issue_count(
        issues in prop::collection::vec(arb_issue(), 0..40),
        passed in prop::collection::vec("[a-z ]{1,10}", 0..20),
    ) {
        let summary = AuditSummary::from_findings(&issues, &passed);
        prop_assert_eq!(summary.issue_count(), issues.len());
        prop_assert_eq!(summary.total_checks, issues.len() + passed.len());
        prop_assert_eq!(summary.passed_checks, passed.len());
    }

    /// Severity serializes to a lowercase string that parses back.
    #[test]
    fn severity_roundtrip(sev in arb_severity()) {
        let json = serde_json::to_string(&sev).expect("serialize");
        prop_assert_eq!(json.trim_matches('"'), sev.as_str());
        let parsed: Severity = serde_json::from_str(&json).expect("deserialize");
        prop_assert_eq!(parsed, sev);
    }

    /// Completeness ids are always lowercase kebab-case.
    #[test]
    fn schema_incomplete_ids_are_lowercase(name in "[A-Za-z]{1,24}") {
        let id = ids::schema_incomplete(&name);
        prop_assert!(id.starts_with(ids::schema::INCOMPLETE_PREFIX));
        prop_assert!(!id.chars().any(|c| c.is_uppercase()));
    }
}
