//! Score calculation.
//!
//! `score = clamp(100 - Σ deduction(severity) + min(cap, bonus × passed), 0, 100)`,
//! rounded half away from zero.

use pageaudit_settings::ScoreWeights;
use pageaudit_types::{AuditIssue, AuditSummary, Severity};

/// Points deducted for one issue of `severity`.
pub fn deduction(weights: &ScoreWeights, severity: Severity) -> u32 {
    match severity {
        Severity::Critical => weights.critical,
        Severity::High => weights.high,
        Severity::Medium => weights.medium,
        Severity::Low => weights.low,
    }
}

pub fn calculate_score(issues: &[AuditIssue], passed: &[String], weights: &ScoreWeights) -> u8 {
    let deducted: f64 = issues
        .iter()
        .map(|i| f64::from(deduction(weights, i.severity)))
        .sum();
    let bonus = (weights.pass_bonus * passed.len() as f64).min(weights.pass_bonus_cap);
    let raw = 100.0 - deducted + bonus;
    if raw.is_nan() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u8
}

/// Per-severity counts plus check totals.
pub fn summarize(issues: &[AuditIssue], passed: &[String]) -> AuditSummary {
    AuditSummary::from_findings(issues, passed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pageaudit_types::Category;

    fn issue(sev: Severity) -> AuditIssue {
        AuditIssue::new("x", sev, Category::Content, "i", "l", "f")
    }

    fn passed(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("p{i}")).collect()
    }

    #[test]
    fn no_findings_is_perfect() {
        assert_eq!(calculate_score(&[], &[], &ScoreWeights::default()), 100);
    }

    #[test]
    fn deductions_follow_severity_table() {
        let w = ScoreWeights::default();
        let issues = vec![
            issue(Severity::Critical),
            issue(Severity::High),
            issue(Severity::Medium),
            issue(Severity::Low),
        ];
        assert_eq!(calculate_score(&issues, &[], &w), 100 - 15 - 8 - 4 - 1);
    }

    #[test]
    fn bonus_is_capped() {
        let w = ScoreWeights::default();
        let issues = vec![issue(Severity::Critical); 2];
        assert_eq!(calculate_score(&issues, &passed(3), &w), 72);
        assert_eq!(calculate_score(&issues, &passed(100), &w), 80);
    }

    #[test]
    fn half_points_round_away_from_zero() {
        let w = ScoreWeights::default();
        // 100 - 15 + 0.5
        assert_eq!(calculate_score(&[issue(Severity::Critical)], &passed(1), &w), 86);
    }

    #[test]
    fn score_clamps_at_zero() {
        let issues = vec![issue(Severity::Critical); 20];
        assert_eq!(calculate_score(&issues, &passed(5), &ScoreWeights::default()), 0);
    }
}
