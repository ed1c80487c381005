//! # pageaudit-rules
//!
//! **Tier 2 (Rule Evaluation)**
//!
//! Turns the typed category reports into findings.
//!
//! ## What belongs here
//! * Issue synthesis: fixed predicate to issue tables per category
//! * Pass synthesis: the positive mirror of those tables
//! * Score calculation and summary counts
//!
//! ## What does NOT belong here
//! * Measuring the document (use pageaudit-checks)
//! * Network probing (use pageaudit-probe)
//!
//! ## Example
//! ```ignore
//! use pageaudit_rules::{calculate_score, synthesize_issues, synthesize_passed};
//!
//! let issues = synthesize_issues(&reports);
//! let passed = synthesize_passed(&reports);
//! let score = calculate_score(&issues, &passed, &ScoreWeights::default());
//! ```

mod issues;
mod passed;
mod score;

pub use issues::synthesize_issues;
pub use passed::synthesize_passed;
pub use score::{calculate_score, deduction, summarize};

/// Thresholds shared by the issue and pass tables.
pub mod thresholds {
    /// Pages with fewer words are thin.
    pub const THIN_CONTENT_WORDS: usize = 300;
    pub const AI_SCORE_HIGH: u32 = 50;
    pub const AI_SCORE_MODERATE: u32 = 25;
    /// Keyword stuffing is only judged on pages at least this long.
    pub const KEYWORD_MIN_WORDS: usize = 100;
    /// Density percentage above which the top term is stuffed.
    pub const KEYWORD_MAX_DENSITY: f64 = 4.0;
    pub const MAX_LINKS: usize = 300;
    pub const LARGE_IMAGE_BYTES: u64 = 200 * 1024;
    pub const MAX_ELEMENTS: usize = 1500;
    pub const MAX_DEPTH: usize = 32;
    pub const MAX_INLINE_STYLES: usize = 50;
    pub const MAX_BLOCKING_STYLESHEETS: usize = 3;
    pub const LARGE_HTML_BYTES: usize = 500 * 1024;
    pub const MAX_SCRIPTS: usize = 30;
    pub const SSL_EXPIRY_WARN_DAYS: i64 = 30;
    pub const MAX_THIRD_PARTY_DOMAINS: usize = 10;
    /// Trust signal count at which a page earns the trust pass note.
    pub const STRONG_TRUST_SIGNALS: usize = 5;
}
