//! # pageaudit-patterns
//!
//! **Tier 0 (Pattern Database)**
//!
//! Read-only lookup tables consulted by the category checkers. Tables are
//! plain `'static` data; regex forms are compiled once on first use.
//!
//! ## Matching disciplines
//! * Substring signatures ([`Signature`]): the caller lower-cases the HTML
//!   source once and a signature matches if any of its needles occurs.
//! * Exact phrases ([`anchors::is_generic_anchor`]): trimmed, lower-cased text
//!   must equal a listed phrase.
//! * Regex phrases ([`ai`]): word-bounded, case-insensitive.
//!
//! ## What does NOT belong here
//! * Any traversal of a parsed document (use pageaudit-checks)

pub mod ai;
pub mod anchors;
pub mod language;
pub mod markup;
pub mod schema;
pub mod signatures;
pub mod trust;
pub mod words;

pub use signatures::{Signature, detect};

/// Version of the pattern tables. Bump whenever a table changes in a way that
/// can alter audit output for the same input.
pub const PATTERN_DB_VERSION: &str = "2024.2";
