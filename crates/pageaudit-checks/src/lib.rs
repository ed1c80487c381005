//! # pageaudit-checks
//!
//! **Tier 2 (Category Checkers)**
//!
//! One module per audited dimension. Each `build_*_report` is a pure function
//! of the parsed document (and, for Content and Trust Signals, one earlier
//! report) that returns an immutable fact record.
//!
//! ## Ordering
//! * Content reads the Technical title.
//! * Trust Signals reads the Schema report.
//!
//! Every other checker is independent.

mod accessibility;
mod content;
mod external;
mod images;
mod international;
mod links;
mod mobile;
mod performance;
mod platform;
mod schema;
mod security;
mod social;
mod structure;
mod technical;
mod trust;
mod util;

pub use accessibility::build_accessibility_report;
pub use content::build_content_report;
pub use external::build_external_resources_report;
pub use images::build_images_report;
pub use international::build_international_report;
pub use links::build_links_report;
pub use mobile::build_mobile_report;
pub use performance::build_performance_report;
pub use platform::build_platform_report;
pub use schema::{INVALID_JSON, MISSING_CONTEXT, build_schema_report, validate_json_ld};
pub use security::build_security_report;
pub use social::build_social_report;
pub use structure::build_structure_report;
pub use technical::{
    DESCRIPTION_MAX, DESCRIPTION_MIN, TITLE_MAX, TITLE_MIN, build_technical_report,
};
pub use trust::build_trust_signals_report;
pub use util::SAMPLE_LIMIT;
