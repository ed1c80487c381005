//! # pageaudit-format
//!
//! **Tier 3 (Formatting)**
//!
//! Renders an [`AuditResult`] as JSON, Markdown or plain text.
//!
//! ## What belongs here
//! * Serialization (pretty JSON)
//! * Markdown and text layout
//! * Output file writing
//!
//! ## What does NOT belong here
//! * Issue or score logic (use pageaudit-rules)
//! * CLI arg parsing

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use anyhow::Result;
use pageaudit_types::{AuditIssue, AuditResult, FetchMethod, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Md,
    Text,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Md => "md",
            OutputFormat::Text => "text",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Md),
            "text" | "txt" => Ok(OutputFormat::Text),
            other => Err(format!("unknown format '{other}' (expected json, md or text)")),
        }
    }
}

pub fn render(result: &AuditResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => render_json(result),
        OutputFormat::Md => Ok(render_md(result)),
        OutputFormat::Text => Ok(render_text(result)),
    }
}

/// Write the rendered report to `out`, or stdout when `None`.
pub fn write_report(result: &AuditResult, format: OutputFormat, out: Option<&Path>) -> Result<()> {
    let mut rendered = render(result, format)?;
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    match out {
        Some(path) => {
            let file = File::create(path)?;
            let mut w = BufWriter::new(file);
            w.write_all(rendered.as_bytes())?;
            w.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut w = stdout.lock();
            w.write_all(rendered.as_bytes())?;
            w.flush()?;
        }
    }
    Ok(())
}

// ----
// JSON
// ----

pub fn render_json(result: &AuditResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

// --------
// Markdown
// --------

pub fn render_md(result: &AuditResult) -> String {
    let mut s = String::new();
    s.push_str(&format!("# Page audit: {}\n\n", subject(result)));
    s.push_str(&format!("**Score: {}/100**\n\n", result.score));
    s.push_str(&format!(
        "Fetched via {} at {}\n\n",
        method(result.fetch_method),
        result.timestamp
    ));

    s.push_str("## Summary\n\n");
    s.push_str("|Severity|Issues|\n");
    s.push_str("|---|---:|\n");
    let summary = &result.summary;
    for (sev, count) in [
        ("Critical", summary.critical_issues),
        ("High", summary.high_issues),
        ("Medium", summary.medium_issues),
        ("Low", summary.low_issues),
    ] {
        s.push_str(&format!("|{sev}|{count}|\n"));
    }
    s.push_str(&format!("|**Passed**|{}|\n", summary.passed_checks));
    s.push_str(&format!("|**Total checks**|{}|\n\n", summary.total_checks));

    s.push_str("## Highlights\n\n");
    s.push_str("|Fact|Value|\n");
    s.push_str("|---|---|\n");
    for (fact, value) in highlights(result) {
        s.push_str(&format!("|{}|{}|\n", fact, md_cell(&value)));
    }
    s.push('\n');

    s.push_str("## Issues\n\n");
    if result.issues.is_empty() {
        s.push_str("No issues found.\n\n");
    }
    for (sev, issues) in by_severity(&result.issues) {
        s.push_str(&format!("### {} ({})\n\n", title_case(sev), issues.len()));
        for issue in issues {
            s.push_str(&format!(
                "- **{}** (`{}`, {}) at `{}`\n",
                issue.issue, issue.id, issue.category, issue.location
            ));
            s.push_str(&format!("  - Fix: {}\n", issue.fix));
            if let Some(current) = &issue.current {
                s.push_str(&format!("  - Current: `{}`\n", current.replace('`', "'")));
            }
            if let Some(details) = &issue.details {
                s.push_str(&format!("  - Details: {details}\n"));
            }
        }
        s.push('\n');
    }

    s.push_str("## Passed\n\n");
    if result.passed.is_empty() {
        s.push_str("No checks passed.\n");
    }
    for note in &result.passed {
        s.push_str(&format!("- {note}\n"));
    }
    s
}

fn md_cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}

// ----
// Text
// ----

pub fn render_text(result: &AuditResult) -> String {
    let mut s = String::new();
    s.push_str(&format!("Page audit: {}\n", subject(result)));
    s.push_str(&format!("Score: {}/100\n", result.score));
    let summary = &result.summary;
    s.push_str(&format!(
        "Issues: {} critical, {} high, {} medium, {} low\n",
        summary.critical_issues, summary.high_issues, summary.medium_issues, summary.low_issues
    ));
    s.push_str(&format!(
        "Passed: {} of {} checks\n",
        summary.passed_checks, summary.total_checks
    ));

    for (sev, issues) in by_severity(&result.issues) {
        s.push_str(&format!("\n{}\n", sev.as_str().to_uppercase()));
        for issue in issues {
            s.push_str(&format!("  [{}] {}: {}\n", issue.id, issue.category, issue.issue));
            s.push_str(&format!("      fix: {}\n", issue.fix));
        }
    }

    if !result.passed.is_empty() {
        s.push_str("\nPASSED\n");
        for note in &result.passed {
            s.push_str(&format!("  + {note}\n"));
        }
    }
    s
}

// -------
// Helpers
// -------

fn subject(result: &AuditResult) -> &str {
    result.url.as_deref().unwrap_or("(inline HTML)")
}

fn method(m: FetchMethod) -> &'static str {
    match m {
        FetchMethod::Url => "URL",
        FetchMethod::Html => "HTML input",
    }
}

fn title_case(sev: Severity) -> &'static str {
    match sev {
        Severity::Critical => "Critical",
        Severity::High => "High",
        Severity::Medium => "Medium",
        Severity::Low => "Low",
    }
}

/// Non-empty severity groups, most severe first. Order within a group is
/// the synthesis order.
fn by_severity(issues: &[AuditIssue]) -> Vec<(Severity, Vec<&AuditIssue>)> {
    Severity::ALL
        .iter()
        .map(|sev| (*sev, issues.iter().filter(|i| i.severity == *sev).collect::<Vec<_>>()))
        .filter(|(_, group)| !group.is_empty())
        .collect()
}

fn highlights(result: &AuditResult) -> Vec<(&'static str, String)> {
    let r = &result.reports;
    let or_none = |v: Option<&str>| v.unwrap_or("none").to_string();
    vec![
        ("Title", or_none(r.technical.title.content.as_deref())),
        ("Language", or_none(r.international.html_lang.as_deref())),
        ("Words", r.content.word_count.to_string()),
        (
            "Links",
            format!(
                "{} internal, {} external",
                r.links.internal_count, r.links.external_count
            ),
        ),
        (
            "Images",
            format!("{} ({} missing alt)", r.images.total, r.images.missing_alt_count),
        ),
        (
            "Structured data",
            if r.schema.types.is_empty() {
                "none".to_string()
            } else {
                r.schema.types.join(", ")
            },
        ),
        ("Render method", r.platform.render_method.label().to_string()),
        ("AI phrase score", r.content.ai_score.to_string()),
        (
            "Trust signals",
            r.trust_signals.signal_count().to_string(),
        ),
    ]
}
