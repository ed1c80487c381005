//! JSON-LD structured data.
//!
//! Each `<script type="application/ld+json">` block is parsed on its own. A
//! block that fails to parse becomes one "Invalid JSON" item and the rest
//! continue. Top-level arrays, single objects and `@graph` containers all
//! feed the same per-item validation.

use pageaudit_dom::{Document, attr};
use pageaudit_patterns::schema::requirement;
use pageaudit_types::{IncompleteType, SchemaItem, SchemaReport};
use serde_json::{Map, Value};

pub const INVALID_JSON: &str = "Invalid JSON";
pub const MISSING_CONTEXT: &str = "missing @context";

pub fn build_schema_report(doc: &Document) -> SchemaReport {
    let blocks: Vec<String> = doc
        .select("script[type]")
        .into_iter()
        .filter(|s| {
            attr(*s, "type").is_some_and(|t| t.trim().eq_ignore_ascii_case("application/ld+json"))
        })
        .map(|s| s.text().collect::<String>())
        .collect();

    let mut report = SchemaReport {
        count: blocks.len(),
        microdata_count: doc.count("[itemscope]"),
        rdfa_count: doc.count("[typeof]"),
        ..Default::default()
    };

    for block in &blocks {
        let value = match serde_json::from_str::<Value>(block.trim()) {
            Ok(v) => v,
            Err(err) => {
                tracing::debug!(%err, "unparsable JSON-LD block");
                report.invalid_json_count += 1;
                report.items.push(SchemaItem {
                    schema_type: INVALID_JSON.to_string(),
                    valid: false,
                    issues: vec![INVALID_JSON.to_string()],
                    ..Default::default()
                });
                continue;
            }
        };

        let mut objects = Vec::new();
        flatten(&value, false, &mut objects);
        for (obj, inherited_context) in objects {
            collect_facts(obj, &mut report);
            report.items.push(validate_item(obj, inherited_context));
        }
    }

    report.has_review_data |= report
        .types
        .iter()
        .any(|t| t == "Review" || t == "AggregateRating");
    report
}

/// Validate one JSON-LD block without a document. A parse failure yields a
/// single invalid item.
pub fn validate_json_ld(block: &str) -> Vec<SchemaItem> {
    match serde_json::from_str::<Value>(block.trim()) {
        Ok(value) => {
            let mut objects = Vec::new();
            flatten(&value, false, &mut objects);
            objects
                .into_iter()
                .map(|(obj, ctx)| validate_item(obj, ctx))
                .collect()
        }
        Err(_) => vec![SchemaItem {
            schema_type: INVALID_JSON.to_string(),
            valid: false,
            issues: vec![INVALID_JSON.to_string()],
            ..Default::default()
        }],
    }
}

/// Normalize arrays, single objects and `@graph` containers into a flat list
/// of objects, each with whether it inherits an `@context`.
fn flatten<'a>(value: &'a Value, inherited: bool, out: &mut Vec<(&'a Map<String, Value>, bool)>) {
    match value {
        Value::Array(items) => {
            for item in items {
                flatten(item, inherited, out);
            }
        }
        Value::Object(obj) => {
            if let Some(Value::Array(graph)) = obj.get("@graph") {
                let ctx = inherited || obj.contains_key("@context");
                if obj.contains_key("@type") {
                    out.push((obj, inherited));
                }
                for item in graph {
                    flatten(item, ctx, out);
                }
            } else {
                out.push((obj, inherited));
            }
        }
        _ => {}
    }
}

fn type_names(obj: &Map<String, Value>) -> Vec<String> {
    match obj.get("@type") {
        Some(Value::String(s)) => vec![s.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn is_present(obj: &Map<String, Value>, key: &str) -> bool {
    match obj.get(key) {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(_) => true,
    }
}

fn validate_item(obj: &Map<String, Value>, inherited_context: bool) -> SchemaItem {
    let types = type_names(obj);
    let mut issues = Vec::new();
    let mut warnings = Vec::new();
    let mut incomplete = Vec::new();

    if !inherited_context && !obj.contains_key("@context") {
        issues.push(MISSING_CONTEXT.to_string());
    }

    for t in &types {
        let Some(req) = requirement(t) else {
            continue;
        };
        let mut missing: Vec<String> = req
            .required
            .iter()
            .filter(|k| !is_present(obj, k))
            .map(|k| k.to_string())
            .collect();
        if !req.needs_one_of.is_empty() && !req.needs_one_of.iter().any(|k| is_present(obj, k)) {
            missing.push(req.needs_one_of.join("/"));
        }
        if !missing.is_empty() {
            issues.push(format!("missing: {}", missing.join(", ")));
            incomplete.push(IncompleteType {
                schema_type: t.clone(),
                missing,
            });
        }

        let recommended: Vec<&str> = req
            .recommended
            .iter()
            .copied()
            .filter(|k| !is_present(obj, k))
            .collect();
        if !recommended.is_empty() {
            warnings.push(format!("recommended: {}", recommended.join(", ")));
        }
    }

    SchemaItem {
        schema_type: if types.is_empty() {
            "Unknown".to_string()
        } else {
            types.join(", ")
        },
        valid: issues.is_empty(),
        issues,
        warnings,
        incomplete,
    }
}

fn collect_facts(obj: &Map<String, Value>, report: &mut SchemaReport) {
    for t in type_names(obj) {
        if !report.types.contains(&t) {
            report.types.push(t);
        }
    }
    if let Some(author) = obj.get("author") {
        for name in author_names(author) {
            if !report.authors.contains(&name) {
                report.authors.push(name);
            }
        }
    }
    if report.date_published.is_none() {
        report.date_published = obj.get("datePublished").and_then(Value::as_str).map(str::to_string);
    }
    if report.date_modified.is_none() {
        report.date_modified = obj.get("dateModified").and_then(Value::as_str).map(str::to_string);
    }
    if type_names(obj).iter().any(|t| t == "PostalAddress")
        || obj.values().any(|v| mentions_type(v, "PostalAddress"))
    {
        report.has_postal_address = true;
    }
    if obj.contains_key("aggregateRating") || obj.contains_key("review") {
        report.has_review_data = true;
    }
}

fn author_names(v: &Value) -> Vec<String> {
    match v {
        Value::String(s) if !s.trim().is_empty() => vec![s.trim().to_string()],
        Value::Object(o) => o
            .get("name")
            .and_then(Value::as_str)
            .map(|s| vec![s.trim().to_string()])
            .unwrap_or_default(),
        Value::Array(items) => items.iter().flat_map(author_names).collect(),
        _ => Vec::new(),
    }
}

fn mentions_type(v: &Value, name: &str) -> bool {
    match v {
        Value::Object(o) => {
            type_names(o).iter().any(|t| t == name) || o.values().any(|c| mentions_type(c, name))
        }
        Value::Array(items) => items.iter().any(|c| mentions_type(c, name)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(blocks: &[&str]) -> SchemaReport {
        let scripts: String = blocks
            .iter()
            .map(|b| format!(r#"<script type="application/ld+json">{b}</script>"#))
            .collect();
        let html = format!("<html><head>{scripts}</head><body></body></html>");
        build_schema_report(&Document::parse(&html, None))
    }

    #[test]
    fn product_without_context_reports_both_issues() {
        let r = report(&[r#"{"@type":"Product","name":"X"}"#]);
        assert_eq!(r.items.len(), 1);
        assert_eq!(
            r.items[0].issues,
            vec![
                "missing @context".to_string(),
                "missing: image, offers/review/aggregateRating".to_string()
            ]
        );
        assert!(!r.items[0].valid);
    }

    #[test]
    fn multi_type_item_records_which_type_is_incomplete() {
        let r = report(&[r#"{"@context":"https://schema.org",
            "@type":["Organization","LocalBusiness"],"name":"Bakery"}"#]);
        let item = &r.items[0];
        assert_eq!(item.schema_type, "Organization, LocalBusiness");
        assert_eq!(
            item.incomplete,
            vec![IncompleteType {
                schema_type: "LocalBusiness".into(),
                missing: vec!["address".into()],
            }]
        );
        assert_eq!(item.issues, vec!["missing: address"]);
    }

    #[test]
    fn invalid_block_does_not_stop_the_rest() {
        let r = report(&[
            "{not json",
            r#"{"@context":"https://schema.org","@type":"Organization","name":"A"}"#,
        ]);
        assert_eq!(r.count, 2);
        assert_eq!(r.invalid_json_count, 1);
        assert_eq!(r.items[0].schema_type, INVALID_JSON);
        assert!(r.items[1].valid);
        assert!(r.has_type("Organization"));
    }

    #[test]
    fn graph_items_inherit_context() {
        let r = report(&[r#"{"@context":"https://schema.org","@graph":[
            {"@type":"WebSite","name":"A","url":"https://a.com"},
            {"@type":"Person","name":"Ann"}]}"#]);
        assert_eq!(r.items.len(), 2);
        assert!(r.items.iter().all(|i| i.valid));
        assert_eq!(r.types, vec!["WebSite", "Person"]);
    }

    #[test]
    fn top_level_array_is_validated_per_item() {
        let r = report(&[r#"[{"@context":"https://schema.org","@type":"Thing"},{"@type":"Thing"}]"#]);
        assert_eq!(r.items.len(), 2);
        assert!(r.items[0].valid);
        assert_eq!(r.items[1].issues, vec![MISSING_CONTEXT]);
    }

    #[test]
    fn unknown_types_are_never_incomplete() {
        let items = validate_json_ld(r#"{"@context":"https://schema.org","@type":"Thing"}"#);
        assert!(items[0].valid);
    }

    #[test]
    fn collects_authors_dates_and_address() {
        let r = report(&[r#"{"@context":"https://schema.org","@type":"Article","headline":"H",
            "author":[{"@type":"Person","name":"Ann"},"Bob"],"datePublished":"2024-01-01",
            "publisher":{"@type":"Organization","address":{"@type":"PostalAddress"}}}"#]);
        assert_eq!(r.authors, vec!["Ann", "Bob"]);
        assert_eq!(r.date_published.as_deref(), Some("2024-01-01"));
        assert!(r.has_postal_address);
        assert_eq!(r.items[0].warnings.len(), 1);
    }

    #[test]
    fn aggregate_rating_counts_as_review_data() {
        let r = report(&[r#"{"@context":"https://schema.org","@type":"Product","name":"X","image":"i.png",
            "aggregateRating":{"@type":"AggregateRating","ratingValue":"4"}}"#]);
        assert!(r.has_review_data);
        assert!(r.items[0].valid);
    }
}
