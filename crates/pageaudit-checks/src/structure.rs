use std::collections::BTreeMap;

use pageaudit_dom::{Document, visible_text};
use pageaudit_patterns::markup::DEPRECATED_TAGS;
use pageaudit_types::{StructureReport, TagCount};

use crate::util::{non_empty_attr, push_sample, round_f64};

pub fn build_structure_report(doc: &Document) -> StructureReport {
    let elements = doc.elements_with_depth();
    let mut deprecated: BTreeMap<&str, usize> = BTreeMap::new();
    let mut ids: BTreeMap<&str, usize> = BTreeMap::new();
    let mut inline_style_count = 0;

    for (el, _) in &elements {
        let name = el.value().name();
        if DEPRECATED_TAGS.contains(&name) {
            *deprecated.entry(name).or_insert(0) += 1;
        }
        if let Some(id) = non_empty_attr(*el, "id") {
            *ids.entry(id).or_insert(0) += 1;
        }
        if el.value().attr("style").is_some() {
            inline_style_count += 1;
        }
    }

    let mut duplicate_ids = Vec::new();
    for (id, n) in ids {
        if n > 1 {
            push_sample(&mut duplicate_ids, id.to_string());
        }
    }

    let html_size_bytes = doc.html_len();
    let text_bytes = visible_text(doc.html_element()).len();
    let text_ratio = if html_size_bytes == 0 {
        0.0
    } else {
        round_f64(text_bytes as f64 * 100.0 / html_size_bytes as f64, 2)
    };

    StructureReport {
        element_count: elements.len(),
        max_depth: elements.iter().map(|(_, d)| *d).max().unwrap_or(0),
        has_doctype: doc.has_doctype(),
        deprecated_tags: deprecated
            .into_iter()
            .map(|(tag, count)| TagCount {
                tag: tag.to_string(),
                count,
            })
            .collect(),
        duplicate_ids,
        inline_style_count,
        iframe_count: doc.count("iframe"),
        form_count: doc.count("form"),
        html_size_bytes,
        text_ratio,
    }
}
