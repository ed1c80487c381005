use std::sync::LazyLock;

use pageaudit_dom::{Document, ElementRef, attr, attr_tokens, has_ancestor, has_attr};
use pageaudit_types::PerformanceReport;
use regex::Regex;

use crate::util::{push_sample, truncate_chars};

/// `@font-face` blocks in raw source. Bounded so a missing brace cannot
/// swallow the rest of the document.
static FONT_FACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)@font-face\s*\{[^}]{0,4000}\}").expect("valid regex literal"));

pub fn build_performance_report(doc: &Document) -> PerformanceReport {
    let mut r = PerformanceReport {
        html_size_bytes: doc.html_len(),
        inline_styles: doc.count("style"),
        ..Default::default()
    };

    for s in doc.select("script") {
        r.total_scripts += 1;
        let Some(src) = attr(s, "src").map(str::trim).filter(|v| !v.is_empty()) else {
            r.inline_scripts += 1;
            continue;
        };
        r.external_scripts += 1;
        let is_async = has_attr(s, "async");
        let is_defer = has_attr(s, "defer");
        if is_async {
            r.async_scripts += 1;
        }
        if is_defer {
            r.defer_scripts += 1;
        }
        if has_ancestor(s, &["head"]) && !is_async && !is_defer && !is_module(s) {
            r.render_blocking_scripts += 1;
            push_sample(&mut r.render_blocking_script_urls, truncate_chars(src, 200));
        }
    }

    for link in doc.select("link[rel]") {
        let rel = attr_tokens(link, "rel");
        let has = |t: &str| rel.iter().any(|tok| tok == t);
        if has("stylesheet") {
            r.stylesheets += 1;
            let print_only = attr(link, "media").is_some_and(|m| m.trim().eq_ignore_ascii_case("print"));
            if has_ancestor(link, &["head"]) && !print_only {
                r.render_blocking_stylesheets += 1;
            }
        }
        if has("preload") {
            r.preload_count += 1;
            if attr(link, "as").is_none_or(|a| a.trim().is_empty()) {
                let href = attr(link, "href").unwrap_or_default();
                push_sample(&mut r.preloads_without_as, truncate_chars(href, 200));
            }
        }
        if has("preconnect") {
            r.preconnect_count += 1;
        }
        if has("dns-prefetch") {
            r.dns_prefetch_count += 1;
        }
    }

    for block in FONT_FACE.find_iter(doc.raw()) {
        r.font_face_count += 1;
        if !block.as_str().to_ascii_lowercase().contains("font-display") {
            r.font_faces_without_display += 1;
        }
    }
    r
}

fn is_module(s: ElementRef<'_>) -> bool {
    attr(s, "type").is_some_and(|t| t.trim().eq_ignore_ascii_case("module"))
}
