use std::collections::BTreeSet;

use pageaudit_dom::{
    Document, ElementRef, attr, attr_tokens, element_text, has_ancestor, select_within,
};
use pageaudit_patterns::markup::{
    SKIP_LINK_CLASSES, SKIP_LINK_TARGETS, SKIP_LINK_TEXTS, is_aria_role,
};
use pageaudit_types::{AccessibilityReport, HeadingSkip, LandmarkCounts};

use crate::util::{describe, non_empty_attr, push_sample};

const NON_LABELLED_INPUT_TYPES: &[&str] = &["hidden", "submit", "button", "reset", "image"];

pub fn build_accessibility_report(doc: &Document) -> AccessibilityReport {
    let mut r = AccessibilityReport {
        landmarks: LandmarkCounts {
            main: doc.count("main, [role=main]"),
            nav: doc.count("nav, [role=navigation]"),
            header: doc.count("header, [role=banner]"),
            footer: doc.count("footer, [role=contentinfo]"),
            aside: doc.count("aside, [role=complementary]"),
            search: doc.count("search, [role=search]"),
        },
        has_lang: non_empty_attr(doc.html_element(), "lang").is_some(),
        ..Default::default()
    };

    let label_targets: BTreeSet<String> = doc
        .select("label[for]")
        .into_iter()
        .filter_map(|l| non_empty_attr(l, "for").map(str::to_string))
        .collect();

    for b in doc.select("button, [role=button], input[type=button], input[type=submit], input[type=reset]") {
        if !button_has_label(b) {
            r.buttons_without_label += 1;
            push_sample(&mut r.unlabeled_samples, describe(b));
        }
    }

    for input in doc.select("input, select, textarea") {
        let kind = attr(input, "type").unwrap_or("text").trim().to_ascii_lowercase();
        if input.value().name() == "input" && NON_LABELLED_INPUT_TYPES.contains(&kind.as_str()) {
            continue;
        }
        if !input_has_label(input, &label_targets) {
            r.inputs_without_label += 1;
            push_sample(&mut r.unlabeled_samples, describe(input));
        }
    }

    for a in doc.select("a[href]") {
        if !has_accessible_name(a) {
            r.links_without_text += 1;
            push_sample(&mut r.unlabeled_samples, describe(a));
        }
    }

    r.heading_skips = heading_skips(doc);
    r.has_skip_link = doc.select("a[href]").into_iter().any(is_skip_link);

    let mut invalid = Vec::new();
    for el in doc.select("[role]") {
        for token in attr(el, "role").unwrap_or_default().split_whitespace() {
            let role = token.to_ascii_lowercase();
            if !is_aria_role(&role) && !invalid.contains(&role) {
                invalid.push(role);
            }
        }
    }
    r.invalid_aria_roles = invalid;

    r.positive_tabindex_count = doc
        .select("[tabindex]")
        .into_iter()
        .filter(|el| {
            attr(*el, "tabindex")
                .and_then(|t| t.trim().parse::<i32>().ok())
                .is_some_and(|t| t > 0)
        })
        .count();

    r.iframes_without_title = doc
        .select("iframe")
        .into_iter()
        .filter(|f| non_empty_attr(*f, "title").is_none() && non_empty_attr(*f, "aria-label").is_none())
        .count();

    r
}

/// Text, aria-label, aria-labelledby, title or a nested image with alt text.
fn has_accessible_name(el: ElementRef<'_>) -> bool {
    if !element_text(el).is_empty() {
        return true;
    }
    if ["aria-label", "aria-labelledby", "title"]
        .iter()
        .any(|a| non_empty_attr(el, a).is_some())
    {
        return true;
    }
    select_within(el, "img, [role=img], svg")
        .into_iter()
        .any(|img| non_empty_attr(img, "alt").is_some() || non_empty_attr(img, "aria-label").is_some())
}

fn button_has_label(el: ElementRef<'_>) -> bool {
    if el.value().name() == "input" {
        let kind = attr(el, "type").unwrap_or_default().trim().to_ascii_lowercase();
        // submit and reset buttons have a default label
        return non_empty_attr(el, "value").is_some()
            || non_empty_attr(el, "aria-label").is_some()
            || non_empty_attr(el, "title").is_some()
            || kind == "submit"
            || kind == "reset";
    }
    has_accessible_name(el)
}

fn input_has_label(el: ElementRef<'_>, label_targets: &BTreeSet<String>) -> bool {
    if ["aria-label", "aria-labelledby", "title"]
        .iter()
        .any(|a| non_empty_attr(el, a).is_some())
    {
        return true;
    }
    if non_empty_attr(el, "id").is_some_and(|id| label_targets.contains(id)) {
        return true;
    }
    has_ancestor(el, &["label"])
}

/// Consecutive headings across the whole document that jump more than one level.
fn heading_skips(doc: &Document) -> Vec<HeadingSkip> {
    let levels: Vec<u8> = doc
        .select("h1, h2, h3, h4, h5, h6")
        .into_iter()
        .filter_map(|h| h.value().name()[1..].parse().ok())
        .collect();
    levels
        .windows(2)
        .filter(|w| w[1] > w[0] + 1)
        .map(|w| HeadingSkip { from: w[0], to: w[1] })
        .collect()
}

fn is_skip_link(a: ElementRef<'_>) -> bool {
    let href = attr(a, "href").unwrap_or_default().trim().to_ascii_lowercase();
    if SKIP_LINK_TARGETS.contains(&href.as_str()) {
        return true;
    }
    if attr_tokens(a, "class")
        .iter()
        .any(|c| SKIP_LINK_CLASSES.contains(&c.as_str()))
    {
        return true;
    }
    let text = element_text(a).to_lowercase();
    href.starts_with('#') && SKIP_LINK_TEXTS.iter().any(|t| text.contains(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(body: &str) -> AccessibilityReport {
        let html = format!("<html lang=\"en\"><body>{body}</body></html>");
        build_accessibility_report(&Document::parse(&html, None))
    }

    #[test]
    fn landmarks_include_role_equivalents() {
        let r = report(r#"<main></main><div role="main"></div><div role="navigation"></div>"#);
        assert_eq!(r.landmarks.main, 2);
        assert_eq!(r.landmarks.nav, 1);
    }

    #[test]
    fn unlabeled_controls_are_counted() {
        let r = report(
            r#"<button></button><button aria-label="Close"></button><button><img src="x" alt="Go"></button>
               <input type="text" id="q"><label for="q2">Q</label><input id="q2">
               <label>Name <input type="text"></label><input type="hidden">
               <a href="/"></a><a href="/x">X</a>"#,
        );
        assert_eq!(r.buttons_without_label, 1);
        assert_eq!(r.inputs_without_label, 1);
        assert_eq!(r.links_without_text, 1);
        assert_eq!(r.unlabeled_samples.len(), 3);
    }

    #[test]
    fn submit_inputs_have_default_labels() {
        let r = report(r#"<input type="submit"><input type="button">"#);
        assert_eq!(r.buttons_without_label, 1);
    }

    #[test]
    fn heading_skips_compare_consecutive_levels() {
        let r = report("<h1>a</h1><h3>b</h3><h2>c</h2><h4>d</h4><h1>e</h1>");
        assert_eq!(r.heading_skips, vec![HeadingSkip { from: 1, to: 3 }, HeadingSkip { from: 2, to: 4 }]);
    }

    #[test]
    fn skip_link_by_target_class_or_text() {
        assert!(report(r##"<a href="#main-content">x</a>"##).has_skip_link);
        assert!(report(r##"<a class="skip-link" href="#c">x</a>"##).has_skip_link);
        assert!(report(r##"<a href="#wrap">Skip to content</a>"##).has_skip_link);
        assert!(!report(r##"<a href="/main">Main</a>"##).has_skip_link);
    }

    #[test]
    fn roles_tabindex_and_iframes() {
        let r = report(
            r#"<div role="nav"></div><div role="button"></div><span tabindex="3"></span>
               <span tabindex="0"></span><iframe src="x"></iframe><iframe title="Map"></iframe>"#,
        );
        assert_eq!(r.invalid_aria_roles, vec!["nav"]);
        assert_eq!(r.positive_tabindex_count, 1);
        assert_eq!(r.iframes_without_title, 1);
        // div role=button has no name
        assert_eq!(r.buttons_without_label, 1);
    }
}
