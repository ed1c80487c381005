//! # pageaudit-dom
//!
//! **Tier 1 (Document Model)**
//!
//! Parses raw HTML plus an optional source URL into a query-able tree.
//! Parsing is best-effort and never fails: malformed markup yields a tree
//! with whatever html5ever could recover, and invalid selectors match nothing.
//!
//! ## What belongs here
//! * Selection, attribute and text access
//! * URL resolution and href classification against the source host
//!
//! ## What does NOT belong here
//! * Category-specific logic (use pageaudit-checks)

mod links;
mod text;

pub use links::{LinkKind, classify_href, is_third_party, same_host};
pub use scraper::ElementRef;
pub use text::{collapse_whitespace, element_text, visible_text};

use scraper::{Html, Selector};
use url::Url;

/// A parsed document together with its source URL.
pub struct Document {
    html: Html,
    raw: String,
    lower: String,
    source_url: Option<Url>,
    base_url: Option<Url>,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("bytes", &self.raw.len())
            .field("source_url", &self.source_url.as_ref().map(Url::as_str))
            .finish()
    }
}

impl Document {
    /// Parse `html`. `source_url` is the page address; an unparsable URL is
    /// treated as absent.
    pub fn parse(html: &str, source_url: Option<&str>) -> Self {
        let parsed = Html::parse_document(html);
        let source_url = source_url.and_then(|s| match Url::parse(s.trim()) {
            Ok(u) => Some(u),
            Err(err) => {
                tracing::debug!(url = s, %err, "ignoring unparsable source url");
                None
            }
        });

        let mut doc = Self {
            html: parsed,
            raw: html.to_string(),
            lower: html.to_lowercase(),
            base_url: source_url.clone(),
            source_url,
        };

        // <base href> changes how relative references resolve.
        let base_href = doc.first("base[href]").and_then(|b| attr(b, "href").map(str::to_string));
        if let Some(href) = base_href {
            let resolved = match &doc.source_url {
                Some(src) => src.join(&href).ok(),
                None => Url::parse(&href).ok(),
            };
            if resolved.is_some() {
                doc.base_url = resolved;
            }
        }
        doc
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Lower-cased source, for substring signature matching.
    pub fn lower(&self) -> &str {
        &self.lower
    }

    pub fn html_len(&self) -> usize {
        self.raw.len()
    }

    pub fn source_url(&self) -> Option<&Url> {
        self.source_url.as_ref()
    }

    pub fn source_host(&self) -> Option<&str> {
        self.source_url.as_ref().and_then(Url::host_str)
    }

    pub fn is_https(&self) -> bool {
        self.source_url
            .as_ref()
            .is_some_and(|u| u.scheme() == "https")
    }

    /// Resolve `href` against the document base.
    pub fn resolve(&self, href: &str) -> Option<Url> {
        let href = href.trim();
        match &self.base_url {
            Some(base) => base.join(href).ok(),
            None => Url::parse(href).ok(),
        }
    }

    pub fn classify(&self, href: &str) -> LinkKind {
        classify_href(href, self.base_url.as_ref(), self.source_host())
    }

    /// All elements matching `css`, in document order.
    pub fn select(&self, css: &str) -> Vec<ElementRef<'_>> {
        match selector(css) {
            Some(sel) => self.html.select(&sel).collect(),
            None => Vec::new(),
        }
    }

    pub fn count(&self, css: &str) -> usize {
        match selector(css) {
            Some(sel) => self.html.select(&sel).count(),
            None => 0,
        }
    }

    pub fn first(&self, css: &str) -> Option<ElementRef<'_>> {
        let sel = selector(css)?;
        self.html.select(&sel).next()
    }

    /// Attribute of the first element matching `css`.
    pub fn attr_of(&self, css: &str, name: &str) -> Option<String> {
        self.first(css)
            .and_then(|el| attr(el, name))
            .map(str::to_string)
    }

    /// `content` of `<meta name=..>`, matched case-insensitively.
    pub fn meta_name(&self, name: &str) -> Option<String> {
        self.meta_by("name", name)
    }

    /// `content` of `<meta property=..>`, matched case-insensitively.
    pub fn meta_property(&self, property: &str) -> Option<String> {
        self.meta_by("property", property)
    }

    fn meta_by(&self, key: &str, value: &str) -> Option<String> {
        self.select("meta")
            .into_iter()
            .find(|m| attr(*m, key).is_some_and(|v| v.trim().eq_ignore_ascii_case(value)))
            .and_then(|m| attr(m, "content"))
            .map(|c| c.trim().to_string())
    }

    pub fn html_element(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    pub fn body(&self) -> Option<ElementRef<'_>> {
        self.first("body")
    }

    pub fn head(&self) -> Option<ElementRef<'_>> {
        self.first("head")
    }

    /// Visible body text, scripts and styles excluded.
    pub fn body_text(&self) -> String {
        self.body().map(visible_text).unwrap_or_default()
    }

    pub fn has_doctype(&self) -> bool {
        self.html
            .tree
            .root()
            .children()
            .any(|n| n.value().is_doctype())
    }

    /// Every element in document order, with its depth below the root
    /// `<html>` element (which has depth 1).
    pub fn elements_with_depth(&self) -> Vec<(ElementRef<'_>, usize)> {
        let mut out = Vec::new();
        let mut stack = vec![(self.html.root_element(), 1usize)];
        while let Some((el, depth)) = stack.pop() {
            out.push((el, depth));
            let children: Vec<_> = el.children().filter_map(ElementRef::wrap).collect();
            for child in children.into_iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        out
    }
}

/// Attribute value, if present.
pub fn attr<'a>(el: ElementRef<'a>, name: &str) -> Option<&'a str> {
    el.value().attr(name)
}

pub fn has_attr(el: ElementRef<'_>, name: &str) -> bool {
    el.value().attr(name).is_some()
}

pub fn tag_name<'a>(el: ElementRef<'a>) -> &'a str {
    el.value().name()
}

/// Nearest element ancestor (excluding `el` itself).
pub fn parent_element<'a>(el: ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.ancestors().find_map(ElementRef::wrap)
}

/// True when some element ancestor has one of the given tag names.
pub fn has_ancestor(el: ElementRef<'_>, tags: &[&str]) -> bool {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|a| tags.contains(&a.value().name()))
}

/// Elements below `el` matching `css`.
pub fn select_within<'a>(el: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match selector(css) {
        Some(sel) => el.select(&sel).collect(),
        None => Vec::new(),
    }
}

/// Whitespace-separated tokens of an attribute such as `rel` or `class`,
/// lower-cased.
pub fn attr_tokens(el: ElementRef<'_>, name: &str) -> Vec<String> {
    attr(el, name)
        .map(|v| v.split_whitespace().map(str::to_ascii_lowercase).collect())
        .unwrap_or_default()
}

fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(sel) => Some(sel),
        Err(err) => {
            tracing::debug!(css, ?err, "invalid selector");
            None
        }
    }
}
