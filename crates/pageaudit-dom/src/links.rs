//! href classification relative to the audited page.

use url::Url;

/// Where an href points, relative to the source host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkKind {
    /// Same host, relative, or unresolvable.
    Internal(Option<Url>),
    /// Different host.
    External(Url),
    /// `mailto:`, `tel:` or `sms:`.
    Contact,
}

const CONTACT_SCHEMES: &[&str] = &["mailto:", "tel:", "sms:"];

/// Classify `href`. With no source host, any absolute http(s) URL with a host
/// is external.
pub fn classify_href(href: &str, base: Option<&Url>, source_host: Option<&str>) -> LinkKind {
    let trimmed = href.trim();
    let lower = trimmed.to_ascii_lowercase();
    if CONTACT_SCHEMES.iter().any(|s| lower.starts_with(s)) {
        return LinkKind::Contact;
    }

    let resolved = match base {
        Some(b) => b.join(trimmed).ok(),
        None => Url::parse(trimmed).ok(),
    };
    let Some(url) = resolved else {
        return LinkKind::Internal(None);
    };
    if !matches!(url.scheme(), "http" | "https") {
        return LinkKind::Internal(None);
    }
    match (url.host_str(), source_host) {
        (Some(host), Some(src)) if same_host(host, src) => LinkKind::Internal(Some(url)),
        (Some(_), _) => LinkKind::External(url),
        (None, _) => LinkKind::Internal(Some(url)),
    }
}

/// Case-insensitive hostname equality.
pub fn same_host(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// True when `host` is neither `source` nor a subdomain of it.
pub fn is_third_party(host: &str, source: &str) -> bool {
    let host = host.to_ascii_lowercase();
    let source = source.to_ascii_lowercase();
    let source = source.strip_prefix("www.").unwrap_or(&source);
    !(host == source || host.ends_with(&format!(".{source}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://a.com/blog/post").unwrap()
    }

    #[test]
    fn relative_and_same_host_links_are_internal() {
        let b = base();
        assert!(matches!(classify_href("/about", Some(&b), Some("a.com")), LinkKind::Internal(Some(_))));
        assert!(matches!(classify_href("other", Some(&b), Some("a.com")), LinkKind::Internal(Some(_))));
        assert!(matches!(
            classify_href("https://A.com/x", Some(&b), Some("a.com")),
            LinkKind::Internal(Some(_))
        ));
    }

    #[test]
    fn other_hosts_are_external() {
        let b = base();
        assert!(matches!(
            classify_href("https://b.com/", Some(&b), Some("a.com")),
            LinkKind::External(_)
        ));
        assert!(matches!(classify_href("//cdn.b.com/x", Some(&b), Some("a.com")), LinkKind::External(_)));
    }

    #[test]
    fn contact_schemes_are_neither() {
        assert_eq!(classify_href("mailto:x@a.com", None, None), LinkKind::Contact);
        assert_eq!(classify_href(" TEL:+100", None, None), LinkKind::Contact);
    }

    #[test]
    fn unresolvable_defaults_to_internal() {
        assert_eq!(classify_href("/relative", None, None), LinkKind::Internal(None));
        assert_eq!(classify_href("javascript:void(0)", None, None), LinkKind::Internal(None));
    }

    #[test]
    fn subdomains_are_first_party() {
        assert!(!is_third_party("cdn.a.com", "a.com"));
        assert!(!is_third_party("a.com", "www.a.com"));
        assert!(is_third_party("evila.com", "a.com"));
        assert!(is_third_party("b.com", "a.com"));
    }
}
