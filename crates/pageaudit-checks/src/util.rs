use pageaudit_dom::{ElementRef, attr};

/// Maximum length of every sample list in a fact record.
pub const SAMPLE_LIMIT: usize = 10;

pub(crate) fn round_f64(val: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (val * factor).round() / factor
}

pub(crate) fn push_sample<T>(samples: &mut Vec<T>, item: T) {
    if samples.len() < SAMPLE_LIMIT {
        samples.push(item);
    }
}

/// First `max` characters of `s`, with an ellipsis when cut.
pub(crate) fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max).collect();
    out.push('…');
    out
}

/// Trimmed attribute value, `None` when absent or blank.
pub(crate) fn non_empty_attr<'a>(el: ElementRef<'a>, name: &str) -> Option<&'a str> {
    attr(el, name).map(str::trim).filter(|v| !v.is_empty())
}

/// Short `<tag id class>` description for sample lists.
pub(crate) fn describe(el: ElementRef<'_>) -> String {
    let mut out = format!("<{}", el.value().name());
    if let Some(id) = non_empty_attr(el, "id") {
        out.push_str(&format!(" id=\"{id}\""));
    }
    if let Some(class) = non_empty_attr(el, "class") {
        out.push_str(&format!(" class=\"{}\"", truncate_chars(class, 40)));
    }
    if let Some(name) = non_empty_attr(el, "name") {
        out.push_str(&format!(" name=\"{name}\""));
    }
    out.push('>');
    out
}

/// True when `needle` occurs in `haystack` with no alphanumeric character
/// directly before or after it.
pub(crate) fn contains_word(haystack: &str, needle: &str) -> bool {
    let mut start = 0;
    while let Some(pos) = haystack[start..].find(needle) {
        let at = start + pos;
        let end = at + needle.len();
        let before_ok = haystack[..at]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_alphanumeric());
        if before_ok && after_ok {
            return true;
        }
        start = at + needle.len().max(1);
        if start > haystack.len() {
            break;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_keeps_requested_decimals() {
        assert_eq!(round_f64(1.23456, 2), 1.23);
        assert_eq!(round_f64(2.5, 0), 3.0);
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 10), "héllo");
        assert_eq!(truncate_chars("héllo", 2), "hé…");
    }

    #[test]
    fn contains_word_requires_boundaries() {
        assert!(contains_word("we accept visa and paypal", "visa"));
        assert!(!contains_word("this is advisable", "visa"));
        assert!(contains_word("visa", "visa"));
        assert!(!contains_word("", "visa"));
    }

    #[test]
    fn samples_are_bounded() {
        let mut v = Vec::new();
        for i in 0..50 {
            push_sample(&mut v, i);
        }
        assert_eq!(v.len(), SAMPLE_LIMIT);
    }
}
