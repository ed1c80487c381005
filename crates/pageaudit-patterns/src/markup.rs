//! HTML vocabulary: deprecated tags, ARIA roles, skip-link conventions.

pub const DEPRECATED_TAGS: &[&str] = &[
    "acronym", "applet", "basefont", "bgsound", "big", "blink", "center", "dir", "font", "frame",
    "frameset", "isindex", "keygen", "marquee", "menuitem", "nobr", "noembed", "noframes",
    "plaintext", "rb", "rtc", "spacer", "strike", "tt", "xmp",
];

/// WAI-ARIA 1.2 roles.
pub const ARIA_ROLES: &[&str] = &[
    "alert", "alertdialog", "application", "article", "banner", "blockquote", "button", "caption",
    "cell", "checkbox", "code", "columnheader", "combobox", "complementary", "contentinfo",
    "definition", "deletion", "dialog", "directory", "document", "emphasis", "feed", "figure",
    "form", "generic", "grid", "gridcell", "group", "heading", "img", "insertion", "link", "list",
    "listbox", "listitem", "log", "main", "marquee", "math", "menu", "menubar", "menuitem",
    "menuitemcheckbox", "menuitemradio", "meter", "navigation", "none", "note", "option",
    "paragraph", "presentation", "progressbar", "radio", "radiogroup", "region", "row",
    "rowgroup", "rowheader", "scrollbar", "search", "searchbox", "separator", "slider",
    "spinbutton", "status", "strong", "subscript", "superscript", "switch", "tab", "table",
    "tablist", "tabpanel", "term", "textbox", "time", "timer", "toolbar", "tooltip", "tree",
    "treegrid", "treeitem",
];

pub fn is_aria_role(role: &str) -> bool {
    ARIA_ROLES.contains(&role)
}

/// Fragment targets commonly used by skip links.
pub const SKIP_LINK_TARGETS: &[&str] = &[
    "#main",
    "#main-content",
    "#maincontent",
    "#content",
    "#primary",
    "#skip",
    "#skip-content",
];

/// Class names commonly used by skip links.
pub const SKIP_LINK_CLASSES: &[&str] = &["skip-link", "skip-to-content", "skiplink", "skip-nav"];

/// Lower-case link text fragments used by skip links.
pub const SKIP_LINK_TEXTS: &[&str] = &["skip to", "skip navigation", "перейти к содержимому"];

/// Mount points used by client-rendered single-page apps.
pub const SPA_ROOT_IDS: &[&str] = &["root", "app", "__next", "__nuxt", "svelte"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_are_valid() {
        assert!(is_aria_role("navigation"));
        assert!(is_aria_role("main"));
        assert!(!is_aria_role("nav"));
        assert!(!is_aria_role("Main"));
    }
}
