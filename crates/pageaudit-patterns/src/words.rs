//! Stop words excluded from keyword density, and void-link literals.

pub const STOP_WORDS: &[&str] = &[
    // en
    "the", "and", "for", "are", "but", "not", "you", "all", "any", "can", "had", "her", "was",
    "one", "our", "out", "has", "his", "how", "its", "may", "new", "now", "old", "see", "two",
    "who", "did", "get", "him", "let", "put", "say", "she", "too", "use", "that", "with", "have",
    "this", "will", "your", "from", "they", "been", "were", "said", "each", "which", "their",
    "there", "what", "about", "would", "these", "other", "into", "more", "some", "than", "them",
    "then", "also", "just", "only", "over", "such", "when", "where", "while", "after", "before",
    "because", "could", "should", "being", "very", "most", "here", "those", "does", "like",
    // ru
    "это", "как", "так", "для", "что", "его", "все", "она", "они", "мы", "при", "или", "без",
    "над", "под", "уже", "еще", "ещё", "был", "была", "были", "быть", "если", "только", "также",
    "чтобы", "когда", "этот", "эта", "эти", "который", "которые",
];

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// hrefs that look like links but go nowhere. Compared lower-cased with
/// whitespace removed.
pub const VOID_LINKS: &[&str] = &[
    "javascript:void(0)",
    "javascript:void(0);",
    "javascript:;",
    "javascript:",
    "about:blank",
];

pub fn is_void_link(href: &str) -> bool {
    let compact: String = href
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    VOID_LINKS.contains(&compact.as_str())
}
