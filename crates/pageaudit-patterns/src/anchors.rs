//! Generic anchor phrases.

/// Lower-case generic link texts across the supported languages.
pub const GENERIC_ANCHORS: &[&str] = &[
    // en
    "click here",
    "click",
    "here",
    "read more",
    "more",
    "learn more",
    "more info",
    "more information",
    "link",
    "this link",
    "go",
    "details",
    "continue",
    "continue reading",
    "see more",
    "view more",
    "find out more",
    // ru
    "нажмите здесь",
    "здесь",
    "тут",
    "подробнее",
    "читать далее",
    "читать дальше",
    "далее",
    "ссылка",
    "узнать больше",
    // de
    "hier klicken",
    "hier",
    "mehr",
    "weiterlesen",
    "mehr erfahren",
    // fr
    "cliquez ici",
    "ici",
    "en savoir plus",
    "lire la suite",
    // es
    "haga clic aquí",
    "haz clic aquí",
    "aquí",
    "leer más",
    "más información",
];

/// True when the trimmed, lower-cased text equals a generic phrase.
/// Longer text that merely contains a phrase is never generic.
pub fn is_generic_anchor(text: &str) -> bool {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let normalized = normalized.to_lowercase();
    GENERIC_ANCHORS.iter().any(|p| *p == normalized)
}
