//! AI-cliché phrase detection.
//!
//! Three disjoint lists: hard clichés, soft buzzwords and regex forms for
//! phrase families. Every match adds [`AI_PHRASE_WEIGHT`] to the score and
//! the total is capped at [`AI_SCORE_CAP`].

use std::sync::LazyLock;

use regex::Regex;

pub const AI_PHRASE_WEIGHT: u32 = 5;
pub const AI_SCORE_CAP: u32 = 100;

pub const HARD_PHRASES: &[&str] = &[
    "delve",
    "tapestry",
    "in today's fast-paced world",
    "in today's digital age",
    "it's important to note",
    "it is important to note",
    "it's worth noting",
    "it is worth noting",
    "a testament to",
    "embark on a journey",
    "unlock the potential",
    "unlock the power",
    "navigate the complexities",
    "in conclusion",
    "game-changer",
    "look no further",
    "treasure trove",
    "whether you're a beginner",
];

pub const SOFT_PHRASES: &[&str] = &[
    "leverage",
    "seamless",
    "seamlessly",
    "robust",
    "cutting-edge",
    "elevate",
    "empower",
    "holistic",
    "synergy",
    "paradigm",
    "meticulous",
    "meticulously",
    "realm",
    "furthermore",
    "moreover",
    "streamline",
    "unparalleled",
    "bustling",
    "vibrant",
];

/// `(label, pattern)` pairs for families of phrasing.
pub const REGEX_PHRASES: &[(&str, &str)] = &[
    ("dive deep(er) into", r"dive\s+deep(?:er)?\s+into"),
    ("not only ... but also", r"not\s+only\b[^.]{1,80}?\bbut\s+also"),
    ("ever-changing/evolving", r"ever[-\s](?:changing|evolving)"),
    ("plays a crucial/pivotal/vital role", r"plays?\s+an?\s+(?:crucial|pivotal|vital)\s+role"),
    ("whether you are ... or", r"whether\s+you\s+are\s+an?\s+\w+\s+or"),
];

/// A compiled phrase with the label reported for it.
#[derive(Debug)]
pub struct AiPattern {
    pub label: &'static str,
    pub regex: Regex,
}

fn word_bounded(phrase: &str) -> Regex {
    // Phrases are plain text; escaping keeps apostrophes and hyphens literal.
    let pat = format!(r"(?i)\b{}\b", regex::escape(phrase));
    Regex::new(&pat).expect("valid regex literal")
}

static COMPILED: LazyLock<Vec<AiPattern>> = LazyLock::new(|| {
    let mut out = Vec::with_capacity(HARD_PHRASES.len() + SOFT_PHRASES.len() + REGEX_PHRASES.len());
    for p in HARD_PHRASES.iter().chain(SOFT_PHRASES) {
        out.push(AiPattern {
            label: p,
            regex: word_bounded(p),
        });
    }
    for (label, pat) in REGEX_PHRASES {
        out.push(AiPattern {
            label,
            regex: Regex::new(&format!(r"(?i)\b{pat}\b")).expect("valid regex literal"),
        });
    }
    out
});

pub fn patterns() -> &'static [AiPattern] {
    &COMPILED
}

/// Per-phrase match counts for `text`, in table order, zero counts omitted.
pub fn phrase_hits(text: &str) -> Vec<(&'static str, usize)> {
    patterns()
        .iter()
        .filter_map(|p| {
            let n = p.regex.find_iter(text).count();
            (n > 0).then_some((p.label, n))
        })
        .collect()
}

/// Weighted, capped score for a set of phrase hits.
pub fn score(hits: &[(&'static str, usize)]) -> u32 {
    let total: usize = hits.iter().map(|(_, n)| *n).sum();
    let raw = (total as u64).saturating_mul(AI_PHRASE_WEIGHT as u64);
    raw.min(AI_SCORE_CAP as u64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leverage_three_times_scores_fifteen() {
        let text = "We leverage data. They leverage tools. You leverage skill.";
        let hits = phrase_hits(text);
        assert_eq!(hits, vec![("leverage", 3)]);
        assert_eq!(score(&hits), 15);
    }

    #[test]
    fn word_boundaries_exclude_inflections() {
        assert!(phrase_hits("leveraged leveraging").is_empty());
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(phrase_hits("In Conclusion, it works."), vec![("in conclusion", 1)]);
    }

    #[test]
    fn score_is_capped() {
        let text = "robust ".repeat(500);
        assert_eq!(score(&phrase_hits(&text)), AI_SCORE_CAP);
    }

    #[test]
    fn regex_families_match() {
        let hits = phrase_hits("Let us dive deeper into the topic.");
        assert_eq!(hits, vec![("dive deep(er) into", 1)]);
    }

    #[test]
    fn lists_are_disjoint() {
        for p in HARD_PHRASES {
            assert!(!SOFT_PHRASES.contains(p), "{p} listed twice");
        }
    }
}
