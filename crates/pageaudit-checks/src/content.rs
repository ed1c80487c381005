use std::collections::BTreeMap;

use pageaudit_dom::{Document, element_text};
use pageaudit_patterns::ai;
use pageaudit_patterns::words::is_stop_word;
use pageaudit_types::{ContentReport, HeadingEntry, HeadingFacts, KeywordDensity, PhraseHit};

use crate::util::{push_sample, round_f64, truncate_chars};

/// Paragraphs at or below this many characters are never duplicates.
const DUPLICATE_MIN_CHARS: usize = 50;
const KEYWORD_TOP_N: usize = 10;
const KEYWORD_MIN_CHARS: usize = 3;

/// `title` is the Technical report's title text.
pub fn build_content_report(doc: &Document, title: Option<&str>) -> ContentReport {
    let body_text = doc.body_text();
    let word_count = body_text.split_whitespace().count();

    let paragraphs: Vec<String> = doc
        .select("p")
        .into_iter()
        .map(element_text)
        .filter(|p| !p.is_empty())
        .collect();
    let (duplicate_paragraph_count, duplicate_paragraphs) = duplicate_paragraphs(&paragraphs);

    let sentence_count = count_sentences(&body_text);
    let avg_words_per_sentence = if sentence_count == 0 {
        0.0
    } else {
        round_f64(word_count as f64 / sentence_count as f64, 1)
    };

    let headings = heading_facts(doc);
    let title_h1_duplicate = match (title, headings.h1.first()) {
        (Some(t), Some(h1)) => {
            let t = t.trim().to_lowercase();
            !t.is_empty() && t == h1.trim().to_lowercase()
        }
        _ => false,
    };

    let hits = ai::phrase_hits(&body_text);
    let ai_score = ai::score(&hits);
    let ai_phrases = hits
        .into_iter()
        .map(|(phrase, count)| PhraseHit {
            phrase: phrase.to_string(),
            count,
        })
        .collect();

    ContentReport {
        word_count,
        paragraph_count: paragraphs.len(),
        sentence_count,
        avg_words_per_sentence,
        headings,
        title_h1_duplicate,
        duplicate_paragraph_count,
        duplicate_paragraphs,
        ai_score,
        ai_phrases,
        keyword_density: keyword_density(&body_text, word_count),
        has_lorem_ipsum: body_text.to_lowercase().contains("lorem ipsum"),
    }
}

fn heading_facts(doc: &Document) -> HeadingFacts {
    let mut facts = HeadingFacts::default();
    for el in doc.select("h1, h2, h3, h4, h5, h6") {
        let level = el.value().name()[1..].parse::<u8>().unwrap_or(1);
        let text = element_text(el);
        facts.counts[usize::from(level - 1)] += 1;
        if level == 1 {
            facts.h1.push(text.clone());
        }
        facts.outline.push(HeadingEntry { level, text });
    }
    facts
}

/// Returns the number of extra copies and a sample of the duplicated texts.
fn duplicate_paragraphs(paragraphs: &[String]) -> (usize, Vec<String>) {
    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
    let mut extra = 0;
    let mut samples = Vec::new();
    for p in paragraphs {
        if p.chars().count() <= DUPLICATE_MIN_CHARS {
            continue;
        }
        let n = seen.entry(p.as_str()).or_insert(0);
        *n += 1;
        if *n > 1 {
            extra += 1;
        }
        if *n == 2 {
            push_sample(&mut samples, truncate_chars(p, 100));
        }
    }
    (extra, samples)
}

fn count_sentences(text: &str) -> usize {
    text.split(['.', '!', '?'])
        .filter(|s| s.split_whitespace().next().is_some())
        .count()
}

fn keyword_density(text: &str, word_count: usize) -> Vec<KeywordDensity> {
    if word_count == 0 {
        return Vec::new();
    }
    let lower = text.to_lowercase();
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for word in lower.split(|c: char| !c.is_alphabetic()) {
        if word.chars().count() < KEYWORD_MIN_CHARS || is_stop_word(word) {
            continue;
        }
        *counts.entry(word).or_insert(0) += 1;
    }
    let mut rows: Vec<(&str, usize)> = counts.into_iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    rows.into_iter()
        .take(KEYWORD_TOP_N)
        .map(|(word, count)| KeywordDensity {
            word: word.to_string(),
            count,
            density: round_f64(count as f64 * 100.0 / word_count as f64, 2),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(body: &str, title: Option<&str>) -> ContentReport {
        let html = format!("<html><body>{body}</body></html>");
        build_content_report(&Document::parse(&html, None), title)
    }

    #[test]
    fn empty_body_has_zero_words() {
        let r = report("", None);
        assert_eq!(r.word_count, 0);
        assert_eq!(r.ai_score, 0);
        assert!(r.keyword_density.is_empty());
    }

    #[test]
    fn title_equal_to_first_h1_is_duplicate() {
        let r = report("<h1>  Hello World </h1><h1>Other</h1>", Some("hello world"));
        assert!(r.title_h1_duplicate);
        assert_eq!(r.headings.h1_count(), 2);
    }

    #[test]
    fn headings_keep_document_order() {
        let r = report("<h2>b</h2><h1>a</h1><h4>c</h4>", None);
        let levels: Vec<u8> = r.headings.outline.iter().map(|h| h.level).collect();
        assert_eq!(levels, vec![2, 1, 4]);
        assert_eq!(r.headings.counts, [1, 1, 0, 1, 0, 0]);
    }

    #[test]
    fn short_paragraphs_are_never_duplicates() {
        let r = report("<p>short</p><p>short</p>", None);
        assert_eq!(r.duplicate_paragraph_count, 0);
    }

    #[test]
    fn long_exact_duplicates_are_found() {
        let p = "This paragraph is clearly longer than fifty characters in total length.";
        let r = report(&format!("<p>{p}</p><p>{p}</p><p>{p}</p>"), None);
        assert_eq!(r.duplicate_paragraph_count, 2);
        assert_eq!(r.duplicate_paragraphs.len(), 1);
    }

    #[test]
    fn leverage_three_times_scores_fifteen() {
        let r = report("<p>We leverage it. We leverage that. We leverage more.</p>", None);
        assert_eq!(r.ai_score, 15);
        assert_eq!(r.ai_phrases.len(), 1);
        assert_eq!(r.ai_phrases[0].count, 3);
    }

    #[test]
    fn keyword_density_skips_stop_words_and_short_words() {
        let r = report("<p>the rust rust rust is an ok language</p>", None);
        assert_eq!(r.keyword_density[0].word, "rust");
        assert_eq!(r.keyword_density[0].count, 3);
        assert!(r.keyword_density.iter().all(|k| k.word != "the" && k.word != "ok"));
        assert_eq!(r.keyword_density[0].density, 37.5);
    }

    #[test]
    fn lorem_ipsum_is_detected() {
        assert!(report("<p>Lorem ipsum dolor sit amet</p>", None).has_lorem_ipsum);
    }
}
