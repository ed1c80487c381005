use scraper::ElementRef;

const HIDDEN_TEXT_PARENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Phrasing elements whose text flows into the surrounding words.
const INLINE_TAGS: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "cite", "code", "data", "del", "dfn", "em", "font", "i",
    "ins", "kbd", "label", "mark", "q", "s", "samp", "small", "span", "strong", "sub", "sup",
    "time", "u", "var",
];

/// Text of `el` and its descendants with runs of whitespace collapsed to a
/// single space and the ends trimmed. Inline markup does not split words:
/// `Wid<em>gets</em>` reads as `Widgets`.
pub fn element_text(el: ElementRef<'_>) -> String {
    gather_text(el, false)
}

/// Like [`element_text`], but skips text inside script, style, noscript and
/// template elements.
pub fn visible_text(el: ElementRef<'_>) -> String {
    gather_text(el, true)
}

/// Text nodes in one inline run are concatenated as-is; a space separates
/// text on either side of any other element (block, `br`, `img`, ...).
fn gather_text(el: ElementRef<'_>, skip_hidden: bool) -> String {
    let mut out = String::new();
    let mut last_block = None;
    let mut boundary = false;
    for node in el.descendants().skip(1) {
        if let Some(element) = node.value().as_element() {
            if !INLINE_TAGS.contains(&element.name()) {
                boundary = true;
            }
            continue;
        }
        let Some(text) = node.value().as_text() else {
            continue;
        };
        if skip_hidden
            && node
                .ancestors()
                .filter_map(|a| a.value().as_element())
                .any(|e| HIDDEN_TEXT_PARENTS.contains(&e.name()))
        {
            continue;
        }
        let block = node
            .ancestors()
            .find(|a| {
                a.value()
                    .as_element()
                    .is_some_and(|e| !INLINE_TAGS.contains(&e.name()))
            })
            .map(|a| a.id());
        if boundary || block != last_block {
            out.push(' ');
        }
        boundary = false;
        last_block = block;
        out.push_str(text);
    }
    collapse_whitespace(&out)
}

pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    use scraper::{Html, Selector};

    fn first(html: &str, css: &str) -> String {
        let doc = Html::parse_document(html);
        let sel = Selector::parse(css).unwrap();
        let el = doc.select(&sel).next().unwrap();
        element_text(el)
    }

    #[test]
    fn inline_markup_keeps_words_whole() {
        assert_eq!(first("<h1>Acme Wid<em>gets</em></h1>", "h1"), "Acme Widgets");
        assert_eq!(first("<a href=/x>Click <b>here</b></a>", "a"), "Click here");
        assert_eq!(first("<p>un<span>break</span><strong>able</strong></p>", "p"), "unbreakable");
    }

    #[test]
    fn block_boundaries_separate_words() {
        assert_eq!(first("<div><p>one</p><p>two</p>three</div>", "div"), "one two three");
        assert_eq!(first("<p>line<br>break</p>", "p"), "line break");
        assert_eq!(first("<ul><li>a</li><li>b</li></ul>", "ul"), "a b");
    }

    #[test]
    fn visible_text_skips_scripts_without_splitting_inline() {
        let doc = Html::parse_document(
            "<body><p>Wid<em>gets</em></p><script>var x = 1;</script><p>Gad<i>gets</i></p></body>",
        );
        let body = doc.select(&Selector::parse("body").unwrap()).next().unwrap();
        assert_eq!(visible_text(body), "Widgets Gadgets");
    }

    #[test]
    fn collapses_runs() {
        assert_eq!(collapse_whitespace("  a \n\t b  "), "a b");
        assert_eq!(collapse_whitespace(""), "");
    }
}
