use pageaudit_dom::{Document, visible_text};
use pageaudit_patterns::markup::SPA_ROOT_IDS;
use pageaudit_patterns::signatures::{ADVERTISING, ANALYTICS, CMS, FRAMEWORKS};
use pageaudit_patterns::detect;
use pageaudit_types::{PlatformReport, RenderMethod};

/// Body word count at which content counts as present in the initial HTML.
const SUBSTANTIAL_WORDS: usize = 50;
/// A mount root with less text than this is considered empty.
const EMPTY_ROOT_CHARS: usize = 50;

pub fn build_platform_report(doc: &Document) -> PlatformReport {
    let lower = doc.lower();
    let mut cms = detect(CMS, lower);
    let generator = doc.meta_name("generator").filter(|g| !g.is_empty());
    if let Some(g) = &generator {
        let g = g.to_lowercase();
        for sig in CMS {
            let name = sig.name.to_string();
            if g.contains(&sig.name.to_lowercase()) && !cms.contains(&name) {
                cms.push(name);
            }
        }
    }

    let (render_method, evidence) = render_method(doc);
    PlatformReport {
        cms,
        frameworks: detect(FRAMEWORKS, lower),
        analytics: detect(ANALYTICS, lower),
        advertising: detect(ADVERTISING, lower),
        generator,
        render_method,
        render_evidence: Some(evidence),
    }
}

/// Framework hydration markers are checked before the generic heuristics.
fn render_method(doc: &Document) -> (RenderMethod, String) {
    let lower = doc.lower();

    if lower.contains("__next_data__") {
        return if lower.contains("\"gsp\":true") || lower.contains("\"nextexport\":true") {
            (RenderMethod::Ssg, "Next.js __NEXT_DATA__ with static props".into())
        } else {
            (RenderMethod::Ssr, "Next.js __NEXT_DATA__".into())
        };
    }
    let markers: &[(&str, RenderMethod, &str)] = &[
        ("__nuxt__", RenderMethod::Ssr, "Nuxt __NUXT__ state"),
        ("__remixcontext", RenderMethod::Ssr, "Remix __remixContext"),
        ("__sveltekit", RenderMethod::Ssr, "SvelteKit hydration data"),
        ("___gatsby", RenderMethod::Ssg, "Gatsby ___gatsby root"),
        ("ng-server-context", RenderMethod::Ssr, "Angular ng-server-context"),
    ];
    for (needle, method, evidence) in markers {
        if lower.contains(needle) {
            return (*method, (*evidence).to_string());
        }
    }

    let body_words = doc.body_text().split_whitespace().count();
    for id in SPA_ROOT_IDS {
        let Some(root) = doc.first(&format!("#{id}")) else {
            continue;
        };
        let root_chars = visible_text(root).chars().count();
        if root_chars < EMPTY_ROOT_CHARS && body_words < SUBSTANTIAL_WORDS {
            return (RenderMethod::Csr, format!("empty #{id} mount point"));
        }
    }

    if body_words >= SUBSTANTIAL_WORDS {
        (RenderMethod::SsrOrStatic, format!("{body_words} words in initial HTML"))
    } else {
        (RenderMethod::Unknown, "no rendering markers".into())
    }
}
