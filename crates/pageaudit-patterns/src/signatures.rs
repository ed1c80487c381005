//! Substring signatures for platform and social detection.

/// A named set of lower-case needles.
#[derive(Debug, Clone, Copy)]
pub struct Signature {
    pub name: &'static str,
    pub patterns: &'static [&'static str],
}

impl Signature {
    /// `lower` must already be lower-cased.
    pub fn matches(&self, lower: &str) -> bool {
        self.patterns.iter().any(|p| lower.contains(p))
    }
}

/// Names of every signature in `table` that matches `lower`, in table order.
pub fn detect(table: &[Signature], lower: &str) -> Vec<String> {
    table
        .iter()
        .filter(|sig| sig.matches(lower))
        .map(|sig| sig.name.to_string())
        .collect()
}

macro_rules! sig {
    ($name:expr, [$($p:expr),+ $(,)?]) => {
        Signature { name: $name, patterns: &[$($p),+] }
    };
}

pub const CMS: &[Signature] = &[
    sig!("WordPress", ["wp-content", "wp-includes", "wp-json"]),
    sig!("Shopify", ["cdn.shopify.com", "shopify.theme", "myshopify.com"]),
    sig!("Wix", ["wix.com", "_wixcss", "wixstatic.com"]),
    sig!("Squarespace", ["squarespace.com", "static1.squarespace"]),
    sig!("Webflow", ["webflow.com", "wf-page", "data-wf-site"]),
    sig!("Drupal", ["drupal.settings", "/sites/default/files", "drupal.js"]),
    sig!("Joomla", ["/media/jui/", "joomla!", "/components/com_"]),
    sig!("Ghost", ["ghost.io", "ghost-portal", "content=\"ghost"]),
    sig!("HubSpot CMS", ["hs-sites.com", "hubspot.net/hub", "hs_cos_wrapper"]),
    sig!("Magento", ["mage/cookies", "magento", "/static/version"]),
    sig!("PrestaShop", ["prestashop"]),
    sig!("BigCommerce", ["bigcommerce.com", "cdn11.bigcommerce"]),
    sig!("Tilda", ["tildacdn.com", "tilda.ws"]),
    sig!("Bitrix", ["bitrix/js", "bx.setcsslist", "/bitrix/"]),
    sig!("Framer", ["framerusercontent.com", "framer.com/m/"]),
];

pub const FRAMEWORKS: &[Signature] = &[
    sig!("Next.js", ["__next_data__", "/_next/static", "_next/image"]),
    sig!("Nuxt", ["__nuxt__", "/_nuxt/", "data-n-head"]),
    sig!("Gatsby", ["___gatsby", "gatsby-image", "/page-data/"]),
    sig!("Remix", ["__remixcontext", "__remixmanifest"]),
    sig!("SvelteKit", ["__sveltekit", "data-sveltekit"]),
    sig!("Astro", ["astro-island", "data-astro-cid"]),
    sig!("Angular", ["ng-version", "ng-server-context", "_nghost"]),
    sig!("React", ["data-reactroot", "react-dom", "__react"]),
    sig!("Vue", ["data-v-app", "vue.runtime", "__vue__", "data-server-rendered"]),
    sig!("Svelte", ["svelte-"]),
    sig!("jQuery", ["jquery.min.js", "jquery.js", "jquery-"]),
    sig!("Bootstrap", ["bootstrap.min.css", "bootstrap.min.js", "bootstrap.bundle"]),
    sig!("Tailwind CSS", ["tailwindcss", "tailwind.min.css"]),
    sig!("Alpine.js", ["x-data=", "alpinejs"]),
];

pub const ANALYTICS: &[Signature] = &[
    sig!("Google Analytics", ["google-analytics.com", "gtag(", "googletagmanager.com/gtag"]),
    sig!("Google Tag Manager", ["googletagmanager.com/gtm", "gtm.start"]),
    sig!("Yandex Metrica", ["mc.yandex.ru", "ym("]),
    sig!("Facebook Pixel", ["connect.facebook.net", "fbq("]),
    sig!("Hotjar", ["static.hotjar.com", "hotjar"]),
    sig!("Microsoft Clarity", ["clarity.ms"]),
    sig!("Mixpanel", ["cdn.mxpnl.com", "mixpanel"]),
    sig!("Segment", ["cdn.segment.com", "analytics.load("]),
    sig!("Plausible", ["plausible.io"]),
    sig!("Matomo", ["matomo.js", "piwik.js", "_paq.push"]),
    sig!("Amplitude", ["amplitude.com", "amplitude.getinstance"]),
    sig!("Heap", ["heapanalytics.com"]),
    sig!("LinkedIn Insight", ["snap.licdn.com", "_linkedin_partner_id"]),
    sig!("TikTok Pixel", ["analytics.tiktok.com", "ttq.load"]),
];

pub const ADVERTISING: &[Signature] = &[
    sig!("Google AdSense", ["pagead2.googlesyndication.com", "adsbygoogle"]),
    sig!("Google Ad Manager", ["securepubads.g.doubleclick.net", "googletag.defineslot"]),
    sig!("DoubleClick", ["doubleclick.net"]),
    sig!("Amazon Ads", ["amazon-adsystem.com"]),
    sig!("Taboola", ["cdn.taboola.com", "_taboola"]),
    sig!("Outbrain", ["widgets.outbrain.com", "outbrain"]),
    sig!("Criteo", ["static.criteo.net", "criteo"]),
    sig!("Media.net", ["contextual.media.net"]),
    sig!("Yandex Direct", ["an.yandex.ru", "yandex.ru/ads"]),
];

/// Social platforms, matched against link hrefs.
pub const SOCIAL_PLATFORMS: &[Signature] = &[
    sig!("Facebook", ["facebook.com/", "fb.com/"]),
    sig!("Twitter/X", ["twitter.com/", "x.com/"]),
    sig!("Instagram", ["instagram.com/"]),
    sig!("LinkedIn", ["linkedin.com/"]),
    sig!("YouTube", ["youtube.com/", "youtu.be/"]),
    sig!("TikTok", ["tiktok.com/"]),
    sig!("Pinterest", ["pinterest.com/"]),
    sig!("GitHub", ["github.com/"]),
    sig!("Telegram", ["t.me/", "telegram.me/"]),
    sig!("VK", ["vk.com/"]),
    sig!("Reddit", ["reddit.com/"]),
    sig!("Threads", ["threads.net/"]),
    sig!("Mastodon", ["mastodon.social/"]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_reports_every_matching_name_once() {
        let lower = "<link href=\"/wp-content/x.css\"><script src=\"/wp-includes/y.js\">";
        assert_eq!(detect(CMS, lower), vec!["WordPress".to_string()]);
    }

    #[test]
    fn detect_is_empty_for_plain_markup() {
        assert!(detect(ANALYTICS, "<html><body>hello</body></html>").is_empty());
    }

    #[test]
    fn all_needles_are_lowercase() {
        for table in [CMS, FRAMEWORKS, ANALYTICS, ADVERTISING, SOCIAL_PLATFORMS] {
            for sig in table {
                for p in sig.patterns {
                    assert_eq!(*p, p.to_lowercase(), "{} needle {p}", sig.name);
                }
            }
        }
    }
}
