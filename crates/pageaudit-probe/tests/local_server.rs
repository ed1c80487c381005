//! Probe scenarios against a throwaway HTTP/1.1 server on localhost.

use pageaudit_probe::{FetchError, ProbeTargets, Prober};
use pageaudit_settings::NetworkSettings;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use url::Url;

struct Reply {
    status: u16,
    headers: Vec<(&'static str, String)>,
    body: String,
}

fn reply(status: u16, body: &str) -> Reply {
    Reply {
        status,
        headers: Vec::new(),
        body: body.to_string(),
    }
}

/// Serve `route(path)` for every request until the test ends.
async fn serve(route: fn(&str, &str) -> Reply) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let origin = base.clone();
    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let origin = origin.clone();
            tokio::spawn(async move {
                let mut buf = vec![0u8; 8192];
                let mut read = 0;
                loop {
                    let Ok(n) = socket.read(&mut buf[read..]).await else {
                        return;
                    };
                    if n == 0 {
                        return;
                    }
                    read += n;
                    if buf[..read].windows(4).any(|w| w == b"\r\n\r\n") || read == buf.len() {
                        break;
                    }
                }
                let request = String::from_utf8_lossy(&buf[..read]).to_string();
                let mut first = request.lines().next().unwrap_or_default().split(' ');
                let method = first.next().unwrap_or_default().to_string();
                let path = first.next().unwrap_or("/").to_string();
                let r = route(&path, &origin);
                let mut head = format!(
                    "HTTP/1.1 {} X\r\ncontent-length: {}\r\nconnection: close\r\n",
                    r.status,
                    r.body.len()
                );
                for (k, v) in &r.headers {
                    head.push_str(&format!("{k}: {v}\r\n"));
                }
                head.push_str("\r\n");
                let _ = socket.write_all(head.as_bytes()).await;
                if method != "HEAD" {
                    let _ = socket.write_all(r.body.as_bytes()).await;
                }
                let _ = socket.shutdown().await;
            });
        }
    });
    base
}

fn settings() -> NetworkSettings {
    NetworkSettings {
        fetch_timeout_ms: 2_000,
        probe_timeout_ms: 2_000,
        aux_deadline_ms: 5_000,
        max_redirects: 3,
        ..Default::default()
    }
}

fn site(path: &str, origin: &str) -> Reply {
    match path {
        "/" => Reply {
            status: 200,
            headers: vec![
                ("x-frame-options", "DENY".to_string()),
                ("x-content-type-options", "nosniff".to_string()),
            ],
            body: "<html><head><title>Home</title></head><body>Hi</body></html>".into(),
        },
        "/robots.txt" => reply(
            200,
            &format!("User-agent: *\nDisallow: /private\nSitemap: {origin}/maps/main.xml\n"),
        ),
        "/maps/main.xml" => reply(
            200,
            &format!("<?xml version=\"1.0\"?><urlset><url><loc>{origin}/</loc></url></urlset>"),
        ),
        "/old" => Reply {
            status: 301,
            headers: vec![("location", "/new".to_string())],
            body: String::new(),
        },
        "/new" => reply(200, "new"),
        "/loop" => Reply {
            status: 302,
            headers: vec![("location", "/loop".to_string())],
            body: String::new(),
        },
        "/img.png" => Reply {
            status: 200,
            headers: Vec::new(),
            body: "x".repeat(1234),
        },
        "/challenge" => reply(
            503,
            "<html><head><title>Just a moment...</title></head><body>cf-browser-verification</body></html>",
        ),
        "/shop" => reply(
            200,
            "<html><head><title>Shop</title><script src=\"/cdn-cgi/challenge-platform/scripts/jsd/main.js\"></script></head><body>Tools</body></html>",
        ),
        _ => reply(404, "not found"),
    }
}

// ============================================================================
// Scenario: fetching the audited page
// ============================================================================

#[tokio::test]
async fn given_reachable_page_when_fetching_then_html_and_final_url_returned() {
    let base = serve(site).await;
    let page = Prober::new(settings()).fetch_html(&format!("{base}/old")).await.unwrap();
    assert_eq!(page.status, 200);
    assert_eq!(page.html, "new");
    assert_eq!(page.final_url, format!("{base}/new"));
}

#[tokio::test]
async fn given_redirect_loop_when_fetching_then_redirect_limit_error() {
    let base = serve(site).await;
    let err = Prober::new(settings()).fetch_html(&format!("{base}/loop")).await.unwrap_err();
    assert!(matches!(err, FetchError::RedirectLimit { limit: 3, .. }), "{err}");
}

#[tokio::test]
async fn given_challenge_page_when_fetching_then_blocked_error() {
    let base = serve(site).await;
    let err = Prober::new(settings()).fetch_html(&format!("{base}/challenge")).await.unwrap_err();
    assert!(matches!(err, FetchError::Blocked { .. }), "{err}");
}

#[tokio::test]
async fn given_ok_page_with_background_bot_script_when_fetching_then_page_returned() {
    let base = serve(site).await;
    let page = Prober::new(settings()).fetch_html(&format!("{base}/shop")).await.unwrap();
    assert_eq!(page.status, 200);
    assert!(page.html.contains("<title>Shop</title>"));
}

#[tokio::test]
async fn given_missing_page_when_fetching_then_status_error() {
    let base = serve(site).await;
    let err = Prober::new(settings()).fetch_html(&format!("{base}/nope")).await.unwrap_err();
    assert!(matches!(err, FetchError::HttpStatus { status: 404, .. }), "{err}");
}

// ============================================================================
// Scenario: auxiliary probes
// ============================================================================

#[tokio::test]
async fn given_site_when_collecting_then_every_probe_contributes() {
    let base = serve(site).await;
    let page = Url::parse(&format!("{base}/")).unwrap();
    let internal = vec![format!("{base}/old"), format!("{base}/new")];
    let external = vec![format!("{base}/gone"), format!("{base}/new")];
    let images = vec![format!("{base}/img.png")];

    let facts = Prober::new(settings())
        .collect(
            &page,
            ProbeTargets {
                internal_urls: &internal,
                external_urls: &external,
                image_urls: &images,
            },
        )
        .await;

    assert!(facts.robots_txt.found);
    assert!(!facts.robots_txt.blocks_page);
    assert!(facts.sitemap.found);
    assert_eq!(facts.sitemap.url, Some(format!("{base}/maps/main.xml")));
    assert!(facts.sitemap.contains_page);

    assert!(facts.ssl.is_none(), "plain http has no TLS facts");
    let headers = facts.headers.expect("headers probed");
    assert_eq!(headers.score, 33);

    assert_eq!(facts.redirect_probes.len(), 2);
    assert_eq!(facts.redirect_probes[0].redirects, 1);
    assert_eq!(facts.redirect_probes[1].redirects, 0);

    assert_eq!(facts.external_probes[0].status, Some(404));
    assert!(!facts.external_probes[0].ok);
    assert!(facts.external_probes[1].ok);

    assert_eq!(facts.image_sizes[0].bytes, Some(1234));
}

#[tokio::test]
async fn given_redirect_loop_when_probing_then_hops_are_capped() {
    let base = serve(site).await;
    let probe = Prober::new(settings()).check_redirect(&format!("{base}/loop")).await;
    assert_eq!(probe.redirects, 3);
    assert!(probe.error.is_some());
    assert!(!probe.ok);
}

#[tokio::test]
async fn given_unreachable_host_when_probing_then_defaults_are_returned() {
    // Bind then drop so the port is closed.
    let port = {
        let l = TcpListener::bind("127.0.0.1:0").await.unwrap();
        l.local_addr().unwrap().port()
    };
    let page = Url::parse(&format!("http://127.0.0.1:{port}/")).unwrap();
    let prober = Prober::new(settings());
    assert!(prober.fetch_robots_txt(&page).await.is_none());
    assert!(prober.check_security_headers(&page).await.is_none());
    let sitemap = prober.check_sitemap(&page, None).await;
    assert!(sitemap.checked);
    assert!(!sitemap.found);
    assert_eq!(prober.check_image_size(page.as_str()).await.bytes, None);
}
