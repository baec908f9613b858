//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! crawl cycle end-to-end, from seed to written document.

use site_corpus::config::FetcherConfig;
use site_corpus::crawler::{crawl, CrawlSettings, RenderMode};
use site_corpus::output::{write_document, CrawlStatistics};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn html_page(title: &str, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!(
            "<html><head><title>{}</title></head><body>{}</body></html>",
            title, body
        ))
        .insert_header("content-type", "text/html")
}

async fn mount_page(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

fn settings(seeds: Vec<String>, max_depth: u32) -> CrawlSettings {
    CrawlSettings::new(seeds, max_depth, RenderMode::Direct)
}

#[tokio::test]
async fn test_crawl_stays_on_origin() {
    let site = MockServer::start().await;
    let external = MockServer::start().await;
    let base = site.uri();

    mount_page(
        &site,
        "/",
        html_page(
            "Home",
            &format!(
                r#"<p>Welcome</p><a href="/about">About</a><a href="{}/x">Elsewhere</a>"#,
                external.uri()
            ),
        ),
    )
    .await;
    mount_page(&site, "/about", html_page("About", "<h1>About us</h1>")).await;

    Mock::given(method("GET"))
        .respond_with(html_page("External", ""))
        .expect(0)
        .mount(&external)
        .await;

    let report = crawl(settings(vec![base.clone()], 1), &FetcherConfig::default())
        .await
        .expect("Crawl failed");

    assert!(report.is_clean());
    assert_eq!(report.pages.len(), 2);
    assert_eq!(report.pages[0].url, format!("{}/", base));
    assert_eq!(report.pages[0].title, "Home");
    assert_eq!(report.pages[0].depth, 0);
    assert_eq!(report.pages[0].text, "Welcome");
    assert_eq!(report.pages[1].url, format!("{}/about", base));
    assert_eq!(report.pages[1].depth, 1);
    assert_eq!(report.pages[1].text, "About us");
}

#[tokio::test]
async fn test_server_error_on_seed_is_a_warning() {
    let site = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&site)
        .await;

    let report = crawl(settings(vec![site.uri()], 2), &FetcherConfig::default())
        .await
        .expect("Crawl failed");

    assert!(report.pages.is_empty());
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].url, format!("{}/", site.uri()));
    assert!(!report.cancelled);
}

#[tokio::test]
async fn test_broken_link_is_dropped() {
    let site = MockServer::start().await;

    mount_page(
        &site,
        "/",
        html_page(
            "Home",
            r#"<a href="/missing">Missing</a><a href="/ok">Ok</a>"#,
        ),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&site)
        .await;
    mount_page(&site, "/ok", html_page("Ok", "<p>Fine</p>")).await;

    let report = crawl(settings(vec![site.uri()], 1), &FetcherConfig::default())
        .await
        .expect("Crawl failed");

    let titles: Vec<_> = report.pages.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Home", "Ok"]);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].url, format!("{}/missing", site.uri()));
}

#[tokio::test]
async fn test_slow_page_times_out() {
    let site = MockServer::start().await;

    mount_page(
        &site,
        "/",
        html_page("Home", r#"<a href="/slow">Slow</a>"#),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(html_page("Slow", "").set_delay(Duration::from_secs(3)))
        .mount(&site)
        .await;

    let fetcher_config = FetcherConfig {
        request_timeout_secs: 1,
        ..FetcherConfig::default()
    };

    let report = crawl(settings(vec![site.uri()], 1), &fetcher_config)
        .await
        .expect("Crawl failed");

    assert_eq!(report.pages.len(), 1);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].url, format!("{}/slow", site.uri()));
}

#[tokio::test]
async fn test_cyclic_links_fetch_each_page_once() {
    let site = MockServer::start().await;

    mount_page(
        &site,
        "/",
        html_page("Home", r#"<a href="/a">A</a><a href="/b">B</a><a href="/">Self</a>"#),
    )
    .await;
    mount_page(
        &site,
        "/a",
        html_page("A", r#"<a href="/b">B</a><a href="/">Home</a>"#),
    )
    .await;
    mount_page(
        &site,
        "/b",
        html_page("B", r#"<a href="/a">A</a><a href="/">Home</a>"#),
    )
    .await;

    let report = crawl(settings(vec![site.uri()], 5), &FetcherConfig::default())
        .await
        .expect("Crawl failed");

    let titles: Vec<_> = report.pages.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Home", "A", "B"]);
    assert!(report.pages[1..].iter().all(|p| p.depth == 1));
}

#[tokio::test]
async fn test_depth_zero_with_two_seeds() {
    let site = MockServer::start().await;

    mount_page(
        &site,
        "/one",
        html_page("One", r#"<a href="/three">Three</a>"#),
    )
    .await;
    mount_page(&site, "/two", html_page("Two", "")).await;
    Mock::given(method("GET"))
        .and(path("/three"))
        .respond_with(html_page("Three", ""))
        .expect(0)
        .mount(&site)
        .await;

    let seeds = vec![format!("{}/one", site.uri()), format!("{}/two", site.uri())];
    let report = crawl(settings(seeds, 0), &FetcherConfig::default())
        .await
        .expect("Crawl failed");

    assert_eq!(report.pages.len(), 2);
    assert!(report.pages.iter().all(|p| p.depth == 0));
}

#[tokio::test]
async fn test_crawl_to_document() {
    let site = MockServer::start().await;

    mount_page(
        &site,
        "/",
        html_page("", r#"<h1>Docs</h1><ul><li>First</li></ul><a href="/guide">Guide</a>"#),
    )
    .await;
    mount_page(&site, "/guide", html_page("Guide", "<p>Read me</p>")).await;

    let report = crawl(settings(vec![site.uri()], 1), &FetcherConfig::default())
        .await
        .expect("Crawl failed");

    let temp_dir = tempfile::tempdir().unwrap();
    let output_path = temp_dir.path().join("nested").join("corpus.md");
    write_document(&report.pages, &output_path).expect("Failed to write document");

    let root = format!("{}/", site.uri());
    let expected = format!(
        "# {root}\n**URL:** {root}\n**Depth:** 0\n\n## Page Content\n\nDocs\nFirst\n\n---\n\n\
         # Guide\n**URL:** {root}guide\n**Depth:** 1\n\n## Page Content\n\nRead me\n\n---\n\n",
        root = root
    );
    assert_eq!(std::fs::read_to_string(&output_path).unwrap(), expected);

    let stats = CrawlStatistics::from_report(&report);
    assert_eq!(stats.pages_collected, 2);
    assert_eq!(stats.origins.len(), 1);
    assert_eq!(stats.pages_by_depth.get(&1), Some(&1));
}
