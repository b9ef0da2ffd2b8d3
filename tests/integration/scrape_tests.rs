//! Integration tests for the scraper
//!
//! These tests use wiremock to serve pages and resources and check the
//! report and downloaded files end-to-end.

use page_harvest::config::{CollisionPolicy, Config};
use page_harvest::harvest;
use page_harvest::output::{DOWNLOADS_DIR, IMAGES_DIR, REPORT_FILE_NAME};
use page_harvest::scrape::{build_http_client, scrape};
use std::path::Path;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SAMPLE_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>  Sample Page  </title>
    <meta charset="utf-8">
    <meta name="description" content="A sample page">
    <meta property="og:type" content="website">
    <script>var tracking = "do not report";</script>
    <style>body { margin: 0 }</style>
</head>
<body>
    <header>Site header</header>
    <nav><a href="/home">Home</a></nav>
    <h2>Subsection</h2>
    <h1>Main heading</h1>
    <p>First paragraph.</p>
    <a href="/about">About</a>
    <a href="/about">About again</a>
    <a href="/files/Report.PDF">Annual report</a>
    <img src="/img/ok.png">
    <img src="/img/missing.png">
    <p>Second paragraph.</p>
    <footer>Footer text</footer>
</body>
</html>"#;

/// Mounts an HTML page at `route`
async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

/// Mounts a binary resource at `route`
async fn mount_bytes(server: &MockServer, route: &str, bytes: &[u8]) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(bytes.to_vec()))
        .mount(server)
        .await;
}

fn read_report(dir: &Path) -> String {
    std::fs::read_to_string(dir.join(REPORT_FILE_NAME)).expect("report should exist")
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("directory should exist")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_full_scrape_report() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", SAMPLE_PAGE).await;
    mount_bytes(&server, "/img/ok.png", b"\x89PNG fake image").await;
    mount_bytes(&server, "/files/Report.PDF", b"%PDF-1.4 fake").await;
    // /img/missing.png is not mounted and answers 404

    let out = tempfile::tempdir().unwrap();
    let config = Config::default();
    let client = build_http_client(&config.fetch).unwrap();
    let url = format!("{}/", base);

    let summary = scrape(&client, &config, &url, out.path()).await.unwrap();
    let report = read_report(out.path());

    assert!(report.starts_with(&format!("URL: {}\nStatus code: 200\n\n", url)));

    // Meta tags: one line each, label from name then property then empty
    assert!(report.contains(
        "Meta tags:\n  - : \n  - description: A sample page\n  - og:type: website\n\n"
    ));

    assert!(report.contains("Title: Sample Page\n"));

    // H1 before H2 regardless of markup order; no empty levels
    assert!(report.contains("H1 tags:\n  - Main heading\n"));
    assert!(report.contains("H2 tags:\n  - Subsection\n"));
    assert!(report.find("H1 tags:").unwrap() < report.find("H2 tags:").unwrap());
    assert!(!report.contains("H3 tags:"));

    // Links keep order and duplicates
    assert!(report.contains(&format!(
        "Links (4):\n  - {b}/home\n  - {b}/about\n  - {b}/about\n  - {b}/files/Report.PDF\n",
        b = base
    )));

    // One image saved, one failure, both reported in document order
    let ok_path = out.path().join(IMAGES_DIR).join("ok.png");
    assert!(report.contains(&format!(
        "Images (2):\n  - {b}/img/ok.png  -->  {p}\n  - {b}/img/missing.png  -->  Failed to download {b}/img/missing.png: HTTP status 404 Not Found\n",
        b = base,
        p = ok_path.display()
    )));
    assert_eq!(file_names(&out.path().join(IMAGES_DIR)), vec!["ok.png"]);
    assert_eq!(std::fs::read(&ok_path).unwrap(), b"\x89PNG fake image");

    // Mixed-case .PDF matches the document filter
    let pdf_path = out.path().join(DOWNLOADS_DIR).join("Report.PDF");
    assert!(report.contains(&format!(
        "File downloads (1):\n  - {}/files/Report.PDF  -->  {}\n",
        base,
        pdf_path.display()
    )));
    assert_eq!(std::fs::read(&pdf_path).unwrap(), b"%PDF-1.4 fake");

    // Visible text: no script/style/nav/header/footer content, no blank lines
    let text = report
        .split("VISIBLE TEXT (")
        .nth(1)
        .expect("visible text section");
    assert!(text.starts_with("8 lines):\n\n"));
    for hidden in ["do not report", "margin", "Site header", "Home", "Footer text"] {
        assert!(!text.contains(hidden), "visible text contains {:?}", hidden);
    }
    assert!(text.contains(
        "Sample Page\nSubsection\nMain heading\nFirst paragraph.\nAbout\nAbout again\nAnnual report\nSecond paragraph.\n"
    ));
    assert!(report.ends_with("\n--- END ---\n"));

    assert!(!summary.page_failed);
    assert_eq!(summary.images_found, 2);
    assert_eq!(summary.images_saved, 1);
    assert_eq!(summary.documents_saved, 1);
    assert_eq!(summary.failed_downloads(), 1);
}

#[tokio::test]
async fn test_page_http_error_writes_minimal_report() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let out = tempfile::tempdir().unwrap();
    let config = Config::default();
    let client = build_http_client(&config.fetch).unwrap();
    let url = format!("{}/broken", server.uri());

    let summary = scrape(&client, &config, &url, out.path()).await.unwrap();
    let report = read_report(out.path());

    assert!(summary.page_failed);
    assert!(report.starts_with(&format!("Failed to fetch URL: {}\nError: ", url)));
    assert!(report.contains("500"));
    assert_eq!(report.lines().count(), 2);
    assert!(!out.path().join(IMAGES_DIR).exists());
    assert!(!out.path().join(DOWNLOADS_DIR).exists());
}

#[tokio::test]
async fn test_connection_refused_writes_minimal_report() {
    // Nothing listens on the discard port
    let url = "http://127.0.0.1:9/".to_string();

    let out = tempfile::tempdir().unwrap();
    let config = Config::default();
    let client = build_http_client(&config.fetch).unwrap();

    let summary = scrape(&client, &config, &url, out.path()).await.unwrap();
    let report = read_report(out.path());

    assert!(summary.page_failed);
    assert!(report.starts_with(&format!("Failed to fetch URL: {}\nError: ", url)));
    assert_eq!(file_names(out.path()), vec![REPORT_FILE_NAME]);
}

#[tokio::test]
async fn test_page_without_resources_creates_no_folders() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/plain",
        "<html><head><title>Plain</title></head><body><p>Just text</p></body></html>",
    )
    .await;

    let out = tempfile::tempdir().unwrap();
    let config = Config::default();
    let client = build_http_client(&config.fetch).unwrap();
    let url = format!("{}/plain", server.uri());

    scrape(&client, &config, &url, out.path()).await.unwrap();
    let report = read_report(out.path());

    assert!(!report.contains("Meta tags:"));
    assert!(!report.contains("Links ("));
    assert!(!report.contains("Images ("));
    assert!(!report.contains("File downloads ("));
    assert!(report.contains("VISIBLE TEXT (2 lines):\n\nPlain\nJust text\n"));
    assert_eq!(file_names(out.path()), vec![REPORT_FILE_NAME]);
}

#[tokio::test]
async fn test_colliding_file_names_are_renamed() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        r#"<html><body>
            <img src="/a/logo.png">
            <img src="/b/logo.png">
            <img src="/gallery/">
        </body></html>"#,
    )
    .await;
    mount_bytes(&server, "/a/logo.png", b"first").await;
    mount_bytes(&server, "/b/logo.png", b"second").await;
    mount_bytes(&server, "/gallery/", b"index").await;

    let out = tempfile::tempdir().unwrap();
    let config = Config::default();
    let client = build_http_client(&config.fetch).unwrap();

    scrape(&client, &config, &format!("{}/", server.uri()), out.path())
        .await
        .unwrap();

    let images = out.path().join(IMAGES_DIR);
    assert_eq!(file_names(&images), vec!["file", "logo-1.png", "logo.png"]);
    assert_eq!(std::fs::read(images.join("logo.png")).unwrap(), b"first");
    assert_eq!(std::fs::read(images.join("logo-1.png")).unwrap(), b"second");
}

#[tokio::test]
async fn test_overwrite_policy_keeps_last_write() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        r#"<html><body><img src="/a/logo.png"><img src="/b/logo.png"></body></html>"#,
    )
    .await;
    mount_bytes(&server, "/a/logo.png", b"first").await;
    mount_bytes(&server, "/b/logo.png", b"second").await;

    let out = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.download.on_collision = CollisionPolicy::Overwrite;
    let client = build_http_client(&config.fetch).unwrap();

    scrape(&client, &config, &format!("{}/", server.uri()), out.path())
        .await
        .unwrap();

    let images = out.path().join(IMAGES_DIR);
    assert_eq!(file_names(&images), vec!["logo.png"]);
    assert_eq!(std::fs::read(images.join("logo.png")).unwrap(), b"second");
}

/// Serves the page and `/a/logo.png` in full; `/b/logo.png` sends part of
/// its body and then stalls
async fn spawn_stalling_site() -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = [0u8; 2048];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]).to_string();
                let route = request.split_whitespace().nth(1).unwrap_or("/").to_string();

                let full = |body: &str| {
                    format!(
                        "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        body.len(),
                        body
                    )
                };

                match route.as_str() {
                    "/" => {
                        let page = r#"<html><body><img src="/a/logo.png"><img src="/b/logo.png"></body></html>"#;
                        let _ = socket.write_all(full(page).as_bytes()).await;
                    }
                    "/a/logo.png" => {
                        let _ = socket.write_all(full("first").as_bytes()).await;
                    }
                    _ => {
                        let _ = socket
                            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\nConnection: close\r\n\r\nsecc")
                            .await;
                        tokio::time::sleep(Duration::from_secs(5)).await;
                    }
                }
            });
        }
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_overwrite_policy_keeps_file_when_later_download_fails() {
    let base = spawn_stalling_site().await;

    let out = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.download.on_collision = CollisionPolicy::Overwrite;
    config.fetch.resource_timeout_secs = 1;
    let client = build_http_client(&config.fetch).unwrap();

    let summary = scrape(&client, &config, &format!("{}/", base), out.path())
        .await
        .unwrap();
    let report = read_report(out.path());

    let images = out.path().join(IMAGES_DIR);
    let logo = images.join("logo.png");
    assert!(report.contains(&format!("  - {}/a/logo.png  -->  {}\n", base, logo.display())));
    assert!(report.contains(&format!(
        "  - {b}/b/logo.png  -->  Failed to download {b}/b/logo.png: ",
        b = base
    )));

    // The saved image is still whole and no partial file is left behind
    assert_eq!(file_names(&images), vec!["logo.png"]);
    assert_eq!(std::fs::read(&logo).unwrap(), b"first");
    assert_eq!(summary.images_saved, 1);
    assert_eq!(summary.failed_downloads(), 1);
}

#[tokio::test]
async fn test_overwrite_policy_rejects_download_pool() {
    let root = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.download.on_collision = CollisionPolicy::Overwrite;
    config.download.concurrency = 3;
    config.output.root = root.path().display().to_string();

    let result = harvest("http://127.0.0.1:9/", &config).await;

    assert!(matches!(result, Err(page_harvest::HarvestError::Config(_))));
    assert!(file_names(root.path()).is_empty());
}

#[tokio::test]
async fn test_pooled_downloads_keep_document_order() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        r#"<html><body>
            <img src="/slow.png">
            <img src="/fast1.png">
            <img src="/fast2.png">
        </body></html>"#,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/slow.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"slow".to_vec())
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    mount_bytes(&server, "/fast1.png", b"fast1").await;
    mount_bytes(&server, "/fast2.png", b"fast2").await;

    let out = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.download.concurrency = 3;
    let client = build_http_client(&config.fetch).unwrap();
    let base = server.uri();

    scrape(&client, &config, &format!("{}/", base), out.path())
        .await
        .unwrap();
    let report = read_report(out.path());

    let slow = report.find(&format!("{}/slow.png  -->", base)).unwrap();
    let fast1 = report.find(&format!("{}/fast1.png  -->", base)).unwrap();
    let fast2 = report.find(&format!("{}/fast2.png  -->", base)).unwrap();
    assert!(slow < fast1 && fast1 < fast2);
    assert_eq!(
        file_names(&out.path().join(IMAGES_DIR)),
        vec!["fast1.png", "fast2.png", "slow.png"]
    );
}

#[tokio::test]
async fn test_resource_timeout_is_reported_inline() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        r#"<html><body><a href="/big.pdf">PDF</a></body></html>"#,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/big.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"late".to_vec())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let out = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.fetch.resource_timeout_secs = 1;
    let client = build_http_client(&config.fetch).unwrap();
    let base = server.uri();

    let summary = scrape(&client, &config, &format!("{}/", base), out.path())
        .await
        .unwrap();
    let report = read_report(out.path());

    assert!(report.contains(&format!(
        "File downloads (1):\n  - {b}/big.pdf  -->  Failed to download {b}/big.pdf: ",
        b = base
    )));
    assert_eq!(summary.documents_saved, 0);
    assert!(file_names(&out.path().join(DOWNLOADS_DIR)).is_empty());
    assert!(report.ends_with("\n--- END ---\n"));
}

#[tokio::test]
async fn test_harvest_creates_run_directory() {
    let server = MockServer::start().await;
    mount_page(&server, "/", "<html><body><p>Hi</p></body></html>").await;

    let root = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.output.root = root.path().display().to_string();

    let result = harvest(&format!("{}/", server.uri()), &config)
        .await
        .unwrap();

    assert!(result.run_dir.starts_with(root.path()));
    let name = result
        .run_dir
        .file_name()
        .unwrap()
        .to_string_lossy()
        .to_string();
    assert!(name.starts_with("run_"));
    assert_eq!(name.len(), "run_YYYYMMDD-HHMMSS".len());
    assert!(result.run_dir.join(REPORT_FILE_NAME).is_file());
    assert_eq!(result.summary.status_code, Some(200));
}
