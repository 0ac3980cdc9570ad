mod common;

use common::{FIXTURE, MemoryCache};
use moodleorg::moodle::PlugListResponse;
use moodleorg::{
    Config, DownloadEvent, DownloadGuard, IntegrityError, MoodleOrgPlugin, PackageSynthesizer,
    ThrottleConfig,
};
use std::time::Duration;
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn catalog_server(body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/1.3/pluglist.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(&server)
        .await;
    server
}

fn config(server: &MockServer, namespace: &str) -> Config {
    Config {
        namespace: namespace.to_string(),
        api_url: format!("{}/api", server.uri()),
        ..Config::default()
    }
}

#[tokio::test]
async fn test_single_plugin_catalog_yields_one_package() {
    let server = catalog_server(FIXTURE).await;

    let plugin = MoodleOrgPlugin::activate_with_cache(
        &config(&server, "acme"),
        Box::new(MemoryCache::new()),
    )
    .await
    .unwrap();

    let packages = plugin.repository.packages();
    assert_eq!(packages.len(), 1);

    let package = &packages[0];
    assert_eq!(package.name, "acme/mod_example");
    assert_eq!(package.version, "2023.1.1.0");
    assert_eq!(package.kind, "moodle-mod");
    assert_eq!(package.installer_name(), Some("example"));
    assert_eq!(package.description, "Example activity");
    assert_eq!(
        package.homepage.as_deref(),
        Some("https://docs.moodle.org/en/Example")
    );
    assert_eq!(package.dist_md5(), Some("5eb63bbbe01eeed093cb22bb8f5acdc3"));

    let source = package.source.as_ref().unwrap();
    assert_eq!(source.kind, "git");
    assert_eq!(source.reference, "main");
}

#[tokio::test]
async fn test_bad_plugins_do_not_abort_the_catalog() {
    let body = r#"{
        "timestamp": 1700000000,
        "plugins": [
            {"id": 1, "name": "Orphan", "component": null, "timelastreleased": 1, "versions": []},
            {"id": 2, "name": "Odd", "component": "oddcomponent", "timelastreleased": 1,
             "versions": [{"id": 3, "version": 2023010100,
                           "downloadurl": "https://moodle.org/a.zip",
                           "downloadmd5": "00", "timecreated": 1}]},
            {"id": 4, "name": "Fine", "component": "block_fine", "timelastreleased": 1,
             "versions": [{"id": 5, "version": "2023010100", "maturity": "150",
                           "downloadurl": "https://moodle.org/b.zip", "downloadmd5": "11",
                           "timecreated": "1"}]}
        ]
    }"#;
    let server = catalog_server(body).await;

    let plugin = MoodleOrgPlugin::activate_with_cache(
        &config(&server, "moodledotorg"),
        Box::new(MemoryCache::new()),
    )
    .await
    .unwrap();

    assert_eq!(plugin.repository.len(), 1);
    assert!(
        plugin
            .repository
            .find_package("moodledotorg/block_fine", "2023.1.1.0-rc")
            .is_some()
    );
}

#[tokio::test]
async fn test_unknown_maturity_aborts_activation() {
    let body = r#"{
        "timestamp": 1700000000,
        "plugins": [
            {"id": 4, "name": "Fine", "component": "block_fine", "timelastreleased": 1,
             "versions": [{"id": 5, "version": 2023010100, "maturity": 42,
                           "downloadurl": "https://moodle.org/b.zip", "downloadmd5": "11",
                           "timecreated": 1}]}
        ]
    }"#;
    let server = catalog_server(body).await;

    let result = MoodleOrgPlugin::activate_with_cache(
        &config(&server, "moodledotorg"),
        Box::new(MemoryCache::new()),
    )
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_downloads_are_verified_and_throttled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/download.php/5001/mod_example.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"hello world".to_vec()))
        .mount(&server)
        .await;

    let catalog = PlugListResponse::from_slice(FIXTURE.as_bytes()).unwrap();
    let package = PackageSynthesizer::default()
        .synthesize(&catalog.plugins[0])
        .unwrap()
        .next()
        .unwrap();

    let url = format!("{}/download.php/5001/mod_example.zip", server.uri());
    let bytes = moodleorg::http::fetch_bytes(&url).await.unwrap();
    let temp_dir = tempdir().unwrap();
    let file = temp_dir.path().join("mod_example.zip");
    std::fs::write(&file, bytes).unwrap();

    let mut guard = DownloadGuard::new(ThrottleConfig {
        enabled: true,
        count: 1,
        pause: Duration::from_millis(50),
    })
    .with_origin_domain("127.0.0.1");

    let event = DownloadEvent::new(&file, &url).for_package(&package);
    guard.post_file_download(&event).await.unwrap();
    assert_eq!(guard.throttle().count(), 1);

    let start = std::time::Instant::now();
    guard.post_file_download(&event).await.unwrap();
    assert!(start.elapsed() >= Duration::from_millis(50));
    assert_eq!(guard.throttle().count(), 0);

    std::fs::write(&file, b"corrupted").unwrap();
    match guard.verify_download(&event) {
        Err(IntegrityError::ChecksumMismatch { url: reported, .. }) => assert_eq!(reported, url),
        other => panic!("Expected ChecksumMismatch, got {:?}", other),
    }
}
