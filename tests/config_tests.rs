//! Configuration files driving complete runs

use site_snapshot::config::{build_crawl_config, load_config_with_hash};
use site_snapshot::crawler::run_crawl;
use site_snapshot::ResourceKind;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_config(dir: &tempfile::TempDir, content: &str) -> std::path::PathBuf {
    let config_path = dir.path().join("snapshot.toml");
    std::fs::write(&config_path, content).unwrap();
    config_path
}

#[test]
fn test_config_file_to_crawl_config() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_config(
        &dir,
        r#"
[crawler]
seed-url = "https://example.test/start"
max-depth = 4
navigation-timeout = 1500
blocked-resources = ["media"]

[user-agent]
crawler-name = "SnapBot"
crawler-version = "2.0"
"#,
    );

    let (config, hash) = load_config_with_hash(&config_path).unwrap();
    let crawl = build_crawl_config(&config, None).unwrap();

    assert_eq!(hash.len(), 64);
    assert_eq!(crawl.seed_url.as_str(), "https://example.test/start");
    assert_eq!(crawl.max_depth, 4);
    assert_eq!(crawl.navigation_timeout, Duration::from_millis(1500));
    assert_eq!(
        crawl.blocked_resource_kinds.into_iter().collect::<Vec<_>>(),
        vec![ResourceKind::Media]
    );
    assert_eq!(config.user_agent.header_value(), "SnapBot/2.0");
}

#[tokio::test]
async fn test_configured_run_writes_to_output_directory() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("snapshots");

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "<html><head><title>Configured</title></head><body><p>Hi there</p></body></html>",
            "text/html",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let config_path = write_config(
        &dir,
        &format!(
            "[crawler]\nseed-url = \"{}/\"\nmax-depth = 0\n\n[output]\ndirectory = \"{}\"\n",
            server.uri(),
            output.display()
        ),
    );

    let (config, _) = load_config_with_hash(&config_path).unwrap();
    let outcome = run_crawl(&config, None).await.unwrap();

    assert_eq!(outcome.root.unwrap().title, "Configured");
    assert!(output.join("website_data_0.txt").exists());
}
