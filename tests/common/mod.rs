// Shared test helpers
#![allow(dead_code)]

use axum_test::TestServer;
use speedtest_results::config::AppConfig;
use speedtest_results::models::{ResultRecord, TEST_METHOD};
use speedtest_results::results_repo::ResultsRepo;
use speedtest_results::routes;
use std::sync::Arc;
use tempfile::TempDir;

pub const LANDING_HTML: &str = "<!DOCTYPE html><html><body>speed test client</body></html>";

pub fn sample_record(server: &str) -> ResultRecord {
    ResultRecord {
        timestamp: "2024-05-01T12:00:00.000000Z".into(),
        ip: "203.0.113.7".into(),
        country: "US".into(),
        colo: "LAX".into(),
        server: server.into(),
        download: 93.5,
        upload: 11.2,
        ping: 14.0,
        jitter: 1.3,
        packet_loss: 0.0,
        user_agent: "Mozilla/5.0".into(),
        client_time: "2024-05-01T12:00:00.000Z".into(),
        test_method: TEST_METHOD.into(),
    }
}

/// Repo rooted in a fresh temp dir. Not initialized.
pub fn temp_repo() -> (TempDir, Arc<ResultsRepo>) {
    let dir = TempDir::new().unwrap();
    let repo = Arc::new(ResultsRepo::new(dir.path().join("results.csv")));
    (dir, repo)
}

pub fn test_config(dir: &TempDir, trusted_hops: usize) -> AppConfig {
    let toml = format!(
        r#"
[server]
port = 5000
host = "127.0.0.1"

[dataset]
path = "{}"

[landing]
page_path = "{}"

[proxy]
trusted_hops = {}
"#,
        dir.path().join("results.csv").display(),
        dir.path().join("speedtest.html").display(),
        trusted_hops
    );
    AppConfig::load_from_str(&toml).unwrap()
}

/// Server over an initialized dataset and a landing page in a temp dir.
pub fn test_server() -> (TestServer, Arc<ResultsRepo>, TempDir) {
    test_server_with(true, 1)
}

pub fn test_server_with(init: bool, trusted_hops: usize) -> (TestServer, Arc<ResultsRepo>, TempDir) {
    let (dir, repo) = temp_repo();
    if init {
        repo.ensure_initialized().unwrap();
    }
    std::fs::write(dir.path().join("speedtest.html"), LANDING_HTML).unwrap();
    let config = test_config(&dir, trusted_hops);
    let server = TestServer::new(routes::app(repo.clone(), &config)).unwrap();
    (server, repo, dir)
}
