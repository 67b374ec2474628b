use super::client::{validate_apk, ClientError, PerseusClient};
use super::models::{ApiMessage, PullTarget};
use crate::config::settings::Config;

use httpmock::prelude::*;
use serde_json::json;
use std::io::Write;
use zip::write::SimpleFileOptions;

fn server_config(server: &MockServer) -> Config {
    Config {
        host: server.address().ip().to_string(),
        port: server.address().port(),
    }
}

fn test_client(server: &MockServer) -> PerseusClient {
    PerseusClient::new(&server_config(server)).quiet()
}

fn write_apk(dir: &std::path::Path, name: &str, size: usize) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, vec![0xAB; size]).unwrap();
    path
}

#[test]
fn pull_routes_cover_all_argument_shapes() {
    assert_eq!(PullTarget::from_args(None, None).route(), "/api/v1/pull");
    assert_eq!(
        PullTarget::from_args(None, Some("v1.0.0".into())).route(),
        "/api/v1/pull/v1.0.0"
    );
    assert_eq!(
        PullTarget::from_args(Some("calculator".into()), None).route(),
        "/api/v1/pull/latest/calculator"
    );
    assert_eq!(
        PullTarget::from_args(Some("calculator".into()), Some("v1.0.0".into())).route(),
        "/api/v1/pull/v1.0.0/calculator"
    );
}

#[test]
fn routes_escape_unsafe_characters() {
    let target = PullTarget::from_args(Some("my app".into()), Some("v1/beta".into()));
    assert_eq!(target.route(), "/api/v1/pull/v1%2Fbeta/my%20app");
}

#[test]
fn api_message_falls_back_to_status_then_default() {
    let msg = ApiMessage {
        message: None,
        status: Some("frozen".into()),
    };
    assert_eq!(msg.text(), "frozen");

    let empty = ApiMessage {
        message: None,
        status: None,
    };
    assert_eq!(empty.text(), "Operation completed successfully");
}

#[tokio::test]
async fn status_probe_reflects_server_health() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/status");
            then.status(200);
        })
        .await;

    let client = test_client(&server);
    assert!(client.check_status().await);
    mock.assert_async().await;
}

#[tokio::test]
async fn status_probe_fails_when_unreachable() {
    // Nothing listens on port 1.
    let config = Config {
        host: "127.0.0.1".to_string(),
        port: 1,
    };
    let client = PerseusClient::new(&config).quiet();
    assert!(!client.check_status().await);
}

#[tokio::test]
async fn push_streams_apk_and_reports_server_message() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/push");
            then.status(200).json_body(json!({"message": "uploaded"}));
        })
        .await;

    let dir = tempfile::tempdir().unwrap();
    let apk = write_apk(dir.path(), "demo.apk", 16 * 1024);

    let client = test_client(&server);
    let msg = client.push(&apk).await.unwrap();
    assert_eq!(msg.text(), "uploaded");
    mock.assert_async().await;
}

#[tokio::test]
async fn push_missing_file_issues_no_network_call() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|_when, then| {
            then.status(200);
        })
        .await;

    let client = test_client(&server);
    let result = client.push(std::path::Path::new("/no/such/file.apk")).await;

    assert!(matches!(result, Err(ClientError::Validation(_))));
    assert_eq!(mock.hits_async().await, 0);
}

#[test]
fn push_rejects_files_without_apk_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, b"plain text").unwrap();

    assert!(matches!(
        validate_apk(&path),
        Err(ClientError::Validation(_))
    ));

    let apk = write_apk(dir.path(), "ok.APK", 8);
    assert!(validate_apk(&apk).is_ok());
}

#[tokio::test]
async fn push_rejection_maps_to_server_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/push");
            then.status(500).json_body(json!({"error": "storage full"}));
        })
        .await;

    let dir = tempfile::tempdir().unwrap();
    let apk = write_apk(dir.path(), "demo.apk", 64);

    let client = test_client(&server);
    match client.push(&apk).await {
        Err(ClientError::Server { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "storage full");
        }
        other => panic!("expected server error, got {:?}", other.map(|m| m.text().to_string())),
    }
}

#[tokio::test]
async fn pull_single_app_writes_apk_to_destination() {
    let payload = vec![0xC4u8; 32 * 1024];

    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/pull/v1.0.0/demo");
            then.status(200).body(payload.clone());
        })
        .await;

    let dest = tempfile::tempdir().unwrap();
    let client = test_client(&server);
    let target = PullTarget::from_args(Some("demo".into()), Some("v1.0.0".into()));

    let msg = client.pull(&target, dest.path()).await.unwrap();
    assert!(msg.contains("demo.apk"));

    let written = std::fs::read(dest.path().join("demo").join("demo.apk")).unwrap();
    assert_eq!(written, payload);
    mock.assert_async().await;
}

#[tokio::test]
async fn pull_all_downloads_and_extracts_bundle() {
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    writer
        .start_file("calculator/calculator.apk", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(b"calculator-bytes").unwrap();
    writer
        .start_file("notes/notes.apk", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(b"notes-bytes").unwrap();
    let bundle = writer.finish().unwrap().into_inner();

    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/pull");
            then.status(200).body(bundle.clone());
        })
        .await;

    let dest = tempfile::tempdir().unwrap();
    let client = test_client(&server);

    let msg = client
        .pull(&PullTarget::AllLatest, dest.path())
        .await
        .unwrap();
    assert!(msg.contains("2 file(s)"));

    assert_eq!(
        std::fs::read(dest.path().join("calculator/calculator.apk")).unwrap(),
        b"calculator-bytes"
    );
    assert_eq!(
        std::fs::read(dest.path().join("notes/notes.apk")).unwrap(),
        b"notes-bytes"
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn pull_unknown_app_is_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/pull/latest/ghost");
            then.status(404).json_body(json!({"error": "no such app"}));
        })
        .await;

    let dest = tempfile::tempdir().unwrap();
    let client = test_client(&server);
    let target = PullTarget::from_args(Some("ghost".into()), None);

    let result = client.pull(&target, dest.path()).await;
    assert!(matches!(result, Err(ClientError::NotFound { .. })));
    assert!(!dest.path().join("ghost").exists());
}

#[tokio::test]
async fn freeze_reports_server_message() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/freeze/v1.0.0");
            then.status(200).json_body(json!({"message": "version v1.0.0 frozen"}));
        })
        .await;

    let client = test_client(&server);
    let msg = client.freeze("v1.0.0").await.unwrap();
    assert_eq!(msg.text(), "version v1.0.0 frozen");
    mock.assert_async().await;
}

#[tokio::test]
async fn freezing_an_existing_label_is_a_conflict() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/freeze/v1.0.0");
            then.status(409).json_body(json!({"error": "version exists"}));
        })
        .await;

    let client = test_client(&server);
    match client.freeze("v1.0.0").await {
        Err(ClientError::Conflict { version }) => assert_eq!(version, "v1.0.0"),
        other => panic!("expected conflict, got {:?}", other.map(|m| m.text().to_string())),
    }
}

#[tokio::test]
async fn unreachable_server_is_an_http_error() {
    let config = Config {
        host: "127.0.0.1".to_string(),
        port: 1,
    };
    let client = PerseusClient::new(&config).quiet();

    let result = client.freeze("v1.0.0").await;
    assert!(matches!(result, Err(ClientError::Http(_))));
}

#[tokio::test]
async fn list_versions_parses_the_version_list() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/versions");
            then.status(200)
                .json_body(json!({"versions": ["v1.0.0", "v1.1.0"]}));
        })
        .await;

    let client = test_client(&server);
    let versions = client.list_versions().await.unwrap();
    assert_eq!(versions, vec!["v1.0.0", "v1.1.0"]);
}

#[tokio::test]
async fn list_apps_hits_the_expected_route() {
    let server = MockServer::start_async().await;
    let plain = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/apps");
            then.status(200).json_body(json!({
                "apps": [{"name": "calculator", "latest_version": "v1.1.0"}]
            }));
        })
        .await;
    let all = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/apps/all");
            then.status(200).json_body(json!({
                "apps": [{"name": "calculator", "versions": ["v1.0.0", "v1.1.0"]}]
            }));
        })
        .await;

    let client = test_client(&server);

    let apps = client.list_apps(false).await.unwrap();
    assert_eq!(apps[0].latest_version.as_deref(), Some("v1.1.0"));
    plain.assert_async().await;

    let apps = client.list_apps(true).await.unwrap();
    assert_eq!(apps[0].versions, vec!["v1.0.0", "v1.1.0"]);
    all.assert_async().await;
}
