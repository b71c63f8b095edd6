//! Configuration and credential-record persistence tests.

use chanloader::auth::{Authenticator, StoredToken};
use chanloader::utils::{AppConfig, AuthError};
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn config_file_round_trip_preserves_channel_order() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("chanloader.json");
    std::fs::write(
        &path,
        r#"{
            "channels": [
                {"name": "Solar Sands", "channel_id": "UCR6LasBpceuYUhuLToKBzvQ", "num_videos": 1},
                {"name": "Stuff Made Here", "channel_id": "UCj1VqrHhDte54oLgPG4xpuQ", "num_videos": 2}
            ],
            "download_dir": "/tmp/downloaded_vids"
        }"#,
    )
    .expect("write config");

    let config = AppConfig::load(&path).expect("load config");

    assert_eq!(config.channels.len(), 2);
    assert_eq!(config.channels[0].name, "Solar Sands");
    assert_eq!(config.channels[1].num_videos, 2);
    assert_eq!(config.download_dir, PathBuf::from("/tmp/downloaded_vids"));
    // Unspecified fields fall back to defaults.
    assert_eq!(config.token_path, PathBuf::from("token.json"));
    assert_eq!(config.format, "bestvideo+bestaudio/best");
}

#[test]
fn missing_config_file_is_an_error() {
    let temp = TempDir::new().expect("temp dir");
    let result = AppConfig::load(&temp.path().join("does-not-exist.json"));
    assert!(result.is_err());
}

#[test]
fn invalid_config_file_is_an_error() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("chanloader.json");
    std::fs::write(&path, "{ not json").expect("write config");
    assert!(AppConfig::load(&path).is_err());
}

#[test]
fn token_persist_and_load_round_trip() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("token.json");

    let token = StoredToken {
        access_token: "ya29.sample".to_string(),
        refresh_token: Some("1//refresh".to_string()),
        client_id: Some("id.apps.example.com".to_string()),
        client_secret: Some("secret".to_string()),
        expiry: None,
        scopes: vec!["https://www.googleapis.com/auth/youtube.force-ssl".to_string()],
    };
    token.persist(&path).expect("persist");

    let loaded = StoredToken::load(&path).expect("load").expect("present");
    assert_eq!(loaded.access_token, "ya29.sample");
    assert_eq!(loaded.refresh_token.as_deref(), Some("1//refresh"));
    assert!(loaded.can_refresh());
}

#[test]
fn absent_token_file_is_not_an_error() {
    let temp = TempDir::new().expect("temp dir");
    let loaded = StoredToken::load(&temp.path().join("token.json")).expect("load");
    assert!(loaded.is_none());
}

#[test]
fn corrupt_token_file_is_treated_as_absent() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("token.json");
    std::fs::write(&path, "not json at all").expect("write");

    let loaded = StoredToken::load(&path).expect("load");
    assert!(loaded.is_none());
}

#[tokio::test]
async fn valid_cached_token_is_used_without_client_secrets() {
    let temp = TempDir::new().expect("temp dir");
    let token_path = temp.path().join("token.json");

    let token = StoredToken {
        access_token: "ya29.cached".to_string(),
        refresh_token: None,
        client_id: None,
        client_secret: None,
        expiry: None,
        scopes: Vec::new(),
    };
    token.persist(&token_path).expect("persist");

    // No client secret file anywhere; the cached record must be enough.
    let authenticator = Authenticator::new(token_path, temp.path().join("credentials.json"));
    let obtained = authenticator.obtain_credentials().await.expect("credentials");
    assert_eq!(obtained.access_token, "ya29.cached");
}

#[tokio::test]
async fn consent_without_client_secrets_is_fatal() {
    let temp = TempDir::new().expect("temp dir");

    // No cached record and no client secret file: every path to a
    // credential is exhausted before any network traffic happens.
    let authenticator = Authenticator::new(
        temp.path().join("token.json"),
        temp.path().join("credentials.json"),
    );
    let err = authenticator
        .obtain_credentials()
        .await
        .expect_err("no credential path");
    assert!(matches!(err, AuthError::MissingClientSecret(_)));
}
