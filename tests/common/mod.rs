#![allow(dead_code)]

use base64::Engine;
use mediasilo_upload::{Config, Credentials};
use mockito::{Matcher, Mock, ServerGuard};
use serde_json::json;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const ASSET_PATH: &str = "/ingest-east/6cdb4514/video.mov";

pub fn credentials() -> Credentials {
    Credentials {
        host_context: "acme".into(),
        username: "bob".into(),
        password: "secret".into(),
    }
}

pub fn config(server: &ServerGuard) -> Config {
    Config::new(&server.url(), credentials(), "proj1").unwrap()
}

pub fn basic_auth() -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode("bob:secret");
    format!("Basic {}", encoded)
}

pub fn asset_url(server: &ServerGuard) -> String {
    format!("{}{}", server.url(), ASSET_PATH)
}

pub fn ticket_json(server: &ServerGuard, http_method: &str) -> String {
    json!({
        "assetUrl": asset_url(server),
        "amzDate": "Wed, 10 Jun 2015 18:01:46 GMT",
        "amzAcl": "private",
        "contentType": "application/octet-stream",
        "authorization": "AWS AKIATEST:c2lnbmF0dXJl",
        "httpMethod": http_method,
    })
    .to_string()
}

/// Write `contents` to `dir/relative` and return the full path.
pub fn write_file(dir: &TempDir, relative: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, contents).unwrap();
    path
}

pub async fn mock_ticket(server: &mut ServerGuard, file_name: &str, http_method: &str) -> Mock {
    let body = ticket_json(server, http_method);
    server
        .mock("POST", "/assets/upload")
        .match_header("authorization", basic_auth().as_str())
        .match_header("mediasilohostcontext", "acme")
        .match_body(Matcher::Json(json!({ "fileName": file_name })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

pub async fn mock_upload(server: &mut ServerGuard, method: &str, contents: &[u8]) -> Mock {
    server
        .mock(method, ASSET_PATH)
        .match_header("authorization", "AWS AKIATEST:c2lnbmF0dXJl")
        .match_header("x-amz-date", "Wed, 10 Jun 2015 18:01:46 GMT")
        .match_header("x-amz-acl", "private")
        .match_header("content-type", "application/octet-stream")
        .match_header("content-length", contents.len().to_string().as_str())
        .match_body(Matcher::Exact(
            String::from_utf8(contents.to_vec()).unwrap(),
        ))
        .with_status(200)
        .create_async()
        .await
}

pub async fn mock_asset(server: &mut ServerGuard, body: &str) -> Mock {
    let source_url = asset_url(server);
    server
        .mock("POST", "/assets")
        .match_header("authorization", basic_auth().as_str())
        .match_header("mediasilohostcontext", "acme")
        .match_body(Matcher::Json(
            json!({ "projectId": "proj1", "sourceUrl": source_url }),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

pub fn display(path: &Path) -> String {
    path.display().to_string()
}
