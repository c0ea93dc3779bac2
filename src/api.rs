// API client module: talks to the MediaSilo REST API. Every call is a POST
// with a JSON body, HTTP basic auth and the `MediaSiloHostContext` header.
//
// See http://docs.mediasilo.com/v3.0/docs/create-upload-ticket and
// http://docs.mediasilo.com/v3.0/docs/create-asset for the endpoints.

use crate::config::Config;
use crate::error::UploadError;
use crate::upload::{UploadContext, UploadTicket};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

pub const HOST_CONTEXT_HEADER: &str = "MediaSiloHostContext";

/// Body of `POST assets/upload`.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UploadTicketRequest {
    pub file_name: String,
}

/// Body of `POST assets`.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssetRequest<'a> {
    pub project_id: &'a str,
    pub source_url: &'a str,
}

/// Asset record created by the service. Only its presence matters to the
/// upload workflow, so the shape is kept as raw JSON.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct Asset(pub serde_json::Value);

impl Asset {
    /// The asset id, when the record carries a string or numeric `id`.
    pub fn id(&self) -> Option<String> {
        match self.0.get("id")? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Holds the HTTP client and the immutable configuration used for
/// authenticated service calls.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    config: Config,
}

/// Final path segment of `file_path`, falling back to the whole string
/// when there is none (e.g. a path ending in `..`).
pub fn file_name(file_path: &Path) -> String {
    file_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_path.to_string_lossy().into_owned())
}

impl ApiClient {
    pub fn new(config: Config) -> Result<Self, UploadError> {
        // Redirects are reported as-is; a 3xx counts as success.
        let mut builder = Client::builder().redirect(reqwest::redirect::Policy::none());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(ApiClient { client, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Raw client, without MediaSilo auth. Used for the storage upload.
    pub fn http(&self) -> &Client {
        &self.client
    }

    /// Authenticated POST against `resource_path` under the API URL.
    fn post(&self, resource_path: &str) -> Result<RequestBuilder, UploadError> {
        let url = self.config.endpoint(resource_path)?;
        let credentials = self.config.credentials();
        debug!(%url, "MediaSilo API request");
        Ok(self
            .client
            .post(url)
            .basic_auth(&credentials.username, Some(&credentials.password))
            .header(HOST_CONTEXT_HEADER, &credentials.host_context))
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        response: Response,
        endpoint: &'static str,
    ) -> Result<T, UploadError> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|source| UploadError::MalformedResponse { endpoint, source })
    }

    /// Ask for an upload ticket for `file_path`. Only the file name is
    /// sent; the file itself is not touched here.
    pub async fn request_upload_ticket(
        &self,
        file_path: &Path,
    ) -> Result<UploadContext, UploadError> {
        let body = UploadTicketRequest {
            file_name: file_name(file_path),
        };
        info!(file_name = %body.file_name, "requesting upload ticket");

        let response = self.post("assets/upload")?.json(&body).send().await?;
        let status = response.status();
        if status.as_u16() >= 400 {
            return Err(UploadError::TicketRejected {
                status: status.as_u16(),
            });
        }

        let upload_ticket: UploadTicket = Self::read_json(response, "assets/upload").await?;
        Ok(UploadContext {
            file_path: file_path.to_path_buf(),
            upload_ticket,
        })
    }

    /// Register the object at `asset_url` as an asset in the configured
    /// project. `asset_url` is either publicly reachable or a MediaSilo
    /// S3 ingest bucket URL.
    pub async fn create_asset(&self, asset_url: &str) -> Result<Asset, UploadError> {
        let body = CreateAssetRequest {
            project_id: self.config.project_id(),
            source_url: asset_url,
        };
        info!(project_id = body.project_id, "creating asset");

        let response = self.post("assets")?.json(&body).send().await?;
        let status = response.status();
        if status.as_u16() >= 400 {
            return Err(UploadError::AssetRejected {
                status: status.as_u16(),
            });
        }

        Self::read_json(response, "assets").await
    }
}
