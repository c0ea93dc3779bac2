// File uploader: sends the local file straight to the storage URL named in
// an upload ticket. The storage endpoint authenticates through the
// pre-signed headers in the ticket, so no MediaSilo credentials are sent.

use crate::error::UploadError;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{debug, info};
use url::Url;

/// Short-lived, single-use credentials for writing one file to storage,
/// as returned by `POST assets/upload`:
///
/// ```json
/// { "assetUrl": "https://s3.amazonaws.com/ingest-east.mediasilo.com/<uuid>/MYFILE.mov",
///   "amzDate": "Wed, 10 Jun 2015 18:01:46 GMT",
///   "amzAcl": "private",
///   "contentType": "application/octet-stream",
///   "authorization": "AWS <key>:<signature>",
///   "httpMethod": "PUT" }
/// ```
///
/// Not `Clone`: a ticket is moved into the one upload it
/// authorizes.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadTicket {
    pub asset_url: String,
    pub amz_date: String,
    pub amz_acl: String,
    pub content_type: String,
    pub authorization: String,
    pub http_method: String,
}

impl std::fmt::Debug for UploadTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadTicket")
            .field("asset_url", &self.asset_url)
            .field("amz_date", &self.amz_date)
            .field("amz_acl", &self.amz_acl)
            .field("content_type", &self.content_type)
            .field("authorization", &"***")
            .field("http_method", &self.http_method)
            .finish()
    }
}

/// A ticket paired with the local file it authorizes.
#[derive(Debug)]
pub struct UploadContext {
    pub file_path: PathBuf,
    pub upload_ticket: UploadTicket,
}

impl UploadContext {
    pub fn asset_url(&self) -> &str {
        &self.upload_ticket.asset_url
    }
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, UploadError> {
    HeaderValue::from_str(value).map_err(|_| UploadError::InvalidHeader { name })
}

/// Build the storage request headers from the ticket. `Content-Length` is
/// the size of the body that will actually be sent.
fn ticket_headers(ticket: &UploadTicket, content_length: u64) -> Result<HeaderMap, UploadError> {
    let mut headers = HeaderMap::new();
    headers.insert("x-amz-date", header_value("x-amz-date", &ticket.amz_date)?);
    headers.insert(
        AUTHORIZATION,
        header_value("Authorization", &ticket.authorization)?,
    );
    headers.insert("x-amz-acl", header_value("x-amz-acl", &ticket.amz_acl)?);
    headers.insert(
        CONTENT_TYPE,
        header_value("Content-Type", &ticket.content_type)?,
    );
    headers.insert(CONTENT_LENGTH, HeaderValue::from(content_length));
    Ok(headers)
}

fn ticket_method(ticket: &UploadTicket) -> Result<Method, UploadError> {
    Method::from_bytes(ticket.http_method.to_ascii_uppercase().as_bytes()).map_err(|_| {
        UploadError::InvalidMethod {
            method: ticket.http_method.clone(),
        }
    })
}

/// Upload the file in `context` using its ticket. On success the context is
/// handed back untouched so the next stage can read `asset_url`.
pub async fn upload_file(
    client: &Client,
    context: UploadContext,
) -> Result<UploadContext, UploadError> {
    let ticket = &context.upload_ticket;
    let url = Url::parse(&ticket.asset_url).map_err(|source| UploadError::InvalidUrl {
        url: ticket.asset_url.clone(),
        source,
    })?;
    let method = ticket_method(ticket)?;

    let body = tokio::fs::read(&context.file_path)
        .await
        .map_err(|source| UploadError::ReadFile {
            path: context.file_path.clone(),
            source,
        })?;
    let headers = ticket_headers(ticket, body.len() as u64)?;

    info!(
        file = %context.file_path.display(),
        bytes = body.len(),
        "Uploading file to MediaSilo S3 ingest bucket"
    );
    debug!(%method, %url, "storage request");

    let response = client
        .request(method, url)
        .headers(headers)
        .body(body)
        .send()
        .await?;

    let status = response.status();
    if status.as_u16() >= 400 {
        return Err(UploadError::UploadRejected {
            status: status.as_u16(),
        });
    }
    // Storage replies are not consumed, only drained.
    response.bytes().await?;

    info!(file = %context.file_path.display(), "upload finished");
    Ok(context)
}
