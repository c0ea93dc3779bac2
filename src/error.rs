// Error type shared by the three upload stages.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can abort the upload pipeline.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The upload ticket endpoint answered with a status >= 400.
    #[error("Could not upload file. Received {status} from remote server")]
    TicketRejected { status: u16 },

    /// The storage endpoint refused the file bytes.
    #[error("Could not upload file. Received {status} from remote server")]
    UploadRejected { status: u16 },

    /// The asset endpoint answered with a status >= 400.
    #[error("Received {status} from remote server")]
    AssetRejected { status: u16 },

    #[error("HTTP transport error")]
    Transport(#[from] reqwest::Error),

    /// Source file missing or unreadable.
    #[error("Failed to read file {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unexpected response from {endpoint}")]
    MalformedResponse {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid URL '{url}'")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Ticket carried an HTTP method reqwest cannot express.
    #[error("Invalid HTTP method in upload ticket: {method}")]
    InvalidMethod { method: String },

    #[error("Invalid value for header {name} in upload ticket")]
    InvalidHeader { name: &'static str },
}

impl UploadError {
    /// HTTP status carried by a rejection, if this error is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            UploadError::TicketRejected { status }
            | UploadError::UploadRejected { status }
            | UploadError::AssetRejected { status } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_messages_carry_status() {
        let err = UploadError::TicketRejected { status: 403 };
        assert_eq!(
            err.to_string(),
            "Could not upload file. Received 403 from remote server"
        );
        assert_eq!(err.status(), Some(403));

        let err = UploadError::AssetRejected { status: 500 };
        assert_eq!(err.to_string(), "Received 500 from remote server");
    }

    #[test]
    fn wrapped_errors_are_not_repeated_in_the_message() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = UploadError::ReadFile {
            path: PathBuf::from("/tmp/video.mov"),
            source,
        };
        assert_eq!(err.to_string(), "Failed to read file /tmp/video.mov");
        let cause = std::error::Error::source(&err).map(|e| e.to_string());
        assert_eq!(cause.as_deref(), Some("no such file"));
    }

    #[test]
    fn non_http_errors_have_no_status() {
        let err = UploadError::InvalidMethod {
            method: "BAD METHOD".into(),
        };
        assert_eq!(err.status(), None);
    }
}
