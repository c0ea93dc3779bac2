// Configuration: everything the three stages need to talk to MediaSilo,
// built once at startup and passed by reference afterwards.

use crate::error::UploadError;
use std::time::Duration;
use url::Url;

/// Latest MediaSilo API version. Can be overridden to target another
/// version or a local mock server.
pub const DEFAULT_API_URL: &str = "https://p-api-new.mediasilo.com/v3/";

/// Account used for every service API call. `host_context` is the
/// subdomain you log into MediaSilo with (YOURCOMPANY.mediasilo.com ->
/// `YOURCOMPANY`); the user needs the Asset.Create permission.
#[derive(Clone)]
pub struct Credentials {
    pub host_context: String,
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("host_context", &self.host_context)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    api_url: Url,
    credentials: Credentials,
    project_id: String,
    timeout: Option<Duration>,
}

impl Config {
    /// Build a config against `api_url`. A trailing `/` is added when
    /// missing so endpoint paths resolve beneath the version prefix.
    pub fn new(
        api_url: &str,
        credentials: Credentials,
        project_id: impl Into<String>,
    ) -> Result<Self, UploadError> {
        let normalized = if api_url.ends_with('/') {
            api_url.to_string()
        } else {
            format!("{}/", api_url)
        };
        let api_url = Url::parse(&normalized).map_err(|source| UploadError::InvalidUrl {
            url: api_url.to_string(),
            source,
        })?;
        Ok(Config {
            api_url,
            credentials,
            project_id: project_id.into(),
            timeout: None,
        })
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Resolve a resource path such as `assets/upload` against the API URL.
    pub fn endpoint(&self, resource_path: &str) -> Result<Url, UploadError> {
        self.api_url
            .join(resource_path)
            .map_err(|source| UploadError::InvalidUrl {
                url: format!("{}{}", self.api_url, resource_path),
                source,
            })
    }
}
