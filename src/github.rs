//! GitHub API Client
//!
//! Thin authenticated transport for the repository label endpoints

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use secrecy::ExposeSecret;
use tracing::{debug, instrument};
use url::Url;

use crate::config::{ClientConfig, Repository};
use crate::error::{Error, Result};

/// Media type that enables label descriptions on the labels API
pub const ACCEPT_MEDIA_TYPE: &str = "application/vnd.github.symmetra-preview+json";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Raw API response
///
/// The body is always read to completion before the response is handed out.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status; `Display` renders the status text, e.g. `200 OK`
    pub status: StatusCode,

    /// Response body
    pub body: String,
}

/// GitHub API Client
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_base: Url,
}

impl GitHubClient {
    /// Create a new GitHub client
    ///
    /// The token, when present, is sent as a static bearer credential on
    /// every request and is never refreshed.
    ///
    /// # Errors
    /// Returns an error if the token is not a valid header value or the
    /// HTTP client cannot be built
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_MEDIA_TYPE));

        match &config.token {
            Some(token) => {
                let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                    .map_err(|_| {
                        Error::config_validation("Access token contains invalid characters")
                    })?;
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
            None => debug!("no access token configured, requests are unauthenticated"),
        }

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            api_base: config.api_base,
        })
    }

    /// Collection URL for a repository's labels
    ///
    /// # Errors
    /// Returns an error if the configured API base cannot carry a path
    pub fn labels_url(&self, repository: &Repository) -> Result<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| Error::config_validation(format!("Invalid API URL: {}", self.api_base)))?
            .pop_if_empty()
            .extend([
                "repos",
                repository.owner.as_str(),
                repository.name.as_str(),
                "labels",
            ]);
        Ok(url)
    }

    /// Per-label URL; the name is percent-encoded as a single path segment
    ///
    /// `.` and `..` are rejected: URL parsing collapses them (and their
    /// `%2E` forms) into the parent path, which is the collection URL.
    ///
    /// # Errors
    /// Returns an error for dot-segment names or if the configured API base
    /// cannot carry a path
    pub fn label_url(&self, repository: &Repository, name: &str) -> Result<Url> {
        if matches!(name, "." | "..") {
            return Err(Error::InvalidLabelName(name.to_string()));
        }

        let mut url = self.labels_url(repository)?;
        url.path_segments_mut()
            .map_err(|_| Error::config_validation(format!("Invalid API URL: {}", self.api_base)))?
            .push(name);
        Ok(url)
    }

    /// Issue a single request
    ///
    /// Non-2xx statuses are returned as normal responses. Only failures to
    /// build, send or read the request surface as [`Error::Transport`].
    #[instrument(level = "debug", skip_all, fields(%method, %url))]
    pub async fn request(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> Result<ApiResponse> {
        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!(%status, bytes = body.len(), "request completed");

        Ok(ApiResponse { status, body })
    }
}
