//! Label Listing
//!
//! Fetches a repository's labels and renders them as indented JSON

use std::io::Write;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::debug;

use crate::config::Repository;
use crate::error::{Error, Result};
use crate::github::GitHubClient;
use crate::label::Label;

/// Label Lister
pub struct LabelLister {
    client: GitHubClient,
}

impl LabelLister {
    pub fn new(client: GitHubClient) -> Self {
        Self { client }
    }

    /// Fetch all labels of a repository
    ///
    /// Only the first page the API returns is read.
    ///
    /// # Errors
    /// Returns an error on transport failure, any status other than
    /// `200 OK`, or a malformed body
    pub async fn fetch(&self, repository: &Repository) -> Result<Vec<Label>> {
        let url = self.client.labels_url(repository)?;
        let response = self.client.request(Method::GET, url, None).await?;

        if response.status != StatusCode::OK {
            return Err(Error::unexpected_status(response.status));
        }

        let labels: Vec<Label> = serde_json::from_str(&response.body)?;
        debug!(repository = %repository, count = labels.len(), "fetched labels");
        Ok(labels)
    }

    /// Fetch a repository's labels and write them to `out`
    ///
    /// Nothing is written unless the whole listing succeeded.
    ///
    /// # Errors
    /// Returns an error if fetching, rendering or writing fails
    pub async fn list<W: Write>(&self, repository: &Repository, out: &mut W) -> Result<()> {
        let labels = self.fetch(repository).await?;
        let rendered = render_labels(&labels)?;
        writeln!(out, "{}", rendered)?;
        Ok(())
    }
}

/// Render labels as tab-indented JSON
pub fn render_labels(labels: &[Label]) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
    labels.serialize(&mut serializer)?;
    Ok(String::from_utf8(buf)?)
}
