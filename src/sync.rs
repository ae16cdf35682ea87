//! Bulk Label Updates
//!
//! Applies label definitions to a repository concurrently, one task per label

use std::fmt;
use std::io::Write;

use futures::stream::{FuturesUnordered, StreamExt};
use reqwest::{Method, StatusCode};
use tracing::{info, warn};

use crate::config::Repository;
use crate::error::Result;
use crate::github::GitHubClient;
use crate::label::Label;

/// How a label's update sequence ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The PATCH response was final
    Patch(StatusCode),

    /// The PATCH returned 404 and the fallback POST response was final
    Create(StatusCode),

    /// A request could not be completed; carries the error description
    Failed(String),
}

impl Resolution {
    /// Terminal status text: the HTTP status phrase or the error description
    pub fn status_text(&self) -> String {
        match self {
            Resolution::Patch(status) | Resolution::Create(status) => status.to_string(),
            Resolution::Failed(reason) => reason.clone(),
        }
    }

    /// Whether the final request returned a 2xx status
    pub fn is_success(&self) -> bool {
        match self {
            Resolution::Patch(status) | Resolution::Create(status) => status.is_success(),
            Resolution::Failed(_) => false,
        }
    }
}

/// Terminal result for one label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub name: String,
    pub resolution: Resolution,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]: {}", self.name, self.resolution.status_text())
    }
}

/// Outcomes of one bulk update, in completion order
#[derive(Debug, Clone, Default)]
pub struct UpdateReport {
    pub outcomes: Vec<Outcome>,
}

impl UpdateReport {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Labels whose PATCH succeeded
    pub fn updated(&self) -> usize {
        self.count(|r| matches!(r, Resolution::Patch(s) if s.is_success()))
    }

    /// Labels created by the fallback POST
    pub fn created(&self) -> usize {
        self.count(|r| matches!(r, Resolution::Create(s) if s.is_success()))
    }

    /// Labels that ended with a transport error
    pub fn failed(&self) -> usize {
        self.count(|r| matches!(r, Resolution::Failed(_)))
    }

    /// Labels whose final response was not 2xx
    pub fn rejected(&self) -> usize {
        self.count(|r| !matches!(r, Resolution::Failed(_)) && !r.is_success())
    }

    fn count(&self, predicate: impl Fn(&Resolution) -> bool) -> usize {
        self.outcomes
            .iter()
            .filter(|o| predicate(&o.resolution))
            .count()
    }
}

/// Label Synchronization Engine
///
/// Pushes label definitions to a repository with PATCH, optionally falling
/// back to POST for labels that do not exist yet.
pub struct LabelSyncer {
    client: GitHubClient,
}

impl LabelSyncer {
    pub fn new(client: GitHubClient) -> Self {
        Self { client }
    }

    /// Update every label concurrently and write one line per label to `out`
    ///
    /// All per-label tasks are spawned before any is awaited. Lines are
    /// written as tasks finish, so their order is not stable between runs.
    /// The call returns once every label has reported, even if writing to
    /// `out` fails part way. Label failures only show up in their own line
    /// and in the report.
    ///
    /// # Errors
    /// Returns the first error from writing to `out`, after all labels finish
    pub async fn update<W: Write>(
        &self,
        repository: &Repository,
        labels: Vec<Label>,
        allow_create: bool,
        out: &mut W,
    ) -> Result<UpdateReport> {
        let mut pending: FuturesUnordered<_> = labels
            .into_iter()
            .map(|label| {
                let name = label.name.clone();
                let task = tokio::spawn(apply_label(
                    self.client.clone(),
                    repository.clone(),
                    label,
                    allow_create,
                ));

                async move {
                    let resolution = task
                        .await
                        .unwrap_or_else(|e| Resolution::Failed(format!("update task failed: {}", e)));
                    Outcome { name, resolution }
                }
            })
            .collect();

        let mut report = UpdateReport::default();
        let mut write_error = None;
        while let Some(outcome) = pending.next().await {
            if write_error.is_none() {
                write_error = writeln!(out, "{}", outcome).err();
            }
            if let Resolution::Failed(reason) = &outcome.resolution {
                warn!(label = %outcome.name, %reason, "label update failed");
            }
            report.outcomes.push(outcome);
        }
        if write_error.is_none() {
            write_error = out.flush().err();
        }

        info!(
            repository = %repository,
            total = report.len(),
            updated = report.updated(),
            created = report.created(),
            rejected = report.rejected(),
            failed = report.failed(),
            "label update finished"
        );

        match write_error {
            Some(err) => Err(err.into()),
            None => Ok(report),
        }
    }
}

/// Run one label's PATCH and optional POST fallback
async fn apply_label(
    client: GitHubClient,
    repository: Repository,
    label: Label,
    allow_create: bool,
) -> Resolution {
    try_apply_label(&client, &repository, &label, allow_create)
        .await
        .unwrap_or_else(|e| Resolution::Failed(e.to_string()))
}

async fn try_apply_label(
    client: &GitHubClient,
    repository: &Repository,
    label: &Label,
    allow_create: bool,
) -> Result<Resolution> {
    let body = serde_json::to_vec(label)?;

    let url = client.label_url(repository, &label.name)?;
    let patched = client.request(Method::PATCH, url, Some(body.clone())).await?;

    if patched.status == StatusCode::NOT_FOUND && allow_create {
        let url = client.labels_url(repository)?;
        let created = client.request(Method::POST, url, Some(body)).await?;
        return Ok(Resolution::Create(created.status));
    }

    Ok(Resolution::Patch(patched.status))
}
