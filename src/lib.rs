//! # gh-label-sync
//!
//! List and bulk-update GitHub repository labels from a declarative file
//!
//! ## Features
//! - Label listing as indented JSON
//! - Concurrent bulk updates, one task per label
//! - Optional creation of labels that do not exist yet
//! - JSON and YAML label files, or JSON on standard input

pub mod config;
pub mod error;
pub mod github;
pub mod label;
pub mod list;
pub mod sync;

pub use config::{ClientConfig, LabelSource, Repository};
pub use error::{Error, Result};
pub use github::GitHubClient;
pub use label::Label;
pub use list::LabelLister;
pub use sync::{LabelSyncer, Outcome, Resolution, UpdateReport};

/// Update a repository's labels and print one status line per label to stdout
///
/// # Examples
///
/// ```rust,no_run
/// use gh_label_sync::{ClientConfig, Label};
///
/// #[tokio::main]
/// async fn main() -> gh_label_sync::Result<()> {
///     let config = ClientConfig::new(Some("your_github_token".to_string()), None)?;
///     let labels = vec![
///         Label::new("bug").with_color("d73a4a"),
///         Label::new("docs").with_description("Documentation changes"),
///     ];
///
///     let report = gh_label_sync::update_repository_labels(config, "owner/repo", labels, true).await?;
///     println!("{} labels processed", report.len());
///     Ok(())
/// }
/// ```
pub async fn update_repository_labels(
    config: ClientConfig,
    repository: &str,
    labels: Vec<Label>,
    allow_create: bool,
) -> Result<UpdateReport> {
    let repository: Repository = repository.parse()?;
    let syncer = LabelSyncer::new(GitHubClient::new(config)?);
    syncer
        .update(&repository, labels, allow_create, &mut std::io::stdout())
        .await
}
