//! Configuration Management
//!
//! Repository identifiers, client settings and label source loading

use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use secrecy::SecretString;
use url::Url;

use crate::error::{Error, Result};
use crate::label::Label;

/// Public GitHub REST API endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Label file read when none is named on the command line
pub const DEFAULT_LABEL_FILE: &str = "default.json";

/// Target repository (`owner/repo`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl FromStr for Repository {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (owner, name) = parse_repository(s)?;
        Ok(Self { owner, name })
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Parse repository string into owner and name
///
/// # Arguments
/// - `repo`: Repository string in "owner/repo" format
///
/// # Errors
/// Returns an error if the format is invalid
pub fn parse_repository(repo: &str) -> Result<(String, String)> {
    let parts: Vec<&str> = repo.split('/').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(Error::InvalidRepositoryFormat(repo.to_string()));
    }
    Ok((parts[0].to_string(), parts[1].to_string()))
}

/// Client Configuration
///
/// Static settings handed to [`crate::GitHubClient`] at construction
#[derive(Debug)]
pub struct ClientConfig {
    /// Bearer token attached to every request (unauthenticated if None)
    pub token: Option<SecretString>,

    /// API root, e.g. `https://api.github.com`
    pub api_base: Url,
}

impl ClientConfig {
    /// Create a client configuration
    ///
    /// An empty token is treated as no token. `api_base` defaults to
    /// [`DEFAULT_API_URL`].
    ///
    /// # Errors
    /// Returns an error if the API base is not an absolute http(s) URL
    pub fn new(token: Option<String>, api_base: Option<&str>) -> Result<Self> {
        let token = token
            .filter(|t| !t.trim().is_empty())
            .map(SecretString::from);

        let api_base = Url::parse(api_base.unwrap_or(DEFAULT_API_URL))?;
        if !matches!(api_base.scheme(), "http" | "https") || api_base.cannot_be_a_base() {
            return Err(Error::config_validation(format!(
                "API URL must be an http(s) URL: {}",
                api_base
            )));
        }

        Ok(Self { token, api_base })
    }

    /// Whether requests will carry a bearer token
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Where label definitions are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelSource {
    File(PathBuf),
    Stdin,
}

impl LabelSource {
    /// Interpret a `-f` argument; an empty path means standard input
    pub fn from_arg(arg: &str) -> Self {
        if arg.is_empty() {
            LabelSource::Stdin
        } else {
            LabelSource::File(PathBuf::from(arg))
        }
    }
}

impl Default for LabelSource {
    fn default() -> Self {
        LabelSource::File(PathBuf::from(DEFAULT_LABEL_FILE))
    }
}

/// Label file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelFormat {
    Json,
    Yaml,
}

impl LabelFormat {
    /// Detect the format from a file extension, defaulting to JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => LabelFormat::Yaml,
            _ => LabelFormat::Json,
        }
    }
}

/// Parse label definitions from a content string
///
/// # Errors
/// If the content is not an array of label objects
pub fn parse_labels(content: &str, format: LabelFormat) -> Result<Vec<Label>> {
    let labels: Vec<Label> = match format {
        LabelFormat::Json => serde_json::from_str(content)?,
        LabelFormat::Yaml => serde_yaml::from_str(content)?,
    };
    Ok(labels)
}

/// Load label definitions from a JSON reader
///
/// # Errors
/// If reading or parsing fails
pub fn load_labels_from_reader<R: Read>(mut reader: R) -> Result<Vec<Label>> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    parse_labels(&content, LabelFormat::Json)
}

/// Load label definitions from a file, detecting format by extension
///
/// # Errors
/// If file reading or parsing fails
pub fn load_labels_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Label>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        std::io::Error::new(e.kind(), format!("{}: {}", path.display(), e))
    })?;
    parse_labels(&content, LabelFormat::from_path(path))
}

/// Load label definitions from the given source
///
/// # Errors
/// If reading or parsing fails
pub fn load_labels(source: &LabelSource) -> Result<Vec<Label>> {
    match source {
        LabelSource::File(path) => load_labels_from_file(path),
        LabelSource::Stdin => load_labels_from_reader(std::io::stdin().lock()),
    }
}
