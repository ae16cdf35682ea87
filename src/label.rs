//! Label Record
//!
//! The label entity exchanged with the GitHub API and stored in label files

use serde::{Deserialize, Serialize};

/// GitHub label definition
///
/// Used as the request payload, the response payload and the file format.
/// Empty fields are omitted on serialization; unknown response fields
/// (`id`, `url`, `default`, ...) are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Label {
    /// Label name, unique within a repository
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Label color (hex code, passed through unvalidated)
    #[serde(default, skip_serializing_if = "is_blank")]
    pub color: Option<String>,

    /// Label description
    #[serde(default, skip_serializing_if = "is_blank")]
    pub description: Option<String>,
}

impl Label {
    /// Create a label with only a name set
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_color<S: Into<String>>(mut self, color: S) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}
