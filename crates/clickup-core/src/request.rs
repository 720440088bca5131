//! Payloads for the mutating endpoints, validated before anything is sent.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// Body of `PUT /task/{id}`. Only the fields that were given are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

fn given(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl TaskUpdate {
    /// Build an update from optional flags. Empty strings count as not given.
    ///
    /// # Errors
    /// Returns `CoreError::Validation` if no field was given.
    pub fn new(
        title: Option<String>,
        description: Option<String>,
        status: Option<String>,
    ) -> Result<Self> {
        let update = Self {
            name: given(title),
            markdown_description: given(description),
            status: given(status),
        };
        if update.is_empty() {
            return Err(CoreError::Validation(
                "at least one of --title, --description, or --status must be provided".to_string(),
            ));
        }
        Ok(update)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.markdown_description.is_none() && self.status.is_none()
    }

    /// User-facing names of the fields being changed.
    #[must_use]
    pub fn updated_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push("title");
        }
        if self.markdown_description.is_some() {
            fields.push("description");
        }
        if self.status.is_some() {
            fields.push("status");
        }
        fields
    }
}

/// Body of `POST /list/{id}/task` when creating a subtask.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSubtask {
    pub name: String,
    /// Internal ID of the parent; the API rejects custom IDs here.
    pub parent: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown_description: Option<String>,
}

impl NewSubtask {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        parent: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            parent: parent.into(),
            markdown_description: given(description),
        }
    }
}

/// Pick the list a subtask is created in: the override when given, else the
/// parent's list.
///
/// # Errors
/// Returns `CoreError::Validation` when neither is known.
pub fn resolve_subtask_list(list_override: Option<&str>, parent_list_id: &str) -> Result<String> {
    match list_override.filter(|id| !id.is_empty()) {
        Some(id) => Ok(id.to_string()),
        None if !parent_list_id.is_empty() => Ok(parent_list_id.to_string()),
        None => Err(CoreError::Validation(
            "could not determine list ID for subtask creation".to_string(),
        )),
    }
}
