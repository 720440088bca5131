//! Records mirrored from ClickUp API payloads.
//!
//! Every record is decoded from a single response, rendered and dropped. Fields
//! the API may omit fall back to their defaults, and collections or free text
//! the API sometimes sends as `null` decode as empty.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Decode `null` as `T::default()`.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Integer that the API sends either as a JSON number or as a string.
///
/// Decoding tries, in order:
/// 1. a JSON number (non-integral values decode as 0),
/// 2. a string: `""` is 0, anything else must parse as a base-10 integer,
/// 3. any other shape (`null`, bool, array, object) decodes as 0.
///
/// Always serialized as a plain number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct FlexInt(pub i64);

impl FlexInt {
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for FlexInt {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for FlexInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for FlexInt {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Number(n) => Ok(Self(n.as_i64().unwrap_or(0))),
            Value::String(s) if s.is_empty() => Ok(Self(0)),
            Value::String(s) => s
                .parse()
                .map(Self)
                .map_err(|_| de::Error::custom(format!("invalid integer string: {s:?}"))),
            _ => Ok(Self(0)),
        }
    }
}

/// A ClickUp task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    pub id: String,
    /// User-facing ID such as `MA-123`, when the workspace uses custom IDs.
    pub custom_id: Option<String>,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub description: String,
    #[serde(deserialize_with = "null_default")]
    pub status: Status,
    pub priority: Option<Priority>,
    #[serde(deserialize_with = "null_default")]
    pub assignees: Vec<User>,
    #[serde(deserialize_with = "null_default")]
    pub watchers: Vec<User>,
    #[serde(deserialize_with = "null_default")]
    pub creator: User,
    #[serde(deserialize_with = "null_default")]
    pub list: ListRef,
    #[serde(deserialize_with = "null_default")]
    pub space: SpaceRef,
    #[serde(deserialize_with = "null_default")]
    pub tags: Vec<Tag>,
    /// Internal ID of the parent task.
    pub parent: Option<String>,
    /// Millisecond epoch string.
    pub due_date: Option<String>,
    /// Millisecond epoch string.
    #[serde(deserialize_with = "null_default")]
    pub date_created: String,
    /// Milliseconds.
    pub time_estimate: Option<i64>,
    /// Milliseconds.
    pub time_spent: Option<i64>,
    #[serde(deserialize_with = "null_default")]
    pub url: String,
    #[serde(deserialize_with = "null_default")]
    pub subtasks: Vec<Task>,
    #[serde(deserialize_with = "null_default")]
    pub dependencies: Vec<Dependency>,
    #[serde(deserialize_with = "null_default")]
    pub linked_tasks: Vec<LinkedTask>,
}

impl Task {
    /// Create a task with just an ID and a name.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_custom_id(mut self, custom_id: impl Into<String>) -> Self {
        self.custom_id = Some(custom_id.into());
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Status::new(status, "custom");
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_assignees(mut self, assignees: impl IntoIterator<Item = User>) -> Self {
        self.assignees = assignees.into_iter().collect();
        self
    }

    #[must_use]
    pub fn in_list(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.list = ListRef {
            id: id.into(),
            name: name.into(),
        };
        self
    }

    /// Whether the task carries a non-empty custom ID.
    #[must_use]
    pub fn has_custom_id(&self) -> bool {
        self.custom_id.as_deref().is_some_and(|id| !id.is_empty())
    }

    /// Usernames of the assignees, in API order.
    #[must_use]
    pub fn assignee_names(&self) -> Vec<&str> {
        self.assignees.iter().map(|u| u.username.as_str()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Status {
    #[serde(deserialize_with = "null_default")]
    pub status: String,
    #[serde(rename = "type", deserialize_with = "null_default")]
    pub kind: String,
}

impl Status {
    #[must_use]
    pub fn new(status: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            kind: kind.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Priority {
    #[serde(deserialize_with = "null_default")]
    pub priority: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(deserialize_with = "null_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_default")]
    pub username: String,
}

impl User {
    #[must_use]
    pub fn new(id: i64, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    #[serde(deserialize_with = "null_default")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListRef {
    #[serde(deserialize_with = "null_default")]
    pub id: String,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpaceRef {
    #[serde(deserialize_with = "null_default")]
    pub id: String,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolderRef {
    #[serde(deserialize_with = "null_default")]
    pub id: String,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
}

/// A "waiting on" / "blocking" edge between two tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dependency {
    #[serde(deserialize_with = "null_default")]
    pub task_id: String,
    #[serde(deserialize_with = "null_default")]
    pub depends_on: String,
    /// Numeric relationship code as reported by the API.
    #[serde(rename = "type", deserialize_with = "null_default")]
    pub kind: i64,
    #[serde(deserialize_with = "null_default")]
    pub date_created: String,
    #[serde(rename = "userid", deserialize_with = "null_default")]
    pub user_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkedTask {
    #[serde(deserialize_with = "null_default")]
    pub link_id: String,
    #[serde(deserialize_with = "null_default")]
    pub date_created: String,
    #[serde(rename = "userid", deserialize_with = "null_default")]
    pub user_id: String,
    #[serde(deserialize_with = "null_default")]
    pub workspace_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TasksResponse {
    #[serde(deserialize_with = "null_default")]
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Space {
    #[serde(deserialize_with = "null_default")]
    pub id: String,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub private: bool,
    #[serde(deserialize_with = "null_default")]
    pub statuses: Vec<Status>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpacesResponse {
    #[serde(deserialize_with = "null_default")]
    pub spaces: Vec<Space>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Folder {
    #[serde(deserialize_with = "null_default")]
    pub id: String,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub hidden: bool,
    #[serde(deserialize_with = "null_default")]
    pub lists: Vec<ListInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoldersResponse {
    #[serde(deserialize_with = "null_default")]
    pub folders: Vec<Folder>,
}

/// Full list metadata.
///
/// `task_count` arrives as a string from some endpoints, and `status` is `null`
/// for lists inside folders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListInfo {
    #[serde(deserialize_with = "null_default")]
    pub id: String,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    pub status: Option<Status>,
    pub task_count: FlexInt,
    #[serde(deserialize_with = "null_default")]
    pub permission_level: String,
    #[serde(deserialize_with = "null_default")]
    pub space: SpaceRef,
    #[serde(deserialize_with = "null_default")]
    pub folder: FolderRef,
    #[serde(deserialize_with = "null_default")]
    pub due_date_time: bool,
    #[serde(deserialize_with = "null_default")]
    pub multiple_assignees: bool,
    #[serde(deserialize_with = "null_default")]
    pub time_tracking: bool,
    #[serde(deserialize_with = "null_default")]
    pub statuses: Vec<Status>,
}

impl ListInfo {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, task_count: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            task_count: FlexInt(task_count),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListsResponse {
    #[serde(deserialize_with = "null_default")]
    pub lists: Vec<ListInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Comment {
    #[serde(deserialize_with = "null_default")]
    pub id: String,
    #[serde(deserialize_with = "null_default")]
    pub comment_text: String,
    #[serde(deserialize_with = "null_default")]
    pub user: User,
    /// Millisecond epoch string.
    #[serde(deserialize_with = "null_default")]
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentsResponse {
    #[serde(deserialize_with = "null_default")]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeEntry {
    #[serde(deserialize_with = "null_default")]
    pub id: String,
    #[serde(deserialize_with = "null_default")]
    pub user: User,
    /// Milliseconds, as a decimal string. Negative while a timer is running.
    #[serde(deserialize_with = "null_default")]
    pub duration: String,
    /// Millisecond epoch string.
    #[serde(deserialize_with = "null_default")]
    pub start: String,
    #[serde(deserialize_with = "null_default")]
    pub description: String,
}

impl TimeEntry {
    /// Duration in milliseconds; 0 when the API value is not an integer.
    #[must_use]
    pub fn duration_ms(&self) -> i64 {
        self.duration.parse().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeEntriesResponse {
    #[serde(deserialize_with = "null_default")]
    pub data: Vec<TimeEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    #[serde(deserialize_with = "null_default")]
    pub id: String,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub content: String,
    #[serde(deserialize_with = "null_default")]
    pub date_created: String,
    #[serde(deserialize_with = "null_default")]
    pub creator: User,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsResponse {
    #[serde(deserialize_with = "null_default")]
    pub docs: Vec<Document>,
}
