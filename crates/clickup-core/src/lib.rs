//! clickup-core: Domain records and response formatting for the ClickUp CLI.
//!
//! This crate provides:
//! - API records (`Task`, `ListInfo`, `Folder`, ...) with lenient decoding
//! - Payloads for mutating endpoints, validated before any request is made
//! - Pure functions rendering records as human-readable text

pub mod error;
pub mod format;
pub mod request;
pub mod types;

pub use error::{CoreError, Result};
pub use request::{NewSubtask, TaskUpdate, resolve_subtask_list};
pub use types::{
    Comment, CommentsResponse, Dependency, DocsResponse, Document, FlexInt, Folder, FolderRef,
    FoldersResponse, LinkedTask, ListInfo, ListRef, ListsResponse, Priority, Space, SpaceRef,
    SpacesResponse, Status, Tag, Task, TasksResponse, TimeEntriesResponse, TimeEntry, User,
};
