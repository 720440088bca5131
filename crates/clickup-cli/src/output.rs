//! Output formatting for the CLI.
//!
//! `human` goes through the text renderers in `clickup_core::format`;
//! `json` and `yaml` serialize the decoded records.

use anyhow::{Context, Result};
use clickup_core::format;
use clickup_core::{
    Comment, Dependency, Document, Folder, LinkedTask, ListInfo, Space, Task, TimeEntry,
};
use serde::Serialize;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
}

/// Render `value` in `format`.
///
/// # Errors
/// Returns an error if serialization fails.
pub fn render<T: Serialize + HumanDisplay>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Human => Ok(value.human_display()),
        OutputFormat::Json => {
            serde_json::to_string_pretty(value).context("Failed to serialize to JSON")
        }
        OutputFormat::Yaml => serde_yaml::to_string(value).context("Failed to serialize to YAML"),
    }
}

/// Print `value` to stdout in `format`.
///
/// # Errors
/// Returns an error if serialization fails.
pub fn print<T: Serialize + HumanDisplay>(value: &T, format: OutputFormat) -> Result<()> {
    let text = render(value, format)?;
    println!("{}", text.trim_end());
    Ok(())
}

/// Trait for human-readable display.
pub trait HumanDisplay {
    fn human_display(&self) -> String;
}

impl HumanDisplay for Task {
    fn human_display(&self) -> String {
        format::format_task_detail(self)
    }
}

impl HumanDisplay for ListInfo {
    fn human_display(&self) -> String {
        format::format_list_info(self)
    }
}

impl HumanDisplay for Document {
    fn human_display(&self) -> String {
        format::format_document(self)
    }
}

/// Filtered search hits; `total` counts all of them, not just those shown.
#[derive(Debug, Serialize)]
pub struct TaskSearch {
    pub total: usize,
    pub tasks: Vec<Task>,
}

impl TaskSearch {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            total: tasks.len(),
            tasks,
        }
    }
}

impl HumanDisplay for TaskSearch {
    fn human_display(&self) -> String {
        format::format_task_search(&self.tasks)
    }
}

#[derive(Debug, Serialize)]
pub struct ListTasks {
    pub list_id: String,
    pub tasks: Vec<Task>,
}

impl HumanDisplay for ListTasks {
    fn human_display(&self) -> String {
        format::format_list_tasks(&self.tasks)
    }
}

/// Dependencies and links of one task.
#[derive(Debug, Serialize)]
pub struct Relationships {
    pub task_id: String,
    #[serde(skip)]
    pub task: Task,
    pub dependencies: Vec<Dependency>,
    pub linked_tasks: Vec<LinkedTask>,
}

impl Relationships {
    pub fn new(task: Task, requested_id: &str) -> Self {
        Self {
            task_id: requested_id.to_string(),
            dependencies: task.dependencies.clone(),
            linked_tasks: task.linked_tasks.clone(),
            task,
        }
    }
}

impl HumanDisplay for Relationships {
    fn human_display(&self) -> String {
        format::format_task_relationships(&self.task, &self.task_id)
    }
}

/// Spaces of the team, narrowed by a name query.
#[derive(Debug, Serialize)]
pub struct SpaceSearch {
    #[serde(skip)]
    query: String,
    #[serde(skip)]
    all: Vec<Space>,
    spaces: Vec<Space>,
}

impl SpaceSearch {
    pub fn new(all: Vec<Space>, query: &str) -> Self {
        let needle = query.to_lowercase();
        let spaces = all
            .iter()
            .filter(|s| s.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        Self {
            query: query.to_string(),
            all,
            spaces,
        }
    }
}

impl HumanDisplay for SpaceSearch {
    fn human_display(&self) -> String {
        format::format_spaces(&self.all, &self.query)
    }
}

#[derive(Debug, Serialize)]
pub struct SpaceStructure {
    pub space_id: String,
    pub folders: Vec<Folder>,
    pub lists: Vec<ListInfo>,
}

impl HumanDisplay for SpaceStructure {
    fn human_display(&self) -> String {
        format::format_space_structure(&self.space_id, &self.folders, &self.lists)
    }
}

#[derive(Debug, Serialize)]
pub struct Documents {
    pub docs: Vec<Document>,
}

impl HumanDisplay for Documents {
    fn human_display(&self) -> String {
        format::format_documents(&self.docs)
    }
}

#[derive(Debug, Serialize)]
pub struct Comments {
    pub task_id: String,
    pub comments: Vec<Comment>,
}

impl HumanDisplay for Comments {
    fn human_display(&self) -> String {
        format::format_comments(&self.comments)
    }
}

/// Time entries of a task or of the whole team.
#[derive(Debug, Serialize)]
pub struct TimeEntries {
    /// `task <id>` or `team <id>`.
    pub scope: String,
    pub entries: Vec<TimeEntry>,
}

impl HumanDisplay for TimeEntries {
    fn human_display(&self) -> String {
        format::format_time_entries(&self.entries, &self.scope)
    }
}

#[derive(Debug, Serialize)]
pub struct TaskUpdated {
    pub task: Task,
    pub updated_fields: Vec<&'static str>,
}

impl HumanDisplay for TaskUpdated {
    fn human_display(&self) -> String {
        format::format_task_updated(&self.task, &self.updated_fields)
    }
}

#[derive(Debug, Serialize)]
pub struct SubtaskCreated {
    pub subtask: Task,
    #[serde(skip)]
    pub parent: Task,
    pub parent_id: String,
}

impl HumanDisplay for SubtaskCreated {
    fn human_display(&self) -> String {
        format::format_subtask_created(&self.subtask, &self.parent, &self.parent_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clickup_core::{Status, User};
    use pretty_assertions::assert_eq;

    fn space(id: &str, name: &str) -> Space {
        Space {
            id: id.to_string(),
            name: name.to_string(),
            private: false,
            statuses: vec![Status::new("open", "open")],
        }
    }

    #[test]
    fn test_task_search_counts_all_hits() {
        let tasks: Vec<Task> = (0..12).map(|i| Task::new(format!("t{i}"), "x")).collect();
        let search = TaskSearch::new(tasks);
        assert_eq!(search.total, 12);

        let text = render(&search, OutputFormat::Human).unwrap();
        assert!(text.starts_with("Found 12 task(s):"));
        assert!(text.contains("... and 2 more tasks"));
    }

    #[test]
    fn test_task_search_json() {
        let search = TaskSearch::new(vec![Task::new("t1", "Ship it")]);
        let value: serde_json::Value =
            serde_json::from_str(&render(&search, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(value["total"], 1);
        assert_eq!(value["tasks"][0]["name"], "Ship it");
    }

    #[test]
    fn test_space_search_serializes_matches_only() {
        let search = SpaceSearch::new(vec![space("1", "Engineering"), space("2", "Sales")], "eng");
        let yaml = render(&search, OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("Engineering"));
        assert!(!yaml.contains("Sales"));

        let human = render(&search, OutputFormat::Human).unwrap();
        assert!(human.contains("Engineering"));
        assert!(!human.contains("Sales"));
    }

    #[test]
    fn test_relationships_json_uses_requested_id() {
        let mut task = Task::new("abc", "Epic").with_custom_id("DEV-1");
        task.dependencies = vec![Dependency {
            task_id: "abc".to_string(),
            depends_on: "def".to_string(),
            kind: 1,
            ..Dependency::default()
        }];
        let rels = Relationships::new(task, "DEV-1");

        let value: serde_json::Value =
            serde_json::from_str(&render(&rels, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(value["task_id"], "DEV-1");
        assert_eq!(value["dependencies"][0]["depends_on"], "def");
        assert_eq!(value["dependencies"][0]["type"], 1);
    }

    #[test]
    fn test_task_updated_human() {
        let task = Task::new("abc", "Ship it").with_status("done");
        let updated = TaskUpdated {
            task,
            updated_fields: vec!["title", "status"],
        };
        let text = render(&updated, OutputFormat::Human).unwrap();
        assert!(text.contains("Updated fields: title, status"));
        assert!(text.contains("Status: done"));
    }

    #[test]
    fn test_comments_yaml() {
        let comments = Comments {
            task_id: "abc".to_string(),
            comments: vec![Comment {
                id: "c1".to_string(),
                comment_text: "hello".to_string(),
                user: User::new(1, "alice"),
                date: String::new(),
            }],
        };
        let yaml = render(&comments, OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("task_id: abc"));
        assert!(yaml.contains("comment_text: hello"));
    }
}
