//! Human-readable rendering of decoded API records.
//!
//! Every function here is pure: it takes decoded records and returns the text
//! to print. Timestamps from the API are millisecond Unix epochs carried as
//! strings.

use crate::types::{Comment, Document, Folder, ListInfo, Space, Task, TimeEntry};
use chrono::{Local, TimeZone};
use std::fmt::{Display, Write};

/// Descriptions in compact views are cut after this many characters.
pub const DESCRIPTION_PREVIEW_CHARS: usize = 200;

/// Maximum number of tasks shown by a task search.
pub const SEARCH_RESULT_LIMIT: usize = 10;

const RULE: &str = "========================================";

/// Format a millisecond epoch string as `YYYY-MM-DD HH:MM` in local time.
///
/// Empty input stays empty; input that is not an integer is returned as is.
#[must_use]
pub fn format_timestamp(ms: &str) -> String {
    format_timestamp_in(ms, &Local)
}

/// Same as [`format_timestamp`] in an explicit time zone.
#[must_use]
pub fn format_timestamp_in<Tz>(ms: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if ms.is_empty() {
        return String::new();
    }
    let Ok(millis) = ms.parse::<i64>() else {
        return ms.to_string();
    };
    tz.timestamp_millis_opt(millis).single().map_or_else(
        || ms.to_string(),
        |dt| dt.format("%Y-%m-%d %H:%M").to_string(),
    )
}

/// Format a millisecond duration as `Xh Ym`, `Xh` or `Ym`.
#[must_use]
pub fn format_duration_ms(ms: i64) -> String {
    let minutes = ms / 1000 / 60;
    if minutes < 60 {
        return format!("{minutes}m");
    }
    let hours = minutes / 60;
    let remaining = minutes % 60;
    if remaining == 0 {
        format!("{hours}h")
    } else {
        format!("{hours}h {remaining}m")
    }
}

/// Return `fallback` when `s` is empty.
#[must_use]
pub fn or<'a>(s: &'a str, fallback: &'a str) -> &'a str {
    if s.is_empty() { fallback } else { s }
}

/// The ID shown to users: the custom ID when set, otherwise the internal one.
#[must_use]
pub fn display_id(task: &Task) -> &str {
    match task.custom_id.as_deref() {
        Some(custom) if !custom.is_empty() => custom,
        _ => &task.id,
    }
}

/// Cut `text` to `max` characters, appending `...` when anything was removed.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

fn due_date(task: &Task) -> Option<&str> {
    task.due_date.as_deref().filter(|d| !d.is_empty())
}

/// Compact rendering used by list and search views.
#[must_use]
pub fn format_task_summary(task: &Task) -> String {
    let mut out = String::new();

    writeln!(
        out,
        "{}  {}  [{}]",
        display_id(task),
        task.name,
        task.status.status
    )
    .unwrap();

    let assignees = task.assignee_names();
    if !assignees.is_empty() {
        writeln!(out, "  Assignees: {}", assignees.join(", ")).unwrap();
    }
    if let Some(due) = due_date(task) {
        writeln!(out, "  Due: {}", format_timestamp(due)).unwrap();
    }
    let description = truncate(&task.description, DESCRIPTION_PREVIEW_CHARS);
    if !description.is_empty() {
        writeln!(out, "  {description}").unwrap();
    }
    writeln!(out, "  {}", task.url).unwrap();

    out
}

/// Full rendering for a single task.
#[must_use]
pub fn format_task_detail(task: &Task) -> String {
    let mut out = String::new();

    let id = match task.custom_id.as_deref() {
        Some(custom) if !custom.is_empty() => format!("{custom} ({})", task.id),
        _ => task.id.clone(),
    };
    let watchers: Vec<&str> = task.watchers.iter().map(|w| w.username.as_str()).collect();
    let tags: Vec<&str> = task.tags.iter().map(|t| t.name.as_str()).collect();
    let priority = task.priority.as_ref().map_or("None", |p| p.priority.as_str());
    let parent = task
        .parent
        .as_deref()
        .filter(|p| !p.is_empty())
        .unwrap_or("None (top-level task)");

    writeln!(out, "{}", task.name).unwrap();
    writeln!(out, "{RULE}\n").unwrap();

    writeln!(out, "ID:       {id}").unwrap();
    writeln!(out, "Status:   {}", task.status.status).unwrap();
    writeln!(out, "Priority: {priority}").unwrap();
    writeln!(out, "Created:  {}", format_timestamp(&task.date_created)).unwrap();
    if let Some(due) = due_date(task) {
        writeln!(out, "Due:      {}", format_timestamp(due)).unwrap();
    }
    out.push('\n');

    writeln!(
        out,
        "Assignees: {}",
        or(&task.assignee_names().join(", "), "Unassigned")
    )
    .unwrap();
    writeln!(out, "Watchers:  {}", or(&watchers.join(", "), "None")).unwrap();
    writeln!(out, "Creator:   {}", task.creator.username).unwrap();
    out.push('\n');

    writeln!(out, "List:   {} (ID: {})", task.list.name, task.list.id).unwrap();
    writeln!(out, "Space:  {}", task.space.name).unwrap();
    writeln!(out, "Tags:   {}", or(&tags.join(", "), "None")).unwrap();
    writeln!(out, "Parent: {parent}").unwrap();
    out.push('\n');

    if !task.description.is_empty() {
        writeln!(out, "Description:\n{}\n", task.description).unwrap();
    }

    writeln!(out, "URL: {}\n", task.url).unwrap();

    writeln!(
        out,
        "Time Estimated: {}",
        format_duration_ms(task.time_estimate.unwrap_or(0))
    )
    .unwrap();
    writeln!(
        out,
        "Time Spent:     {}",
        format_duration_ms(task.time_spent.unwrap_or(0))
    )
    .unwrap();

    if !task.subtasks.is_empty() {
        writeln!(out, "\nSubtasks ({}):", task.subtasks.len()).unwrap();
        for subtask in &task.subtasks {
            writeln!(
                out,
                "  - {} [{}] {} ({})",
                display_id(subtask),
                subtask.status.status,
                subtask.name,
                or(&subtask.assignee_names().join(", "), "Unassigned")
            )
            .unwrap();
        }
    }

    if !task.dependencies.is_empty() || !task.linked_tasks.is_empty() {
        writeln!(out, "\nRelationships:").unwrap();
        if !task.dependencies.is_empty() {
            writeln!(out, "  Dependencies ({}):", task.dependencies.len()).unwrap();
            for dep in &task.dependencies {
                writeln!(out, "    - {} (type: {})", dep.depends_on, dep.kind).unwrap();
            }
        }
        if !task.linked_tasks.is_empty() {
            writeln!(out, "  Linked Tasks ({}):", task.linked_tasks.len()).unwrap();
            for link in &task.linked_tasks {
                writeln!(
                    out,
                    "    - {} (created: {})",
                    link.link_id,
                    format_timestamp(&link.date_created)
                )
                .unwrap();
            }
        }
    }

    out
}

/// Dependencies and linked tasks of `task`, as shown by `task rels`.
///
/// `requested_id` is the ID the user asked for, which may be a custom ID.
#[must_use]
pub fn format_task_relationships(task: &Task, requested_id: &str) -> String {
    let mut out = String::new();

    if task.dependencies.is_empty() && task.linked_tasks.is_empty() {
        writeln!(out, "No relationships found for task: {}", task.name).unwrap();
        return out;
    }

    writeln!(out, "Relationships for: {} ({requested_id})\n", task.name).unwrap();

    if !task.dependencies.is_empty() {
        writeln!(out, "Dependencies ({}):", task.dependencies.len()).unwrap();
        for dep in &task.dependencies {
            writeln!(
                out,
                "  - Task {} (type: {}, created: {})",
                dep.depends_on,
                dep.kind,
                format_timestamp(&dep.date_created)
            )
            .unwrap();
        }
        out.push('\n');
    }

    if !task.linked_tasks.is_empty() {
        writeln!(out, "Linked Tasks ({}):", task.linked_tasks.len()).unwrap();
        for link in &task.linked_tasks {
            writeln!(
                out,
                "  - Task {} (created: {}, by user: {})",
                link.link_id,
                format_timestamp(&link.date_created),
                link.user_id
            )
            .unwrap();
        }
        out.push('\n');
    }

    let total = task.dependencies.len() + task.linked_tasks.len();
    writeln!(out, "Total: {total} relationship(s)").unwrap();

    out
}

/// Keep tasks whose name or description contains `query`, ignoring case.
///
/// An empty query keeps everything.
#[must_use]
pub fn filter_tasks(tasks: Vec<Task>, query: &str) -> Vec<Task> {
    if query.is_empty() {
        return tasks;
    }
    let needle = query.to_lowercase();
    tasks
        .into_iter()
        .filter(|t| {
            t.name.to_lowercase().contains(&needle)
                || t.description.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Search results: at most [`SEARCH_RESULT_LIMIT`] summaries plus a remainder line.
#[must_use]
pub fn format_task_search(tasks: &[Task]) -> String {
    let mut out = String::new();

    if tasks.is_empty() {
        writeln!(out, "No tasks found matching your criteria.").unwrap();
        return out;
    }

    writeln!(out, "Found {} task(s):\n", tasks.len()).unwrap();
    for task in tasks.iter().take(SEARCH_RESULT_LIMIT) {
        writeln!(out, "{}", format_task_summary(task)).unwrap();
    }
    if tasks.len() > SEARCH_RESULT_LIMIT {
        writeln!(out, "... and {} more tasks", tasks.len() - SEARCH_RESULT_LIMIT).unwrap();
    }

    out
}

/// Every task of a list, in summary form.
#[must_use]
pub fn format_list_tasks(tasks: &[Task]) -> String {
    let mut out = String::new();

    if tasks.is_empty() {
        writeln!(out, "No tasks found in this list.").unwrap();
        return out;
    }

    writeln!(out, "Found {} task(s) in list:\n", tasks.len()).unwrap();
    for task in tasks {
        writeln!(out, "{}", format_task_summary(task)).unwrap();
    }

    out
}

#[must_use]
pub fn format_list_info(list: &ListInfo) -> String {
    let mut out = String::new();
    let status = list.status.as_ref().map_or("None", |s| s.status.as_str());

    writeln!(out, "{}", list.name).unwrap();
    writeln!(out, "{RULE}\n").unwrap();
    writeln!(out, "ID:               {}", list.id).unwrap();
    writeln!(out, "Status:           {status}").unwrap();
    writeln!(out, "Task Count:       {}", list.task_count).unwrap();
    writeln!(out, "Permission Level: {}", list.permission_level).unwrap();
    out.push('\n');
    writeln!(out, "Space:  {}", list.space.name).unwrap();
    writeln!(out, "Folder: {}", or(&list.folder.name, "No folder")).unwrap();
    out.push('\n');
    writeln!(out, "Due Dates:          {}", list.due_date_time).unwrap();
    writeln!(out, "Multiple Assignees: {}", list.multiple_assignees).unwrap();
    writeln!(out, "Time Tracking:      {}", list.time_tracking).unwrap();
    out.push('\n');

    if !list.statuses.is_empty() {
        writeln!(out, "Statuses:").unwrap();
        for status in &list.statuses {
            writeln!(out, "  - {} ({})", status.status, status.kind).unwrap();
        }
    }

    out
}

fn branch(is_last: bool) -> &'static str {
    if is_last { "└──" } else { "├──" }
}

/// Folder/list tree of a space.
///
/// Folderless lists follow the folders in their own section, so the last
/// folder only closes the tree when there are no folderless lists.
#[must_use]
pub fn format_space_structure(space_id: &str, folders: &[Folder], lists: &[ListInfo]) -> String {
    let mut out = String::new();

    if folders.is_empty() && lists.is_empty() {
        writeln!(out, "No folders or lists found in space {space_id}").unwrap();
        return out;
    }

    writeln!(out, "Space Structure (ID: {space_id})\n").unwrap();

    for (fi, folder) in folders.iter().enumerate() {
        let is_last_folder = fi == folders.len() - 1;
        let closes_tree = is_last_folder && lists.is_empty();
        let hidden = if folder.hidden { " [hidden]" } else { "" };
        writeln!(
            out,
            "{} {} (ID: {}){hidden}",
            branch(closes_tree),
            folder.name,
            folder.id
        )
        .unwrap();

        let trunk = if closes_tree { " " } else { "│" };
        if folder.lists.is_empty() {
            writeln!(out, "{trunk}   (no lists)").unwrap();
        }
        for (li, list) in folder.lists.iter().enumerate() {
            writeln!(
                out,
                "{trunk}   {} {} (ID: {}) - {} tasks",
                branch(li == folder.lists.len() - 1),
                list.name,
                list.id,
                list.task_count
            )
            .unwrap();
        }

        if !is_last_folder {
            writeln!(out, "│").unwrap();
        }
    }

    if !lists.is_empty() {
        if !folders.is_empty() {
            out.push('\n');
        }
        writeln!(out, "Folderless Lists ({}):", lists.len()).unwrap();
        for (li, list) in lists.iter().enumerate() {
            writeln!(
                out,
                "{} {} (ID: {}) - {} tasks",
                branch(li == lists.len() - 1),
                list.name,
                list.id,
                list.task_count
            )
            .unwrap();
        }
    }

    out
}

/// Spaces whose name contains `query` (case-insensitive), one per line.
#[must_use]
pub fn format_spaces(spaces: &[Space], query: &str) -> String {
    let mut out = String::new();

    if spaces.is_empty() {
        writeln!(out, "No spaces found.").unwrap();
        return out;
    }

    let needle = query.to_lowercase();
    let mut shown = 0;
    for space in spaces {
        if !query.is_empty() && !space.name.to_lowercase().contains(&needle) {
            continue;
        }
        shown += 1;
        let private = if space.private { " [private]" } else { "" };
        writeln!(
            out,
            "{}  {}{private}  ({} statuses)",
            space.id,
            space.name,
            space.statuses.len()
        )
        .unwrap();
    }

    if shown == 0 {
        writeln!(out, "No spaces matching your query.").unwrap();
    }

    out
}

#[must_use]
pub fn format_document(doc: &Document) -> String {
    let mut out = String::new();

    writeln!(out, "{}", doc.name).unwrap();
    writeln!(out, "{RULE}\n").unwrap();
    writeln!(out, "ID:      {}", doc.id).unwrap();
    writeln!(out, "Created: {}", format_timestamp(&doc.date_created)).unwrap();
    writeln!(out, "Creator: {}", doc.creator.username).unwrap();
    out.push('\n');
    writeln!(out, "{}", or(&doc.content, "(No content)")).unwrap();

    out
}

#[must_use]
pub fn format_documents(docs: &[Document]) -> String {
    let mut out = String::new();

    if docs.is_empty() {
        writeln!(out, "No documents found.").unwrap();
        return out;
    }

    writeln!(out, "Found {} document(s):\n", docs.len()).unwrap();
    for doc in docs {
        writeln!(
            out,
            "{}  {}  (created: {}, by: {})",
            doc.id,
            doc.name,
            format_timestamp(&doc.date_created),
            doc.creator.username
        )
        .unwrap();
    }

    out
}

#[must_use]
pub fn format_comments(comments: &[Comment]) -> String {
    let mut out = String::new();

    if comments.is_empty() {
        writeln!(out, "No comments found for this task.").unwrap();
        return out;
    }

    writeln!(out, "Found {} comment(s):\n", comments.len()).unwrap();
    for comment in comments {
        writeln!(
            out,
            "--- {}  ({}) ---",
            comment.user.username,
            format_timestamp(&comment.date)
        )
        .unwrap();
        writeln!(out, "{}", comment.comment_text).unwrap();
        writeln!(out, "ID: {}\n", comment.id).unwrap();
    }

    out
}

/// Time entries; `context` names their scope, e.g. `task abc` or `team 123`.
#[must_use]
pub fn format_time_entries(entries: &[TimeEntry], context: &str) -> String {
    let mut out = String::new();

    if entries.is_empty() {
        writeln!(out, "No time entries found for {context}.").unwrap();
        return out;
    }

    writeln!(
        out,
        "Found {} time entry/entries for {context}:\n",
        entries.len()
    )
    .unwrap();
    for entry in entries {
        writeln!(
            out,
            "  {}  {}  {}",
            format_timestamp(&entry.start),
            format_duration_ms(entry.duration_ms()),
            entry.user.username
        )
        .unwrap();
        if !entry.description.is_empty() {
            writeln!(out, "    {}", entry.description).unwrap();
        }
        out.push('\n');
    }

    out
}

/// Confirmation printed after a task update.
#[must_use]
pub fn format_task_updated(task: &Task, fields: &[&str]) -> String {
    let mut out = String::new();

    writeln!(out, "Task updated: {} {}", display_id(task), task.name).unwrap();
    writeln!(out, "Updated fields: {}", fields.join(", ")).unwrap();
    writeln!(out, "Status: {}", task.status.status).unwrap();
    writeln!(out, "URL: {}", task.url).unwrap();

    out
}

/// Confirmation printed after a subtask was created under `parent`.
#[must_use]
pub fn format_subtask_created(subtask: &Task, parent: &Task, requested_parent_id: &str) -> String {
    let mut out = String::new();

    writeln!(
        out,
        "Subtask created: {} {}",
        display_id(subtask),
        subtask.name
    )
    .unwrap();
    writeln!(out, "Parent: {} ({requested_parent_id})", parent.name).unwrap();
    writeln!(out, "List: {}", or(&subtask.list.name, &parent.list.name)).unwrap();
    writeln!(out, "Status: {}", subtask.status.status).unwrap();
    writeln!(out, "URL: {}", subtask.url).unwrap();

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Dependency, LinkedTask, Priority, Status, User};
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn list(id: &str, name: &str, count: i64) -> ListInfo {
        ListInfo::new(id, name, count)
    }

    fn folder(id: &str, name: &str, lists: Vec<ListInfo>) -> Folder {
        Folder {
            id: id.to_string(),
            name: name.to_string(),
            hidden: false,
            lists,
        }
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp_in("1700000000000", &Utc), "2023-11-14 22:13");
        assert_eq!(format_timestamp_in("0", &Utc), "1970-01-01 00:00");
    }

    #[test]
    fn test_format_timestamp_passthrough() {
        assert_eq!(format_timestamp(""), "");
        assert_eq!(format_timestamp("soon"), "soon");
        assert_eq!(format_timestamp("12ab"), "12ab");
    }

    #[test]
    fn test_format_duration_ms() {
        assert_eq!(format_duration_ms(0), "0m");
        assert_eq!(format_duration_ms(59_999), "0m");
        assert_eq!(format_duration_ms(60_000), "1m");
        assert_eq!(format_duration_ms(90_000), "1m");
        assert_eq!(format_duration_ms(3_540_000), "59m");
        assert_eq!(format_duration_ms(3_600_000), "1h");
        assert_eq!(format_duration_ms(3_660_000), "1h 1m");
        assert_eq!(format_duration_ms(9_000_000), "2h 30m");
    }

    #[test]
    fn test_or() {
        assert_eq!(or("", "None"), "None");
        assert_eq!(or("alice", "None"), "alice");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 200), "short");
        let exact = "x".repeat(200);
        assert_eq!(truncate(&exact, 200), exact);
        let long = "é".repeat(201);
        let cut = truncate(&long, 200);
        assert_eq!(cut.chars().count(), 203);
        assert!(cut.ends_with("é..."));
    }

    #[test]
    fn test_summary_truncates_description() {
        let task = Task::new("abc", "Long one")
            .with_status("open")
            .with_description("a".repeat(250));
        let summary = format_task_summary(&task);

        let expected = format!("  {}...\n", "a".repeat(200));
        assert!(summary.contains(&expected));
        assert!(!summary.contains(&"a".repeat(201)));
    }

    #[test]
    fn test_summary_layout() {
        let mut task = Task::new("abc", "Fix login")
            .with_status("in progress")
            .with_assignees([User::new(1, "alice"), User::new(2, "bob")]);
        task.url = "https://app.clickup.com/t/abc".to_string();

        assert_eq!(
            format_task_summary(&task),
            "abc  Fix login  [in progress]\n  Assignees: alice, bob\n  https://app.clickup.com/t/abc\n"
        );
    }

    #[test]
    fn test_summary_prefers_custom_id() {
        let task = Task::new("abc", "Fix login").with_custom_id("MA-12");
        assert!(format_task_summary(&task).starts_with("MA-12  Fix login"));

        let blank = Task::new("abc", "Fix login").with_custom_id("");
        assert!(format_task_summary(&blank).starts_with("abc  Fix login"));
    }

    #[test]
    fn test_detail_shows_both_ids_with_custom_id() {
        let task = Task::new("abc", "Fix login").with_custom_id("MA-12");
        assert!(format_task_detail(&task).contains("ID:       MA-12 (abc)\n"));

        let plain = Task::new("abc", "Fix login");
        assert!(format_task_detail(&plain).contains("ID:       abc\n"));
    }

    #[test]
    fn test_detail_fallbacks() {
        let detail = format_task_detail(&Task::new("abc", "Bare"));

        assert!(detail.starts_with("Bare\n========================================\n\n"));
        assert!(detail.contains("Priority: None\n"));
        assert!(detail.contains("Assignees: Unassigned\n"));
        assert!(detail.contains("Watchers:  None\n"));
        assert!(detail.contains("Tags:   None\n"));
        assert!(detail.contains("Parent: None (top-level task)\n"));
        assert!(detail.contains("Time Estimated: 0m\nTime Spent:     0m\n"));
        assert!(!detail.contains("Description:"));
        assert!(!detail.contains("Subtasks"));
        assert!(!detail.contains("Relationships:"));
    }

    #[test]
    fn test_detail_with_subtasks_and_dependency() {
        let mut task = Task::new("abc", "Epic").with_status("open");
        task.priority = Some(Priority {
            priority: "high".to_string(),
        });
        task.parent = Some("root1".to_string());
        task.time_estimate = Some(3_660_000);
        task.subtasks = vec![
            Task::new("s1", "First")
                .with_custom_id("MA-2")
                .with_status("done")
                .with_assignees([User::new(1, "alice")]),
            Task::new("s2", "Second").with_status("open"),
        ];
        task.dependencies = vec![Dependency {
            task_id: "abc".to_string(),
            depends_on: "dep9".to_string(),
            kind: 1,
            ..Dependency::default()
        }];

        let detail = format_task_detail(&task);

        assert!(detail.contains("Priority: high\n"));
        assert!(detail.contains("Parent: root1\n"));
        assert!(detail.contains("Time Estimated: 1h 1m\n"));
        assert!(detail.contains(
            "\nSubtasks (2):\n  - MA-2 [done] First (alice)\n  - s2 [open] Second (Unassigned)\n"
        ));
        assert!(detail.contains("\nRelationships:\n  Dependencies (1):\n    - dep9 (type: 1)\n"));
        assert!(!detail.contains("Linked Tasks"));
    }

    #[test]
    fn test_relationships_view() {
        let mut task = Task::new("abc", "Epic");
        task.dependencies = vec![Dependency {
            depends_on: "dep9".to_string(),
            kind: 0,
            ..Dependency::default()
        }];
        task.linked_tasks = vec![LinkedTask {
            link_id: "lnk1".to_string(),
            user_id: "77".to_string(),
            ..LinkedTask::default()
        }];

        let out = format_task_relationships(&task, "MA-1");

        assert!(out.starts_with("Relationships for: Epic (MA-1)\n\n"));
        assert!(out.contains("Dependencies (1):\n  - Task dep9 (type: 0, created: )\n"));
        assert!(out.contains("Linked Tasks (1):\n  - Task lnk1 (created: , by user: 77)\n"));
        assert!(out.ends_with("Total: 2 relationship(s)\n"));
    }

    #[test]
    fn test_relationships_none() {
        assert_eq!(
            format_task_relationships(&Task::new("abc", "Alone"), "abc"),
            "No relationships found for task: Alone\n"
        );
    }

    #[test]
    fn test_filter_tasks_is_case_insensitive() {
        let tasks = vec![
            Task::new("1", "Fix LOGIN bug"),
            Task::new("2", "Write docs").with_description("covers the login flow"),
            Task::new("3", "Unrelated"),
        ];

        let ids: Vec<String> = filter_tasks(tasks.clone(), "Login")
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(filter_tasks(tasks, "").len(), 3);
    }

    #[test]
    fn test_search_caps_results() {
        let tasks: Vec<Task> = (0..13)
            .map(|i| Task::new(format!("t{i}"), format!("Task {i}")))
            .collect();

        let out = format_task_search(&tasks);

        assert!(out.starts_with("Found 13 task(s):\n\n"));
        assert!(out.contains("t9  Task 9"));
        assert!(!out.contains("t10  Task 10"));
        assert!(out.ends_with("... and 3 more tasks\n"));
    }

    #[test]
    fn test_search_without_overflow() {
        let tasks = vec![Task::new("t1", "Only")];
        let out = format_task_search(&tasks);
        assert!(!out.contains("more tasks"));
        assert_eq!(
            format_task_search(&[]),
            "No tasks found matching your criteria.\n"
        );
    }

    #[test]
    fn test_list_tasks() {
        assert_eq!(format_list_tasks(&[]), "No tasks found in this list.\n");
        let out = format_list_tasks(&[Task::new("a", "One"), Task::new("b", "Two")]);
        assert!(out.starts_with("Found 2 task(s) in list:\n\n"));
    }

    #[test]
    fn test_space_structure_tree() {
        let folders = vec![folder(
            "f1",
            "Engineering",
            vec![list("l1", "Backlog", 3), list("l2", "Sprint", 5)],
        )];
        let lists = vec![list("l3", "Inbox", 1)];

        let out = format_space_structure("sp1", &folders, &lists);

        assert_eq!(
            out,
            "Space Structure (ID: sp1)\n\n\
             ├── Engineering (ID: f1)\n\
             │   ├── Backlog (ID: l1) - 3 tasks\n\
             │   └── Sprint (ID: l2) - 5 tasks\n\
             \n\
             Folderless Lists (1):\n\
             └── Inbox (ID: l3) - 1 tasks\n"
        );
    }

    #[test]
    fn test_space_structure_last_folder_closes_tree() {
        let mut hidden = folder("f2", "Archive", vec![]);
        hidden.hidden = true;
        let folders = vec![folder("f1", "Eng", vec![list("l1", "Backlog", 0)]), hidden];

        let out = format_space_structure("sp1", &folders, &[]);

        assert_eq!(
            out,
            "Space Structure (ID: sp1)\n\n\
             ├── Eng (ID: f1)\n\
             │   └── Backlog (ID: l1) - 0 tasks\n\
             │\n\
             └── Archive (ID: f2) [hidden]\n    (no lists)\n"
        );
    }

    #[test]
    fn test_space_structure_empty() {
        assert_eq!(
            format_space_structure("sp1", &[], &[]),
            "No folders or lists found in space sp1\n"
        );
    }

    #[test]
    fn test_list_info_fallbacks() {
        let mut info = list("l1", "Backlog", 7);
        info.statuses = vec![Status::new("open", "open"), Status::new("done", "closed")];

        let out = format_list_info(&info);

        assert!(out.contains("Status:           None\n"));
        assert!(out.contains("Task Count:       7\n"));
        assert!(out.contains("Folder: No folder\n"));
        assert!(out.contains("Statuses:\n  - open (open)\n  - done (closed)\n"));
    }

    #[test]
    fn test_spaces_filter() {
        let spaces = vec![
            Space {
                id: "1".to_string(),
                name: "Engineering".to_string(),
                private: true,
                statuses: vec![Status::new("open", "open")],
            },
            Space {
                id: "2".to_string(),
                name: "Marketing".to_string(),
                ..Space::default()
            },
        ];

        assert_eq!(
            format_spaces(&spaces, "engin"),
            "1  Engineering [private]  (1 statuses)\n"
        );
        assert_eq!(format_spaces(&spaces, "").lines().count(), 2);
        assert_eq!(
            format_spaces(&spaces, "sales"),
            "No spaces matching your query.\n"
        );
        assert_eq!(format_spaces(&[], ""), "No spaces found.\n");
    }

    #[test]
    fn test_document_without_content() {
        let doc = Document {
            id: "d1".to_string(),
            name: "Runbook".to_string(),
            ..Document::default()
        };
        assert!(format_document(&doc).ends_with("\n(No content)\n"));
    }

    #[test]
    fn test_comments_and_time_entries_empty() {
        assert_eq!(format_comments(&[]), "No comments found for this task.\n");
        assert_eq!(format_documents(&[]), "No documents found.\n");
        assert_eq!(
            format_time_entries(&[], "team 9"),
            "No time entries found for team 9.\n"
        );
    }

    #[test]
    fn test_time_entries() {
        let entries = vec![TimeEntry {
            id: "te1".to_string(),
            user: User::new(1, "alice"),
            duration: "5400000".to_string(),
            start: String::new(),
            description: "pairing".to_string(),
        }];

        assert_eq!(
            format_time_entries(&entries, "task abc"),
            "Found 1 time entry/entries for task abc:\n\n    1h 30m  alice\n    pairing\n\n"
        );
    }

    #[test]
    fn test_mutation_confirmations() {
        let mut updated = Task::new("abc", "Renamed").with_status("review");
        updated.url = "u".to_string();
        assert_eq!(
            format_task_updated(&updated, &["title", "status"]),
            "Task updated: abc Renamed\nUpdated fields: title, status\nStatus: review\nURL: u\n"
        );

        let parent = Task::new("p1", "Parent").in_list("l1", "Backlog");
        let subtask = Task::new("s1", "Child").with_custom_id("MA-9");
        let out = format_subtask_created(&subtask, &parent, "MA-1");
        assert!(out.starts_with("Subtask created: MA-9 Child\nParent: Parent (MA-1)\nList: Backlog\n"));
    }
}
