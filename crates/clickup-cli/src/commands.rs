//! CLI command implementations.
//!
//! Every handler validates its input, makes its calls through the shared
//! client, prefixes failures with the stage that failed and prints the result.

use crate::output::{
    self, Comments, Documents, ListTasks, OutputFormat, Relationships, SpaceSearch,
    SpaceStructure, SubtaskCreated, TaskSearch, TaskUpdated, TimeEntries,
};
use anyhow::{Context, Result};
use clickup_api::{ClickUpClient, QueryParams};
use clickup_core::format::filter_tasks;
use clickup_core::{
    CommentsResponse, DocsResponse, Document, FoldersResponse, ListInfo, ListsResponse,
    NewSubtask, SpacesResponse, Task, TaskUpdate, TasksResponse, TimeEntriesResponse,
    resolve_subtask_list,
};
use tracing::debug;

/// Filters for `task search`; each vector becomes an array parameter.
#[derive(Debug, Default)]
pub struct SearchFilters {
    pub lists: Vec<String>,
    pub spaces: Vec<String>,
    pub assignees: Vec<String>,
    pub statuses: Vec<String>,
}

/// Params addressing a single task, by custom ID when `custom` is set.
fn task_params(client: &ClickUpClient, custom: bool) -> QueryParams {
    let mut params = QueryParams::new();
    if custom {
        params.custom_task_ids(client.team_id());
    }
    params
}

fn fetch_task(client: &ClickUpClient, id: &str, params: &QueryParams) -> Result<Task> {
    Ok(client.get(&format!("/task/{id}"), params)?)
}

/// Show one task in full.
pub fn task_get(
    client: &ClickUpClient,
    id: &str,
    custom: bool,
    subtasks: bool,
    format: OutputFormat,
) -> Result<()> {
    let mut params = task_params(client, custom);
    if subtasks {
        params.set("include_subtasks", "true");
    }

    let task = fetch_task(client, id, &params).context("getting task")?;
    output::print(&task, format)
}

/// Search the team's tasks, then narrow by `query` on name and description.
pub fn task_search(
    client: &ClickUpClient,
    query: &str,
    filters: SearchFilters,
    format: OutputFormat,
) -> Result<()> {
    let mut params = QueryParams::new();
    params
        .extend_array("list_ids[]", filters.lists)
        .extend_array("space_ids[]", filters.spaces)
        .extend_array("assignees[]", filters.assignees)
        .extend_array("statuses[]", filters.statuses);

    let resp: TasksResponse = client
        .get(&format!("/team/{}/task", client.team_id()), &params)
        .context("searching tasks")?;

    let fetched = resp.tasks.len();
    let tasks = filter_tasks(resp.tasks, query);
    debug!(fetched, matched = tasks.len(), "filtered search results");

    output::print(&TaskSearch::new(tasks), format)
}

/// Change a task's title, description or status.
pub fn task_update(
    client: &ClickUpClient,
    id: &str,
    custom: bool,
    title: Option<String>,
    description: Option<String>,
    status: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let update = TaskUpdate::new(title, description, status)?;

    let params = task_params(client, custom);
    let task: Task = client
        .put(&format!("/task/{id}"), &params, &update)
        .context("updating task")?;

    let updated = TaskUpdated {
        task,
        updated_fields: update.updated_fields(),
    };
    output::print(&updated, format)
}

/// Create a subtask under `parent_id`, in the parent's list unless `list` is given.
pub fn task_subtask(
    client: &ClickUpClient,
    parent_id: &str,
    name: &str,
    custom: bool,
    description: Option<String>,
    list: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let params = task_params(client, custom);
    let parent = fetch_task(client, parent_id, &params).context("fetching parent task")?;

    let list_id = resolve_subtask_list(list, &parent.list.id)?;
    // The API only accepts the parent's internal ID here.
    let body = NewSubtask::new(name, parent.id.as_str(), description);

    let subtask: Task = client
        .post(&format!("/list/{list_id}/task"), &params, &body)
        .context("creating subtask")?;

    let created = SubtaskCreated {
        subtask,
        parent,
        parent_id: parent_id.to_string(),
    };
    output::print(&created, format)
}

/// Dependencies and linked tasks of one task.
pub fn task_rels(client: &ClickUpClient, id: &str, custom: bool, format: OutputFormat) -> Result<()> {
    let params = task_params(client, custom);
    let task = fetch_task(client, id, &params).context("getting task")?;
    output::print(&Relationships::new(task, id), format)
}

pub fn list_info(client: &ClickUpClient, id: &str, format: OutputFormat) -> Result<()> {
    let list: ListInfo = client
        .get(&format!("/list/{id}"), &QueryParams::new())
        .context("getting list info")?;
    output::print(&list, format)
}

/// Tasks of a list; `assignees` is a comma-separated list of user IDs.
pub fn list_tasks(
    client: &ClickUpClient,
    id: &str,
    archived: bool,
    assignees: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let mut params = QueryParams::new();
    if archived {
        params.set("archived", "true");
    }
    if let Some(assignees) = assignees.filter(|a| !a.is_empty()) {
        params.extend_array("assignees[]", assignees.split(',').map(str::trim));
    }

    let resp: TasksResponse = client
        .get(&format!("/list/{id}/task"), &params)
        .context("getting tasks")?;

    let tasks = ListTasks {
        list_id: id.to_string(),
        tasks: resp.tasks,
    };
    output::print(&tasks, format)
}

pub fn space_search(client: &ClickUpClient, query: &str, format: OutputFormat) -> Result<()> {
    let resp: SpacesResponse = client
        .get(&format!("/team/{}/space", client.team_id()), &QueryParams::new())
        .context("searching spaces")?;
    output::print(&SpaceSearch::new(resp.spaces, query), format)
}

/// Folders with their lists, then the lists outside any folder.
pub fn space_structure(client: &ClickUpClient, id: &str, format: OutputFormat) -> Result<()> {
    let folders: FoldersResponse = client
        .get(&format!("/space/{id}/folder"), &QueryParams::new())
        .context("getting folders")?;
    let lists: ListsResponse = client
        .get(&format!("/space/{id}/list"), &QueryParams::new())
        .context("getting folderless lists")?;

    let structure = SpaceStructure {
        space_id: id.to_string(),
        folders: folders.folders,
        lists: lists.lists,
    };
    output::print(&structure, format)
}

pub fn doc_read(client: &ClickUpClient, id: &str, format: OutputFormat) -> Result<()> {
    let doc: Document = client
        .get(&format!("/doc/{id}"), &QueryParams::new())
        .context("reading document")?;
    output::print(&doc, format)
}

pub fn doc_search(client: &ClickUpClient, query: &str, format: OutputFormat) -> Result<()> {
    let mut params = QueryParams::new();
    if !query.is_empty() {
        params.set("query", query);
    }

    let resp: DocsResponse = client
        .get(&format!("/team/{}/docs", client.team_id()), &params)
        .context("searching documents")?;
    output::print(&Documents { docs: resp.docs }, format)
}

pub fn comment_get(client: &ClickUpClient, task_id: &str, format: OutputFormat) -> Result<()> {
    let resp: CommentsResponse = client
        .get(&format!("/task/{task_id}/comment"), &QueryParams::new())
        .context("getting comments")?;

    let comments = Comments {
        task_id: task_id.to_string(),
        comments: resp.comments,
    };
    output::print(&comments, format)
}

/// Time entries of one task, or of a team (the configured one by default).
pub fn time_get(
    client: &ClickUpClient,
    task_id: Option<&str>,
    team: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let (path, scope) = match task_id {
        Some(task_id) => (format!("/task/{task_id}/time"), format!("task {task_id}")),
        None => {
            let team = team.filter(|t| !t.is_empty()).unwrap_or(client.team_id());
            (format!("/team/{team}/time_entries"), format!("team {team}"))
        }
    };

    let resp: TimeEntriesResponse = client
        .get(&path, &QueryParams::new())
        .context("getting time entries")?;

    let entries = TimeEntries {
        scope,
        entries: resp.data,
    };
    output::print(&entries, format)
}
