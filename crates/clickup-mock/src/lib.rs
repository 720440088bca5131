//! Local stand-in for the ClickUp v2 REST API.
//!
//! Serves the endpoints the CLI consumes from in-memory [`Fixtures`], checks
//! the `Authorization` header and records every request so tests can assert
//! on paths, query strings and bodies.

pub mod fixtures;

use axum::{
    Json, Router,
    body::{Body, to_bytes},
    extract::{Path, Query, Request, State},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
};
use clickup_core::{
    CommentsResponse, DocsResponse, Document, FoldersResponse, ListInfo, ListsResponse,
    SpacesResponse, Status, Task, TaskUpdate, TasksResponse, TimeEntriesResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub use fixtures::Fixtures;

/// One request as the mock saw it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    /// Raw (still percent-encoded) query string.
    pub query: Option<String>,
    pub authorization: Option<String>,
    /// Body parsed as JSON, when it was JSON.
    pub body: Option<Value>,
}

struct MockState {
    fixtures: Mutex<Fixtures>,
    requests: Mutex<Vec<RecordedRequest>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shared handle on the mock's fixtures and request log.
#[derive(Clone)]
pub struct MockApi {
    state: Arc<MockState>,
}

impl MockApi {
    #[must_use]
    pub fn new(fixtures: Fixtures) -> Self {
        Self {
            state: Arc::new(MockState {
                fixtures: Mutex::new(fixtures),
                requests: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Router serving every mocked endpoint.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/task/{id}", get(get_task).put(update_task))
            .route("/task/{id}/comment", get(get_comments))
            .route("/task/{id}/time", get(get_task_time))
            .route("/list/{id}", get(get_list))
            .route("/list/{id}/task", get(get_list_tasks).post(create_task))
            .route("/space/{id}/folder", get(get_folders))
            .route("/space/{id}/list", get(get_folderless_lists))
            .route("/team/{id}/space", get(get_spaces))
            .route("/team/{id}/task", get(search_tasks))
            .route("/team/{id}/docs", get(search_docs))
            .route("/team/{id}/time_entries", get(get_team_time))
            .route("/doc/{id}", get(get_doc))
            .fallback(|| async { MockError::NotFound("Route not found") })
            .layer(middleware::from_fn_with_state(
                self.clone(),
                record_and_authorize,
            ))
            .layer(TraceLayer::new_for_http())
            .with_state(self.clone())
    }

    /// Every request received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.state.requests).clone()
    }

    /// Current tasks, including any created or updated through the API.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        lock(&self.state.fixtures).tasks.clone()
    }

    fn fixtures(&self) -> MutexGuard<'_, Fixtures> {
        lock(&self.state.fixtures)
    }
}

/// Serve `api` on an already bound listener until the process ends.
///
/// # Errors
/// Returns the I/O error that stopped the server.
pub async fn serve(listener: TcpListener, api: MockApi) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(address = %addr, "Starting mock ClickUp API");
    }
    axum::serve(listener, api.router()).await
}

/// A mock server running on a background thread.
pub struct MockServer {
    api: MockApi,
    addr: SocketAddr,
}

impl MockServer {
    /// Bind an ephemeral local port and serve `fixtures` from a background
    /// thread with its own runtime. Usable from synchronous tests.
    ///
    /// # Errors
    /// Returns an error if the port cannot be bound.
    pub fn spawn(fixtures: Fixtures) -> std::io::Result<Self> {
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?;
        listener.set_nonblocking(true)?;

        let api = MockApi::new(fixtures);
        let served = api.clone();
        std::thread::spawn(move || {
            let result = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .and_then(|rt| {
                    rt.block_on(async {
                        let listener = TcpListener::from_std(listener)?;
                        serve(listener, served).await
                    })
                });
            if let Err(err) = result {
                error!(error = %err, "Mock server stopped");
            }
        });

        Ok(Self { api, addr })
    }

    /// Base URL to hand to the client (no trailing slash).
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.api.requests()
    }

    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.api.tasks()
    }
}

// --- Middleware ---

async fn record_and_authorize(State(api): State<MockApi>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, usize::MAX).await.unwrap_or_default();

    let authorization = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let authorized = authorization.as_deref() == Some(api.fixtures().token.as_str());

    lock(&api.state.requests).push(RecordedRequest {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(str::to_string),
        authorization,
        body: serde_json::from_slice(&bytes).ok(),
    });

    if !authorized {
        return MockError::Unauthorized.into_response();
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

// --- Query helpers ---

type Params = Vec<(String, String)>;

fn values<'a>(params: &'a Params, key: &str) -> Vec<&'a str> {
    params
        .iter()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
        .collect()
}

fn flag(params: &Params, key: &str) -> bool {
    values(params, key).contains(&"true")
}

fn check_team(fixtures: &Fixtures, team_id: &str) -> Result<(), MockError> {
    if fixtures.team_id == team_id {
        Ok(())
    } else {
        Err(MockError::Unauthorized)
    }
}

/// Index of the task `id` refers to, honouring custom-task-ID mode.
fn find_task(fixtures: &Fixtures, id: &str, params: &Params) -> Result<usize, MockError> {
    let by_custom_id = flag(params, "custom_task_ids");
    if by_custom_id && values(params, "team_id") != [fixtures.team_id.as_str()] {
        return Err(MockError::BadRequest("Team ID required for custom task IDs"));
    }
    fixtures
        .tasks
        .iter()
        .position(|t| {
            if by_custom_id {
                t.custom_id.as_deref() == Some(id)
            } else {
                t.id == id
            }
        })
        .ok_or(MockError::NotFound("Task not found"))
}

fn with_subtasks(fixtures: &Fixtures, task: &Task, include: bool) -> Task {
    let mut task = task.clone();
    task.subtasks = if include {
        fixtures
            .tasks
            .iter()
            .filter(|t| t.parent.as_deref() == Some(task.id.as_str()))
            .cloned()
            .collect()
    } else {
        Vec::new()
    };
    task
}

// --- Handlers ---

async fn get_task(
    State(api): State<MockApi>,
    Path(id): Path<String>,
    Query(params): Query<Params>,
) -> Result<Json<Task>, MockError> {
    let fixtures = api.fixtures();
    let idx = find_task(&fixtures, &id, &params)?;
    let task = with_subtasks(&fixtures, &fixtures.tasks[idx], flag(&params, "include_subtasks"));
    Ok(Json(task))
}

async fn update_task(
    State(api): State<MockApi>,
    Path(id): Path<String>,
    Query(params): Query<Params>,
    Json(update): Json<TaskUpdate>,
) -> Result<Json<Task>, MockError> {
    let mut fixtures = api.fixtures();
    let idx = find_task(&fixtures, &id, &params)?;

    let task = &mut fixtures.tasks[idx];
    if let Some(name) = update.name {
        task.name = name;
    }
    if let Some(description) = update.markdown_description {
        task.description = description;
    }
    if let Some(status) = update.status {
        task.status = Status::new(status, "custom");
    }

    Ok(Json(task.clone()))
}

#[derive(Debug, Deserialize)]
struct CreateTaskRequest {
    name: String,
    #[serde(default)]
    parent: Option<String>,
    #[serde(default)]
    markdown_description: Option<String>,
}

async fn create_task(
    State(api): State<MockApi>,
    Path(list_id): Path<String>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<Json<Task>, MockError> {
    let mut fixtures = api.fixtures();

    let list = fixtures
        .lists
        .iter()
        .find(|l| l.id == list_id)
        .ok_or(MockError::NotFound("List not found"))?;
    let list_ref = fixtures::list_ref(list);
    let space = list.space.clone();

    if let Some(parent) = &req.parent
        && !fixtures.tasks.iter().any(|t| &t.id == parent)
    {
        return Err(MockError::BadRequest("Parent not child of list"));
    }

    let id = uuid::Uuid::new_v4().simple().to_string()[..9].to_string();
    let mut task = Task::new(id.clone(), req.name).with_status("to do");
    task.list = list_ref;
    task.space = space;
    task.parent = req.parent;
    task.description = req.markdown_description.unwrap_or_default();
    task.url = format!("https://app.clickup.com/t/{id}");

    fixtures.tasks.push(task.clone());
    info!(task = %id, list = %list_id, "Created task");

    Ok(Json(task))
}

async fn get_list(
    State(api): State<MockApi>,
    Path(id): Path<String>,
) -> Result<Json<ListInfo>, MockError> {
    api.fixtures()
        .lists
        .iter()
        .find(|l| l.id == id)
        .cloned()
        .map(Json)
        .ok_or(MockError::NotFound("List not found"))
}

async fn get_list_tasks(
    State(api): State<MockApi>,
    Path(id): Path<String>,
    Query(params): Query<Params>,
) -> Result<Json<TasksResponse>, MockError> {
    let fixtures = api.fixtures();
    if !fixtures.lists.iter().any(|l| l.id == id) {
        return Err(MockError::NotFound("List not found"));
    }

    let assignees = values(&params, "assignees[]");
    let tasks = fixtures
        .tasks
        .iter()
        .filter(|t| t.list.id == id && t.parent.is_none())
        .filter(|t| {
            assignees.is_empty()
                || t
                    .assignees
                    .iter()
                    .any(|u| assignees.contains(&u.id.to_string().as_str()))
        })
        .cloned()
        .collect();

    Ok(Json(TasksResponse { tasks }))
}

async fn get_folders(
    State(api): State<MockApi>,
    Path(id): Path<String>,
) -> Json<FoldersResponse> {
    let folders = api.fixtures().folders.get(&id).cloned().unwrap_or_default();
    Json(FoldersResponse { folders })
}

async fn get_folderless_lists(
    State(api): State<MockApi>,
    Path(id): Path<String>,
) -> Json<ListsResponse> {
    let lists = api
        .fixtures()
        .folderless_lists
        .get(&id)
        .cloned()
        .unwrap_or_default();
    Json(ListsResponse { lists })
}

async fn get_spaces(
    State(api): State<MockApi>,
    Path(team_id): Path<String>,
) -> Result<Json<SpacesResponse>, MockError> {
    let fixtures = api.fixtures();
    check_team(&fixtures, &team_id)?;
    Ok(Json(SpacesResponse {
        spaces: fixtures.spaces.clone(),
    }))
}

async fn search_tasks(
    State(api): State<MockApi>,
    Path(team_id): Path<String>,
    Query(params): Query<Params>,
) -> Result<Json<TasksResponse>, MockError> {
    let fixtures = api.fixtures();
    check_team(&fixtures, &team_id)?;

    let lists = values(&params, "list_ids[]");
    let spaces = values(&params, "space_ids[]");
    let assignees = values(&params, "assignees[]");
    let statuses: Vec<String> = values(&params, "statuses[]")
        .into_iter()
        .map(str::to_lowercase)
        .collect();

    let tasks = fixtures
        .tasks
        .iter()
        .filter(|t| t.parent.is_none())
        .filter(|t| lists.is_empty() || lists.contains(&t.list.id.as_str()))
        .filter(|t| spaces.is_empty() || spaces.contains(&t.space.id.as_str()))
        .filter(|t| {
            assignees.is_empty()
                || t
                    .assignees
                    .iter()
                    .any(|u| assignees.contains(&u.id.to_string().as_str()))
        })
        .filter(|t| statuses.is_empty() || statuses.contains(&t.status.status.to_lowercase()))
        .cloned()
        .collect();

    Ok(Json(TasksResponse { tasks }))
}

async fn search_docs(
    State(api): State<MockApi>,
    Path(team_id): Path<String>,
    Query(params): Query<Params>,
) -> Result<Json<DocsResponse>, MockError> {
    let fixtures = api.fixtures();
    check_team(&fixtures, &team_id)?;

    let query = values(&params, "query")
        .first()
        .map(|q| q.to_lowercase())
        .unwrap_or_default();
    let docs: Vec<Document> = fixtures
        .docs
        .iter()
        .filter(|d| d.name.to_lowercase().contains(&query))
        .cloned()
        .collect();

    Ok(Json(DocsResponse { docs }))
}

async fn get_doc(
    State(api): State<MockApi>,
    Path(id): Path<String>,
) -> Result<Json<Document>, MockError> {
    api.fixtures()
        .docs
        .iter()
        .find(|d| d.id == id)
        .cloned()
        .map(Json)
        .ok_or(MockError::NotFound("Doc not found"))
}

async fn get_comments(
    State(api): State<MockApi>,
    Path(id): Path<String>,
) -> Result<Json<CommentsResponse>, MockError> {
    let fixtures = api.fixtures();
    if !fixtures.tasks.iter().any(|t| t.id == id) {
        return Err(MockError::NotFound("Task not found"));
    }
    let comments = fixtures.comments.get(&id).cloned().unwrap_or_default();
    Ok(Json(CommentsResponse { comments }))
}

async fn get_task_time(
    State(api): State<MockApi>,
    Path(id): Path<String>,
) -> Result<Json<TimeEntriesResponse>, MockError> {
    let fixtures = api.fixtures();
    if !fixtures.tasks.iter().any(|t| t.id == id) {
        return Err(MockError::NotFound("Task not found"));
    }
    let data = fixtures.task_time.get(&id).cloned().unwrap_or_default();
    Ok(Json(TimeEntriesResponse { data }))
}

async fn get_team_time(
    State(api): State<MockApi>,
    Path(team_id): Path<String>,
) -> Result<Json<TimeEntriesResponse>, MockError> {
    let fixtures = api.fixtures();
    check_team(&fixtures, &team_id)?;
    Ok(Json(TimeEntriesResponse {
        data: fixtures.team_time.clone(),
    }))
}

// --- Error handling ---

/// Errors rendered the way ClickUp does: `{"err": ..., "ECODE": ...}`.
#[derive(Debug)]
enum MockError {
    Unauthorized,
    NotFound(&'static str),
    BadRequest(&'static str),
}

impl IntoResponse for MockError {
    fn into_response(self) -> Response {
        let (status, err, code) = match self {
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "Token invalid", "OAUTH_025"),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg, "ITEM_013"),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, "INPUT_005"),
        };
        (status, Json(json!({ "err": err, "ECODE": code }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{self, Request};
    use http_body_util::BodyExt;
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header(AUTHORIZATION, "pk_demo")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn rejects_missing_token() {
        let api = MockApi::new(Fixtures::demo());
        let resp = api
            .router()
            .oneshot(Request::builder().uri("/task/t1").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = body_json(resp).await;
        assert_eq!(body["ECODE"], "OAUTH_025");
        assert_eq!(api.requests().len(), 1);
        assert_eq!(api.requests()[0].authorization, None);
    }

    #[tokio::test]
    async fn get_task_by_custom_id_with_subtasks() {
        let api = MockApi::new(Fixtures::demo());
        let resp = api
            .router()
            .oneshot(get(
                "/task/DEV-1?custom_task_ids=true&team_id=9001&include_subtasks=true",
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let task: Task = body_json(resp).await;
        assert_eq!(task.id, "t1");
        let subtask_ids: Vec<&str> = task.subtasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(subtask_ids, vec!["t2", "t3"]);
    }

    #[tokio::test]
    async fn custom_id_mode_requires_team() {
        let api = MockApi::new(Fixtures::demo());
        let resp = api
            .router()
            .oneshot(get("/task/DEV-1?custom_task_ids=true"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_task_is_404() {
        let api = MockApi::new(Fixtures::demo());
        let resp = api.router().oneshot(get("/task/nope")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_tasks_filters_by_assignee_array() {
        let api = MockApi::new(Fixtures::demo());
        let resp = api
            .router()
            .oneshot(get("/list/l2/task?assignees%5B%5D=102&assignees%5B%5D=999"))
            .await
            .unwrap();

        let tasks: TasksResponse = body_json(resp).await;
        assert_eq!(tasks.tasks.len(), 1);
        assert_eq!(tasks.tasks[0].id, "t4");
    }

    #[tokio::test]
    async fn update_task_applies_fields() {
        let api = MockApi::new(Fixtures::demo());
        let resp = api
            .router()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/task/t4")
                    .header(AUTHORIZATION, "pk_demo")
                    .header(http::header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"status":"done"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let task: Task = body_json(resp).await;
        assert_eq!(task.status.status, "done");
        assert_eq!(task.name, "Fix flaky login test");
        assert_eq!(api.requests()[0].body, Some(json!({"status": "done"})));
    }

    #[tokio::test]
    async fn team_endpoints_check_team() {
        let api = MockApi::new(Fixtures::demo());
        let resp = api.router().oneshot(get("/team/1/space")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = api.router().oneshot(get("/team/9001/space")).await.unwrap();
        let spaces: SpacesResponse = body_json(resp).await;
        assert_eq!(spaces.spaces.len(), 2);
    }
}
