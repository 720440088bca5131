//! Data served by the mock API.

use clickup_core::{
    Comment, Dependency, Document, Folder, FolderRef, ListInfo, ListRef, Priority, Space, SpaceRef,
    Status, Tag, Task, TimeEntry, User,
};
use std::collections::HashMap;

/// Everything the mock API knows about, keyed the way the endpoints look it up.
#[derive(Debug, Clone, Default)]
pub struct Fixtures {
    /// Value the `Authorization` header must carry.
    pub token: String,
    /// The only team ID team-scoped endpoints accept.
    pub team_id: String,
    /// All tasks, subtasks included (they carry `parent`).
    pub tasks: Vec<Task>,
    /// All lists, for `/list/{id}`.
    pub lists: Vec<ListInfo>,
    /// Space ID → folders with their lists.
    pub folders: HashMap<String, Vec<Folder>>,
    /// Space ID → lists that sit directly in the space.
    pub folderless_lists: HashMap<String, Vec<ListInfo>>,
    pub spaces: Vec<Space>,
    /// Task ID → comments.
    pub comments: HashMap<String, Vec<Comment>>,
    /// Task ID → time entries.
    pub task_time: HashMap<String, Vec<TimeEntry>>,
    /// Time entries returned for the team.
    pub team_time: Vec<TimeEntry>,
    pub docs: Vec<Document>,
}

impl Fixtures {
    /// Empty fixtures accepting `token` for `team_id`.
    #[must_use]
    pub fn new(token: impl Into<String>, team_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            team_id: team_id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    #[must_use]
    pub fn with_tasks(mut self, tasks: impl IntoIterator<Item = Task>) -> Self {
        self.tasks.extend(tasks);
        self
    }

    /// Register a space's folders and folderless lists; every list also
    /// becomes reachable through `/list/{id}`.
    #[must_use]
    pub fn with_space_layout(
        mut self,
        space_id: &str,
        folders: Vec<Folder>,
        folderless: Vec<ListInfo>,
    ) -> Self {
        for folder in &folders {
            self.lists.extend(folder.lists.iter().cloned());
        }
        self.lists.extend(folderless.iter().cloned());
        self.folders.insert(space_id.to_string(), folders);
        self.folderless_lists.insert(space_id.to_string(), folderless);
        self
    }

    /// A small but complete workspace: one space with a folder of two lists
    /// and one folderless list, an epic with two subtasks and a dependency,
    /// comments, time entries and documents.
    #[must_use]
    pub fn demo() -> Self {
        let alice = User::new(101, "alice");
        let bob = User::new(102, "bob");
        let engineering = SpaceRef {
            id: "sp1".to_string(),
            name: "Engineering".to_string(),
        };

        let mut epic = Task::new("t1", "Login revamp")
            .with_custom_id("DEV-1")
            .with_status("in progress")
            .with_description("Replace the legacy login flow with SSO.")
            .with_assignees([alice.clone()])
            .in_list("l1", "Backlog");
        epic.priority = Some(Priority {
            priority: "high".to_string(),
        });
        epic.creator = bob.clone();
        epic.watchers = vec![bob.clone()];
        epic.tags = vec![Tag {
            name: "auth".to_string(),
        }];
        epic.space = engineering.clone();
        epic.date_created = "1700000000000".to_string();
        epic.due_date = Some("1702592000000".to_string());
        epic.time_estimate = Some(28_800_000);
        epic.time_spent = Some(5_400_000);
        epic.url = "https://app.clickup.com/t/t1".to_string();
        epic.dependencies = vec![Dependency {
            task_id: "t1".to_string(),
            depends_on: "t4".to_string(),
            kind: 1,
            date_created: "1700000500000".to_string(),
            user_id: "102".to_string(),
        }];

        let subtask = |id: &str, custom: &str, name: &str, status: &str, who: &User| {
            let mut task = Task::new(id, name)
                .with_custom_id(custom)
                .with_status(status)
                .with_assignees([who.clone()])
                .in_list("l1", "Backlog");
            task.parent = Some("t1".to_string());
            task.space = engineering.clone();
            task.url = format!("https://app.clickup.com/t/{id}");
            task
        };

        let mut flaky = Task::new("t4", "Fix flaky login test")
            .with_custom_id("DEV-4")
            .with_status("to do")
            .with_assignees([bob.clone()])
            .in_list("l2", "Sprint 12");
        flaky.space = engineering.clone();
        flaky.url = "https://app.clickup.com/t/t4".to_string();

        let mut notes = Task::new("t5", "Write release notes")
            .with_status("to do")
            .in_list("l3", "Inbox");
        notes.space = engineering.clone();
        notes.url = "https://app.clickup.com/t/t5".to_string();

        let mut backlog = ListInfo::new("l1", "Backlog", 3);
        backlog.space = engineering.clone();
        backlog.folder = FolderRef {
            id: "f1".to_string(),
            name: "Core".to_string(),
        };
        backlog.permission_level = "create".to_string();
        backlog.due_date_time = true;
        backlog.time_tracking = true;
        backlog.statuses = vec![
            Status::new("to do", "open"),
            Status::new("in progress", "custom"),
            Status::new("done", "closed"),
        ];

        let mut sprint = ListInfo::new("l2", "Sprint 12", 1);
        sprint.space = engineering.clone();
        sprint.folder = backlog.folder.clone();

        let mut inbox = ListInfo::new("l3", "Inbox", 1);
        inbox.space = engineering.clone();
        inbox.status = Some(Status::new("active", "custom"));

        let core = Folder {
            id: "f1".to_string(),
            name: "Core".to_string(),
            hidden: false,
            lists: vec![backlog, sprint],
        };

        let mut fixtures = Self::new("pk_demo", "9001")
            .with_tasks([
                epic,
                subtask("t2", "DEV-2", "Design SSO screens", "done", &alice),
                subtask("t3", "DEV-3", "Wire SSO callback", "to do", &bob),
                flaky,
                notes,
            ])
            .with_space_layout("sp1", vec![core], vec![inbox]);

        fixtures.spaces = vec![
            Space {
                id: "sp1".to_string(),
                name: "Engineering".to_string(),
                private: true,
                statuses: vec![Status::new("to do", "open"), Status::new("done", "closed")],
            },
            Space {
                id: "sp2".to_string(),
                name: "Marketing".to_string(),
                private: false,
                statuses: vec![Status::new("open", "open")],
            },
        ];

        fixtures.comments.insert(
            "t1".to_string(),
            vec![
                Comment {
                    id: "c1".to_string(),
                    comment_text: "Kicking this off next sprint.".to_string(),
                    user: bob.clone(),
                    date: "1700000600000".to_string(),
                },
                Comment {
                    id: "c2".to_string(),
                    comment_text: "SSO provider confirmed.".to_string(),
                    user: alice.clone(),
                    date: "1700000700000".to_string(),
                },
            ],
        );

        let entry = |id: &str, who: &User, ms: i64, description: &str| TimeEntry {
            id: id.to_string(),
            user: who.clone(),
            duration: ms.to_string(),
            start: "1700001000000".to_string(),
            description: description.to_string(),
        };
        fixtures
            .task_time
            .insert("t1".to_string(), vec![entry("te1", &alice, 5_400_000, "spike")]);
        fixtures.team_time = vec![
            entry("te1", &alice, 5_400_000, "spike"),
            entry("te2", &bob, 1_800_000, ""),
        ];

        fixtures.docs = vec![
            Document {
                id: "d1".to_string(),
                name: "Onboarding guide".to_string(),
                content: "# Welcome\nStart with the README.".to_string(),
                date_created: "1700000000000".to_string(),
                creator: alice,
            },
            Document {
                id: "d2".to_string(),
                name: "Login runbook".to_string(),
                content: String::new(),
                date_created: "1700000100000".to_string(),
                creator: bob,
            },
        ];

        fixtures
    }
}

/// A reference to `list`, as embedded in a task.
#[must_use]
pub fn list_ref(list: &ListInfo) -> ListRef {
    ListRef {
        id: list.id.clone(),
        name: list.name.clone(),
    }
}
