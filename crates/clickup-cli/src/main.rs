//! clickup CLI - ClickUp tasks, lists, spaces and docs from the command line.

mod commands;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clickup_api::{ClickUpClient, Config};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "clickup")]
#[command(author, version, about = "ClickUp API from the command line")]
#[command(propagate_version = true)]
struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    format: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get, search, update and create tasks
    #[command(subcommand)]
    Task(TaskCommands),

    /// Inspect lists
    #[command(subcommand)]
    List(ListCommands),

    /// Find spaces and show their folders and lists
    #[command(subcommand)]
    Space(SpaceCommands),

    /// Read and search documents
    #[command(subcommand)]
    Doc(DocCommands),

    /// Read task comments
    #[command(subcommand)]
    Comment(CommentCommands),

    /// Read time tracking entries
    #[command(subcommand)]
    Time(TimeCommands),
}

#[derive(Subcommand)]
enum TaskCommands {
    /// Get a task by ID
    Get {
        /// Task ID (or custom ID with --custom)
        id: String,

        /// Treat the ID as a custom task ID
        #[arg(long, short = 'c')]
        custom: bool,

        /// Include subtasks
        #[arg(long, short = 's')]
        subtasks: bool,
    },

    /// Search tasks across the workspace
    Search {
        /// Text matched against task names and descriptions
        query: Vec<String>,

        /// Filter by list ID (can be specified multiple times)
        #[arg(long, short = 'l')]
        list: Vec<String>,

        /// Filter by space ID (can be specified multiple times)
        #[arg(long, short = 'S')]
        space: Vec<String>,

        /// Filter by assignee user ID (can be specified multiple times)
        #[arg(long, short = 'a')]
        assignee: Vec<String>,

        /// Filter by status (can be specified multiple times)
        #[arg(long, short = 's')]
        status: Vec<String>,
    },

    /// Update a task's title, description or status
    Update {
        /// Task ID (or custom ID with --custom)
        id: String,

        /// Treat the ID as a custom task ID
        #[arg(long, short = 'c')]
        custom: bool,

        /// New title
        #[arg(long, short = 't')]
        title: Option<String>,

        /// New description (markdown)
        #[arg(long, short = 'd')]
        description: Option<String>,

        /// New status
        #[arg(long, short = 's')]
        status: Option<String>,
    },

    /// Create a subtask under a parent task
    Subtask {
        /// Parent task ID (or custom ID with --custom)
        parent: String,

        /// Subtask name
        name: String,

        /// Treat the parent ID as a custom task ID
        #[arg(long, short = 'c')]
        custom: bool,

        /// Description (markdown)
        #[arg(long, short = 'd')]
        description: Option<String>,

        /// List to create the subtask in (defaults to the parent's list)
        #[arg(long, short = 'l')]
        list: Option<String>,
    },

    /// Show a task's dependencies and linked tasks
    Rels {
        /// Task ID (or custom ID with --custom)
        id: String,

        /// Treat the ID as a custom task ID
        #[arg(long, short = 'c')]
        custom: bool,
    },
}

#[derive(Subcommand)]
enum ListCommands {
    /// Show list details
    Info {
        /// List ID
        id: String,
    },

    /// Get all tasks in a list
    Tasks {
        /// List ID
        id: String,

        /// Include archived tasks
        #[arg(long, short = 'a')]
        archived: bool,

        /// Comma-separated assignee user IDs
        #[arg(long = "assignees", short = 'A')]
        assignees: Option<String>,
    },
}

#[derive(Subcommand)]
enum SpaceCommands {
    /// Search spaces by name
    Search {
        /// Text matched against space names
        query: Vec<String>,
    },

    /// Show the folders and lists of a space
    Structure {
        /// Space ID
        id: String,
    },
}

#[derive(Subcommand)]
enum DocCommands {
    /// Read a document
    Read {
        /// Document ID
        id: String,
    },

    /// Search documents in the workspace
    Search {
        /// Search query
        query: Vec<String>,
    },
}

#[derive(Subcommand)]
enum CommentCommands {
    /// Get the comments of a task
    Get {
        /// Task ID
        task_id: String,
    },
}

#[derive(Subcommand)]
enum TimeCommands {
    /// Get time entries for a task, or for the whole team
    Get {
        /// Task ID (omit for team entries)
        task_id: Option<String>,

        /// Team ID (defaults to CLICKUP_TEAM_ID)
        #[arg(long, short = 't')]
        team: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = Config::from_env().context("configuration error")?;
    let client = ClickUpClient::new(config);
    let format = cli.format;

    match cli.command {
        Commands::Task(cmd) => match cmd {
            TaskCommands::Get {
                id,
                custom,
                subtasks,
            } => commands::task_get(&client, &id, custom, subtasks, format),
            TaskCommands::Search {
                query,
                list,
                space,
                assignee,
                status,
            } => {
                let filters = commands::SearchFilters {
                    lists: list,
                    spaces: space,
                    assignees: assignee,
                    statuses: status,
                };
                commands::task_search(&client, &query.join(" "), filters, format)
            }
            TaskCommands::Update {
                id,
                custom,
                title,
                description,
                status,
            } => commands::task_update(&client, &id, custom, title, description, status, format),
            TaskCommands::Subtask {
                parent,
                name,
                custom,
                description,
                list,
            } => commands::task_subtask(
                &client,
                &parent,
                &name,
                custom,
                description,
                list.as_deref(),
                format,
            ),
            TaskCommands::Rels { id, custom } => commands::task_rels(&client, &id, custom, format),
        },
        Commands::List(cmd) => match cmd {
            ListCommands::Info { id } => commands::list_info(&client, &id, format),
            ListCommands::Tasks {
                id,
                archived,
                assignees,
            } => commands::list_tasks(&client, &id, archived, assignees.as_deref(), format),
        },
        Commands::Space(cmd) => match cmd {
            SpaceCommands::Search { query } => {
                commands::space_search(&client, &query.join(" "), format)
            }
            SpaceCommands::Structure { id } => commands::space_structure(&client, &id, format),
        },
        Commands::Doc(cmd) => match cmd {
            DocCommands::Read { id } => commands::doc_read(&client, &id, format),
            DocCommands::Search { query } => commands::doc_search(&client, &query.join(" "), format),
        },
        Commands::Comment(CommentCommands::Get { task_id }) => {
            commands::comment_get(&client, &task_id, format)
        }
        Commands::Time(TimeCommands::Get { task_id, team }) => {
            commands::time_get(&client, task_id.as_deref(), team.as_deref(), format)
        }
    }
}
