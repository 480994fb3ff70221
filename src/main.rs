//! bizman: command-line client for the Business Manager API.
//!
//! ```sh
//! bizman register --username ivan --email ivan@example.com --role manager
//! bizman login --username ivan          # password from BIZMAN_PASSWORD
//! bizman dashboard --tab tasks
//! bizman logout
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tracing::{error, info};

use bizman::api::ApiClient;
use bizman::app::App;
use bizman::auth::form::{AuthForm, MSG_GENERIC};
use bizman::auth::session::{Session, SessionStore};
use bizman::config::Config;
use bizman::errors::AuthError;
use bizman::dashboard::{LoadOutcome, Tab, render};
use bizman::model::{Role, timestamp};
use bizman::models::{ListQuery, NewProject, NewTask};
use bizman::storage::FileStore;
use bizman::utils::{cancel, logging};

#[derive(Parser, Debug)]
#[command(
    name = "bizman",
    version,
    about = "Client for the Business Manager project/task service"
)]
struct Cli {
    /// Base URL of the Business Manager API.
    #[arg(long, global = true, env = "BIZMAN_API_URL")]
    base_url: Option<String>,

    /// Where the session (token and user) is kept between runs.
    #[arg(long, global = true, env = "BIZMAN_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and store the session.
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "BIZMAN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Create an account, then log in with it.
    Register {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        email: Option<String>,
        #[arg(long)]
        full_name: Option<String>,
        /// engineer, manager or director
        #[arg(short, long, default_value = "engineer")]
        role: Role,
        #[arg(short, long, env = "BIZMAN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        #[arg(long, env = "BIZMAN_CONFIRM_PASSWORD", hide_env_values = true)]
        confirm_password: Option<String>,
    },
    /// Forget the stored session.
    Logout,
    /// Show the logged-in user as the service sees it.
    Whoami,
    /// Show the dashboard for the logged-in user's role.
    Dashboard {
        /// projects, tasks or overview (defaults to the role's own view)
        #[arg(short, long)]
        tab: Option<Tab>,
    },
    /// List or create projects.
    Projects {
        #[command(subcommand)]
        action: ProjectsCmd,
    },
    /// List or create tasks.
    Tasks {
        #[command(subcommand)]
        action: TasksCmd,
    },
    /// Describe the available roles.
    Roles,
}

#[derive(Subcommand, Debug)]
enum ProjectsCmd {
    List {
        #[arg(long)]
        skip: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    Create {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long, default_value = "active")]
        status: String,
    },
}

#[derive(Subcommand, Debug)]
enum TasksCmd {
    List {
        #[arg(long)]
        skip: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    Create {
        #[arg(short, long)]
        title: String,
        #[arg(long)]
        project_id: u64,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long, default_value = "todo")]
        status: String,
        #[arg(long, default_value = "medium")]
        priority: String,
        #[arg(long)]
        assigned_to: Option<u64>,
        /// e.g. 2024-06-30T18:00:00
        #[arg(long, value_parser = parse_due_date)]
        due_date: Option<NaiveDateTime>,
    },
}

fn parse_due_date(raw: &str) -> Result<NaiveDateTime, String> {
    timestamp::parse(raw).ok_or_else(|| format!("not a timestamp: {raw}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    let config = Config::from_env().with_overrides(cli.base_url, cli.session_file);
    let _guard = logging::init(&config.log_dir, &config.log_level);
    info!(api_url = %config.api_url, session_file = %config.session_file.display(), "bizman starting");

    let api = ApiClient::new(config.api_url.as_str());
    let store = SessionStore::new(Arc::new(FileStore::new(&config.session_file)));
    let mut app = App::restore(store);

    let result = run(cli.command, &mut app, &api).await;
    if let Err(e) = &result {
        error!(error = %e, "Command failed");
    }
    result
}

async fn run(command: Command, app: &mut App, api: &ApiClient) -> Result<()> {
    match command {
        Command::Login { username, password } => {
            let mut form = AuthForm::new();
            let f = form.fields_mut();
            f.username = username;
            f.password = password.unwrap_or_default();
            submit(app, &mut form, api).await
        }
        Command::Register {
            username,
            email,
            full_name,
            role,
            password,
            confirm_password,
        } => {
            let mut form = AuthForm::register();
            let f = form.fields_mut();
            f.username = username;
            f.email = email.unwrap_or_default();
            f.full_name = full_name.unwrap_or_default();
            f.role = role;
            f.password = password.unwrap_or_default();
            f.confirm_password = confirm_password.unwrap_or_default();
            submit(app, &mut form, api).await
        }
        Command::Logout => {
            app.handle_logout().context("failed to clear the stored session")?;
            println!("Logged out");
            Ok(())
        }
        Command::Whoami => {
            require_session(app)?;
            if !app.verify_session(api).await? {
                bail!("Session expired, please log in again");
            }
            let user = app.user().ok_or_else(|| anyhow!("Not logged in"))?;
            print!("{}", render::header(user));
            Ok(())
        }
        Command::Dashboard { tab } => {
            require_session(app)?;
            let mut dash = app.dashboard().ok_or_else(|| anyhow!("Not logged in"))?;
            if let Some(tab) = tab {
                dash.select_tab(tab);
            }

            tokio::spawn(cancel::cancel_on_ctrl_c(dash.cancel_signal()));
            if dash.load(api).await == LoadOutcome::Cancelled {
                eprintln!("Cancelled");
                return Ok(());
            }
            print!("{}", render::dashboard(&dash));
            Ok(())
        }
        Command::Projects { action } => {
            let session = require_session(app)?;
            match action {
                ProjectsCmd::List { skip, limit } => {
                    let projects = api
                        .get_projects(&session.token, ListQuery { skip, limit })
                        .await?;
                    for project in &projects {
                        print!("{}", render::project(project));
                    }
                }
                ProjectsCmd::Create {
                    name,
                    description,
                    status,
                } => {
                    let mut new = NewProject::new(name);
                    new.description = description;
                    new.status = status;
                    let created = api.create_project(&session.token, &new).await?;
                    print!("Created project\n{}", render::project(&created));
                }
            }
            Ok(())
        }
        Command::Tasks { action } => {
            let session = require_session(app)?;
            match action {
                TasksCmd::List { skip, limit } => {
                    let tasks = api
                        .get_tasks(&session.token, ListQuery { skip, limit })
                        .await?;
                    for task in &tasks {
                        print!("{}", render::task(task));
                    }
                }
                TasksCmd::Create {
                    title,
                    project_id,
                    description,
                    status,
                    priority,
                    assigned_to,
                    due_date,
                } => {
                    let mut new = NewTask::new(title, project_id);
                    new.description = description;
                    new.status = status;
                    new.priority = priority;
                    new.assigned_to = assigned_to;
                    new.due_date = due_date;
                    let created = api.create_task(&session.token, &new).await?;
                    print!("Created task\n{}", render::task(&created));
                }
            }
            Ok(())
        }
        Command::Roles => {
            print!("{}", render::roles());
            Ok(())
        }
    }
}

async fn submit(app: &mut App, form: &mut AuthForm, api: &ApiClient) -> Result<()> {
    if let Err(e) = app.submit_form(form, api).await {
        return Err(submit_error(form, e));
    }
    let user = app.user().ok_or_else(|| anyhow!("Not logged in"))?;
    println!("Logged in as {} ({})", user.display_name(), user.role_label());
    Ok(())
}

/// Form failures print the form's inline message. A session that could not
/// be stored keeps its underlying cause.
fn submit_error(form: &AuthForm, err: AuthError) -> anyhow::Error {
    match err {
        AuthError::Store(e) => anyhow::Error::new(e).context("failed to store the session"),
        _ => anyhow!("{}", form.error().unwrap_or(MSG_GENERIC)),
    }
}

fn require_session(app: &App) -> Result<Session> {
    app.session().ok_or_else(|| anyhow!("Not logged in"))
}
