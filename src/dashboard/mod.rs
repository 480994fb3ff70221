//! Role-conditioned dashboard.
//!
//! Both lists are fetched concurrently and committed together; a failed fetch
//! is logged and leaves the lists untouched. The visible section follows the
//! selected tab, and each role starts on its own tab: engineers on their
//! tasks, managers on projects, directors on the overview.

pub mod render;

use strum_macros::{Display, EnumIter, EnumString};
use tracing::{debug, error, info, instrument};

use crate::api::WorkspaceApi;
use crate::auth::session::Session;
use crate::model::{Project, Role, Task, UserRecord};
use crate::utils::cancel::CancelSignal;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Tab {
    Projects,
    Tasks,
    Overview,
}

impl Tab {
    pub fn default_for(role: Role) -> Self {
        match role {
            Role::Engineer => Tab::Tasks,
            Role::Manager => Tab::Projects,
            Role::Director => Tab::Overview,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Projects => "Projects",
            Tab::Tasks => "Tasks",
            Tab::Overview => "Overview",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed,
    Cancelled,
}

/// What the content area shows.
#[derive(Debug, PartialEq)]
pub enum DashboardView<'a> {
    Loading,
    /// `own_only` is set when the list was narrowed to the current user's tasks.
    Tasks { tasks: Vec<&'a Task>, own_only: bool },
    Projects(&'a [Project]),
    Overview {
        projects: usize,
        tasks: usize,
        /// Not provided by the service yet.
        active_users: Option<usize>,
    },
    UnknownRole,
}

pub struct Dashboard {
    session: Session,
    projects: Vec<Project>,
    tasks: Vec<Task>,
    loading: bool,
    selected_tab: Option<Tab>,
    cancel: CancelSignal,
}

impl Dashboard {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            projects: Vec::new(),
            tasks: Vec::new(),
            loading: true,
            selected_tab: None,
            cancel: CancelSignal::new(),
        }
    }

    pub fn user(&self) -> &UserRecord {
        &self.session.user
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Handle that aborts an in-flight [`load`](Self::load) when fired.
    pub fn cancel_signal(&self) -> CancelSignal {
        self.cancel.clone()
    }

    /// Cancels outstanding requests. Call when the dashboard goes away.
    pub fn teardown(&self) {
        self.cancel.cancel();
    }

    #[instrument(name = "dashboard_load", skip_all, fields(user_id = self.session.user.id))]
    pub async fn load<A>(&mut self, api: &A) -> LoadOutcome
    where
        A: WorkspaceApi + ?Sized,
    {
        let token = self.session.token.clone();
        let fetch = async { futures::try_join!(api.projects(&token), api.tasks(&token)) };
        let result = self.cancel.run(fetch).await;

        match result {
            None => {
                debug!("Dashboard load cancelled, nothing committed");
                LoadOutcome::Cancelled
            }
            Some(Ok((projects, tasks))) => {
                info!(
                    projects = projects.len(),
                    tasks = tasks.len(),
                    "Dashboard data loaded"
                );
                self.projects = projects;
                self.tasks = tasks;
                self.loading = false;
                LoadOutcome::Loaded
            }
            Some(Err(e)) => {
                error!(error = %e, "Error loading dashboard data");
                self.loading = false;
                LoadOutcome::Failed
            }
        }
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.selected_tab = Some(tab);
    }

    /// The selected tab, else the role's default. `None` for an unknown role
    /// that has not picked a tab.
    pub fn active_tab(&self) -> Option<Tab> {
        self.selected_tab
            .or_else(|| self.session.user.role().map(Tab::default_for))
    }

    pub fn view(&self) -> DashboardView<'_> {
        if self.loading {
            return DashboardView::Loading;
        }

        let (Some(role), Some(tab)) = (self.session.user.role(), self.active_tab()) else {
            return DashboardView::UnknownRole;
        };

        match tab {
            Tab::Projects => DashboardView::Projects(&self.projects),
            Tab::Tasks if role == Role::Engineer => DashboardView::Tasks {
                tasks: self.own_tasks(),
                own_only: true,
            },
            Tab::Tasks => DashboardView::Tasks {
                tasks: self.tasks.iter().collect(),
                own_only: false,
            },
            Tab::Overview => DashboardView::Overview {
                projects: self.projects.len(),
                tasks: self.tasks.len(),
                active_users: None,
            },
        }
    }

    fn own_tasks(&self) -> Vec<&Task> {
        let me = self.session.user.id;
        self.tasks.iter().filter(|t| t.is_assigned_to(me)).collect()
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ApiError;
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn session(role: u8, id: u64) -> Session {
        session_with_raw_role(json!(role), id)
    }

    fn session_with_raw_role(role: serde_json::Value, id: u64) -> Session {
        Session {
            token: "tok".into(),
            user: serde_json::from_value(json!({
                "id": id,
                "username": "u",
                "email": "u@example.com",
                "role": role
            }))
            .unwrap(),
        }
    }

    fn project(id: u64) -> Project {
        serde_json::from_value(json!({
            "id": id,
            "name": format!("P{id}"),
            "description": "d",
            "status": "active"
        }))
        .unwrap()
    }

    fn task(id: u64, assigned_to: Option<u64>) -> Task {
        serde_json::from_value(json!({
            "id": id,
            "title": format!("T{id}"),
            "description": "d",
            "status": "todo",
            "priority": "medium",
            "assigned_to": assigned_to
        }))
        .unwrap()
    }

    struct FakeWorkspace {
        projects: Vec<Project>,
        tasks: Vec<Task>,
        fail_tasks: bool,
        hang: bool,
        calls: AtomicUsize,
    }

    impl FakeWorkspace {
        fn new(projects: Vec<Project>, tasks: Vec<Task>) -> Self {
            Self {
                projects,
                tasks,
                fail_tasks: false,
                hang: false,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl WorkspaceApi for FakeWorkspace {
        async fn projects(&self, token: &str) -> Result<Vec<Project>, ApiError> {
            assert_eq!(token, "tok");
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.projects.clone())
        }

        async fn tasks(&self, _token: &str) -> Result<Vec<Task>, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.hang {
                std::future::pending::<()>().await;
            }
            if self.fail_tasks {
                return Err(ApiError::status_fallback(StatusCode::INTERNAL_SERVER_ERROR));
            }
            Ok(self.tasks.clone())
        }
    }

    #[test]
    fn loading_until_fetched() {
        let dash = Dashboard::new(session(1, 1));
        assert!(dash.is_loading());
        assert_eq!(dash.view(), DashboardView::Loading);
    }

    #[tokio::test]
    async fn engineer_sees_exactly_own_tasks() {
        let api = FakeWorkspace::new(
            vec![project(1)],
            vec![task(1, Some(7)), task(2, Some(8)), task(3, None), task(4, Some(7))],
        );
        let mut dash = Dashboard::new(session(1, 7));

        assert_eq!(dash.load(&api).await, LoadOutcome::Loaded);

        let DashboardView::Tasks { tasks, own_only } = dash.view() else {
            panic!("engineer should land on tasks");
        };
        assert!(own_only);
        let ids: Vec<u64> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[tokio::test]
    async fn manager_sees_all_projects() {
        let api = FakeWorkspace::new(vec![project(1), project(2)], vec![task(1, Some(1))]);
        let mut dash = Dashboard::new(session(2, 1));
        dash.load(&api).await;

        assert_eq!(dash.view(), DashboardView::Projects(&[project(1), project(2)]));
    }

    #[tokio::test]
    async fn director_counts_match_list_sizes() {
        for (np, nt) in [(0, 0), (1, 0), (0, 3), (4, 9)] {
            let api = FakeWorkspace::new(
                (1..=np).map(project).collect(),
                (1..=nt).map(|i| task(i, Some(i))).collect(),
            );
            let mut dash = Dashboard::new(session(3, 1));
            dash.load(&api).await;

            assert_eq!(
                dash.view(),
                DashboardView::Overview {
                    projects: np as usize,
                    tasks: nt as usize,
                    active_users: None
                }
            );
        }
    }

    #[tokio::test]
    async fn unknown_role_falls_back() {
        let api = FakeWorkspace::new(vec![project(1)], vec![]);
        let mut dash = Dashboard::new(session(0, 1));
        dash.load(&api).await;
        assert_eq!(dash.active_tab(), None);
        assert_eq!(dash.view(), DashboardView::UnknownRole);

        dash.select_tab(Tab::Projects);
        assert_eq!(dash.view(), DashboardView::UnknownRole);
    }

    #[tokio::test]
    async fn null_or_oversized_role_falls_back() {
        for raw in [json!(null), json!(300)] {
            let api = FakeWorkspace::new(vec![project(1)], vec![task(1, Some(1))]);
            let mut dash = Dashboard::new(session_with_raw_role(raw, 1));
            assert_eq!(dash.load(&api).await, LoadOutcome::Loaded);
            assert_eq!(dash.view(), DashboardView::UnknownRole);
        }
    }

    #[tokio::test]
    async fn one_failed_fetch_commits_nothing() {
        let mut api = FakeWorkspace::new(vec![project(1)], vec![task(1, Some(1))]);
        api.fail_tasks = true;
        let mut dash = Dashboard::new(session(2, 1));

        assert_eq!(dash.load(&api).await, LoadOutcome::Failed);

        assert!(!dash.is_loading());
        assert!(dash.projects().is_empty());
        assert!(dash.tasks().is_empty());
        assert_eq!(dash.view(), DashboardView::Projects(&[]));
    }

    #[tokio::test]
    async fn both_fetches_are_issued() {
        let api = FakeWorkspace::new(vec![], vec![]);
        let mut dash = Dashboard::new(session(2, 1));
        dash.load(&api).await;
        assert_eq!(api.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn cancelled_load_commits_nothing() {
        let mut api = FakeWorkspace::new(vec![project(1)], vec![task(1, Some(1))]);
        api.hang = true;
        let mut dash = Dashboard::new(session(2, 1));
        let cancel = dash.cancel_signal();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            cancel.cancel();
        });

        assert_eq!(dash.load(&api).await, LoadOutcome::Cancelled);
        assert!(dash.is_loading());
        assert!(dash.projects().is_empty());
    }

    #[tokio::test]
    async fn selected_tab_overrides_role_default() {
        let api = FakeWorkspace::new(
            vec![project(1)],
            vec![task(1, Some(7)), task(2, Some(8))],
        );
        let mut dash = Dashboard::new(session(1, 7));
        dash.load(&api).await;
        assert_eq!(dash.active_tab(), Some(Tab::Tasks));

        dash.select_tab(Tab::Overview);
        assert_eq!(
            dash.view(),
            DashboardView::Overview {
                projects: 1,
                tasks: 2,
                active_users: None
            }
        );

        // managers on the tasks tab see everything
        let mut dash = Dashboard::new(session(2, 7));
        dash.load(&api).await;
        dash.select_tab(Tab::Tasks);
        let DashboardView::Tasks { tasks, own_only } = dash.view() else {
            panic!("expected tasks");
        };
        assert!(!own_only);
        assert_eq!(tasks.len(), 2);
    }

    #[test]
    fn tabs_parse_from_lowercase() {
        use std::str::FromStr;
        assert_eq!(Tab::from_str("overview").unwrap(), Tab::Overview);
        assert_eq!(Tab::Projects.to_string(), "projects");
        assert!(Tab::from_str("reports").is_err());
    }
}
