use std::fmt::Write;

use strum::IntoEnumIterator;

use super::{Dashboard, DashboardView, Tab};
use crate::model::{Project, Role, Task, UserRecord};

pub fn header(user: &UserRecord) -> String {
    format!(
        "Welcome, {}!\nRole: {}\nEmail: {}\n",
        user.display_name(),
        user.role_label(),
        user.email
    )
}

/// Tab bar with the active tab in brackets.
pub fn nav(active: Option<Tab>) -> String {
    let tabs: Vec<String> = Tab::iter()
        .map(|tab| {
            if Some(tab) == active {
                format!("[{}]", tab.label())
            } else {
                format!(" {} ", tab.label())
            }
        })
        .collect();
    tabs.join(" ")
}

pub fn project(project: &Project) -> String {
    let mut out = format!("#{} {}\n", project.id, project.name);
    if let Some(desc) = project.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "    {desc}");
    }
    let _ = writeln!(out, "    status: {}", project.status);
    out
}

pub fn task(task: &Task) -> String {
    let mut out = format!("#{} {}\n", task.id, task.title);
    if let Some(desc) = task.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "    {desc}");
    }
    let _ = writeln!(out, "    status: {}  priority: {}", task.status, task.priority);
    if let Some(due) = task.due_date {
        let _ = writeln!(out, "    due: {}", due.format("%Y-%m-%d %H:%M"));
    }
    out
}

pub fn view(view: &DashboardView<'_>) -> String {
    match view {
        DashboardView::Loading => "Loading data...\n".to_string(),
        DashboardView::Tasks { tasks, own_only } => {
            let heading = if *own_only { "My tasks" } else { "Tasks" };
            list(heading, tasks.iter().map(|t| task(t)))
        }
        DashboardView::Projects(projects) => list("Projects", projects.iter().map(project)),
        DashboardView::Overview {
            projects,
            tasks,
            active_users,
        } => {
            let active = active_users.map_or_else(|| "-".to_string(), |n| n.to_string());
            format!(
                "System overview\n  Total projects: {projects}\n  Total tasks: {tasks}\n  Active users: {active}\n"
            )
        }
        DashboardView::UnknownRole => "Unknown role\n".to_string(),
    }
}

fn list(heading: &str, items: impl Iterator<Item = String>) -> String {
    let mut out = format!("{heading}\n");
    let mut empty = true;
    for item in items {
        empty = false;
        out.push_str(&item);
    }
    if empty {
        out.push_str("  (nothing here yet)\n");
    }
    out
}

/// Full dashboard screen: header, tab bar, content.
pub fn dashboard(dash: &Dashboard) -> String {
    if dash.is_loading() {
        return format!("Loading...\n\n{}", view(&DashboardView::Loading));
    }
    format!(
        "{}\n{}\n\n{}",
        header(dash.user()),
        nav(dash.active_tab()),
        view(&dash.view())
    )
}

pub fn roles() -> String {
    let mut out = String::from("Roles:\n");
    for role in Role::iter() {
        let _ = writeln!(out, "  {} ({}): {}", role.label(), role, role.description());
    }
    out
}
