use async_trait::async_trait;
use tracing::{info, instrument};

use super::{ApiClient, RequestOptions, WorkspaceApi};
use crate::errors::ApiError;
use crate::model::{Project, Task};
use crate::models::{ListQuery, NewProject};

impl ApiClient {
    /// GET /projects/
    #[instrument(name = "api_get_projects", skip(self, token))]
    pub async fn get_projects(&self, token: &str, page: ListQuery) -> Result<Vec<Project>, ApiError> {
        let options = RequestOptions::get().query(page.to_query_string());
        self.auth_request(token).request("/projects/", options).await
    }

    /// POST /projects/
    #[instrument(name = "api_create_project", skip(self, token, project), fields(name = %project.name))]
    pub async fn create_project(&self, token: &str, project: &NewProject) -> Result<Project, ApiError> {
        let created: Project = self
            .auth_request(token)
            .request("/projects/", RequestOptions::post(project)?)
            .await?;
        info!(project_id = created.id, "Project created");
        Ok(created)
    }
}

#[async_trait]
impl WorkspaceApi for ApiClient {
    async fn projects(&self, token: &str) -> Result<Vec<Project>, ApiError> {
        self.get_projects(token, ListQuery::default()).await
    }

    async fn tasks(&self, token: &str) -> Result<Vec<Task>, ApiError> {
        self.get_tasks(token, ListQuery::default()).await
    }
}
