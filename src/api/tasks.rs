use tracing::{info, instrument};

use super::{ApiClient, RequestOptions};
use crate::errors::ApiError;
use crate::model::Task;
use crate::models::{ListQuery, NewTask};

impl ApiClient {
    /// GET /tasks/
    #[instrument(name = "api_get_tasks", skip(self, token))]
    pub async fn get_tasks(&self, token: &str, page: ListQuery) -> Result<Vec<Task>, ApiError> {
        let options = RequestOptions::get().query(page.to_query_string());
        self.auth_request(token).request("/tasks/", options).await
    }

    /// POST /tasks/
    #[instrument(name = "api_create_task", skip(self, token, task), fields(title = %task.title))]
    pub async fn create_task(&self, token: &str, task: &NewTask) -> Result<Task, ApiError> {
        let created: Task = self
            .auth_request(token)
            .request("/tasks/", RequestOptions::post(task)?)
            .await?;
        info!(task_id = created.id, "Task created");
        Ok(created)
    }
}
