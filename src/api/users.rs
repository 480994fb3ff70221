use tracing::instrument;

use super::{ApiClient, RequestOptions};
use crate::errors::ApiError;
use crate::model::UserRecord;

impl ApiClient {
    /// GET /users/me
    #[instrument(name = "api_get_profile", skip_all)]
    pub async fn get_profile(&self, token: &str) -> Result<UserRecord, ApiError> {
        self.auth_request(token)
            .request("/users/me", RequestOptions::get())
            .await
    }
}
