use async_trait::async_trait;
use tracing::{info, instrument};

use super::{ApiClient, AuthApi, RequestOptions};
use crate::errors::ApiError;
use crate::models::{LoginReqDto, LoginResponse, RegisterReq, RegisterResponse};

impl ApiClient {
    /// POST /auth/login
    #[instrument(name = "api_login", skip(self, username, password), fields(username = %username))]
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = LoginReqDto { username, password };
        let resp: LoginResponse = self
            .request("/auth/login", RequestOptions::post(&body)?)
            .await?;
        info!(user_id = resp.user.id, "Login accepted");
        Ok(resp)
    }

    /// POST /auth/register
    #[instrument(name = "api_register", skip(self, req), fields(username = %req.username))]
    pub async fn register(&self, req: &RegisterReq) -> Result<RegisterResponse, ApiError> {
        let resp: RegisterResponse = self
            .request("/auth/register", RequestOptions::post(req)?)
            .await?;
        info!(user_id = ?resp.id, "Registration accepted");
        Ok(resp)
    }
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        ApiClient::login(self, username, password).await
    }

    async fn register(&self, req: &RegisterReq) -> Result<RegisterResponse, ApiError> {
        ApiClient::register(self, req).await
    }
}
