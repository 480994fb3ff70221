use tracing::{debug, info, instrument, warn};

use super::session::Session;
use crate::api::AuthApi;
use crate::errors::AuthError;
use crate::model::Role;
use crate::models::RegisterReq;

pub const MIN_PASSWORD_LEN: usize = 6;

pub const MSG_REQUIRED: &str = "Please fill in all required fields";
pub const MSG_EMAIL_REQUIRED: &str = "Email is required for registration";
pub const MSG_PASSWORD_MISMATCH: &str = "Passwords do not match";
pub const MSG_PASSWORD_SHORT: &str = "Password must be at least 6 characters";
pub const MSG_GENERIC: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Login,
    Register,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormFields {
    pub username: String,
    pub password: String,
    // register only
    pub email: String,
    pub full_name: String,
    pub confirm_password: String,
    pub role: Role,
}

/// Login/registration form.
///
/// Two modes toggled by [`AuthForm::switch_mode`]. A submission validates
/// locally first and only talks to the service once every check passes.
#[derive(Debug, Clone)]
pub struct AuthForm {
    mode: FormMode,
    fields: FormFields,
    error: Option<String>,
    loading: bool,
}

impl Default for AuthForm {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthForm {
    pub fn new() -> Self {
        Self {
            mode: FormMode::Login,
            fields: FormFields::default(),
            error: None,
            loading: false,
        }
    }

    pub fn register() -> Self {
        let mut form = Self::new();
        form.mode = FormMode::Register;
        form
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut FormFields {
        &mut self.fields
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Flips between login and registration, resetting every field and the error.
    pub fn switch_mode(&mut self) {
        self.mode = match self.mode {
            FormMode::Login => FormMode::Register,
            FormMode::Register => FormMode::Login,
        };
        self.fields = FormFields::default();
        self.error = None;
    }

    pub fn validate(&self) -> Result<(), AuthError> {
        let f = &self.fields;

        if f.username.is_empty() || f.password.is_empty() {
            return Err(AuthError::Validation(MSG_REQUIRED.into()));
        }

        if self.mode == FormMode::Register {
            if f.email.is_empty() {
                return Err(AuthError::Validation(MSG_EMAIL_REQUIRED.into()));
            }
            if f.password != f.confirm_password {
                return Err(AuthError::Validation(MSG_PASSWORD_MISMATCH.into()));
            }
            if f.password.chars().count() < MIN_PASSWORD_LEN {
                return Err(AuthError::Validation(MSG_PASSWORD_SHORT.into()));
            }
        }

        Ok(())
    }

    /// Submits the form. On failure the message is also kept as the form's
    /// inline error; the form stays usable for another attempt.
    #[instrument(name = "form_submit", skip(self, api), fields(mode = ?self.mode, username = %self.fields.username))]
    pub async fn submit<A>(&mut self, api: &A) -> Result<Session, AuthError>
    where
        A: AuthApi + ?Sized,
    {
        self.error = None;
        self.loading = true;

        let result = self.run(api).await;

        self.loading = false;
        match &result {
            Ok(session) => info!(user_id = session.user.id, "Authenticated"),
            Err(e) => {
                warn!(error = %e, "Authentication failed");
                let message = e.to_string();
                self.error = Some(if message.is_empty() {
                    MSG_GENERIC.to_string()
                } else {
                    message
                });
            }
        }
        result
    }

    async fn run<A>(&self, api: &A) -> Result<Session, AuthError>
    where
        A: AuthApi + ?Sized,
    {
        self.validate()?;
        let f = &self.fields;

        let response = match self.mode {
            FormMode::Login => {
                debug!("Attempting login");
                api.login(&f.username, &f.password).await?
            }
            FormMode::Register => {
                debug!("Attempting registration");
                let req = RegisterReq {
                    username: f.username.clone(),
                    email: f.email.clone(),
                    password: f.password.clone(),
                    full_name: f.full_name.clone(),
                    role: f.role.id(),
                };
                let created = api.register(&req).await?;
                if created.id.is_none() {
                    return Err(AuthError::MissingUserId);
                }
                debug!("Logging in after registration");
                api.login(&f.username, &f.password).await?
            }
        };

        Ok(Session {
            token: response.access_token,
            user: response.user,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ApiError;
    use crate::model::UserRecord;
    use crate::models::{LoginResponse, RegisterResponse};
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeApi {
        logins: Mutex<Vec<(String, String)>>,
        registrations: Mutex<Vec<RegisterReq>>,
        reject_login: bool,
        register_id: Option<u64>,
    }

    fn user() -> UserRecord {
        serde_json::from_value(json!({
            "id": 3,
            "username": "dana",
            "email": "dana@example.com",
            "role": 2,
            "role_name": "Manager"
        }))
        .unwrap()
    }

    #[async_trait]
    impl AuthApi for FakeApi {
        async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
            self.logins
                .lock()
                .unwrap()
                .push((username.to_string(), password.to_string()));
            if self.reject_login {
                return Err(ApiError::Status {
                    status: StatusCode::UNAUTHORIZED,
                    message: "Incorrect username or password".into(),
                });
            }
            Ok(LoginResponse {
                access_token: "tok-dana".into(),
                token_type: Some("bearer".into()),
                user: user(),
            })
        }

        async fn register(&self, req: &RegisterReq) -> Result<RegisterResponse, ApiError> {
            self.registrations.lock().unwrap().push(req.clone());
            Ok(RegisterResponse {
                id: self.register_id,
            })
        }
    }

    impl FakeApi {
        fn calls(&self) -> usize {
            self.logins.lock().unwrap().len() + self.registrations.lock().unwrap().len()
        }
    }

    fn filled_register_form() -> AuthForm {
        let mut form = AuthForm::register();
        let f = form.fields_mut();
        f.username = "dana".into();
        f.email = "dana@example.com".into();
        f.full_name = "Dana S".into();
        f.password = "secret1".into();
        f.confirm_password = "secret1".into();
        f.role = Role::Manager;
        form
    }

    #[tokio::test]
    async fn empty_credentials_never_reach_the_service() {
        let api = FakeApi::default();

        for (username, password) in [("", "pw"), ("dana", ""), ("", "")] {
            let mut form = AuthForm::new();
            form.fields_mut().username = username.into();
            form.fields_mut().password = password.into();

            let err = form.submit(&api).await.unwrap_err();
            assert!(matches!(err, AuthError::Validation(_)));
            assert_eq!(form.error(), Some(MSG_REQUIRED));
            assert!(!form.is_loading());
        }
        assert_eq!(api.calls(), 0);
    }

    #[tokio::test]
    async fn register_validation_short_circuits() {
        let api = FakeApi::default();

        let mut form = filled_register_form();
        form.fields_mut().email.clear();
        form.submit(&api).await.unwrap_err();
        assert_eq!(form.error(), Some(MSG_EMAIL_REQUIRED));

        let mut form = filled_register_form();
        form.fields_mut().confirm_password = "secret2".into();
        form.submit(&api).await.unwrap_err();
        assert_eq!(form.error(), Some(MSG_PASSWORD_MISMATCH));

        let mut form = filled_register_form();
        form.fields_mut().password = "abc".into();
        form.fields_mut().confirm_password = "abc".into();
        form.submit(&api).await.unwrap_err();
        assert_eq!(form.error(), Some(MSG_PASSWORD_SHORT));

        assert_eq!(api.calls(), 0);
    }

    #[tokio::test]
    async fn login_mode_skips_register_checks() {
        let api = FakeApi::default();
        let mut form = AuthForm::new();
        form.fields_mut().username = "dana".into();
        form.fields_mut().password = "abc".into();

        let session = form.submit(&api).await.unwrap();

        assert_eq!(session.token, "tok-dana");
        assert_eq!(session.user, user());
        assert_eq!(form.error(), None);
    }

    #[tokio::test]
    async fn registration_logs_in_once_with_same_credentials() {
        let api = FakeApi {
            register_id: Some(3),
            ..FakeApi::default()
        };
        let mut form = filled_register_form();

        let session = form.submit(&api).await.unwrap();

        assert_eq!(session.token, "tok-dana");
        let regs = api.registrations.lock().unwrap();
        assert_eq!(regs.len(), 1);
        assert_eq!(regs[0].role, 2);
        assert_eq!(regs[0].full_name, "Dana S");
        assert_eq!(
            *api.logins.lock().unwrap(),
            vec![("dana".to_string(), "secret1".to_string())]
        );
    }

    #[tokio::test]
    async fn registration_without_id_does_not_log_in() {
        let api = FakeApi::default();
        let mut form = filled_register_form();

        let err = form.submit(&api).await.unwrap_err();

        assert!(matches!(err, AuthError::MissingUserId));
        assert!(api.logins.lock().unwrap().is_empty());
        assert!(form.error().is_some());
    }

    #[tokio::test]
    async fn service_error_shown_inline_and_form_reusable() {
        let api = FakeApi {
            reject_login: true,
            ..FakeApi::default()
        };
        let mut form = AuthForm::new();
        form.fields_mut().username = "dana".into();
        form.fields_mut().password = "wrong".into();

        form.submit(&api).await.unwrap_err();
        assert_eq!(form.error(), Some("Incorrect username or password"));
        assert!(!form.is_loading());

        // a fresh attempt clears the old error first
        form.fields_mut().username.clear();
        form.submit(&api).await.unwrap_err();
        assert_eq!(form.error(), Some(MSG_REQUIRED));
    }

    #[test]
    fn switch_mode_resets_fields_and_error() {
        let mut form = filled_register_form();
        form.error = Some("old".into());

        form.switch_mode();

        assert_eq!(form.mode(), FormMode::Login);
        assert_eq!(form.fields(), &FormFields::default());
        assert_eq!(form.fields().role, Role::Engineer);
        assert_eq!(form.error(), None);

        form.switch_mode();
        assert_eq!(form.mode(), FormMode::Register);
    }
}
