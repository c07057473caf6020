//! Credential lifecycle: login, registration, profile and password.

use crate::client::{Access, BackendClient};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use soporte_core::session::UserRecord;
use soporte_core::{ClientError, Envelope, Result, messages};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangePasswordRequest<'a> {
    current_password: &'a str,
    new_password: &'a str,
}

impl BackendClient {
    /// Signs in and persists the issued session.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserRecord> {
        let envelope = self
            .call(
                Method::POST,
                &["auth", "login"],
                Access::Public,
                messages::LOGIN_FAILED,
                |req| req.json(&LoginRequest { email, password }),
            )
            .await?;

        self.start_session(envelope, messages::LOGIN_FAILED)
    }

    /// Creates an account and signs in with it.
    ///
    /// `user_data` is forwarded as-is; its shape is decided by the backend.
    pub async fn register<T>(&self, user_data: &T) -> Result<UserRecord>
    where
        T: Serialize + ?Sized,
    {
        let envelope = self
            .call(
                Method::POST,
                &["auth", "register"],
                Access::Public,
                messages::REGISTER_FAILED,
                |req| req.json(user_data),
            )
            .await?;

        self.start_session(envelope, messages::REGISTER_FAILED)
    }

    fn start_session(&self, mut envelope: Envelope, fallback: &str) -> Result<UserRecord> {
        let token = envelope
            .take_field("token")
            .and_then(|token| token.as_str().map(str::to_string))
            .filter(|token| !token.is_empty());
        let user = envelope.take_field("user").filter(|user| !user.is_null());

        let (Some(token), Some(user)) = (token, user) else {
            tracing::warn!("[Auth] Success response without token or user");
            return Err(ClientError::backend(200, fallback));
        };

        let user = UserRecord::new(user);
        self.session_state().establish(&token, &user)?;
        Ok(user)
    }

    /// Fetches the signed-in user's profile and refreshes the stored record.
    pub async fn load_profile(&self) -> Result<UserRecord> {
        let envelope = self
            .call(
                Method::GET,
                &["auth", "profile"],
                Access::Bearer,
                messages::PROFILE_LOAD_FAILED,
                |req| req,
            )
            .await?;

        self.refresh_user(envelope)
    }

    /// Updates the profile; the returned record replaces the stored user.
    pub async fn update_profile<T>(&self, profile: &T) -> Result<UserRecord>
    where
        T: Serialize + ?Sized,
    {
        let envelope = self
            .call(
                Method::PUT,
                &["auth", "profile"],
                Access::Bearer,
                messages::PROFILE_UPDATE_FAILED,
                |req| req.json(profile),
            )
            .await?;

        self.refresh_user(envelope)
    }

    /// Stores the user a profile response carries.
    ///
    /// A response without one (null or an empty object) leaves the stored
    /// record untouched and returns it.
    fn refresh_user(&self, envelope: Envelope) -> Result<UserRecord> {
        let user = envelope.field_or_payload("user");
        let carries_user = match &user {
            Value::Null => false,
            Value::Object(fields) => !fields.is_empty(),
            _ => true,
        };
        if !carries_user {
            tracing::debug!("[Auth] Profile response without user, keeping stored record");
            return self
                .session_state()
                .current_user()
                .ok_or_else(|| ClientError::connection("Profile response carries no user"));
        }
        let user = UserRecord::new(user);
        self.session_state().store_user(&user)?;
        Ok(user)
    }

    pub async fn change_password(&self, current_password: &str, new_password: &str) -> Result<()> {
        self.call(
            Method::POST,
            &["auth", "change-password"],
            Access::Bearer,
            messages::PASSWORD_CHANGE_FAILED,
            |req| {
                req.json(&ChangePasswordRequest {
                    current_password,
                    new_password,
                })
            },
        )
        .await
        .map(|_| ())
    }
}

/// Builds the body `register` expects from the usual fields.
///
/// Extra fields can be merged into the returned object before sending.
pub fn registration(name: &str, email: &str, password: &str) -> Value {
    serde_json::json!({
        "name": name,
        "email": email,
        "password": password,
    })
}
