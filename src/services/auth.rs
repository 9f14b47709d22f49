//! Session authentication service.
//!
//! Sessions are issued by an external identity service; this server only
//! resolves bearer tokens to the current user.

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::user::CurrentUser,
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
}

impl AuthService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Resolve a session token to its user
    pub async fn authenticate(&self, token: &str) -> AppResult<CurrentUser> {
        let now = Utc::now().timestamp_millis();
        self.repository
            .sessions
            .find_user_by_token(token, now)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid or expired session".to_string()))
    }
}
