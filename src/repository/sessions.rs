//! Sessions repository (token lookup only; issuance is external)

use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::user::CurrentUser};

#[derive(Clone)]
pub struct SessionsRepository {
    pool: Pool<Postgres>,
}

impl SessionsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Resolve a bearer token to its user, ignoring expired sessions.
    pub async fn find_user_by_token(
        &self,
        token: &str,
        now: i64,
    ) -> AppResult<Option<CurrentUser>> {
        let user = sqlx::query_as::<_, CurrentUser>(
            r#"
            SELECT u.id, u.name, u.email
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.token = $1 AND s.expires_at > $2
            "#,
        )
        .bind(token)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}
