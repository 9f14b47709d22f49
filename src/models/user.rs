//! Current user resolved from a session token

use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// The authenticated user behind a request.
///
/// Sessions are issued by an external identity service; this server only
/// resolves a bearer token to its user.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    pub email: String,
}
