//! Repository layer for database operations

pub mod equipment;
pub mod maintenance_logs;
pub mod schedules;
pub mod sessions;
pub mod work_orders;

use sqlx::{Pool, Postgres};

/// Default page size for entity list queries
pub const DEFAULT_PAGE_SIZE: i64 = 10;
/// Default page size for the overdue/upcoming views
pub const VIEW_PAGE_SIZE: i64 = 20;
/// Hard cap on page size
pub const MAX_PAGE_SIZE: i64 = 100;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub equipment: equipment::EquipmentRepository,
    pub schedules: schedules::SchedulesRepository,
    pub logs: maintenance_logs::LogsRepository,
    pub work_orders: work_orders::WorkOrdersRepository,
    pub sessions: sessions::SessionsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            equipment: equipment::EquipmentRepository::new(pool.clone()),
            schedules: schedules::SchedulesRepository::new(pool.clone()),
            logs: maintenance_logs::LogsRepository::new(pool.clone()),
            work_orders: work_orders::WorkOrdersRepository::new(pool.clone()),
            sessions: sessions::SessionsRepository::new(pool.clone()),
            pool,
        }
    }
}

// --- Pagination and sorting helpers ---

/// Clamp a requested page size to [1, MAX_PAGE_SIZE], falling back to the
/// entity default when absent.
pub(crate) fn clamp_limit(limit: Option<i64>, default: i64) -> i64 {
    limit.unwrap_or(default).clamp(1, MAX_PAGE_SIZE)
}

/// Clamp a requested offset to zero or above.
pub(crate) fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Resolve a caller-supplied sort field against an allow-list of
/// (wire name, column) pairs. Unrecognized fields silently fall back to the
/// entity default; raw caller input never reaches SQL.
pub(crate) fn sort_column(
    allowed: &[(&'static str, &'static str)],
    requested: Option<&str>,
    default: &'static str,
) -> &'static str {
    requested
        .and_then(|field| {
            allowed
                .iter()
                .find(|(name, _)| *name == field)
                .map(|(_, column)| *column)
        })
        .unwrap_or(default)
}

/// "asc" (case-insensitive) sorts ascending; anything else descending.
pub(crate) fn sort_direction(order: Option<&str>) -> &'static str {
    match order {
        Some(o) if o.eq_ignore_ascii_case("asc") => "ASC",
        _ => "DESC",
    }
}

// --- Constraint violation detection ---

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23503"))
}

/// Name of the violated foreign key constraint, if any
pub(crate) fn foreign_key_constraint(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23503") => {
            db.constraint().map(str::to_string)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_and_clamps() {
        assert_eq!(clamp_limit(None, DEFAULT_PAGE_SIZE), 10);
        assert_eq!(clamp_limit(None, VIEW_PAGE_SIZE), 20);
        assert_eq!(clamp_limit(Some(50), DEFAULT_PAGE_SIZE), 50);
        assert_eq!(clamp_limit(Some(1000), DEFAULT_PAGE_SIZE), 100);
        assert_eq!(clamp_limit(Some(0), DEFAULT_PAGE_SIZE), 1);
        assert_eq!(clamp_limit(Some(-5), DEFAULT_PAGE_SIZE), 1);
    }

    #[test]
    fn offset_never_negative() {
        assert_eq!(clamp_offset(None), 0);
        assert_eq!(clamp_offset(Some(30)), 30);
        assert_eq!(clamp_offset(Some(-1)), 0);
    }

    #[test]
    fn unknown_sort_field_falls_back_to_default() {
        const ALLOWED: &[(&str, &str)] = &[
            ("createdAt", "created_at"),
            ("name", "name"),
        ];
        assert_eq!(sort_column(ALLOWED, Some("name"), "created_at"), "name");
        assert_eq!(sort_column(ALLOWED, Some("createdAt"), "created_at"), "created_at");
        // Never interpolate the caller's string
        assert_eq!(
            sort_column(ALLOWED, Some("name; DROP TABLE equipment"), "created_at"),
            "created_at"
        );
        assert_eq!(sort_column(ALLOWED, None, "created_at"), "created_at");
    }

    #[test]
    fn sort_direction_defaults_to_desc() {
        assert_eq!(sort_direction(Some("asc")), "ASC");
        assert_eq!(sort_direction(Some("ASC")), "ASC");
        assert_eq!(sort_direction(Some("desc")), "DESC");
        assert_eq!(sort_direction(Some("sideways")), "DESC");
        assert_eq!(sort_direction(None), "DESC");
    }
}
