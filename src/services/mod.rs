//! Business logic services

pub mod auth;
pub mod dashboard;
pub mod equipment;
pub mod maintenance_logs;
pub mod schedules;
pub mod work_orders;

use crate::{
    error::{AppError, AppResult},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub equipment: equipment::EquipmentService,
    pub schedules: schedules::SchedulesService,
    pub logs: maintenance_logs::LogsService,
    pub work_orders: work_orders::WorkOrdersService,
    pub dashboard: dashboard::DashboardService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone()),
            equipment: equipment::EquipmentService::new(repository.clone()),
            schedules: schedules::SchedulesService::new(repository.clone()),
            logs: maintenance_logs::LogsService::new(repository.clone()),
            work_orders: work_orders::WorkOrdersService::new(repository.clone()),
            dashboard: dashboard::DashboardService::new(repository.clone()),
            repository,
        }
    }

    /// Verify the backing store answers queries (readiness probe)
    pub async fn store_ready(&self) -> AppResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.repository.pool)
            .await?;
        Ok(())
    }
}

// --- Field validation helpers ---
//
// Required strings must be non-empty after trimming; optional strings are
// trimmed, with empty-after-trim stored as NULL.

/// Validate a required string field on create.
pub(crate) fn require_trimmed(value: Option<&str>, field: &'static str) -> AppResult<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(AppError::missing_field(field)),
    }
}

/// Normalize an optional string field on create.
pub(crate) fn optional_trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Normalize a required string field on update: absent stays absent,
/// supplied values must remain non-empty after trimming.
pub(crate) fn normalize_required(
    value: Option<String>,
    field: &'static str,
) -> AppResult<Option<String>> {
    match value {
        None => Ok(None),
        Some(v) => {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                Err(AppError::invalid_field(field, "cannot be empty"))
            } else {
                Ok(Some(trimmed.to_string()))
            }
        }
    }
}

/// Normalize a nullable string field on update: absent stays absent, an
/// explicit null (or empty-after-trim value) clears the column.
pub(crate) fn normalize_nullable(value: Option<Option<String>>) -> Option<Option<String>> {
    value.map(|inner| {
        inner
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn required_fields_reject_missing_and_blank() {
        assert_eq!(require_trimmed(Some("  ECG-1 "), "name").unwrap(), "ECG-1");
        for value in [None, Some(""), Some("   ")] {
            let err = require_trimmed(value, "name").unwrap_err();
            match err {
                AppError::Validation { code, .. } => {
                    assert_eq!(code, ErrorCode::MissingRequiredField)
                }
                other => panic!("unexpected error: {:?}", other),
            }
        }
    }

    #[test]
    fn optional_fields_trim_and_null_out_blanks() {
        assert_eq!(optional_trimmed(Some(" ICU ")), Some("ICU".to_string()));
        assert_eq!(optional_trimmed(Some("   ")), None);
        assert_eq!(optional_trimmed(None), None);
    }

    #[test]
    fn update_required_field_keeps_absence_but_rejects_blank() {
        assert_eq!(normalize_required(None, "title").unwrap(), None);
        assert_eq!(
            normalize_required(Some(" Annual Check ".to_string()), "title").unwrap(),
            Some("Annual Check".to_string())
        );
        assert!(normalize_required(Some("  ".to_string()), "title").is_err());
    }

    #[test]
    fn update_nullable_field_distinguishes_absent_null_and_value() {
        assert_eq!(normalize_nullable(None), None);
        assert_eq!(normalize_nullable(Some(None)), Some(None));
        assert_eq!(normalize_nullable(Some(Some("  ".to_string()))), Some(None));
        assert_eq!(
            normalize_nullable(Some(Some(" Ward 3 ".to_string()))),
            Some(Some("Ward 3".to_string()))
        );
    }
}
