//! Maintenance schedule model and due-date classification

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::double_option;

/// Lookahead window for the "upcoming" classification (30 days in ms)
pub const THIRTY_DAYS_MS: i64 = 2_592_000_000;

/// A recurring maintenance obligation tied to one equipment item
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceSchedule {
    pub id: i32,
    pub equipment_id: i32,
    pub title: String,
    pub description: Option<String>,
    /// Human-readable frequency label (e.g. "quarterly")
    pub frequency: Option<String>,
    pub frequency_days: Option<i32>,
    pub last_performed: Option<i64>,
    /// Next due timestamp; null means the schedule is not yet planned
    pub next_due: Option<i64>,
    /// One of: low, medium, high, critical
    pub priority: String,
    /// Estimated duration in minutes
    pub estimated_duration: Option<i32>,
    pub assigned_to: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl MaintenanceSchedule {
    /// Whether this schedule is overdue at the given instant.
    ///
    /// Mirrors the overdue view predicate: active, planned, and strictly
    /// past due.
    pub fn is_overdue(&self, now: i64) -> bool {
        self.is_active && self.next_due.is_some_and(|due| due < now)
    }

    /// Whether this schedule falls due within the 30-day lookahead window.
    pub fn is_upcoming(&self, now: i64) -> bool {
        self.is_active
            && self
                .next_due
                .is_some_and(|due| due >= now && due <= now + THIRTY_DAYS_MS)
    }
}

/// Create maintenance schedule request
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSchedule {
    /// Required, must reference an existing equipment row
    pub equipment_id: Option<i32>,
    /// Required, non-empty after trimming
    pub title: Option<String>,
    pub description: Option<String>,
    pub frequency: Option<String>,
    pub frequency_days: Option<i32>,
    pub last_performed: Option<i64>,
    pub next_due: Option<i64>,
    /// Defaults to medium
    pub priority: Option<String>,
    pub estimated_duration: Option<i32>,
    pub assigned_to: Option<String>,
    /// Defaults to true
    pub is_active: Option<bool>,
}

/// Validated schedule fields ready for insertion
#[derive(Debug, Clone)]
pub struct NewSchedule {
    pub equipment_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub frequency: Option<String>,
    pub frequency_days: Option<i32>,
    pub last_performed: Option<i64>,
    pub next_due: Option<i64>,
    pub priority: String,
    pub estimated_duration: Option<i32>,
    pub assigned_to: Option<String>,
    pub is_active: bool,
}

/// Update maintenance schedule request (partial)
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSchedule {
    pub equipment_id: Option<i32>,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub frequency: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub frequency_days: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub last_performed: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub next_due: Option<Option<i64>>,
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub estimated_duration: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub assigned_to: Option<Option<String>>,
    pub is_active: Option<bool>,
}

/// Query parameters for listing maintenance schedules
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ScheduleQuery {
    pub equipment_id: Option<i32>,
    pub priority: Option<String>,
    /// "1"/"true" for active schedules, anything else for inactive
    pub is_active: Option<String>,
    pub assigned_to: Option<String>,
    /// Substring search over title and description
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

/// Query parameters for the overdue schedules view
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct OverdueQuery {
    pub priority: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for the upcoming schedules view
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UpcomingQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(next_due: Option<i64>, is_active: bool) -> MaintenanceSchedule {
        MaintenanceSchedule {
            id: 1,
            equipment_id: 1,
            title: "Annual Check".to_string(),
            description: None,
            frequency: None,
            frequency_days: None,
            last_performed: None,
            next_due,
            priority: "medium".to_string(),
            estimated_duration: None,
            assigned_to: None,
            is_active,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn overdue_requires_active_and_strictly_past_due() {
        let now = 1_700_000_000_000;
        assert!(schedule(Some(now - 1000), true).is_overdue(now));
        assert!(!schedule(Some(now - 1000), false).is_overdue(now));
        assert!(!schedule(Some(now), true).is_overdue(now));
        assert!(!schedule(None, true).is_overdue(now));
    }

    #[test]
    fn upcoming_window_is_inclusive_on_both_ends() {
        let now = 1_700_000_000_000;
        assert!(schedule(Some(now), true).is_upcoming(now));
        assert!(schedule(Some(now + THIRTY_DAYS_MS), true).is_upcoming(now));
        assert!(!schedule(Some(now + THIRTY_DAYS_MS + 1), true).is_upcoming(now));
        assert!(!schedule(Some(now - 1), true).is_upcoming(now));
        assert!(!schedule(Some(now + 1), false).is_upcoming(now));
    }

    #[test]
    fn overdue_and_upcoming_are_disjoint() {
        let now = 1_700_000_000_000;
        for due in [now - 1, now, now + 1, now + THIRTY_DAYS_MS] {
            let s = schedule(Some(due), true);
            assert!(!(s.is_overdue(now) && s.is_upcoming(now)));
        }
    }
}
