//! Dashboard aggregation service.
//!
//! Every figure in one response is computed against the same `now` so the
//! overdue/upcoming counts and the views they summarize stay mutually
//! consistent. Counts are point-in-time; nothing is cached.

use crate::{
    api::dashboard::{DashboardStats, EquipmentByStatus},
    error::AppResult,
    models::{
        enums::{EquipmentStatus, WorkOrderStatus},
        schedule::THIRTY_DAYS_MS,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct DashboardService {
    repository: Repository,
}

impl DashboardService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Aggregate dashboard statistics at the given instant
    pub async fn stats(&self, now: i64) -> AppResult<DashboardStats> {
        let pool = &self.repository.pool;

        let status_rows: Vec<(String, i64)> =
            sqlx::query_as("SELECT status, COUNT(*) FROM equipment GROUP BY status")
                .fetch_all(pool)
                .await?;
        let equipment_by_status = fold_status_counts(&status_rows);

        let total_equipment: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM equipment")
            .fetch_one(pool)
            .await?;

        // Same predicates as the overdue/upcoming views, minus pagination
        let upcoming_maintenance: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM maintenance_schedules
            WHERE is_active AND next_due IS NOT NULL
              AND next_due >= $1 AND next_due <= $2
            "#,
        )
        .bind(now)
        .bind(now + THIRTY_DAYS_MS)
        .fetch_one(pool)
        .await?;

        let overdue_maintenance: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM maintenance_schedules
            WHERE is_active AND next_due IS NOT NULL AND next_due < $1
            "#,
        )
        .bind(now)
        .fetch_one(pool)
        .await?;

        let recent_logs: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM maintenance_logs WHERE created_at >= $1")
                .bind(now - THIRTY_DAYS_MS)
                .fetch_one(pool)
                .await?;

        let [pending, in_progress] = WorkOrderStatus::ACTIVE;
        let active_work_orders: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM work_orders WHERE status = $1 OR status = $2",
        )
        .bind(pending.as_str())
        .bind(in_progress.as_str())
        .fetch_one(pool)
        .await?;

        Ok(DashboardStats {
            equipment_by_status,
            total_equipment,
            upcoming_maintenance,
            overdue_maintenance,
            recent_logs,
            active_work_orders,
        })
    }
}

/// Fold grouped status counts into a struct carrying all four statuses,
/// defaulting absent ones to zero. Rows with an out-of-domain status are
/// ignored.
fn fold_status_counts(rows: &[(String, i64)]) -> EquipmentByStatus {
    let mut counts = EquipmentByStatus::default();
    for (status, count) in rows {
        match EquipmentStatus::parse(status) {
            Some(EquipmentStatus::Operational) => counts.operational = *count,
            Some(EquipmentStatus::Maintenance) => counts.maintenance = *count,
            Some(EquipmentStatus::OutOfService) => counts.out_of_service = *count,
            Some(EquipmentStatus::Retired) => counts.retired = *count,
            None => {}
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_statuses_default_to_zero() {
        let counts = fold_status_counts(&[("operational".to_string(), 7)]);
        assert_eq!(counts.operational, 7);
        assert_eq!(counts.maintenance, 0);
        assert_eq!(counts.out_of_service, 0);
        assert_eq!(counts.retired, 0);
    }

    #[test]
    fn all_statuses_are_carried_and_sum_to_total() {
        let rows = vec![
            ("operational".to_string(), 4),
            ("maintenance".to_string(), 2),
            ("out_of_service".to_string(), 1),
            ("retired".to_string(), 3),
        ];
        let counts = fold_status_counts(&rows);
        assert_eq!(
            counts.operational + counts.maintenance + counts.out_of_service + counts.retired,
            10
        );
    }

    #[test]
    fn unknown_statuses_are_ignored() {
        let counts = fold_status_counts(&[("scrapped".to_string(), 5)]);
        assert_eq!(counts, EquipmentByStatus::default());
    }
}
