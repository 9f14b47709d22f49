//! Maintenance schedules repository, including the overdue/upcoming views

use chrono::Utc;
use sqlx::{Pool, Postgres};

use super::{
    clamp_limit, clamp_offset, is_foreign_key_violation, sort_column, sort_direction,
    DEFAULT_PAGE_SIZE, VIEW_PAGE_SIZE,
};
use crate::{
    error::{AppError, AppResult},
    models::schedule::{
        MaintenanceSchedule, NewSchedule, OverdueQuery, ScheduleQuery, UpcomingQuery,
        UpdateSchedule, THIRTY_DAYS_MS,
    },
};

/// Sortable schedule fields (wire name, column)
const SORT_FIELDS: &[(&str, &str)] = &[
    ("id", "id"),
    ("equipmentId", "equipment_id"),
    ("title", "title"),
    ("priority", "priority"),
    ("nextDue", "next_due"),
    ("lastPerformed", "last_performed"),
    ("createdAt", "created_at"),
    ("updatedAt", "updated_at"),
];

#[derive(Clone)]
pub struct SchedulesRepository {
    pool: Pool<Postgres>,
}

impl SchedulesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List schedules with filters, search, sorting and pagination
    pub async fn search(&self, query: &ScheduleQuery) -> AppResult<Vec<MaintenanceSchedule>> {
        let limit = clamp_limit(query.limit, DEFAULT_PAGE_SIZE);
        let offset = clamp_offset(query.offset);
        let sort = sort_column(SORT_FIELDS, query.sort.as_deref(), "created_at");
        let direction = sort_direction(query.order.as_deref());

        // "1" and "true" select active schedules, anything else inactive
        let is_active = query
            .is_active
            .as_deref()
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"));

        let mut conditions: Vec<String> = Vec::new();
        let mut idx = 1;

        if query.equipment_id.is_some() {
            conditions.push(format!("equipment_id = ${}", idx));
            idx += 1;
        }
        if query.priority.is_some() {
            conditions.push(format!("priority = ${}", idx));
            idx += 1;
        }
        if is_active.is_some() {
            conditions.push(format!("is_active = ${}", idx));
            idx += 1;
        }
        if query.assigned_to.is_some() {
            conditions.push(format!("assigned_to = ${}", idx));
            idx += 1;
        }
        if query.search.is_some() {
            conditions.push(format!(
                "(title LIKE ${i} OR description LIKE ${i})",
                i = idx
            ));
            idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            "SELECT * FROM maintenance_schedules{} ORDER BY {} {} LIMIT ${} OFFSET ${}",
            where_clause,
            sort,
            direction,
            idx,
            idx + 1
        );

        let mut builder = sqlx::query_as::<_, MaintenanceSchedule>(&sql);

        if let Some(val) = query.equipment_id {
            builder = builder.bind(val);
        }
        if let Some(ref val) = query.priority {
            builder = builder.bind(val);
        }
        if let Some(val) = is_active {
            builder = builder.bind(val);
        }
        if let Some(ref val) = query.assigned_to {
            builder = builder.bind(val);
        }
        if let Some(ref term) = query.search {
            builder = builder.bind(format!("%{}%", term));
        }

        let rows = builder.bind(limit).bind(offset).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Get schedule by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<MaintenanceSchedule> {
        sqlx::query_as::<_, MaintenanceSchedule>(
            "SELECT * FROM maintenance_schedules WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::record_not_found("Maintenance schedule", id))
    }

    /// Check whether a schedule row exists
    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM maintenance_schedules WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Create a schedule
    pub async fn create(&self, data: &NewSchedule) -> AppResult<MaintenanceSchedule> {
        let now = Utc::now().timestamp_millis();

        sqlx::query_as::<_, MaintenanceSchedule>(
            r#"
            INSERT INTO maintenance_schedules (
                equipment_id, title, description, frequency, frequency_days,
                last_performed, next_due, priority, estimated_duration,
                assigned_to, is_active, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12)
            RETURNING *
            "#,
        )
        .bind(data.equipment_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.frequency)
        .bind(data.frequency_days)
        .bind(data.last_performed)
        .bind(data.next_due)
        .bind(&data.priority)
        .bind(data.estimated_duration)
        .bind(&data.assigned_to)
        .bind(data.is_active)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // FK constraint backstops the service-level existence check
            if is_foreign_key_violation(&e) {
                AppError::equipment_not_found(data.equipment_id)
            } else {
                AppError::Database(e)
            }
        })
    }

    /// Update a schedule (partial; only supplied fields change)
    pub async fn update(&self, id: i32, data: &UpdateSchedule) -> AppResult<MaintenanceSchedule> {
        let now = Utc::now().timestamp_millis();
        let mut sets = vec!["updated_at = $1".to_string()];
        let mut idx = 2;

        macro_rules! set_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }
        macro_rules! set_nullable {
            ($field:expr, $name:expr) => {
                match $field {
                    Some(Some(_)) => {
                        sets.push(format!("{} = ${}", $name, idx));
                        idx += 1;
                    }
                    Some(None) => sets.push(format!("{} = NULL", $name)),
                    None => {}
                }
            };
        }

        set_field!(data.equipment_id, "equipment_id");
        set_field!(data.title, "title");
        set_nullable!(data.description, "description");
        set_nullable!(data.frequency, "frequency");
        set_nullable!(data.frequency_days, "frequency_days");
        set_nullable!(data.last_performed, "last_performed");
        set_nullable!(data.next_due, "next_due");
        set_field!(data.priority, "priority");
        set_nullable!(data.estimated_duration, "estimated_duration");
        set_nullable!(data.assigned_to, "assigned_to");
        set_field!(data.is_active, "is_active");

        let query = format!(
            "UPDATE maintenance_schedules SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, MaintenanceSchedule>(&query).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }
        macro_rules! bind_nullable {
            ($field:expr) => {
                if let Some(Some(ref val)) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.equipment_id);
        bind_field!(data.title);
        bind_nullable!(data.description);
        bind_nullable!(data.frequency);
        bind_nullable!(data.frequency_days);
        bind_nullable!(data.last_performed);
        bind_nullable!(data.next_due);
        bind_field!(data.priority);
        bind_nullable!(data.estimated_duration);
        bind_nullable!(data.assigned_to);
        bind_field!(data.is_active);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| match data.equipment_id {
                Some(equipment_id) if is_foreign_key_violation(&e) => {
                    AppError::equipment_not_found(equipment_id)
                }
                _ => AppError::Database(e),
            })?
            .ok_or_else(|| AppError::record_not_found("Maintenance schedule", id))
    }

    /// Delete a schedule
    pub async fn delete(&self, id: i32) -> AppResult<MaintenanceSchedule> {
        sqlx::query_as::<_, MaintenanceSchedule>(
            "DELETE FROM maintenance_schedules WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::record_not_found("Maintenance schedule", id))
    }

    /// Active schedules strictly past due at `now`, most overdue first
    pub async fn overdue(
        &self,
        query: &OverdueQuery,
        now: i64,
    ) -> AppResult<Vec<MaintenanceSchedule>> {
        let limit = clamp_limit(query.limit, VIEW_PAGE_SIZE);
        let offset = clamp_offset(query.offset);

        let rows = if let Some(ref priority) = query.priority {
            sqlx::query_as::<_, MaintenanceSchedule>(
                r#"
                SELECT * FROM maintenance_schedules
                WHERE is_active AND next_due IS NOT NULL AND next_due < $1
                  AND priority = $2
                ORDER BY next_due ASC
                LIMIT $3 OFFSET $4
                "#,
            )
            .bind(now)
            .bind(priority)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, MaintenanceSchedule>(
                r#"
                SELECT * FROM maintenance_schedules
                WHERE is_active AND next_due IS NOT NULL AND next_due < $1
                ORDER BY next_due ASC
                LIMIT $2 OFFSET $3
                "#,
            )
            .bind(now)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?
        };

        Ok(rows)
    }

    /// Active schedules falling due within the 30-day window from `now`
    pub async fn upcoming(
        &self,
        query: &UpcomingQuery,
        now: i64,
    ) -> AppResult<Vec<MaintenanceSchedule>> {
        let limit = clamp_limit(query.limit, VIEW_PAGE_SIZE);
        let offset = clamp_offset(query.offset);

        let rows = sqlx::query_as::<_, MaintenanceSchedule>(
            r#"
            SELECT * FROM maintenance_schedules
            WHERE is_active AND next_due IS NOT NULL
              AND next_due >= $1 AND next_due <= $2
            ORDER BY next_due ASC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(now)
        .bind(now + THIRTY_DAYS_MS)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
