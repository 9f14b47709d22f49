//! Maintenance logs repository

use chrono::Utc;
use sqlx::{Pool, Postgres};

use super::{
    clamp_limit, clamp_offset, foreign_key_constraint, sort_column, sort_direction,
    DEFAULT_PAGE_SIZE,
};
use crate::{
    error::{AppError, AppResult},
    models::maintenance_log::{LogQuery, MaintenanceLog, NewLog, UpdateLog},
};

/// Sortable log fields (wire name, column)
const SORT_FIELDS: &[(&str, &str)] = &[
    ("id", "id"),
    ("equipmentId", "equipment_id"),
    ("title", "title"),
    ("type", "type"),
    ("performedBy", "performed_by"),
    ("performedAt", "performed_at"),
    ("status", "status"),
    ("cost", "cost"),
    ("createdAt", "created_at"),
    ("updatedAt", "updated_at"),
];

/// Map an FK violation raced past the service-level existence checks to the
/// same not-found error those checks produce.
fn map_reference_error(
    err: sqlx::Error,
    equipment_id: Option<i32>,
    schedule_id: Option<i32>,
) -> AppError {
    match foreign_key_constraint(&err) {
        Some(constraint) if constraint.contains("schedule_id") => match schedule_id {
            Some(id) => AppError::schedule_not_found(id),
            None => AppError::Database(err),
        },
        Some(_) => match equipment_id {
            Some(id) => AppError::equipment_not_found(id),
            None => AppError::Database(err),
        },
        None => AppError::Database(err),
    }
}

#[derive(Clone)]
pub struct LogsRepository {
    pool: Pool<Postgres>,
}

impl LogsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List logs with filters, search, sorting and pagination
    pub async fn search(&self, query: &LogQuery) -> AppResult<Vec<MaintenanceLog>> {
        let limit = clamp_limit(query.limit, DEFAULT_PAGE_SIZE);
        let offset = clamp_offset(query.offset);
        let sort = sort_column(SORT_FIELDS, query.sort.as_deref(), "performed_at");
        let direction = sort_direction(query.order.as_deref());

        let mut conditions: Vec<String> = Vec::new();
        let mut idx = 1;

        if query.equipment_id.is_some() {
            conditions.push(format!("equipment_id = ${}", idx));
            idx += 1;
        }
        if query.schedule_id.is_some() {
            conditions.push(format!("schedule_id = ${}", idx));
            idx += 1;
        }
        if query.log_type.is_some() {
            conditions.push(format!("type = ${}", idx));
            idx += 1;
        }
        if query.status.is_some() {
            conditions.push(format!("status = ${}", idx));
            idx += 1;
        }
        if query.performed_by.is_some() {
            conditions.push(format!("performed_by = ${}", idx));
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
            "SELECT * FROM maintenance_logs{} ORDER BY {} {} LIMIT ${} OFFSET ${}",
            where_clause,
            sort,
            direction,
            idx,
            idx + 1
        );

        let mut builder = sqlx::query_as::<_, MaintenanceLog>(&sql);

        if let Some(val) = query.equipment_id {
            builder = builder.bind(val);
        }
        if let Some(val) = query.schedule_id {
            builder = builder.bind(val);
        }
        if let Some(ref val) = query.log_type {
            builder = builder.bind(val);
        }
        if let Some(ref val) = query.status {
            builder = builder.bind(val);
        }
        if let Some(ref val) = query.performed_by {
            builder = builder.bind(val);
        }
        if let Some(ref term) = query.search {
            builder = builder.bind(format!("%{}%", term));
        }

        let rows = builder.bind(limit).bind(offset).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Get log by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<MaintenanceLog> {
        sqlx::query_as::<_, MaintenanceLog>("SELECT * FROM maintenance_logs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::record_not_found("Maintenance log", id))
    }

    /// Full maintenance history for one equipment item, most recent work first
    pub async fn list_for_equipment(&self, equipment_id: i32) -> AppResult<Vec<MaintenanceLog>> {
        let rows = sqlx::query_as::<_, MaintenanceLog>(
            "SELECT * FROM maintenance_logs WHERE equipment_id = $1 ORDER BY performed_at DESC",
        )
        .bind(equipment_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Create a log entry
    pub async fn create(&self, data: &NewLog) -> AppResult<MaintenanceLog> {
        let now = Utc::now().timestamp_millis();

        sqlx::query_as::<_, MaintenanceLog>(
            r#"
            INSERT INTO maintenance_logs (
                equipment_id, schedule_id, title, description, type,
                performed_by, performed_at, duration, status, parts_replaced,
                cost, notes, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $13)
            RETURNING *
            "#,
        )
        .bind(data.equipment_id)
        .bind(data.schedule_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.log_type)
        .bind(&data.performed_by)
        .bind(data.performed_at)
        .bind(data.duration)
        .bind(&data.status)
        .bind(&data.parts_replaced)
        .bind(data.cost)
        .bind(&data.notes)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_reference_error(e, Some(data.equipment_id), data.schedule_id))
    }

    /// Update a log entry (partial; only supplied fields change)
    pub async fn update(&self, id: i32, data: &UpdateLog) -> AppResult<MaintenanceLog> {
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
        set_nullable!(data.schedule_id, "schedule_id");
        set_field!(data.title, "title");
        set_nullable!(data.description, "description");
        set_field!(data.log_type, "type");
        set_field!(data.performed_by, "performed_by");
        set_field!(data.performed_at, "performed_at");
        set_nullable!(data.duration, "duration");
        set_field!(data.status, "status");
        set_nullable!(data.parts_replaced, "parts_replaced");
        set_nullable!(data.cost, "cost");
        set_nullable!(data.notes, "notes");

        let query = format!(
            "UPDATE maintenance_logs SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, MaintenanceLog>(&query).bind(now);

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
        bind_nullable!(data.schedule_id);
        bind_field!(data.title);
        bind_nullable!(data.description);
        bind_field!(data.log_type);
        bind_field!(data.performed_by);
        bind_field!(data.performed_at);
        bind_nullable!(data.duration);
        bind_field!(data.status);
        bind_nullable!(data.parts_replaced);
        bind_nullable!(data.cost);
        bind_nullable!(data.notes);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                map_reference_error(e, data.equipment_id, data.schedule_id.flatten())
            })?
            .ok_or_else(|| AppError::record_not_found("Maintenance log", id))
    }

    /// Delete a log entry
    pub async fn delete(&self, id: i32) -> AppResult<MaintenanceLog> {
        sqlx::query_as::<_, MaintenanceLog>(
            "DELETE FROM maintenance_logs WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::record_not_found("Maintenance log", id))
    }
}
