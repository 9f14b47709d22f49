//! Work orders repository

use chrono::Utc;
use sqlx::{Pool, Postgres};

use super::{
    clamp_limit, clamp_offset, is_foreign_key_violation, sort_column, sort_direction,
    DEFAULT_PAGE_SIZE,
};
use crate::{
    error::{AppError, AppResult},
    models::work_order::{NewWorkOrder, UpdateWorkOrder, WorkOrder, WorkOrderQuery},
};

/// Sortable work order fields (wire name, column)
const SORT_FIELDS: &[(&str, &str)] = &[
    ("id", "id"),
    ("equipmentId", "equipment_id"),
    ("title", "title"),
    ("priority", "priority"),
    ("status", "status"),
    ("type", "type"),
    ("assignedTo", "assigned_to"),
    ("scheduledDate", "scheduled_date"),
    ("completedDate", "completed_date"),
    ("createdAt", "created_at"),
    ("updatedAt", "updated_at"),
];

#[derive(Clone)]
pub struct WorkOrdersRepository {
    pool: Pool<Postgres>,
}

impl WorkOrdersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List work orders with filters, search, sorting and pagination
    pub async fn search(&self, query: &WorkOrderQuery) -> AppResult<Vec<WorkOrder>> {
        let limit = clamp_limit(query.limit, DEFAULT_PAGE_SIZE);
        let offset = clamp_offset(query.offset);
        let sort = sort_column(SORT_FIELDS, query.sort.as_deref(), "created_at");
        let direction = sort_direction(query.order.as_deref());

        let mut conditions: Vec<String> = Vec::new();
        let mut idx = 1;

        if query.equipment_id.is_some() {
            conditions.push(format!("equipment_id = ${}", idx));
            idx += 1;
        }
        if query.status.is_some() {
            conditions.push(format!("status = ${}", idx));
            idx += 1;
        }
        if query.priority.is_some() {
            conditions.push(format!("priority = ${}", idx));
            idx += 1;
        }
        if query.order_type.is_some() {
            conditions.push(format!("type = ${}", idx));
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
            "SELECT * FROM work_orders{} ORDER BY {} {} LIMIT ${} OFFSET ${}",
            where_clause,
            sort,
            direction,
            idx,
            idx + 1
        );

        let mut builder = sqlx::query_as::<_, WorkOrder>(&sql);

        if let Some(val) = query.equipment_id {
            builder = builder.bind(val);
        }
        if let Some(ref val) = query.status {
            builder = builder.bind(val);
        }
        if let Some(ref val) = query.priority {
            builder = builder.bind(val);
        }
        if let Some(ref val) = query.order_type {
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

    /// Get work order by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<WorkOrder> {
        sqlx::query_as::<_, WorkOrder>("SELECT * FROM work_orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::record_not_found("Work order", id))
    }

    /// Create a work order
    pub async fn create(&self, data: &NewWorkOrder) -> AppResult<WorkOrder> {
        let now = Utc::now().timestamp_millis();

        sqlx::query_as::<_, WorkOrder>(
            r#"
            INSERT INTO work_orders (
                equipment_id, title, description, priority, status, type,
                reported_by, assigned_to, scheduled_date, completed_date,
                estimated_cost, actual_cost, notes, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $14)
            RETURNING *
            "#,
        )
        .bind(data.equipment_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.priority)
        .bind(&data.status)
        .bind(&data.order_type)
        .bind(&data.reported_by)
        .bind(&data.assigned_to)
        .bind(data.scheduled_date)
        .bind(data.completed_date)
        .bind(data.estimated_cost)
        .bind(data.actual_cost)
        .bind(&data.notes)
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

    /// Update a work order (partial; only supplied fields change)
    pub async fn update(&self, id: i32, data: &UpdateWorkOrder) -> AppResult<WorkOrder> {
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
        set_field!(data.priority, "priority");
        set_field!(data.status, "status");
        set_field!(data.order_type, "type");
        set_nullable!(data.reported_by, "reported_by");
        set_nullable!(data.assigned_to, "assigned_to");
        set_nullable!(data.scheduled_date, "scheduled_date");
        set_nullable!(data.completed_date, "completed_date");
        set_nullable!(data.estimated_cost, "estimated_cost");
        set_nullable!(data.actual_cost, "actual_cost");
        set_nullable!(data.notes, "notes");

        let query = format!(
            "UPDATE work_orders SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, WorkOrder>(&query).bind(now);

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
        bind_field!(data.priority);
        bind_field!(data.status);
        bind_field!(data.order_type);
        bind_nullable!(data.reported_by);
        bind_nullable!(data.assigned_to);
        bind_nullable!(data.scheduled_date);
        bind_nullable!(data.completed_date);
        bind_nullable!(data.estimated_cost);
        bind_nullable!(data.actual_cost);
        bind_nullable!(data.notes);

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
            .ok_or_else(|| AppError::record_not_found("Work order", id))
    }

    /// Delete a work order
    pub async fn delete(&self, id: i32) -> AppResult<WorkOrder> {
        sqlx::query_as::<_, WorkOrder>("DELETE FROM work_orders WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::record_not_found("Work order", id))
    }
}
