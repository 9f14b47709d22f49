//! Equipment repository

use chrono::Utc;
use sqlx::{Pool, Postgres};

use super::{
    clamp_limit, clamp_offset, is_foreign_key_violation, is_unique_violation, sort_column,
    sort_direction, DEFAULT_PAGE_SIZE,
};
use crate::{
    error::{AppError, AppResult},
    models::equipment::{Equipment, EquipmentQuery, NewEquipment, UpdateEquipment},
};

/// Sortable equipment fields (wire name, column)
const SORT_FIELDS: &[(&str, &str)] = &[
    ("id", "id"),
    ("name", "name"),
    ("model", "model"),
    ("serialNumber", "serial_number"),
    ("manufacturer", "manufacturer"),
    ("category", "category"),
    ("location", "location"),
    ("status", "status"),
    ("purchaseDate", "purchase_date"),
    ("nextMaintenance", "next_maintenance"),
    ("createdAt", "created_at"),
    ("updatedAt", "updated_at"),
];

const DUPLICATE_SERIAL: &str = "Serial number already exists";
const DELETE_BLOCKED: &str =
    "Cannot delete equipment with associated maintenance records or work orders";

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List equipment with filters, search, sorting and pagination
    pub async fn search(&self, query: &EquipmentQuery) -> AppResult<Vec<Equipment>> {
        let limit = clamp_limit(query.limit, DEFAULT_PAGE_SIZE);
        let offset = clamp_offset(query.offset);
        let sort = sort_column(SORT_FIELDS, query.sort.as_deref(), "created_at");
        let direction = sort_direction(query.order.as_deref());

        let mut conditions: Vec<String> = Vec::new();
        let mut idx = 1;

        if query.status.is_some() {
            conditions.push(format!("status = ${}", idx));
            idx += 1;
        }
        if query.category.is_some() {
            conditions.push(format!("category = ${}", idx));
            idx += 1;
        }
        if query.location.is_some() {
            conditions.push(format!("location = ${}", idx));
            idx += 1;
        }
        if query.search.is_some() {
            conditions.push(format!(
                "(name LIKE ${i} OR model LIKE ${i} OR manufacturer LIKE ${i} OR serial_number LIKE ${i})",
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
            "SELECT * FROM equipment{} ORDER BY {} {} LIMIT ${} OFFSET ${}",
            where_clause,
            sort,
            direction,
            idx,
            idx + 1
        );

        let mut builder = sqlx::query_as::<_, Equipment>(&sql);

        if let Some(ref val) = query.status {
            builder = builder.bind(val);
        }
        if let Some(ref val) = query.category {
            builder = builder.bind(val);
        }
        if let Some(ref val) = query.location {
            builder = builder.bind(val);
        }
        if let Some(ref term) = query.search {
            builder = builder.bind(format!("%{}%", term));
        }

        let rows = builder.bind(limit).bind(offset).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::record_not_found("Equipment", id))
    }

    /// Check whether an equipment row exists
    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM equipment WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Create equipment
    pub async fn create(&self, data: &NewEquipment) -> AppResult<Equipment> {
        let now = Utc::now().timestamp_millis();

        sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment (
                name, model, serial_number, manufacturer, category, location,
                status, purchase_date, warranty_expiry, last_maintenance,
                next_maintenance, notes, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $13)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.model)
        .bind(&data.serial_number)
        .bind(&data.manufacturer)
        .bind(&data.category)
        .bind(&data.location)
        .bind(&data.status)
        .bind(data.purchase_date)
        .bind(data.warranty_expiry)
        .bind(data.last_maintenance)
        .bind(data.next_maintenance)
        .bind(&data.notes)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Duplicate(DUPLICATE_SERIAL.to_string())
            } else {
                AppError::Database(e)
            }
        })
    }

    /// Update equipment (partial; only supplied fields change)
    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
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

        set_field!(data.name, "name");
        set_nullable!(data.model, "model");
        set_nullable!(data.serial_number, "serial_number");
        set_nullable!(data.manufacturer, "manufacturer");
        set_nullable!(data.category, "category");
        set_nullable!(data.location, "location");
        set_field!(data.status, "status");
        set_nullable!(data.purchase_date, "purchase_date");
        set_nullable!(data.warranty_expiry, "warranty_expiry");
        set_nullable!(data.last_maintenance, "last_maintenance");
        set_nullable!(data.next_maintenance, "next_maintenance");
        set_nullable!(data.notes, "notes");

        let query = format!(
            "UPDATE equipment SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, Equipment>(&query).bind(now);

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

        bind_field!(data.name);
        bind_nullable!(data.model);
        bind_nullable!(data.serial_number);
        bind_nullable!(data.manufacturer);
        bind_nullable!(data.category);
        bind_nullable!(data.location);
        bind_field!(data.status);
        bind_nullable!(data.purchase_date);
        bind_nullable!(data.warranty_expiry);
        bind_nullable!(data.last_maintenance);
        bind_nullable!(data.next_maintenance);
        bind_nullable!(data.notes);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::Duplicate(DUPLICATE_SERIAL.to_string())
                } else {
                    AppError::Database(e)
                }
            })?
            .ok_or_else(|| AppError::record_not_found("Equipment", id))
    }

    /// Delete equipment, rejecting the delete while dependent schedules,
    /// logs or work orders reference it.
    pub async fn delete(&self, id: i32) -> AppResult<Equipment> {
        let dependents: i64 = sqlx::query_scalar(
            r#"
            SELECT (SELECT COUNT(*) FROM maintenance_schedules WHERE equipment_id = $1)
                 + (SELECT COUNT(*) FROM maintenance_logs WHERE equipment_id = $1)
                 + (SELECT COUNT(*) FROM work_orders WHERE equipment_id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        if dependents > 0 {
            return Err(AppError::ReferentialIntegrity(DELETE_BLOCKED.to_string()));
        }

        // The FK constraints remain the backstop if a dependent row lands
        // between the check and the delete.
        sqlx::query_as::<_, Equipment>("DELETE FROM equipment WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    AppError::ReferentialIntegrity(DELETE_BLOCKED.to_string())
                } else {
                    AppError::Database(e)
                }
            })?
            .ok_or_else(|| AppError::record_not_found("Equipment", id))
    }
}
