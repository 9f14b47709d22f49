//! Maintenance logs service

use super::{normalize_nullable, normalize_required, optional_trimmed, require_trimmed};
use crate::{
    error::{AppError, AppResult},
    models::maintenance_log::{CreateLog, LogQuery, MaintenanceLog, NewLog, UpdateLog},
    repository::Repository,
};

#[derive(Clone)]
pub struct LogsService {
    repository: Repository,
}

impl LogsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &LogQuery) -> AppResult<Vec<MaintenanceLog>> {
        self.repository.logs.search(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<MaintenanceLog> {
        self.repository.logs.get_by_id(id).await
    }

    /// Full maintenance history for one equipment item. An empty history is
    /// not an error.
    pub async fn history_for_equipment(
        &self,
        equipment_id: i32,
    ) -> AppResult<Vec<MaintenanceLog>> {
        self.repository.logs.list_for_equipment(equipment_id).await
    }

    pub async fn create(&self, data: CreateLog) -> AppResult<MaintenanceLog> {
        let equipment_id = data
            .equipment_id
            .ok_or_else(|| AppError::missing_field("equipmentId"))?;
        let title = require_trimmed(data.title.as_deref(), "title")?;
        let log_type = require_trimmed(data.log_type.as_deref(), "type")?;
        let performed_by = require_trimmed(data.performed_by.as_deref(), "performedBy")?;
        let performed_at = data
            .performed_at
            .ok_or_else(|| AppError::missing_field("performedAt"))?;

        if !self.repository.equipment.exists(equipment_id).await? {
            return Err(AppError::equipment_not_found(equipment_id));
        }
        if let Some(schedule_id) = data.schedule_id {
            if !self.repository.schedules.exists(schedule_id).await? {
                return Err(AppError::schedule_not_found(schedule_id));
            }
        }

        let new = NewLog {
            equipment_id,
            schedule_id: data.schedule_id,
            title,
            description: optional_trimmed(data.description.as_deref()),
            log_type,
            performed_by,
            performed_at,
            duration: data.duration,
            status: optional_trimmed(data.status.as_deref())
                .unwrap_or_else(|| "completed".to_string()),
            parts_replaced: data.parts_replaced,
            cost: data.cost,
            notes: optional_trimmed(data.notes.as_deref()),
        };

        self.repository.logs.create(&new).await
    }

    pub async fn update(&self, id: i32, data: UpdateLog) -> AppResult<MaintenanceLog> {
        if let Some(equipment_id) = data.equipment_id {
            if !self.repository.equipment.exists(equipment_id).await? {
                return Err(AppError::equipment_not_found(equipment_id));
            }
        }
        if let Some(Some(schedule_id)) = data.schedule_id {
            if !self.repository.schedules.exists(schedule_id).await? {
                return Err(AppError::schedule_not_found(schedule_id));
            }
        }

        let data = UpdateLog {
            equipment_id: data.equipment_id,
            schedule_id: data.schedule_id,
            title: normalize_required(data.title, "title")?,
            description: normalize_nullable(data.description),
            log_type: normalize_required(data.log_type, "type")?,
            performed_by: normalize_required(data.performed_by, "performedBy")?,
            performed_at: data.performed_at,
            duration: data.duration,
            status: normalize_required(data.status, "status")?,
            parts_replaced: data.parts_replaced,
            cost: data.cost,
            notes: normalize_nullable(data.notes),
        };

        self.repository.logs.update(id, &data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<MaintenanceLog> {
        self.repository.logs.delete(id).await
    }
}
