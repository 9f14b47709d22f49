//! Maintenance schedules service

use super::{normalize_nullable, normalize_required, optional_trimmed, require_trimmed};
use crate::{
    error::{AppError, AppResult},
    models::{
        enums::Priority,
        schedule::{
            CreateSchedule, MaintenanceSchedule, NewSchedule, OverdueQuery, ScheduleQuery,
            UpcomingQuery, UpdateSchedule,
        },
    },
    repository::Repository,
};

const PRIORITY_DOMAIN: &str = "must be one of low, medium, high, critical";

#[derive(Clone)]
pub struct SchedulesService {
    repository: Repository,
}

impl SchedulesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &ScheduleQuery) -> AppResult<Vec<MaintenanceSchedule>> {
        self.repository.schedules.search(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<MaintenanceSchedule> {
        self.repository.schedules.get_by_id(id).await
    }

    pub async fn create(&self, data: CreateSchedule) -> AppResult<MaintenanceSchedule> {
        let equipment_id = data
            .equipment_id
            .ok_or_else(|| AppError::missing_field("equipmentId"))?;
        let title = require_trimmed(data.title.as_deref(), "title")?;
        let priority = validate_priority(optional_trimmed(data.priority.as_deref()))?;

        // Friendly existence check; the FK constraint backstops the race.
        if !self.repository.equipment.exists(equipment_id).await? {
            return Err(AppError::equipment_not_found(equipment_id));
        }

        let new = NewSchedule {
            equipment_id,
            title,
            description: optional_trimmed(data.description.as_deref()),
            frequency: optional_trimmed(data.frequency.as_deref()),
            frequency_days: data.frequency_days,
            last_performed: data.last_performed,
            next_due: data.next_due,
            priority,
            estimated_duration: data.estimated_duration,
            assigned_to: optional_trimmed(data.assigned_to.as_deref()),
            is_active: data.is_active.unwrap_or(true),
        };

        self.repository.schedules.create(&new).await
    }

    pub async fn update(&self, id: i32, data: UpdateSchedule) -> AppResult<MaintenanceSchedule> {
        if let Some(equipment_id) = data.equipment_id {
            if !self.repository.equipment.exists(equipment_id).await? {
                return Err(AppError::equipment_not_found(equipment_id));
            }
        }

        let priority = match data.priority {
            None => None,
            Some(p) => Some(validate_priority(Some(p.trim().to_string()))?),
        };

        let data = UpdateSchedule {
            equipment_id: data.equipment_id,
            title: normalize_required(data.title, "title")?,
            description: normalize_nullable(data.description),
            frequency: normalize_nullable(data.frequency),
            frequency_days: data.frequency_days,
            last_performed: data.last_performed,
            next_due: data.next_due,
            priority,
            estimated_duration: data.estimated_duration,
            assigned_to: normalize_nullable(data.assigned_to),
            is_active: data.is_active,
        };

        self.repository.schedules.update(id, &data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<MaintenanceSchedule> {
        self.repository.schedules.delete(id).await
    }

    /// Overdue schedules view at the given instant
    pub async fn overdue(
        &self,
        query: &OverdueQuery,
        now: i64,
    ) -> AppResult<Vec<MaintenanceSchedule>> {
        self.repository.schedules.overdue(query, now).await
    }

    /// Upcoming schedules view at the given instant
    pub async fn upcoming(
        &self,
        query: &UpcomingQuery,
        now: i64,
    ) -> AppResult<Vec<MaintenanceSchedule>> {
        self.repository.schedules.upcoming(query, now).await
    }
}

fn validate_priority(value: Option<String>) -> AppResult<String> {
    match value {
        Some(p) => Ok(Priority::parse(&p)
            .ok_or_else(|| AppError::invalid_field("priority", PRIORITY_DOMAIN))?
            .as_str()
            .to_string()),
        None => Ok(Priority::default().as_str().to_string()),
    }
}
