//! Work orders service

use super::{normalize_nullable, normalize_required, optional_trimmed, require_trimmed};
use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{Priority, WorkOrderStatus},
        work_order::{CreateWorkOrder, NewWorkOrder, UpdateWorkOrder, WorkOrder, WorkOrderQuery},
    },
    repository::Repository,
};

const PRIORITY_DOMAIN: &str = "must be one of low, medium, high, critical";
const STATUS_DOMAIN: &str = "must be one of pending, in_progress, on_hold, completed, cancelled";

#[derive(Clone)]
pub struct WorkOrdersService {
    repository: Repository,
}

impl WorkOrdersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &WorkOrderQuery) -> AppResult<Vec<WorkOrder>> {
        self.repository.work_orders.search(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<WorkOrder> {
        self.repository.work_orders.get_by_id(id).await
    }

    pub async fn create(&self, data: CreateWorkOrder) -> AppResult<WorkOrder> {
        let equipment_id = data
            .equipment_id
            .ok_or_else(|| AppError::missing_field("equipmentId"))?;
        let title = require_trimmed(data.title.as_deref(), "title")?;
        let order_type = require_trimmed(data.order_type.as_deref(), "type")?;

        let priority = match optional_trimmed(data.priority.as_deref()) {
            Some(p) => Priority::parse(&p)
                .ok_or_else(|| AppError::invalid_field("priority", PRIORITY_DOMAIN))?
                .as_str()
                .to_string(),
            None => Priority::default().as_str().to_string(),
        };
        let status = match optional_trimmed(data.status.as_deref()) {
            Some(s) => WorkOrderStatus::parse(&s)
                .ok_or_else(|| AppError::invalid_field("status", STATUS_DOMAIN))?
                .as_str()
                .to_string(),
            None => WorkOrderStatus::default().as_str().to_string(),
        };

        if !self.repository.equipment.exists(equipment_id).await? {
            return Err(AppError::equipment_not_found(equipment_id));
        }

        let new = NewWorkOrder {
            equipment_id,
            title,
            description: optional_trimmed(data.description.as_deref()),
            priority,
            status,
            order_type,
            reported_by: optional_trimmed(data.reported_by.as_deref()),
            assigned_to: optional_trimmed(data.assigned_to.as_deref()),
            scheduled_date: data.scheduled_date,
            completed_date: data.completed_date,
            estimated_cost: data.estimated_cost,
            actual_cost: data.actual_cost,
            notes: optional_trimmed(data.notes.as_deref()),
        };

        self.repository.work_orders.create(&new).await
    }

    pub async fn update(&self, id: i32, data: UpdateWorkOrder) -> AppResult<WorkOrder> {
        if let Some(equipment_id) = data.equipment_id {
            if !self.repository.equipment.exists(equipment_id).await? {
                return Err(AppError::equipment_not_found(equipment_id));
            }
        }

        let priority = match data.priority {
            None => None,
            Some(p) => Some(
                Priority::parse(p.trim())
                    .ok_or_else(|| AppError::invalid_field("priority", PRIORITY_DOMAIN))?
                    .as_str()
                    .to_string(),
            ),
        };
        let status = match data.status {
            None => None,
            Some(s) => Some(
                WorkOrderStatus::parse(s.trim())
                    .ok_or_else(|| AppError::invalid_field("status", STATUS_DOMAIN))?
                    .as_str()
                    .to_string(),
            ),
        };

        let data = UpdateWorkOrder {
            equipment_id: data.equipment_id,
            title: normalize_required(data.title, "title")?,
            description: normalize_nullable(data.description),
            priority,
            status,
            order_type: normalize_required(data.order_type, "type")?,
            reported_by: normalize_nullable(data.reported_by),
            assigned_to: normalize_nullable(data.assigned_to),
            scheduled_date: data.scheduled_date,
            completed_date: data.completed_date,
            estimated_cost: data.estimated_cost,
            actual_cost: data.actual_cost,
            notes: normalize_nullable(data.notes),
        };

        self.repository.work_orders.update(id, &data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<WorkOrder> {
        self.repository.work_orders.delete(id).await
    }
}
