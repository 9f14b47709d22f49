//! Equipment service

use super::{normalize_nullable, normalize_required, optional_trimmed, require_trimmed};
use crate::{
    error::{AppError, AppResult},
    models::{
        equipment::{CreateEquipment, Equipment, EquipmentQuery, NewEquipment, UpdateEquipment},
        enums::EquipmentStatus,
    },
    repository::Repository,
};

const STATUS_DOMAIN: &str = "must be one of operational, maintenance, out_of_service, retired";

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &EquipmentQuery) -> AppResult<Vec<Equipment>> {
        self.repository.equipment.search(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        self.repository.equipment.get_by_id(id).await
    }

    pub async fn create(&self, data: CreateEquipment) -> AppResult<Equipment> {
        let name = require_trimmed(data.name.as_deref(), "name")?;
        let status = match optional_trimmed(data.status.as_deref()) {
            Some(s) => EquipmentStatus::parse(&s)
                .ok_or_else(|| AppError::invalid_field("status", STATUS_DOMAIN))?
                .as_str()
                .to_string(),
            None => EquipmentStatus::default().as_str().to_string(),
        };

        let new = NewEquipment {
            name,
            model: optional_trimmed(data.model.as_deref()),
            serial_number: optional_trimmed(data.serial_number.as_deref()),
            manufacturer: optional_trimmed(data.manufacturer.as_deref()),
            category: optional_trimmed(data.category.as_deref()),
            location: optional_trimmed(data.location.as_deref()),
            status,
            purchase_date: data.purchase_date,
            warranty_expiry: data.warranty_expiry,
            last_maintenance: data.last_maintenance,
            next_maintenance: data.next_maintenance,
            notes: optional_trimmed(data.notes.as_deref()),
        };

        self.repository.equipment.create(&new).await
    }

    pub async fn update(&self, id: i32, data: UpdateEquipment) -> AppResult<Equipment> {
        let status = match data.status {
            None => None,
            Some(s) => Some(
                EquipmentStatus::parse(s.trim())
                    .ok_or_else(|| AppError::invalid_field("status", STATUS_DOMAIN))?
                    .as_str()
                    .to_string(),
            ),
        };

        let data = UpdateEquipment {
            name: normalize_required(data.name, "name")?,
            model: normalize_nullable(data.model),
            serial_number: normalize_nullable(data.serial_number),
            manufacturer: normalize_nullable(data.manufacturer),
            category: normalize_nullable(data.category),
            location: normalize_nullable(data.location),
            status,
            purchase_date: data.purchase_date,
            warranty_expiry: data.warranty_expiry,
            last_maintenance: data.last_maintenance,
            next_maintenance: data.next_maintenance,
            notes: normalize_nullable(data.notes),
        };

        self.repository.equipment.update(id, &data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<Equipment> {
        self.repository.equipment.delete(id).await
    }
}
