//! Data models for MedTrack

pub mod enums;
pub mod equipment;
pub mod maintenance_log;
pub mod schedule;
pub mod user;
pub mod work_order;

// Re-export commonly used types
pub use enums::{EquipmentStatus, Priority, WorkOrderStatus};
pub use equipment::Equipment;
pub use maintenance_log::MaintenanceLog;
pub use schedule::MaintenanceSchedule;
pub use user::CurrentUser;
pub use work_order::WorkOrder;

use serde::{Deserialize, Deserializer};

/// Deserializer distinguishing an omitted field from an explicit `null`.
///
/// Used with `#[serde(default, deserialize_with = "double_option")]` on
/// `Option<Option<T>>` update fields: outer `None` means the field was not
/// supplied, `Some(None)` means it was explicitly set to `null`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
