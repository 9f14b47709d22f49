//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{dashboard, equipment, health, maintenance_logs, schedules, work_orders};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "MedTrack API",
        version = "1.0.0",
        description = "Biomedical Equipment Maintenance Tracker REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "MedTrack Team", email = "contact@medtrack.example")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::maintenance_history,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        // Maintenance schedules
        schedules::list_schedules,
        schedules::overdue_schedules,
        schedules::upcoming_schedules,
        schedules::get_schedule,
        schedules::create_schedule,
        schedules::update_schedule,
        schedules::delete_schedule,
        // Maintenance logs
        maintenance_logs::list_logs,
        maintenance_logs::get_log,
        maintenance_logs::create_log,
        maintenance_logs::update_log,
        maintenance_logs::delete_log,
        // Work orders
        work_orders::list_work_orders,
        work_orders::get_work_order,
        work_orders::create_work_order,
        work_orders::update_work_order,
        work_orders::delete_work_order,
        // Dashboard
        dashboard::get_stats,
    ),
    components(
        schemas(
            crate::error::ErrorResponse,
            health::HealthResponse,
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            // Maintenance schedules
            crate::models::schedule::MaintenanceSchedule,
            crate::models::schedule::CreateSchedule,
            crate::models::schedule::UpdateSchedule,
            // Maintenance logs
            crate::models::maintenance_log::MaintenanceLog,
            crate::models::maintenance_log::CreateLog,
            crate::models::maintenance_log::UpdateLog,
            // Work orders
            crate::models::work_order::WorkOrder,
            crate::models::work_order::CreateWorkOrder,
            crate::models::work_order::UpdateWorkOrder,
            // Dashboard
            dashboard::DashboardStats,
            dashboard::EquipmentByStatus,
            // Enums
            crate::models::enums::EquipmentStatus,
            crate::models::enums::Priority,
            crate::models::enums::WorkOrderStatus,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Service health"),
        (name = "equipment", description = "Equipment inventory"),
        (name = "maintenance-schedules", description = "Recurring maintenance schedules"),
        (name = "maintenance-logs", description = "Performed maintenance records"),
        (name = "work-orders", description = "Service requests"),
        (name = "dashboard", description = "Aggregated statistics"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("opaque")
                        .build(),
                ),
            );
        }
    }
}

/// Create the Swagger UI router serving the OpenAPI document
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
