//! MedTrack Server - Biomedical Equipment Maintenance Tracker
//!
//! A Rust REST API server for tracking equipment inventory, maintenance
//! schedules, maintenance logs and work orders.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use medtrack_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("medtrack_server={},tower_http=debug", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting MedTrack Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Equipment
        .route("/equipment", get(api::equipment::list_equipment))
        .route("/equipment", post(api::equipment::create_equipment))
        .route("/equipment/:id", get(api::equipment::get_equipment))
        .route("/equipment/:id", put(api::equipment::update_equipment))
        .route("/equipment/:id", delete(api::equipment::delete_equipment))
        .route(
            "/equipment/:id/maintenance-history",
            get(api::equipment::maintenance_history),
        )
        // Maintenance schedules
        .route("/maintenance-schedules", get(api::schedules::list_schedules))
        .route("/maintenance-schedules", post(api::schedules::create_schedule))
        .route(
            "/maintenance-schedules/overdue",
            get(api::schedules::overdue_schedules),
        )
        .route(
            "/maintenance-schedules/upcoming",
            get(api::schedules::upcoming_schedules),
        )
        .route("/maintenance-schedules/:id", get(api::schedules::get_schedule))
        .route("/maintenance-schedules/:id", put(api::schedules::update_schedule))
        .route(
            "/maintenance-schedules/:id",
            delete(api::schedules::delete_schedule),
        )
        // Maintenance logs
        .route("/maintenance-logs", get(api::maintenance_logs::list_logs))
        .route("/maintenance-logs", post(api::maintenance_logs::create_log))
        .route("/maintenance-logs/:id", get(api::maintenance_logs::get_log))
        .route("/maintenance-logs/:id", put(api::maintenance_logs::update_log))
        .route(
            "/maintenance-logs/:id",
            delete(api::maintenance_logs::delete_log),
        )
        // Work orders
        .route("/work-orders", get(api::work_orders::list_work_orders))
        .route("/work-orders", post(api::work_orders::create_work_order))
        .route("/work-orders/:id", get(api::work_orders::get_work_order))
        .route("/work-orders/:id", put(api::work_orders::update_work_order))
        .route("/work-orders/:id", delete(api::work_orders::delete_work_order))
        // Dashboard
        .route("/dashboard/stats", get(api::dashboard::get_stats))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
