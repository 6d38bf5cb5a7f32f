//! # Bookline API
//!
//! The API crate provides the web server implementation for the Bookline
//! appointment service. It defines RESTful endpoints for booking, reading,
//! rescheduling, and cancelling appointments on the shared provider calendar.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement the appointment lifecycle logic
//! - **Middleware**: Provide cross-cutting concerns like identity and error handling
//! - **Notify**: Deliver post-commit webhook notifications
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework and SQLx for database interactions.

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement the appointment lifecycle
pub mod handlers;
/// Middleware for identity resolution and error handling
pub mod middleware;
/// Webhook delivery for appointment notifications
pub mod notify;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;

use axum::Router;
use bookline_core::clock::{Clock, SystemClock};
use bookline_core::notify::{Notifier, NullNotifier};
use eyre::Result;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
///
/// This struct encapsulates dependencies that are shared across the
/// application: the database connection pool and the injectable clock
/// and notifier collaborators.
pub struct ApiState {
    /// PostgreSQL connection pool for database operations
    pub db_pool: PgPool,

    /// Time source for past-start validation
    pub clock: Arc<dyn Clock>,

    /// Post-commit notification delivery
    pub notifier: Arc<dyn Notifier>,
}

/// Starts the API server with the provided configuration and database connection
///
/// This function initializes logging, wires up the collaborator
/// implementations, configures routes, and starts the HTTP server.
///
/// # Arguments
///
/// * `config` - API configuration including host, port, and other settings
/// * `db_pool` - PostgreSQL connection pool for database operations
///
/// # Returns
///
/// * `Result<()>` - Success or error result
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Notifications go to the configured webhook, or nowhere
    let notifier: Arc<dyn Notifier> = match &config.notify_webhook_url {
        Some(url) => Arc::new(notify::WebhookNotifier::new(url.clone())),
        None => Arc::new(NullNotifier),
    };

    // Create shared state with dependencies
    let state = Arc::new(ApiState {
        db_pool,
        clock: Arc::new(SystemClock),
        notifier,
    });

    // Build the application router with all routes
    let app = Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Appointment lifecycle endpoints
        .merge(routes::appointment::routes())
        // Attach shared state to all routes
        .with_state(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(tower_http::cors::AllowOrigin::list(
                origins
                    .iter()
                    .filter_map(|origin| origin.parse::<axum::http::HeaderValue>().ok()),
            ))
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(tower_http::timeout::TimeoutLayer::new(
        std::time::Duration::from_secs(config.request_timeout),
    ));

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
