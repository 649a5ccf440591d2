//! HTTP surface (`with-server` feature).
//!
//! - `GET /validate?email=..&timeout=..&verbose=true` runs the pipeline and
//!   answers with the JSON [`ValidationResult`](crate::ValidationResult).
//! - `GET /health` answers `{"status":"healthy","service":"secure-email-validator"}`.
//!
//! Validations are blocking, so they run on actix-web's blocking pool.

mod routes;

pub use routes::{ErrorResponse, HealthResponse, ValidateQuery, configure};

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing::info;

use crate::pipeline::{SystemValidator, Validate};

pub const DEFAULT_PORT: u16 = 8587;

/// Serve the routes with the system probes until the server is stopped.
pub async fn run(bind: &str, port: u16) -> std::io::Result<()> {
    let validator: Arc<dyn Validate> = Arc::new(SystemValidator);
    run_with(validator, bind, port).await
}

pub async fn run_with(validator: Arc<dyn Validate>, bind: &str, port: u16) -> std::io::Result<()> {
    let data = web::Data::from(validator);
    info!(bind, port, "HTTP server listening");
    info!("validation endpoint: http://{bind}:{port}/validate?email=test@example.com");

    HttpServer::new(move || App::new().app_data(data.clone()).configure(configure))
        .bind((bind, port))?
        .run()
        .await
}
