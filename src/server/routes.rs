use actix_web::http::header::ACCESS_CONTROL_ALLOW_ORIGIN;
use actix_web::{HttpResponse, Responder, get, web};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::config::CheckerConfig;
use crate::pipeline::Validate;

pub const SERVICE_NAME: &str = "secure-email-validator";

/// Query string of `GET /validate`. Every field is optional so a missing
/// `email` becomes a 400 with a JSON body instead of actix's plain-text error.
#[derive(Debug, Default, Deserialize)]
pub struct ValidateQuery {
    pub email: Option<String>,
    pub timeout: Option<String>,
    pub verbose: Option<String>,
}

impl ValidateQuery {
    /// Unparsable, negative or zero timeouts fall back to the default.
    pub fn config(&self) -> CheckerConfig {
        let timeout = self
            .timeout
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u64>().ok());
        CheckerConfig::lenient(timeout, self.verbose.as_deref() == Some("true"))
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            service: SERVICE_NAME.to_string(),
        }
    }
}

#[get("/validate")]
async fn validate(
    validator: web::Data<dyn Validate>,
    query: web::Query<ValidateQuery>,
) -> impl Responder {
    let query = query.into_inner();
    let config = query.config();
    let Some(email) = query.email.filter(|email| !email.is_empty()) else {
        return HttpResponse::BadRequest().json(ErrorResponse::new("Email parameter required"));
    };

    let validator = validator.into_inner();
    match web::block(move || validator.validate(&email, &config)).await {
        Ok(result) => HttpResponse::Ok()
            .insert_header((ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
            .json(result),
        Err(err) => {
            error!("validation task failed: {err}");
            HttpResponse::InternalServerError().json(ErrorResponse::new("Failed to validate email"))
        }
    }
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse::healthy())
}

/// Registers `/validate` and `/health`. The app must provide a
/// `web::Data<dyn Validate>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(validate).service(health);
}
