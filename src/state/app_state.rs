use actix_web::{HttpResponse, error, web};

use crate::config::AppConfig;

/// Shared, read-only state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Raw body limit for logo uploads. Bodies between the logo limit and this one
    /// still reach the handler, so the user gets the size message instead of a bare 413.
    pub fn payload_config(&self) -> web::PayloadConfig {
        web::PayloadConfig::new(self.config.max_logo_bytes.saturating_mul(2))
    }

    /// JSON limit large enough for settings carrying a base64 logo. Malformed bodies
    /// answer with a JSON error like every other rejection.
    pub fn json_config(&self) -> web::JsonConfig {
        web::JsonConfig::default()
            .limit(self.config.max_logo_bytes.saturating_mul(2))
            .error_handler(|err, _req| {
                let message = err.to_string();
                error::InternalError::from_response(
                    err,
                    HttpResponse::BadRequest().json(serde_json::json!({ "error": message })),
                )
                .into()
            })
    }
}
