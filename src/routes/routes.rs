use actix_web::web;

use crate::handlers::health_handlers::health_check;
use crate::handlers::payload_handlers::create_payload;
use crate::handlers::qr_handlers::{generate_qr, scan_quality};
use crate::handlers::settings_handlers::{get_presets, update_settings, upload_logo};

/// Configure the routes
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health/check", web::get().to(health_check))
            .route("/payload", web::post().to(create_payload))
            .route("/qr", web::post().to(generate_qr))
            .route("/quality", web::post().to(scan_quality))
            .route("/presets", web::get().to(get_presets))
            .route("/settings", web::post().to(update_settings))
            .route("/logo", web::post().to(upload_logo)),
    );
}
