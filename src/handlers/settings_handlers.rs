use actix_web::{HttpResponse, Responder, Result, web};
use log::{info, warn};

use crate::error::ResourceError;
use crate::models::preset::{active_presets, apply_preset, find_preset, presets};
use crate::render::logo::load_logo;
use crate::state::app_state::AppState;
use crate::structs::qr_request::{LogoResponse, PresetsResponse, SettingsRequest, SettingsResponse};

pub async fn get_presets() -> Result<impl Responder> {
    Ok(HttpResponse::Ok().json(PresetsResponse { presets: presets() }))
}

pub(crate) fn rejected_logo(e: ResourceError) -> HttpResponse {
    warn!("Rejected logo in settings: {}", e);
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

/// Merge a preset and/or patch into the given settings (defaults when absent)
pub async fn update_settings(
    app_state: web::Data<AppState>,
    web::Json(req): web::Json<SettingsRequest>,
) -> Result<impl Responder> {
    let max_logo_bytes = app_state.config.max_logo_bytes;
    let mut settings = match req.settings.unwrap_or_default().checked(max_logo_bytes) {
        Ok(settings) => settings,
        Err(e) => return Ok(rejected_logo(e)),
    };

    if let Some(id) = req.preset.as_deref() {
        match find_preset(id) {
            Some(preset) => settings = apply_preset(&settings, &preset),
            None => {
                return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                    "error": format!("Unknown preset: {}", id)
                })));
            }
        }
    }
    if let Some(patch) = &req.patch {
        settings = match settings.try_apply(patch, max_logo_bytes) {
            Ok(settings) => settings,
            Err(e) => return Ok(rejected_logo(e)),
        };
    }

    let active_presets = active_presets(&settings);
    Ok(HttpResponse::Ok().json(SettingsResponse {
        settings,
        active_presets,
    }))
}

/// Accept a raw PNG/JPEG/SVG body and hand back a data URL for `logo.data_url`
pub async fn upload_logo(
    app_state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<impl Responder> {
    match load_logo(&body, app_state.config.max_logo_bytes) {
        Ok(data_url) => {
            info!("Accepted logo upload ({} bytes)", body.len());
            Ok(HttpResponse::Ok().json(LogoResponse { data_url }))
        }
        Err(e) => {
            warn!("Rejected logo upload ({} bytes): {}", body.len(), e);
            Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "error": e.to_string()
            })))
        }
    }
}
