use actix_web::http::header;
use actix_web::{HttpResponse, Responder, Result, error, web};
use log::{info, warn};

use super::settings_handlers::rejected_logo;
use crate::export::{file_name, render_export};
use crate::models::quality::{LOW_CONTRAST_THRESHOLD, compute_scan_quality, contrast_ratio};
use crate::models::settings::QrSettings;
use crate::payload::build_payload;
use crate::state::app_state::AppState;
use crate::structs::qr_request::{QrRequest, QualityRequest, QualityResponse, ValidationFailure};
use crate::validation::validate;

/// Validate the input, render it and return the file in the requested format
pub async fn generate_qr(
    app_state: web::Data<AppState>,
    web::Json(req): web::Json<QrRequest>,
) -> Result<impl Responder> {
    let input = match validate(req.input) {
        Ok(input) => input,
        Err(errors) => return Ok(HttpResponse::BadRequest().json(ValidationFailure { errors })),
    };

    let payload = build_payload(&input);
    let settings =
        match QrSettings::default().try_apply(&req.settings, app_state.config.max_logo_bytes) {
            Ok(settings) => settings,
            Err(e) => return Ok(rejected_logo(e)),
        };
    let (format, page_size, layout) = (req.format, req.page_size, req.layout);
    let name = file_name(input.kind(), format, page_size, layout);

    // Rendering is CPU bound, keep it off the async workers
    let rendered = web::block(move || render_export(&payload, &settings, format, page_size, layout))
        .await
        .map_err(|e| error::ErrorInternalServerError(format!("Render task failed: {}", e)))?;

    match rendered {
        Ok(bytes) => {
            info!("Rendered {} ({} bytes)", name, bytes.len());
            Ok(HttpResponse::Ok()
                .content_type(format.content_type())
                .insert_header((
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", name),
                ))
                .body(bytes))
        }
        Err(e) => {
            warn!("Failed to render {}: {}", name, e);
            Ok(HttpResponse::UnprocessableEntity().json(serde_json::json!({
                "error": e.to_string()
            })))
        }
    }
}

/// Scan-quality heuristic for an already built payload
pub async fn scan_quality(
    app_state: web::Data<AppState>,
    web::Json(req): web::Json<QualityRequest>,
) -> Result<impl Responder> {
    let settings = match req
        .settings
        .unwrap_or_default()
        .checked(app_state.config.max_logo_bytes)
    {
        Ok(settings) => settings,
        Err(e) => return Ok(rejected_logo(e)),
    };
    let quality = compute_scan_quality(&req.payload, &settings);
    let ratio = contrast_ratio(&settings.colors.foreground, &settings.colors.background);

    Ok(HttpResponse::Ok().json(QualityResponse {
        score: quality.score,
        label: quality.label,
        contrast_ratio: (ratio * 100.0).round() / 100.0,
        low_contrast: ratio < LOW_CONTRAST_THRESHOLD,
        effective_ecc_level: settings.effective_ecc_level(),
    }))
}
