use serde::{Deserialize, Serialize};

use crate::export::{ExportFormat, LabelLayout, PageSize};
use crate::models::preset::Preset;
use crate::models::quality::QualityLabel;
use crate::models::settings::{EccLevel, QrSettings, SettingsPatch};
use crate::structs::payload_request::PayloadRequest;
use crate::validation::FieldErrors;

/// Render request: raw form input plus the settings to apply on top of the defaults.
#[derive(Debug, Deserialize)]
pub struct QrRequest {
    pub input: PayloadRequest,
    #[serde(default)]
    pub settings: SettingsPatch,
    #[serde(default)]
    pub format: ExportFormat,
    #[serde(default)]
    pub page_size: PageSize,
    #[serde(default)]
    pub layout: LabelLayout,
}

#[derive(Debug, Serialize)]
pub struct PayloadResponse {
    pub payload: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ValidationFailure {
    pub errors: FieldErrors,
}

#[derive(Debug, Deserialize)]
pub struct QualityRequest {
    pub payload: String,
    #[serde(default)]
    pub settings: Option<QrSettings>,
}

#[derive(Debug, Serialize)]
pub struct QualityResponse {
    pub score: u8,
    pub label: QualityLabel,
    pub contrast_ratio: f64,
    pub low_contrast: bool,
    pub effective_ecc_level: EccLevel,
}

/// Settings update. The preset (if any) is applied first, then the patch.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SettingsRequest {
    pub settings: Option<QrSettings>,
    pub patch: Option<SettingsPatch>,
    pub preset: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub settings: QrSettings,
    pub active_presets: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct PresetsResponse {
    pub presets: Vec<Preset>,
}

#[derive(Debug, Serialize)]
pub struct LogoResponse {
    pub data_url: String,
}
