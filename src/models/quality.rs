use serde::Serialize;

use super::settings::{HexColor, QrSettings};

/// Ratios below this are flagged as low contrast.
pub const LOW_CONTRAST_THRESHOLD: f64 = 3.0;
/// Ratios below this still cost points in the scan score.
pub const GOOD_CONTRAST_THRESHOLD: f64 = 4.5;

fn to_linear(channel: u8) -> f64 {
    let value = channel as f64 / 255.0;
    if value <= 0.03928 {
        value / 12.92
    } else {
        ((value + 0.055) / 1.055).powf(2.4)
    }
}

/// WCAG relative luminance.
pub fn relative_luminance(color: &HexColor) -> f64 {
    let [r, g, b] = color.rgb();
    0.2126 * to_linear(r) + 0.7152 * to_linear(g) + 0.0722 * to_linear(b)
}

/// `(lighter + 0.05) / (darker + 0.05)`, in `1.0..=21.0` and symmetric in its arguments.
pub fn contrast_ratio(foreground: &HexColor, background: &HexColor) -> f64 {
    let l1 = relative_luminance(foreground);
    let l2 = relative_luminance(background);
    let lighter = l1.max(l2);
    let darker = l1.min(l2);
    (lighter + 0.05) / (darker + 0.05)
}

pub fn is_low_contrast(foreground: &HexColor, background: &HexColor, threshold: f64) -> bool {
    contrast_ratio(foreground, background) < threshold
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QualityLabel {
    Excellent,
    Good,
    Fair,
    Risky,
    #[serde(rename = "Waiting for data")]
    WaitingForData,
}

impl QualityLabel {
    fn for_score(score: u8) -> Self {
        match score {
            80.. => QualityLabel::Excellent,
            60..=79 => QualityLabel::Good,
            40..=59 => QualityLabel::Fair,
            _ => QualityLabel::Risky,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScanQuality {
    pub score: u8,
    pub label: QualityLabel,
}

/// Heuristic 0–100 score for how reliably the symbol will scan.
pub fn compute_scan_quality(payload: &str, settings: &QrSettings) -> ScanQuality {
    if payload.is_empty() {
        return ScanQuality {
            score: 0,
            label: QualityLabel::WaitingForData,
        };
    }

    let contrast = contrast_ratio(&settings.colors.foreground, &settings.colors.background);
    let mut score: i32 = 100;
    if contrast < LOW_CONTRAST_THRESHOLD {
        score -= 40;
    } else if contrast < GOOD_CONTRAST_THRESHOLD {
        score -= 20;
    }
    if settings.margin < 4 {
        score -= 15;
    }
    if settings.size < 320 {
        score -= 15;
    }
    if settings.logo.enabled {
        score -= 10;
    }

    let score = score.clamp(0, 100) as u8;
    ScanQuality {
        score,
        label: QualityLabel::for_score(score),
    }
}
