use serde::Serialize;

use super::settings::{ColorsPatch, EccLevel, HexColor, QrSettings, SettingsPatch};

/// A named settings patch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preset {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub apply: SettingsPatch,
}

fn color(value: &str) -> Option<HexColor> {
    HexColor::parse(value).ok()
}

pub fn presets() -> Vec<Preset> {
    vec![
        Preset {
            id: "print",
            label: "Print (hi-res)",
            description: "1024px PNG plus clean SVG",
            apply: SettingsPatch {
                size: Some(1024),
                margin: Some(4),
                ecc_level: Some(EccLevel::Q),
                ..Default::default()
            },
        },
        Preset {
            id: "stickers",
            label: "Stickers",
            description: "Extra quiet zone for small prints",
            apply: SettingsPatch {
                size: Some(512),
                margin: Some(8),
                ecc_level: Some(EccLevel::Q),
                ..Default::default()
            },
        },
        Preset {
            id: "dark",
            label: "Dark mode safe",
            description: "High contrast light-on-dark",
            apply: SettingsPatch {
                ecc_level: Some(EccLevel::Q),
                colors: Some(ColorsPatch {
                    foreground: color("#f8fafc"),
                    background: color("#0b0f1a"),
                }),
                ..Default::default()
            },
        },
    ]
}

pub fn find_preset(id: &str) -> Option<Preset> {
    presets().into_iter().find(|preset| preset.id == id)
}

pub fn apply_preset(settings: &QrSettings, preset: &Preset) -> QrSettings {
    settings.apply(&preset.apply)
}

/// A preset is active when every field it specifies matches the current settings.
/// Fields it leaves out are ignored.
pub fn is_preset_match(settings: &QrSettings, preset: &Preset) -> bool {
    let apply = &preset.apply;

    if apply.size.is_some_and(|size| size != settings.size as i64) {
        return false;
    }
    if apply.margin.is_some_and(|margin| margin != settings.margin as i64) {
        return false;
    }
    if apply.ecc_level.is_some_and(|level| level != settings.ecc_level) {
        return false;
    }
    if let Some(colors) = &apply.colors {
        let colors_match = colors
            .foreground
            .as_ref()
            .is_none_or(|fg| fg.matches(&settings.colors.foreground))
            && colors
                .background
                .as_ref()
                .is_none_or(|bg| bg.matches(&settings.colors.background));
        if !colors_match {
            return false;
        }
    }
    if let Some(logo) = &apply.logo {
        if logo.enabled.is_some_and(|enabled| enabled != settings.logo.enabled) {
            return false;
        }
        if logo
            .safe_mode
            .is_some_and(|safe_mode| safe_mode != settings.logo.safe_mode)
        {
            return false;
        }
    }

    true
}

pub fn active_presets(settings: &QrSettings) -> Vec<&'static str> {
    presets()
        .iter()
        .filter(|preset| is_preset_match(settings, preset))
        .map(|preset| preset.id)
        .collect()
}
