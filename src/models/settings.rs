use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::error::ResourceError;
use crate::render::logo::check_logo_data_url;

pub const SIZE_RANGE: RangeInclusive<u32> = 256..=2048;
pub const MARGIN_RANGE: RangeInclusive<u32> = 2..=12;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EccLevel {
    L,
    #[default]
    M,
    Q,
    H,
}

impl From<EccLevel> for qrcode::EcLevel {
    fn from(level: EccLevel) -> Self {
        match level {
            EccLevel::L => qrcode::EcLevel::L,
            EccLevel::M => qrcode::EcLevel::M,
            EccLevel::Q => qrcode::EcLevel::Q,
            EccLevel::H => qrcode::EcLevel::H,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid hex color: {0:?}")]
pub struct ColorError(pub String);

/// A `#rgb` or `#rrggbb` color. The leading `#` is optional on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    raw: String,
    rgb: [u8; 3],
}

impl HexColor {
    pub fn parse(value: &str) -> Result<Self, ColorError> {
        let trimmed = value.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(ColorError(value.to_string())),
        };
        if !expanded.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError(value.to_string()));
        }
        let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16);
        let rgb = match (channel(0), channel(2), channel(4)) {
            (Ok(r), Ok(g), Ok(b)) => [r, g, b],
            _ => return Err(ColorError(value.to_string())),
        };
        Ok(Self {
            raw: format!("#{}", digits),
            rgb,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn rgb(&self) -> [u8; 3] {
        self.rgb
    }

    /// Colors compare case-insensitively on their spelled form.
    pub fn matches(&self, other: &HexColor) -> bool {
        self.raw.eq_ignore_ascii_case(&other.raw)
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.raw
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn gray(raw: &str, level: u8) -> HexColor {
    HexColor {
        raw: raw.to_string(),
        rgb: [level; 3],
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrColors {
    pub foreground: HexColor,
    pub background: HexColor,
}

impl Default for QrColors {
    fn default() -> Self {
        Self {
            foreground: gray("#111111", 0x11),
            background: gray("#ffffff", 0xff),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QrLogo {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_url: Option<String>,
    pub safe_mode: bool,
}

impl Default for QrLogo {
    fn default() -> Self {
        Self {
            enabled: false,
            data_url: None,
            safe_mode: true,
        }
    }
}

impl QrLogo {
    /// Enabled and actually carrying an image.
    pub fn is_active(&self) -> bool {
        self.enabled && self.data_url.as_deref().is_some_and(|url| !url.is_empty())
    }

    /// Run the carried image (if any) through the upload checks. A blank data URL
    /// counts as no logo.
    pub fn checked(mut self, max_logo_bytes: usize) -> Result<Self, ResourceError> {
        self.data_url = match self.data_url.take() {
            Some(url) if !url.trim().is_empty() => Some(check_logo_data_url(&url, max_logo_bytes)?),
            _ => None,
        };
        Ok(self)
    }
}

/// Rendering parameters, independent of payload content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QrSettings {
    pub size: u32,
    pub margin: u32,
    pub ecc_level: EccLevel,
    pub colors: QrColors,
    pub logo: QrLogo,
}

impl Default for QrSettings {
    fn default() -> Self {
        Self {
            size: 512,
            margin: 4,
            ecc_level: EccLevel::M,
            colors: QrColors::default(),
            logo: QrLogo::default(),
        }
    }
}

fn clamp_to(value: i64, range: &RangeInclusive<u32>) -> u32 {
    value.clamp(*range.start() as i64, *range.end() as i64) as u32
}

impl QrSettings {
    /// Clamp size and margin into their documented ranges.
    pub fn normalized(mut self) -> Self {
        self.size = clamp_to(self.size as i64, &SIZE_RANGE);
        self.margin = clamp_to(self.margin as i64, &MARGIN_RANGE);
        self
    }

    /// Merge a patch: only the fields it names are overridden, nested colors and logo
    /// are merged field by field, and numeric values are clamped.
    pub fn apply(&self, patch: &SettingsPatch) -> QrSettings {
        let mut next = self.clone();
        if let Some(size) = patch.size {
            next.size = clamp_to(size, &SIZE_RANGE);
        }
        if let Some(margin) = patch.margin {
            next.margin = clamp_to(margin, &MARGIN_RANGE);
        }
        if let Some(level) = patch.ecc_level {
            next.ecc_level = level;
        }
        if let Some(colors) = &patch.colors {
            if let Some(foreground) = &colors.foreground {
                next.colors.foreground = foreground.clone();
            }
            if let Some(background) = &colors.background {
                next.colors.background = background.clone();
            }
        }
        if let Some(logo) = &patch.logo {
            if let Some(enabled) = logo.enabled {
                next.logo.enabled = enabled;
            }
            if let Some(data_url) = &logo.data_url {
                next.logo.data_url = data_url.clone();
            }
            if let Some(safe_mode) = logo.safe_mode {
                next.logo.safe_mode = safe_mode;
            }
        }
        next.normalized()
    }

    /// [`QrSettings::apply`] for untrusted patches: a logo image in the patch must pass
    /// the upload checks before it is merged. On error `self` is untouched.
    pub fn try_apply(
        &self,
        patch: &SettingsPatch,
        max_logo_bytes: usize,
    ) -> Result<QrSettings, ResourceError> {
        let mut next = self.apply(patch);
        let carries_logo = patch
            .logo
            .as_ref()
            .is_some_and(|logo| matches!(logo.data_url, Some(Some(_))));
        if carries_logo {
            next.logo = next.logo.checked(max_logo_bytes)?;
        }
        Ok(next)
    }

    /// Normalize settings received whole from a client, checking any logo they carry.
    pub fn checked(self, max_logo_bytes: usize) -> Result<QrSettings, ResourceError> {
        let mut settings = self.normalized();
        settings.logo = settings.logo.checked(max_logo_bytes)?;
        Ok(settings)
    }

    pub fn effective_ecc_level(&self) -> EccLevel {
        effective_ecc_level(self)
    }
}

/// The level actually used to encode: `Q` whenever a logo is enabled and present,
/// otherwise the stored preference. The stored preference is never rewritten.
pub fn effective_ecc_level(settings: &QrSettings) -> EccLevel {
    if settings.logo.is_active() {
        EccLevel::Q
    } else {
        settings.ecc_level
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground: Option<HexColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<HexColor>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// `None` leaves the logo alone, `Some(None)` (JSON `null`) removes it.
    #[serde(
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub data_url: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safe_mode: Option<bool>,
}

/// A partial [`QrSettings`]. Sizes are signed so out-of-range input clamps instead of
/// failing to parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ecc_level: Option<EccLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<ColorsPatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<LogoPatch>,
}

fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
