//! Turns a payload plus settings into an SVG or PNG image.
//!
//! Symbol encoding is delegated to the `qrcode` crate; this module only lays out the
//! modules with the requested quiet zone, colors and logo overlay.

pub mod logo;
pub mod session;
pub mod svg_logo;

use std::fmt::Write as _;
use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use log::debug;
use qrcode::{Color, QrCode};

use crate::error::RenderError;
use crate::models::settings::{QrSettings, effective_ecc_level};
use logo::{LogoBox, decode_logo};

const SAFE_PAD_FILL: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// The encoded symbol: a square grid of dark/light modules, without quiet zone.
#[derive(Debug, Clone)]
pub struct QrMatrix {
    width: usize,
    dark: Vec<bool>,
}

impl QrMatrix {
    pub fn encode(payload: &str, settings: &QrSettings) -> Result<Self, RenderError> {
        if payload.is_empty() {
            return Err(RenderError::EmptyPayload);
        }
        let level = effective_ecc_level(settings);
        let code = QrCode::with_error_correction_level(payload.as_bytes(), level.into())?;
        let width = code.width();
        let dark = code
            .to_colors()
            .into_iter()
            .map(|color| color == Color::Dark)
            .collect();
        debug!(
            "Encoded {} bytes at level {:?} into {}x{} modules",
            payload.len(),
            level,
            width,
            width
        );
        Ok(Self { width, dark })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.width && self.dark[y * self.width + x]
    }
}

/// Render the symbol as SVG. The canvas is `size` pixels wide; modules are drawn in
/// module units and scaled to fit, quiet zone included.
pub fn render_svg(payload: &str, settings: &QrSettings) -> Result<String, RenderError> {
    let matrix = QrMatrix::encode(payload, settings)?;
    let size = settings.size;
    let margin = settings.margin as usize;
    let total = matrix.width() + 2 * margin;

    let mut path = String::new();
    for y in 0..matrix.width() {
        for x in 0..matrix.width() {
            if matrix.is_dark(x, y) {
                let _ = write!(path, "M{} {}h1v1h-1z", x + margin, y + margin);
            }
        }
    }

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}" shape-rendering="crispEdges">"#
    );
    let _ = write!(
        svg,
        r#"<rect width="{size}" height="{size}" fill="{}"/>"#,
        settings.colors.background
    );
    let _ = write!(
        svg,
        r#"<g transform="scale({})"><path fill="{}" d="{}"/></g>"#,
        size as f64 / total as f64,
        settings.colors.foreground,
        path
    );

    if settings.logo.enabled {
        if let Some(data_url) = settings.logo.data_url.as_deref().filter(|u| !u.is_empty()) {
            let placement = LogoBox::for_image(size);
            if settings.logo.safe_mode {
                let _ = write!(
                    svg,
                    r##"<rect x="{}" y="{}" width="{}" height="{}" rx="6" fill="#ffffff"/>"##,
                    placement.offset as f64 - placement.pad,
                    placement.offset as f64 - placement.pad,
                    placement.size as f64 + 2.0 * placement.pad,
                    placement.size as f64 + 2.0 * placement.pad
                );
            }
            let _ = write!(
                svg,
                r#"<image href="{}" x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="xMidYMid meet"/>"#,
                escape_attr(data_url),
                placement.offset, placement.offset, placement.size, placement.size
            );
        }
    }

    svg.push_str("</svg>");
    Ok(svg)
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}

fn rgba(rgb: [u8; 3]) -> Rgba<u8> {
    Rgba([rgb[0], rgb[1], rgb[2], 255])
}

/// Render the symbol into a `size`×`size` RGBA raster.
pub fn render_raster(payload: &str, settings: &QrSettings) -> Result<RgbaImage, RenderError> {
    let matrix = QrMatrix::encode(payload, settings)?;
    let size = settings.size as u64;
    let margin = settings.margin as u64;
    let total = matrix.width() as u64 + 2 * margin;
    let dark = rgba(settings.colors.foreground.rgb());
    let light = rgba(settings.colors.background.rgb());

    // Nearest-module sampling keeps every module a solid block at any size
    let mut image = RgbaImage::from_fn(settings.size, settings.size, |px, py| {
        let mx = px as u64 * total / size;
        let my = py as u64 * total / size;
        let on = mx >= margin
            && my >= margin
            && matrix.is_dark((mx - margin) as usize, (my - margin) as usize);
        if on { dark } else { light }
    });

    if settings.logo.is_active() {
        if let Some(data_url) = settings.logo.data_url.as_deref() {
            overlay_logo(&mut image, &decode_logo(data_url)?, settings.logo.safe_mode);
        }
    }

    Ok(image)
}

fn overlay_logo(image: &mut RgbaImage, logo: &DynamicImage, safe_mode: bool) {
    let placement = LogoBox::for_image(image.width());
    if placement.size == 0 {
        return;
    }

    if safe_mode {
        let start = (placement.offset as f64 - placement.pad).round().max(0.0) as u32;
        let end = ((placement.offset + placement.size) as f64 + placement.pad).round() as u32;
        let end = end.min(image.width());
        for y in start..end {
            for x in start..end {
                image.put_pixel(x, y, SAFE_PAD_FILL);
            }
        }
    }

    // `resize` keeps the aspect ratio, so center inside the logo box
    let scaled = logo
        .resize(placement.size, placement.size, FilterType::Lanczos3)
        .to_rgba8();
    let x = placement.offset + (placement.size - scaled.width()) / 2;
    let y = placement.offset + (placement.size - scaled.height()) / 2;
    imageops::overlay(image, &scaled, x as i64, y as i64);
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, RenderError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

pub fn render_png(payload: &str, settings: &QrSettings) -> Result<Vec<u8>, RenderError> {
    encode_png(&render_raster(payload, settings)?)
}
