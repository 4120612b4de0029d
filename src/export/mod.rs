//! Print layouts: one or more copies of the rendered QR image placed on a page.

pub mod pdf;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use pdf::render_pdf;

use crate::error::RenderError;
use crate::models::settings::QrSettings;
use crate::payload::QrKind;
use crate::render::{encode_png, render_raster, render_svg};

/// Margin around the single centered copy, in points.
pub const SINGLE_PAGE_MARGIN: f64 = 48.0;
/// Share of the smaller cell edge a label copy may occupy.
pub const LABEL_FILL: f64 = 0.75;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl PageSize {
    /// Page width and height in PDF points.
    pub fn dimensions(&self) -> (f64, f64) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::Letter => (612.0, 792.0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PageSize::A4 => "A4",
            PageSize::Letter => "Letter",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelLayout {
    #[default]
    #[serde(rename = "single")]
    Single,
    #[serde(rename = "grid-2x5")]
    Grid2x5,
    #[serde(rename = "grid-3x8")]
    Grid3x8,
}

impl LabelLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelLayout::Single => "single",
            LabelLayout::Grid2x5 => "grid-2x5",
            LabelLayout::Grid3x8 => "grid-3x8",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LabelLayout::Single => "Single",
            LabelLayout::Grid2x5 => "2 x 5 labels",
            LabelLayout::Grid3x8 => "3 x 8 labels",
        }
    }

    /// Columns and rows, or `None` for the single centered copy.
    pub fn grid(&self) -> Option<(u32, u32)> {
        match self {
            LabelLayout::Single => None,
            LabelLayout::Grid2x5 => Some((2, 5)),
            LabelLayout::Grid3x8 => Some((3, 8)),
        }
    }
}

impl fmt::Display for LabelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One copy of the image on the page. `x`/`y` is the lower-left corner in PDF space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

/// Where each copy goes. `image_size` is the rendered image edge in pixels; the single
/// layout never scales the image above one point per pixel.
pub fn placements(page: PageSize, layout: LabelLayout, image_size: u32) -> Vec<Placement> {
    let (width, height) = page.dimensions();

    let Some((cols, rows)) = layout.grid() else {
        let max_size = (width - SINGLE_PAGE_MARGIN * 2.0).min(height - SINGLE_PAGE_MARGIN * 2.0);
        let size = max_size.min(image_size as f64);
        return vec![Placement {
            x: (width - size) / 2.0,
            y: (height - size) / 2.0,
            size,
        }];
    };

    let cell_width = width / cols as f64;
    let cell_height = height / rows as f64;
    let size = cell_width.min(cell_height) * LABEL_FILL;

    let mut out = Vec::with_capacity((cols * rows) as usize);
    for row in 0..rows {
        for col in 0..cols {
            out.push(Placement {
                x: col as f64 * cell_width + (cell_width - size) / 2.0,
                y: height - (row + 1) as f64 * cell_height + (cell_height - size) / 2.0,
                size,
            });
        }
    }
    out
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    Svg,
    Pdf,
}

impl ExportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Svg => "image/svg+xml;charset=utf-8",
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

/// Download name, e.g. `qr-wifi.png` or `qr-wifi-grid-2x5-A4.pdf`.
pub fn file_name(kind: QrKind, format: ExportFormat, page: PageSize, layout: LabelLayout) -> String {
    match format {
        ExportFormat::Png => format!("qr-{}.png", kind),
        ExportFormat::Svg => format!("qr-{}.svg", kind),
        ExportFormat::Pdf => format!("qr-{}-{}-{}.pdf", kind, layout, page.as_str()),
    }
}

/// Render `payload` into the bytes of the requested download format.
pub fn render_export(
    payload: &str,
    settings: &QrSettings,
    format: ExportFormat,
    page: PageSize,
    layout: LabelLayout,
) -> Result<Vec<u8>, RenderError> {
    match format {
        ExportFormat::Svg => Ok(render_svg(payload, settings)?.into_bytes()),
        ExportFormat::Png => encode_png(&render_raster(payload, settings)?),
        ExportFormat::Pdf => {
            let image = render_raster(payload, settings)?;
            render_pdf(&image, settings.colors.background.rgb(), page, layout)
        }
    }
}
