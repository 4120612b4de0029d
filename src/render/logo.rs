use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{DynamicImage, ImageFormat};

use super::svg_logo::{SVG_MIME, check_svg, looks_like_svg, rasterize_svg, sanitize_svg};
use crate::error::{RenderError, ResourceError};

pub const MAX_LOGO_BYTES: usize = 5 * 1024 * 1024;
/// Logo edge as a share of the image edge.
pub const LOGO_SCALE: f64 = 0.2;
/// Safe-mode padding on each side, as a share of the logo edge.
pub const SAFE_PAD_SCALE: f64 = 0.08;

/// Where the logo sits inside a `size`×`size` image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogoBox {
    pub size: u32,
    pub offset: u32,
    pub pad: f64,
}

impl LogoBox {
    pub fn for_image(size: u32) -> Self {
        let logo_size = (size as f64 * LOGO_SCALE).round() as u32;
        let offset = ((size - logo_size) as f64 / 2.0).round() as u32;
        Self {
            size: logo_size,
            offset,
            pad: logo_size as f64 * SAFE_PAD_SCALE,
        }
    }
}

const MIB: usize = 1024 * 1024;
const KIB: usize = 1024;

/// Human-readable byte limit: `5MB`, `1.5MB`, `512KB`, `100 bytes`.
pub fn format_limit(bytes: usize) -> String {
    if bytes >= MIB {
        if bytes % MIB == 0 {
            format!("{}MB", bytes / MIB)
        } else {
            format!("{:.1}MB", bytes as f64 / MIB as f64)
        }
    } else if bytes >= KIB {
        format!("{}KB", (bytes as f64 / KIB as f64).round() as usize)
    } else {
        format!("{} bytes", bytes)
    }
}

fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Split a `data:<mime>;base64,<data>` URL into its mime type and decoded bytes.
fn parse_data_url(data_url: &str) -> Option<(&str, Vec<u8>)> {
    let (header, data) = data_url.trim().split_once(',')?;
    let mime = header.strip_prefix("data:")?.strip_suffix(";base64")?;
    let bytes = STANDARD.decode(data.trim()).ok()?;
    Some((mime, bytes))
}

/// Validate a logo and turn it into a data URL ready to merge into settings.
///
/// The type is sniffed from the content. PNG and JPEG must decode; SVG is scrubbed of
/// scripts and must still parse.
pub fn load_logo(bytes: &[u8], max_bytes: usize) -> Result<String, ResourceError> {
    if bytes.len() > max_bytes {
        return Err(ResourceError::TooLarge {
            size: bytes.len(),
            limit: format_limit(max_bytes),
        });
    }

    if looks_like_svg(bytes) {
        let clean = sanitize_svg(bytes)?;
        check_svg(clean.as_bytes())?;
        return Ok(to_data_url(SVG_MIME, clean.as_bytes()));
    }

    let format = image::guess_format(bytes).map_err(|_| ResourceError::UnsupportedType)?;
    let mime = match format {
        ImageFormat::Png => "image/png",
        ImageFormat::Jpeg => "image/jpeg",
        _ => return Err(ResourceError::UnsupportedType),
    };
    image::load_from_memory_with_format(bytes, format).map_err(ResourceError::Undecodable)?;

    Ok(to_data_url(mime, bytes))
}

/// Run a data URL from client settings through the same checks as an upload.
/// Returns the data URL to store, which may differ (sanitized SVG, corrected mime).
pub fn check_logo_data_url(data_url: &str, max_bytes: usize) -> Result<String, ResourceError> {
    let (_, bytes) = parse_data_url(data_url).ok_or(ResourceError::MalformedDataUrl)?;
    load_logo(&bytes, max_bytes)
}

/// Decode a stored logo back into an image. SVG logos are rasterized.
pub fn decode_logo(data_url: &str) -> Result<DynamicImage, RenderError> {
    let (mime, bytes) = parse_data_url(data_url)
        .ok_or_else(|| RenderError::Logo("expected a base64 data URL".to_string()))?;
    if mime == SVG_MIME || looks_like_svg(&bytes) {
        return rasterize_svg(&bytes).map(DynamicImage::ImageRgba8);
    }
    image::load_from_memory(&bytes).map_err(|e| RenderError::Logo(e.to_string()))
}
