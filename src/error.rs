use thiserror::Error;

/// Failures of the rendering path. None of them are fatal: the caller keeps its
/// previous image (if any) and shows the message.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Nothing to encode yet.")]
    EmptyPayload,
    #[error("Unable to generate QR code: {0}")]
    Encode(#[from] qrcode::types::QrError),
    #[error("Logo could not be used: {0}")]
    Logo(String),
    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("PDF export failed: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("Could not write output: {0}")]
    Io(#[from] std::io::Error),
    #[error("Render task failed: {0}")]
    Worker(String),
}

/// Rejected logos, from an upload or from settings. Settings are left unchanged when one
/// of these is returned.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("Logo must be {limit} or smaller.")]
    TooLarge { size: usize, limit: String },
    #[error("Only PNG, JPG, or SVG files are allowed.")]
    UnsupportedType,
    #[error("Logo must be a base64 data URL.")]
    MalformedDataUrl,
    #[error("Logo image could not be decoded: {0}")]
    Undecodable(#[source] image::ImageError),
    #[error("SVG logo could not be read: {0}")]
    InvalidSvg(String),
}
