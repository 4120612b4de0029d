//! Static QR code generation: payload builders, validation, settings and presets,
//! rendering to SVG/PNG, print-ready PDF export, and the HTTP API serving them.

pub mod config;
pub mod error;
pub mod export;
pub mod handlers;
pub mod models;
pub mod payload;
pub mod render;
pub mod routes;
pub mod state;
pub mod structs;
pub mod utils;
pub mod validation;

pub use config::{AppConfig, ConfigError};
pub use error::{RenderError, ResourceError};
pub use models::settings::{EccLevel, QrSettings, SettingsPatch};
pub use payload::{PayloadInput, QrKind, build_payload};
pub use validation::{FieldErrors, validate};
