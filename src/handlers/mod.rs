pub mod health_handlers;
pub mod payload_handlers;
pub mod qr_handlers;
pub mod settings_handlers;
