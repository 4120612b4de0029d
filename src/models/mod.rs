pub mod preset;
pub mod quality;
pub mod settings;
