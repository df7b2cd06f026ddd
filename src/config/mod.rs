//! Installation settings (`settings.toml`).

pub mod settings;

pub use settings::Settings;
