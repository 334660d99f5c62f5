/// Catalog seed definitions from config.toml
pub mod catalog;

/// Database configuration and connection management
pub mod database;

/// Bot settings (names, guilds, role sets, audit channel)
pub mod settings;

pub use settings::Settings;
