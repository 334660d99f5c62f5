//! Unified error type for the admin-plus extension.

use thiserror::Error;

/// Every failure the extension can surface, from configuration to Discord I/O.
#[derive(Debug, Error)]
pub enum Error {
    /// Settings or catalog seed could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// Any sea-orm failure (connection, query, constraint)
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Filesystem failure while saving uploads or creating the data directory
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Required environment variable missing or not unicode
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Discord id outside the `i64` range
    #[error("Integer conversion error: {0}")]
    TryFromInt(#[from] std::num::TryFromIntError),

    /// Uploaded file name has no `.ext` suffix
    #[error("The file you uploaded lacks an extension. ({filename})")]
    MissingExtension {
        /// The rejected file name
        filename: String,
    },

    /// No enabled collectible carries a positive spawn weight
    #[error("No spawnable collectible is registered")]
    EmptyCatalog,

    /// Serenity/poise failure, boxed to keep the enum small
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
