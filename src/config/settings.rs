//! Bot settings loaded from `config.toml`.
//!
//! Settings cover naming (bot and collectible names), the guilds the admin commands
//! are registered in, the role sets allowed to run them, and the optional audit
//! log channel. The catalog seed lives in the same file, see [`super::catalog`].

use crate::config::catalog::{BallSeed, SpecialSeed};
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Default location of the settings file
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

fn default_group_name() -> String {
    "balls".to_string()
}

fn default_collectible_name() -> String {
    "countryball".to_string()
}

fn default_plural_collectible_name() -> String {
    "countryballs".to_string()
}

/// Parsed `config.toml`
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Display name of the bot, used in listing titles
    pub bot_name: String,
    /// Singular collectible noun, e.g. `countryball`
    #[serde(default = "default_collectible_name")]
    pub collectible_name: String,
    /// Plural collectible noun, e.g. `countryballs`
    #[serde(default = "default_plural_collectible_name")]
    pub plural_collectible_name: String,
    /// Name of the collectible management subgroup (`/adminplus balls ...`)
    #[serde(default = "default_group_name")]
    pub players_group_cog_name: String,
    /// Guilds the admin commands are registered in
    #[serde(default)]
    pub admin_guild_ids: Vec<u64>,
    /// Roles allowed to run every command
    #[serde(default)]
    pub root_role_ids: Vec<u64>,
    /// Roles allowed to run the non-root commands
    #[serde(default)]
    pub admin_role_ids: Vec<u64>,
    /// Channel that receives audit lines
    #[serde(default)]
    pub log_channel: Option<u64>,
    /// Whether the gateway `GUILD_MEMBERS` intent is requested
    #[serde(default)]
    pub members_intent: bool,
    /// Collectibles to seed into the database
    #[serde(default)]
    pub balls: Vec<BallSeed>,
    /// Specials to seed into the database
    #[serde(default)]
    pub specials: Vec<SpecialSeed>,
}

impl Settings {
    /// `true` if any of `roles` is a root role.
    #[must_use]
    pub fn is_root(&self, roles: &[u64]) -> bool {
        roles.iter().any(|role| self.root_role_ids.contains(role))
    }

    /// `true` if any of `roles` is a root or admin role.
    #[must_use]
    pub fn is_root_or_admin(&self, roles: &[u64]) -> bool {
        self.is_root(roles) || roles.iter().any(|role| self.admin_role_ids.contains(role))
    }

    /// Collectible noun with its first letter upper-cased.
    #[must_use]
    pub fn collectible_title(&self) -> String {
        let mut chars = self.collectible_name.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns `Error::Config` if the file cannot be read or does not parse.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path_ref:?}: {e}"),
    })?;

    parse_settings(&contents)
}

/// Parses settings from TOML text.
pub fn parse_settings(contents: &str) -> Result<Settings> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads settings from `ADMINPLUS_CONFIG`, or `config.toml` when unset.
pub fn load_default_settings() -> Result<Settings> {
    let path =
        std::env::var("ADMINPLUS_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    load_settings(path)
}
