//! Discord interaction handlers
//!
//! Handlers for interactions that are not commands themselves.

/// Autocomplete handlers for collectible and special parameters
pub mod autocomplete;
