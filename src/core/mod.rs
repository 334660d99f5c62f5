//! Core business logic - framework-agnostic catalog, player, instance and listing operations.
//!
//! Nothing in here knows about Discord; the bot layer injects emoji lookup and
//! turns the returned strings and entries into replies.

/// In-memory collectible and special catalog
pub mod catalog;
/// Dex completion breakdown
pub mod completion;
/// Shared text helpers
pub mod format;
/// Granting and counting instances
pub mod instance;
/// Rarity, special and count leaderboards
pub mod listing;
/// Lazy players and the bot's privacy policy
pub mod player;
/// Spawn candidate selection
pub mod spawn;
/// Upload file naming and saving
pub mod uploads;
