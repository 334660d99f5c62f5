//! Database configuration module.
//!
//! This module handles the `SQLite` connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust models.

use crate::entities::{Ball, BallInstance, Player, Special};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/adminplus.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable or returns
/// the default local `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    tracing::debug!("Connecting to database at {database_url}");

    // SQLite creates the file but not its directory
    if let Some(parent) = database_url
        .strip_prefix("sqlite://")
        .and_then(|rest| rest.split('?').next())
        .and_then(|file| std::path::Path::new(file).parent())
        .filter(|dir| !dir.as_os_str().is_empty())
    {
        tokio::fs::create_dir_all(parent).await?;
    }

    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates all game tables if they do not exist yet.
///
/// Referenced tables are created before `ball_instances` so its foreign keys resolve.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let player_table = schema
        .create_table_from_entity(Player)
        .if_not_exists()
        .to_owned();
    let ball_table = schema.create_table_from_entity(Ball).if_not_exists().to_owned();
    let special_table = schema
        .create_table_from_entity(Special)
        .if_not_exists()
        .to_owned();
    let instance_table = schema
        .create_table_from_entity(BallInstance)
        .if_not_exists()
        .to_owned();

    db.execute(builder.build(&player_table)).await?;
    db.execute(builder.build(&ball_table)).await?;
    db.execute(builder.build(&special_table)).await?;
    db.execute(builder.build(&instance_table)).await?;

    Ok(())
}
