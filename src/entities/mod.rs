//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the game tables the admin commands read and write.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod ball;
pub mod ball_instance;
pub mod player;
pub mod special;

// Re-export specific types to avoid conflicts
pub use ball::{Column as BallColumn, Entity as Ball, Model as BallModel};
pub use ball_instance::{
    Column as BallInstanceColumn, Entity as BallInstance, Model as BallInstanceModel,
};
pub use player::{Column as PlayerColumn, Entity as Player, Model as PlayerModel, PrivacyPolicy};
pub use special::{Column as SpecialColumn, Entity as Special, Model as SpecialModel};
