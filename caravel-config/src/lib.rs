// Submodules
pub mod core;
pub mod database;
pub mod error;
pub mod general;
pub mod sharding;
pub mod users;

pub use core::{Config, ConfigAndUsers};
pub use database::{Database, DatabaseType};
pub use error::Error;
pub use general::General;
pub use sharding::ShardedTable;
pub use users::{User, Users};
