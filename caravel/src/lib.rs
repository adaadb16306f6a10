//! Shared data-access helpers for the caravel platform: a lazily
//! populated registry of per-shard database connections, and
//! timezone resolution for the current user.

pub mod backend;
pub mod config;
pub mod session;
pub mod timezone;

pub use backend::{Address, ConnectionFactory, ShardConnectionManager, ShardDefinition};
pub use session::Session;
pub use timezone::TimeZoneResolver;
