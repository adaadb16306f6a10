//! Connection pool handles for the main database and shards.

pub mod address;
pub mod factory;
pub mod shard;

pub use address::Address;
pub use factory::ConnectionFactory;
pub use shard::{ShardConnectionManager, ShardDefinition};

pub use super::Error;
