//! Backend database connections.

pub mod error;
pub mod pool;

pub use error::Error;
pub use pool::{Address, ConnectionFactory, ShardConnectionManager, ShardDefinition};
