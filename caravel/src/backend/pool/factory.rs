//! Connection factory.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Once;

use sqlx::any::AnyPoolOptions;
use sqlx::AnyPool;
use tracing::debug;

use crate::config::General;

use super::{Address, Error};

static DRIVERS: Once = Once::new();

/// Builds connection pools for backend databases. Pools connect
/// lazily: creating one performs no I/O, the first checkout does.
#[derive(Debug)]
pub struct ConnectionFactory {
    general: General,
    created: AtomicUsize,
}

impl ConnectionFactory {
    /// Create a factory using pool settings from the general config.
    pub fn new(general: &General) -> Self {
        Self {
            general: general.clone(),
            created: AtomicUsize::new(0),
        }
    }

    /// Build a pool for the given address.
    pub fn connection(&self, address: &Address) -> Result<AnyPool, Error> {
        DRIVERS.call_once(sqlx::any::install_default_drivers);

        let pool = AnyPoolOptions::new()
            .max_connections(self.general.default_pool_size as u32)
            .min_connections(self.general.min_pool_size as u32)
            .acquire_timeout(self.general.connect_timeout_duration())
            .idle_timeout(self.general.idle_timeout_duration())
            .connect_lazy(&address.url())?;

        self.created.fetch_add(1, Ordering::Relaxed);
        debug!("created pool for {}", address);

        Ok(pool)
    }

    /// Number of pools built by this factory.
    pub fn created(&self) -> usize {
        self.created.load(Ordering::Relaxed)
    }
}
