//! Keeps track of the db connections to the various shards.

use std::collections::HashMap;

use parking_lot::Mutex;
use sqlx::AnyPool;

use crate::config::{Config, General, ShardedTable};

use super::{Address, ConnectionFactory, Error};

/// A sharded table and the addresses of its shards, in shard order.
#[derive(Debug, Clone, PartialEq)]
pub struct ShardDefinition {
    /// Table name.
    pub table: String,
    /// One address per shard.
    pub shards: Vec<Address>,
}

impl ShardDefinition {
    /// Requests for this shard index are served by the main
    /// database while a shard migration is in progress.
    pub const MIGRATION_SHARD: usize = usize::MAX;

    /// Resolve a sharded table from config into addresses.
    pub fn new(table: &ShardedTable, general: &General) -> Self {
        Self {
            table: table.table.clone(),
            shards: table
                .shards
                .iter()
                .map(|shard| Address::new(shard, general))
                .collect(),
        }
    }

    /// All sharded tables in the config.
    pub fn from_config(config: &Config) -> Vec<Self> {
        config
            .sharded_tables
            .iter()
            .map(|table| Self::new(table, &config.general))
            .collect()
    }
}

#[derive(Default)]
struct Pools {
    /// Main database pool, shared by all migration-shard requests.
    main: Option<AnyPool>,
    /// Shard pools, keyed by table name and shard index.
    shards: HashMap<String, AnyPool>,
}

/// Hands out connection pools for shards, creating each one on
/// first request and reusing it for the life of the process.
pub struct ShardConnectionManager {
    main: Address,
    factory: ConnectionFactory,
    pools: Mutex<Pools>,
}

impl ShardConnectionManager {
    /// Create a manager for the given configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            main: Address::new(&config.main, &config.general),
            factory: ConnectionFactory::new(&config.general),
            pools: Mutex::new(Pools::default()),
        }
    }

    /// Get the pool for one shard of a sharded table.
    ///
    /// [`ShardDefinition::MIGRATION_SHARD`] resolves to the main
    /// database. Any other index outside the configured shard list
    /// is an error.
    pub fn connection(&self, definition: &ShardDefinition, shard: usize) -> Result<AnyPool, Error> {
        let mut pools = self.pools.lock();

        if shard == ShardDefinition::MIGRATION_SHARD {
            return Self::main_pool(&mut pools, &self.factory, &self.main);
        }

        let key = format!("{}_{}", definition.table, shard);
        if let Some(pool) = pools.shards.get(&key) {
            return Ok(pool.clone());
        }

        let address = definition
            .shards
            .get(shard)
            .ok_or(Error::InvalidShard {
                shard,
                configured: definition.shards.len(),
            })?;

        let pool = self.factory.connection(address)?;
        pools.shards.insert(key, pool.clone());

        Ok(pool)
    }

    /// Get the main database pool.
    pub fn main(&self) -> Result<AnyPool, Error> {
        let mut pools = self.pools.lock();
        Self::main_pool(&mut pools, &self.factory, &self.main)
    }

    fn main_pool(
        pools: &mut Pools,
        factory: &ConnectionFactory,
        address: &Address,
    ) -> Result<AnyPool, Error> {
        if let Some(pool) = &pools.main {
            return Ok(pool.clone());
        }

        let pool = factory.connection(address)?;
        pools.main = Some(pool.clone());

        Ok(pool)
    }

    /// The factory building this manager's pools.
    pub fn factory(&self) -> &ConnectionFactory {
        &self.factory
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::Database;

    fn two_shard_config() -> Config {
        let mut general = General::default();
        // Keep background pool maintenance from touching disk.
        general.min_pool_size = 0;

        Config {
            general,
            sharded_tables: vec![ShardedTable {
                table: "filecache".into(),
                shards: vec![
                    Database {
                        name: "filecache_0".into(),
                        ..Default::default()
                    },
                    Database {
                        name: "filecache_1".into(),
                        ..Default::default()
                    },
                ],
            }],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_resolve_once_reuse_silently() {
        let config = two_shard_config();
        let manager = ShardConnectionManager::new(&config);
        let definition = &ShardDefinition::from_config(&config)[0];

        manager.connection(definition, 0).unwrap();
        manager.connection(definition, 0).unwrap();
        manager.connection(definition, 1).unwrap();

        assert_eq!(manager.factory().created(), 2);
    }

    #[tokio::test]
    async fn test_invalid_shard() {
        let config = two_shard_config();
        let manager = ShardConnectionManager::new(&config);
        let definition = &ShardDefinition::from_config(&config)[0];

        let err = manager.connection(definition, 2).unwrap_err();
        assert_eq!(err.to_string(), "invalid shard 2, only 2 configured");

        // Nothing was cached for the bad index.
        assert_eq!(manager.factory().created(), 0);
    }

    #[tokio::test]
    async fn test_migration_shard_shares_main() {
        let mut config = two_shard_config();
        config.sharded_tables.push(ShardedTable {
            table: "mounts".into(),
            shards: vec![],
        });

        let manager = ShardConnectionManager::new(&config);
        let definitions = ShardDefinition::from_config(&config);

        manager
            .connection(&definitions[0], ShardDefinition::MIGRATION_SHARD)
            .unwrap();
        manager
            .connection(&definitions[1], ShardDefinition::MIGRATION_SHARD)
            .unwrap();
        manager.main().unwrap();

        // One pool serves every migration-shard request.
        assert_eq!(manager.factory().created(), 1);
    }

    #[tokio::test]
    async fn test_shard_pool_is_usable() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = two_shard_config();
        config.general.data_dir = dir.path().to_owned();
        config.general.default_pool_size = 1;

        let manager = ShardConnectionManager::new(&config);
        let definition = &ShardDefinition::from_config(&config)[0];

        let pool = manager.connection(definition, 0).unwrap();
        sqlx::query("CREATE TABLE filecache (fileid BIGINT PRIMARY KEY)")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO filecache (fileid) VALUES (42)")
            .execute(&pool)
            .await
            .unwrap();

        // Second lookup returns the same pool, backed by the same file.
        let pool = manager.connection(definition, 0).unwrap();
        let row: (i64,) = sqlx::query_as("SELECT fileid FROM filecache")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(row.0, 42);

        // The other shard is a different database.
        let pool = manager.connection(definition, 1).unwrap();
        let count: (i64,) =
            sqlx::query_as("SELECT count(*) FROM sqlite_master WHERE name = 'filecache'")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(count.0, 0);
    }
}
