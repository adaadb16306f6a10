use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::database::Database;

/// A table split across multiple databases. Shard indexes are
/// positions in the `shards` list and are stable for the life
/// of the installation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default, JsonSchema)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct ShardedTable {
    /// Table name, e.g. "filecache".
    pub table: String,

    /// One database entry per shard, in shard order.
    #[serde(default)]
    pub shards: Vec<Database>,
}

impl ShardedTable {
    /// Number of configured shards.
    pub fn len(&self) -> usize {
        self.shards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shards.is_empty()
    }

    pub(crate) fn check(&self) {
        if self.shards.is_empty() {
            warn!(
                "sharded table \"{}\" has no shards configured, only the migration shard will resolve",
                self.table
            );
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_shard_count() {
        let table = ShardedTable {
            table: "filecache".into(),
            shards: vec![Database::default(), Database::default()],
        };
        assert_eq!(table.len(), 2);
        assert!(!table.is_empty());
    }
}
