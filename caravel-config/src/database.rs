use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// Database flavor used for backend connections.
///
/// _Default:_ `sqlite`
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, Copy, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseType {
    /// SQLite file under `general.data_dir` (default).
    #[default]
    Sqlite,
    /// PostgreSQL over TCP.
    Postgres,
    /// MySQL/MariaDB over TCP.
    Mysql,
}

impl DatabaseType {
    /// Default port for the flavor. SQLite has none.
    pub fn port(&self) -> Option<u16> {
        match self {
            Self::Sqlite => None,
            Self::Postgres => Some(5432),
            Self::Mysql => Some(3306),
        }
    }

    /// URL scheme understood by the connection factory.
    pub fn scheme(&self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Postgres => "postgres",
            Self::Mysql => "mysql",
        }
    }
}

impl FromStr for DatabaseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            "postgres" | "postgresql" | "pgsql" => Ok(Self::Postgres),
            "mysql" | "mariadb" => Ok(Self::Mysql),
            _ => Err(format!("Invalid database type: {}", s)),
        }
    }
}

impl Display for DatabaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.scheme())
    }
}

/// A backend database, either the main database or one shard
/// of a sharded table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Database {
    /// Entry name, used in logs and for the SQLite file name
    /// when `database_name` isn't set.
    pub name: String,

    /// Server host.
    ///
    /// _Default:_ `127.0.0.1`
    #[serde(default = "Database::host")]
    pub host: String,

    /// Server port. Defaults to the flavor's standard port.
    #[serde(default)]
    pub port: Option<u16>,

    /// Database name on the server, if different from `name`.
    #[serde(default)]
    pub database_name: Option<String>,

    /// Username.
    #[serde(default)]
    pub user: Option<String>,

    /// Password.
    #[serde(default)]
    pub password: Option<String>,

    /// Flavor override for this entry, e.g. a Postgres shard
    /// next to a SQLite main database.
    #[serde(default)]
    pub db: Option<DatabaseType>,
}

impl Database {
    fn host() -> String {
        "127.0.0.1".into()
    }

    /// Name of the database on the server.
    pub fn database_name(&self) -> &str {
        self.database_name.as_deref().unwrap_or(&self.name)
    }
}

impl Default for Database {
    fn default() -> Self {
        Self {
            name: "main".into(),
            host: Self::host(),
            port: None,
            database_name: None,
            user: None,
            password: None,
            db: None,
        }
    }
}
