use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Per-user preferences, from users.toml.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Users {
    #[serde(default)]
    pub users: Vec<User>,
}

impl Users {
    /// Find a user by name.
    pub fn get(&self, name: &str) -> Option<&User> {
        self.users.iter().find(|user| user.name == name)
    }
}

/// A known user and their preferences.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct User {
    /// User name.
    pub name: String,

    /// Preferred timezone, an IANA name like "Europe/Berlin".
    #[serde(default)]
    pub timezone: Option<String>,
}
