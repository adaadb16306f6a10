//! Request-scoped session state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Session key holding the logged-in user's name.
pub const USER_ID: &str = "user_id";

/// Session key holding the UTC offset, in hours, reported by the
/// client at login. May be fractional ("5.5").
pub const TIMEZONE_OFFSET: &str = "timezone";

/// Key/value state for one request. Single-threaded by design,
/// the platform hands each request its own copy.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Session {
    values: HashMap<String, String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|value| value.as_str())
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.into(), value.into());
    }

    pub fn exists(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }

    /// The logged-in user, if any.
    pub fn user_id(&self) -> Option<&str> {
        self.get(USER_ID)
    }

    /// The client's UTC offset hint in hours, if it parses.
    pub fn offset_hint(&self) -> Option<f64> {
        self.get(TIMEZONE_OFFSET)?.parse().ok()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_round_trip() {
        let mut session = Session::new();
        assert!(!session.exists(USER_ID));

        session.set(USER_ID, "alice");
        assert_eq!(session.user_id(), Some("alice"));

        session.remove(USER_ID);
        assert_eq!(session.user_id(), None);
    }

    #[test]
    fn test_offset_hint() {
        let mut session = Session::new();
        assert_eq!(session.offset_hint(), None);

        session.set(TIMEZONE_OFFSET, "-5");
        assert_eq!(session.offset_hint(), Some(-5.0));

        session.set(TIMEZONE_OFFSET, "5.5");
        assert_eq!(session.offset_hint(), Some(5.5));

        session.set(TIMEZONE_OFFSET, "not-a-number");
        assert_eq!(session.offset_hint(), None);
    }
}
