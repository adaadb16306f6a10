//! Timezone resolution for the current user.
//!
//! Mirrors what the web clients expect: an explicit per-user
//! preference wins, then the UTC offset the client reported at
//! login, then the server default. Resolution never fails, bad
//! values degrade to the server default with a debug log.

use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::debug;

use crate::config::{config, ConfigAndUsers};
use crate::session::Session;

/// Resolves the effective timezone for a request.
pub struct TimeZoneResolver {
    config: Arc<ConfigAndUsers>,
}

impl TimeZoneResolver {
    /// Resolver over the process-wide configuration.
    pub fn new() -> Self {
        Self::with_config(config())
    }

    /// Resolver over an explicit configuration.
    pub fn with_config(config: Arc<ConfigAndUsers>) -> Self {
        Self { config }
    }

    /// Get the timezone of the current user, based on their
    /// preferences and session data.
    ///
    /// `timestamp` pins offset matching to a point in time, so DST
    /// is accounted for. `None` means now.
    pub fn resolve(&self, session: &Session, timestamp: Option<i64>) -> Tz {
        let preference = session.user_id().and_then(|user| {
            self.config
                .users
                .get(user)
                .and_then(|user| user.timezone.clone())
        });

        let name = match preference {
            Some(name) => name,
            None => {
                if let Some(offset) = session.offset_hint() {
                    return self.guess_from_offset(offset, timestamp);
                }
                self.config.config.general.timezone.clone()
            }
        };

        match Tz::from_str(&name) {
            Ok(tz) => tz,
            Err(_) => {
                debug!("failed to create timezone \"{}\"", name);
                self.default_timezone()
            }
        }
    }

    /// Guess the timezone for a UTC offset in hours.
    ///
    /// We first try the fixed Etc/GMT* zone for the offset. If that
    /// doesn't exist (fractional or out-of-range offsets), we look
    /// for any zone with the same offset at `timestamp`, before
    /// falling back to the server default.
    pub fn guess_from_offset(&self, offset: f64, timestamp: Option<i64>) -> Tz {
        // Note: the Etc/GMT names are the inverse of the offset,
        // a positive offset means a negative zone name and the
        // other way around.
        if offset.fract() == 0.0 {
            let name = if offset > 0.0 {
                format!("Etc/GMT-{}", offset as i64)
            } else {
                format!("Etc/GMT+{}", (-offset) as i64)
            };

            if let Ok(tz) = Tz::from_str(&name) {
                return tz;
            }
        }

        let seconds = (offset * 3600.0).round() as i32;
        let at = Self::instant(timestamp);

        for tz in chrono_tz::TZ_VARIANTS {
            if tz.offset_from_utc_datetime(&at).fix().local_minus_utc() == seconds {
                return tz;
            }
        }

        debug!("failed to find timezone for offset \"{}\"", offset);
        self.default_timezone()
    }

    /// The server default timezone, UTC if unset or invalid.
    fn default_timezone(&self) -> Tz {
        let name = &self.config.config.general.timezone;
        Tz::from_str(name).unwrap_or_else(|_| {
            debug!("failed to create timezone \"{}\", using UTC", name);
            Tz::UTC
        })
    }

    fn instant(timestamp: Option<i64>) -> NaiveDateTime {
        timestamp
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
            .unwrap_or_else(Utc::now)
            .naive_utc()
    }
}

impl Default for TimeZoneResolver {
    fn default() -> Self {
        Self::new()
    }
}
