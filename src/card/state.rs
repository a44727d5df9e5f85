//! Card state store
//!
//! Holds the current record and the loading flag. Only the lifecycle
//! controller in `card::UserCard` writes here; everyone else reads.

use super::record::UserRecord;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::str::FromStr;

/// Display theme derived from the `theme` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Read the `theme` attribute. Anything but "dark" displays as light.
    pub fn from_attribute(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }

    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Attribute value for this theme
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// What to do with a fetch that settles after a newer one has started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StalePolicy {
    /// Apply every settlement; the last to settle wins
    #[default]
    Overwrite,
    /// Drop settlements from superseded fetches
    Discard,
}

/// Unknown names fall back to `Overwrite`
impl FromStr for StalePolicy {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "discard" => Self::Discard,
            _ => Self::Overwrite,
        })
    }
}

impl StalePolicy {
    /// Convert to string for TOML serialization
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overwrite => "overwrite",
            Self::Discard => "discard",
        }
    }
}

/// Observable lifecycle state
///
/// `Errored` is never stored: a failed fetch reports its error and the card
/// goes straight back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Idle,
    Loading,
    Loaded,
}

/// Record and loading flag
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardState {
    user: Option<UserRecord>,
    loading: bool,
}

impl CardState {
    pub fn user(&self) -> Option<&UserRecord> {
        self.user.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Replace the record wholesale
    pub(crate) fn set_user(&mut self, user: Option<UserRecord>) {
        self.user = user;
    }

    pub(crate) fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn lifecycle(&self) -> LifecycleState {
        if self.loading {
            LifecycleState::Loading
        } else if self.user.is_some() {
            LifecycleState::Loaded
        } else {
            LifecycleState::Idle
        }
    }
}
