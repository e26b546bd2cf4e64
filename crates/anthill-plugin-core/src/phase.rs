use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PluginError;

/// Which half of the two-step protocol the plugin is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Compute a preview plan and print it as JSON. No side effects.
    Prepare,
    /// Perform the work.
    #[default]
    Apply,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Prepare => "prepare",
            Phase::Apply => "apply",
        }
    }

    /// Resolve the phase from the raw `ANTHILL_PHASE` value.
    ///
    /// An absent value means `apply`. Matching is exact and case-sensitive;
    /// an empty string is an unknown phase, not an absent one.
    pub fn resolve(raw: Option<&str>) -> Result<Self, PluginError> {
        match raw {
            None => Ok(Phase::default()),
            Some(value) => value.parse(),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = PluginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prepare" => Ok(Phase::Prepare),
            "apply" => Ok(Phase::Apply),
            other => Err(PluginError::UnknownPhase(other.to_string())),
        }
    }
}
