//! Preview plans: what a plugin prints during `prepare` and receives back
//! during `apply`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::phase::Phase;

/// The preview emitted on stdout during the prepare phase.
///
/// Serializes to a single JSON object:
/// `{"phase":"prepare","message":...,"targets":[...], <extra fields>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewPlan {
    pub phase: Phase,
    /// Human-readable summary of what apply will do.
    pub message: String,
    /// Items that will be affected.
    #[serde(default)]
    pub targets: Vec<Value>,
    /// Any other preview information, flattened into the top-level object.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PreviewPlan {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            phase: Phase::Prepare,
            message: message.into(),
            targets: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Add an affected item.
    pub fn target(mut self, target: impl Into<Value>) -> Self {
        self.targets.push(target.into());
        self
    }

    /// Attach an extra top-level field.
    ///
    /// The reserved keys `phase`, `message` and `targets` are ignored.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if matches!(key.as_str(), "phase" | "message" | "targets") {
            tracing::warn!(key = %key, "ignoring reserved preview plan field");
            return self;
        }
        self.extra.insert(key, value.into());
        self
    }

    /// Serialize to one line of JSON. Non-ASCII text is kept as UTF-8.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// The preview plan handed back to the plugin during apply.
#[derive(Debug, Clone, PartialEq)]
pub enum ReceivedPlan {
    /// `ANTHILL_PREVIEW_PLAN` held valid JSON.
    Parsed(Value),
    /// `ANTHILL_PREVIEW_PLAN` could not be parsed; kept verbatim.
    Raw(String),
}

impl ReceivedPlan {
    /// Parse the raw `ANTHILL_PREVIEW_PLAN` value. Absent or empty means no plan.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let raw = raw.filter(|s| !s.is_empty())?;
        match serde_json::from_str(raw) {
            Ok(value) => Some(ReceivedPlan::Parsed(value)),
            Err(e) => {
                tracing::warn!(error = %e, "preview plan is not valid JSON");
                Some(ReceivedPlan::Raw(raw.to_string()))
            }
        }
    }

    /// Interpret a parsed plan as a [`PreviewPlan`], if it has that shape.
    pub fn as_preview(&self) -> Option<PreviewPlan> {
        match self {
            ReceivedPlan::Parsed(value) => serde_json::from_value(value.clone()).ok(),
            ReceivedPlan::Raw(_) => None,
        }
    }
}

impl fmt::Display for ReceivedPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReceivedPlan::Parsed(value) => write!(f, "{value}"),
            ReceivedPlan::Raw(raw) => f.write_str(raw),
        }
    }
}
