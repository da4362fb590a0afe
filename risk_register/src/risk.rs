//! Risk records, their lifecycle states, and validation of submitted risks.

use serde::de::{self, Unexpected};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Lifecycle state of a tracked risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskState {
    Open,
    Closed,
    Accepted,
    Investigating,
}

impl RiskState {
    /// Every state a risk may be in.
    pub const ALL: [RiskState; 4] = [
        RiskState::Open,
        RiskState::Closed,
        RiskState::Accepted,
        RiskState::Investigating,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskState::Open => "open",
            RiskState::Closed => "closed",
            RiskState::Accepted => "accepted",
            RiskState::Investigating => "investigating",
        }
    }
}

impl fmt::Display for RiskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskState {
    type Err = ValidationError;

    /// Matching is exact: `"Open"` is not a valid state.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RiskState::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidState(s.to_string()))
    }
}

/// A stored risk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Risk {
    pub id: String,
    pub state: RiskState,
    pub title: String,
    pub description: String,
}

/// Reasons a submitted risk is rejected.
///
/// The `Display` output of each variant is the message returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more of `state`, `title`, `description` is absent or empty.
    #[error("Missing required risk fields")]
    MissingFields { fields: Vec<&'static str> },

    #[error("Invalid Risk State")]
    InvalidState(String),
}

/// Risk as submitted by a client, before validation.
///
/// Fields are optional so that absent, `null`, and empty values all reach
/// validation instead of failing to parse. Any `id` in the payload is
/// ignored; identifiers are always assigned by the service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewRisk {
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A submitted risk that passed validation and is waiting for an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRisk {
    pub state: RiskState,
    pub title: String,
    pub description: String,
}

impl NewRisk {
    /// Parse a request body.
    ///
    /// Only a JSON object is accepted. Arrays and scalars are rejected even
    /// though the derived deserializer would read an array positionally.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        match serde_json::from_slice::<Value>(body)? {
            Value::Object(fields) => serde_json::from_value(Value::Object(fields)),
            other => Err(de::Error::invalid_type(unexpected(&other), &"a risk object")),
        }
    }

    /// Check required fields first, then the state value.
    pub fn validate(self) -> Result<ValidRisk, ValidationError> {
        let NewRisk {
            state,
            title,
            description,
        } = self;

        let state = state.filter(|s| !s.is_empty());
        let title = title.filter(|s| !s.is_empty());
        let description = description.filter(|s| !s.is_empty());

        match (state, title, description) {
            (Some(state), Some(title), Some(description)) => Ok(ValidRisk {
                state: state.parse()?,
                title,
                description,
            }),
            (state, title, description) => {
                let fields = [
                    ("state", state.is_none()),
                    ("title", title.is_none()),
                    ("description", description.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, missing)| missing.then_some(name))
                .collect();
                Err(ValidationError::MissingFields { fields })
            }
        }
    }
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}

impl ValidRisk {
    pub fn with_id(self, id: String) -> Risk {
        Risk {
            id,
            state: self.state,
            title: self.title,
            description: self.description,
        }
    }
}
