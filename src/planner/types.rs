use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// One source/destination submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    source: String,
    destination: String,
}

impl Query {
    /// Both sides are trimmed; either one being empty is a validation error.
    pub fn new(source: &str, destination: &str) -> Result<Self> {
        let source = source.trim();
        let destination = destination.trim();
        if source.is_empty() || destination.is_empty() {
            return Err(Error::validation(
                "Please enter both source and destination.",
            ));
        }
        Ok(Self {
            source: source.to_string(),
            destination: destination.to_string(),
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }
}

/// A single recommended way to travel. Cost and duration are whatever the
/// model said, kept as display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelOption {
    pub travel_mode: String,
    pub estimated_cost: String,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PlanOutcome {
    Options { options: Vec<TravelOption> },
    /// Model text that did not decode, exactly as received.
    Raw { text: String },
}
