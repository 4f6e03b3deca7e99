//! Soft-delete state shared by every owned record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Records are never removed; they flip between these two states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
    #[default]
    Active,
    Inactive,
}

impl LifecycleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleState::Active => "active",
            LifecycleState::Inactive => "inactive",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, LifecycleState::Active)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifecycleState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(LifecycleState::Active),
            "inactive" => Ok(LifecycleState::Inactive),
            other => Err(Error::invalid_input(format!(
                "Unknown lifecycle state '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(
            "ACTIVE".parse::<LifecycleState>().unwrap(),
            LifecycleState::Active
        );
        assert_eq!(
            " inactive ".parse::<LifecycleState>().unwrap(),
            LifecycleState::Inactive
        );
        assert!("deleted".parse::<LifecycleState>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&LifecycleState::Inactive).unwrap();
        assert_eq!(json, "\"inactive\"");
    }
}
