// ABOUTME: Lifecycle states an app can be reconciled towards.
// ABOUTME: Closed set parsed from config or CLI; unknown names are rejected.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetState {
    /// The app exists with the declared definition.
    #[default]
    Present,
    /// The app does not exist.
    Absent,
    /// All tasks of the app are replaced.
    Restart,
    /// All running tasks of the app are killed.
    Kill,
}

impl TargetState {
    pub const ALL: [TargetState; 4] = [
        TargetState::Present,
        TargetState::Absent,
        TargetState::Restart,
        TargetState::Kill,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetState::Present => "present",
            TargetState::Absent => "absent",
            TargetState::Restart => "restart",
            TargetState::Kill => "kill",
        }
    }

    /// Parameters that must be set before this state can be reconciled.
    pub fn required_parameters(&self) -> &'static [&'static str] {
        match self {
            TargetState::Present
            | TargetState::Absent
            | TargetState::Restart
            | TargetState::Kill => &["id"],
        }
    }
}

impl fmt::Display for TargetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetState {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|state| state.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::UnknownState(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for TargetState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_known_state() {
        for state in TargetState::ALL {
            assert_eq!(state.as_str().parse::<TargetState>().unwrap(), state);
        }
        assert_eq!("Present".parse::<TargetState>().unwrap(), TargetState::Present);
    }

    #[test]
    fn rejects_unknown_state() {
        let err = "pause".parse::<TargetState>().unwrap_err();
        assert_eq!(err, ValidationError::UnknownState("pause".to_string()));
        assert!(err.to_string().contains("pause"));
    }

    #[test]
    fn default_is_present() {
        assert_eq!(TargetState::default(), TargetState::Present);
    }
}
