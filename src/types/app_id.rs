// ABOUTME: Marathon application identifier validation.
// ABOUTME: Path-like ids made of lowercase segments separated by slashes.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AppIdError {
    #[error("app id cannot be empty")]
    Empty,

    #[error("app id contains an empty path segment: {0}")]
    EmptySegment(String),

    #[error("app id must be lowercase: {0}")]
    NotLowercase(String),

    #[error("invalid character in app id: '{0}'")]
    InvalidChar(char),

    #[error("app id segment cannot start or end with a hyphen: {0}")]
    HyphenEdge(String),

    #[error("app id cannot contain relative segment '{segment}': {id}")]
    RelativeSegment { id: String, segment: String },
}

/// Identifier of a Marathon app, such as `/postgres` or `/prod/web/api`.
///
/// Stored exactly as given; `segments` yields the path components without
/// the leading slash for building request paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AppId(String);

impl AppId {
    pub fn new(value: &str) -> Result<Self, AppIdError> {
        let value = value.trim();
        let path = value.strip_prefix('/').unwrap_or(value);
        if path.is_empty() {
            return Err(AppIdError::Empty);
        }

        for segment in path.split('/') {
            if segment.is_empty() {
                return Err(AppIdError::EmptySegment(value.to_string()));
            }
            // Request URLs collapse dot segments, which would address another app.
            if segment == "." || segment == ".." {
                return Err(AppIdError::RelativeSegment {
                    id: value.to_string(),
                    segment: segment.to_string(),
                });
            }
            if segment.starts_with('-') || segment.ends_with('-') {
                return Err(AppIdError::HyphenEdge(segment.to_string()));
            }
            for c in segment.chars() {
                if c.is_ascii_uppercase() {
                    return Err(AppIdError::NotLowercase(value.to_string()));
                }
                if !c.is_ascii_lowercase() && !c.is_ascii_digit() && c != '-' && c != '.' {
                    return Err(AppIdError::InvalidChar(c));
                }
            }
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path segments without the leading slash.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.trim_start_matches('/').split('/')
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for AppId {
    type Err = AppIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for AppId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AppId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        AppId::new(&s).map_err(serde::de::Error::custom)
    }
}
