// ABOUTME: Opaque ids that Marathon hands back for deployments and tasks.
// ABOUTME: The resource kind is a type parameter, so the two never mix.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// What kind of Marathon resource an [`Id`] names.
pub trait IdKind {
    /// Name used in debug output and decode errors.
    const LABEL: &'static str;
}

pub enum Deployment {}
pub enum Task {}

impl IdKind for Deployment {
    const LABEL: &'static str = "DeploymentId";
}

impl IdKind for Task {
    const LABEL: &'static str = "TaskId";
}

/// Server-assigned id of a Marathon resource of kind `K`.
///
/// Both deployment and task ids are plain strings in Marathon's JSON, so the
/// kind lives only in the type.
#[must_use = "ids name server resources"]
pub struct Id<K> {
    value: String,
    kind: PhantomData<K>,
}

pub type DeploymentId = Id<Deployment>;
pub type TaskId = Id<Task>;

impl<K> Id<K> {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_inner(self) -> String {
        self.value
    }
}

impl<K: IdKind> fmt::Debug for Id<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", K::LABEL, self.value)
    }
}

impl<K> fmt::Display for Id<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<K> Clone for Id<K> {
    fn clone(&self) -> Self {
        Self::new(self.value.as_str())
    }
}

impl<K> PartialEq for Id<K> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<K> Eq for Id<K> {}

impl<K> Hash for Id<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<K> Serialize for Id<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

/// Marathon never issues an empty id, so an empty string in a response is
/// treated as a malformed body.
impl<'de, K: IdKind> Deserialize<'de> for Id<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        if value.is_empty() {
            return Err(serde::de::Error::custom(format!("empty {}", K::LABEL)));
        }
        Ok(Self::new(value))
    }
}
