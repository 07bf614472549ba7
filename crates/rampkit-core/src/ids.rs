//! Object identifiers and id generation.
//!
//! Ids are opaque strings. Factories never mint ids themselves; they take an
//! [`IdGenerator`] so tests can use [`CounterIds`] and get stable ids.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, stable identifier of a layout object.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    /// Wraps an existing id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ObjectId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Source of fresh object ids.
pub trait IdGenerator {
    /// Returns a new id, unique for this generator. `prefix` names the
    /// object kind and is only a readability aid.
    fn next_id(&mut self, prefix: &str) -> ObjectId;
}

/// Deterministic generator producing `prefix-1`, `prefix-2`, ...
#[derive(Debug, Clone, Default)]
pub struct CounterIds {
    next: u64,
}

impl CounterIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continues numbering after `last`, e.g. after loading a project.
    pub fn starting_after(last: u64) -> Self {
        Self { next: last }
    }
}

impl IdGenerator for CounterIds {
    fn next_id(&mut self, prefix: &str) -> ObjectId {
        self.next += 1;
        ObjectId(format!("{}-{}", prefix, self.next))
    }
}

/// Random v4 UUID generator used by interactive sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self, prefix: &str) -> ObjectId {
        ObjectId(format!("{}-{}", prefix, uuid::Uuid::new_v4()))
    }
}
