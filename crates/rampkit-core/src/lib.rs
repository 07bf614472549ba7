//! # RampKit Core
//!
//! Core types, traits, and utilities shared by the RampKit crates.
//! Provides the error hierarchy, editor-wide constants, millimetre
//! formatting helpers and the object id abstraction.

pub mod constants;
pub mod error;
pub mod ids;
pub mod units;

pub use error::{Error, ProjectError, Result};
pub use ids::{CounterIds, IdGenerator, ObjectId, UuidIds};
pub use units::{format_mm, round_mm};
