//! # CineDash Common Library
//!
//! Shared code for the CineDash dashboard including:
//! - Movie data model and filter parameter types
//! - Configuration loading
//! - Error taxonomy

pub mod config;
pub mod error;
pub mod model;

pub use error::{Error, Result};
pub use model::{ClosedRange, FilterParameters, MovieRecord, RawValue};
