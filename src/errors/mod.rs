//! # Error Handling
//!
//! This module provides the crate-level error type for gwvalidate.
//! Field-level violations produced by the validators live in
//! [`crate::validation::field`].

pub mod types;

pub use types::{GwValidateError, Result};
