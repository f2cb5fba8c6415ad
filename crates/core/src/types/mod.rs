//! Core types for Silver Saints.
//!
//! This module provides type-safe wrappers for the values that make up a
//! cart line.

pub mod id;
pub mod price;

pub use id::*;
pub use price::Price;
