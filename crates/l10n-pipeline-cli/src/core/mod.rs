//! Core types, errors, and shared functionality.

mod errors;

pub use errors::*;
