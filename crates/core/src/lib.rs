//! Domain rules for the video store: shared id/time types, the error
//! taxonomy, request field validation and the rental lifecycle guards.
//!
//! Nothing in this crate performs I/O.

pub mod error;
pub mod rental;
pub mod types;
pub mod validation;
