//! Foundation types for the dalint interview checker.
//!
//! This crate provides the shared error record produced by every validator
//! in the engine and consumed by the reporting layer. It has zero external
//! dependencies, making it suitable as a foundation layer.

mod error;

pub use error::ValidationError;
