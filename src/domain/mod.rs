//! Domain layer containing intake logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, errors)
//! - `intake` - Transcript analysis: criteria, emergency, severity, progress

pub mod foundation;
pub mod intake;
