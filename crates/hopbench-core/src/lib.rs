//! hopbench-core: question normalization, quiz sessions, and scoring.
//!
//! This crate defines the question model, the record normalizer that builds
//! it from loosely structured source files, the quiz session state machine,
//! and the result store seam that the rest of hopbench builds on.

pub mod error;
pub mod model;
pub mod normalizer;
pub mod pool;
pub mod report;
pub mod scoring;
pub mod session;
pub mod submit;
pub mod traits;
pub mod validate;
