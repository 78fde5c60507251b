//! Infrastructure layer
//!
//! - Tokio runtime bridge for background data loading

pub mod runtime;
