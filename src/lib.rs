//! resolve-apply
//!
//! Applies an AI-generated editing guide to a DaVinci Resolve timeline as
//! colored, time-ordered markers, leaving an auditable run log next to the
//! input for every invocation.
//!
//! The guide artifact and the run log both go through the crate's own
//! interchange codec. The editing host is reached only through the narrow
//! capability seam in `core::resolve`; a run without a live host is an
//! expected, fully supported mode.

// Core modules
pub mod core;

// Re-exports
pub use crate::core::codec::Value;
pub use crate::core::config::ApplyConfig;
pub use crate::core::models::{CoreError, CoreResult, GuideDocument, NormalizedEdit};
pub use crate::core::pipeline::{ApplyOutcome, ApplyRequest};
