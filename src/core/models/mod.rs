//! Core data models
//!
//! This module contains the data structures used throughout the pipeline:
//! - Color, status, and technique enumerations
//! - Guide document wrapper and normalized edits
//! - Result and error types

pub mod enums;
pub mod guide;
pub mod results;

// Re-exports for convenience
pub use enums::{EditStatus, MarkerColor, RunStatus, TechniqueClass};
pub use guide::{GuideDocument, NormalizedEdit};
pub use results::{CoreError, CoreResult, ToolError, ToolResult};
