//! Core engine modules
//!
//! This module contains all headless engine functionality:
//! - Configuration management
//! - Models (guide documents, enums, results)
//! - Interchange codec (decode/encode)
//! - Timecode parsing and frame math
//! - Edit normalization
//! - Marker classification and emission
//! - Run-log writing
//! - External editing-host seam
//! - Pipeline orchestration

pub mod config;
pub mod io;
pub mod models;

// Interchange codec
pub mod codec;

// Timecode math
pub mod timecode;

// Edit normalization
pub mod normalize;

// Marker emission
pub mod markers;

// Run-log writing
pub mod runlog;

// External host seam
pub mod resolve;

// Pipeline orchestration
pub mod pipeline;
