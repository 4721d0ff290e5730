//! Self-contained interchange codec
//!
//! The editing guide comes from a machine-generated pipeline and the run log
//! sits next to it as an audit artifact, so both sides go through this one
//! codec rather than a mix of serializers:
//! - `value`: owned tree the rest of the crate works with
//! - `decode`: strict reader with byte-positioned errors
//! - `encode`: deterministic compact writer

pub mod decode;
pub mod encode;
pub mod value;

// Re-exports for convenience
pub use decode::{decode, DecodeError};
pub use encode::encode;
pub use value::Value;
