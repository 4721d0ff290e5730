//! Editing guide document and normalized edit models

use crate::core::codec::Value;
use crate::core::models::results::{CoreError, CoreResult};

/// Decoded editing guide artifact
///
/// Thin wrapper over the decoded value tree. The root must be a keyed
/// structure; everything underneath is optional and read leniently.
#[derive(Debug, Clone)]
pub struct GuideDocument {
    root: Value,
}

impl GuideDocument {
    /// Wrap a decoded guide, rejecting non-object roots
    pub fn from_value(root: Value) -> CoreResult<Self> {
        if root.as_object().is_none() {
            return Err(CoreError::ParseError(
                "editing guide root must be an object".to_string(),
            ));
        }
        Ok(Self { root })
    }

    /// Proposed project name, when the guide carries one
    pub fn project_name(&self) -> Option<&str> {
        self.root.get("project_name").and_then(Value::as_str)
    }

    /// Source media path under `video.source_path`
    pub fn source_path(&self) -> Option<&str> {
        self.root
            .get("video")
            .and_then(|v| v.get("source_path"))
            .and_then(Value::as_str)
    }

    /// Raw edit records, when the guide has a well-formed `edits` array
    pub fn raw_edits(&self) -> Option<&[Value]> {
        self.root.get("edits").and_then(Value::as_array)
    }

    /// Whether an `edits` key exists at all, even with the wrong shape
    pub fn has_edits_key(&self) -> bool {
        self.root.get("edits").is_some()
    }
}

/// One edit after normalization
///
/// Strictly typed form of a raw guide record. Everything downstream of the
/// normalizer works with these; raw records never leave it.
#[derive(Debug, Clone)]
pub struct NormalizedEdit {
    /// 1-based position in the source edits array
    pub ordinal: usize,
    /// Stable identity for log correlation, generated when absent
    pub id: String,
    pub label: String,
    /// Guide-declared category, "unknown" when absent
    pub edit_type: String,
    /// Start bound as authored (timecode text or bare seconds)
    pub start_tc: String,
    /// End bound as authored
    pub end_tc: String,
    pub start_frame: i64,
    /// Always past `start_frame` once normalized
    pub end_frame: i64,
    /// Clamped into 1..=5
    pub intensity: i64,
    /// The guide's `why_this_works` text, possibly empty
    pub rationale: String,
    /// Opaque effects hint carried into the marker note verbatim
    pub effects_map: Value,
    /// Technique type strings from the record's nested `edits` list
    pub techniques: Vec<String>,
}

impl NormalizedEdit {
    pub fn duration_frames(&self) -> i64 {
        self.end_frame - self.start_frame
    }
}
