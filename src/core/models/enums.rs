//! Type enumerations

use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker color enumeration
///
/// The palette entries the host marker API understands. Green through Red
/// carry the intensity scale, Blue is the out-of-range fallback, and Purple
/// flags edits that still need manual audio work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerColor {
    Green,
    Cyan,
    Yellow,
    Orange,
    Red,
    Blue,
    Purple,
}

impl MarkerColor {
    /// Color name as the host marker API expects it
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerColor::Green => "Green",
            MarkerColor::Cyan => "Cyan",
            MarkerColor::Yellow => "Yellow",
            MarkerColor::Orange => "Orange",
            MarkerColor::Red => "Red",
            MarkerColor::Blue => "Blue",
            MarkerColor::Purple => "Purple",
        }
    }
}

impl fmt::Display for MarkerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-edit marker placement outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditStatus {
    /// Planned only; no external call was made
    DryRun,
    MarkerAdded,
    MarkerFailed,
    /// No live host; the plan was logged instead
    ApiUnavailable,
}

impl EditStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditStatus::DryRun => "dry_run",
            EditStatus::MarkerAdded => "marker_added",
            EditStatus::MarkerFailed => "marker_failed",
            EditStatus::ApiUnavailable => "api_unavailable",
        }
    }
}

impl fmt::Display for EditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Overall run outcome recorded in the log header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Ok,
    /// The guide file could not be read
    ReadError,
    /// The guide file was read but did not decode to a usable document
    ParseError,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Ok => "ok",
            RunStatus::ReadError => "read_error",
            RunStatus::ParseError => "parse_error",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Technique classification
///
/// Every technique named inside an edit falls into one of these buckets,
/// which decide the todo tag and whether the audio-only marker override
/// applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TechniqueClass {
    /// Work on an audio track; never attempted by this tool
    Audio,
    /// Visual change recorded as best-effort intent
    Visual,
    Unknown,
}

impl TechniqueClass {
    /// Classify a technique type string from the guide
    pub fn classify(technique_type: &str) -> Self {
        match technique_type {
            "sfx" | "audio_ducking" => TechniqueClass::Audio,
            "slow_motion" | "speed_ramp" | "zoom" | "crop_reframe" | "color_grade"
            | "vignette" => TechniqueClass::Visual,
            _ => TechniqueClass::Unknown,
        }
    }

    /// Short tag used in run-log todo strings
    pub fn tag(&self) -> &'static str {
        match self {
            TechniqueClass::Audio => "audio",
            TechniqueClass::Visual => "visual",
            TechniqueClass::Unknown => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_technique_classification() {
        assert_eq!(TechniqueClass::classify("sfx"), TechniqueClass::Audio);
        assert_eq!(
            TechniqueClass::classify("audio_ducking"),
            TechniqueClass::Audio
        );
        assert_eq!(
            TechniqueClass::classify("slow_motion"),
            TechniqueClass::Visual
        );
        assert_eq!(
            TechniqueClass::classify("speed_ramp"),
            TechniqueClass::Visual
        );
        assert_eq!(TechniqueClass::classify("zoom"), TechniqueClass::Visual);
        assert_eq!(
            TechniqueClass::classify("crop_reframe"),
            TechniqueClass::Visual
        );
        assert_eq!(
            TechniqueClass::classify("color_grade"),
            TechniqueClass::Visual
        );
        assert_eq!(TechniqueClass::classify("vignette"), TechniqueClass::Visual);
        assert_eq!(
            TechniqueClass::classify("hologram"),
            TechniqueClass::Unknown
        );
        assert_eq!(TechniqueClass::classify(""), TechniqueClass::Unknown);
    }

    #[test]
    fn test_technique_tags() {
        assert_eq!(TechniqueClass::Audio.tag(), "audio");
        assert_eq!(TechniqueClass::Visual.tag(), "visual");
        assert_eq!(TechniqueClass::Unknown.tag(), "unknown");
    }

    #[test]
    fn test_marker_color_names() {
        assert_eq!(MarkerColor::Green.as_str(), "Green");
        assert_eq!(MarkerColor::Purple.as_str(), "Purple");
        assert_eq!(format!("{}", MarkerColor::Blue), "Blue");
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(EditStatus::DryRun.as_str(), "dry_run");
        assert_eq!(EditStatus::MarkerAdded.as_str(), "marker_added");
        assert_eq!(EditStatus::MarkerFailed.as_str(), "marker_failed");
        assert_eq!(EditStatus::ApiUnavailable.as_str(), "api_unavailable");
        assert_eq!(RunStatus::Ok.as_str(), "ok");
        assert_eq!(RunStatus::ReadError.as_str(), "read_error");
        assert_eq!(RunStatus::ParseError.as_str(), "parse_error");
    }
}
