//! Run-log construction and sidecar writing
//!
//! Every invocation leaves a run log next to the input guide, including runs
//! that never managed to read or decode it. The log is serialized through
//! the crate codec, not serde, so its shape stays uniform with the artifact
//! it sits beside.

use crate::core::codec::{encode, Value};
use crate::core::config::ApplyConfig;
use crate::core::models::enums::{EditStatus, MarkerColor, RunStatus};
use crate::core::models::results::CoreResult;
use chrono::Local;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// Suffix stripped from guide file stems when deriving sibling names
pub const GUIDE_STEM_SUFFIX: &str = "_editing_guide";

/// One audit record per processed edit
#[derive(Debug, Clone)]
pub struct RunLogEntry {
    pub id: String,
    pub label: String,
    pub edit_type: String,
    /// Start bound as authored in the guide
    pub start: String,
    /// End bound as authored in the guide
    pub end_time: String,
    pub start_frame: i64,
    pub end_frame: i64,
    /// Frame-accurate display timecode of `start_frame`
    pub start_timecode: String,
    pub end_timecode: String,
    pub duration_frames: i64,
    pub intensity: i64,
    pub color: MarkerColor,
    pub status: EditStatus,
    /// What was done (or skipped) for this edit
    pub actions: Vec<String>,
    pub warnings: Vec<String>,
    /// Work the tool cannot perform itself, tagged for triage
    pub todos: Vec<String>,
}

impl RunLogEntry {
    fn to_value(&self) -> Value {
        let mut entry = BTreeMap::new();
        set(&mut entry, "id", Value::from(self.id.as_str()));
        set(&mut entry, "label", Value::from(self.label.as_str()));
        set(&mut entry, "type", Value::from(self.edit_type.as_str()));
        set(&mut entry, "start", Value::from(self.start.as_str()));
        set(&mut entry, "end_time", Value::from(self.end_time.as_str()));
        set(&mut entry, "start_frame", Value::from(self.start_frame));
        set(&mut entry, "end_frame", Value::from(self.end_frame));
        set(
            &mut entry,
            "start_timecode",
            Value::from(self.start_timecode.as_str()),
        );
        set(
            &mut entry,
            "end_timecode",
            Value::from(self.end_timecode.as_str()),
        );
        set(
            &mut entry,
            "duration_frames",
            Value::from(self.duration_frames),
        );
        set(&mut entry, "intensity_1_5", Value::from(self.intensity));
        set(&mut entry, "color", Value::from(self.color.as_str()));
        set(&mut entry, "status", Value::from(self.status.as_str()));
        set(&mut entry, "actions", string_list(&self.actions));
        set(&mut entry, "warnings", string_list(&self.warnings));
        set(&mut entry, "todos", string_list(&self.todos));
        Value::Object(entry)
    }
}

/// Audit log for one invocation
#[derive(Debug, Clone)]
pub struct RunLog {
    /// Local wall-clock time the run started
    pub timestamp: String,
    pub input_path: String,
    pub project_name: String,
    pub timeline_name: String,
    pub frame_rate: i64,
    pub dry_run: bool,
    pub color_preset: String,
    pub vignette_preset: String,
    pub status: RunStatus,
    /// Fatal failure detail when status is not ok
    pub error: Option<String>,
    /// Document-level warnings, never fatal
    pub warnings: Vec<String>,
    pub entries: Vec<RunLogEntry>,
    pub markers_added: usize,
    pub todos_logged: usize,
}

impl RunLog {
    /// Start a log for `input` under the chosen project name
    pub fn new(input: &Path, project_name: &str, dry_run: bool, config: &ApplyConfig) -> Self {
        Self {
            timestamp: Local::now().to_rfc3339(),
            input_path: input.display().to_string(),
            project_name: project_name.to_string(),
            timeline_name: config.timeline_name.clone(),
            frame_rate: config.frame_rate,
            dry_run,
            color_preset: config.color_preset.clone(),
            vignette_preset: config.vignette_preset.clone(),
            status: RunStatus::Ok,
            error: None,
            warnings: Vec::new(),
            entries: Vec::new(),
            markers_added: 0,
            todos_logged: 0,
        }
    }

    /// Record that the run failed before any edit was processed
    pub fn mark_failed(&mut self, status: RunStatus, error: String) {
        self.status = status;
        self.error = Some(error);
    }

    /// Sidecar log path next to `input`
    ///
    /// The guide stem drops its `_editing_guide` suffix, so
    /// `match01_editing_guide.json` logs to `match01_resolve_apply_log.json`.
    pub fn sidecar_path(input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("guide");
        let stem = stem.strip_suffix(GUIDE_STEM_SUFFIX).unwrap_or(stem);
        input.with_file_name(format!("{}_resolve_apply_log.json", stem))
    }

    /// Serialize through the crate codec and write to `path`
    pub fn write(&self, path: &Path) -> CoreResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, encode(&self.to_value()))?;
        info!("[RunLog] Wrote {}", path.display());
        Ok(())
    }

    /// Full log as a codec value tree
    pub fn to_value(&self) -> Value {
        let mut root = BTreeMap::new();
        set(&mut root, "timestamp", Value::from(self.timestamp.as_str()));
        set(&mut root, "input", Value::from(self.input_path.as_str()));
        set(
            &mut root,
            "project_name",
            Value::from(self.project_name.as_str()),
        );
        set(
            &mut root,
            "timeline",
            Value::from(self.timeline_name.as_str()),
        );
        set(&mut root, "fps", Value::from(self.frame_rate));
        set(&mut root, "dry_run", Value::from(self.dry_run));
        set(
            &mut root,
            "color_preset",
            Value::from(self.color_preset.as_str()),
        );
        set(
            &mut root,
            "vignette_preset",
            Value::from(self.vignette_preset.as_str()),
        );
        set(&mut root, "status", Value::from(self.status.as_str()));
        if let Some(error) = &self.error {
            set(&mut root, "error", Value::from(error.as_str()));
        }
        set(&mut root, "warnings", string_list(&self.warnings));
        set(
            &mut root,
            "edits",
            Value::Array(self.entries.iter().map(RunLogEntry::to_value).collect()),
        );

        let mut summary = BTreeMap::new();
        set(&mut summary, "edits_processed", Value::from(self.entries.len()));
        set(&mut summary, "markers_added", Value::from(self.markers_added));
        set(&mut summary, "todos_logged", Value::from(self.todos_logged));
        set(&mut root, "summary", Value::Object(summary));

        Value::Object(root)
    }
}

fn set(map: &mut BTreeMap<String, Value>, key: &str, value: Value) {
    map.insert(key.to_string(), value);
}

fn string_list(items: &[String]) -> Value {
    Value::Array(items.iter().map(|s| Value::from(s.as_str())).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::codec::decode;
    use tempfile::TempDir;

    #[test]
    fn test_sidecar_path_strips_guide_suffix() {
        assert_eq!(
            RunLog::sidecar_path(Path::new("/runs/match01_editing_guide.json")),
            PathBuf::from("/runs/match01_resolve_apply_log.json")
        );
    }

    #[test]
    fn test_sidecar_path_plain_stem() {
        assert_eq!(
            RunLog::sidecar_path(Path::new("/runs/notes.json")),
            PathBuf::from("/runs/notes_resolve_apply_log.json")
        );
    }

    #[test]
    fn test_sidecar_path_relative_input() {
        assert_eq!(
            RunLog::sidecar_path(Path::new("clip_editing_guide.json")),
            PathBuf::from("clip_resolve_apply_log.json")
        );
    }

    #[test]
    fn test_header_fields_serialized() {
        let config = ApplyConfig::default();
        let log = RunLog::new(Path::new("/tmp/g_editing_guide.json"), "proj", true, &config);
        let value = log.to_value();

        assert_eq!(value.get("input").and_then(Value::as_str), Some("/tmp/g_editing_guide.json"));
        assert_eq!(value.get("project_name").and_then(Value::as_str), Some("proj"));
        assert_eq!(value.get("timeline").and_then(Value::as_str), Some("T1"));
        assert_eq!(value.get("fps").and_then(Value::as_i64), Some(30));
        assert_eq!(value.get("dry_run").and_then(Value::as_bool), Some(true));
        assert_eq!(value.get("status").and_then(Value::as_str), Some("ok"));
        assert_eq!(value.get("error"), None);
        assert!(value.get("timestamp").and_then(Value::as_str).is_some());
        assert!(value.get("summary").is_some());
    }

    #[test]
    fn test_failed_run_carries_error() {
        let config = ApplyConfig::default();
        let mut log = RunLog::new(Path::new("g.json"), "proj", false, &config);
        log.mark_failed(RunStatus::ParseError, "bad input".to_string());
        let value = log.to_value();

        assert_eq!(value.get("status").and_then(Value::as_str), Some("parse_error"));
        assert_eq!(value.get("error").and_then(Value::as_str), Some("bad input"));
    }

    #[test]
    fn test_entry_serialization() {
        let entry = RunLogEntry {
            id: "E001".to_string(),
            label: "Opening".to_string(),
            edit_type: "highlight".to_string(),
            start: "00:00:10".to_string(),
            end_time: "00:00:12".to_string(),
            start_frame: 300,
            end_frame: 360,
            start_timecode: "00:00:10:00".to_string(),
            end_timecode: "00:00:12:00".to_string(),
            duration_frames: 60,
            intensity: 4,
            color: MarkerColor::Orange,
            status: EditStatus::MarkerAdded,
            actions: vec!["marker:added".to_string()],
            warnings: vec![],
            todos: vec!["apply:audio:sfx".to_string()],
        };
        let value = entry.to_value();

        assert_eq!(value.get("id").and_then(Value::as_str), Some("E001"));
        assert_eq!(value.get("type").and_then(Value::as_str), Some("highlight"));
        assert_eq!(value.get("start_frame").and_then(Value::as_i64), Some(300));
        assert_eq!(value.get("intensity_1_5").and_then(Value::as_i64), Some(4));
        assert_eq!(value.get("color").and_then(Value::as_str), Some("Orange"));
        assert_eq!(value.get("status").and_then(Value::as_str), Some("marker_added"));
        let todos = value.get("todos").and_then(Value::as_array).unwrap();
        assert_eq!(todos[0].as_str(), Some("apply:audio:sfx"));
    }

    #[test]
    fn test_write_produces_decodable_sidecar() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("log.json");

        let config = ApplyConfig::default();
        let mut log = RunLog::new(Path::new("g_editing_guide.json"), "proj", false, &config);
        log.warnings.push("something odd".to_string());
        log.write(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let value = decode(&text).unwrap();
        assert_eq!(value.get("project_name").and_then(Value::as_str), Some("proj"));
        let warnings = value.get("warnings").and_then(Value::as_array).unwrap();
        assert_eq!(warnings[0].as_str(), Some("something odd"));
        let summary = value.get("summary").unwrap();
        assert_eq!(summary.get("edits_processed").and_then(Value::as_i64), Some(0));
    }
}
