//! Marker classification and emission
//!
//! Walks normalized edits latest-first and turns each one into a colored
//! timeline marker, or a record of the marker it would have placed, plus the
//! todo list of techniques this tool does not execute itself. Exactly one
//! run-log entry is appended per edit no matter how placement goes.

use crate::core::codec::encode;
use crate::core::config::{ApplyConfig, DEFAULT_COLOR_PRESET, DEFAULT_VIGNETTE_PRESET};
use crate::core::models::enums::{EditStatus, MarkerColor, TechniqueClass};
use crate::core::models::guide::NormalizedEdit;
use crate::core::resolve::{TimelineHandle, TimelineHost};
use crate::core::runlog::{RunLog, RunLogEntry};
use crate::core::timecode::frames_to_timecode;
use tracing::{debug, warn};

/// Serialized effects hints are capped to keep marker notes readable
const EFFECTS_NOTE_LIMIT: usize = 600;

/// Live marker destination: a connected host plus the timeline to annotate
pub struct MarkerSink<'a> {
    pub host: &'a dyn TimelineHost,
    pub timeline: &'a TimelineHandle,
}

/// Counts accumulated over one emission pass
#[derive(Debug, Default, PartialEq, Eq)]
pub struct EmitSummary {
    pub markers_added: usize,
    pub todos_logged: usize,
}

/// Emit markers for `edits`, which arrive sorted ascending by start frame
///
/// Edits are applied latest-first, so earlier frame positions stay valid if
/// a later stage starts inserting content. Marker failures are per-edit
/// outcomes, never aborts.
pub fn emit(
    edits: &[NormalizedEdit],
    sink: Option<&MarkerSink<'_>>,
    dry_run: bool,
    config: &ApplyConfig,
    run_log: &mut RunLog,
) -> EmitSummary {
    let mut summary = EmitSummary::default();

    for edit in edits.iter().rev() {
        let entry = emit_one(edit, sink, dry_run, config, &mut summary);
        run_log.entries.push(entry);
    }

    summary
}

fn emit_one(
    edit: &NormalizedEdit,
    sink: Option<&MarkerSink<'_>>,
    dry_run: bool,
    config: &ApplyConfig,
    summary: &mut EmitSummary,
) -> RunLogEntry {
    let mut color = config.color_for_intensity(edit.intensity);
    let mut title = format!("{} {} (intensity {})", edit.id, edit.label, edit.intensity);

    let mut actions = Vec::new();
    let mut warnings = Vec::new();
    let mut todos = Vec::new();
    let mut has_audio = false;
    let mut has_visual = false;

    for technique in &edit.techniques {
        match TechniqueClass::classify(technique) {
            TechniqueClass::Audio => {
                has_audio = true;
                todos.push(format!("apply:audio:{}", technique));
            }
            TechniqueClass::Visual => {
                has_visual = true;
                todos.push(format!("apply:visual:{} (best-effort)", technique));
            }
            TechniqueClass::Unknown => {
                todos.push(format!("apply:unknown:{}", technique));
            }
        }
    }

    // Audio work cannot happen here at all; make those edits stand out in
    // the host's marker index
    if has_audio && !has_visual {
        color = MarkerColor::Purple;
        title = format!("TODO AUDIO {}", title);
    }

    if has_visual && !todos.is_empty() {
        actions.push("note:complex_edit".to_string());
    }

    let note = compose_note(edit, config);

    let status = match (dry_run, sink) {
        (false, Some(sink)) => {
            let placed = sink.host.add_marker(
                sink.timeline,
                edit.start_frame,
                color,
                &title,
                &note,
                edit.duration_frames(),
            );
            match placed {
                Ok(()) => {
                    debug!(
                        "[Markers] {} at frame {} ({})",
                        edit.id, edit.start_frame, color
                    );
                    actions.push("marker:added".to_string());
                    summary.markers_added += 1;
                    EditStatus::MarkerAdded
                }
                Err(e) => {
                    warn!("[Markers] {}: marker not placed: {}", edit.id, e);
                    warnings.push(format!("marker add failed: {}", e));
                    EditStatus::MarkerFailed
                }
            }
        }
        (true, _) => {
            actions.push("marker:dry_run_skipped".to_string());
            EditStatus::DryRun
        }
        (false, None) => {
            actions.push("marker:api_unavailable_skipped".to_string());
            EditStatus::ApiUnavailable
        }
    };

    summary.todos_logged += todos.len();

    RunLogEntry {
        id: edit.id.clone(),
        label: edit.label.clone(),
        edit_type: edit.edit_type.clone(),
        start: edit.start_tc.clone(),
        end_time: edit.end_tc.clone(),
        start_frame: edit.start_frame,
        end_frame: edit.end_frame,
        start_timecode: frames_to_timecode(edit.start_frame, config.frame_rate),
        end_timecode: frames_to_timecode(edit.end_frame, config.frame_rate),
        duration_frames: edit.duration_frames(),
        intensity: edit.intensity,
        color,
        status,
        actions,
        warnings,
        todos,
    }
}

/// Marker note: rationale, serialized effects hint, and any non-default
/// preset names, pipe-separated with empty parts skipped
fn compose_note(edit: &NormalizedEdit, config: &ApplyConfig) -> String {
    let mut parts: Vec<String> = Vec::new();

    if !edit.rationale.is_empty() {
        parts.push(edit.rationale.clone());
    }

    if !edit.effects_map.is_empty() {
        let serialized = encode(&edit.effects_map);
        parts.push(serialized.chars().take(EFFECTS_NOTE_LIMIT).collect());
    }

    if !edit.techniques.is_empty() {
        if config.color_preset != DEFAULT_COLOR_PRESET {
            parts.push(config.color_preset.clone());
        }
        if config.vignette_preset != DEFAULT_VIGNETTE_PRESET {
            parts.push(config.vignette_preset.clone());
        }
    }

    parts.join(" | ")
}
