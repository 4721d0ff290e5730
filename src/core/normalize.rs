//! Edit record normalization
//!
//! Consumes the loosely-typed records under the guide's `edits` key and
//! produces the strictly-typed edits the rest of the pipeline works with.
//! Key-variant resolution, defaulting, and clamping all happen here, once;
//! downstream code never sees a raw record.

use crate::core::codec::{encode, Value};
use crate::core::config::ApplyConfig;
use crate::core::models::guide::{GuideDocument, NormalizedEdit};
use crate::core::timecode::{parse_timecode_to_seconds, seconds_to_frames};
use tracing::debug;

/// Normalization output: ordered edits plus document-level warnings
#[derive(Debug, Default)]
pub struct NormalizeOutcome {
    pub edits: Vec<NormalizedEdit>,
    pub warnings: Vec<String>,
}

/// Normalize every raw edit record in the guide
///
/// Never fails: a missing or malformed `edits` array yields an empty list
/// and a warning. The result is sorted ascending by start frame; ties keep
/// their source order.
pub fn normalize(doc: &GuideDocument, config: &ApplyConfig) -> NormalizeOutcome {
    let mut outcome = NormalizeOutcome::default();

    let raw = match doc.raw_edits() {
        Some(records) => records,
        None => {
            if doc.has_edits_key() {
                outcome
                    .warnings
                    .push("'edits' is not an array; nothing to apply".to_string());
            } else {
                outcome
                    .warnings
                    .push("no 'edits' array found in document".to_string());
            }
            return outcome;
        }
    };

    for (index, record) in raw.iter().enumerate() {
        let edit = resolve_record(record, index + 1, config, &mut outcome.warnings);
        outcome.edits.push(edit);
    }

    // Stable sort, so records sharing a start frame keep guide order
    outcome.edits.sort_by_key(|e| e.start_frame);
    debug!("[Normalize] {} edits normalized", outcome.edits.len());
    outcome
}

/// Resolve one raw record at 1-based `ordinal` into a normalized edit
fn resolve_record(
    record: &Value,
    ordinal: usize,
    config: &ApplyConfig,
    warnings: &mut Vec<String>,
) -> NormalizedEdit {
    let start_tc = timecode_text(first_present(record, &["start", "start_time"]));
    let end_tc = timecode_text(first_present(record, &["end", "end_time"]));

    let start_sec = parse_timecode_to_seconds(&start_tc).max(0.0);
    let end_sec = parse_timecode_to_seconds(&end_tc).max(0.0);

    let start_frame = seconds_to_frames(start_sec, config.frame_rate);
    let mut end_frame = seconds_to_frames(end_sec, config.frame_rate);

    let id = scalar_text(record.get("id")).unwrap_or_else(|| format!("E{:03}", ordinal));
    let label = scalar_text(record.get("label")).unwrap_or_else(|| format!("Edit {}", ordinal));

    let edit_type = match record.get("type").and_then(Value::as_str) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => "unknown".to_string(),
    };

    // Markers need visible width; a degenerate range gets one second
    if end_frame <= start_frame {
        end_frame = start_frame.saturating_add(config.frame_rate);
        warnings.push(format!(
            "edit {}: end '{}' is not after start '{}', forced a one-second duration",
            id, end_tc, start_tc
        ));
    }

    let intensity = resolve_intensity(record.get("intensity_1_5"));

    let rationale = record
        .get("why_this_works")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();

    let effects_map = first_present(record, &["effects_map", "resolve_hint"])
        .cloned()
        .unwrap_or_else(Value::object);

    let techniques = technique_types(record.get("edits"));

    NormalizedEdit {
        ordinal,
        id,
        label,
        edit_type,
        start_tc,
        end_tc,
        start_frame,
        end_frame,
        intensity,
        rationale,
        effects_map,
        techniques,
    }
}

/// First value present among `keys`, in order
fn first_present<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| record.get(key))
}

/// Display text for a timecode field: strings pass through, bare numbers
/// keep their numeric text, anything else reads as timeline start
fn timecode_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => encode(&Value::Number(*n)),
        _ => "00:00:00".to_string(),
    }
}

/// Scalar coerced to non-blank text
fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(encode(&Value::Number(*n))),
        _ => None,
    }
}

/// Clamp intensity into 1..=5; absent or non-numeric input reads as 3
fn resolve_intensity(value: Option<&Value>) -> i64 {
    let number = match value {
        Some(Value::Number(n)) => Some(*n),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match number {
        Some(n) if n.is_finite() => n.clamp(1.0, 5.0) as i64,
        _ => 3,
    }
}

/// Technique type strings from the record's own `edits` list
fn technique_types(value: Option<&Value>) -> Vec<String> {
    let items = match value.and_then(Value::as_array) {
        Some(items) => items,
        None => return Vec::new(),
    };
    items
        .iter()
        .filter_map(|item| {
            item.as_object().map(|entry| {
                entry
                    .get("type")
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .to_string()
            })
        })
        .collect()
}
