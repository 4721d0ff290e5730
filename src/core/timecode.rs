//! Timecode parsing and frame math
//!
//! Guide timecodes are authored loosely (HH:MM:SS, MM:SS, SS, or a bare
//! number of seconds) and are interpreted relative to timeline start. All
//! frame math runs at the configured rate; nothing here inspects the media
//! itself.

/// Parse a loose timecode into seconds
///
/// Empty input is zero. Text that parses as a bare number is taken as
/// seconds directly. Otherwise the text splits on ':' and '.' and reads as
/// H:M:S, M:S, or S. Anything else is zero; this never fails.
pub fn parse_timecode_to_seconds(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    if let Ok(seconds) = trimmed.parse::<f64>() {
        if seconds.is_finite() {
            return seconds;
        }
        return 0.0;
    }

    let mut values = Vec::new();
    for part in trimmed.split([':', '.']) {
        match part.parse::<f64>() {
            Ok(v) if v.is_finite() => values.push(v),
            _ => return 0.0,
        }
    }

    match values.as_slice() {
        [h, m, s] => h * 3600.0 + m * 60.0 + s,
        [m, s] => m * 60.0 + s,
        [s] => *s,
        _ => 0.0,
    }
}

/// Whole frame index for `seconds` at `fps`, rounding half up
pub fn seconds_to_frames(seconds: f64, fps: i64) -> i64 {
    (seconds * fps as f64 + 0.5).floor() as i64
}

/// Display timecode "HH:MM:SS:FF"; negative frames clamp to zero
pub fn frames_to_timecode(frames: i64, fps: i64) -> String {
    let fps = fps.max(1);
    let frames = frames.max(0);
    let total_seconds = frames / fps;
    let frame = frames % fps;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}:{:02}", hours, minutes, seconds, frame)
}
