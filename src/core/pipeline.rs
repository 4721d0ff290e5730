//! End-to-end apply pipeline
//!
//! Read guide, decode, discover the external tool, normalize, emit markers,
//! write the run log. Only guide read/decode failures (or a run log that
//! cannot be written) are fatal; the external tool being absent is an
//! expected condition and the run completes in api_unavailable mode.

use crate::core::codec::decode;
use crate::core::config::ApplyConfig;
use crate::core::markers::{emit, MarkerSink};
use crate::core::models::enums::RunStatus;
use crate::core::models::guide::GuideDocument;
use crate::core::models::results::{CoreError, CoreResult};
use crate::core::normalize::normalize;
use crate::core::resolve::{discover, TimelineHandle, TimelineHost};
use crate::core::runlog::{RunLog, GUIDE_STEM_SUFFIX};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// One apply invocation
#[derive(Debug, Clone)]
pub struct ApplyRequest {
    /// Path to the editing guide artifact
    pub input: PathBuf,
    /// Overrides the guide's own project name when set
    pub project_name: Option<String>,
    /// Plan and log without any external mutating call
    pub dry_run: bool,
    pub config: ApplyConfig,
}

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct ApplyOutcome {
    pub run_log_path: PathBuf,
    pub edits_processed: usize,
    pub markers_added: usize,
    pub todos_logged: usize,
}

/// Run the full pipeline for one guide artifact
///
/// The run log is written before this returns, on success and on guide
/// read/decode failure alike.
pub fn run(request: &ApplyRequest) -> CoreResult<ApplyOutcome> {
    let config = &request.config;
    let sidecar = RunLog::sidecar_path(&request.input);
    let fallback_name = default_project_name(&request.input);

    info!(
        "[Pipeline] Step 1/6: Reading guide {}",
        request.input.display()
    );
    let text = match std::fs::read_to_string(&request.input) {
        Ok(text) => text,
        Err(e) => {
            return fail_run(
                request,
                &sidecar,
                &fallback_name,
                RunStatus::ReadError,
                CoreError::Io(e),
            );
        }
    };

    info!("[Pipeline] Step 2/6: Decoding guide");
    let root = match decode(&text) {
        Ok(root) => root,
        Err(e) => {
            return fail_run(
                request,
                &sidecar,
                &fallback_name,
                RunStatus::ParseError,
                CoreError::Decode(e),
            );
        }
    };
    let doc = match GuideDocument::from_value(root) {
        Ok(doc) => doc,
        Err(e) => {
            return fail_run(request, &sidecar, &fallback_name, RunStatus::ParseError, e);
        }
    };

    let project_name = request
        .project_name
        .clone()
        .or_else(|| doc.project_name().map(String::from))
        .unwrap_or(fallback_name);
    let mut run_log = RunLog::new(&request.input, &project_name, request.dry_run, config);

    if let Some(source) = doc.source_path() {
        if !Path::new(source).exists() {
            warn!("[Pipeline] Source media not found: {}", source);
            run_log
                .warnings
                .push(format!("source media not found: {}", source));
        }
    }

    info!("[Pipeline] Step 3/6: Detecting external tool");
    let host = if request.dry_run {
        info!("[Pipeline] Dry run requested, skipping host discovery");
        None
    } else {
        discover(config)
    };
    let timeline = open_timeline(host.as_deref(), &project_name, &doc, config, &mut run_log);

    info!("[Pipeline] Step 4/6: Normalizing edits");
    let normalized = normalize(&doc, config);
    run_log.warnings.extend(normalized.warnings);

    info!(
        "[Pipeline] Step 5/6: Processing {} edits",
        normalized.edits.len()
    );
    let sink = match (host.as_deref(), timeline.as_ref()) {
        (Some(host), Some(timeline)) => Some(MarkerSink { host, timeline }),
        _ => None,
    };
    let summary = emit(
        &normalized.edits,
        sink.as_ref(),
        request.dry_run,
        config,
        &mut run_log,
    );
    run_log.markers_added = summary.markers_added;
    run_log.todos_logged = summary.todos_logged;

    info!("[Pipeline] Step 6/6: Writing run log");
    run_log.write(&sidecar)?;

    info!(
        "[Pipeline] Done: {} edits, {} markers added, {} todos logged",
        run_log.entries.len(),
        summary.markers_added,
        summary.todos_logged
    );

    Ok(ApplyOutcome {
        run_log_path: sidecar,
        edits_processed: run_log.entries.len(),
        markers_added: summary.markers_added,
        todos_logged: summary.todos_logged,
    })
}

/// Project name when neither the caller nor the guide supplies one
fn default_project_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("guide");
    let stem = stem.strip_suffix(GUIDE_STEM_SUFFIX).unwrap_or(stem);
    format!("{}_autoedit", stem)
}

/// Write a failure run log, then surface the original error
fn fail_run(
    request: &ApplyRequest,
    sidecar: &Path,
    project_name: &str,
    status: RunStatus,
    error: CoreError,
) -> CoreResult<ApplyOutcome> {
    warn!("[Pipeline] Run failed ({}): {}", status, error);
    let mut run_log = RunLog::new(&request.input, project_name, request.dry_run, &request.config);
    run_log.mark_failed(status, error.to_string());
    run_log.write(sidecar)?;
    Err(error)
}

/// Open the host project and timeline, importing source media on the way
///
/// Every failure here downgrades to a run-log warning and the run continues
/// without a live timeline.
fn open_timeline(
    host: Option<&dyn TimelineHost>,
    project_name: &str,
    doc: &GuideDocument,
    config: &ApplyConfig,
    run_log: &mut RunLog,
) -> Option<TimelineHandle> {
    let host = host?;

    let project = match host.load_or_create_project(project_name, config.frame_rate) {
        Ok(project) => project,
        Err(e) => {
            warn!("[Pipeline] Could not open project '{}': {}", project_name, e);
            run_log.warnings.push(format!("project open failed: {}", e));
            return None;
        }
    };

    if let Some(source) = doc.source_path() {
        let path = Path::new(source);
        if path.exists() {
            if let Err(e) = host.import_media(&project, path) {
                warn!("[Pipeline] Media import failed: {}", e);
                run_log.warnings.push(format!("media import failed: {}", e));
            }
        }
    }

    match host.ensure_timeline(&project, &config.timeline_name) {
        Ok(timeline) => Some(timeline),
        Err(e) => {
            warn!(
                "[Pipeline] Could not open timeline '{}': {}",
                config.timeline_name, e
            );
            run_log.warnings.push(format!("timeline open failed: {}", e));
            None
        }
    }
}
