//! External editing-host seam
//!
//! The only contact surface with the editing application. Every capability
//! returns a `ToolResult`, callers downgrade failures to per-edit statuses
//! or warnings, and discovery finding no host at all is an expected
//! condition rather than an error.

pub mod bridge;

use crate::core::config::ApplyConfig;
use crate::core::models::enums::MarkerColor;
use crate::core::models::results::ToolResult;
use std::path::Path;
use tracing::{info, warn};

pub use bridge::BridgeHost;

/// Identity of a connected host
#[derive(Debug, Clone)]
pub struct HostInfo {
    pub product: String,
    pub version: String,
}

/// Opaque project reference issued by the host
#[derive(Debug, Clone)]
pub struct ProjectHandle(pub String);

/// Opaque timeline reference issued by the host
#[derive(Debug, Clone)]
pub struct TimelineHandle(pub String);

/// Narrow capability surface this tool needs from the editing host
pub trait TimelineHost {
    /// Product name and version of the connected host
    fn product_info(&self) -> ToolResult<HostInfo>;

    /// Load the named project, creating it at `frame_rate` when absent
    fn load_or_create_project(&self, name: &str, frame_rate: i64) -> ToolResult<ProjectHandle>;

    /// Import source media into the project pool
    fn import_media(&self, project: &ProjectHandle, path: &Path) -> ToolResult<()>;

    /// Current timeline, or a new empty one with the given name
    fn ensure_timeline(&self, project: &ProjectHandle, name: &str) -> ToolResult<TimelineHandle>;

    /// Place one colored marker with a title and note
    fn add_marker(
        &self,
        timeline: &TimelineHandle,
        frame: i64,
        color: MarkerColor,
        title: &str,
        note: &str,
        duration_frames: i64,
    ) -> ToolResult<()>;
}

/// Probe for a live editing host
///
/// Uses the configured bridge command, falling back to the
/// RESOLVE_BRIDGE_CMD environment variable. No command, or a probe the
/// bridge does not answer, means no host; the caller proceeds without one.
pub fn discover(config: &ApplyConfig) -> Option<Box<dyn TimelineHost>> {
    let command_line = config
        .bridge_cmd
        .clone()
        .or_else(|| std::env::var("RESOLVE_BRIDGE_CMD").ok())?;

    let host = BridgeHost::new(&command_line)?;
    match host.product_info() {
        Ok(host_info) => {
            info!(
                "[Resolve] Connected: {} {}",
                host_info.product, host_info.version
            );
            Some(Box::new(host))
        }
        Err(e) => {
            warn!("[Resolve] Bridge configured but not answering: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_without_bridge_cmd() {
        let mut config = ApplyConfig::default();
        config.bridge_cmd = None;
        // Only deterministic when the env fallback is unset, which holds in CI
        if std::env::var("RESOLVE_BRIDGE_CMD").is_err() {
            assert!(discover(&config).is_none());
        }
    }

    #[test]
    fn test_discover_with_unresponsive_bridge() {
        let mut config = ApplyConfig::default();
        config.bridge_cmd = Some("definitely-not-a-real-bridge-binary".to_string());
        assert!(discover(&config).is_none());
    }
}
