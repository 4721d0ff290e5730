//! Subprocess bridge to the editing host
//!
//! Drives a user-supplied bridge command, one invocation per capability
//! call: the operation name and a JSON payload go on argv, and the bridge
//! answers with one JSON object on stdout, either
//! `{"ok":true,"result":...}` or `{"ok":false,"error":"..."}`.

use super::{HostInfo, ProjectHandle, TimelineHandle, TimelineHost};
use crate::core::codec::{decode, encode, Value};
use crate::core::io::runner::CommandRunner;
use crate::core::models::enums::MarkerColor;
use crate::core::models::results::{ToolError, ToolResult};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Editing host reached through an external bridge process
pub struct BridgeHost {
    program: String,
    base_args: Vec<String>,
    runner: CommandRunner,
}

impl BridgeHost {
    /// Build from a whitespace-separated command line; blank input is no host
    pub fn new(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace().map(String::from);
        let program = parts.next()?;
        Some(Self {
            program,
            base_args: parts.collect(),
            runner: CommandRunner::new(),
        })
    }

    /// One bridge invocation: run, check exit, decode, unwrap the envelope
    fn call(&self, operation: &str, payload: Value) -> ToolResult<Value> {
        let payload_text = encode(&payload);
        let mut cmd: Vec<&str> = Vec::with_capacity(self.base_args.len() + 3);
        cmd.push(&self.program);
        cmd.extend(self.base_args.iter().map(String::as_str));
        cmd.push(operation);
        cmd.push(&payload_text);

        debug!("[Bridge] {} {}", self.program, operation);
        let output = self
            .runner
            .run(&cmd)
            .map_err(|e| ToolError::Unavailable(e.to_string()))?;

        if !output.success {
            let stderr = output.stderr.trim();
            let detail = if stderr.is_empty() {
                "bridge exited nonzero"
            } else {
                stderr
            };
            return Err(ToolError::CallFailed(format!("{}: {}", operation, detail)));
        }

        let reply =
            decode(output.stdout.trim()).map_err(|e| ToolError::BadResponse(e.to_string()))?;
        match reply.get("ok").and_then(Value::as_bool) {
            Some(true) => Ok(reply.get("result").cloned().unwrap_or(Value::Null)),
            Some(false) => {
                let message = reply
                    .get("error")
                    .and_then(Value::as_str)
                    .unwrap_or("bridge reported failure");
                Err(ToolError::CallFailed(format!("{}: {}", operation, message)))
            }
            None => Err(ToolError::BadResponse(
                "reply missing 'ok' field".to_string(),
            )),
        }
    }

    /// Required string field out of a reply result
    fn handle_field(result: &Value, key: &str) -> ToolResult<String> {
        result
            .get(key)
            .and_then(Value::as_str)
            .map(String::from)
            .ok_or_else(|| ToolError::BadResponse(format!("reply missing '{}'", key)))
    }
}

fn payload(entries: Vec<(&str, Value)>) -> Value {
    let mut map = BTreeMap::new();
    for (key, value) in entries {
        map.insert(key.to_string(), value);
    }
    Value::Object(map)
}

impl TimelineHost for BridgeHost {
    fn product_info(&self) -> ToolResult<HostInfo> {
        let result = self.call("product_info", Value::object())?;
        Ok(HostInfo {
            product: result
                .get("product")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string(),
            version: result
                .get("version")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string(),
        })
    }

    fn load_or_create_project(&self, name: &str, frame_rate: i64) -> ToolResult<ProjectHandle> {
        let result = self.call(
            "load_or_create_project",
            payload(vec![
                ("name", Value::from(name)),
                ("frame_rate", Value::from(frame_rate)),
            ]),
        )?;
        Ok(ProjectHandle(Self::handle_field(&result, "project")?))
    }

    fn import_media(&self, project: &ProjectHandle, path: &Path) -> ToolResult<()> {
        self.call(
            "import_media",
            payload(vec![
                ("project", Value::from(project.0.as_str())),
                ("path", Value::from(path.display().to_string())),
            ]),
        )?;
        Ok(())
    }

    fn ensure_timeline(&self, project: &ProjectHandle, name: &str) -> ToolResult<TimelineHandle> {
        let result = self.call(
            "ensure_timeline",
            payload(vec![
                ("project", Value::from(project.0.as_str())),
                ("name", Value::from(name)),
            ]),
        )?;
        Ok(TimelineHandle(Self::handle_field(&result, "timeline")?))
    }

    fn add_marker(
        &self,
        timeline: &TimelineHandle,
        frame: i64,
        color: MarkerColor,
        title: &str,
        note: &str,
        duration_frames: i64,
    ) -> ToolResult<()> {
        self.call(
            "add_marker",
            payload(vec![
                ("timeline", Value::from(timeline.0.as_str())),
                ("frame", Value::from(frame)),
                ("color", Value::from(color.as_str())),
                ("title", Value::from(title)),
                ("note", Value::from(note)),
                ("duration_frames", Value::from(duration_frames)),
            ]),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_command_line_is_no_host() {
        assert!(BridgeHost::new("").is_none());
        assert!(BridgeHost::new("   ").is_none());
    }

    #[test]
    fn test_command_line_splits_on_whitespace() {
        let host = BridgeHost::new("resolve-bridge --port 9000").unwrap();
        assert_eq!(host.program, "resolve-bridge");
        assert_eq!(host.base_args, vec!["--port", "9000"]);
    }

    #[test]
    fn test_missing_program_is_unavailable() {
        let host = BridgeHost::new("definitely-not-a-real-bridge-binary").unwrap();
        let err = host.product_info().unwrap_err();
        assert!(matches!(err, ToolError::Unavailable(_)));
    }

    #[test]
    fn test_non_json_reply_is_bad_response() {
        // echo prints the argv back, which is not a JSON reply envelope
        let host = BridgeHost::new("echo").unwrap();
        let err = host.product_info().unwrap_err();
        assert!(matches!(err, ToolError::BadResponse(_)));
    }
}
