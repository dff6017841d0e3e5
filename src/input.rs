use serde::Deserialize;
use std::io::Read;
use tracing::warn;

/// Context JSON passed to the hook on stdin.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct HookContext {
    pub session_id: Option<String>,
    pub cwd: Option<String>,
    #[allow(dead_code)]
    pub permission_mode: Option<String>,
    #[allow(dead_code)]
    pub hook_event_name: Option<String>,
    /// Only present for tool events
    #[allow(dead_code)]
    pub tool_name: Option<String>,
}

/// Read the hook context, falling back to an empty context on any failure.
///
/// An interactive stdin is never read. Read and parse errors are reported as
/// warnings only.
pub fn read_context<R: Read>(mut reader: R, interactive: bool) -> HookContext {
    if interactive {
        return HookContext::default();
    }

    let mut buffer = String::new();
    if let Err(e) = reader.read_to_string(&mut buffer) {
        warn!("failed to read hook context: {e}");
        return HookContext::default();
    }

    parse_context(&buffer)
}

fn parse_context(buffer: &str) -> HookContext {
    if buffer.trim().is_empty() {
        return HookContext::default();
    }

    match serde_json::from_str(buffer) {
        Ok(context) => context,
        Err(e) => {
            warn!("failed to parse JSON context: {e}");
            HookContext::default()
        }
    }
}
