use crate::error::HookError;
use crate::input::HookContext;
use std::path::Path;

const UNKNOWN_PROJECT: &str = "unknown";

/// Event classifier passed as the first CLI argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookType {
    /// Claude finished responding
    Stop,
    /// Claude is waiting on a permission prompt
    PermissionRequest,
}

impl HookType {
    pub fn parse(token: &str) -> Result<Self, HookError> {
        match token {
            "stop" => Ok(HookType::Stop),
            "permission-request" => Ok(HookType::PermissionRequest),
            other => Err(HookError::UnknownHookType(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HookType::Stop => "stop",
            HookType::PermissionRequest => "permission-request",
        }
    }

    pub fn message(&self, project_name: &str) -> String {
        match self {
            HookType::Stop => format!("Completion received - {}", project_name),
            HookType::PermissionRequest => format!("Permission requested - {}", project_name),
        }
    }
}

/// Last path component of the session's working directory.
pub fn project_name(context: &HookContext) -> String {
    context
        .cwd
        .as_deref()
        .and_then(|cwd| Path::new(cwd).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| UNKNOWN_PROJECT.to_string())
}

/// Display message for a hook type and context.
pub fn event_message(hook_type: HookType, context: &HookContext) -> String {
    hook_type.message(&project_name(context))
}
