use crate::notifier::NotifyError;

/// Fatal errors. Each one ends the invocation with exit status 1.
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    #[error("Usage: notify <hook-type>")]
    Usage,

    #[error("Unknown hook type: {0}")]
    UnknownHookType(String),

    #[error("Error sending notification: {0}")]
    Notify(#[from] NotifyError),

    #[error("Error logging event: {0:#}")]
    Log(anyhow::Error),
}
