use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use tracing::debug;

/// Notifier executable, resolved through PATH
pub const NOTIFIER_PROGRAM: &str = "terminal-notifier";

/// Sender used when the icon is an image file
pub const DEFAULT_SENDER: &str = "com.apple.Terminal";

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} failed with {status}: {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// How the notification gets its icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Icon {
    /// Image shown inside the notification; sender is fixed
    ContentImage(PathBuf),
    /// App bundle id whose icon is shown
    Sender(String),
}

impl Icon {
    /// An existing regular file is an image; anything else is a sender id.
    pub fn resolve(configured: &str) -> Self {
        match fs::metadata(configured) {
            Ok(metadata) if metadata.is_file() => Icon::ContentImage(PathBuf::from(configured)),
            _ => Icon::Sender(configured.to_string()),
        }
    }
}

#[derive(Debug)]
pub struct Notification<'a> {
    pub title: &'a str,
    pub message: &'a str,
    pub sound: &'a str,
    pub icon: &'a Icon,
}

/// Delivers a desktop notification.
pub trait Notifier {
    fn send(&self, notification: &Notification<'_>) -> Result<(), NotifyError>;
}

/// Runs `terminal-notifier` with an argument array (no shell involved).
#[derive(Debug)]
pub struct TerminalNotifier {
    program: String,
}

impl Default for TerminalNotifier {
    fn default() -> Self {
        TerminalNotifier {
            program: NOTIFIER_PROGRAM.to_string(),
        }
    }
}

impl TerminalNotifier {
    pub fn args(notification: &Notification<'_>) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-title".into(),
            notification.title.into(),
            "-message".into(),
            notification.message.into(),
            "-sound".into(),
            notification.sound.into(),
        ];

        match notification.icon {
            Icon::ContentImage(path) => {
                args.push("-contentImage".into());
                args.push(path.into());
                args.push("-sender".into());
                args.push(DEFAULT_SENDER.into());
            }
            Icon::Sender(sender) => {
                args.push("-sender".into());
                args.push(sender.into());
            }
        }

        args
    }
}

impl Notifier for TerminalNotifier {
    fn send(&self, notification: &Notification<'_>) -> Result<(), NotifyError> {
        let args = Self::args(notification);
        debug!(program = %self.program, ?args, "sending notification");

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| NotifyError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(NotifyError::Failed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}
