use std::io::{self, IsTerminal};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

mod config;
mod error;
mod event_log;
mod input;
mod message;
mod notifier;

use config::Config;
use error::HookError;
use event_log::LogEntry;
use input::HookContext;
use message::HookType;
use notifier::{Icon, Notification, Notifier, TerminalNotifier};

const NOTIFICATION_TITLE: &str = "Claude Code";
const NOTIFICATION_SOUND: &str = "default";

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("CLAUDE_NOTIFY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();

    let config = Config::from_env();
    let notifier = TerminalNotifier::default();

    let Some(hook_arg) = std::env::args().nth(1) else {
        return report(HookError::Usage);
    };

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let context = input::read_context(stdin.lock(), interactive);

    match dispatch(&hook_arg, &context, &config, &notifier) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(e),
    }
}

/// Format, notify, then log. Stops at the first failure.
fn dispatch<N: Notifier>(
    hook_arg: &str,
    context: &HookContext,
    config: &Config,
    notifier: &N,
) -> Result<(), HookError> {
    let hook_type = HookType::parse(hook_arg)?;
    let event_message = message::event_message(hook_type, context);
    debug!(
        hook = hook_type.as_str(),
        session = context.session_id.as_deref().unwrap_or("none"),
        "dispatching: {}",
        event_message
    );

    let icon = Icon::resolve(&config.icon);
    debug!(?icon, "resolved icon");
    notifier.send(&Notification {
        title: NOTIFICATION_TITLE,
        message: &event_message,
        sound: NOTIFICATION_SOUND,
        icon: &icon,
    })?;

    let log_path = config
        .log_path
        .as_deref()
        .ok_or_else(|| HookError::Log(anyhow::anyhow!("failed to get home directory")))?;
    debug!(path = %log_path.display(), "logging event");
    event_log::append(log_path, &LogEntry::now(hook_type.as_str(), &event_message))
        .map_err(HookError::Log)?;

    Ok(())
}

fn report(err: HookError) -> ExitCode {
    #[allow(clippy::print_stderr)]
    {
        eprintln!("{}", err);
    }
    ExitCode::FAILURE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifier::NotifyError;
    use std::cell::RefCell;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// Records every notification instead of spawning a process
    #[derive(Default)]
    struct RecordingNotifier {
        sent: RefCell<Vec<(String, String, Icon)>>,
    }

    impl Notifier for RecordingNotifier {
        fn send(&self, notification: &Notification<'_>) -> Result<(), NotifyError> {
            self.sent.borrow_mut().push((
                notification.title.to_string(),
                notification.message.to_string(),
                notification.icon.clone(),
            ));
            Ok(())
        }
    }

    struct FailingNotifier;

    impl Notifier for FailingNotifier {
        fn send(&self, _notification: &Notification<'_>) -> Result<(), NotifyError> {
            Err(NotifyError::Spawn {
                program: "terminal-notifier".to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
            })
        }
    }

    fn config_in(home: &Path) -> Config {
        Config::resolve(None, Some(home.to_path_buf()))
    }

    fn log_path(home: &Path) -> PathBuf {
        home.join(".claude/hook-notifications.log")
    }

    fn context_with_cwd(cwd: &str) -> HookContext {
        HookContext {
            cwd: Some(cwd.to_string()),
            ..HookContext::default()
        }
    }

    #[test]
    fn test_stop_notifies_then_logs() {
        let temp = TempDir::new().unwrap();
        let notifier = RecordingNotifier::default();

        dispatch(
            "stop",
            &context_with_cwd("/a/b/myproj"),
            &config_in(temp.path()),
            &notifier,
        )
        .unwrap();

        let sent = notifier.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "Claude Code");
        assert_eq!(sent[0].1, "Completion received - myproj");
        assert_eq!(sent[0].2, Icon::Sender("com.apple.Terminal".to_string()));

        let content = fs::read_to_string(log_path(temp.path())).unwrap();
        assert!(content.ends_with("] Hook: stop Event: Completion received - myproj\n"));
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn test_empty_context_uses_unknown_project() {
        let temp = TempDir::new().unwrap();
        let notifier = RecordingNotifier::default();

        dispatch(
            "permission-request",
            &HookContext::default(),
            &config_in(temp.path()),
            &notifier,
        )
        .unwrap();

        assert_eq!(
            notifier.sent.borrow()[0].1,
            "Permission requested - unknown"
        );
    }

    #[test]
    fn test_unknown_hook_type_has_no_side_effects() {
        let temp = TempDir::new().unwrap();
        let notifier = RecordingNotifier::default();

        let err = dispatch(
            "bogus",
            &HookContext::default(),
            &config_in(temp.path()),
            &notifier,
        )
        .unwrap_err();

        assert_eq!(err.to_string(), "Unknown hook type: bogus");
        assert!(notifier.sent.borrow().is_empty());
        assert!(!log_path(temp.path()).exists());
    }

    #[test]
    fn test_notify_failure_skips_log() {
        let temp = TempDir::new().unwrap();

        let err = dispatch(
            "stop",
            &HookContext::default(),
            &config_in(temp.path()),
            &FailingNotifier,
        )
        .unwrap_err();

        assert!(matches!(err, HookError::Notify(_)));
        assert!(err
            .to_string()
            .starts_with("Error sending notification: failed to spawn terminal-notifier"));
        assert!(!log_path(temp.path()).exists());
    }

    #[test]
    fn test_log_failure_after_notification() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".claude"), "blocks the log directory").unwrap();
        let notifier = RecordingNotifier::default();

        let err = dispatch(
            "stop",
            &HookContext::default(),
            &config_in(temp.path()),
            &notifier,
        )
        .unwrap_err();

        assert!(matches!(err, HookError::Log(_)));
        assert!(err
            .to_string()
            .starts_with("Error logging event: failed to create log directory"));
        // The notification was already delivered
        assert_eq!(notifier.sent.borrow().len(), 1);
    }

    #[test]
    fn test_missing_home_is_log_error() {
        let config = Config::resolve(None, None);
        let notifier = RecordingNotifier::default();

        let err = dispatch("stop", &HookContext::default(), &config, &notifier).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error logging event: failed to get home directory"
        );
    }

    #[test]
    fn test_icon_file_becomes_content_image() {
        let temp = TempDir::new().unwrap();
        let image = temp.path().join("icon.png");
        fs::write(&image, b"png").unwrap();
        let config = Config::resolve(
            Some(image.to_string_lossy().into_owned()),
            Some(temp.path().to_path_buf()),
        );
        let notifier = RecordingNotifier::default();

        dispatch("stop", &HookContext::default(), &config, &notifier).unwrap();

        assert_eq!(notifier.sent.borrow()[0].2, Icon::ContentImage(image));
    }
}
