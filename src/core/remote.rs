//! Capability interfaces for the external collaborators the interaction core
//! talks to. The core depends only on these traits; concrete backends live in
//! the shell and in `core::store`.

use std::time::Duration;

use serde::Serialize;

/// Fire-and-forget persistence of per-folder expansion state. Failures are
/// the implementation's problem, never surfaced to the caller.
pub trait ExpandPersistence {
    /// `was_collapsed` is the value *before* the toggle; the stored state is
    /// its negation.
    fn set_folder_expanded(&mut self, full_name_hash: &str, was_collapsed: bool);
}

/// Fire-and-forget mail commands. Completion and errors are handled by the
/// collaborator, not by the view layer.
pub trait MailActions {
    fn move_messages(&mut self, source: &str, uids: &[String], target: &str, copy: bool);
}

/// The move/copy command as handed to [`MailActions`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveCommand {
    pub source: String,
    pub uids: Vec<String>,
    pub target: String,
    pub copy: bool,
}

/// Shell-side [`MailActions`] backend: the mail engine itself is an external
/// collaborator, so commands are logged and kept for the status line.
#[derive(Debug, Default)]
pub struct MailCommandLog {
    pub last: Option<MoveCommand>,
}

impl MailActions for MailCommandLog {
    fn move_messages(&mut self, source: &str, uids: &[String], target: &str, copy: bool) {
        log::info!(
            "{} {} message(s): {} -> {}",
            if copy { "Copying" } else { "Moving" },
            uids.len(),
            source,
            target
        );
        self.last = Some(MoveCommand {
            source: source.to_string(),
            uids: uids.to_vec(),
            target: target.to_string(),
            copy,
        });
    }
}

/// Uncaught-error report forwarded to the diagnostics sink. Observability
/// only; the error is never retried or corrected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    pub message: String,
    pub location: String,
    pub address: String,
    pub ui_fingerprint: String,
    pub uptime: Duration,
}

/// Remote diagnostics capability. Implemented by whichever backend is wired
/// in; the hook only depends on this interface.
pub trait Diagnostics: Send + Sync {
    fn report(&self, report: &ErrorReport);
}

/// Benign render-surface errors that are noise, not faults.
pub const IGNORED_ERROR_MESSAGES: [&str; 2] = ["Surface(Lost)", "Surface(Outdated)"];

/// Whether an uncaught error message is worth forwarding.
pub fn should_report(message: &str) -> bool {
    !IGNORED_ERROR_MESSAGES
        .iter()
        .any(|ignored| message.contains(ignored))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn benign_surface_errors_are_filtered() {
        assert!(!should_report("render failed: Surface(Lost)"));
        assert!(!should_report("Surface(Outdated)"));
    }

    #[test]
    fn real_errors_are_reported() {
        assert!(should_report("index out of bounds: the len is 3"));
        assert!(should_report(""));
    }

    #[test]
    fn mail_command_log_records_the_last_command() {
        let mut mail = MailCommandLog::default();
        mail.move_messages("INBOX", &["7".into()], "Trash", true);
        assert_eq!(
            mail.last,
            Some(MoveCommand {
                source: "INBOX".into(),
                uids: vec!["7".into()],
                target: "Trash".into(),
                copy: true,
            })
        );
    }
}
