//! Data types for clipboard delivery.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Default time budget for every external tool invocation.
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Outcome of a copy attempt. `Ok(())` means the image is on the clipboard.
pub type CopyResult = Result<(), ClipboardError>;

/// Broad failure category, used by callers that only care about the class of problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    ToolFailure,
    Timeout,
    LaunchFailure,
    TranslationFailure,
    Io,
}

/// Errors that can occur while delivering an image to the clipboard.
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("No clipboard provider available for this environment")]
    NoProvider,

    #[error("No clipboard tool found. Install wl-clipboard (Wayland) or xclip/xsel (X11).")]
    NoToolFound,

    /// A located tool ran and exited non-zero.
    #[error("{message}")]
    ToolFailed { command: String, message: String },

    /// Every located tool in a fallback chain failed.
    #[error("Clipboard copy failed. Tried: {}", tried_names(.attempts))]
    AllToolsFailed { attempts: Vec<ToolAttempt> },

    #[error("{command} timed out after {}ms", .timeout.as_millis())]
    Timeout { command: String, timeout: Duration },

    #[error("Failed to launch {command}: {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to convert WSL path to Windows path: {0}")]
    PathTranslation(String),

    #[error("Failed to stage image for clipboard: {0}")]
    Io(#[from] std::io::Error),
}

impl ClipboardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoProvider | Self::NoToolFound => ErrorKind::NotFound,
            Self::ToolFailed { .. } | Self::AllToolsFailed { .. } => ErrorKind::ToolFailure,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Launch { .. } => ErrorKind::LaunchFailure,
            Self::PathTranslation(_) => ErrorKind::TranslationFailure,
            Self::Io(_) => ErrorKind::Io,
        }
    }

    /// Build the failure for a tool that exited non-zero, preferring its stderr.
    pub(crate) fn from_exit(command: &str, display: &str, output: &ProcessOutput) -> Self {
        let message = if output.stderr.is_empty() {
            match output.exit_code {
                Some(code) => format!("{display} exited with code {code}"),
                None => format!("{display} was terminated by a signal"),
            }
        } else {
            output.stderr.clone()
        };
        Self::ToolFailed {
            command: command.to_string(),
            message,
        }
    }
}

/// One tool that was actually run as part of a fallback chain.
#[derive(Debug)]
pub struct ToolAttempt {
    /// Human-readable tool name, e.g. `xclip (X11)`.
    pub tool: &'static str,
    pub error: ClipboardError,
}

impl fmt::Display for ToolAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.tool, self.error)
    }
}

fn tried_names(attempts: &[ToolAttempt]) -> String {
    attempts
        .iter()
        .map(|attempt| attempt.tool)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result of a process that ran to completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
    /// Captured stdout, trimmed. Empty when not captured.
    pub stdout: String,
    /// Captured stderr, trimmed. Empty when not captured.
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_failure_prefers_stderr() {
        let output = ProcessOutput {
            exit_code: Some(1),
            stdout: String::new(),
            stderr: "no selection".to_string(),
        };
        let err = ClipboardError::from_exit("xclip", "xclip", &output);
        assert_eq!(err.to_string(), "no selection");
        assert_eq!(err.kind(), ErrorKind::ToolFailure);
    }

    #[test]
    fn exit_failure_falls_back_to_exit_code() {
        let output = ProcessOutput {
            exit_code: Some(3),
            ..Default::default()
        };
        let err = ClipboardError::from_exit("osascript", "osascript", &output);
        assert_eq!(err.to_string(), "osascript exited with code 3");
    }

    #[test]
    fn aggregate_lists_tried_tools_only() {
        let err = ClipboardError::AllToolsFailed {
            attempts: vec![
                ToolAttempt {
                    tool: "wl-copy (Wayland)",
                    error: ClipboardError::Timeout {
                        command: "wl-copy".into(),
                        timeout: Duration::from_millis(5000),
                    },
                },
                ToolAttempt {
                    tool: "xsel (X11)",
                    error: ClipboardError::ToolFailed {
                        command: "xsel".into(),
                        message: "boom".into(),
                    },
                },
            ],
        };
        assert_eq!(
            err.to_string(),
            "Clipboard copy failed. Tried: wl-copy (Wayland), xsel (X11)"
        );
    }

    #[test]
    fn kinds_cover_taxonomy() {
        assert_eq!(ClipboardError::NoProvider.kind(), ErrorKind::NotFound);
        assert_eq!(ClipboardError::NoToolFound.kind(), ErrorKind::NotFound);
        assert_eq!(
            ClipboardError::PathTranslation("x".into()).kind(),
            ErrorKind::TranslationFailure
        );
        let launch = ClipboardError::Launch {
            command: "xclip".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(launch.kind(), ErrorKind::LaunchFailure);
        assert!(launch.to_string().contains("denied"));
    }
}
