//! Clipboard integrations.

use std::io::ErrorKind;
use std::process::{ExitStatus, Stdio};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// Result alias for clipboard operations.
pub type ClipboardResult<T> = Result<T, ClipboardError>;

/// Errors raised while placing text on the clipboard.
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// No clipboard is reachable.
    #[error("clipboard unavailable: {reason}")]
    Unavailable {
        /// Human-readable reason.
        reason: String,
    },
    /// The clipboard command could not be started.
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Source [`std::io::Error`].
        source: std::io::Error,
    },
    /// Writing the text to the clipboard command failed.
    #[error("failed to send text to `{program}`: {source}")]
    Write {
        /// Program receiving the text.
        program: String,
        /// Source [`std::io::Error`].
        source: std::io::Error,
    },
    /// The clipboard command exited unsuccessfully.
    #[error("`{program}` exited with {status}")]
    CommandFailed {
        /// Program that failed.
        program: String,
        /// Exit status reported by the process.
        status: ExitStatus,
    },
}

impl ClipboardError {
    /// Helper to construct [`ClipboardError::Unavailable`].
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }
}

/// Destination for copied prompt text.
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Replaces the clipboard contents with `text`.
    async fn write_text(&self, text: &str) -> ClipboardResult<()>;
}

/// Clipboard backed by an external command that reads the text from stdin,
/// such as `pbcopy`, `wl-copy`, or `xclip -selection clipboard`.
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    /// Creates a clipboard running `program` with `args`.
    #[must_use]
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Builds a clipboard from a full command line (program first).
    ///
    /// # Errors
    ///
    /// Returns [`ClipboardError::Unavailable`] when `command` is empty.
    pub fn from_command(command: &[String]) -> ClipboardResult<Self> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| ClipboardError::unavailable("no clipboard command configured"))?;
        Ok(Self::new(program.clone(), args.to_vec()))
    }

    /// Returns the program name.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait]
impl Clipboard for CommandClipboard {
    async fn write_text(&self, text: &str) -> ClipboardResult<()> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| {
                if source.kind() == ErrorKind::NotFound {
                    ClipboardError::unavailable(format!("`{}` is not installed", self.program))
                } else {
                    ClipboardError::Spawn {
                        program: self.program.clone(),
                        source,
                    }
                }
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            let write = async {
                stdin.write_all(text.as_bytes()).await?;
                stdin.shutdown().await
            };
            write.await.map_err(|source| ClipboardError::Write {
                program: self.program.clone(),
                source,
            })?;
        }

        let status = child.wait().await.map_err(|source| ClipboardError::Write {
            program: self.program.clone(),
            source,
        })?;
        if !status.success() {
            return Err(ClipboardError::CommandFailed {
                program: self.program.clone(),
                status,
            });
        }

        debug!(program = %self.program, bytes = text.len(), "copied text to clipboard");
        Ok(())
    }
}

/// In-process clipboard holding the last copied text.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
    unavailable: bool,
}

impl MemoryClipboard {
    /// Creates an empty clipboard.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Creates a clipboard that rejects every write.
    #[must_use]
    pub fn unavailable() -> Arc<Self> {
        Arc::new(Self {
            contents: Mutex::new(None),
            unavailable: true,
        })
    }

    /// Returns the last copied text.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex has been poisoned by a previous panic.
    #[must_use]
    pub fn contents(&self) -> Option<String> {
        self.contents
            .lock()
            .expect("memory clipboard poisoned")
            .clone()
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> ClipboardResult<()> {
        if self.unavailable {
            return Err(ClipboardError::unavailable("clipboard disabled"));
        }
        *self.contents.lock().expect("memory clipboard poisoned") = Some(text.to_owned());
        Ok(())
    }
}
