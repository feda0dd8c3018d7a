//! Opening the written report in an editor.
//!
//! With no explicit editor, the platform opener is used. It hands the file to
//! the desktop and returns at once, so it is spawned and never awaited. An
//! editor named explicitly, or taken from `VISUAL` / `EDITOR`, may be a
//! terminal editor that needs the TTY, so the run waits for it to exit.
//!
//! A failed launch is logged and otherwise ignored, so it can never turn a
//! successful dump into a failed run.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{info, warn};

use crate::error::LauncherError;

/// Something that can show a report file to the user.
pub trait Launcher {
    /// Show `path` to the user.
    fn launch(&self, path: &Path) -> Result<(), LauncherError>;
}

/// A resolved editor command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorCommand {
    /// Program plus optional arguments, split on whitespace
    pub command: String,

    /// Wait for the process to exit before returning
    pub wait: bool,
}

impl EditorCommand {
    /// A user-chosen editor, waited on.
    pub fn editor(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            wait: true,
        }
    }

    /// A desktop opener, spawned and left running.
    pub fn opener(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            wait: false,
        }
    }
}

/// Spawns an editor command with the report path as its last argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorLauncher {
    command: Option<EditorCommand>,
}

impl EditorLauncher {
    /// Use exactly `command` (program plus optional arguments), waited on.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: Some(EditorCommand::editor(command)),
        }
    }

    /// Resolve the editor from an explicit choice, then the platform's
    /// opener, then `VISUAL`, then `EDITOR`.
    pub fn from_env(explicit: Option<String>) -> Self {
        let command = resolve_editor(
            explicit,
            platform_opener(),
            std::env::var("VISUAL").ok(),
            std::env::var("EDITOR").ok(),
        );
        Self { command }
    }

    /// The resolved command, if any.
    pub fn command(&self) -> Option<&EditorCommand> {
        self.command.as_ref()
    }
}

impl Launcher for EditorLauncher {
    fn launch(&self, path: &Path) -> Result<(), LauncherError> {
        let resolved = self.command.as_ref().ok_or(LauncherError::NoEditor)?;
        let mut parts = resolved.command.split_whitespace();
        let program = parts.next().ok_or(LauncherError::NoEditor)?;

        let mut command = Command::new(program);
        command.args(parts).arg(path);

        if resolved.wait {
            let status = command.status().map_err(|e| LauncherError::Spawn {
                program: program.to_string(),
                message: e.to_string(),
            })?;
            if !status.success() {
                return Err(LauncherError::Exited {
                    program: program.to_string(),
                    status: status.to_string(),
                });
            }
        } else {
            command
                .stdin(Stdio::null())
                .spawn()
                .map_err(|e| LauncherError::Spawn {
                    program: program.to_string(),
                    message: e.to_string(),
                })?;
        }

        info!(editor = program, path = %path.display(), "opened report");
        Ok(())
    }
}

/// Pick the editor: a non-blank explicit choice, then the opener, then the
/// first non-blank of `visual` and `editor`.
pub fn resolve_editor(
    explicit: Option<String>,
    opener: Option<&str>,
    visual: Option<String>,
    editor: Option<String>,
) -> Option<EditorCommand> {
    let non_blank = |candidate: Option<String>| {
        candidate
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
    };

    if let Some(explicit) = non_blank(explicit) {
        return Some(EditorCommand::editor(explicit));
    }
    if let Some(opener) = opener {
        return Some(EditorCommand::opener(opener));
    }
    non_blank(visual)
        .or_else(|| non_blank(editor))
        .map(EditorCommand::editor)
}

/// The default program for opening a text file on this platform.
pub fn platform_opener() -> Option<&'static str> {
    if cfg!(target_os = "macos") {
        Some("open")
    } else if cfg!(windows) {
        Some("notepad")
    } else if cfg!(unix) {
        Some("xdg-open")
    } else {
        None
    }
}

/// Launch `path` and log, rather than return, any failure.
pub fn open_report(launcher: &dyn Launcher, path: &Path) {
    if let Err(e) = launcher.launch(path) {
        warn!(path = %path.display(), error = %e, "could not open report in editor");
    }
}
