// error.rs

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("error reading the command: {0}")]
    Read(#[source] io::Error),

    #[error("cannot start line editor: {0}")]
    Editor(String),

    #[error("failed to fork: {0}")]
    Fork(#[source] nix::Error),

    #[error("failed to wait for child: {0}")]
    Wait(#[source] nix::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("history file {}: {source}", .path.display())]
    History {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ShellError {
    /// Errors after which the interactive loop cannot continue.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ShellError::Read(_) | ShellError::Editor(_) | ShellError::Fork(_) | ShellError::Wait(_)
        )
    }
}
