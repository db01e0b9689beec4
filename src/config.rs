// config.rs

use std::env;
use std::path::{Path, PathBuf};

/// Maximum number of commands kept in history.
pub const HISTORY_CAPACITY: usize = 10;
/// Input lines longer than this many characters are cut short.
pub const MAX_LINE: usize = 80;
pub const PROMPT: &str = "COMMAND->";
pub const REPEAT_PROMPT: &str = "Command->";
pub const DEFAULT_HISTORY_FILE: &str = "shell.history";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub history_path: PathBuf,
}

impl Config {
    /// Reads `HISTFILE`, falling back to `shell.history` in the working directory.
    pub fn from_env() -> Self {
        Self::from_histfile(env::var_os("HISTFILE").map(PathBuf::from))
    }

    pub fn with_history_path<P: AsRef<Path>>(path: P) -> Self {
        Self { history_path: path.as_ref().to_path_buf() }
    }

    fn from_histfile(histfile: Option<PathBuf>) -> Self {
        match histfile.filter(|p| !p.as_os_str().is_empty()) {
            Some(path) => Self::with_history_path(path),
            None => Self::with_history_path(DEFAULT_HISTORY_FILE),
        }
    }
}
