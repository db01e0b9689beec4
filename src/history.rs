// history.rs

use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::config::HISTORY_CAPACITY;
use crate::error::ShellError;

/// Bounded log of recently launched program names, oldest first.
///
/// Once `capacity` entries are stored, each append evicts the oldest one.
#[derive(Clone, Debug)]
pub struct History {
    entries: VecDeque<String>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { entries: VecDeque::with_capacity(capacity), capacity }
    }

    pub fn append<S: Into<String>>(&mut self, entry: S) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    /// Restores history from `path`. A missing or unreadable file gives an
    /// empty store. Lines are taken as-is: bytes that are not UTF-8 are
    /// replaced rather than rejected, blank lines are skipped, and only the
    /// newest entries that fit are kept.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let mut history = Self::new();
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("no history file at {}", path.display());
                return history;
            }
            Err(e) => {
                log::warn!("cannot open history file {}: {}", path.display(), e);
                return history;
            }
        };
        let mut reader = BufReader::new(file);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buf);
                    let entry = line.trim_end_matches(['\r', '\n']);
                    if !entry.trim().is_empty() {
                        history.append(entry);
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    log::warn!("stopped reading history file {}: {}", path.display(), e);
                    break;
                }
            }
        }
        log::debug!("loaded {} history entries from {}", history.len(), path.display());
        history
    }

    /// Truncates `path` and writes every entry on its own line.
    pub fn persist<P: AsRef<Path>>(&self, path: P) -> Result<(), ShellError> {
        let path = path.as_ref();
        let to_err = |source: io::Error| ShellError::History { path: path.to_path_buf(), source };
        let mut file = BufWriter::new(File::create(path).map_err(to_err)?);
        for entry in &self.entries {
            writeln!(file, "{}", entry).map_err(to_err)?;
        }
        file.flush().map_err(to_err)?;
        log::debug!("wrote {} history entries to {}", self.entries.len(), path.display());
        Ok(())
    }
}
