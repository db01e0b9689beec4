// interrupt.rs

use std::io::Write;

use crate::config::{HISTORY_CAPACITY, PROMPT, REPEAT_PROMPT};
use crate::history::History;
use crate::launcher::{Launched, Launcher};
use crate::parser::{split_entry, ParsedCommand};
use crate::reader::{LineSource, ReadOutcome};
use crate::util::emit_line;

#[derive(Debug, PartialEq, Eq)]
pub enum InterruptAction {
    /// The follow-up was not `r`.
    Ignored,
    EmptyHistory,
    Repeated(Launched),
    RepeatFailed,
}

/// Shows the history and offers to re-run the newest entry. Runs from the
/// main loop, never from signal context, and leaves `history` untouched.
pub fn handle_interrupt<S, L, W>(history: &History, source: &mut S, launcher: &mut L, out: &mut W) -> InterruptAction
where
    S: LineSource,
    L: Launcher,
    W: Write,
{
    let _ = emit_line(&mut *out, "");
    let _ = emit_line(&mut *out, PROMPT);
    let _ = emit_line(
        &mut *out,
        format!("List of the most recent {} commands:", HISTORY_CAPACITY),
    );
    // Listing and repeat read the same copy.
    let entries = history.snapshot();
    for (i, cmd) in entries.iter().enumerate() {
        let _ = emit_line(&mut *out, format!("{}: {}", i + 1, cmd));
    }

    let reply = match source.read_line(REPEAT_PROMPT) {
        ReadOutcome::Line(line) => line,
        other => {
            log::debug!("repeat prompt abandoned: {:?}", other);
            return InterruptAction::Ignored;
        }
    };
    if reply.trim_end_matches(['\r', '\n']) != "r" {
        return InterruptAction::Ignored;
    }

    let Some(entry) = entries.last() else {
        let _ = emit_line(&mut *out, "No commands in history.");
        return InterruptAction::EmptyHistory;
    };
    let command = ParsedCommand::foreground(split_entry(entry));
    if command.is_empty() {
        let _ = emit_line(&mut *out, "No commands in history.");
        return InterruptAction::EmptyHistory;
    }
    let _ = emit_line(&mut *out, format!("Executing command: {}", entry));

    match launcher.launch(&command) {
        Ok(launched) => InterruptAction::Repeated(launched),
        Err(e) => {
            log::warn!("repeat of {} failed: {}", entry, e);
            let _ = emit_line(&mut *out, format!("Exec failed: {}", e));
            InterruptAction::RepeatFailed
        }
    }
}
