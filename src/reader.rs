// reader.rs

#[cfg(test)]
use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal, StdinLock, Write};

use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor};

use crate::error::ShellError;
use crate::util::emit_prompt;

/// Result of one blocking read from the terminal.
#[derive(Debug)]
pub enum ReadOutcome {
    Line(String),
    EndOfStream,
    /// The read was cut short by Ctrl-C or a signal; retry after handling it.
    Interrupted,
    Error(io::Error),
}

pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> ReadOutcome;
}

/// Standard input as a line source. A terminal gets the rustyline editor
/// (the shell keeps its own history, so the editor's stays empty); piped
/// input is read line by line with the prompt written to stdout, since the
/// editor prints no prompt when stdin is not a terminal.
pub enum EditorSource {
    Editor(DefaultEditor),
    Piped(StdinLock<'static>),
}

impl EditorSource {
    pub fn new() -> Result<Self, ShellError> {
        if !io::stdin().is_terminal() {
            log::debug!("stdin is not a terminal, reading plain lines");
            return Ok(EditorSource::Piped(io::stdin().lock()));
        }
        let config = Config::builder().auto_add_history(false).build();
        let editor = DefaultEditor::with_config(config).map_err(|e| ShellError::Editor(e.to_string()))?;
        Ok(EditorSource::Editor(editor))
    }
}

impl LineSource for EditorSource {
    fn read_line(&mut self, prompt: &str) -> ReadOutcome {
        match self {
            EditorSource::Editor(editor) => classify(editor.readline(prompt)),
            EditorSource::Piped(input) => read_prompted(input, &mut io::stdout(), prompt),
        }
    }
}

/// Writes `prompt` to `out`, then reads one line from `input` with its
/// terminator removed. Bytes that are not UTF-8 are replaced.
fn read_prompted<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> ReadOutcome {
    if let Err(e) = emit_prompt(out, prompt) {
        log::warn!("cannot write prompt: {}", e);
    }
    let mut buf = Vec::new();
    match input.read_until(b'\n', &mut buf) {
        Ok(0) => ReadOutcome::EndOfStream,
        Ok(_) => {
            let text = String::from_utf8_lossy(&buf);
            let line = text.strip_suffix('\n').unwrap_or(&*text);
            let line = line.strip_suffix('\r').unwrap_or(line);
            ReadOutcome::Line(line.to_string())
        }
        Err(e) if e.kind() == io::ErrorKind::Interrupted => ReadOutcome::Interrupted,
        Err(e) => ReadOutcome::Error(e),
    }
}

fn classify(result: Result<String, ReadlineError>) -> ReadOutcome {
    match result {
        Ok(line) => ReadOutcome::Line(line),
        Err(ReadlineError::Eof) => ReadOutcome::EndOfStream,
        Err(ReadlineError::Interrupted) => ReadOutcome::Interrupted,
        Err(ReadlineError::Io(e)) if e.kind() == io::ErrorKind::Interrupted => ReadOutcome::Interrupted,
        Err(ReadlineError::Io(e)) => ReadOutcome::Error(e),
        #[cfg(unix)]
        Err(ReadlineError::Errno(errno)) if errno as i32 == libc::EINTR => ReadOutcome::Interrupted,
        Err(other) => ReadOutcome::Error(io::Error::new(io::ErrorKind::Other, other.to_string())),
    }
}

/// Replays a fixed list of outcomes, then reports end of stream. Used to
/// drive the shell without a terminal.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedSource {
    script: VecDeque<ReadOutcome>,
    pub prompts: Vec<String>,
}

#[cfg(test)]
impl ScriptedSource {
    pub fn new<I: IntoIterator<Item = ReadOutcome>>(script: I) -> Self {
        Self { script: script.into_iter().collect(), prompts: Vec::new() }
    }

    pub fn lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(lines.into_iter().map(|l| ReadOutcome::Line(l.into())))
    }
}

#[cfg(test)]
impl LineSource for ScriptedSource {
    fn read_line(&mut self, prompt: &str) -> ReadOutcome {
        self.prompts.push(prompt.to_string());
        self.script.pop_front().unwrap_or(ReadOutcome::EndOfStream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_editor_results() {
        assert!(matches!(classify(Ok("ls".into())), ReadOutcome::Line(l) if l == "ls"));
        assert!(matches!(classify(Err(ReadlineError::Eof)), ReadOutcome::EndOfStream));
        assert!(matches!(classify(Err(ReadlineError::Interrupted)), ReadOutcome::Interrupted));
    }

    #[test]
    fn eintr_is_an_interruption_not_an_error() {
        let eintr = io::Error::from(io::ErrorKind::Interrupted);
        assert!(matches!(classify(Err(ReadlineError::Io(eintr))), ReadOutcome::Interrupted));
        let broken = io::Error::new(io::ErrorKind::BrokenPipe, "closed");
        assert!(matches!(classify(Err(ReadlineError::Io(broken))), ReadOutcome::Error(_)));
    }

    #[test]
    fn piped_reads_print_the_prompt_first() {
        let mut input = io::Cursor::new(b"ls -la &\r\npwd".to_vec());
        let mut out = Vec::new();
        assert!(matches!(read_prompted(&mut input, &mut out, "COMMAND->"), ReadOutcome::Line(l) if l == "ls -la &"));
        assert!(matches!(read_prompted(&mut input, &mut out, "COMMAND->"), ReadOutcome::Line(l) if l == "pwd"));
        assert!(matches!(read_prompted(&mut input, &mut out, "COMMAND->"), ReadOutcome::EndOfStream));
        assert_eq!(out, b"COMMAND->COMMAND->COMMAND->");
    }

    #[test]
    fn piped_read_error_is_reported() {
        struct Failing;
        impl io::Read for Failing {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "tty gone"))
            }
        }
        let mut input = io::BufReader::new(Failing);
        let mut out = Vec::new();
        assert!(matches!(read_prompted(&mut input, &mut out, "COMMAND->"), ReadOutcome::Error(_)));
    }

    #[test]
    fn scripted_source_records_prompts_and_ends() {
        let mut src = ScriptedSource::lines(["pwd"]);
        assert!(matches!(src.read_line("A->"), ReadOutcome::Line(l) if l == "pwd"));
        assert!(matches!(src.read_line("B->"), ReadOutcome::EndOfStream));
        assert_eq!(src.prompts, vec!["A->", "B->"]);
    }
}
