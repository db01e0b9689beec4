// repl.rs

use std::io::Write;

use crate::config::{Config, PROMPT};
use crate::error::ShellError;
use crate::history::History;
use crate::interrupt::handle_interrupt;
use crate::launcher::{Launched, Launcher};
use crate::parser::parse_line;
use crate::reader::{LineSource, ReadOutcome};
use crate::signals;

/// One interactive session: prompt, parse, record, launch, repeat.
pub struct Shell<S, L, W> {
    config: Config,
    history: History,
    source: S,
    launcher: L,
    out: W,
    interrupt_pending: fn() -> bool,
}

impl<S: LineSource, L: Launcher, W: Write> Shell<S, L, W> {
    /// Creates a shell with history restored from `config.history_path`.
    pub fn new(config: Config, source: S, launcher: L, out: W) -> Self {
        let history = History::load(&config.history_path);
        Self { config, history, source, launcher, out, interrupt_pending: signals::take_pending }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Runs until end of input (`Ok(0)`) or a fatal error.
    pub fn run(&mut self) -> Result<i32, ShellError> {
        loop {
            if (self.interrupt_pending)() {
                self.interrupt();
            }
            match self.source.read_line(PROMPT) {
                ReadOutcome::Line(line) => self.execute(&line)?,
                ReadOutcome::Interrupted => {
                    // Ctrl-C and a caught SIGINT are the same gesture.
                    let _ = (self.interrupt_pending)();
                    self.interrupt();
                }
                ReadOutcome::EndOfStream => {
                    log::debug!("end of input");
                    let _ = self.out.flush();
                    return Ok(0);
                }
                ReadOutcome::Error(e) => return Err(ShellError::Read(e)),
            }
        }
    }

    fn execute(&mut self, line: &str) -> Result<(), ShellError> {
        let command = parse_line(line);
        log::debug!("parsed {:?}", command);
        let Some(program) = command.program() else {
            return Ok(());
        };
        self.history.append(program);
        if let Err(e) = self.history.persist(&self.config.history_path) {
            log::warn!("{}", e);
            eprintln!("Error opening file: {}", e);
        }

        match self.launcher.launch(&command) {
            Ok(Launched::Foreground(status)) => {
                log::debug!("{} done waiting: {:?}", program, status);
                Ok(())
            }
            Ok(Launched::Background(pid)) => {
                log::debug!("{} left running as pid {}", program, pid);
                Ok(())
            }
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                eprintln!("{}: {}", program, e);
                Ok(())
            }
        }
    }

    fn interrupt(&mut self) {
        let action = handle_interrupt(&self.history, &mut self.source, &mut self.launcher, &mut self.out);
        log::debug!("interrupt handled: {:?}", action);
    }
}
