// util.rs

use std::io::{self, Write};

/// Writes one line of shell output and flushes it so it reaches the terminal
/// before the next blocking read. A closed reader is not an error.
pub fn emit_line<W: Write + ?Sized, S: AsRef<str>>(out: &mut W, line: S) -> io::Result<()> {
    let written = writeln!(out, "{}", line.as_ref()).and_then(|()| out.flush());
    match written {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

/// Writes a prompt with no newline and flushes it.
pub fn emit_prompt<W: Write + ?Sized>(out: &mut W, prompt: &str) -> io::Result<()> {
    let written = out.write_all(prompt.as_bytes()).and_then(|()| out.flush());
    match written {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Records how many bytes were pending at each flush.
    #[derive(Default)]
    struct FlushLog {
        pending: Vec<u8>,
        flushed: Vec<String>,
    }

    impl Write for FlushLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.pending.extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            let chunk = std::mem::take(&mut self.pending);
            self.flushed.push(String::from_utf8(chunk).unwrap());
            Ok(())
        }
    }

    #[test]
    fn broken_pipe_is_swallowed() {
        assert!(emit_line(&mut ClosedPipe, "hello").is_ok());
        assert!(emit_prompt(&mut ClosedPipe, "COMMAND->").is_ok());
    }

    #[test]
    fn lines_and_prompts_are_flushed_immediately() {
        let mut out = FlushLog::default();
        emit_line(&mut out, "1: ls").unwrap();
        emit_prompt(&mut out, "Command->").unwrap();
        assert_eq!(out.flushed, vec!["1: ls\n", "Command->"]);
        assert!(out.pending.is_empty());
    }
}
