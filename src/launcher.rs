// launcher.rs

use std::ffi::CString;

use nix::errno::Errno;
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::{fork, write, ForkResult, Pid};

use crate::error::ShellError;
use crate::parser::ParsedCommand;
use crate::signals;

/// Status reported by `exec` failure in a child, -1 as an 8-bit status.
pub const EXEC_FAILED_STATUS: i32 = -1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Code(i32),
    Signal(i32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Launched {
    /// The child ran to completion before `launch` returned.
    Foreground(ExitStatus),
    /// The child was left running.
    Background(Pid),
}

pub trait Launcher {
    fn launch(&mut self, command: &ParsedCommand) -> Result<Launched, ShellError>;
}

/// Starts each command in a forked child via `execvp`.
#[derive(Debug, Default)]
pub struct ForkLauncher;

impl Launcher for ForkLauncher {
    fn launch(&mut self, command: &ParsedCommand) -> Result<Launched, ShellError> {
        let argv = to_argv(&command.args)?;
        if argv.is_empty() {
            return Err(ShellError::InvalidArgument("empty command".into()));
        }
        // Everything the child touches is built here, before fork: the
        // NULL-terminated pointer array and the failure message.
        let argv_ptrs = exec_pointers(&argv);
        let failure = format!("{}: exec failed\n", command.args[0]).into_bytes();

        // SAFETY: between fork and exec/_exit the child only calls sigaction,
        // execvp, write and _exit, all async-signal-safe, and allocates nothing.
        match unsafe { fork() } {
            Ok(ForkResult::Child) => {
                signals::restore_default();
                unsafe { libc::execvp(argv_ptrs[0], argv_ptrs.as_ptr()) };
                let _ = write(libc::STDERR_FILENO, &failure);
                unsafe { libc::_exit(EXEC_FAILED_STATUS) };
            }
            Ok(ForkResult::Parent { child }) => {
                log::debug!("started {} as pid {} (background: {})", command.args[0], child, command.background);
                if command.background {
                    return Ok(Launched::Background(child));
                }
                let status = wait_for(child)?;
                log::debug!("pid {} finished: {:?}", child, status);
                Ok(Launched::Foreground(status))
            }
            Err(e) => Err(ShellError::Fork(e)),
        }
    }
}

fn to_argv(args: &[String]) -> Result<Vec<CString>, ShellError> {
    args.iter()
        .map(|a| CString::new(a.as_str()).map_err(|_| ShellError::InvalidArgument(a.escape_debug().to_string())))
        .collect()
}

/// `argv` as the NULL-terminated pointer array `execvp` expects. The
/// pointers borrow from `argv`, which must outlive the returned vector.
fn exec_pointers(argv: &[CString]) -> Vec<*const libc::c_char> {
    argv.iter().map(|a| a.as_ptr()).chain(std::iter::once(std::ptr::null())).collect()
}

/// Reaps children until `child` itself has terminated. Other children that
/// exit in the meantime (earlier background launches) are reaped and
/// dropped.
fn wait_for(child: Pid) -> Result<ExitStatus, ShellError> {
    loop {
        match waitpid(None, None) {
            Ok(WaitStatus::Exited(pid, code)) if pid == child => return Ok(ExitStatus::Code(code)),
            Ok(WaitStatus::Signaled(pid, sig, _)) if pid == child => return Ok(ExitStatus::Signal(sig as i32)),
            Ok(other) => log::debug!("Waiting... (reaped {:?})", other),
            Err(Errno::EINTR) => continue,
            Err(e) => return Err(ShellError::Wait(e)),
        }
    }
}
