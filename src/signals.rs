// signals.rs

use std::sync::atomic::{AtomicBool, Ordering};

use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};

static INTERRUPT_PENDING: AtomicBool = AtomicBool::new(false);

extern "C" fn on_sigint(_signum: libc::c_int) {
    INTERRUPT_PENDING.store(true, Ordering::SeqCst);
}

/// Route SIGINT to a handler that only records the interrupt. The main loop
/// picks it up through [`take_pending`] at its next safe point.
pub fn install() -> nix::Result<()> {
    let action = SigAction::new(SigHandler::Handler(on_sigint), SaFlags::SA_RESTART, SigSet::empty());
    // SAFETY: the handler touches nothing but an atomic flag.
    unsafe { sigaction(Signal::SIGINT, &action) }?;
    log::debug!("SIGINT handler installed");
    Ok(())
}

/// Put SIGINT back to its default disposition. Called in a child between
/// fork and exec.
pub fn restore_default() {
    let default = SigAction::new(SigHandler::SigDfl, SaFlags::empty(), SigSet::empty());
    unsafe {
        let _ = sigaction(Signal::SIGINT, &default);
    }
}

/// Returns whether an interrupt arrived since the last call, clearing it.
pub fn take_pending() -> bool {
    INTERRUPT_PENDING.swap(false, Ordering::SeqCst)
}
