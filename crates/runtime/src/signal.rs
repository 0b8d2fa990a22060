//! SIGINT handling
//!
//! Interrupting a running program uses a flag-based approach:
//! - SIGINT sets the interpreter's abort flag (no code runs in signal context)
//! - The engine polls the flag before every step and fails the running
//!   program with `Aborted`, which returns control to the driver
//!
//! # Platform Support
//!
//! - Unix: handler registered through `signal-hook`
//! - Other platforms: `install` is a no-op; the flag can still be set by
//!   the host through `Interp::abort_handle`

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Route SIGINT to `flag`.
#[cfg(unix)]
pub fn install(flag: &Arc<AtomicBool>) -> io::Result<()> {
    use signal_hook::consts::SIGINT;
    signal_hook::flag::register(SIGINT, Arc::clone(flag))?;
    Ok(())
}

#[cfg(not(unix))]
pub fn install(_flag: &Arc<AtomicBool>) -> io::Result<()> {
    Ok(())
}

/// Consume a pending abort request.
pub(crate) fn take(flag: &AtomicBool) -> bool {
    flag.load(Ordering::Relaxed) && flag.swap(false, Ordering::AcqRel)
}
