//! SIGINT → cancel token, for every output mode.
//!
//! Raw mode already turns Ctrl-C into a key press, but `--plain` runs, piped
//! stdin and non-Linux builds still receive the signal itself.

use crate::{core::error::FieldError, render::CancelToken};

/// Route SIGINT to `cancel`. Only the first call in a process succeeds.
pub fn cancel_on_interrupt(cancel: CancelToken) -> Result<(), FieldError> {
    ctrlc::set_handler(move || cancel.cancel())?;
    Ok(())
}
