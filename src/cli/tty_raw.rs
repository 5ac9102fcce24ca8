//! Raw mode makes a running animation stop on `q`, `Esc` or `Ctrl-C`
//! without waiting for Enter.
//!
//! Signals are switched off (ISIG) so Ctrl-C arrives as byte 0x03 and the
//! run can end through the cancel token instead of killing the process.

use std::io::{self, IsTerminal, Read};

use crate::render::CancelToken;

const CTRL_C: u8 = 0x03;
const ESC: u8 = 0x1b;

/// Bytes that stop the animation.
#[inline]
#[must_use]
pub fn is_stop_key(b: u8) -> bool {
    matches!(b, b'q' | b'Q' | CTRL_C | ESC)
}

#[cfg(target_os = "linux")]
mod sys {
    use std::{
        io,
        mem::zeroed,
        os::raw::{c_int, c_uint},
        os::unix::io::AsRawFd,
    };

    // mini-termios – only bits we need (glibc layout)
    #[repr(C)]
    #[derive(Clone, Copy)]
    #[allow(non_camel_case_types, dead_code)]
    pub struct termios {
        c_iflag: c_uint,
        c_oflag: c_uint,
        c_cflag: c_uint,
        c_lflag: c_uint,
        c_line: u8,
        c_cc: [u8; 32],
        c_ispeed: c_uint,
        c_ospeed: c_uint,
    }

    unsafe extern "C" {
        fn tcgetattr(fd: c_int, termios_p: *mut termios) -> c_int;
        fn tcsetattr(fd: c_int, actions: c_int, termios_p: *const termios) -> c_int;
    }

    const TCSANOW: c_int = 0;
    const ISIG: c_uint = 0o0000001;
    const ICANON: c_uint = 0o0000002;
    const ECHO: c_uint = 0o0000010;

    /// Switch stdin to raw-ish mode, returning the attributes to restore.
    pub fn enter() -> io::Result<termios> {
        let fd = io::stdin().as_raw_fd();
        // SAFETY: `termios` is plain old data and tcgetattr fully
        // initialises it on success.
        unsafe {
            let mut saved: termios = zeroed();
            if tcgetattr(fd, &mut saved) != 0 {
                return Err(io::Error::last_os_error());
            }
            let mut raw = saved;
            raw.c_lflag &= !(ICANON | ECHO | ISIG);
            if tcsetattr(fd, TCSANOW, &raw) != 0 {
                return Err(io::Error::last_os_error());
            }
            Ok(saved)
        }
    }

    pub fn restore(saved: &termios) {
        let fd = io::stdin().as_raw_fd();
        // SAFETY: `saved` came from a successful tcgetattr on the same fd.
        unsafe {
            let _ = tcsetattr(fd, TCSANOW, saved);
        }
    }
}

#[cfg(not(target_os = "linux"))]
mod sys {
    use std::io;

    #[derive(Clone, Copy)]
    #[allow(non_camel_case_types)]
    pub struct termios;

    pub fn enter() -> io::Result<termios> {
        Ok(termios)
    }

    pub fn restore(_saved: &termios) {}
}

/// Restores the original terminal attributes on Drop.
pub struct RawMode {
    saved: sys::termios,
}

impl RawMode {
    pub fn enter() -> io::Result<Self> {
        sys::enter().map(|saved| Self { saved })
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        sys::restore(&self.saved);
    }
}

/// Enter raw mode and trip `cancel` when a stop key is read.
///
/// Returns `None` when stdin is not a terminal; then nothing is watched
/// and Ctrl-C keeps its default meaning. The watcher thread is detached
/// and ends with the process.
#[must_use]
pub fn watch_keys(cancel: CancelToken) -> Option<RawMode> {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        return None;
    }
    let guard = RawMode::enter().ok()?;
    std::thread::spawn(move || {
        let mut byte = [0u8; 1];
        let mut input = io::stdin();
        while let Ok(1) = input.read(&mut byte) {
            if is_stop_key(byte[0]) {
                cancel.cancel();
                break;
            }
        }
    });
    Some(guard)
}
