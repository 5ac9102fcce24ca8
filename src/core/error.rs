//! Centralised error types used across the crate.

use std::{error::Error, fmt, io};

use crate::core::color::TintError;

/// Precise configuration faults.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    ZeroDimension { width: usize, height: usize },
    GridTooLarge { width: usize, height: usize },
    ZeroCycles,
    InvalidProbability(f64),
    InvalidDelay(f64),
    InvalidStep(f64),
    PaletteTooShort(usize),
    UnknownPalette(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroDimension { width, height } => {
                write!(f, "grid must be at least 1×1, got {width}×{height}")
            }
            ConfigError::GridTooLarge { width, height } => {
                write!(f, "grid {width}×{height} has too many cells")
            }
            ConfigError::ZeroCycles => f.write_str("cycle count must be > 0"),
            ConfigError::InvalidProbability(p) => {
                write!(f, "noise probability {p} is outside [0, 1]")
            }
            ConfigError::InvalidDelay(d) => {
                write!(f, "inter-frame delay {d} must be a finite value ≥ 0")
            }
            ConfigError::InvalidStep(s) => write!(f, "time step {s} must be finite"),
            ConfigError::PaletteTooShort(n) => {
                write!(f, "palette needs at least 2 symbols, got {n}")
            }
            ConfigError::UnknownPalette(name) => write!(f, "unknown palette `{name}`"),
        }
    }
}
impl Error for ConfigError {}

/// Recoverable failure of a single frame. The driver reports it to the
/// sink and moves on; it never escapes the animation loop.
#[derive(Debug)]
pub enum FrameFault {
    /// `t` overflowed or is NaN, so `c(t)` is undefined.
    NonFiniteParameter { t: f64 },
    /// The sink could not present the frame.
    Sink(io::Error),
}

impl fmt::Display for FrameFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameFault::NonFiniteParameter { t } => {
                write!(f, "time parameter t={t} is not finite")
            }
            FrameFault::Sink(e) => write!(f, "output failed: {e}"),
        }
    }
}
impl Error for FrameFault {}

impl From<io::Error> for FrameFault {
    fn from(e: io::Error) -> Self {
        Self::Sink(e)
    }
}

/// Top-level error type bubbled up by public APIs.
#[derive(Debug)]
pub enum FieldError {
    Io(io::Error),
    Tint(TintError),
    Config(ConfigError),
    Frame(FrameFault),
    /// The SIGINT handler could not be installed.
    Signal(ctrlc::Error),
    TerminalTooSmall {
        want_w: usize,
        want_h: usize,
        got_w: usize,
        got_h: usize,
    },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Io(e) => write!(f, "{e}"),
            FieldError::Tint(e) => write!(f, "{e}"),
            FieldError::Config(e) => write!(f, "{e}"),
            FieldError::Frame(e) => write!(f, "{e}"),
            FieldError::Signal(e) => write!(f, "cannot watch for Ctrl-C: {e}"),
            FieldError::TerminalTooSmall {
                want_w,
                want_h,
                got_w,
                got_h,
            } => write!(
                f,
                "terminal too small: need ≥{want_w}×{want_h}, got {got_w}×{got_h}"
            ),
        }
    }
}
impl Error for FieldError {}

// automatic conversions
impl From<io::Error> for FieldError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
impl From<TintError> for FieldError {
    fn from(e: TintError) -> Self {
        Self::Tint(e)
    }
}
impl From<ConfigError> for FieldError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
impl From<ctrlc::Error> for FieldError {
    fn from(e: ctrlc::Error) -> Self {
        Self::Signal(e)
    }
}
impl From<FrameFault> for FieldError {
    fn from(e: FrameFault) -> Self {
        Self::Frame(e)
    }
}
