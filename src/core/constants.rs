//! A collection of constants.

/// Default grid width in characters
pub const DEFAULT_WIDTH: usize = 80;
/// Default grid height in characters
pub const DEFAULT_HEIGHT: usize = 40;

/// Iteration slots per cell
pub const MAX_ITERATIONS: u32 = 30;
/// A point whose magnitude exceeds this has escaped
pub const ESCAPE_RADIUS: f64 = 2.0;

/// Real part of the recurrence constant at rest
pub const C_REAL_BASE: f64 = -0.7;
/// Imaginary part of the recurrence constant at rest
pub const C_IMAG_BASE: f64 = 0.27015;
/// Amplitude of the `sin(t)` wobble on the real part
pub const C_REAL_WOBBLE: f64 = 0.1;
/// Amplitude of the `cos(t)` wobble on the imaginary part
pub const C_IMAG_WOBBLE: f64 = 0.05;

/// Per-unit-of-t drift of the viewport along the real axis
pub const REAL_DRIFT: f64 = 0.1;
/// Per-unit-of-t drift of the viewport along the imaginary axis
pub const IMAG_DRIFT: f64 = 0.05;

/// `t` advances by this much per frame
pub const TIME_STEP: f64 = 0.2;
/// Frames in a default run
pub const DEFAULT_CYCLES: usize = 20;
/// Seconds between frames
pub const DEFAULT_DELAY_SECS: f64 = 0.3;
/// Per-cell chance of a noise glyph
pub const DEFAULT_NOISE: f64 = 0.02;
/// The first six frames (0..=5) are never noised
pub const DEFAULT_WARM_UP: usize = 6;
/// Noise draws from this many of the sparsest palette symbols
pub const NOISE_SPAN: usize = 3;

/// Title bar, status row, stats row, bottom rule and the parked cursor row
pub const CHROME_ROWS: usize = 5;
/// The left and right border characters
pub const BORDER_WIDTH: usize = 2;

/// `--fit` refuses to go below 8 columns
pub const MIN_FIELD_WIDTH: usize = 8;
/// `--fit` refuses to go below 4 rows
pub const MIN_FIELD_HEIGHT: usize = 4;
