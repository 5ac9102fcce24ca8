//! Terminal size plumbing.

use terminal_size::{Height, Width, terminal_size};

use crate::core::{
    constants::{BORDER_WIDTH, CHROME_ROWS, MIN_FIELD_HEIGHT, MIN_FIELD_WIDTH},
    error::FieldError,
};

/// Current terminal geometry (80×30 fallback).
#[inline]
#[must_use]
pub fn terminal_geometry() -> (Width, Height) {
    terminal_size().unwrap_or((Width(80), Height(30)))
}

/// Largest field that fits inside `(w, h)` once the frame chrome is drawn.
pub fn fit_field((w, h): (Width, Height)) -> Result<(usize, usize), FieldError> {
    let cols = usize::from(w.0).saturating_sub(BORDER_WIDTH);
    let rows = usize::from(h.0).saturating_sub(CHROME_ROWS);
    if cols < MIN_FIELD_WIDTH || rows < MIN_FIELD_HEIGHT {
        return Err(FieldError::TerminalTooSmall {
            want_w: MIN_FIELD_WIDTH + BORDER_WIDTH,
            want_h: MIN_FIELD_HEIGHT + CHROME_ROWS,
            got_w: usize::from(w.0),
            got_h: usize::from(h.0),
        });
    }
    Ok((cols, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_subtracts_chrome() {
        let (w, h) = fit_field((Width(82), Height(45))).unwrap();
        assert_eq!((w, h), (80, 40));
    }

    #[test]
    fn fit_refuses_tiny_terminals() {
        let err = fit_field((Width(9), Height(30))).unwrap_err();
        assert!(matches!(
            err,
            FieldError::TerminalTooSmall {
                want_w: 10,
                want_h: 9,
                got_w: 9,
                got_h: 30
            }
        ));
        assert!(fit_field((Width(80), Height(8))).is_err());
        assert!(fit_field((Width(10), Height(9))).is_ok());
    }
}
