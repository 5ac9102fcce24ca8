//! Zero-alloc ANSI tint for the rendered field.  No external deps.

use std::{error::Error, fmt, str};

#[derive(Debug, PartialEq, Eq)]
pub enum TintError {
    InvalidHexDigit,
    InvalidHexLength,
}

impl fmt::Display for TintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TintError::InvalidHexDigit => f.write_str("invalid hex colour digit"),
            TintError::InvalidHexLength => f.write_str("hex colour must be exactly 6 digits"),
        }
    }
}
impl Error for TintError {}

/// Foreground escape applied to every grid row. `Plain` emits nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tint {
    Plain,
    Named(&'static str),
    Rgb { buf: [u8; 20], len: u8 },
}

/// Name → escape table, in listing order.
pub const NAMED_TINTS: [(&str, &str); 9] = [
    ("red", "\x1b[31m"),
    ("green", "\x1b[32m"),
    ("yellow", "\x1b[33m"),
    ("blue", "\x1b[34m"),
    ("magenta", "\x1b[35m"),
    ("cyan", "\x1b[36m"),
    ("white", "\x1b[37m"),
    ("violet", "\x1b[38;2;150;110;230m"),
    ("ice", "\x1b[38;2;140;200;255m"),
];

const RESET: &str = "\x1b[0m";

impl Default for Tint {
    fn default() -> Self {
        Self::violet()
    }
}

impl Tint {
    #[must_use]
    pub const fn violet() -> Self {
        Self::Named("\x1b[38;2;150;110;230m")
    }

    /// True-colour escape `ESC[38;2;R;G;Bm`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        let mut buf = [0u8; 20];
        buf[..7].copy_from_slice(b"\x1b[38;2;");
        let mut len = 7;

        for (i, v) in [r, g, b].into_iter().enumerate() {
            len += write_u8(&mut buf[len..], v);
            if i != 2 {
                buf[len] = b';';
                len += 1;
            }
        }
        buf[len] = b'm';
        len += 1;
        Self::Rgb {
            buf,
            len: len as u8,
        }
    }

    /// Parse `none`/`plain`, a colour name, or `#rrggbb`.
    pub fn parse(s: &str) -> Result<Self, TintError> {
        let key = s.trim().to_ascii_lowercase();
        if key == "none" || key == "plain" {
            return Ok(Self::Plain);
        }
        NAMED_TINTS
            .iter()
            .find(|(n, _)| *n == key)
            .map_or_else(|| Self::from_hex(&key), |&(_, code)| Ok(Self::Named(code)))
    }

    pub fn from_hex(hex: &str) -> Result<Self, TintError> {
        let h = hex.trim_start_matches('#');
        if h.len() != 6 {
            return Err(TintError::InvalidHexLength);
        }
        let byte = |s: &str| u8::from_str_radix(s, 16).map_err(|_| TintError::InvalidHexDigit);
        let (r, g, b) = (
            byte(h.get(..2).ok_or(TintError::InvalidHexDigit)?)?,
            byte(h.get(2..4).ok_or(TintError::InvalidHexDigit)?)?,
            byte(h.get(4..).ok_or(TintError::InvalidHexDigit)?)?,
        );
        Ok(Self::rgb(r, g, b))
    }

    /// Opening escape; empty for `Plain`.
    #[inline]
    #[must_use]
    pub fn open(&self) -> &str {
        match self {
            Self::Plain => "",
            Self::Named(s) => s,
            Self::Rgb { buf, len } => str::from_utf8(&buf[..*len as usize]).unwrap_or(""),
        }
    }

    /// Closing escape; empty for `Plain`.
    #[inline]
    #[must_use]
    pub fn close(&self) -> &'static str {
        if matches!(self, Self::Plain) { "" } else { RESET }
    }

    /// Wrap `text` in this tint.
    #[must_use]
    pub fn paint(&self, text: &str) -> String {
        format!("{}{text}{}", self.open(), self.close())
    }
}

// --- Helpers ---
fn write_u8(dst: &mut [u8], mut n: u8) -> usize {
    let mut tmp = [0u8; 3];
    let mut i = 3;
    loop {
        i -= 1;
        tmp[i] = b'0' + n % 10;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    let len = 3 - i;
    dst[..len].copy_from_slice(&tmp[i..]);
    len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_escape_layout() {
        assert_eq!(Tint::rgb(0, 128, 255).open(), "\x1b[38;2;0;128;255m");
    }

    #[test]
    fn parse_names_hex_and_plain() {
        assert_eq!(Tint::parse("Cyan").unwrap().open(), "\x1b[36m");
        assert_eq!(Tint::parse("#505050").unwrap(), Tint::rgb(0x50, 0x50, 0x50));
        assert_eq!(Tint::parse("none").unwrap(), Tint::Plain);
        assert_eq!(Tint::parse("#12345"), Err(TintError::InvalidHexLength));
        assert_eq!(Tint::parse("#zz0000"), Err(TintError::InvalidHexDigit));
    }

    #[test]
    fn non_ascii_hex_is_rejected_not_panicking() {
        assert!(Tint::parse("#ééé").is_err());
    }

    #[test]
    fn plain_paint_is_identity() {
        assert_eq!(Tint::Plain.paint("abc"), "abc");
        assert_eq!(Tint::parse("red").unwrap().paint("x"), "\x1b[31mx\x1b[0m");
    }
}
