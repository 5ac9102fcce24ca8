//! Shading palettes: escape fraction → glyph.

use crate::core::{constants::NOISE_SPAN, error::ConfigError, julia::Escape};

/// Glyphs from sparsest to densest.
pub const BLOCKS: [char; 6] = [' ', '·', '░', '▒', '▓', '█'];
/// Pure ASCII fallback for terminals without block glyphs.
pub const ASCII: [char; 6] = [' ', '.', ':', '+', '#', '@'];
/// Braille ramp, one more dot per level.
pub const DOTS: [char; 6] = [' ', '⠁', '⠃', '⠇', '⡇', '⣿'];

/// Every named palette, in listing order.
pub const NAMED: [(&str, &[char]); 3] = [("blocks", &BLOCKS), ("ascii", &ASCII), ("dots", &DOTS)];

/// Ordered, read-only glyph ramp. Always holds at least two symbols.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    symbols: Vec<char>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            symbols: BLOCKS.to_vec(),
        }
    }
}

impl Palette {
    pub fn new(symbols: impl IntoIterator<Item = char>) -> Result<Self, ConfigError> {
        let symbols: Vec<char> = symbols.into_iter().collect();
        if symbols.len() < 2 {
            return Err(ConfigError::PaletteTooShort(symbols.len()));
        }
        Ok(Self { symbols })
    }

    /// Look up a named palette, or treat anything prefixed with `=` as a
    /// literal symbol ramp (`=" .oO@"`).
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        if let Some(literal) = name.strip_prefix('=') {
            return Self::new(literal.chars());
        }
        let wanted = name.trim().to_ascii_lowercase();
        NAMED
            .iter()
            .find(|(n, _)| *n == wanted)
            .map(|(_, s)| Self {
                symbols: s.to_vec(),
            })
            .ok_or_else(|| ConfigError::UnknownPalette(name.to_owned()))
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// The sparsest symbol; also what blank cells are drawn with.
    #[inline]
    #[must_use]
    pub fn blank(&self) -> char {
        self.symbols[0]
    }

    /// Palette index for fraction `p`: `min(floor(p * N), N - 1)`.
    /// Negative or NaN input clamps to 0.
    #[inline]
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn index_for(&self, p: f64) -> usize {
        let n = self.symbols.len();
        // float → usize casts saturate, NaN becomes 0
        let idx = (p * n as f64).floor() as usize;
        idx.min(n - 1)
    }

    /// Glyph for fraction `p`.
    #[inline]
    #[must_use]
    pub fn shade(&self, p: f64) -> char {
        self.symbols[self.index_for(p)]
    }

    /// Glyph for a classified point.
    #[inline]
    #[must_use]
    pub fn shade_escape(&self, e: Escape) -> char {
        e.fraction().map_or_else(|| self.blank(), |p| self.shade(p))
    }

    /// The symbols noise may draw from.
    #[inline]
    #[must_use]
    pub fn noise_symbols(&self) -> &[char] {
        &self.symbols[..NOISE_SPAN.min(self.symbols.len())]
    }
}
