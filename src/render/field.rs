//! The renderer context: grid + palette + current `t`.
//!
//! ### Workflow
//! 1. [`Field::render`] maps every cell to the plane, classifies it and
//!    writes the shaded glyph, row-major. `c(t)` is computed once per frame;
//!    the per-cell path is bit-identical to recomputing it.
//! 2. [`Field::sprinkle_noise`] optionally overwrites a few interior cells
//!    with sparse glyphs. Border cells are never touched.

use crate::{
    core::{
        config::FieldConfig,
        error::FrameFault,
        julia::{Escape, classify_with, julia_constant, map_cell},
        palette::Palette,
        rng::Lcg,
    },
    render::grid::Grid,
};

/// What one render pass saw.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    pub converged: usize,
    pub escaped: usize,
    pub blank: usize,
    /// Cells overwritten by the noise pass.
    pub noised: usize,
    /// Mean escape fraction over non-blank cells (0 when all are blank).
    pub mean_escape: f64,
}

impl FrameStats {
    /// Share of classified cells that never escaped, in percent.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn converged_pct(&self) -> f64 {
        let classified = self.converged + self.escaped;
        if classified == 0 {
            0.0
        } else {
            100.0 * self.converged as f64 / classified as f64
        }
    }
}

pub struct Field {
    grid: Grid,
    palette: Palette,
    t: f64,
}

impl Field {
    #[must_use]
    pub fn new(cfg: &FieldConfig) -> Self {
        let palette = cfg.palette.clone();
        Self {
            grid: Grid::new(cfg.width, cfg.height, palette.blank()),
            palette,
            t: 0.0,
        }
    }

    #[inline]
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// `t` of the last successful render.
    #[inline]
    #[must_use]
    pub fn time(&self) -> f64 {
        self.t
    }

    /// Overwrite the whole grid with the field at time `t`.
    ///
    /// A non-finite `t` is a frame-level fault and leaves the grid as it was.
    #[allow(clippy::cast_precision_loss)]
    pub fn render(&mut self, t: f64) -> Result<FrameStats, FrameFault> {
        if !t.is_finite() {
            return Err(FrameFault::NonFiniteParameter { t });
        }
        let c = julia_constant(t);
        let (w, h) = (self.grid.width(), self.grid.height());
        let mut stats = FrameStats::default();
        let mut sum = 0.0;

        let cells = self.grid.cells_mut();
        for y in 0..h {
            for x in 0..w {
                let e = classify_with(map_cell(x, y, w, h, t), c);
                match e {
                    Escape::After(_) => stats.escaped += 1,
                    Escape::Converged => stats.converged += 1,
                    Escape::Blank => stats.blank += 1,
                }
                sum += e.fraction().unwrap_or(0.0);
                cells[y * w + x] = self.palette.shade_escape(e);
            }
        }

        let classified = stats.converged + stats.escaped;
        if classified > 0 {
            stats.mean_escape = sum / classified as f64;
        }
        self.t = t;
        Ok(stats)
    }

    /// Give each interior cell an independent `p` chance of being replaced
    /// by one of the sparsest palette glyphs. Returns the number replaced.
    pub fn sprinkle_noise(&mut self, rng: &mut Lcg, p: f64) -> usize {
        let (w, h) = (self.grid.width(), self.grid.height());
        if w < 3 || h < 3 {
            return 0;
        }
        let choices = self.palette.noise_symbols();
        let cells = self.grid.cells_mut();
        let mut hits = 0;
        for y in 1..h - 1 {
            for x in 1..w - 1 {
                if rng.chance(p) {
                    cells[y * w + x] = choices[rng.below(choices.len())];
                    hits += 1;
                }
            }
        }
        hits
    }
}
