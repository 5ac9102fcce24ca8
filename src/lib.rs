//! Public-facing crate root – re-exports + one-shot helper.

pub mod cli;
pub mod core;
pub mod render;

pub use crate::core::{
    color::{Tint, TintError},
    complex::Complex,
    config::{AnimationConfig, FieldConfig},
    error::{ConfigError, FieldError, FrameFault},
    julia::{Escape, classify, julia_constant, map_cell, step},
    palette::Palette,
};

pub use crate::render::{
    Animation, CancelToken, DriverState, Field, FrameSink, FrameSnapshot, FrameStats, Grid,
    NoPause, Outcome, Pacer, PlainSink, RunReport, Sleeper, Strategy, TerminalSink,
};

/// Convenience function: one noise-free frame at time `t` as text, rows
/// separated by `\n`.
pub fn render_still(width: usize, height: usize, t: f64) -> Result<String, FieldError> {
    let cfg = FieldConfig::builder(width, height).build()?;
    let mut field = Field::new(&cfg);
    field.render(t)?;
    Ok(field.grid().to_string())
}
