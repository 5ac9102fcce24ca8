//! Aggregates the “business logic” layer.

pub mod bounds;
pub mod color;
pub mod complex;
pub mod config;
pub mod constants;
pub mod error;
pub mod julia;
pub mod palette;
pub mod rng;

// re-export frequently-used items for convenience
pub use color::{Tint, TintError};
pub use complex::Complex;
pub use config::{AnimationConfig, AnimationConfigBuilder, FieldConfig, FieldConfigBuilder};
pub use constants::{DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_ITERATIONS, TIME_STEP};
pub use error::{ConfigError, FieldError, FrameFault};
pub use julia::{Escape, classify, julia_constant, map_cell, step};
pub use palette::Palette;
