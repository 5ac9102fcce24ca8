//! Run-time configuration objects + fluent builders.

use std::time::Duration;

use crate::core::{
    constants::{
        DEFAULT_CYCLES, DEFAULT_DELAY_SECS, DEFAULT_HEIGHT, DEFAULT_NOISE, DEFAULT_WARM_UP,
        DEFAULT_WIDTH, TIME_STEP,
    },
    error::ConfigError,
    palette::Palette,
};

/// Immutable grid parameters, fixed for the renderer's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    pub width: usize,
    pub height: usize,
    pub palette: Palette,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            palette: Palette::default(),
        }
    }
}

impl FieldConfig {
    #[inline]
    #[must_use]
    pub fn builder(width: usize, height: usize) -> FieldConfigBuilder {
        FieldConfigBuilder {
            width,
            height,
            palette: None,
        }
    }
}

#[derive(Debug)]
pub struct FieldConfigBuilder {
    width: usize,
    height: usize,
    palette: Option<Palette>,
}

impl FieldConfigBuilder {
    #[inline]
    #[must_use]
    pub fn palette(mut self, p: Palette) -> Self {
        self.palette = Some(p);
        self
    }

    pub fn build(self) -> Result<FieldConfig, ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }
        if self.width.checked_mul(self.height).is_none() {
            return Err(ConfigError::GridTooLarge {
                width: self.width,
                height: self.height,
            });
        }
        Ok(FieldConfig {
            width: self.width,
            height: self.height,
            palette: self.palette.unwrap_or_default(),
        })
    }
}

/// Parameters of one animation run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationConfig {
    pub cycles: usize,
    pub delay: Duration,
    pub noise: f64,
    pub warm_up: usize,
    pub step: f64,
    pub seed: Option<u64>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            cycles: DEFAULT_CYCLES,
            delay: Duration::from_secs_f64(DEFAULT_DELAY_SECS),
            noise: DEFAULT_NOISE,
            warm_up: DEFAULT_WARM_UP,
            step: TIME_STEP,
            seed: None,
        }
    }
}

impl AnimationConfig {
    #[inline]
    #[must_use]
    pub fn builder() -> AnimationConfigBuilder {
        AnimationConfigBuilder::default()
    }

    /// `t` for frame `i`.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn time_at(&self, frame: usize) -> f64 {
        frame as f64 * self.step
    }

    /// Whether frame `i` gets the noise pass.
    #[inline]
    #[must_use]
    pub fn noisy(&self, frame: usize) -> bool {
        frame >= self.warm_up && self.noise > 0.0
    }
}

/// Fluent builder; unset fields fall back to the defaults.
#[derive(Debug, Default)]
pub struct AnimationConfigBuilder {
    cycles: Option<usize>,
    delay_secs: Option<f64>,
    noise: Option<f64>,
    warm_up: Option<usize>,
    step: Option<f64>,
    seed: Option<u64>,
}

impl AnimationConfigBuilder {
    #[inline]
    #[must_use]
    pub fn cycles(mut self, n: usize) -> Self {
        self.cycles = Some(n);
        self
    }
    /// Seconds between frames.
    #[inline]
    #[must_use]
    pub fn delay(mut self, secs: f64) -> Self {
        self.delay_secs = Some(secs);
        self
    }
    #[inline]
    #[must_use]
    pub fn noise(mut self, p: f64) -> Self {
        self.noise = Some(p);
        self
    }
    #[inline]
    #[must_use]
    pub fn warm_up(mut self, frames: usize) -> Self {
        self.warm_up = Some(frames);
        self
    }
    #[inline]
    #[must_use]
    pub fn step(mut self, dt: f64) -> Self {
        self.step = Some(dt);
        self
    }
    #[inline]
    #[must_use]
    pub fn seed(mut self, s: u64) -> Self {
        self.seed = Some(s);
        self
    }
    #[inline]
    #[must_use]
    pub fn seed_opt(mut self, s: Option<u64>) -> Self {
        if s.is_some() {
            self.seed = s;
        }
        self
    }

    pub fn build(self) -> Result<AnimationConfig, ConfigError> {
        let cycles = self.cycles.unwrap_or(DEFAULT_CYCLES);
        if cycles == 0 {
            return Err(ConfigError::ZeroCycles);
        }
        let delay_secs = self.delay_secs.unwrap_or(DEFAULT_DELAY_SECS);
        if !delay_secs.is_finite() || delay_secs < 0.0 {
            return Err(ConfigError::InvalidDelay(delay_secs));
        }
        let delay =
            Duration::try_from_secs_f64(delay_secs).map_err(|_| ConfigError::InvalidDelay(delay_secs))?;
        let noise = self.noise.unwrap_or(DEFAULT_NOISE);
        if !(0.0..=1.0).contains(&noise) {
            return Err(ConfigError::InvalidProbability(noise));
        }
        let step = self.step.unwrap_or(TIME_STEP);
        if !step.is_finite() {
            return Err(ConfigError::InvalidStep(step));
        }
        Ok(AnimationConfig {
            cycles,
            delay,
            noise,
            warm_up: self.warm_up.unwrap_or(DEFAULT_WARM_UP),
            step,
            seed: self.seed,
        })
    }
}
