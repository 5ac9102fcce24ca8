//! Animation driver: `Idle → Rendering(i) → Idle … → Done`.
//!
//! The driver owns the [`Field`] and hands each finished frame to a
//! [`FrameSink`] by shared borrow. Faults inside one frame are reported to
//! the sink and skipped; cancellation is polled between frames only.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};

use crate::{
    core::{
        config::{AnimationConfig, FieldConfig},
        error::FrameFault,
        rng::Lcg,
    },
    render::{
        field::{Field, FrameStats},
        grid::Grid,
    },
};

/// Shared interrupt flag. Cloning shares the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Everything a sink needs to present one frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameSnapshot<'a> {
    /// 0-based frame index.
    pub index: usize,
    /// Configured cycle count.
    pub total: usize,
    pub t: f64,
    pub grid: &'a Grid,
    pub stats: FrameStats,
}

impl FrameSnapshot<'_> {
    /// Progress after this frame, in percent.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress_pct(&self) -> f64 {
        (self.index + 1) as f64 / self.total.max(1) as f64 * 100.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Interrupted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Rendering(usize),
    Done(Outcome),
}

/// Summary handed back to the caller (and to the sink) once `Done`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunReport {
    pub outcome: Outcome,
    pub emitted: usize,
    pub faulted: usize,
    /// Sum of per-frame render time.
    pub render_time: Duration,
    /// Sum of per-frame sink time.
    pub emit_time: Duration,
}

/// Output collaborator.
pub trait FrameSink {
    /// Present a complete frame.
    fn emit(&mut self, frame: &FrameSnapshot<'_>) -> std::io::Result<()>;

    /// Frame `index` was skipped because of `fault`.
    fn fault(&mut self, index: usize, fault: &FrameFault);

    /// The driver reached `Done`.
    fn finish(&mut self, _report: &RunReport) {}
}

/// The cooperative wait between frames.
pub trait Pacer {
    fn pause(&mut self, delay: Duration, cancel: &CancelToken);
}

/// Blocking sleep in short slices so a cancel is honoured promptly.
#[derive(Clone, Copy, Debug)]
pub struct Sleeper {
    slice: Duration,
}

impl Default for Sleeper {
    fn default() -> Self {
        Self {
            slice: Duration::from_millis(20),
        }
    }
}

impl Pacer for Sleeper {
    fn pause(&mut self, delay: Duration, cancel: &CancelToken) {
        let deadline = Instant::now() + delay;
        loop {
            if cancel.is_cancelled() {
                return;
            }
            let now = Instant::now();
            if now >= deadline {
                return;
            }
            std::thread::sleep(self.slice.min(deadline - now));
        }
    }
}

/// No waiting at all; for tests and `--delay 0`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPause;

impl Pacer for NoPause {
    fn pause(&mut self, _delay: Duration, _cancel: &CancelToken) {}
}

pub struct Animation {
    field: Field,
    cfg: AnimationConfig,
    rng: Lcg,
    state: DriverState,
}

impl Animation {
    #[must_use]
    pub fn new(field_cfg: &FieldConfig, cfg: AnimationConfig) -> Self {
        let rng = cfg.seed.map_or_else(Lcg::seed_from_time, Lcg::seed);
        Self {
            field: Field::new(field_cfg),
            cfg,
            rng,
            state: DriverState::Idle,
        }
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> DriverState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Render frame `i` (plus noise past the warm-up) into the field.
    fn frame(&mut self, i: usize) -> Result<FrameStats, FrameFault> {
        let mut stats = self.field.render(self.cfg.time_at(i))?;
        if self.cfg.noisy(i) {
            stats.noised = self.field.sprinkle_noise(&mut self.rng, self.cfg.noise);
        }
        Ok(stats)
    }

    /// Drive every cycle to `Done`. Never fails: faults are routed to
    /// `sink.fault`, an interrupt ends the run early.
    pub fn run<S, P>(&mut self, sink: &mut S, pacer: &mut P, cancel: &CancelToken) -> RunReport
    where
        S: FrameSink + ?Sized,
        P: Pacer + ?Sized,
    {
        let mut report = RunReport {
            outcome: Outcome::Completed,
            emitted: 0,
            faulted: 0,
            render_time: Duration::ZERO,
            emit_time: Duration::ZERO,
        };

        for i in 0..self.cfg.cycles {
            if cancel.is_cancelled() {
                report.outcome = Outcome::Interrupted;
                break;
            }
            self.state = DriverState::Rendering(i);

            let t0 = Instant::now();
            let rendered = self.frame(i);
            report.render_time += t0.elapsed();

            let result = rendered.and_then(|stats| {
                let snapshot = FrameSnapshot {
                    index: i,
                    total: self.cfg.cycles,
                    t: self.field.time(),
                    grid: self.field.grid(),
                    stats,
                };
                let t1 = Instant::now();
                let out = sink.emit(&snapshot);
                report.emit_time += t1.elapsed();
                out.map_err(FrameFault::from)
            });
            match result {
                Ok(()) => report.emitted += 1,
                Err(fault) => {
                    sink.fault(i, &fault);
                    report.faulted += 1;
                }
            }
            self.state = DriverState::Idle;

            if cancel.is_cancelled() {
                report.outcome = Outcome::Interrupted;
                break;
            }
            pacer.pause(self.cfg.delay, cancel);
            if cancel.is_cancelled() {
                report.outcome = Outcome::Interrupted;
                break;
            }
        }

        self.state = DriverState::Done(report.outcome);
        sink.finish(&report);
        report
    }
}
