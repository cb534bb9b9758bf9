//! Control parameters shared between the controller, the physics thread and
//! the presentation loop.
//!
//! Every field is an independent atomic. No cross-field consistency is
//! promised: a reader may see a new speed together with an old pause flag.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

use crate::error::{EngineError, EngineResult};

/// Factor applied by the faster/slower and grow/shrink commands
pub const ADJUST_STEP: f64 = 1.2;

/// Range the faster/slower and grow/shrink commands clamp to
pub const MIN_FACTOR: f64 = 1.0e-12;
pub const MAX_FACTOR: f64 = 1.0e12;

/// `f64` stored as its bit pattern
#[derive(Debug)]
pub struct AtomicF64(AtomicU64);

impl AtomicF64 {
    pub fn new(v: f64) -> Self {
        Self(AtomicU64::new(v.to_bits()))
    }

    pub fn load(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Acquire))
    }

    pub fn store(&self, v: f64) {
        self.0.store(v.to_bits(), Ordering::Release);
    }

    /// Multiply in place, clamped to `[min, max]`, returning the new value
    pub fn scale_within(&self, factor: f64, min: f64, max: f64) -> f64 {
        let mut current = self.0.load(Ordering::Acquire);
        loop {
            let scaled = f64::from_bits(current) * factor;
            // NaN compares false and falls back to the lower bound
            let next = if scaled >= min { scaled.min(max) } else { min };
            match self.0.compare_exchange_weak(
                current,
                next.to_bits(),
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return next,
                Err(actual) => current = actual,
            }
        }
    }

    fn adjust(&self, up: bool) -> f64 {
        let factor = if up { ADJUST_STEP } else { ADJUST_STEP.recip() };
        self.scale_within(factor, MIN_FACTOR, MAX_FACTOR)
    }
}

/// Controller actions. None of them touch physical state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    TogglePause,
    Faster,
    Slower,
    NextBody,
    PreviousBody,
    GrowBodies,
    ShrinkBodies,
    GrowStars,
    ShrinkStars,
    Quit,
}

#[derive(Debug)]
pub struct Controls {
    paused: AtomicBool,
    terminate: AtomicBool,
    speed: AtomicF64,       // simulated seconds per real second
    centered: AtomicUsize,  // index of the body the view follows
    body_scale: AtomicF64,  // visual radius multiplier for all bodies
    focus_scale: AtomicF64, // extra multiplier for stars
    last_delta: AtomicF64,  // simulated seconds of the last clock iteration
}

impl Default for Controls {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Controls {
    pub fn new(speed: f64) -> Self {
        Self {
            paused: AtomicBool::new(false),
            terminate: AtomicBool::new(false),
            speed: AtomicF64::new(speed),
            centered: AtomicUsize::new(0),
            body_scale: AtomicF64::new(1.0),
            focus_scale: AtomicF64::new(1.0),
            last_delta: AtomicF64::new(0.0),
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }

    pub fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::Release);
    }

    /// Flip the pause flag, returning the new value
    pub fn toggle_pause(&self) -> bool {
        !self.paused.fetch_xor(true, Ordering::AcqRel)
    }

    pub fn is_terminated(&self) -> bool {
        self.terminate.load(Ordering::Acquire)
    }

    pub fn request_termination(&self) {
        self.terminate.store(true, Ordering::Release);
    }

    pub(crate) fn clear_termination(&self) {
        self.terminate.store(false, Ordering::Release);
    }

    pub fn speed(&self) -> f64 {
        self.speed.load()
    }

    pub fn set_speed(&self, speed: f64) -> EngineResult<()> {
        if !(speed.is_finite() && speed > 0.0) {
            return Err(EngineError::invalid_parameter(
                "speed",
                format!("must be finite and > 0, got {speed}"),
            ));
        }
        self.speed.store(speed);
        Ok(())
    }

    pub fn centered(&self) -> usize {
        self.centered.load(Ordering::Acquire)
    }

    /// Center on body `index`, wrapped into `0..body_count`
    pub fn set_centered(&self, index: usize, body_count: usize) {
        let i = if body_count == 0 { 0 } else { index % body_count };
        self.centered.store(i, Ordering::Release);
    }

    /// Move the centered index by `step`, wrapping modulo `body_count`
    pub fn cycle_centered(&self, step: isize, body_count: usize) -> usize {
        if body_count == 0 {
            self.centered.store(0, Ordering::Release);
            return 0;
        }
        let n = body_count as isize;
        let current = (self.centered() % body_count) as isize;
        let next = (current + step).rem_euclid(n) as usize;
        self.centered.store(next, Ordering::Release);
        next
    }

    pub fn body_scale(&self) -> f64 {
        self.body_scale.load()
    }

    pub fn focus_scale(&self) -> f64 {
        self.focus_scale.load()
    }

    pub fn set_body_scale(&self, scale: f64) {
        self.body_scale.store(scale);
    }

    pub fn set_focus_scale(&self, scale: f64) {
        self.focus_scale.store(scale);
    }

    pub fn last_delta(&self) -> f64 {
        self.last_delta.load()
    }

    pub(crate) fn set_last_delta(&self, dt: f64) {
        self.last_delta.store(dt);
    }

    /// Apply a controller action; `body_count` bounds the centered index.
    /// Speed and scale factors never leave `[MIN_FACTOR, MAX_FACTOR]`.
    pub fn apply(&self, command: ControlCommand, body_count: usize) {
        match command {
            ControlCommand::TogglePause => {
                self.toggle_pause();
            }
            ControlCommand::Faster => {
                self.speed.adjust(true);
            }
            ControlCommand::Slower => {
                self.speed.adjust(false);
            }
            ControlCommand::NextBody => {
                self.cycle_centered(1, body_count);
            }
            ControlCommand::PreviousBody => {
                self.cycle_centered(-1, body_count);
            }
            ControlCommand::GrowBodies => {
                self.body_scale.adjust(true);
            }
            ControlCommand::ShrinkBodies => {
                self.body_scale.adjust(false);
            }
            ControlCommand::GrowStars => {
                self.focus_scale.adjust(true);
            }
            ControlCommand::ShrinkStars => {
                self.focus_scale.adjust(false);
            }
            ControlCommand::Quit => self.request_termination(),
        }
    }
}
