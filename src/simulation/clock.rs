//! Simulation clock: the physics loop running on its own thread.
//!
//! Each iteration measures the wall-clock time since the previous one,
//! scales it by the speed factor and advances the system by that much. The
//! thread owns the working `BodySystem`; after every successful step it hands
//! a copy to `published`, which is the only state readers ever see.

use std::sync::{Arc, Mutex, PoisonError, TryLockError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::error::EngineResult;
use crate::simulation::control::Controls;
use crate::simulation::engine::Engine;
use crate::simulation::states::BodySystem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Stopped,
    Running,
    Paused,
}

/// What a finished physics thread did
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunReport {
    pub iterations: u64,     // clock iterations that advanced the system
    pub updates: u64,        // BodySystem::update calls, sub-steps included
    pub simulated_time: f64, // seconds
}

/// Wall-clock lap timer
#[derive(Debug, Clone, Copy)]
pub struct Pacer {
    last: Instant,
}

impl Pacer {
    pub fn new(now: Instant) -> Self {
        Self { last: now }
    }

    /// Time since the previous lap. Also called while paused so that resuming
    /// never sees the whole pause as one huge delta.
    pub fn lap(&mut self, now: Instant) -> Duration {
        let elapsed = now.saturating_duration_since(self.last);
        self.last = now;
        elapsed
    }
}

/// One clock iteration.
///
/// Returns the simulated seconds applied and the number of updates, or `None`
/// when paused or when termination was requested mid-iteration. A delta
/// longer than `engine.max_step` is split into equal sub-steps; at most
/// `engine.max_substeps` of them run, and simulated time beyond that is
/// dropped.
pub fn advance(
    system: &mut BodySystem,
    controls: &Controls,
    elapsed: Duration,
    engine: &Engine,
) -> EngineResult<Option<(f64, u64)>> {
    if controls.is_paused() {
        return Ok(None);
    }

    let delta = elapsed.as_secs_f64() * controls.speed();
    let (steps, dt) = match engine.max_step {
        Some(h) if h > 0.0 && delta > h => {
            let wanted = (delta / h).ceil();
            let limit = engine.max_substeps.max(1);
            if wanted > limit as f64 {
                log::warn!(
                    "clock behind: {wanted:e} sub-steps wanted, running {limit}, dropping {:.3e} s",
                    delta - limit as f64 * h
                );
                (limit, h)
            } else {
                let steps = wanted as u64;
                (steps, delta / steps as f64)
            }
        }
        _ => (1, delta),
    };

    // keep a clean copy so a failing or cancelled sub-step cannot leave a
    // half-advanced system
    let before = if steps > 1 { Some(system.clone()) } else { None };
    for _ in 0..steps {
        if controls.is_terminated() {
            if let Some(before) = before {
                *system = before;
            }
            return Ok(None);
        }
        if let Err(err) = system.update(dt) {
            if let Some(before) = before {
                *system = before;
            }
            return Err(err);
        }
    }

    let applied = dt * steps as f64;
    controls.set_last_delta(applied);
    Ok(Some((applied, steps)))
}

pub struct SimulationClock {
    controls: Arc<Controls>,
    published: Arc<Mutex<BodySystem>>,
    engine: Engine,
    worker: Option<JoinHandle<EngineResult<RunReport>>>,
}

impl SimulationClock {
    pub fn new(system: BodySystem, controls: Arc<Controls>, engine: Engine) -> Self {
        Self {
            controls,
            published: Arc::new(Mutex::new(system)),
            engine,
            worker: None,
        }
    }

    pub fn controls(&self) -> &Arc<Controls> {
        &self.controls
    }

    pub fn state(&self) -> ClockState {
        match &self.worker {
            Some(handle) if !handle.is_finished() => {
                if self.controls.is_paused() {
                    ClockState::Paused
                } else {
                    ClockState::Running
                }
            }
            _ => ClockState::Stopped,
        }
    }

    /// Stopped -> Running. Resumes from the last published state.
    pub fn start(&mut self) {
        if self.state() != ClockState::Stopped {
            log::warn!("clock already started, ignoring start");
            return;
        }
        // reap a thread that stopped on its own
        if let Some(handle) = self.worker.take() {
            if let Ok(Err(err)) = handle.join() {
                log::warn!("restarting after failed run: {err}");
            }
        }

        self.controls.clear_termination();
        self.controls.set_paused(false);

        let system = self.snapshot();
        let controls = Arc::clone(&self.controls);
        let published = Arc::clone(&self.published);
        let engine = self.engine.clone();

        log::info!(
            "starting physics thread: {} bodies, speed x{}, {}",
            system.len(),
            controls.speed(),
            engine.integrator.name()
        );

        let handle = thread::Builder::new()
            .name("gravsim-physics".into())
            .spawn(move || run_physics_loop(system, &controls, &published, &engine))
            .expect("failed to spawn physics thread");
        self.worker = Some(handle);
    }

    /// Running <-> Paused
    pub fn toggle_pause(&self) -> ClockState {
        if self.state() == ClockState::Stopped {
            log::warn!("clock stopped, ignoring pause toggle");
            return ClockState::Stopped;
        }
        self.controls.toggle_pause();
        self.state()
    }

    pub fn pause(&self) {
        self.controls.set_paused(true);
    }

    pub fn resume(&self) {
        self.controls.set_paused(false);
    }

    /// Latest consistent state, detached from the physics thread
    pub fn snapshot(&self) -> BodySystem {
        self.published
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot()
    }

    /// Running/Paused -> Stopped. Waits for the physics thread and returns
    /// its report, or the step error that ended it early.
    pub fn terminate(&mut self) -> EngineResult<RunReport> {
        self.controls.request_termination();
        let Some(handle) = self.worker.take() else {
            return Ok(RunReport::default());
        };
        let result = handle
            .join()
            .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
        match &result {
            Ok(report) => log::info!(
                "physics thread stopped after {} updates, {:.3e} s simulated",
                report.updates,
                report.simulated_time
            ),
            Err(err) => log::error!("physics thread stopped on error: {err}"),
        }
        result
    }
}

impl Drop for SimulationClock {
    fn drop(&mut self) {
        let Some(handle) = self.worker.take() else {
            return;
        };
        self.controls.request_termination();
        // never re-raise here, a second panic during unwinding aborts
        match handle.join() {
            Ok(Ok(_)) => {}
            Ok(Err(err)) => log::warn!("physics thread had stopped on error: {err}"),
            Err(_) => log::error!("physics thread panicked"),
        }
    }
}

fn publish(published: &Mutex<BodySystem>, system: &BodySystem, blocking: bool) {
    if blocking {
        *published.lock().unwrap_or_else(PoisonError::into_inner) = system.snapshot();
        return;
    }
    // never wait on a reader; the next step publishes again
    match published.try_lock() {
        Ok(mut slot) => *slot = system.snapshot(),
        Err(TryLockError::Poisoned(poisoned)) => *poisoned.into_inner() = system.snapshot(),
        Err(TryLockError::WouldBlock) => {}
    }
}

fn run_physics_loop(
    mut system: BodySystem,
    controls: &Controls,
    published: &Mutex<BodySystem>,
    engine: &Engine,
) -> EngineResult<RunReport> {
    let mut pacer = Pacer::new(Instant::now());
    let mut report = RunReport::default();

    while !controls.is_terminated() {
        let elapsed = pacer.lap(Instant::now());

        match advance(&mut system, controls, elapsed, engine) {
            Ok(Some((delta, steps))) => {
                report.iterations += 1;
                report.updates += steps;
                report.simulated_time += delta;
                publish(published, &system, false);
            }
            Ok(None) => {}
            Err(err) => {
                log::error!("physics step failed at t = {:.3e} s: {err}", system.time());
                return Err(err);
            }
        }

        if !engine.tick.is_zero() {
            thread::sleep(engine.tick);
        }
    }

    publish(published, &system, true);
    Ok(report)
}
