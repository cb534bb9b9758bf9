//! High-level runtime engine settings
//!
//! Selects the integration policy and how the clock turns wall-clock time
//! into simulated time when running a `Scenario`

use std::time::Duration;

use crate::simulation::integrator::Integrator;

#[derive(Debug, Clone)]
pub struct Engine {
    pub integrator: Integrator, // euler or kinematic
    pub speed: f64,             // simulated seconds per real second
    pub max_step: Option<f64>,  // longest single update, simulated seconds
    pub max_substeps: u64,      // updates per clock iteration at most
    pub tick: Duration,         // pause between clock iterations
}

/// Sub-step ceiling per clock iteration unless configured
pub const DEFAULT_MAX_SUBSTEPS: u64 = 1_000;

impl Default for Engine {
    fn default() -> Self {
        Self {
            integrator: Integrator::default(),
            speed: 1.0,
            max_step: None,
            max_substeps: DEFAULT_MAX_SUBSTEPS,
            tick: Duration::from_millis(1),
        }
    }
}
