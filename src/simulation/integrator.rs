//! Fixed-step time integration policies for a single body.
//!
//! Both policies take one force evaluation per step; the accelerations are
//! already accumulated on the body when `integrate` runs.

use serde::Deserialize;

use crate::simulation::states::Body;

/// Which integrator the system applies to every body.
/// YAML: `integrator: "euler"` or `integrator: "kinematic"`
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Integrator {
    /// v += a dt, then x += v_new dt. Symplectic, one update per body
    #[default]
    #[serde(rename = "euler")]
    SemiImplicitEuler,

    /// v += a dt, then x += (v_old + v_new) / 2 dt
    #[serde(rename = "kinematic")]
    AverageVelocity,
}

impl Integrator {
    pub fn integrate(&self, body: &mut Body, dt: f64) {
        match self {
            Integrator::SemiImplicitEuler => body.update_motion(dt),
            Integrator::AverageVelocity => body.update_kinematic_motion(dt),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Integrator::SemiImplicitEuler => "semi-implicit euler",
            Integrator::AverageVelocity => "average velocity",
        }
    }
}
