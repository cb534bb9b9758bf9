//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - gravitational constant and softening (`g`, `softening`),
//! - metres per display unit for the presentation side (`unit_scale`)

use crate::simulation::forces::NewtonianGravity;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub g: f64,          // gravitational constant
    pub softening: f64,  // eps^2, m^2
    pub unit_scale: f64, // metres per display unit
}

impl Parameters {
    pub fn gravity(&self) -> NewtonianGravity {
        NewtonianGravity::new(self.g).with_softening(self.softening)
    }
}
