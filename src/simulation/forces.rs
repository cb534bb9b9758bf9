//! Newtonian gravity between every pair of bodies.
//!
//! Each unordered pair (i, j) with i < j is evaluated once. Body i receives
//! the force F and body j receives -F, so the forces of a step always sum to
//! the zero vector up to round-off.

use crate::error::{EngineError, EngineResult};
use crate::simulation::states::Body;
use crate::simulation::vector::Vector;

/// Universal gravitation, SI value (m^3 kg^-1 s^-2)
pub const G_SI: f64 = 6.674e-11;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonianGravity {
    pub g: f64,         // gravitational constant
    pub softening: f64, // eps^2 added to r^2, m^2
}

impl Default for NewtonianGravity {
    fn default() -> Self {
        Self {
            g: G_SI,
            softening: 0.0,
        }
    }
}

impl NewtonianGravity {
    pub fn new(g: f64) -> Self {
        Self { g, softening: 0.0 }
    }

    pub fn with_softening(mut self, eps2: f64) -> Self {
        self.softening = eps2;
        self
    }

    /// Force on `bi` due to `bj`:
    /// F = (x_j - x_i) * G m_i m_j / (|x_j - x_i|^2 + eps^2)^(3/2)
    pub fn force_between(&self, bi: &Body, bj: &Body) -> EngineResult<Vector> {
        // r is the displacement vector from i to j
        // i feels a pull along +r, j along -r
        let r = bj.position - bi.position;

        // Squared separation |r|^2, no softening yet
        let r2 = r.norm_squared();

        // Coincident bodies are a singularity whatever the softening:
        // the direction of r is undefined, not just its length
        if r2 == 0.0 {
            return Err(EngineError::DivisionByZero(format!(
                "bodies `{}` and `{}` share position {}",
                bi.name, bj.name, bi.position
            )));
        }

        // Softened squared distance:
        // d2 = |r|^2 + eps^2
        let d2 = r2 + self.softening;

        // 1 / |r_soft|
        let inv_r = d2.sqrt().recip();

        // 1 / |r_soft|^3
        // r * inv_r3 is the unit vector over the squared distance
        let inv_r3 = inv_r * inv_r * inv_r;

        // F_ij = G m_i m_j r / |r_soft|^3
        let force = r * (self.g * bj.mass() * bi.mass() * inv_r3);

        // an overflowed force is reported, never propagated
        if !force.is_finite() {
            return Err(EngineError::DivisionByZero(format!(
                "force between `{}` and `{}` is not finite (r^2 = {r2:e})",
                bi.name, bj.name
            )));
        }
        Ok(force)
    }

    /// Per-body lists of the forces acting on it this step, in pair order.
    /// Nothing is returned unless every pair is regular.
    pub fn pairwise_forces(&self, bodies: &[Body]) -> EngineResult<Vec<Vec<Vector>>> {
        let n = bodies.len();
        // each body takes part in n - 1 pairs
        let mut out = vec![Vec::with_capacity(n.saturating_sub(1)); n];

        // Loop over each unordered pair (i, j) with i < j
        for i in 0..n {
            for j in (i + 1)..n {
                // force on i due to j
                let f = self.force_between(&bodies[i], &bodies[j])?;

                // Apply equal and opposite forces:
                // - body i is pulled toward j (+f)
                // - body j is pulled toward i (-f)
                out[i].push(f);
                out[j].push(-f);
            }
        }
        Ok(out)
    }

    /// Net force on each body
    pub fn net_forces(&self, bodies: &[Body]) -> EngineResult<Vec<Vector>> {
        Ok(self
            .pairwise_forces(bodies)?
            .iter()
            .map(|fs| fs.iter().fold(Vector::zeros(), |acc, f| acc + *f))
            .collect())
    }

    /// Sum of -G m_i m_j / r over all pairs
    pub fn potential_energy(&self, bodies: &[Body]) -> EngineResult<f64> {
        let mut u = 0.0;
        for (i, bi) in bodies.iter().enumerate() {
            for bj in &bodies[i + 1..] {
                let r2 = (bj.position - bi.position).norm_squared();
                if r2 == 0.0 {
                    return Err(EngineError::DivisionByZero(format!(
                        "potential of coincident bodies `{}` and `{}`",
                        bi.name, bj.name
                    )));
                }
                u -= self.g * bi.mass() * bj.mass() / (r2 + self.softening).sqrt();
            }
        }
        Ok(u)
    }
}
