//! Core state types for the N-body simulation.
//!
//! - `Body`        one astronomical object: fixed physical constants plus
//!                 kinematic and rotational state advanced every step
//! - `BodyState`   optional overrides used to place a body before the run
//! - `BodySystem`  ordered collection of bodies, the force law, the
//!                 integration policy and the elapsed simulated time `t`

use std::f64::consts::PI;

use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::simulation::forces::NewtonianGravity;
use crate::simulation::integrator::Integrator;
use crate::simulation::vector::Vector;

/// Coarse classification carried through to the renderer
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BodyType {
    Star,
    Planet,
    DwarfPlanet,
    Moon,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub name: String,
    pub body_type: Option<BodyType>,
    mass: f64,      // kg
    radius: f64,    // m
    obliquity: f64, // axial tilt, degrees
    pub position: Vector,
    pub velocity: Vector,
    pub acceleration: Vector,
    pub rotation_angle: f64,   // degrees, kept in [0, 360)
    pub angular_velocity: f64, // degrees per simulated second
}

/// Initial-condition overrides for [`Body::configure`].
///
/// Every field left `None` keeps the body's current value; a freshly built
/// body starts at rest at the origin with zero acceleration and angle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BodyState {
    pub position: Option<Vector>,
    pub velocity: Option<Vector>,
    pub acceleration: Option<Vector>,
    pub angle: Option<f64>,
    pub angular_velocity: Option<f64>,
}

impl BodyState {
    pub fn position(mut self, position: Vector) -> Self {
        self.position = Some(position);
        self
    }

    pub fn velocity(mut self, velocity: Vector) -> Self {
        self.velocity = Some(velocity);
        self
    }

    pub fn acceleration(mut self, acceleration: Vector) -> Self {
        self.acceleration = Some(acceleration);
        self
    }

    pub fn angle(mut self, degrees: f64) -> Self {
        self.angle = Some(degrees);
        self
    }

    pub fn angular_velocity(mut self, degrees_per_second: f64) -> Self {
        self.angular_velocity = Some(degrees_per_second);
        self
    }
}

impl Body {
    /// Non-rotating, untilted body at rest at the origin. Data in SI units.
    pub fn new(name: impl Into<String>, mass: f64, radius: f64) -> EngineResult<Self> {
        let name = name.into();
        if !(mass.is_finite() && mass > 0.0) {
            return Err(EngineError::invalid_parameter(
                format!("{name}.mass"),
                format!("must be finite and > 0, got {mass}"),
            ));
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(EngineError::invalid_parameter(
                format!("{name}.radius"),
                format!("must be finite and > 0, got {radius}"),
            ));
        }

        Ok(Self {
            name,
            body_type: None,
            mass,
            radius,
            obliquity: 0.0,
            position: Vector::zeros(),
            velocity: Vector::zeros(),
            acceleration: Vector::zeros(),
            rotation_angle: 0.0,
            angular_velocity: 0.0,
        })
    }

    /// Derive the sidereal angular velocity from the equatorial surface speed (m/s)
    pub fn with_rotational_velocity(mut self, rotational_velocity: f64) -> EngineResult<Self> {
        if !rotational_velocity.is_finite() {
            return Err(EngineError::invalid_parameter(
                format!("{}.rotational_velocity", self.name),
                "must be finite",
            ));
        }
        self.angular_velocity = rotational_velocity * 360.0 / (2.0 * PI * self.radius);
        Ok(self)
    }

    pub fn with_obliquity(mut self, degrees: f64) -> Self {
        self.obliquity = degrees;
        self
    }

    pub fn with_type(mut self, body_type: BodyType) -> Self {
        self.body_type = Some(body_type);
        self
    }

    /// Builder form of [`Body::configure`]
    pub fn with_state(mut self, state: BodyState) -> Self {
        self.configure(state);
        self
    }

    /// Overwrite the kinematic fields named in `state`
    pub fn configure(&mut self, state: BodyState) {
        if let Some(p) = state.position {
            self.position = p;
        }
        if let Some(v) = state.velocity {
            self.velocity = v;
        }
        if let Some(a) = state.acceleration {
            self.acceleration = a;
        }
        if let Some(angle) = state.angle {
            self.rotation_angle = angle.rem_euclid(360.0);
        }
        if let Some(w) = state.angular_velocity {
            self.angular_velocity = w;
        }
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn obliquity(&self) -> f64 {
        self.obliquity
    }

    pub fn is_star(&self) -> bool {
        self.body_type == Some(BodyType::Star)
    }

    pub fn momentum(&self) -> Vector {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.norm_squared()
    }

    pub fn reset_acceleration(&mut self) {
        self.acceleration = Vector::zeros();
    }

    /// Newton's second law: acceleration += Σforces / mass.
    /// Accumulates, so it may be called several times per step.
    pub fn update_force_acceleration(&mut self, forces: &[Vector]) {
        let sum = forces.iter().fold(Vector::zeros(), |acc, f| acc + *f);
        self.acceleration += sum / self.mass;
    }

    /// Semi-implicit Euler: the position update uses the new velocity
    pub fn update_motion(&mut self, dt: f64) {
        self.velocity += self.acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Trapezoidal update: the position moves with the mean of old and new velocity
    pub fn update_kinematic_motion(&mut self, dt: f64) {
        let previous = self.velocity;
        self.velocity += self.acceleration * dt;
        self.position += (self.velocity + previous) * (0.5 * dt);
    }

    pub fn update_rotation(&mut self, dt: f64) {
        self.rotation_angle = (self.rotation_angle + self.angular_velocity * dt).rem_euclid(360.0);
    }
}

#[derive(Debug, Clone)]
pub struct BodySystem {
    bodies: Vec<Body>,
    t: f64, // elapsed simulated seconds
    gravity: NewtonianGravity,
    integrator: Integrator,
}

impl BodySystem {
    pub fn new(gravity: NewtonianGravity) -> Self {
        Self {
            bodies: Vec::new(),
            t: 0.0,
            gravity,
            integrator: Integrator::default(),
        }
    }

    pub fn with_integrator(mut self, integrator: Integrator) -> Self {
        self.integrator = integrator;
        self
    }

    pub fn set_integrator(&mut self, integrator: Integrator) {
        self.integrator = integrator;
    }

    pub fn integrator(&self) -> Integrator {
        self.integrator
    }

    pub fn gravity(&self) -> &NewtonianGravity {
        &self.gravity
    }

    pub fn time(&self) -> f64 {
        self.t
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Body> {
        self.bodies.iter()
    }

    pub fn add_body(&mut self, body: Body) {
        log::debug!("adding body `{}` (m = {:.3e} kg)", body.name, body.mass());
        self.bodies.push(body);
    }

    /// Remove the first body equal to `body`. Indices after it shift down.
    pub fn remove_body(&mut self, body: &Body) -> EngineResult<Body> {
        let i = self
            .bodies
            .iter()
            .position(|b| b == body)
            .ok_or_else(|| EngineError::NotFound(body.name.clone()))?;
        Ok(self.bodies.remove(i))
    }

    pub fn search_by_index(&self, i: usize) -> Option<&Body> {
        self.bodies.get(i)
    }

    /// First body called `name`
    pub fn search_by_name(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.name == name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.bodies.iter().position(|b| b.name == name)
    }

    pub fn body_mut(&mut self, name: &str) -> EngineResult<&mut Body> {
        self.bodies
            .iter_mut()
            .find(|b| b.name == name)
            .ok_or_else(|| EngineError::NotFound(name.to_string()))
    }

    /// Advance every body by `dt` simulated seconds.
    ///
    /// Pair forces are evaluated and validated first; if any pair is
    /// singular the call fails and no body is touched.
    pub fn update(&mut self, dt: f64) -> EngineResult<()> {
        if !dt.is_finite() {
            return Err(EngineError::invalid_parameter("dt", format!("must be finite, got {dt}")));
        }

        let forces = self.gravity.pairwise_forces(&self.bodies)?;

        for body in self.bodies.iter_mut() {
            body.reset_acceleration();
        }
        for (body, f) in self.bodies.iter_mut().zip(forces.iter()) {
            body.update_force_acceleration(f);
        }
        for body in self.bodies.iter_mut() {
            self.integrator.integrate(body, dt);
            body.update_rotation(dt);
        }

        self.t += dt;
        Ok(())
    }

    /// Detached deep copy for readers
    pub fn snapshot(&self) -> BodySystem {
        self.clone()
    }

    pub fn total_momentum(&self) -> Vector {
        self.bodies
            .iter()
            .fold(Vector::zeros(), |acc, b| acc + b.momentum())
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(Body::mass).sum()
    }

    pub fn center_of_mass(&self) -> Option<Vector> {
        if self.bodies.is_empty() {
            return None;
        }
        let m = self.total_mass();
        let weighted = self
            .bodies
            .iter()
            .fold(Vector::zeros(), |acc, b| acc + b.position * b.mass());
        Some(weighted / m)
    }

    /// Kinetic plus gravitational potential energy (J)
    pub fn total_energy(&self) -> EngineResult<f64> {
        let kinetic: f64 = self.bodies.iter().map(Body::kinetic_energy).sum();
        Ok(kinetic + self.gravity.potential_energy(&self.bodies)?)
    }
}

impl<'a> IntoIterator for &'a BodySystem {
    type Item = &'a Body;
    type IntoIter = std::slice::Iter<'a, Body>;

    fn into_iter(self) -> Self::IntoIter {
        self.bodies.iter()
    }
}
