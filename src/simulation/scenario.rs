//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) plus a data catalog and produces a
//! runtime `Scenario` containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - system state (`BodySystem` with every body placed at t = 0)
//! - initial view settings for the shared `Controls`
//!
//! A scenario is handed to a `SimulationClock`, which runs the physics thread,
//! while the presentation side reads snapshots.

use std::sync::Arc;
use std::time::Duration;

use crate::configuration::catalog::{body_from_record, ConstantsProvider, DataProvider};
use crate::configuration::config::{BodyConfig, OrbitConfig, ScenarioConfig, ViewConfig};
use crate::error::{EngineError, EngineResult};
use crate::simulation::clock::SimulationClock;
use crate::simulation::control::Controls;
use crate::simulation::engine::Engine;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, BodyState, BodySystem};
use crate::simulation::vector::Vector;

#[derive(Debug, Clone)]
pub struct Scenario {
    pub title: String,
    pub engine: Engine,
    pub parameters: Parameters,
    pub view: ViewConfig,
    pub system: BodySystem,
}

impl Scenario {
    pub fn build<C>(cfg: ScenarioConfig, catalog: &C) -> EngineResult<Self>
    where
        C: DataProvider + ConstantsProvider,
    {
        // Parameters (runtime) from ParametersConfig; G from the catalog unless overridden
        let p_cfg = &cfg.parameters;
        let g = match p_cfg.g {
            Some(g) => positive("parameters.G", g)?,
            None => catalog.constant_by_symbol("G")?,
        };
        if !(p_cfg.softening.is_finite() && p_cfg.softening >= 0.0) {
            return Err(EngineError::invalid_parameter(
                "parameters.softening",
                format!("must be finite and >= 0, got {}", p_cfg.softening),
            ));
        }
        let parameters = Parameters {
            g,
            softening: p_cfg.softening,
            unit_scale: positive("parameters.unit_scale", p_cfg.unit_scale)?,
        };

        // Engine (runtime) from EngineConfig
        let e_cfg = &cfg.engine;
        if e_cfg.max_substeps == 0 {
            return Err(EngineError::invalid_parameter("engine.max_substeps", "must be > 0"));
        }
        let engine = Engine {
            integrator: e_cfg.integrator,
            speed: positive("engine.speed", e_cfg.speed)?,
            max_step: e_cfg.max_step.map(|h| positive("engine.max_step", h)).transpose()?,
            max_substeps: e_cfg.max_substeps,
            tick: Duration::from_millis(e_cfg.tick_ms),
        };

        let mut system = BodySystem::new(parameters.gravity()).with_integrator(engine.integrator);
        for bc in &cfg.bodies {
            let body = build_body(bc, catalog, &system)?;
            system.add_body(body);
        }

        let title = cfg.title.unwrap_or_else(|| "N-body simulation".to_string());
        log::info!(
            "built scenario `{title}`: {} bodies, G = {:e}",
            system.len(),
            parameters.g
        );

        Ok(Self {
            title,
            engine,
            parameters,
            view: cfg.view,
            system,
        })
    }

    /// Shared control block seeded from the engine and view settings
    pub fn controls(&self) -> Arc<Controls> {
        let controls = Controls::new(self.engine.speed);
        controls.set_centered(self.view.centered, self.system.len());
        controls.set_body_scale(self.view.body_scale);
        controls.set_focus_scale(self.view.focus_scale);
        Arc::new(controls)
    }

    pub fn into_clock(self) -> SimulationClock {
        let controls = self.controls();
        SimulationClock::new(self.system, controls, self.engine)
    }
}

fn positive(name: &str, value: f64) -> EngineResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(EngineError::invalid_parameter(
            name,
            format!("must be finite and > 0, got {value}"),
        ))
    }
}

fn vector_from(values: &[f64], what: &str) -> EngineResult<Vector> {
    match *values {
        [x, y] => Ok(Vector::planar(x, y)),
        [x, y, z] => Ok(Vector::new(x, y, z)),
        _ => Err(EngineError::invalid_parameter(
            what,
            format!("expected 2 or 3 components, got {}", values.len()),
        )),
    }
}

fn build_body<P: DataProvider>(bc: &BodyConfig, catalog: &P, system: &BodySystem) -> EngineResult<Body> {
    let (mut body, record) = match &bc.prefab {
        Some(prefab) => {
            let mut record = catalog.body_record(prefab)?;
            if let Some(name) = &bc.name {
                record.name = name.clone();
            }
            // explicit values win over catalog data
            record.mass = bc.mass.unwrap_or(record.mass);
            record.radius = bc.radius.unwrap_or(record.radius);
            record.rotational_velocity = bc.rotational_velocity.unwrap_or(record.rotational_velocity);
            record.obliquity = bc.obliquity.unwrap_or(record.obliquity);
            record.body_type = bc.body_type.or(record.body_type);
            (body_from_record(&record)?, Some(record))
        }
        None => {
            let name = bc
                .name
                .clone()
                .ok_or_else(|| EngineError::missing("<unnamed>", "name"))?;
            let mass = bc.mass.ok_or_else(|| EngineError::missing(&name, "mass"))?;
            let radius = bc.radius.ok_or_else(|| EngineError::missing(&name, "radius"))?;
            let mut body = Body::new(name, mass, radius)?
                .with_rotational_velocity(bc.rotational_velocity.unwrap_or(0.0))?
                .with_obliquity(bc.obliquity.unwrap_or(0.0));
            if let Some(t) = bc.body_type {
                body = body.with_type(t);
            }
            (body, None)
        }
    };

    let mut state = BodyState::default();
    if let Some(orbit) = &bc.orbit {
        let record = record.ok_or_else(|| EngineError::missing(&body.name, "semimajor_axis"))?;
        let (x, v) = orbit_state(orbit, record.semimajor_axis()?, record.orbital_velocity()?, record.inclination, system)?;
        state = state.position(x).velocity(v);
    }
    if let Some(x) = &bc.x {
        state = state.position(vector_from(x, &format!("{}.x", body.name))?);
    }
    if let Some(v) = &bc.v {
        state = state.velocity(vector_from(v, &format!("{}.v", body.name))?);
    }
    if let Some(angle) = bc.angle {
        state = state.angle(angle);
    }

    body.configure(state);
    log::debug!("placed `{}` at {} moving {}", body.name, body.position, body.velocity);
    Ok(body)
}

/// Position and velocity on a circular orbit of radius `a` at speed `speed`
fn orbit_state(
    orbit: &OrbitConfig,
    a: f64,
    speed: f64,
    inclination: Option<f64>,
    system: &BodySystem,
) -> EngineResult<(Vector, Vector)> {
    let phase = orbit.phase.to_radians();
    let tilt = if orbit.inclined {
        inclination.unwrap_or(0.0).to_radians()
    } else {
        0.0
    };
    let (s, c) = phase.sin_cos();
    let (st, ct) = tilt.sin_cos();

    let mut x = Vector::new(c, s * ct, s * st) * a;
    let mut v = Vector::new(-s, c * ct, c * st) * speed;

    if let Some(parent) = &orbit.around {
        let p = system
            .search_by_name(parent)
            .ok_or_else(|| EngineError::NotFound(parent.clone()))?;
        x += p.position;
        v += p.velocity;
    }
    Ok((x, v))
}
