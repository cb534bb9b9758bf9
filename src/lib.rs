pub mod error;
pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use error::{EngineError, EngineResult};

pub use simulation::vector::{Vector, Operand, NVec3};
pub use simulation::states::{Body, BodyState, BodySystem, BodyType};
pub use simulation::forces::{NewtonianGravity, G_SI};
pub use simulation::integrator::Integrator;
pub use simulation::engine::Engine;
pub use simulation::params::Parameters;
pub use simulation::control::{Controls, ControlCommand};
pub use simulation::clock::{advance, ClockState, RunReport, SimulationClock};
pub use simulation::scenario::Scenario;

pub use configuration::config::{EngineConfig, ParametersConfig, ViewConfig, BodyConfig, OrbitConfig, ScenarioConfig};
pub use configuration::catalog::{prefab_body, BodyRecord, Catalog, ConstantsProvider, DataProvider};

pub use visualization::{frame::{time_unit, BodyView, Frame}, terminal::run_terminal};

pub use benchmark::benchmark::bench_update;
