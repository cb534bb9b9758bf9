use approx::assert_relative_eq;

use gravsim::{
    prefab_body, time_unit, Body, BodyState, BodySystem, BodyType, Catalog, ConstantsProvider, Controls,
    DataProvider, EngineError, Frame, Integrator, NewtonianGravity, Scenario, ScenarioConfig, Vector,
};

const EARTH_AND_MOON: &str = include_str!("../scenarios/earth_and_moon.yaml");
const SOLAR_SYSTEM: &str = include_str!("../scenarios/solar_system.yaml");
const TRAPPIST_1: &str = include_str!("../scenarios/trappist_1.yaml");

fn build(yaml: &str) -> Result<Scenario, EngineError> {
    let cfg = ScenarioConfig::from_yaml_str(yaml).unwrap();
    Scenario::build(cfg, &Catalog::builtin().unwrap())
}

// ==================================================================================
// Catalog
// ==================================================================================

#[test]
fn builtin_catalog_has_bundled_bodies() {
    let catalog = Catalog::builtin().unwrap();
    let names: Vec<&str> = catalog.body_names().collect();
    for expected in ["Sun", "Earth", "Moon", "Neptune", "Trappist-1a", "Trappist-1h"] {
        assert!(names.contains(&expected), "missing {expected}");
    }
    assert_relative_eq!(catalog.constant_by_symbol("G").unwrap(), 6.674e-11, max_relative = 1e-12);
}

#[test]
fn every_builtin_body_is_complete() {
    let catalog = Catalog::builtin().unwrap();
    for name in catalog.body_names() {
        let body = prefab_body(name, &catalog).unwrap();
        assert!(body.mass() > 0.0 && body.radius() > 0.0, "{name}");
    }
}

#[test]
fn prefab_earth() {
    let catalog = Catalog::builtin().unwrap();
    let earth = prefab_body("Earth", &catalog).unwrap();
    assert_eq!(earth.name, "Earth");
    assert_eq!(earth.body_type, Some(BodyType::Planet));
    assert_relative_eq!(earth.mass(), 5.972e24, max_relative = 1e-12);
    assert_relative_eq!(earth.radius(), 6.371e6, max_relative = 1e-12);
    assert_relative_eq!(earth.obliquity(), 23.44);
    // 465.1 m/s at the equator is one turn a day, roughly
    let day = 360.0 / earth.angular_velocity;
    assert!((day - 86_400.0).abs() < 600.0, "day = {day}");
    assert_eq!(earth.position, Vector::zeros());
}

#[test]
fn unknown_prefab_is_not_found() {
    let catalog = Catalog::builtin().unwrap();
    assert!(matches!(
        prefab_body("Vulcan", &catalog),
        Err(EngineError::NotFound(name)) if name == "Vulcan"
    ));
    assert!(matches!(catalog.body_record("Vulcan"), Err(EngineError::NotFound(_))));
}

// ==================================================================================
// Scenarios
// ==================================================================================

#[test]
fn bundled_scenarios_build() {
    let earth_moon = build(EARTH_AND_MOON).unwrap();
    assert_eq!(earth_moon.system.len(), 2);
    assert_eq!(earth_moon.engine.max_step, Some(60.0));

    let solar = build(SOLAR_SYSTEM).unwrap();
    assert_eq!(solar.system.len(), 9);
    assert!(solar.system.bodies()[0].is_star());

    let trappist = build(TRAPPIST_1).unwrap();
    assert_eq!(trappist.system.len(), 8);
}

#[test]
fn moon_is_placed_on_its_orbit() {
    let scenario = build(EARTH_AND_MOON).unwrap();
    let moon = scenario.system.search_by_name("Moon").unwrap();
    assert_relative_eq!(moon.position, Vector::new(3.844e8, 0.0, 0.0), max_relative = 1e-12);
    assert_relative_eq!(moon.velocity, Vector::new(0.0, 1022.0, 0.0), max_relative = 1e-12);
    assert_relative_eq!(scenario.parameters.g, 6.674e-11, max_relative = 1e-12);
}

#[test]
fn scenario_steps_without_error() {
    let mut scenario = build(TRAPPIST_1).unwrap();
    for _ in 0..100 {
        scenario.system.update(30.0).unwrap();
    }
    assert_relative_eq!(scenario.system.time(), 3000.0, epsilon = 1e-9);
}

#[test]
fn orbit_phase_and_parent_offset() {
    let yaml = r#"
parameters:
  G: 1.0e-10
engine:
  integrator: kinematic
bodies:
  - prefab: Earth
    x: [1.0e11, 0.0]
    v: [0.0, 3.0e4]
  - prefab: Moon
    orbit: { phase: 90.0, around: Earth }
"#;
    let scenario = build(yaml).unwrap();
    assert_eq!(scenario.parameters.g, 1.0e-10);
    assert_eq!(scenario.system.integrator(), Integrator::AverageVelocity);

    let moon = scenario.system.search_by_name("Moon").unwrap();
    assert_relative_eq!(moon.position, Vector::new(1.0e11, 3.844e8, 0.0), epsilon = 1e-3);
    assert_relative_eq!(moon.velocity, Vector::new(-1022.0, 3.0e4, 0.0), epsilon = 1e-9);
}

#[test]
fn manual_body_with_overrides() {
    let yaml = r#"
parameters:
  G: 1.0
bodies:
  - name: Probe
    type: moon
    mass: 10.0
    radius: 1.0
    x: [1.0, 2.0, 3.0]
    angle: 370.0
  - prefab: Earth
    name: Terra
    mass: 1.0e24
"#;
    let scenario = build(yaml).unwrap();
    let probe = scenario.system.search_by_index(0).unwrap();
    assert_eq!(probe.name, "Probe");
    assert_eq!(probe.body_type, Some(BodyType::Moon));
    assert_eq!(probe.position, Vector::new(1.0, 2.0, 3.0));
    assert_relative_eq!(probe.rotation_angle, 10.0, epsilon = 1e-9);

    let terra = scenario.system.search_by_name("Terra").unwrap();
    assert_eq!(terra.mass(), 1.0e24);
    assert!(scenario.system.search_by_name("Earth").is_none());
}

#[test]
fn manual_body_without_mass_is_missing_data() {
    let yaml = r#"
bodies:
  - name: Ghost
    radius: 1.0
"#;
    match build(yaml) {
        Err(EngineError::MissingData { body, field }) => {
            assert_eq!(body, "Ghost");
            assert_eq!(field, "mass");
        }
        other => panic!("expected MissingData, got {other:?}"),
    }
}

#[test]
fn orbit_around_unknown_parent_is_not_found() {
    let yaml = r#"
bodies:
  - prefab: Moon
    orbit: { around: Earth }
"#;
    assert!(matches!(build(yaml), Err(EngineError::NotFound(name)) if name == "Earth"));
}

#[test]
fn orbit_without_orbital_data_is_missing_data() {
    let yaml = r#"
bodies:
  - prefab: Sun
    orbit: { phase: 0.0 }
"#;
    assert!(matches!(build(yaml), Err(EngineError::MissingData { .. })));
}

#[test]
fn non_physical_scenario_values_are_refused() {
    let bad_speed = r#"
engine:
  speed: 0.0
bodies: []
"#;
    assert!(matches!(build(bad_speed), Err(EngineError::InvalidParameter { .. })));

    let bad_mass = r#"
bodies:
  - name: Void
    mass: -1.0
    radius: 1.0
"#;
    assert!(matches!(build(bad_mass), Err(EngineError::InvalidParameter { .. })));

    let cases = [
        ("parameters.softening", "parameters: { softening: -1.0e30 }"),
        ("parameters.unit_scale", "parameters: { unit_scale: 0.0 }"),
        ("parameters.G", "parameters: { G: -6.674e-11 }"),
        ("engine.max_step", "engine: { max_step: -5.0 }"),
        ("engine.max_substeps", "engine: { max_substeps: 0 }"),
    ];
    for (field, section) in cases {
        let yaml = format!("{section}\nbodies:\n  - prefab: Earth\n  - prefab: Moon\n    orbit: {{}}\n");
        match build(&yaml) {
            Err(EngineError::InvalidParameter { name, .. }) => assert_eq!(name, field),
            other => panic!("{field}: expected InvalidParameter, got {other:?}"),
        }
    }
}

#[test]
fn scenario_seeds_controls() {
    let yaml = r#"
engine:
  speed: 50.0
view:
  centered: 3
  body_scale: 20.0
bodies:
  - prefab: Earth
  - prefab: Moon
    orbit: {}
"#;
    let scenario = build(yaml).unwrap();
    let controls = scenario.controls();
    assert_eq!(controls.speed(), 50.0);
    assert_eq!(controls.centered(), 1);
    assert_eq!(controls.body_scale(), 20.0);
    assert_eq!(controls.focus_scale(), 1.0);
}

// ==================================================================================
// Frames
// ==================================================================================

fn star_and_planet() -> BodySystem {
    let mut sys = BodySystem::new(NewtonianGravity::new(1.0));
    sys.add_body(
        Body::new("star", 1.0e3, 2.0e8)
            .unwrap()
            .with_type(BodyType::Star)
            .with_state(BodyState::default().position(Vector::new(1.0e9, 0.0, 0.0))),
    );
    sys.add_body(
        Body::new("planet", 1.0, 1.0e7)
            .unwrap()
            .with_type(BodyType::Planet)
            .with_state(BodyState::default().position(Vector::new(2.0e9, 1.0e9, 0.0))),
    );
    sys
}

#[test]
fn frame_is_centered_and_scaled() {
    let sys = star_and_planet();
    let controls = Controls::default();
    controls.set_body_scale(2.0);
    controls.set_focus_scale(0.5);

    let frame = Frame::capture(&sys, &controls, 1.0e8);
    assert_eq!(frame.centered.as_deref(), Some("star"));
    assert_eq!(frame.bodies[0].position, Vector::zeros());
    assert_relative_eq!(frame.bodies[1].position, Vector::new(10.0, 10.0, 0.0), epsilon = 1e-12);
    // stars get the extra focus factor
    assert_relative_eq!(frame.bodies[0].scale, 2.0 * 0.5 * 2.0);
    assert_relative_eq!(frame.bodies[1].scale, 2.0 * 0.1);

    controls.set_centered(1, sys.len());
    let frame = Frame::capture(&sys, &controls, 1.0e8);
    assert_eq!(frame.centered.as_deref(), Some("planet"));
    assert_relative_eq!(frame.bodies[0].position, Vector::new(-10.0, -10.0, 0.0), epsilon = 1e-12);
}

#[test]
fn empty_frame() {
    let sys = BodySystem::new(NewtonianGravity::default());
    let frame = Frame::capture(&sys, &Controls::default(), 1.0);
    assert!(frame.bodies.is_empty());
    assert_eq!(frame.centered, None);
}

#[test]
fn time_units() {
    assert_eq!(time_unit(30.0), (30.0, "s"));
    assert_eq!(time_unit(7_200.0), (2.0, "h"));
    assert_eq!(time_unit(172_800.0), (2.0, "d"));
    assert_eq!(time_unit(1_209_600.0), (2.0, "w"));
    assert_eq!(time_unit(63_113_472.0), (2.0, "y"));
    assert_eq!(time_unit(6_311_347_200.0), (2.0, "c"));
}
