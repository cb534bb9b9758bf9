use std::time::Instant;

use crate::simulation::forces::NewtonianGravity;
use crate::simulation::states::{Body, BodyState, BodySystem};
use crate::simulation::vector::Vector;

/// Helper to build a deterministic system of size `n`
pub fn make_system(n: usize) -> BodySystem {
    let mut system = BodySystem::new(NewtonianGravity::new(0.1).with_softening(1e-4));

    for i in 0..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let x = Vector::new(
            (i_f * 0.37).sin() * 5.0,
            (i_f * 0.13).cos() * 5.0,
            (i_f * 0.07).sin() * 5.0,
        );
        if let Ok(body) = Body::new(format!("b{i}"), 1.0, 0.01) {
            system.add_body(body.with_state(BodyState::default().position(x)));
        }
    }

    system
}

/// Time `BodySystem::update` for a range of n
/// Paste output directly into a spreadsheet to graph
pub fn bench_update() {
    let dt = 0.001;
    println!("N,ms_per_step");

    for n in [2, 4, 8, 16, 32, 64, 128, 256, 512] {
        let mut system = make_system(n);
        let steps = if n <= 64 { 200 } else { 10 };

        // Warm up
        if let Err(err) = system.update(dt) {
            println!("{n},failed: {err}");
            continue;
        }

        let t0 = Instant::now();
        for _ in 0..steps {
            if system.update(dt).is_err() {
                break;
            }
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6}", n, ms);
    }
}
