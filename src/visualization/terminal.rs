//! Headless presentation loop: prints a frame table at a fixed cadence while
//! the physics thread runs.

use std::thread;
use std::time::{Duration, Instant};

use crate::simulation::clock::{ClockState, SimulationClock};
use crate::visualization::frame::{time_unit, Frame};

pub fn run_terminal(clock: &SimulationClock, unit_scale: f64, interval: Duration, duration: Duration) {
    println!("run_terminal: reporting every {interval:?} for {duration:?}");

    let started = Instant::now();
    while started.elapsed() < duration {
        thread::sleep(interval);

        let snapshot = clock.snapshot();
        let frame = Frame::capture(&snapshot, clock.controls(), unit_scale);
        print_frame(&frame);

        if clock.state() == ClockState::Stopped {
            log::warn!("physics thread is no longer running");
            break;
        }
    }
}

fn print_frame(frame: &Frame) {
    let (t, t_unit) = time_unit(frame.sim_time);
    let (dt, dt_unit) = time_unit(frame.delta);
    println!(
        "t = {t:8.3} {t_unit}  dt = {dt:8.3} {dt_unit}  centered on {}",
        frame.centered.as_deref().unwrap_or("-")
    );
    for b in &frame.bodies {
        println!(
            "  {:<14} x = ({:>10.4}, {:>10.4}, {:>10.4})  angle = {:>7.2}  scale = {:.3e}",
            b.name,
            b.position.x(),
            b.position.y(),
            b.position.z(),
            b.rotation_angle,
            b.scale
        );
    }
}
