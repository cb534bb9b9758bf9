//! Per-frame view data handed to a renderer.
//!
//! A `Frame` is built from a snapshot only, never from the live system.
//! Positions are relative to the centered body and expressed in display
//! units (`unit_scale` metres each).

use crate::simulation::control::Controls;
use crate::simulation::states::{BodySystem, BodyType};
use crate::simulation::vector::Vector;

#[derive(Debug, Clone, PartialEq)]
pub struct BodyView {
    pub name: String,
    pub body_type: Option<BodyType>,
    pub position: Vector,    // display units, centered body at the origin
    pub obliquity: f64,      // degrees
    pub rotation_angle: f64, // degrees
    pub scale: f64,          // display radius
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub sim_time: f64, // seconds simulated so far
    pub delta: f64,    // simulated seconds of the last clock iteration
    pub centered: Option<String>,
    pub bodies: Vec<BodyView>,
}

impl Frame {
    pub fn capture(snapshot: &BodySystem, controls: &Controls, unit_scale: f64) -> Self {
        let centered = if snapshot.is_empty() {
            None
        } else {
            snapshot.search_by_index(controls.centered() % snapshot.len())
        };
        let origin = centered.map(|b| b.position).unwrap_or_default();
        let body_scale = controls.body_scale();
        let focus_scale = controls.focus_scale();

        let bodies = snapshot
            .iter()
            .map(|b| {
                let mut scale = body_scale * b.radius() / unit_scale;
                if b.is_star() {
                    scale *= focus_scale;
                }
                BodyView {
                    name: b.name.clone(),
                    body_type: b.body_type,
                    position: (b.position - origin) / unit_scale,
                    obliquity: b.obliquity(),
                    rotation_angle: b.rotation_angle,
                    scale,
                }
            })
            .collect();

        Self {
            sim_time: snapshot.time(),
            delta: controls.last_delta(),
            centered: centered.map(|b| b.name.clone()),
            bodies,
        }
    }
}

/// Express a duration in seconds in the largest unit that keeps it >= 1
pub fn time_unit(seconds: f64) -> (f64, &'static str) {
    const HOUR: f64 = 3_600.0;
    const DAY: f64 = 86_400.0;
    const WEEK: f64 = 604_800.0;
    const YEAR: f64 = 31_556_736.0;
    const CENTURY: f64 = 3_155_673_600.0;

    if seconds < HOUR {
        (seconds, "s")
    } else if seconds < DAY {
        (seconds / HOUR, "h")
    } else if seconds < WEEK {
        (seconds / DAY, "d")
    } else if seconds < YEAR {
        (seconds / WEEK, "w")
    } else if seconds < CENTURY {
        (seconds / YEAR, "y")
    } else {
        (seconds / CENTURY, "c")
    }
}
