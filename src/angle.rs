//! Angle helpers shared by the wheel model.
//!
//! All angles are radians. Screen coordinates grow downward, so a positive angle
//! turns clockwise on screen.

use crate::wheel::{Point, Section};
use std::f64::consts::{PI, TAU};

pub const FULL_TURN: f64 = TAU;
pub const HALF_TURN: f64 = PI;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
    None,
}

/// Maps any finite angle into `[0, 2π)`.
pub fn normalize(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(FULL_TURN);
    // rem_euclid can round a tiny negative input up to exactly 2π
    if wrapped >= FULL_TURN { 0.0 } else { wrapped }
}

/// Signed shortest distance from `a` to `b`, in `(-π, π]`.
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let delta = normalize(b - a);
    if delta > HALF_TURN {
        delta - FULL_TURN
    } else {
        delta
    }
}

pub fn rotation_direction(a: f64, b: f64) -> RotationDirection {
    let delta = angular_distance(a, b);
    if delta > 0.0 {
        RotationDirection::Clockwise
    } else if delta < 0.0 {
        RotationDirection::CounterClockwise
    } else {
        RotationDirection::None
    }
}

/// Raw angle of `point` around `center`, in `(-π, π]`.
pub fn point_angle(center: Point, point: Point) -> f64 {
    let (dx, dy) = (point.x - center.x, point.y - center.y);
    dy.atan2(dx)
}

/// Whether `angle` falls in the half-open arc starting at `start` and sweeping `span`.
pub fn angle_between(start: f64, angle: f64, span: f64) -> bool {
    if span >= FULL_TURN {
        return true;
    }
    normalize(angle - start) < span
}

/// Finds the section whose `[start, end)` arc holds `normalize(angle)`.
///
/// Picks the section whose start was passed most recently, so a tiling partition
/// always yields exactly one section even when rounding lands on a seam.
pub fn section_containing(angle: f64, sections: &[Section]) -> Option<&Section> {
    let angle = normalize(angle);

    sections.iter().min_by(|a, b| {
        normalize(angle - a.start_angle).total_cmp(&normalize(angle - b.start_angle))
    })
}
