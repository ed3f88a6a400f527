use eframe::egui::{Vec2, vec2};
use rand::Rng;
use rand::rngs::StdRng;

use super::quadtree::QuadNode;

/// Offset used when two bodies sit on exactly the same spot, so that they
/// still push each other in some direction.
fn separation_jitter(rng: &mut StdRng) -> Vec2 {
    vec2(
        (rng.random::<f32>() - 0.5) / 50.0,
        (rng.random::<f32>() - 0.5) / 50.0,
    )
}

fn nonzero_delta(delta: Vec2, rng: &mut StdRng) -> (Vec2, f32) {
    let distance = delta.length();
    if distance > 0.0 {
        return (delta, distance);
    }

    let jitter = separation_jitter(rng);
    (jitter, jitter.length().max(f32::MIN_POSITIVE))
}

pub(super) struct GravityParams {
    pub(super) gravity: f32,
    pub(super) theta: f32,
}

/// Coulomb force on body `index` from every other body, with far-away cells
/// collapsed to their centre of mass.
pub(super) fn accumulate_gravity_for_body(
    node: &QuadNode,
    index: usize,
    positions: &[Vec2],
    masses: &[f32],
    params: &GravityParams,
    rng: &mut StdRng,
    force: &mut Vec2,
) {
    if node.mass <= 0.0 {
        return;
    }

    let point = positions[index];
    let body_mass = masses[index];

    if node.is_leaf() {
        for &other_index in &node.indices {
            if other_index == index {
                continue;
            }
            let (delta, distance) = nonzero_delta(positions[other_index] - point, rng);
            let strength = params.gravity * masses[other_index] * body_mass
                / (distance * distance * distance);
            *force += delta * strength;
        }
        return;
    }

    let (delta, distance) = nonzero_delta(node.center_of_mass - point, rng);
    let can_approximate =
        !node.bounds.contains(point) && (node.bounds.side_length() / distance) < params.theta;

    if can_approximate {
        let strength = params.gravity * node.mass * body_mass / (distance * distance * distance);
        *force += delta * strength;
        return;
    }

    for child in node.children.iter().flatten() {
        accumulate_gravity_for_body(child, index, positions, masses, params, rng, force);
    }
}

/// Hooke force along a link; returns the force on the `from` body (the `to`
/// body receives the opposite).
pub(super) fn spring_force(
    from: Vec2,
    to: Vec2,
    spring_length: f32,
    spring_coeff: f32,
    rng: &mut StdRng,
) -> Vec2 {
    let (delta, distance) = nonzero_delta(to - from, rng);
    let stretch = distance - spring_length;
    delta * (spring_coeff * stretch / distance)
}

pub(super) fn drag_force(velocity: Vec2, drag_coeff: f32) -> Vec2 {
    -velocity * drag_coeff
}
