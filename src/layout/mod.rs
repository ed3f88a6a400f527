//! Force-directed layout: springs along links, Coulomb repulsion between all
//! bodies (Barnes-Hut approximated) and velocity drag, integrated with
//! explicit Euler steps.

mod forces;
mod quadtree;
mod settings;

use eframe::egui::{Vec2, vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::network::ContactNetwork;
use forces::{GravityParams, accumulate_gravity_for_body, drag_force, spring_force};
use quadtree::QuadNode;
pub use settings::{LayoutParam, LayoutSettings};

const LAYOUT_SEED: u64 = 42;
const STABLE_THRESHOLD: f32 = 0.009;
const MAX_SPEED: f32 = 1.0;

#[derive(Clone, Debug)]
struct Body {
    pos: Vec2,
    velocity: Vec2,
    force: Vec2,
    mass: f32,
    pinned: bool,
}

pub struct ForceLayout {
    settings: LayoutSettings,
    bodies: Vec<Body>,
    links: Vec<(usize, usize)>,
    rng: StdRng,
    positions: Vec<Vec2>,
    masses: Vec<f32>,
}

impl ForceLayout {
    pub fn new(network: &ContactNetwork, settings: LayoutSettings) -> Self {
        let mut rng = StdRng::seed_from_u64(LAYOUT_SEED);
        let node_count = network.node_count();
        let mut bodies: Vec<Body> = Vec::with_capacity(node_count);
        let mut placed_min = vec2(f32::INFINITY, f32::INFINITY);
        let mut placed_max = vec2(f32::NEG_INFINITY, f32::NEG_INFINITY);

        for index in 0..node_count {
            let anchor = network
                .neighbors(index)
                .iter()
                .copied()
                .find(|&neighbor| neighbor < index)
                .map(|neighbor| bodies[neighbor].pos);
            let base = anchor.unwrap_or_else(|| {
                if index == 0 {
                    Vec2::ZERO
                } else {
                    (placed_min + placed_max) * 0.5
                }
            });

            let length = settings.spring_length;
            let offset = vec2(
                rng.random::<f32>() * length - length * 0.5,
                rng.random::<f32>() * length - length * 0.5,
            );
            let pos = base + offset;
            placed_min = placed_min.min(pos);
            placed_max = placed_max.max(pos);

            bodies.push(Body {
                pos,
                velocity: Vec2::ZERO,
                force: Vec2::ZERO,
                mass: 1.0 + network.degree(index) as f32 / 3.0,
                pinned: false,
            });
        }

        let links = network
            .links()
            .iter()
            .copied()
            .filter(|&(from, to)| from != to && from < node_count && to < node_count)
            .collect();

        log::debug!(
            "layout restarted: {} bodies, {} springs, {settings:?}",
            bodies.len(),
            network.link_count()
        );

        Self {
            settings,
            bodies,
            links,
            rng,
            positions: Vec::with_capacity(node_count),
            masses: Vec::with_capacity(node_count),
        }
    }

    pub fn settings(&self) -> LayoutSettings {
        self.settings
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn position(&self, index: usize) -> Option<Vec2> {
        self.bodies.get(index).map(|body| body.pos)
    }

    pub fn positions(&self) -> impl ExactSizeIterator<Item = Vec2> + '_ {
        self.bodies.iter().map(|body| body.pos)
    }

    pub fn set_position(&mut self, index: usize, pos: Vec2) {
        if let Some(body) = self.bodies.get_mut(index) {
            body.pos = pos;
            body.velocity = Vec2::ZERO;
        }
    }

    pub fn pin(&mut self, index: usize) {
        if let Some(body) = self.bodies.get_mut(index) {
            body.pinned = true;
            body.velocity = Vec2::ZERO;
        }
    }

    pub fn unpin(&mut self, index: usize) {
        if let Some(body) = self.bodies.get_mut(index) {
            body.pinned = false;
        }
    }

    pub fn is_pinned(&self, index: usize) -> bool {
        self.bodies.get(index).is_some_and(|body| body.pinned)
    }

    /// Axis-aligned box around every body, as `(min, max)`.
    pub fn bounds(&self) -> Option<(Vec2, Vec2)> {
        let mut iter = self.bodies.iter().map(|body| body.pos);
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), pos| (min.min(pos), max.max(pos)));
        Some((min, max))
    }

    /// Advances the simulation by one time step and reports whether the
    /// layout has settled.
    pub fn step(&mut self) -> bool {
        let body_count = self.bodies.len();
        if body_count == 0 {
            return true;
        }

        self.positions.clear();
        self.masses.clear();
        for body in &mut self.bodies {
            body.force = Vec2::ZERO;
            self.positions.push(body.pos);
            self.masses.push(body.mass);
        }

        if let Some(tree) = QuadNode::build(&self.positions, &self.masses) {
            let params = GravityParams {
                gravity: self.settings.gravity,
                theta: self.settings.theta,
            };
            for (index, body) in self.bodies.iter_mut().enumerate() {
                accumulate_gravity_for_body(
                    &tree,
                    index,
                    &self.positions,
                    &self.masses,
                    &params,
                    &mut self.rng,
                    &mut body.force,
                );
            }
        }

        for body in &mut self.bodies {
            body.force += drag_force(body.velocity, self.settings.drag_coeff);
        }

        for &(from, to) in &self.links {
            let force = spring_force(
                self.bodies[from].pos,
                self.bodies[to].pos,
                self.settings.spring_length,
                self.settings.spring_coeff,
                &mut self.rng,
            );
            self.bodies[from].force += force;
            self.bodies[to].force -= force;
        }

        self.integrate() <= STABLE_THRESHOLD
    }

    fn integrate(&mut self) -> f32 {
        let time_step = self.settings.time_step;
        let mut total_dx = 0.0_f32;
        let mut total_dy = 0.0_f32;

        for body in &mut self.bodies {
            if body.pinned {
                continue;
            }

            body.velocity += body.force * (time_step / body.mass);
            let speed = body.velocity.length();
            if speed > MAX_SPEED {
                body.velocity /= speed;
            }

            let displacement = body.velocity * time_step;
            body.pos += displacement;
            total_dx += displacement.x.abs();
            total_dy += displacement.y.abs();
        }

        (total_dx * total_dx + total_dy * total_dy) / self.bodies.len() as f32
    }
}
