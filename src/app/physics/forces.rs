use eframe::egui::{Vec2, vec2};

use super::Body;
use super::quadtree::QuadNode;

pub(super) trait Force {
    fn initialize(&mut self, _bodies: &[Body], _links: &[(usize, usize)]) {}

    fn apply(&mut self, bodies: &mut [Body], links: &[(usize, usize)], alpha: f32);
}

fn jiggle(seed: usize) -> f32 {
    let fraction = ((seed as f32) * 0.618_034 + 0.37).fract();
    (fraction - 0.5) * 1e-6
}

pub(super) struct LinkForce {
    distance: f32,
    strength: f32,
    bias: Vec<f32>,
}

impl LinkForce {
    pub(super) fn new(distance: f32, strength: f32) -> Self {
        Self {
            distance,
            strength,
            bias: Vec::new(),
        }
    }
}

impl Force for LinkForce {
    fn initialize(&mut self, bodies: &[Body], links: &[(usize, usize)]) {
        let mut degree = vec![0usize; bodies.len()];
        for &(source, target) in links {
            if source < bodies.len() && target < bodies.len() {
                degree[source] += 1;
                degree[target] += 1;
            }
        }

        self.bias = links
            .iter()
            .map(|&(source, target)| {
                let source_degree = degree.get(source).copied().unwrap_or(0) as f32;
                let target_degree = degree.get(target).copied().unwrap_or(0) as f32;
                let total = source_degree + target_degree;
                if total > 0.0 {
                    source_degree / total
                } else {
                    0.5
                }
            })
            .collect();
    }

    fn apply(&mut self, bodies: &mut [Body], links: &[(usize, usize)], alpha: f32) {
        let body_count = bodies.len();
        for (link_index, &(source, target)) in links.iter().enumerate() {
            if source >= body_count || target >= body_count || source == target {
                continue;
            }

            let source_body = bodies[source];
            let target_body = bodies[target];
            let mut delta = (target_body.position + target_body.velocity)
                - (source_body.position + source_body.velocity);
            if delta.x == 0.0 {
                delta.x = jiggle(link_index);
            }
            if delta.y == 0.0 {
                delta.y = jiggle(link_index + 1);
            }

            let length = delta.length();
            let scale = (length - self.distance) / length * alpha * self.strength;
            let pull = delta * scale;
            let bias = self.bias.get(link_index).copied().unwrap_or(0.5);

            bodies[target].velocity -= pull * bias;
            bodies[source].velocity += pull * (1.0 - bias);
        }
    }
}

pub(super) struct ManyBodyForce {
    strength: f32,
    theta: f32,
    distance_min_sq: f32,
    positions: Vec<Vec2>,
}

impl ManyBodyForce {
    pub(super) fn new(strength: f32, theta: f32, distance_min: f32) -> Self {
        Self {
            strength,
            theta,
            distance_min_sq: distance_min * distance_min,
            positions: Vec::new(),
        }
    }

    fn charge_between(&self, delta: Vec2, weight: f32, alpha: f32, seed: usize) -> Vec2 {
        let mut delta = delta;
        if delta.x == 0.0 {
            delta.x = jiggle(seed);
        }
        if delta.y == 0.0 {
            delta.y = jiggle(seed + 7);
        }

        let mut distance_sq = delta.length_sq();
        if distance_sq < self.distance_min_sq {
            distance_sq = (self.distance_min_sq * distance_sq).sqrt();
        }
        delta * (self.strength * weight * alpha / distance_sq)
    }

    fn accumulate(&self, node: &QuadNode, index: usize, alpha: f32, velocity: &mut Vec2) {
        if node.mass <= 0.0 {
            return;
        }

        let point = self.positions[index];

        if node.is_leaf() {
            for &other_index in &node.indices {
                if other_index == index {
                    continue;
                }
                let mut delta = self.positions[other_index] - point;
                if delta == Vec2::ZERO {
                    // Same offset for both bodies of a pair, opposite sign.
                    let seed = index.min(other_index) * 31 + index.max(other_index);
                    let sign = if index < other_index { 1.0 } else { -1.0 };
                    delta = vec2(jiggle(seed), jiggle(seed + 7)) * sign;
                }
                *velocity += self.charge_between(delta, 1.0, alpha, index);
            }
            return;
        }

        let delta = node.center_of_mass - point;
        let distance = delta.length().max(0.0001);
        let can_approximate =
            !node.bounds.contains(point) && (node.bounds.side_length() / distance) < self.theta;

        if can_approximate {
            *velocity += self.charge_between(delta, node.mass, alpha, index);
            return;
        }

        for child in node.children.iter().flatten() {
            self.accumulate(child, index, alpha, velocity);
        }
    }
}

impl Force for ManyBodyForce {
    fn apply(&mut self, bodies: &mut [Body], _links: &[(usize, usize)], alpha: f32) {
        if bodies.len() < 2 {
            return;
        }

        self.positions.clear();
        self.positions.extend(bodies.iter().map(|body| body.position));

        let Some(quadtree) = QuadNode::build(&self.positions) else {
            return;
        };

        for (index, body) in bodies.iter_mut().enumerate() {
            let mut velocity = body.velocity;
            self.accumulate(&quadtree, index, alpha, &mut velocity);
            body.velocity = velocity;
        }
    }
}

pub(super) struct CenterForce {
    center: Vec2,
    strength: f32,
}

impl CenterForce {
    pub(super) fn new(center: Vec2) -> Self {
        Self {
            center,
            strength: 1.0,
        }
    }
}

impl Force for CenterForce {
    fn apply(&mut self, bodies: &mut [Body], _links: &[(usize, usize)], _alpha: f32) {
        if bodies.is_empty() {
            return;
        }

        let mut centroid = Vec2::ZERO;
        for body in bodies.iter() {
            centroid += body.position;
        }
        centroid /= bodies.len() as f32;

        let shift = (centroid - self.center) * self.strength;
        if shift.length_sq() <= f32::EPSILON {
            return;
        }
        for body in bodies.iter_mut() {
            body.position -= shift;
        }
    }
}
