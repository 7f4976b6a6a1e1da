mod forces;
mod quadtree;

use eframe::egui::{Vec2, vec2};
use log::debug;

use forces::{CenterForce, Force, LinkForce, ManyBodyForce};

/// While `pin` is set the integrator holds the body there.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct Body {
    pub(super) position: Vec2,
    pub(super) velocity: Vec2,
    pub(super) pin: Option<Vec2>,
}

impl Body {
    pub(super) fn at(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            pin: None,
        }
    }

    pub(super) fn pin(&mut self, position: Vec2) {
        self.pin = Some(position);
    }

    pub(super) fn unpin(&mut self) {
        self.pin = None;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct LayoutConfig {
    pub(crate) link_distance: f32,
    pub(crate) link_strength: f32,
    pub(crate) charge_strength: f32,
    pub(crate) theta: f32,
    pub(crate) charge_distance_min: f32,
    pub(crate) alpha_min: f32,
    pub(crate) alpha_decay: f32,
    pub(crate) velocity_decay: f32,
    pub(crate) drag_alpha_target: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let alpha_min = 0.001_f32;
        Self {
            link_distance: 100.0,
            link_strength: 0.7,
            charge_strength: -300.0,
            theta: 0.9,
            charge_distance_min: 1.0,
            alpha_min,
            alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
            velocity_decay: 0.4,
            drag_alpha_target: 0.3,
        }
    }
}

pub(super) struct LayoutEngine {
    config: LayoutConfig,
    center: Vec2,
    alpha: f32,
    alpha_target: f32,
    suspended: bool,
    forces: Vec<Box<dyn Force>>,
}

impl LayoutEngine {
    pub(super) fn new(config: LayoutConfig, width: f32, height: f32) -> Self {
        let center = vec2(width * 0.5, height * 0.5);
        let forces: Vec<Box<dyn Force>> = vec![
            Box::new(LinkForce::new(config.link_distance, config.link_strength)),
            Box::new(ManyBodyForce::new(
                config.charge_strength,
                config.theta,
                config.charge_distance_min,
            )),
            Box::new(CenterForce::new(center)),
        ];

        Self {
            config,
            center,
            alpha: 1.0,
            alpha_target: 0.0,
            suspended: false,
            forces,
        }
    }

    pub(super) fn config(&self) -> LayoutConfig {
        self.config
    }

    #[cfg(test)]
    pub(super) fn center(&self) -> Vec2 {
        self.center
    }

    pub(super) fn alpha(&self) -> f32 {
        self.alpha
    }

    pub(super) fn alpha_target(&self) -> f32 {
        self.alpha_target
    }

    pub(super) fn set_alpha_target(&mut self, target: f32) {
        self.alpha_target = target.clamp(0.0, 1.0);
    }

    pub(super) fn is_running(&self) -> bool {
        !self.suspended
    }

    pub(super) fn resume(&mut self) {
        self.suspended = false;
    }

    pub(super) fn restart(&mut self) {
        self.alpha = 1.0;
        self.suspended = false;
    }

    pub(super) fn bind(&mut self, bodies: &[Body], links: &[(usize, usize)]) {
        for force in &mut self.forces {
            force.initialize(bodies, links);
        }
    }

    pub(super) fn tick(&mut self, bodies: &mut [Body], links: &[(usize, usize)]) -> bool {
        if self.suspended {
            return false;
        }

        self.alpha += (self.alpha_target - self.alpha) * self.config.alpha_decay;

        for force in &mut self.forces {
            force.apply(bodies, links, self.alpha);
        }

        let retain = 1.0 - self.config.velocity_decay;
        for body in bodies.iter_mut() {
            match body.pin {
                Some(pin) => {
                    body.position = pin;
                    body.velocity = Vec2::ZERO;
                }
                None => {
                    body.velocity *= retain;
                    body.position += body.velocity;
                }
            }
        }

        if self.alpha < self.config.alpha_min {
            self.suspended = true;
            debug!("layout settled (alpha {:.4})", self.alpha);
        }

        !self.suspended
    }

    pub(super) fn initial_position(&self, index: usize) -> Vec2 {
        let radius = 10.0 * (0.5 + index as f32).sqrt();
        let angle = index as f32 * std::f32::consts::PI * (3.0 - 5.0_f32.sqrt());
        self.center + vec2(angle.cos(), angle.sin()) * radius
    }
}
