use std::time::Duration;

use eframe::egui::{Pos2, Vec2};

pub(super) const MIN_SCALE: f32 = 0.1;
pub(super) const MAX_SCALE: f32 = 4.0;
const RESET_DURATION: Duration = Duration::from_millis(750);

/// Screen position of a world point is `origin + translate + world * scale`,
/// where `origin` is the top-left of the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct ViewTransform {
    pub(super) translate: Vec2,
    pub(super) scale: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

impl ViewTransform {
    pub(super) fn world_to_screen(&self, origin: Pos2, world: Vec2) -> Pos2 {
        origin + self.translate + world * self.scale
    }

    pub(super) fn screen_to_world(&self, origin: Pos2, screen: Pos2) -> Vec2 {
        (screen - origin - self.translate) / self.scale
    }

    pub(super) fn zoom_about(&mut self, anchor: Vec2, factor: f32) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        let world = (anchor - self.translate) / self.scale;
        self.translate = anchor - world * scale;
        self.scale = scale;
    }

    pub(super) fn pan_by(&mut self, delta: Vec2) {
        self.translate += delta;
    }

    fn lerp(&self, to: &Self, t: f32) -> Self {
        Self {
            translate: self.translate + (to.translate - self.translate) * t,
            scale: self.scale + (to.scale - self.scale) * t,
        }
    }
}

struct Transition {
    from: ViewTransform,
    started: f64,
}

#[derive(Default)]
pub(super) struct Viewport {
    transform: ViewTransform,
    transition: Option<Transition>,
}

impl Viewport {
    pub(super) fn transform(&self) -> ViewTransform {
        self.transform
    }

    pub(super) fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    pub(super) fn zoom_about(&mut self, anchor: Vec2, factor: f32) {
        self.transition = None;
        self.transform.zoom_about(anchor, factor);
    }

    pub(super) fn pan_by(&mut self, delta: Vec2) {
        self.transition = None;
        self.transform.pan_by(delta);
    }

    pub(super) fn reset_view(&mut self, now: f64) {
        if self.transform == ViewTransform::default() {
            self.transition = None;
            return;
        }
        self.transition = Some(Transition {
            from: self.transform,
            started: now,
        });
    }

    pub(super) fn advance(&mut self, now: f64) -> bool {
        let Some(transition) = &self.transition else {
            return false;
        };
        let elapsed = (now - transition.started).max(0.0);
        let t = (elapsed / RESET_DURATION.as_secs_f64()).min(1.0) as f32;
        self.transform = transition
            .from
            .lerp(&ViewTransform::default(), ease_cubic_in_out(t));
        if t >= 1.0 {
            self.transform = ViewTransform::default();
            self.transition = None;
            return false;
        }
        true
    }
}

fn ease_cubic_in_out(t: f32) -> f32 {
    let t = t * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};

    use super::*;

    #[test]
    fn test_screen_world_roundtrip() {
        let transform = ViewTransform {
            translate: vec2(30.0, -10.0),
            scale: 2.0,
        };
        let origin = pos2(100.0, 50.0);
        let screen = transform.world_to_screen(origin, vec2(5.0, 5.0));
        assert_eq!(screen, pos2(140.0, 50.0));
        assert_eq!(transform.screen_to_world(origin, screen), vec2(5.0, 5.0));
    }

    #[test]
    fn test_zoom_keeps_anchor_fixed() {
        let mut transform = ViewTransform::default();
        let anchor = vec2(200.0, 100.0);
        let before = transform.screen_to_world(Pos2::ZERO, anchor.to_pos2());
        transform.zoom_about(anchor, 2.0);
        let after = transform.screen_to_world(Pos2::ZERO, anchor.to_pos2());
        assert_eq!(transform.scale, 2.0);
        assert!((before - after).length() < 1e-4);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut transform = ViewTransform::default();
        transform.zoom_about(Vec2::ZERO, 100.0);
        assert_eq!(transform.scale, MAX_SCALE);
        transform.zoom_about(Vec2::ZERO, 0.0001);
        assert_eq!(transform.scale, MIN_SCALE);
        transform.zoom_about(Vec2::ZERO, -1.0);
        assert_eq!(transform.scale, MIN_SCALE);
    }

    #[test]
    fn test_reset_animates_to_identity() {
        let mut viewport = Viewport::default();
        viewport.pan_by(vec2(100.0, 40.0));
        viewport.zoom_about(Vec2::ZERO, 3.0);

        viewport.reset_view(10.0);
        assert!(viewport.advance(10.375));
        let midway = viewport.transform();
        assert!(midway.scale > 1.0 && midway.scale < 3.0);

        assert!(!viewport.advance(10.75));
        assert_eq!(viewport.transform(), ViewTransform::default());
        assert!(!viewport.is_animating());
    }

    #[test]
    fn test_input_cancels_reset() {
        let mut viewport = Viewport::default();
        viewport.pan_by(vec2(10.0, 0.0));
        viewport.reset_view(0.0);
        viewport.pan_by(vec2(5.0, 0.0));
        assert!(!viewport.is_animating());
        assert!(!viewport.advance(1.0));
        assert_eq!(viewport.transform().translate, vec2(15.0, 0.0));
    }

    #[test]
    fn test_easing_endpoints() {
        assert_eq!(ease_cubic_in_out(0.0), 0.0);
        assert_eq!(ease_cubic_in_out(0.5), 0.5);
        assert_eq!(ease_cubic_in_out(1.0), 1.0);
    }
}
