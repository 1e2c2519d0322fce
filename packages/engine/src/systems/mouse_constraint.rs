//! Pointer drag: a damped spring between the pointer and a grabbed body.

use crate::rigid_body::Vec2;
use crate::rigid_body_system::RigidBodySystem;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Grab {
    body_id: u32,
    /// Grab point in the body's local frame
    local: Vec2,
}

#[derive(Clone, Debug)]
pub struct MouseConstraint {
    stiffness: f32,
    damping: f32,
    pointer: Vec2,
    grab: Option<Grab>,
}

impl MouseConstraint {
    pub fn new(stiffness: f32, damping: f32) -> Self {
        Self {
            stiffness: stiffness.clamp(0.0, 1.0),
            damping: damping.clamp(0.0, 1.0),
            pointer: Vec2::zero(),
            grab: None,
        }
    }

    pub fn grabbed_body(&self) -> Option<u32> {
        self.grab.map(|g| g.body_id)
    }

    /// Grab whatever dynamic body is under the pointer. Returns the body ID.
    pub fn pointer_down(&mut self, bodies: &RigidBodySystem, at: Vec2) -> Option<u32> {
        self.pointer = at;
        self.grab = bodies.body_at(at).and_then(|id| {
            bodies.body(id).map(|body| Grab {
                body_id: id,
                local: body.world_to_local(at),
            })
        });
        self.grabbed_body()
    }

    pub fn pointer_move(&mut self, at: Vec2) {
        self.pointer = at;
    }

    pub fn pointer_up(&mut self) {
        self.grab = None;
    }

    /// Drop the grab if its body no longer exists (e.g. after a rebuild).
    pub fn forget_missing(&mut self, bodies: &RigidBodySystem) {
        if let Some(grab) = self.grab {
            if bodies.body(grab.body_id).is_none() {
                self.grab = None;
            }
        }
    }

    /// Pull the grabbed body towards the pointer. Call once per step before
    /// integration; `dt` in milliseconds.
    pub fn apply(&mut self, bodies: &mut RigidBodySystem, dt: f32) {
        let Some(grab) = self.grab else {
            return;
        };
        let Some(body) = bodies.body_mut(grab.body_id) else {
            self.grab = None;
            return;
        };

        let anchor = body.local_to_world(grab.local);
        let delta = self.pointer - anchor;
        let pull = delta * (self.stiffness / dt.max(f32::EPSILON));
        body.velocity = body.velocity * (1.0 - self.damping) + pull;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rigid_body::{Material, RigidBody};

    const DT: f32 = 1000.0 / 60.0;

    fn scene() -> (RigidBodySystem, u32) {
        let mut bodies = RigidBodySystem::new();
        let id = bodies.add_body(RigidBody::new_rect(50.0, 50.0, 20.0, 20.0, 0.001, Material::default()));
        (bodies, id)
    }

    #[test]
    fn grabs_only_when_over_a_body() {
        let (bodies, id) = scene();
        let mut mouse = MouseConstraint::new(0.14, 0.2);
        assert_eq!(mouse.pointer_down(&bodies, Vec2::new(0.0, 0.0)), None);
        assert_eq!(mouse.pointer_down(&bodies, Vec2::new(55.0, 45.0)), Some(id));
        mouse.pointer_up();
        assert_eq!(mouse.grabbed_body(), None);
    }

    #[test]
    fn drag_moves_body_towards_pointer() {
        let (mut bodies, id) = scene();
        let mut mouse = MouseConstraint::new(0.14, 0.2);
        mouse.pointer_down(&bodies, Vec2::new(50.0, 50.0));
        mouse.pointer_move(Vec2::new(150.0, 50.0));

        for _ in 0..120 {
            mouse.apply(&mut bodies, DT);
            bodies.update(DT, Vec2::zero(), 0.0);
        }

        let pos = bodies.body(id).unwrap().pos;
        assert!((pos.x - 150.0).abs() < 5.0, "body at {}", pos.x);
    }

    #[test]
    fn grab_is_dropped_when_body_disappears() {
        let (mut bodies, id) = scene();
        let mut mouse = MouseConstraint::new(0.14, 0.2);
        mouse.pointer_down(&bodies, Vec2::new(50.0, 50.0));
        bodies.remove_body(id);
        mouse.forget_missing(&bodies);
        assert_eq!(mouse.grabbed_body(), None);
    }
}
