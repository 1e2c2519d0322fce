use crate::rigid_body::{RigidBody, Vec2};

use super::collision::{broad_phase, find_contacts, resolve, settle_stacks, Contact};

/// Speed cap (px/ms) to keep bodies from tunneling through thin boundaries.
const MAX_SPEED: f32 = 2.0;

/// Manages all rigid bodies in the scene
pub struct RigidBodySystem {
    bodies: Vec<RigidBody>,
    next_id: u32,
    iterations: u32,

    // Scratch buffers reused across steps
    order: Vec<usize>,
    pairs: Vec<(usize, usize)>,
    contacts: Vec<Contact>,
}

/// What happened during one `update`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    pub contacts: u32,
    pub pairs: u32,
}

impl RigidBodySystem {
    pub fn new() -> Self {
        Self::with_iterations(6)
    }

    pub fn with_iterations(iterations: u32) -> Self {
        Self {
            bodies: Vec::new(),
            next_id: 1,
            iterations: iterations.max(1),
            order: Vec::new(),
            pairs: Vec::new(),
            contacts: Vec::new(),
        }
    }

    /// Add a new rigid body and return its ID.
    pub fn add_body(&mut self, mut body: RigidBody) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        body.id = id;
        body.active = true;
        body.save_prev_state();
        self.bodies.push(body);
        id
    }

    /// Remove a rigid body by ID. Returns false if no such body.
    pub fn remove_body(&mut self, id: u32) -> bool {
        match self.bodies.iter().position(|b| b.id == id) {
            Some(idx) => {
                // Keep insertion order; renderers rely on it for stable draw order.
                self.bodies.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Remove every body whose ID is in `ids`. Returns how many were removed.
    pub fn remove_bodies(&mut self, ids: &[u32]) -> usize {
        let before = self.bodies.len();
        self.bodies.retain(|b| !ids.contains(&b.id));
        before - self.bodies.len()
    }

    /// Remove all bodies.
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.next_id = 1;
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn bodies(&self) -> &[RigidBody] {
        &self.bodies
    }

    pub fn body(&self, id: u32) -> Option<&RigidBody> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn body_mut(&mut self, id: u32) -> Option<&mut RigidBody> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    /// Top-most (last added) dynamic body under `point`.
    pub fn body_at(&self, point: Vec2) -> Option<u32> {
        self.bodies
            .iter()
            .rev()
            .find(|b| b.active && !b.is_static && b.contains(point))
            .map(|b| b.id)
    }

    /// Advance all bodies by `dt` milliseconds.
    ///
    /// Gravity is an acceleration of `gravity * gravity_scale` px/ms².
    pub fn update(&mut self, dt: f32, gravity: Vec2, gravity_scale: f32) -> StepReport {
        let g = gravity * gravity_scale;

        for body in self.bodies.iter_mut() {
            body.save_prev_state();
            if !body.active || body.is_static {
                body.force = Vec2::zero();
                continue;
            }

            let accel = body.force * body.inv_mass + g;
            body.velocity += accel * dt;
            body.velocity = body.velocity * (1.0 - body.material.friction_air);
            body.velocity = body.velocity.clamp_length(MAX_SPEED);
            body.pos += body.velocity * dt;
            body.force = Vec2::zero();
        }

        broad_phase(&self.bodies, &mut self.order, &mut self.pairs);
        find_contacts(&self.bodies, &self.pairs, &mut self.contacts);
        let report = StepReport {
            contacts: self.contacts.len() as u32,
            pairs: self.pairs.len() as u32,
        };

        // Corrections push bodies into new contacts; find them again each pass.
        for pass in 0..self.iterations {
            if pass > 0 {
                broad_phase(&self.bodies, &mut self.order, &mut self.pairs);
                find_contacts(&self.bodies, &self.pairs, &mut self.contacts);
            }
            if self.contacts.is_empty() {
                break;
            }
            resolve(&mut self.bodies, &self.contacts);
        }

        broad_phase(&self.bodies, &mut self.order, &mut self.pairs);
        settle_stacks(&mut self.bodies, &mut self.pairs);

        report
    }
}

impl Default for RigidBodySystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rigid_body::Material;

    const DT: f32 = 1000.0 / 60.0;

    fn ground() -> RigidBody {
        RigidBody::new_static_rect(100.0, 210.0, 400.0, 20.0, Material { friction: 0.9, ..Material::default() })
    }

    #[test]
    fn ids_are_unique_and_reset_on_clear() {
        let mut system = RigidBodySystem::new();
        let a = system.add_body(RigidBody::new_rect(0.0, 0.0, 10.0, 10.0, 0.001, Material::default()));
        let b = system.add_body(RigidBody::new_rect(0.0, 0.0, 10.0, 10.0, 0.001, Material::default()));
        assert_ne!(a, b);
        assert!(system.remove_body(a));
        assert!(!system.remove_body(a));
        assert_eq!(system.body_count(), 1);

        system.clear();
        assert_eq!(system.body_count(), 0);
        assert_eq!(system.add_body(ground()), 1);
    }

    #[test]
    fn gravity_pulls_dynamic_bodies_down() {
        let mut system = RigidBodySystem::new();
        let id = system.add_body(RigidBody::new_rect(50.0, 0.0, 10.0, 10.0, 0.001, Material::default()));
        system.update(DT, Vec2::new(0.0, 1.0), 0.001);
        assert!(system.body(id).unwrap().pos.y > 0.0);
    }

    #[test]
    fn block_comes_to_rest_on_floor() {
        let mut system = RigidBodySystem::new();
        system.add_body(ground());
        let id = system.add_body(RigidBody::new_rect(100.0, 150.0, 20.0, 20.0, 0.001, Material::default()));

        for _ in 0..600 {
            system.update(DT, Vec2::new(0.0, 1.0), 0.001);
        }

        let block = system.body(id).unwrap();
        // Floor top is at y=200; block half height is 10.
        assert!((block.pos.y - 190.0).abs() < 1.0, "block at {}", block.pos.y);
        assert!(block.velocity.length() < 0.05);
    }

    #[test]
    fn stacked_blocks_stay_stacked() {
        let mut system = RigidBodySystem::new();
        system.add_body(ground());
        let lower = system.add_body(RigidBody::new_rect(100.0, 190.0, 20.0, 20.0, 0.001, Material::default()));
        let upper = system.add_body(RigidBody::new_rect(100.0, 170.0, 20.0, 20.0, 0.001, Material::default()));

        for _ in 0..300 {
            system.update(DT, Vec2::new(0.0, 1.0), 0.001);
        }

        let lower = system.body(lower).unwrap().pos;
        let upper = system.body(upper).unwrap().pos;
        assert!(upper.y < lower.y);
        assert!((lower.y - upper.y - 20.0).abs() < 0.01);
        assert!((upper.x - 100.0).abs() < 1.0);
    }

    #[test]
    fn tall_column_does_not_compress() {
        let mut system = RigidBodySystem::new();
        system.add_body(ground());
        let ids: Vec<u32> = (0..30)
            .map(|i| {
                let y = 190.0 - i as f32 * 20.0;
                system.add_body(RigidBody::new_rect(100.0, y, 18.0, 18.0, 0.001, Material::default()))
            })
            .collect();

        for _ in 0..600 {
            system.update(DT, Vec2::new(0.0, 1.0), 0.001);
        }

        let bottom = system.body(ids[0]).unwrap();
        assert!((bottom.max().y - 200.0).abs() < 0.01, "bottom block at {}", bottom.max().y);
        for pair in ids.windows(2) {
            let lower = system.body(pair[0]).unwrap();
            let upper = system.body(pair[1]).unwrap();
            let gap = lower.min().y - upper.max().y;
            assert!(gap.abs() < 0.01, "blocks {} and {} overlap by {}", pair[0], pair[1], -gap);
            assert!(upper.velocity.length() < 0.02);
        }
    }

    #[test]
    fn body_at_picks_latest_dynamic() {
        let mut system = RigidBodySystem::new();
        system.add_body(ground());
        let first = system.add_body(RigidBody::new_rect(0.0, 0.0, 10.0, 10.0, 0.001, Material::default()));
        let second = system.add_body(RigidBody::new_rect(2.0, 0.0, 10.0, 10.0, 0.001, Material::default()));

        assert_eq!(system.body_at(Vec2::new(1.0, 0.0)), Some(second));
        assert_eq!(system.body_at(Vec2::new(-4.0, 0.0)), Some(first));
        // Only the static ground is here
        assert_eq!(system.body_at(Vec2::new(100.0, 210.0)), None);
    }

    #[test]
    fn remove_bodies_filters_by_id() {
        let mut system = RigidBodySystem::new();
        let ids: Vec<u32> = (0..5)
            .map(|i| system.add_body(RigidBody::new_rect(i as f32 * 20.0, 0.0, 10.0, 10.0, 0.001, Material::default())))
            .collect();
        assert_eq!(system.remove_bodies(&ids[1..4]), 3);
        let left: Vec<u32> = system.bodies().iter().map(|b| b.id).collect();
        assert_eq!(left, vec![ids[0], ids[4]]);
    }
}
