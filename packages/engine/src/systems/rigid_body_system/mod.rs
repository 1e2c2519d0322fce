//! RigidBodySystem - Minimal box physics for the tower scene
//!
//! Deliberately small: the scene only ever holds a few hundred axis-aligned
//! boxes stacked on a static floor between two walls.
//!
//! Current behavior:
//! - Semi-implicit Euler integration with air drag and a speed cap.
//! - Sort-and-sweep broad phase on x, AABB narrow phase. The contact
//!   normal follows the axis the bodies approached along.
//! - Iterative contact resolution (position correction + impulses with
//!   restitution and Coulomb friction), refreshing contacts every pass.
//! - A final bottom-up pass lifts stacked bodies clear of their supports.
//! - No rotation physics (angle is kept for rendering and stays 0).

mod collision;
mod system;

pub use collision::Contact;
pub use system::{RigidBodySystem, StepReport};
