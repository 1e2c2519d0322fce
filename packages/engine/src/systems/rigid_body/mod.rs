//! RigidBody - an axis-aligned box that moves as a unit
//!
//! Bodies are boxes described by center + half extents. Static bodies
//! (floor, walls) have zero inverse mass and never move.

mod vec2;
mod body;

pub use vec2::Vec2;
pub use body::{Material, RigidBody};
