//! Stateful systems driven by the scene each step.

pub mod mouse_constraint;
pub mod rigid_body;
pub mod rigid_body_system;
pub mod shimmer;
