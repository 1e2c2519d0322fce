//! Domain logic with no simulation state: tower geometry, colors, models and
//! configuration.

pub mod models;
pub mod palette;
pub mod settings;
pub mod tower;
