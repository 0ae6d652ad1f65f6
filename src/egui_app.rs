//! egui front end: controller, retained map markers and rendering.

pub mod controller;
pub mod map_layer;
pub mod state;
pub mod ui;
