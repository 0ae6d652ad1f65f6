#![allow(dead_code)]

pub mod fleetdeck_env;
pub mod http;
pub mod layer;
pub mod trucks;
