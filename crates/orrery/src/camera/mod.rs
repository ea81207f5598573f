//! Camera control

pub mod controller;

pub use controller::{CameraConfig, ViewCommand, ViewController};
