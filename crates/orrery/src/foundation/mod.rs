//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math types and composition helpers
//! - Simulation time
//! - Logging utilities

pub mod math;
pub mod time;
pub mod logging;
