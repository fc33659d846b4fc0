//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types and spherical coordinates
//! - Keyed collections for stable mesh identity
//! - Logging utilities

pub mod math;
pub mod collections;
pub mod logging;
