//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - The sink capability every pipeline point implements
//! - Field splitting shared by the display stages
//! - Listing model and its renderers
//! - Common utilities

pub mod fields;
pub mod model;
pub mod render;
pub mod sink;
pub mod util;
