//! Core module - The flattening algorithm and its surroundings
//!
//! This module provides:
//! - Structural classification of nested values (element)
//! - Mapping policy and flattening options (policy)
//! - The lazy flattener (flatten)
//! - serde_json support (json)
//! - Input loading and output rendering (input, render)

pub mod element;
pub mod flatten;
pub mod input;
pub mod json;
pub mod policy;
pub mod render;
