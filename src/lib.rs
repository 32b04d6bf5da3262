//! nestflat - lazily flatten arbitrarily nested data
//!
//! Turns a nested value into a flat, lazily computed sequence of its leaf
//! values. Two rules are configurable:
//! - whether text (strings, byte strings) splits into single units
//! - what happens to mappings: drop, keep, flatten values, or flatten items
//!
//! Any type can be flattened by implementing [`Nested`]; `serde_json::Value`
//! is supported out of the box.
//!
//! ```
//! use nestflat::{flatten, FlattenOptions, MappingPolicy};
//! use serde_json::{json, Value};
//!
//! let data = json!([0, [1, {"a": [2, 3]}], "xy"]);
//! let options = FlattenOptions::default().with_mapping_policy(MappingPolicy::FlattenValues);
//! let leaves: Vec<Value> = flatten(&data, options).map(Value::from).collect();
//! assert_eq!(leaves, vec![json!(0), json!(1), json!(2), json!(3), json!("xy")]);
//! ```

pub mod core;
pub mod error;

pub use crate::core::element::{
    classify, Children, Class, Element, MappingView, Nested, Pairs, Shape, Text,
};
pub use crate::core::flatten::{flatten, flatten_with_policy_name, Flattener};
pub use crate::core::policy::{FlattenOptions, MappingPolicy};
pub use crate::error::{FlattenError, UnknownPolicy};
