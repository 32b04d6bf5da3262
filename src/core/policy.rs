//! Flattening options
//!
//! The mapping policy decides what happens to mapping containers at every
//! depth; text decomposition decides whether strings split into units.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::UnknownPolicy;

/// How mapping containers are treated during flattening
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingPolicy {
    /// Omit mappings and everything inside them
    #[default]
    Drop,
    /// Emit each mapping whole, as a single leaf
    Keep,
    /// Flatten each mapping's values
    FlattenValues,
    /// Flatten each mapping's key/value pairs
    FlattenItems,
}

impl MappingPolicy {
    pub const ALL: [MappingPolicy; 4] = [
        MappingPolicy::Drop,
        MappingPolicy::Keep,
        MappingPolicy::FlattenValues,
        MappingPolicy::FlattenItems,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MappingPolicy::Drop => "drop",
            MappingPolicy::Keep => "keep",
            MappingPolicy::FlattenValues => "flatten_values",
            MappingPolicy::FlattenItems => "flatten_items",
        }
    }

    /// Resolve a policy name without failing.
    ///
    /// Unknown names fall back to [`MappingPolicy::Drop`]; a warning event is
    /// emitted and the advisory is returned alongside the policy.
    pub fn resolve(raw: &str) -> (Self, Option<UnknownPolicy>) {
        match raw.parse::<MappingPolicy>() {
            Ok(policy) => (policy, None),
            Err(advisory) => {
                tracing::warn!("{advisory}");
                (Self::default(), Some(advisory))
            }
        }
    }
}

impl fmt::Display for MappingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MappingPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "drop" => Ok(MappingPolicy::Drop),
            "keep" => Ok(MappingPolicy::Keep),
            "flatten_values" => Ok(MappingPolicy::FlattenValues),
            "flatten_items" => Ok(MappingPolicy::FlattenItems),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}

/// Options for one flattening call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FlattenOptions {
    /// Split text into single-unit leaves; empty text yields nothing
    pub flatten_text: bool,
    pub mapping_policy: MappingPolicy,
}

impl FlattenOptions {
    pub fn new(flatten_text: bool, mapping_policy: MappingPolicy) -> Self {
        Self {
            flatten_text,
            mapping_policy,
        }
    }

    pub fn with_flatten_text(mut self, flatten_text: bool) -> Self {
        self.flatten_text = flatten_text;
        self
    }

    pub fn with_mapping_policy(mut self, mapping_policy: MappingPolicy) -> Self {
        self.mapping_policy = mapping_policy;
        self
    }
}
