//! Layout options and their environment overrides.
//!
//! Every constant that shapes the layout (node width, gaps, generation
//! height) is a tunable here rather than a rule baked into the algorithm.
//! `from_env` reads each variable and falls back to the default when it is
//! absent or does not parse.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_GENERATION_HEIGHT, DEFAULT_NODE_WIDTH, DEFAULT_SIBLING_GAP, DEFAULT_SPOUSE_GAP};
use crate::error::KinshipError;

/// How generation 0 is chosen when no explicit root is given.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootPolicy {
    /// Parentless person with the earliest birth date; undated persons sort
    /// last, ties go to input order.
    #[default]
    EarliestBirth,
    /// Parentless person with the most descendants; ties go to input order.
    LargestFamily,
    /// First person in input order.
    FirstListed,
}

impl RootPolicy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EarliestBirth => "earliest_birth",
            Self::LargestFamily => "largest_family",
            Self::FirstListed => "first_listed",
        }
    }
}

impl fmt::Display for RootPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RootPolicy {
    type Err = KinshipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "earliest_birth" => Ok(Self::EarliestBirth),
            "largest_family" => Ok(Self::LargestFamily),
            "first_listed" => Ok(Self::FirstListed),
            other => Err(KinshipError::InvalidRootPolicy(other.to_owned())),
        }
    }
}

/// Where persons go when the recursion from the root never reaches them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disconnected {
    /// One row below the deepest generation, left to right in input order,
    /// with no edges.
    #[default]
    OverflowRow,
    /// Each unreached family is rooted by the same policy and laid out to the
    /// right of the previous one, with its own edges.
    SideBySide,
}

/// Caller-facing layout options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutOptions {
    /// Explicit generation-0 person. Overrides `root_policy`.
    pub root_id: Option<String>,
    pub node_width: f64,
    pub generation_height: f64,
    pub sibling_gap: f64,
    pub spouse_gap: f64,
    pub root_policy: RootPolicy,
    pub disconnected: Disconnected,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            root_id: None,
            node_width: DEFAULT_NODE_WIDTH,
            generation_height: DEFAULT_GENERATION_HEIGHT,
            sibling_gap: DEFAULT_SIBLING_GAP,
            spouse_gap: DEFAULT_SPOUSE_GAP,
            root_policy: RootPolicy::default(),
            disconnected: Disconnected::default(),
        }
    }
}

impl LayoutOptions {
    /// Build options from environment variables.
    ///
    /// Optional:
    /// - `KINSHIP_ROOT_ID`
    /// - `KINSHIP_NODE_WIDTH`: default 1.0
    /// - `KINSHIP_GENERATION_HEIGHT`: default 1.5
    /// - `KINSHIP_SIBLING_GAP`: default 0.5
    /// - `KINSHIP_SPOUSE_GAP`: default 0.25
    /// - `KINSHIP_ROOT_POLICY`: `earliest_birth` (default), `largest_family`, `first_listed`
    /// - `KINSHIP_DISCONNECTED`: `overflow_row` (default) or `side_by_side`
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            root_id: std::env::var("KINSHIP_ROOT_ID").ok().filter(|v| !v.is_empty()),
            node_width: env_length("KINSHIP_NODE_WIDTH", defaults.node_width),
            generation_height: env_length("KINSHIP_GENERATION_HEIGHT", defaults.generation_height),
            sibling_gap: env_length("KINSHIP_SIBLING_GAP", defaults.sibling_gap),
            spouse_gap: env_length("KINSHIP_SPOUSE_GAP", defaults.spouse_gap),
            root_policy: env_parse("KINSHIP_ROOT_POLICY", defaults.root_policy),
            disconnected: match std::env::var("KINSHIP_DISCONNECTED").as_deref() {
                Ok("side_by_side") => Disconnected::SideBySide,
                _ => defaults.disconnected,
            },
        }
    }

    #[must_use]
    pub fn with_root(mut self, id: impl Into<String>) -> Self {
        self.root_id = Some(id.into());
        self
    }

    /// Resolve the numeric options, replacing anything unusable (negative,
    /// NaN, infinite, or a zero node width / generation height) with its
    /// default.
    pub(crate) fn metrics(&self) -> Metrics {
        Metrics {
            node_width: positive_or(self.node_width, DEFAULT_NODE_WIDTH, "node_width"),
            generation_height: positive_or(self.generation_height, DEFAULT_GENERATION_HEIGHT, "generation_height"),
            sibling_gap: non_negative_or(self.sibling_gap, DEFAULT_SIBLING_GAP, "sibling_gap"),
            spouse_gap: non_negative_or(self.spouse_gap, DEFAULT_SPOUSE_GAP, "spouse_gap"),
        }
    }
}

/// Sanitized numeric options used by the layout passes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Metrics {
    pub node_width: f64,
    pub generation_height: f64,
    pub sibling_gap: f64,
    pub spouse_gap: f64,
}

impl Metrics {
    /// Width of a person plus `spouses` partners beside them.
    #[allow(clippy::cast_precision_loss)]
    pub fn row_width(&self, spouses: usize) -> f64 {
        self.node_width + spouses as f64 * (self.node_width + self.spouse_gap)
    }
}

fn positive_or(value: f64, default: f64, name: &str) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        tracing::warn!(option = name, value, default, "unusable layout option; using default");
        default
    }
}

fn non_negative_or(value: f64, default: f64, name: &str) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        tracing::warn!(option = name, value, default, "unusable layout option; using default");
        default
    }
}

fn env_length(key: &str, default: f64) -> f64 {
    let value = env_parse(key, default);
    if value.is_finite() && value >= 0.0 { value } else { default }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
