//! Tuning knobs for table construction and multivector multiplication.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use eddy_core::{EddyError, Result};

/// How the multiplication engine walks the operand blades.
///
/// The choice never changes results, only which blades are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Pick per call from the operands' grade keys.
    #[default]
    Auto,
    /// Visit every blade of both operands.
    Dense,
    /// Visit only blades in grades holding a non-zero coefficient.
    Sparse,
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, String> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Strategy::Auto),
            "dense" => Ok(Strategy::Dense),
            "sparse" => Ok(Strategy::Sparse),
            other => Err(format!("unknown strategy {:?} (expected auto, dense or sparse)", other)),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Auto => write!(f, "auto"),
            Strategy::Dense => write!(f, "dense"),
            Strategy::Sparse => write!(f, "sparse"),
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Blade walk used by multivector multiplication.
    pub strategy: Strategy,

    /// Minimum number of non-zero outer blades before a product runs on rayon.
    pub parallel_threshold: usize,

    /// Outer blades per parallel block; partials of one block are folded
    /// before the next starts. 0 picks four blocks' worth per rayon thread.
    pub parallel_block: usize,

    /// `Auto` goes sparse when occupied grades / grade count is at most this.
    pub sparse_grade_fraction: f32,

    /// Minimum blade count before table rows are built on rayon.
    pub table_parallel_rows: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Auto,
            parallel_threshold: 64,
            parallel_block: 0,
            sparse_grade_fraction: 0.5,
            table_parallel_rows: 64,
        }
    }
}

impl EngineConfig {
    /// Same settings with a different strategy.
    pub fn with_strategy(&self, strategy: Strategy) -> Self {
        Self { strategy, ..self.clone() }
    }

    /// Never run products on rayon.
    pub fn sequential(&self) -> Self {
        Self {
            parallel_threshold: usize::MAX,
            ..self.clone()
        }
    }

    /// Effective outer blades per parallel block, at least 1.
    pub fn block_len(&self) -> usize {
        match self.parallel_block {
            0 => rayon::current_num_threads() * 4,
            n => n,
        }
        .max(1)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.sparse_grade_fraction) {
            return Err(EddyError::InvalidConfig(format!(
                "sparse_grade_fraction {} outside [0, 1]",
                self.sparse_grade_fraction
            )));
        }
        Ok(())
    }
}
