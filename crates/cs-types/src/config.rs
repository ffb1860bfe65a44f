use serde::{Deserialize, Serialize};

use crate::errors::{CsResult, PartitionError};
use crate::config_error;

pub const DEFAULT_NUM_PAIRS: usize = 100;
pub const DEFAULT_TOP_N: usize = 3;

pub const ENV_NUM_PAIRS: &str = "CLASSSPLIT_NUM_PAIRS";
pub const ENV_TOP_N: &str = "CLASSSPLIT_TOP_N";
pub const ENV_SEED: &str = "CLASSSPLIT_SEED";
pub const ENV_PARALLEL: &str = "CLASSSPLIT_PARALLEL";

/// How the randomized restarts are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// One restart after the other on the calling thread.
    Sequential,
    /// Restarts spread over the rayon thread pool.
    Parallel,
}

impl Default for ExecutionMode {
    fn default() -> Self {
        Self::Sequential
    }
}

/// Parameters of one partitioning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionConfig {
    /// Number of randomized restarts, and the cap on the pool size.
    pub num_pairs: usize,

    /// Number of candidates returned after ranking.
    pub top_n: usize,

    /// Seed for the restart permutations. `None` draws a fresh seed per run.
    pub seed: Option<u64>,

    pub execution: ExecutionMode,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            num_pairs: DEFAULT_NUM_PAIRS,
            top_n: DEFAULT_TOP_N,
            seed: None,
            execution: ExecutionMode::Sequential,
        }
    }
}

impl PartitionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_num_pairs(mut self, n: usize) -> Self {
        self.num_pairs = n;
        self
    }

    pub fn with_top_n(mut self, n: usize) -> Self {
        self.top_n = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_execution(mut self, execution: ExecutionMode) -> Self {
        self.execution = execution;
        self
    }

    pub fn validate(&self) -> CsResult<()> {
        if self.num_pairs == 0 {
            return Err(PartitionError::InvalidConfig {
                message: "num_pairs must be at least 1".to_string(),
            }
            .into());
        }
        if self.top_n == 0 {
            return Err(PartitionError::InvalidConfig {
                message: "top_n must be at least 1".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Read overrides from the process environment.
    pub fn from_env() -> CsResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through `lookup`; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> CsResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_NUM_PAIRS) {
            config.num_pairs = parse_number(ENV_NUM_PAIRS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_TOP_N) {
            config.top_n = parse_number(ENV_TOP_N, &raw)?;
        }
        if let Some(raw) = lookup(ENV_SEED) {
            config.seed = Some(parse_number(ENV_SEED, &raw)?);
        }
        if let Some(raw) = lookup(ENV_PARALLEL) {
            config.execution = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => ExecutionMode::Parallel,
                "0" | "false" | "no" | "off" | "" => ExecutionMode::Sequential,
                other => {
                    return Err(config_error!(
                        "{ENV_PARALLEL}: expected a boolean, got '{other}'"
                    ))
                }
            };
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> CsResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| config_error!("{key}: expected a non-negative integer, got '{raw}'"))
}
