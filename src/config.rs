use crate::error::{Result, SampleError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const LINE_LENGTH_MAX: usize = 65536;
pub const DEFAULT_SAMPLE_SIZE_INCREMENT: usize = 10000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Replacement {
    #[default]
    Without,
    With,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderMode {
    /// Emit in final reservoir slot order.
    #[default]
    AsSampled,
    /// Emit in original file order.
    PreserveOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Backend {
    #[default]
    Mmap,
    Buffered,
    /// Buffered scan, mapped emission.
    Hybrid,
}

impl Backend {
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Mmap => "mmap",
            Backend::Buffered => "buffered",
            Backend::Hybrid => "hybrid",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sample_size: Option<usize>,
    #[serde(default)]
    pub replacement: Replacement,
    #[serde(default)]
    pub order: OrderMode,
    #[serde(default)]
    pub backend: Backend,
    pub input: PathBuf,
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,
    #[serde(default = "default_growth_increment")]
    pub growth_increment: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_max_line_length() -> usize {
    LINE_LENGTH_MAX
}
fn default_growth_increment() -> usize {
    DEFAULT_SAMPLE_SIZE_INCREMENT
}

/// Tunables that are not exposed as flags; read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tunables {
    pub max_line_length: usize,
    pub growth_increment: usize,
    pub seed: Option<u64>,
}

impl Tunables {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let max_line_length = match std::env::var("RESERVOIR_MAX_LINE_LENGTH") {
            Ok(v) => v.parse()?,
            Err(_) => default_max_line_length(),
        };
        let growth_increment = match std::env::var("RESERVOIR_GROWTH_INCREMENT") {
            Ok(v) => v.parse()?,
            Err(_) => default_growth_increment(),
        };
        let seed = match std::env::var("RESERVOIR_SEED") {
            Ok(v) => Some(v.parse()?),
            Err(_) => None,
        };

        Ok(Self {
            max_line_length,
            growth_increment,
            seed,
        })
    }
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            max_line_length: default_max_line_length(),
            growth_increment: default_growth_increment(),
            seed: None,
        }
    }
}

impl Config {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        let tunables = Tunables::default();
        Self {
            sample_size: None,
            replacement: Replacement::default(),
            order: OrderMode::default(),
            backend: Backend::default(),
            input: input.into(),
            max_line_length: tunables.max_line_length,
            growth_increment: tunables.growth_increment,
            seed: tunables.seed,
        }
    }

    pub fn with_tunables(mut self, tunables: &Tunables) -> Self {
        self.max_line_length = tunables.max_line_length;
        self.growth_increment = tunables.growth_increment;
        if self.seed.is_none() {
            self.seed = tunables.seed;
        }
        self
    }

    // 只检查取值本身，模式组合留给 pipeline
    pub fn validate(&self) -> Result<()> {
        if self.sample_size == Some(0) {
            return Err(SampleError::InvalidConfig(
                "sample size must be a positive integer".to_string(),
            ));
        }
        if self.max_line_length == 0 {
            return Err(SampleError::InvalidConfig(
                "maximum line length must be positive".to_string(),
            ));
        }
        if self.growth_increment == 0 {
            return Err(SampleError::InvalidConfig(
                "growth increment must be positive".to_string(),
            ));
        }
        if is_stdin(&self.input) {
            return Err(SampleError::StdinUnsupported);
        }
        Ok(())
    }
}

pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}
