use clap::{ArgAction, ArgGroup, Parser};
use reservoir_sample::config::Tunables;
use reservoir_sample::{Backend, Config, OrderMode, Replacement};
use std::path::PathBuf;

/// Performs reservoir sampling on very large newline-delimited files.
///
/// Memory use stays low by keeping a pool of byte offsets to the start of
/// each line instead of the lines themselves.
#[derive(Parser, Debug)]
#[command(name = "reservoir-sample")]
#[command(version, about, long_about)]
#[command(group(ArgGroup::new("replacement").args(["without_replacement", "with_replacement"])))]
#[command(group(ArgGroup::new("order").args(["shuffle", "preserve_order"])))]
#[command(group(ArgGroup::new("io").args(["mmap", "cstdio", "hybrid"])))]
pub struct Cli {
    /// Number of samples to retrieve (all lines, shuffled, when omitted)
    #[arg(short = 'k', long, value_parser = clap::value_parser!(u64).range(1..))]
    pub sample_size: Option<u64>,

    /// Sample without replacement (default)
    #[arg(short = 'o', long = "sample-without-replacement")]
    pub without_replacement: bool,

    /// Sample with replacement
    #[arg(short = 'r', long = "sample-with-replacement")]
    pub with_replacement: bool,

    /// Print the sample in reservoir order (default)
    #[arg(short = 's', long)]
    pub shuffle: bool,

    /// Print the sample in original file order
    #[arg(short = 'p', long)]
    pub preserve_order: bool,

    /// Memory-map the input file (default)
    #[arg(short = 'm', long)]
    pub mmap: bool,

    /// Use buffered reads for the input file
    #[arg(short = 'c', long, visible_alias = "buffered")]
    pub cstdio: bool,

    /// Scan with buffered reads, print through a memory map
    #[arg(short = 'y', long)]
    pub hybrid: bool,

    /// Seed for the random generator
    #[arg(long)]
    pub seed: Option<u64>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Newline-delimited input file
    pub input: PathBuf,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }

    pub fn into_config(self, tunables: &Tunables) -> anyhow::Result<Config> {
        let mut config = Config::new(self.input);
        config.sample_size = self
            .sample_size
            .map(usize::try_from)
            .transpose()
            .map_err(|_| anyhow::anyhow!("sample size does not fit in memory on this platform"))?;
        config.replacement = if self.with_replacement {
            Replacement::With
        } else {
            Replacement::Without
        };
        config.order = if self.preserve_order {
            OrderMode::PreserveOrder
        } else {
            OrderMode::AsSampled
        };
        config.backend = if self.cstdio {
            Backend::Buffered
        } else if self.hybrid {
            Backend::Hybrid
        } else {
            Backend::Mmap
        };
        config.seed = self.seed;
        Ok(config.with_tunables(tunables))
    }
}
