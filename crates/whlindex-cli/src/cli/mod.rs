//! CLI for whlindex. Every flag is optional; a bare `whlindex` indexes the
//! default repository into `./public`.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use whlindex_core::config::{self, IndexConfig};
use whlindex_core::github::RepoId;
use whlindex_core::pipeline;

/// Top-level CLI for the wheel index generator.
#[derive(Debug, Parser)]
#[command(name = "whlindex", version)]
#[command(about = "Build a PEP 503 simple index from GitHub release wheels", long_about = None)]
pub struct Cli {
    /// Repository whose releases are indexed.
    #[arg(long, value_name = "OWNER/NAME")]
    pub repo: Option<RepoId>,

    /// Directory receiving index.html and simple/.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Base URL of the GitHub REST API (e.g. for GitHub Enterprise).
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Config file to use instead of ~/.config/whlindex/config.toml.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Parses process arguments and runs; returns the process exit code.
    pub fn run_from_args() -> Result<i32> {
        Cli::parse().run()
    }

    pub fn run(self) -> Result<i32> {
        let cfg = self.load_config()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let outcome = pipeline::run(&cfg)?;
        Ok(outcome.exit_code())
    }

    /// File (or defaults), then flag overrides, then the token from the environment.
    pub fn load_config(&self) -> Result<IndexConfig> {
        let base = match &self.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_default()?,
        };
        Ok(self.apply_overrides(base).with_token_from_env())
    }

    fn apply_overrides(&self, mut cfg: IndexConfig) -> IndexConfig {
        if let Some(repo) = &self.repo {
            cfg.repo = repo.to_string();
        }
        if let Some(dir) = &self.output_dir {
            cfg.output_dir = dir.clone();
        }
        if let Some(url) = &self.api_url {
            cfg.api_base = url.clone();
        }
        cfg
    }
}
