//! One generation run: fetch → extract → group → write.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::config::IndexConfig;
use crate::github::{GithubClient, Release};
use crate::output::{self, WrittenIndex};
use crate::package::{self, PackageGroups};
use crate::render::SiteInfo;
use crate::wheel;

const RULE: &str = "============================================================";

/// Totals of a successful run.
#[derive(Debug, Clone)]
pub struct Summary {
    pub releases: usize,
    pub wheels: usize,
    pub packages: usize,
    pub written: WrittenIndex,
}

/// Terminal state of a run.
#[derive(Debug, Clone)]
pub enum Outcome {
    Generated(Summary),
    /// No release asset was a wheel; nothing was written.
    NoWheels { releases: usize },
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Generated(_) => 0,
            Outcome::NoWheels { .. } => 1,
        }
    }
}

/// Fetches releases for the configured repository and generates the site.
pub fn run(cfg: &IndexConfig) -> Result<Outcome> {
    let client = GithubClient::from_config(cfg)?;

    println!("{RULE}");
    println!("Wheel Index Generator: {}", client.repo());
    println!("{RULE}");

    println!("\n[1/4] Fetching releases from GitHub...");
    let releases = client.fetch_all_releases()?;
    println!("      Found {} releases total", releases.len());
    tracing::info!(repo = %client.repo(), releases = releases.len(), "fetched releases");

    let site = SiteInfo::from_config(cfg, client.repo().clone());
    generate(&releases, &cfg.output_dir, &site)
}

/// Stages 2-4 over already fetched releases.
pub fn generate(releases: &[Release], out_dir: &Path, site: &SiteInfo) -> Result<Outcome> {
    println!("\n[2/4] Extracting wheel files...");
    let wheels = wheel::extract_wheels(releases);
    println!("      Found {} wheel files", wheels.len());

    if wheels.is_empty() {
        return Ok(no_wheels(releases.len()));
    }

    println!("\n[3/4] Grouping packages...");
    let groups: PackageGroups = package::group_wheels(wheels);
    if groups.is_empty() {
        return Ok(no_wheels(releases.len()));
    }
    let total = groups.wheel_count();
    for (name, pkg_wheels) in &groups {
        println!("      {}: {} wheels", name, pkg_wheels.len());
    }

    println!("\n[4/4] Generating index files...");
    let written = output::write_index(out_dir, &groups, total, site)?;
    tracing::info!(
        packages = groups.len(),
        wheels = total,
        out = %out_dir.display(),
        "index generated"
    );

    print_success(written.simple_dir().to_path_buf(), &site.package_hint);

    Ok(Outcome::Generated(Summary {
        releases: releases.len(),
        wheels: total,
        packages: groups.len(),
        written,
    }))
}

fn no_wheels(releases: usize) -> Outcome {
    println!("ERROR: No wheels found!");
    tracing::error!(releases, "no usable wheel assets found, nothing generated");
    Outcome::NoWheels { releases }
}

fn print_success(simple_dir: PathBuf, package_hint: &str) {
    let shown = simple_dir.canonicalize().unwrap_or(simple_dir);

    println!("\n{RULE}");
    println!("SUCCESS!");
    println!("{RULE}");
    println!("\nOutput directory: {}", shown.display());
    println!("\nUsage:");
    println!("  pip install {package_hint} --index-url https://<your-domain>/simple/");
    println!("\nOr with PyPI fallback:");
    println!("  pip install {package_hint} --extra-index-url https://<your-domain>/simple/");
}
