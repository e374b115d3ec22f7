//! Writing the generated site to disk.
//!
//! Layout under the output directory:
//! `index.html` (landing page), `simple/index.html` (root index) and
//! `simple/<name>/index.html` per package. Each file is written to a `.part`
//! sibling and renamed into place, replacing any previous run's file.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::package::PackageGroups;
use crate::render::{self, SiteInfo};

/// Directory under the output root holding the PEP 503 tree.
pub const SIMPLE_DIR: &str = "simple";

/// Name of every generated page.
pub const INDEX_FILE: &str = "index.html";

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `index.html` → `index.html.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Writes `contents` to `path`, replacing any existing file.
pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    let tmp = temp_path(path);
    fs::write(&tmp, contents)
        .with_context(|| format!("failed to write temp file: {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("failed to move {} into place", path.display()))?;
    Ok(())
}

/// Paths produced by [`write_index`].
#[derive(Debug, Clone)]
pub struct WrittenIndex {
    pub landing: PathBuf,
    pub root: PathBuf,
    pub packages: Vec<PathBuf>,
}

impl WrittenIndex {
    pub fn simple_dir(&self) -> &Path {
        self.root.parent().unwrap_or(self.root.as_path())
    }
}

/// Renders and writes the whole site under `out_dir`.
pub fn write_index(
    out_dir: &Path,
    groups: &PackageGroups,
    total_wheels: usize,
    site: &SiteInfo,
) -> Result<WrittenIndex> {
    let simple_dir = out_dir.join(SIMPLE_DIR);
    fs::create_dir_all(&simple_dir)
        .with_context(|| format!("failed to create {}", simple_dir.display()))?;

    let root = simple_dir.join(INDEX_FILE);
    write_file(&root, &render::root_index(groups.names().map(|n| n.as_str())))?;
    println!("      Created: {}", root.display());
    tracing::debug!(path = %root.display(), "wrote root index");

    let mut packages = Vec::with_capacity(groups.len());
    for (name, wheels) in groups {
        let pkg_dir = simple_dir.join(name.as_str());
        fs::create_dir_all(&pkg_dir)
            .with_context(|| format!("failed to create {}", pkg_dir.display()))?;

        let path = pkg_dir.join(INDEX_FILE);
        write_file(&path, &render::package_index(name.as_str(), wheels))?;
        println!("      Created: {}", path.display());
        tracing::debug!(path = %path.display(), wheels = wheels.len(), "wrote package index");
        packages.push(path);
    }

    let landing = out_dir.join(INDEX_FILE);
    write_file(&landing, &render::landing_page(groups, total_wheels, site))?;
    tracing::debug!(path = %landing.display(), "wrote landing page");

    Ok(WrittenIndex {
        landing,
        root,
        packages,
    })
}
