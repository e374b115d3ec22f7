//! Human-facing landing page at the site root.

use std::fmt::Write;

use super::escape;
use crate::config::IndexConfig;
use crate::github::RepoId;
use crate::package::PackageGroups;

/// Placeholder host used in the install instructions.
pub const PLACEHOLDER_DOMAIN: &str = "YOUR_DOMAIN";

/// Example version used in the pinned-install instruction.
const PINNED_VERSION_EXAMPLE: &str = "2.5.9";

const STYLE: &str = r#"    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, sans-serif;
            max-width: 800px;
            margin: 0 auto;
            padding: 2rem;
            line-height: 1.6;
        }
        h1 { color: #2d3748; }
        code {
            background: #f1f5f9;
            padding: 0.2rem 0.4rem;
            border-radius: 4px;
            font-size: 0.9em;
        }
        pre {
            background: #1e293b;
            color: #e2e8f0;
            padding: 1rem;
            border-radius: 8px;
            overflow-x: auto;
        }
        pre code {
            background: none;
            padding: 0;
        }
        .stats {
            background: #f8fafc;
            border: 1px solid #e2e8f0;
            border-radius: 8px;
            padding: 1rem;
            margin: 1rem 0;
        }
        a { color: #3b82f6; }
    </style>"#;

/// Text of the landing page that does not come from the wheels themselves.
#[derive(Debug, Clone)]
pub struct SiteInfo {
    pub title: String,
    pub package_hint: String,
    pub upstream_url: Option<String>,
    pub repo: RepoId,
}

impl SiteInfo {
    pub fn from_config(cfg: &IndexConfig, repo: RepoId) -> Self {
        Self {
            title: cfg.site.title.clone(),
            package_hint: cfg.site.package_hint.clone(),
            upstream_url: cfg.site.upstream_url.clone(),
            repo,
        }
    }
}

fn intro(site: &SiteInfo) -> String {
    let repo = escape(&site.repo.to_string()).into_owned();
    let repo_link = format!(
        r#"<a href="{}">{repo}</a>"#,
        escape(&site.repo.html_url())
    );
    let subject = match &site.upstream_url {
        Some(url) => format!(
            r#"<a href="{}">{}</a>"#,
            escape(url),
            escape(&site.package_hint)
        ),
        None => escape(&site.package_hint).into_owned(),
    };
    format!(
        "This is a PEP 503 compliant Python package index for pre-built {subject} wheels,
        sourced from {repo_link}."
    )
}

fn install_command(package: &str, flag: &str) -> String {
    format!("pip install {package} {flag} https://{PLACEHOLDER_DOMAIN}/simple/")
}

/// Landing page: totals, install instructions and a per-package summary.
pub fn landing_page(groups: &PackageGroups, total_wheels: usize, site: &SiteInfo) -> String {
    let title = escape(&site.title);
    let hint = escape(&site.package_hint);

    let mut pkg_list = String::new();
    for (i, (name, wheels)) in groups.iter().enumerate() {
        if i > 0 {
            pkg_list.push_str("\n        ");
        }
        let _ = write!(
            pkg_list,
            "<li><strong>{}</strong>: {} wheels</li>",
            escape(name.as_str()),
            wheels.len()
        );
    }

    let index_url = install_command(&hint, "--index-url");
    let extra_index_url = install_command(&hint, "--extra-index-url");
    let pinned = install_command(&format!("{hint}=={PINNED_VERSION_EXAMPLE}"), "--index-url");
    let intro = intro(site);
    let packages = groups.len();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title} Index</title>
{STYLE}
</head>
<body>
    <h1>{title}</h1>

    <p>
        {intro}
    </p>

    <div class="stats">
        <strong>{total_wheels}</strong> wheels available for <strong>{packages}</strong> package(s)
    </div>

    <h2>Installation</h2>

    <p>Install {hint} using this index:</p>
    <pre><code>{index_url}</code></pre>

    <p>Or use as an extra index (with PyPI fallback):</p>
    <pre><code>{extra_index_url}</code></pre>

    <p>Install a specific version:</p>
    <pre><code>{pinned}</code></pre>

    <h2>Available Packages</h2>
    <ul>
        {pkg_list}
    </ul>

    <p>
        <a href="simple/">Browse the simple index &rarr;</a>
    </p>

    <hr>
    <p style="color: #64748b; font-size: 0.875rem;">
        Auto-generated from GitHub releases.
        Wheels are served directly from GitHub.
    </p>
</body>
</html>"#
    )
}
