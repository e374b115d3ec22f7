//! HTML rendering for the simple repository and landing page.
//!
//! Every renderer is a pure function returning the full document. Names,
//! filenames and URLs are HTML-escaped on the way in.

mod escape;
mod landing;

pub use escape::escape;
pub use landing::{landing_page, SiteInfo};

use std::collections::BTreeSet;
use std::fmt::Write;

use crate::wheel::WheelRecord;

/// Required by installers reading the simple API; must not change.
pub const REPOSITORY_VERSION_META: &str =
    r#"<meta name="pypi:repository-version" content="1.0">"#;

/// Fragment appended to each wheel URL. Left empty: wheels are not hashed.
pub const HASH_FRAGMENT: &str = "#sha256=";

fn simple_document(title: &str, links: &str) -> String {
    format!(
        "<!DOCTYPE html>
<html>
<head>
    {REPOSITORY_VERSION_META}
    <title>{title}</title>
</head>
<body>
    <h1>{title}</h1>
{links}
</body>
</html>"
    )
}

/// Root `/simple/` index: one link per distinct name, sorted.
pub fn root_index<'a, I>(names: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let names: BTreeSet<&str> = names.into_iter().collect();

    let mut links = String::new();
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            links.push('\n');
        }
        let name = escape(name);
        let _ = write!(links, r#"    <a href="{name}/">{name}</a><br/>"#);
    }

    simple_document("Simple Index", &links)
}

/// Per-package `/simple/<name>/` index, wheels sorted by filename.
pub fn package_index(package_name: &str, wheels: &[WheelRecord]) -> String {
    let mut sorted: Vec<&WheelRecord> = wheels.iter().collect();
    sorted.sort_by(|a, b| a.filename.cmp(&b.filename));

    let mut links = String::new();
    for (i, w) in sorted.iter().enumerate() {
        if i > 0 {
            links.push('\n');
        }
        let _ = write!(
            links,
            r#"    <a href="{}{HASH_FRAGMENT}" data-dist-info-metadata="false">{}</a><br/>"#,
            escape(&w.url),
            escape(&w.filename),
        );
    }

    simple_document(&format!("Links for {}", escape(package_name)), &links)
}
