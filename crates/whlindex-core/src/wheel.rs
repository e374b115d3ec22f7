//! Wheel selection from release assets.

use crate::github::Release;

/// Suffix identifying a wheel asset. Matched case-sensitively.
pub const WHEEL_SUFFIX: &str = ".whl";

/// Tag recorded for wheels whose release carries no tag.
pub const UNKNOWN_TAG: &str = "unknown";

/// A wheel asset and the release it was published under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WheelRecord {
    pub filename: String,
    pub url: String,
    pub size: u64,
    pub tag: String,
}

impl WheelRecord {
    /// Distribution-name position of a wheel filename: everything before the
    /// first `-`, or the whole filename when it has none.
    pub fn distribution(&self) -> &str {
        self.filename
            .split_once('-')
            .map_or(self.filename.as_str(), |(name, _)| name)
    }
}

/// Collects `.whl` assets in release order, then asset order.
pub fn extract_wheels(releases: &[Release]) -> Vec<WheelRecord> {
    let mut wheels = Vec::new();

    for release in releases {
        let tag = release.tag_name.as_deref().unwrap_or(UNKNOWN_TAG);

        for asset in &release.assets {
            if !asset.name.ends_with(WHEEL_SUFFIX) {
                continue;
            }
            wheels.push(WheelRecord {
                filename: asset.name.clone(),
                url: asset.browser_download_url.clone(),
                size: asset.size.unwrap_or(0),
                tag: tag.to_string(),
            });
        }
    }

    tracing::debug!(releases = releases.len(), wheels = wheels.len(), "extracted wheels");
    wheels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::Asset;

    fn asset(name: &str) -> Asset {
        Asset {
            name: name.to_string(),
            browser_download_url: format!("https://dl.example.com/{name}"),
            size: Some(7),
        }
    }

    fn release(tag: Option<&str>, names: &[&str]) -> Release {
        Release {
            tag_name: tag.map(str::to_string),
            assets: names.iter().map(|n| asset(n)).collect(),
        }
    }

    #[test]
    fn suffix_match_is_case_sensitive() {
        let wheels = extract_wheels(&[release(Some("v1"), &["a.whl", "a.tar.gz", "b.WHL"])]);
        assert_eq!(wheels.len(), 1);
        assert_eq!(wheels[0].filename, "a.whl");
        assert_eq!(wheels[0].url, "https://dl.example.com/a.whl");
        assert_eq!(wheels[0].size, 7);
        assert_eq!(wheels[0].tag, "v1");
    }

    #[test]
    fn preserves_release_then_asset_order() {
        let wheels = extract_wheels(&[
            release(Some("v2"), &["z-2.whl", "a-2.whl"]),
            release(Some("v1"), &["m-1.whl"]),
        ]);
        let names: Vec<_> = wheels.iter().map(|w| w.filename.as_str()).collect();
        assert_eq!(names, ["z-2.whl", "a-2.whl", "m-1.whl"]);
        assert_eq!(wheels[2].tag, "v1");
    }

    #[test]
    fn missing_tag_and_size_default() {
        let mut r = release(None, &["pkg-1.0-py3-none-any.whl"]);
        r.assets[0].size = None;
        let wheels = extract_wheels(&[r]);
        assert_eq!(wheels[0].tag, UNKNOWN_TAG);
        assert_eq!(wheels[0].size, 0);
    }

    #[test]
    fn releases_without_wheels_contribute_nothing() {
        let wheels = extract_wheels(&[
            release(Some("v1"), &[]),
            release(Some("v2"), &["notes.txt", "src.zip"]),
        ]);
        assert!(wheels.is_empty());
    }

    #[test]
    fn distribution_is_first_dash_segment() {
        let w = |name: &str| WheelRecord {
            filename: name.to_string(),
            url: String::new(),
            size: 0,
            tag: String::new(),
        };
        assert_eq!(
            w("flash_attn-2.5.9-cp310-cp310-linux_x86_64.whl").distribution(),
            "flash_attn"
        );
        assert_eq!(w("nodash.whl").distribution(), "nodash.whl");
    }
}
