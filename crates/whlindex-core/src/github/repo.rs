//! `owner/name` repository identifiers.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
#[error("invalid repository {0:?}: expected owner/name")]
pub struct InvalidRepo(pub String);

/// A validated `owner/name` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    owner: String,
    name: String,
}

impl RepoId {
    pub fn parse(s: &str) -> Result<Self, InvalidRepo> {
        let s = s.trim();
        let (owner, name) = s.split_once('/').ok_or_else(|| InvalidRepo(s.to_string()))?;
        let well_formed = |part: &str| !part.is_empty() && !part.contains(['/', ' ', '\t']);
        if !well_formed(owner) || !well_formed(name) {
            return Err(InvalidRepo(s.to_string()));
        }
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Browser URL of the repository on github.com.
    pub fn html_url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoId {
    type Err = InvalidRepo;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_owner_and_name() {
        let r = RepoId::parse("mjun0812/flash-attention-prebuild-wheels").unwrap();
        assert_eq!(r.owner(), "mjun0812");
        assert_eq!(r.name(), "flash-attention-prebuild-wheels");
        assert_eq!(r.to_string(), "mjun0812/flash-attention-prebuild-wheels");
        assert_eq!(
            r.html_url(),
            "https://github.com/mjun0812/flash-attention-prebuild-wheels"
        );
    }

    #[test]
    fn rejects_malformed() {
        for bad in ["", "owner", "/name", "owner/", "a/b/c", "a b/c"] {
            assert!(RepoId::parse(bad).is_err(), "{bad:?} should be rejected");
        }
    }
}
