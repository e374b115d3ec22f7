//! Grouping of wheels under their normalized distribution name.

mod name;

pub use name::{normalize, PackageName};

use std::collections::btree_map;
use std::collections::BTreeMap;

use crate::wheel::WheelRecord;

/// Wheels keyed by normalized package name, iterated in sorted name order.
///
/// Wheels inside a group keep insertion order; renderers sort them by filename.
#[derive(Debug, Clone, Default)]
pub struct PackageGroups {
    groups: BTreeMap<PackageName, Vec<WheelRecord>>,
}

impl PackageGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files the wheel under its normalized name. A wheel whose filename starts
    /// with `-` has no name to file under and is skipped; returns whether the
    /// wheel was kept.
    pub fn insert(&mut self, wheel: WheelRecord) -> bool {
        let name = normalize(wheel.distribution());
        if name.as_str().is_empty() {
            tracing::warn!(filename = %wheel.filename, "skipping wheel with empty distribution name");
            return false;
        }
        self.groups.entry(name).or_default().push(wheel);
        true
    }

    /// Number of distinct packages.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of wheels across all packages.
    pub fn wheel_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn get(&self, name: &str) -> Option<&[WheelRecord]> {
        self.groups.get(name).map(Vec::as_slice)
    }

    pub fn names(&self) -> impl Iterator<Item = &PackageName> {
        self.groups.keys()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, PackageName, Vec<WheelRecord>> {
        self.groups.iter()
    }
}

impl<'a> IntoIterator for &'a PackageGroups {
    type Item = (&'a PackageName, &'a Vec<WheelRecord>);
    type IntoIter = btree_map::Iter<'a, PackageName, Vec<WheelRecord>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<WheelRecord> for PackageGroups {
    fn from_iter<I: IntoIterator<Item = WheelRecord>>(iter: I) -> Self {
        let mut groups = Self::new();
        for wheel in iter {
            groups.insert(wheel);
        }
        groups
    }
}

/// Groups wheels by the normalized first `-` segment of their filename.
pub fn group_wheels(wheels: Vec<WheelRecord>) -> PackageGroups {
    wheels.into_iter().collect()
}
