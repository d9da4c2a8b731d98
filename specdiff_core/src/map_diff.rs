use serde::Serialize;
use std::collections::BTreeMap;

/// Difference between two keyed collections
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapDiff<D> {
    /// Keys only in the revision, sorted
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub added: Vec<String>,

    /// Keys only in the base, sorted
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub deleted: Vec<String>,

    /// Keys on both sides whose values differ
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub modified: BTreeMap<String, D>,
}

impl<D> MapDiff<D> {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty() && self.modified.is_empty()
    }

    /// `None` when there is nothing to report
    pub fn into_option(self) -> Option<Self> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

impl<D> Default for MapDiff<D> {
    fn default() -> Self {
        Self {
            added: Vec::new(),
            deleted: Vec::new(),
            modified: BTreeMap::new(),
        }
    }
}

/// Compare two keyed collections. Keys present on both sides are handed to
/// `value_diff`; a `Some` result lands in `modified`, `None` means the pair
/// is unchanged.
pub fn map_diff<V, D>(
    map1: &BTreeMap<String, V>,
    map2: &BTreeMap<String, V>,
    mut value_diff: impl FnMut(&str, &V, &V) -> Option<D>,
) -> MapDiff<D> {
    let mut result = MapDiff::default();

    for (key, value1) in map1 {
        match map2.get(key) {
            Some(value2) => {
                if let Some(diff) = value_diff(key, value1, value2) {
                    result.modified.insert(key.clone(), diff);
                }
            }
            None => result.deleted.push(key.clone()),
        }
    }

    for key in map2.keys() {
        if !map1.contains_key(key) {
            result.added.push(key.clone());
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_map(entries: &[(&str, i32)]) -> BTreeMap<String, i32> {
        entries
            .iter()
            .map(|(key, value)| (key.to_string(), *value))
            .collect()
    }

    #[test]
    fn test_equal_maps_are_empty() {
        let map = to_map(&[("a", 1), ("b", 2)]);
        let diff = map_diff(&map, &map.clone(), |_, v1, v2| {
            if v1 == v2 {
                None
            } else {
                Some(*v2)
            }
        });

        assert!(diff.is_empty());
        assert!(diff.into_option().is_none());
    }

    #[test]
    fn test_classifies_added_deleted_modified() {
        let map1 = to_map(&[("a", 1), ("b", 2), ("c", 3)]);
        let map2 = to_map(&[("b", 2), ("c", 30), ("d", 4)]);

        let diff = map_diff(&map1, &map2, |_, v1, v2| {
            if v1 == v2 {
                None
            } else {
                Some(*v2)
            }
        });

        assert_eq!(diff.added, vec!["d"]);
        assert_eq!(diff.deleted, vec!["a"]);
        assert_eq!(diff.modified.len(), 1);
        assert_eq!(diff.modified["c"], 30);
    }

    #[test]
    fn test_added_and_deleted_are_sorted() {
        let map1 = to_map(&[("z", 1), ("m", 1), ("a", 1)]);
        let map2 = BTreeMap::new();

        let diff = map_diff(&map1, &map2, |_, _, _| None::<i32>);
        assert_eq!(diff.deleted, vec!["a", "m", "z"]);
    }

    #[test]
    fn test_unchanged_pairs_stay_out_of_modified() {
        let map1 = to_map(&[("a", 1)]);
        let map2 = to_map(&[("a", 1)]);

        let diff = map_diff(&map1, &map2, |_, _, _| None::<i32>);
        assert!(diff.modified.is_empty());
    }
}
