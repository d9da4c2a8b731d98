use crate::map_diff::map_diff;
use crate::matching::match_pairs;
use crate::schema_diff::{schema_pair_diff, SchemaDiff};
use crate::state::DiffState;
use serde::Serialize;
use specdiff_common::SchemaRef;
use std::collections::BTreeMap;

/// Difference between two unordered lists of schemas (allOf/oneOf/anyOf).
///
/// Referenced entries are keyed by their reference string; inline entries
/// have no stable identity and are reported as counts, except for the
/// single-pair case which lands in `modified` under a positional `#<index>`
/// key. The two key spaces cannot collide.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct SchemaListDiff {
    #[serde(skip_serializing_if = "is_zero")]
    pub added: usize,

    #[serde(skip_serializing_if = "is_zero")]
    pub deleted: usize,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub modified: BTreeMap<String, SchemaDiff>,
}

fn is_zero(count: &usize) -> bool {
    *count == 0
}

impl SchemaListDiff {
    pub fn is_empty(&self) -> bool {
        self.added == 0 && self.deleted == 0 && self.modified.is_empty()
    }

    /// Merge two partition diffs: counters add up, `modified` maps union.
    /// Callers must pass maps with disjoint key spaces.
    pub fn combine(self, other: SchemaListDiff) -> SchemaListDiff {
        let mut modified = self.modified;
        modified.extend(other.modified);

        SchemaListDiff {
            added: self.added + other.added,
            deleted: self.deleted + other.deleted,
            modified,
        }
    }
}

/// Compare two unordered schema lists
pub(crate) fn schema_list_diff(
    state: &mut DiffState<'_>,
    list1: &[SchemaRef],
    list2: &[SchemaRef],
) -> Option<SchemaListDiff> {
    let refs_diff = refs_partition_diff(state, list1, list2);
    let inline_diff = inline_partition_diff(state, list1, list2);

    let combined = refs_diff.combine(inline_diff);
    if combined.is_empty() {
        None
    } else {
        Some(combined)
    }
}

/// Diff the referenced entries of both lists, keyed by reference string
fn refs_partition_diff(
    state: &mut DiffState<'_>,
    list1: &[SchemaRef],
    list2: &[SchemaRef],
) -> SchemaListDiff {
    let map1 = to_ref_map(list1);
    let map2 = to_ref_map(list2);

    let diff = map_diff(&map1, &map2, |_, schema1, schema2| {
        schema_pair_diff(state, schema1, schema2)
    });

    SchemaListDiff {
        added: diff.added.len(),
        deleted: diff.deleted.len(),
        modified: diff.modified,
    }
}

fn to_ref_map(list: &[SchemaRef]) -> BTreeMap<String, &SchemaRef> {
    list.iter()
        .filter_map(|schema| schema.reference().map(|r| (r.to_string(), schema)))
        .collect()
}

/// Diff the inline entries of both lists by structural-equality matching.
///
/// Exactly one leftover on each side is treated as a modification of the
/// same element rather than an unrelated addition and deletion; the key is
/// the element's position among the base list's inline entries. Any other
/// leftover shape is ambiguous and reported as plain counts.
fn inline_partition_diff(
    state: &mut DiffState<'_>,
    list1: &[SchemaRef],
    list2: &[SchemaRef],
) -> SchemaListDiff {
    let inline1: Vec<&SchemaRef> = list1.iter().filter(|s| s.reference().is_none()).collect();
    let inline2: Vec<&SchemaRef> = list2.iter().filter(|s| s.reference().is_none()).collect();

    let matching = match_pairs(&inline1, &inline2, |a, b| a == b);

    if let ([index1], [index2]) = (
        &matching.unmatched_left[..],
        &matching.unmatched_right[..],
    ) {
        // The pair already failed exact equality, so an empty recursive diff
        // is still reported rather than dropped
        let diff = schema_pair_diff(state, inline1[*index1], inline2[*index2]).unwrap_or_default();

        return SchemaListDiff {
            modified: BTreeMap::from([(format!("#{}", index1), diff)]),
            ..Default::default()
        };
    }

    SchemaListDiff {
        added: matching.unmatched_right.len(),
        deleted: matching.unmatched_left.len(),
        ..Default::default()
    }
}
