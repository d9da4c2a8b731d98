use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;

/// A change to a single scalar field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueDiff {
    pub from: Value,
    pub to: Value,
}

/// Compare two values, reporting the old and new value when they differ
pub fn value_diff<T: PartialEq + Serialize>(value1: &T, value2: &T) -> Option<ValueDiff> {
    if value1 == value2 {
        return None;
    }

    Some(ValueDiff {
        from: to_value(value1),
        to: to_value(value2),
    })
}

fn to_value<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// Serde skip helper for presence flags
pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

/// Membership changes between two string lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct StringListDiff {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub added: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub deleted: Vec<String>,
}

/// Compare two string lists as unordered sets. Duplicates and ordering are
/// ignored; entries come back sorted.
pub fn set_diff(list1: &[String], list2: &[String]) -> Option<StringListDiff> {
    let set1: BTreeSet<&str> = list1.iter().map(String::as_str).collect();
    let set2: BTreeSet<&str> = list2.iter().map(String::as_str).collect();

    let added: Vec<String> = set2.difference(&set1).map(|s| s.to_string()).collect();
    let deleted: Vec<String> = set1.difference(&set2).map(|s| s.to_string()).collect();

    if added.is_empty() && deleted.is_empty() {
        return None;
    }

    Some(StringListDiff { added, deleted })
}

/// Compare two ordered lists. Any difference, including a pure reorder, is
/// reported; the membership deltas may both be empty in that case.
pub fn sequence_diff(seq1: &[String], seq2: &[String]) -> Option<StringListDiff> {
    if seq1 == seq2 {
        return None;
    }

    let set1: BTreeSet<&str> = seq1.iter().map(String::as_str).collect();
    let set2: BTreeSet<&str> = seq2.iter().map(String::as_str).collect();

    Some(StringListDiff {
        added: set2.difference(&set1).map(|s| s.to_string()).collect(),
        deleted: set1.difference(&set2).map(|s| s.to_string()).collect(),
    })
}
