use crate::content_diff::{content_diff, MediaTypeDiff};
use crate::map_diff::{map_diff, MapDiff};
use crate::schema_diff::{schema_ref_diff, SchemaDiff};
use crate::state::DiffState;
use crate::value_diff::{value_diff, ValueDiff};
use serde::Serialize;
use specdiff_common::Parameter;
use std::collections::BTreeMap;

/// Difference between two parameter definitions
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct ParameterDiff {
    #[serde(rename = "description", skip_serializing_if = "Option::is_none")]
    pub description_diff: Option<ValueDiff>,

    #[serde(rename = "required", skip_serializing_if = "Option::is_none")]
    pub required_diff: Option<ValueDiff>,

    #[serde(rename = "deprecated", skip_serializing_if = "Option::is_none")]
    pub deprecated_diff: Option<ValueDiff>,

    #[serde(rename = "schema", skip_serializing_if = "Option::is_none")]
    pub schema_diff: Option<SchemaDiff>,

    #[serde(rename = "content", skip_serializing_if = "Option::is_none")]
    pub content_diff: Option<MapDiff<MediaTypeDiff>>,

    #[serde(rename = "example", skip_serializing_if = "Option::is_none")]
    pub example_diff: Option<ValueDiff>,
}

impl ParameterDiff {
    pub fn is_empty(&self) -> bool {
        self.description_diff.is_none()
            && self.required_diff.is_none()
            && self.deprecated_diff.is_none()
            && self.schema_diff.is_none()
            && self.content_diff.is_none()
            && self.example_diff.is_none()
    }
}

/// Compare two parameter lists, keyed by location plus name.
///
/// A parameter moving between locations shows up as one deletion and one
/// addition, never as a modification.
pub(crate) fn parameters_diff(
    state: &mut DiffState<'_>,
    params1: &[Parameter],
    params2: &[Parameter],
) -> Option<MapDiff<ParameterDiff>> {
    let map1 = to_parameter_map(params1);
    let map2 = to_parameter_map(params2);

    map_diff(&map1, &map2, |_, param1, param2| {
        parameter_diff(state, param1, param2)
    })
    .into_option()
}

fn to_parameter_map(params: &[Parameter]) -> BTreeMap<String, &Parameter> {
    params
        .iter()
        .map(|param| (format!("{} {}", param.location, param.name), param))
        .collect()
}

fn parameter_diff(
    state: &mut DiffState<'_>,
    param1: &Parameter,
    param2: &Parameter,
) -> Option<ParameterDiff> {
    let mut result = ParameterDiff {
        required_diff: value_diff(&param1.required, &param2.required),
        deprecated_diff: value_diff(&param1.deprecated, &param2.deprecated),
        schema_diff: schema_ref_diff(state, param1.schema.as_ref(), param2.schema.as_ref()),
        content_diff: content_diff(state, &param1.content, &param2.content),
        ..Default::default()
    };

    if state.config.include_descriptions {
        result.description_diff = value_diff(&param1.description, &param2.description);
    }

    if state.config.include_examples {
        result.example_diff = value_diff(&param1.example, &param2.example);
    }

    if result.is_empty() {
        None
    } else {
        Some(result)
    }
}
