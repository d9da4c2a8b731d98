use crate::content_diff::{request_body_diff, RequestBodyDiff};
use crate::map_diff::{map_diff, MapDiff};
use crate::parameter_diff::{parameters_diff, ParameterDiff};
use crate::response_diff::{responses_diff, ResponseDiff};
use crate::state::DiffState;
use crate::value_diff::{sequence_diff, set_diff, value_diff, StringListDiff, ValueDiff};
use serde::Serialize;
use specdiff_common::{Operation, PathItem};
use std::collections::BTreeMap;

/// Difference between two operation objects: https://swagger.io/specification/#operation-object
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct OperationDiff {
    #[serde(rename = "tags", skip_serializing_if = "Option::is_none")]
    pub tags_diff: Option<StringListDiff>,

    #[serde(rename = "summary", skip_serializing_if = "Option::is_none")]
    pub summary_diff: Option<ValueDiff>,

    #[serde(rename = "description", skip_serializing_if = "Option::is_none")]
    pub description_diff: Option<ValueDiff>,

    #[serde(rename = "operationID", skip_serializing_if = "Option::is_none")]
    pub operation_id_diff: Option<ValueDiff>,

    #[serde(rename = "parameters", skip_serializing_if = "Option::is_none")]
    pub parameters_diff: Option<MapDiff<ParameterDiff>>,

    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body_diff: Option<RequestBodyDiff>,

    #[serde(rename = "responses", skip_serializing_if = "Option::is_none")]
    pub responses_diff: Option<MapDiff<ResponseDiff>>,

    /// Callback name -> method -> operation diff
    #[serde(rename = "callbacks", skip_serializing_if = "Option::is_none")]
    pub callbacks_diff: Option<MapDiff<MapDiff<OperationDiff>>>,

    #[serde(rename = "deprecated", skip_serializing_if = "Option::is_none")]
    pub deprecated_diff: Option<ValueDiff>,

    #[serde(rename = "servers", skip_serializing_if = "Option::is_none")]
    pub servers_diff: Option<StringListDiff>,
}

impl OperationDiff {
    /// True when the comparison found nothing to report. A conjunction of
    /// per-field checks; map-valued sub-diffs rule out a whole-struct
    /// equality shortcut.
    pub fn is_empty(&self) -> bool {
        self.tags_diff.is_none()
            && self.summary_diff.is_none()
            && self.description_diff.is_none()
            && self.operation_id_diff.is_none()
            && self.parameters_diff.is_none()
            && self.request_body_diff.is_none()
            && self.responses_diff.is_none()
            && self.callbacks_diff.is_none()
            && self.deprecated_diff.is_none()
            && self.servers_diff.is_none()
    }
}

/// Compare two operations belonging to the same endpoint
pub(crate) fn operation_diff(
    state: &mut DiffState<'_>,
    operation1: &Operation,
    operation2: &Operation,
) -> Option<OperationDiff> {
    let servers1: Vec<String> = operation1.servers.iter().map(|s| s.url.clone()).collect();
    let servers2: Vec<String> = operation2.servers.iter().map(|s| s.url.clone()).collect();

    let mut result = OperationDiff {
        tags_diff: set_diff(&operation1.tags, &operation2.tags),
        operation_id_diff: value_diff(&operation1.operation_id, &operation2.operation_id),
        deprecated_diff: value_diff(&operation1.deprecated, &operation2.deprecated),
        parameters_diff: parameters_diff(state, &operation1.parameters, &operation2.parameters),
        request_body_diff: request_body_diff(
            state,
            operation1.request_body.as_ref(),
            operation2.request_body.as_ref(),
        ),
        responses_diff: responses_diff(state, &operation1.responses, &operation2.responses),
        callbacks_diff: callbacks_diff(state, &operation1.callbacks, &operation2.callbacks),
        servers_diff: sequence_diff(&servers1, &servers2),
        ..Default::default()
    };

    if state.config.include_descriptions {
        result.summary_diff = value_diff(&operation1.summary, &operation2.summary);
        result.description_diff = value_diff(&operation1.description, &operation2.description);
    }

    if result.is_empty() {
        None
    } else {
        Some(result)
    }
}

fn callbacks_diff(
    state: &mut DiffState<'_>,
    callbacks1: &BTreeMap<String, PathItem>,
    callbacks2: &BTreeMap<String, PathItem>,
) -> Option<MapDiff<MapDiff<OperationDiff>>> {
    map_diff(callbacks1, callbacks2, |_, item1, item2| {
        path_item_diff(state, item1, item2)
    })
    .into_option()
}

/// Keyed diff of the operations available on one path item
fn path_item_diff(
    state: &mut DiffState<'_>,
    item1: &PathItem,
    item2: &PathItem,
) -> Option<MapDiff<OperationDiff>> {
    let map1 = to_operation_map(item1);
    let map2 = to_operation_map(item2);

    map_diff(&map1, &map2, |_, op1, op2| operation_diff(state, op1, op2)).into_option()
}

fn to_operation_map(item: &PathItem) -> BTreeMap<String, &Operation> {
    item.operations()
        .into_iter()
        .map(|(method, operation)| (method.to_string(), operation))
        .collect()
}
