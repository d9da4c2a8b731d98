use crate::content_diff::{content_diff, MediaTypeDiff};
use crate::map_diff::{map_diff, MapDiff};
use crate::schema_diff::{schema_ref_diff, SchemaDiff};
use crate::state::DiffState;
use crate::value_diff::{value_diff, ValueDiff};
use serde::Serialize;
use specdiff_common::{Header, Response};
use std::collections::BTreeMap;

/// Difference between two responses of one status code
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct ResponseDiff {
    #[serde(rename = "description", skip_serializing_if = "Option::is_none")]
    pub description_diff: Option<ValueDiff>,

    #[serde(rename = "content", skip_serializing_if = "Option::is_none")]
    pub content_diff: Option<MapDiff<MediaTypeDiff>>,

    #[serde(rename = "headers", skip_serializing_if = "Option::is_none")]
    pub headers_diff: Option<MapDiff<HeaderDiff>>,
}

impl ResponseDiff {
    pub fn is_empty(&self) -> bool {
        self.description_diff.is_none()
            && self.content_diff.is_none()
            && self.headers_diff.is_none()
    }
}

/// Difference between two response header definitions
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct HeaderDiff {
    #[serde(rename = "description", skip_serializing_if = "Option::is_none")]
    pub description_diff: Option<ValueDiff>,

    #[serde(rename = "required", skip_serializing_if = "Option::is_none")]
    pub required_diff: Option<ValueDiff>,

    #[serde(rename = "deprecated", skip_serializing_if = "Option::is_none")]
    pub deprecated_diff: Option<ValueDiff>,

    #[serde(rename = "schema", skip_serializing_if = "Option::is_none")]
    pub schema_diff: Option<SchemaDiff>,
}

impl HeaderDiff {
    pub fn is_empty(&self) -> bool {
        self.description_diff.is_none()
            && self.required_diff.is_none()
            && self.deprecated_diff.is_none()
            && self.schema_diff.is_none()
    }
}

/// Compare two response maps, keyed by status code
pub(crate) fn responses_diff(
    state: &mut DiffState<'_>,
    responses1: &BTreeMap<String, Response>,
    responses2: &BTreeMap<String, Response>,
) -> Option<MapDiff<ResponseDiff>> {
    map_diff(responses1, responses2, |_, response1, response2| {
        response_diff(state, response1, response2)
    })
    .into_option()
}

fn response_diff(
    state: &mut DiffState<'_>,
    response1: &Response,
    response2: &Response,
) -> Option<ResponseDiff> {
    let mut result = ResponseDiff {
        content_diff: content_diff(state, &response1.content, &response2.content),
        headers_diff: headers_diff(state, &response1.headers, &response2.headers),
        ..Default::default()
    };

    if state.config.include_descriptions {
        result.description_diff = value_diff(&response1.description, &response2.description);
    }

    if result.is_empty() {
        None
    } else {
        Some(result)
    }
}

fn headers_diff(
    state: &mut DiffState<'_>,
    headers1: &BTreeMap<String, Header>,
    headers2: &BTreeMap<String, Header>,
) -> Option<MapDiff<HeaderDiff>> {
    map_diff(headers1, headers2, |_, header1, header2| {
        header_diff(state, header1, header2)
    })
    .into_option()
}

fn header_diff(
    state: &mut DiffState<'_>,
    header1: &Header,
    header2: &Header,
) -> Option<HeaderDiff> {
    let mut result = HeaderDiff {
        required_diff: value_diff(&header1.required, &header2.required),
        deprecated_diff: value_diff(&header1.deprecated, &header2.deprecated),
        schema_diff: schema_ref_diff(state, header1.schema.as_ref(), header2.schema.as_ref()),
        ..Default::default()
    };

    if state.config.include_descriptions {
        result.description_diff = value_diff(&header1.description, &header2.description);
    }

    if result.is_empty() {
        None
    } else {
        Some(result)
    }
}
