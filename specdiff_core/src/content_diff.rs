use crate::map_diff::{map_diff, MapDiff};
use crate::schema_diff::{schema_ref_diff, SchemaDiff};
use crate::state::DiffState;
use crate::value_diff::{is_false, value_diff, ValueDiff};
use serde::Serialize;
use specdiff_common::{MediaType, RequestBody};
use std::collections::BTreeMap;

/// Difference between two payload descriptions of one media type
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct MediaTypeDiff {
    #[serde(rename = "schema", skip_serializing_if = "Option::is_none")]
    pub schema_diff: Option<SchemaDiff>,

    #[serde(rename = "example", skip_serializing_if = "Option::is_none")]
    pub example_diff: Option<ValueDiff>,
}

impl MediaTypeDiff {
    pub fn is_empty(&self) -> bool {
        self.schema_diff.is_none() && self.example_diff.is_none()
    }
}

/// Compare two content maps, keyed by media type
pub(crate) fn content_diff(
    state: &mut DiffState<'_>,
    content1: &BTreeMap<String, MediaType>,
    content2: &BTreeMap<String, MediaType>,
) -> Option<MapDiff<MediaTypeDiff>> {
    map_diff(content1, content2, |_, media1, media2| {
        media_type_diff(state, media1, media2)
    })
    .into_option()
}

fn media_type_diff(
    state: &mut DiffState<'_>,
    media1: &MediaType,
    media2: &MediaType,
) -> Option<MediaTypeDiff> {
    let mut result = MediaTypeDiff {
        schema_diff: schema_ref_diff(state, media1.schema.as_ref(), media2.schema.as_ref()),
        ..Default::default()
    };

    if state.config.include_examples {
        result.example_diff = value_diff(&media1.example, &media2.example);
    }

    if result.is_empty() {
        None
    } else {
        Some(result)
    }
}

/// Difference between two request bodies
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct RequestBodyDiff {
    /// Revision has a request body where the base had none
    #[serde(skip_serializing_if = "is_false")]
    pub added: bool,

    /// Base had a request body the revision dropped
    #[serde(skip_serializing_if = "is_false")]
    pub deleted: bool,

    #[serde(rename = "description", skip_serializing_if = "Option::is_none")]
    pub description_diff: Option<ValueDiff>,

    #[serde(rename = "required", skip_serializing_if = "Option::is_none")]
    pub required_diff: Option<ValueDiff>,

    #[serde(rename = "content", skip_serializing_if = "Option::is_none")]
    pub content_diff: Option<MapDiff<MediaTypeDiff>>,
}

impl RequestBodyDiff {
    pub fn is_empty(&self) -> bool {
        !self.added
            && !self.deleted
            && self.description_diff.is_none()
            && self.required_diff.is_none()
            && self.content_diff.is_none()
    }
}

pub(crate) fn request_body_diff(
    state: &mut DiffState<'_>,
    body1: Option<&RequestBody>,
    body2: Option<&RequestBody>,
) -> Option<RequestBodyDiff> {
    match (body1, body2) {
        (None, None) => None,
        (None, Some(_)) => Some(RequestBodyDiff {
            added: true,
            ..Default::default()
        }),
        (Some(_), None) => Some(RequestBodyDiff {
            deleted: true,
            ..Default::default()
        }),
        (Some(body1), Some(body2)) => {
            let mut result = RequestBodyDiff {
                required_diff: value_diff(&body1.required, &body2.required),
                content_diff: content_diff(state, &body1.content, &body2.content),
                ..Default::default()
            };

            if state.config.include_descriptions {
                result.description_diff = value_diff(&body1.description, &body2.description);
            }

            if result.is_empty() {
                None
            } else {
                Some(result)
            }
        }
    }
}
