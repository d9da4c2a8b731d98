use crate::map_diff::{map_diff, MapDiff};
use crate::schema_list_diff::{schema_list_diff, SchemaListDiff};
use crate::state::DiffState;
use crate::value_diff::{is_false, sequence_diff, set_diff, value_diff, StringListDiff, ValueDiff};
use serde::Serialize;
use specdiff_common::{Schema, SchemaRef};

/// Difference between two schema definitions: https://swagger.io/specification/#schema-object
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct SchemaDiff {
    /// Revision defines a schema where the base had none
    #[serde(rename = "schemaAdded", skip_serializing_if = "is_false")]
    pub schema_added: bool,

    /// Base defined a schema the revision dropped
    #[serde(rename = "schemaDeleted", skip_serializing_if = "is_false")]
    pub schema_deleted: bool,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_diff: Option<ValueDiff>,

    #[serde(rename = "format", skip_serializing_if = "Option::is_none")]
    pub format_diff: Option<ValueDiff>,

    #[serde(rename = "title", skip_serializing_if = "Option::is_none")]
    pub title_diff: Option<ValueDiff>,

    #[serde(rename = "description", skip_serializing_if = "Option::is_none")]
    pub description_diff: Option<ValueDiff>,

    #[serde(rename = "default", skip_serializing_if = "Option::is_none")]
    pub default_diff: Option<ValueDiff>,

    #[serde(rename = "nullable", skip_serializing_if = "Option::is_none")]
    pub nullable_diff: Option<ValueDiff>,

    #[serde(rename = "deprecated", skip_serializing_if = "Option::is_none")]
    pub deprecated_diff: Option<ValueDiff>,

    #[serde(rename = "readOnly", skip_serializing_if = "Option::is_none")]
    pub read_only_diff: Option<ValueDiff>,

    #[serde(rename = "writeOnly", skip_serializing_if = "Option::is_none")]
    pub write_only_diff: Option<ValueDiff>,

    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_diff: Option<StringListDiff>,

    #[serde(rename = "required", skip_serializing_if = "Option::is_none")]
    pub required_diff: Option<StringListDiff>,

    #[serde(rename = "properties", skip_serializing_if = "Option::is_none")]
    pub properties_diff: Option<MapDiff<SchemaDiff>>,

    #[serde(rename = "items", skip_serializing_if = "Option::is_none")]
    pub items_diff: Option<Box<SchemaDiff>>,

    #[serde(rename = "allOf", skip_serializing_if = "Option::is_none")]
    pub all_of_diff: Option<SchemaListDiff>,

    #[serde(rename = "oneOf", skip_serializing_if = "Option::is_none")]
    pub one_of_diff: Option<SchemaListDiff>,

    #[serde(rename = "anyOf", skip_serializing_if = "Option::is_none")]
    pub any_of_diff: Option<SchemaListDiff>,

    #[serde(rename = "not", skip_serializing_if = "Option::is_none")]
    pub not_diff: Option<Box<SchemaDiff>>,

    #[serde(rename = "minimum", skip_serializing_if = "Option::is_none")]
    pub minimum_diff: Option<ValueDiff>,

    #[serde(rename = "maximum", skip_serializing_if = "Option::is_none")]
    pub maximum_diff: Option<ValueDiff>,

    #[serde(rename = "exclusiveMinimum", skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum_diff: Option<ValueDiff>,

    #[serde(rename = "exclusiveMaximum", skip_serializing_if = "Option::is_none")]
    pub exclusive_maximum_diff: Option<ValueDiff>,

    #[serde(rename = "multipleOf", skip_serializing_if = "Option::is_none")]
    pub multiple_of_diff: Option<ValueDiff>,

    #[serde(rename = "minLength", skip_serializing_if = "Option::is_none")]
    pub min_length_diff: Option<ValueDiff>,

    #[serde(rename = "maxLength", skip_serializing_if = "Option::is_none")]
    pub max_length_diff: Option<ValueDiff>,

    #[serde(rename = "pattern", skip_serializing_if = "Option::is_none")]
    pub pattern_diff: Option<ValueDiff>,

    #[serde(rename = "minItems", skip_serializing_if = "Option::is_none")]
    pub min_items_diff: Option<ValueDiff>,

    #[serde(rename = "maxItems", skip_serializing_if = "Option::is_none")]
    pub max_items_diff: Option<ValueDiff>,

    #[serde(rename = "uniqueItems", skip_serializing_if = "Option::is_none")]
    pub unique_items_diff: Option<ValueDiff>,

    #[serde(rename = "example", skip_serializing_if = "Option::is_none")]
    pub example_diff: Option<ValueDiff>,
}

impl SchemaDiff {
    /// True when the comparison found nothing to report. Checked field by
    /// field; the struct as a whole is never compared against a zero value.
    pub fn is_empty(&self) -> bool {
        !self.schema_added
            && !self.schema_deleted
            && self.type_diff.is_none()
            && self.format_diff.is_none()
            && self.title_diff.is_none()
            && self.description_diff.is_none()
            && self.default_diff.is_none()
            && self.nullable_diff.is_none()
            && self.deprecated_diff.is_none()
            && self.read_only_diff.is_none()
            && self.write_only_diff.is_none()
            && self.enum_diff.is_none()
            && self.required_diff.is_none()
            && self.properties_diff.is_none()
            && self.items_diff.is_none()
            && self.all_of_diff.is_none()
            && self.one_of_diff.is_none()
            && self.any_of_diff.is_none()
            && self.not_diff.is_none()
            && self.minimum_diff.is_none()
            && self.maximum_diff.is_none()
            && self.exclusive_minimum_diff.is_none()
            && self.exclusive_maximum_diff.is_none()
            && self.multiple_of_diff.is_none()
            && self.min_length_diff.is_none()
            && self.max_length_diff.is_none()
            && self.pattern_diff.is_none()
            && self.min_items_diff.is_none()
            && self.max_items_diff.is_none()
            && self.unique_items_diff.is_none()
            && self.example_diff.is_none()
    }

    fn added() -> Self {
        SchemaDiff {
            schema_added: true,
            ..Default::default()
        }
    }

    fn deleted() -> Self {
        SchemaDiff {
            schema_deleted: true,
            ..Default::default()
        }
    }
}

/// Compare two optional schemas, covering presence changes
pub(crate) fn schema_ref_diff(
    state: &mut DiffState<'_>,
    schema1: Option<&SchemaRef>,
    schema2: Option<&SchemaRef>,
) -> Option<SchemaDiff> {
    match (schema1, schema2) {
        (None, None) => None,
        (None, Some(_)) => Some(SchemaDiff::added()),
        (Some(_), None) => Some(SchemaDiff::deleted()),
        (Some(schema1), Some(schema2)) => schema_pair_diff(state, schema1, schema2),
    }
}

/// Compare two schemas, guarding reference pairs against cycles.
///
/// Only pairs where both sides are references are guarded: a cyclic path
/// must pass through a reference pair, while an inline side strictly shrinks
/// with every level of recursion.
pub(crate) fn schema_pair_diff(
    state: &mut DiffState<'_>,
    schema1: &SchemaRef,
    schema2: &SchemaRef,
) -> Option<SchemaDiff> {
    match (schema1.reference(), schema2.reference()) {
        (Some(ref1), Some(ref2)) => {
            if !state.enter(ref1, ref2) {
                // Pair already open higher on this path
                return None;
            }
            let result = resolved_pair_diff(state, schema1, schema2);
            state.leave(ref1, ref2);
            result
        }
        _ => resolved_pair_diff(state, schema1, schema2),
    }
}

fn resolved_pair_diff(
    state: &mut DiffState<'_>,
    schema1: &SchemaRef,
    schema2: &SchemaRef,
) -> Option<SchemaDiff> {
    let resolved1 = match schema1 {
        SchemaRef::Inline(schema) => Some(schema.as_ref()),
        SchemaRef::Reference { reference } => state.resolve_base(reference),
    };
    let resolved2 = match schema2 {
        SchemaRef::Inline(schema) => Some(schema.as_ref()),
        SchemaRef::Reference { reference } => state.resolve_revision(reference),
    };

    // An unresolvable reference is treated as an absent schema
    match (resolved1, resolved2) {
        (Some(schema1), Some(schema2)) => {
            let diff = schema_fields_diff(state, schema1, schema2);
            if diff.is_empty() {
                None
            } else {
                Some(diff)
            }
        }
        (None, Some(_)) => Some(SchemaDiff::added()),
        (Some(_), None) => Some(SchemaDiff::deleted()),
        (None, None) => None,
    }
}

fn schema_fields_diff(state: &mut DiffState<'_>, schema1: &Schema, schema2: &Schema) -> SchemaDiff {
    let config = state.config;

    let enum1: Vec<String> = schema1.enum_values.iter().map(|v| v.to_string()).collect();
    let enum2: Vec<String> = schema2.enum_values.iter().map(|v| v.to_string()).collect();

    let mut result = SchemaDiff {
        type_diff: value_diff(&schema1.schema_type, &schema2.schema_type),
        format_diff: value_diff(&schema1.format, &schema2.format),
        default_diff: value_diff(&schema1.default, &schema2.default),
        nullable_diff: value_diff(&schema1.nullable, &schema2.nullable),
        deprecated_diff: value_diff(&schema1.deprecated, &schema2.deprecated),
        read_only_diff: value_diff(&schema1.read_only, &schema2.read_only),
        write_only_diff: value_diff(&schema1.write_only, &schema2.write_only),
        enum_diff: sequence_diff(&enum1, &enum2),
        required_diff: set_diff(&schema1.required, &schema2.required),
        minimum_diff: value_diff(&schema1.minimum, &schema2.minimum),
        maximum_diff: value_diff(&schema1.maximum, &schema2.maximum),
        exclusive_minimum_diff: value_diff(&schema1.exclusive_minimum, &schema2.exclusive_minimum),
        exclusive_maximum_diff: value_diff(&schema1.exclusive_maximum, &schema2.exclusive_maximum),
        multiple_of_diff: value_diff(&schema1.multiple_of, &schema2.multiple_of),
        min_length_diff: value_diff(&schema1.min_length, &schema2.min_length),
        max_length_diff: value_diff(&schema1.max_length, &schema2.max_length),
        pattern_diff: value_diff(&schema1.pattern, &schema2.pattern),
        min_items_diff: value_diff(&schema1.min_items, &schema2.min_items),
        max_items_diff: value_diff(&schema1.max_items, &schema2.max_items),
        unique_items_diff: value_diff(&schema1.unique_items, &schema2.unique_items),
        ..Default::default()
    };

    if config.include_descriptions {
        result.title_diff = value_diff(&schema1.title, &schema2.title);
        result.description_diff = value_diff(&schema1.description, &schema2.description);
    }

    if config.include_examples {
        result.example_diff = value_diff(&schema1.example, &schema2.example);
    }

    result.properties_diff = map_diff(&schema1.properties, &schema2.properties, |_, p1, p2| {
        schema_pair_diff(state, p1, p2)
    })
    .into_option();

    result.items_diff =
        schema_ref_diff(state, schema1.items.as_deref(), schema2.items.as_deref()).map(Box::new);
    result.not_diff =
        schema_ref_diff(state, schema1.not.as_deref(), schema2.not.as_deref()).map(Box::new);

    result.all_of_diff = schema_list_diff(state, &schema1.all_of, &schema2.all_of);
    result.one_of_diff = schema_list_diff(state, &schema1.one_of, &schema2.one_of);
    result.any_of_diff = schema_list_diff(state, &schema1.any_of, &schema2.any_of);

    result
}
