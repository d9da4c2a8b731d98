use crate::config::DiffConfig;
use specdiff_common::{Schema, SchemaRef, Spec};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Per-invocation comparison state: the resolution tables of both documents
/// and the reference pairs currently being compared on the call stack.
///
/// Built fresh inside every top-level diff call and never shared.
pub(crate) struct DiffState<'a> {
    pub config: DiffConfig,
    schemas1: Option<&'a BTreeMap<String, SchemaRef>>,
    schemas2: Option<&'a BTreeMap<String, SchemaRef>>,
    in_progress: HashSet<(String, String)>,
}

impl<'a> DiffState<'a> {
    pub fn new(config: DiffConfig, spec1: &'a Spec, spec2: &'a Spec) -> Self {
        Self {
            config,
            schemas1: spec1.components.as_ref().map(|c| &c.schemas),
            schemas2: spec2.components.as_ref().map(|c| &c.schemas),
            in_progress: HashSet::new(),
        }
    }

    /// Resolve a reference against the base document's components
    pub fn resolve_base(&self, reference: &str) -> Option<&'a Schema> {
        let resolved = resolve(self.schemas1, reference);
        if resolved.is_none() {
            debug!("Unresolvable schema reference '{}' in base document", reference);
        }
        resolved
    }

    /// Resolve a reference against the revision document's components
    pub fn resolve_revision(&self, reference: &str) -> Option<&'a Schema> {
        let resolved = resolve(self.schemas2, reference);
        if resolved.is_none() {
            debug!(
                "Unresolvable schema reference '{}' in revision document",
                reference
            );
        }
        resolved
    }

    /// Mark a reference pair as being compared. Returns false when the pair
    /// is already open higher on the call stack, i.e. a cycle.
    pub fn enter(&mut self, ref1: &str, ref2: &str) -> bool {
        self.in_progress
            .insert((ref1.to_string(), ref2.to_string()))
    }

    pub fn leave(&mut self, ref1: &str, ref2: &str) {
        self.in_progress
            .remove(&(ref1.to_string(), ref2.to_string()));
    }
}

/// Follow a reference through the components table, including alias chains
/// (a named schema that is itself a reference). Alias loops resolve to None.
fn resolve<'a>(
    schemas: Option<&'a BTreeMap<String, SchemaRef>>,
    reference: &str,
) -> Option<&'a Schema> {
    let schemas = schemas?;
    let mut seen = HashSet::new();
    let mut name = last_segment(reference);

    loop {
        if !seen.insert(name.to_string()) {
            return None;
        }

        match schemas.get(name)? {
            SchemaRef::Inline(schema) => return Some(schema.as_ref()),
            SchemaRef::Reference { reference } => name = last_segment(reference),
        }
    }
}

fn last_segment(reference: &str) -> &str {
    reference.rsplit('/').next().unwrap_or(reference)
}
