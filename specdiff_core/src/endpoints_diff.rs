use crate::config::DiffConfig;
use crate::map_diff::map_diff;
use crate::operation_diff::{operation_diff, OperationDiff};
use crate::state::DiffState;
use regex::Regex;
use serde::Serialize;
use specdiff_common::{Operation, Spec};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Difference between two API descriptions, keyed by "METHOD path" endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct DiffResult {
    /// Endpoints only in the revision, sorted
    #[serde(rename = "addedEndpoints", skip_serializing_if = "Vec::is_empty")]
    pub added_endpoints: Vec<String>,

    /// Endpoints only in the base, sorted
    #[serde(rename = "deletedEndpoints", skip_serializing_if = "Vec::is_empty")]
    pub deleted_endpoints: Vec<String>,

    /// Endpoints on both sides whose operations differ
    #[serde(rename = "modifiedEndpoints", skip_serializing_if = "BTreeMap::is_empty")]
    pub modified_endpoints: BTreeMap<String, OperationDiff>,
}

impl DiffResult {
    pub fn is_empty(&self) -> bool {
        self.added_endpoints.is_empty()
            && self.deleted_endpoints.is_empty()
            && self.modified_endpoints.is_empty()
    }

    /// Keep only endpoints whose key matches `pattern`, returning a new
    /// result and leaving the receiver untouched.
    ///
    /// An invalid pattern logs a warning and returns the result unfiltered;
    /// filtering fails open rather than failing the pipeline.
    pub fn filter_by_regex(&self, pattern: &str) -> DiffResult {
        let regex = match Regex::new(pattern) {
            Ok(regex) => regex,
            Err(error) => {
                warn!("Failed to compile endpoint filter '{}': {}", pattern, error);
                return self.clone();
            }
        };

        DiffResult {
            added_endpoints: filter_endpoints(&self.added_endpoints, &regex),
            deleted_endpoints: filter_endpoints(&self.deleted_endpoints, &regex),
            modified_endpoints: self
                .modified_endpoints
                .iter()
                .filter(|(endpoint, _)| regex.is_match(endpoint))
                .map(|(endpoint, diff)| (endpoint.clone(), diff.clone()))
                .collect(),
        }
    }

    /// Headline counts for quick reporting
    pub fn summary(&self) -> DiffSummary {
        DiffSummary {
            diff: !self.is_empty(),
            added_endpoints: self.added_endpoints.len(),
            deleted_endpoints: self.deleted_endpoints.len(),
            modified_endpoints: self.modified_endpoints.len(),
        }
    }
}

fn filter_endpoints(endpoints: &[String], regex: &Regex) -> Vec<String> {
    endpoints
        .iter()
        .filter(|endpoint| regex.is_match(endpoint))
        .cloned()
        .collect()
}

/// Headline numbers of a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    /// Whether any difference was found
    pub diff: bool,

    #[serde(rename = "addedEndpoints")]
    pub added_endpoints: usize,

    #[serde(rename = "deletedEndpoints")]
    pub deleted_endpoints: usize,

    #[serde(rename = "modifiedEndpoints")]
    pub modified_endpoints: usize,
}

/// Engine for comparing two API descriptions
pub struct SpecDiffEngine {
    config: DiffConfig,
}

impl SpecDiffEngine {
    pub fn new() -> Self {
        Self {
            config: DiffConfig::default(),
        }
    }

    pub fn with_config(mut self, config: DiffConfig) -> Self {
        self.config = config;
        self
    }

    /// Compare two documents endpoint by endpoint
    pub fn diff(&self, base: &Spec, revision: &Spec) -> DiffResult {
        let endpoints1 = to_endpoint_map(base);
        let endpoints2 = to_endpoint_map(revision);

        info!(
            "Comparing {} base endpoints with {} revision endpoints",
            endpoints1.len(),
            endpoints2.len()
        );

        let mut state = DiffState::new(self.config, base, revision);
        let diff = map_diff(&endpoints1, &endpoints2, |_, operation1, operation2| {
            operation_diff(&mut state, operation1, operation2)
        });

        let result = DiffResult {
            added_endpoints: diff.added,
            deleted_endpoints: diff.deleted,
            modified_endpoints: diff.modified,
        };

        debug!(
            "Found {} added, {} deleted, {} modified endpoints",
            result.added_endpoints.len(),
            result.deleted_endpoints.len(),
            result.modified_endpoints.len()
        );

        result
    }
}

impl Default for SpecDiffEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Flatten a document into "METHOD path" -> operation
fn to_endpoint_map(spec: &Spec) -> BTreeMap<String, &Operation> {
    let mut result = BTreeMap::new();
    for (path, item) in &spec.paths {
        for (method, operation) in item.operations() {
            result.insert(format!("{} {}", method, path), operation);
        }
    }
    result
}
