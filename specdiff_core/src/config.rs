use serde::{Deserialize, Serialize};

/// Options controlling which fields participate in a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffConfig {
    /// Compare summary, description and title fields
    pub include_descriptions: bool,
    /// Compare example values
    pub include_examples: bool,
}

impl DiffConfig {
    pub fn new() -> Self {
        Self {
            include_descriptions: true,
            include_examples: true,
        }
    }

    pub fn with_descriptions(mut self, include: bool) -> Self {
        self.include_descriptions = include;
        self
    }

    pub fn with_examples(mut self, include: bool) -> Self {
        self.include_examples = include;
        self
    }
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self::new()
    }
}
