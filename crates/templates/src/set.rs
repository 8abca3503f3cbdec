use std::collections::HashMap;

use rand::seq::IndexedRandom;

use crate::error::{Error, Result};

/// The response templates of one identity, keyed by category name.
///
/// Immutable after construction; categories are loaded from the startup
/// config.
#[derive(Debug, Clone, Default)]
pub struct TemplateSet {
    identity: String,
    categories: HashMap<String, Vec<String>>,
}

impl TemplateSet {
    #[must_use]
    pub fn new(identity: impl Into<String>, categories: HashMap<String, Vec<String>>) -> Self {
        Self {
            identity: identity.into(),
            categories,
        }
    }

    /// Pick one candidate from `category` uniformly at random.
    ///
    /// The candidate may still contain `{placeholder}` tokens; callers that
    /// need them expanded pass it through [`crate::render`].
    pub fn pick(&self, category: &str) -> Result<String> {
        self.categories
            .get(category)
            .and_then(|list| list.choose(&mut rand::rng()))
            .cloned()
            .ok_or_else(|| Error::missing(&self.identity, category))
    }

    /// Whether `category` has at least one candidate.
    #[must_use]
    pub fn has(&self, category: &str) -> bool {
        self.categories
            .get(category)
            .is_some_and(|list| !list.is_empty())
    }
}
