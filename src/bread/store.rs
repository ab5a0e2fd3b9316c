//! In-memory recipe storage.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use thiserror::Error;

use crate::bread::recipe::DoughRecipe;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("recipe with that name already exists: {0}")]
    Exists(String),
}

/// A thread-safe recipe map keyed by name. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct RecipeStore {
    inner: Arc<DashMap<String, DoughRecipe>>,
}

impl RecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<DoughRecipe> {
        self.inner.get(name).map(|r| r.value().clone())
    }

    /// Store a recipe. Existing names are never overwritten.
    pub fn put(&self, recipe: DoughRecipe) -> Result<(), StoreError> {
        match self.inner.entry(recipe.name.clone()) {
            Entry::Occupied(_) => Err(StoreError::Exists(recipe.name)),
            Entry::Vacant(slot) => {
                tracing::info!(recipe = %recipe.name, "Recipe stored");
                slot.insert(recipe);
                Ok(())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
