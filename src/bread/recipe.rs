//! Dough recipes and their validation rules.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a recipe was rejected.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum RecipeError {
    #[error("recipe must have a name")]
    MissingName,

    #[error("recipe must have flour, water, salt and starter")]
    MissingIngredient,

    #[error("less flour than starter; acidity will be very high")]
    TooMuchStarter,

    #[error("more salt than flour; please don't")]
    TooMuchSalt,
}

/// Ingredient weights in grams.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoughRecipe {
    pub name: String,
    pub g_flour: i64,
    pub g_salt: i64,
    pub g_starter: i64,
    pub g_water: i64,
}

impl DoughRecipe {
    /// Build a recipe from query parameters. Missing or non-numeric weights
    /// become zero and are caught by [`validate`](Self::validate).
    pub fn from_query(query: &HashMap<String, String>) -> Self {
        let grams = |key: &str| {
            query
                .get(key)
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(0)
        };

        Self {
            name: query.get("name").cloned().unwrap_or_default(),
            g_flour: grams("gFlour"),
            g_salt: grams("gSalt"),
            g_starter: grams("gStarter"),
            g_water: grams("gWater"),
        }
    }

    pub fn validate(&self) -> Result<(), RecipeError> {
        if self.name.is_empty() {
            return Err(RecipeError::MissingName);
        }

        let weights = [self.g_flour, self.g_water, self.g_salt, self.g_starter];
        if weights.iter().any(|&g| g < 1) {
            return Err(RecipeError::MissingIngredient);
        }

        if self.g_flour < self.g_starter {
            return Err(RecipeError::TooMuchStarter);
        }

        if self.g_salt > self.g_flour {
            return Err(RecipeError::TooMuchSalt);
        }

        Ok(())
    }
}
