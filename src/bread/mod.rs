//! A small recipe service built on the handler adapter.
//!
//! # Routes
//! - `GET /` greeting
//! - `GET /bread/saveRecipe` store a recipe from query parameters
//! - `GET /bread/getRecipe` fetch a recipe as JSON
//! - `GET /bread/recipes/{name}` recipe as an HTML page
//! - `GET /bread/find` redirect to the recipe page

pub mod handlers;
pub mod recipe;
pub mod store;

use std::sync::Arc;

use axum::extract::Request;
use axum::routing::get;
use axum::Router;
use minijinja::{Environment, UndefinedBehavior};

use crate::handler::{with, Handler, Params, With};
use crate::response::Response;

pub use recipe::{DoughRecipe, RecipeError};
pub use store::{RecipeStore, StoreError};

pub(crate) const RECIPE_TEMPLATE: &str = "recipe.html";

const RECIPE_SOURCE: &str = r#"<!doctype html>
<title>{{ recipe.name }}</title>
<h1>{{ recipe.name }}</h1>
<ul>
  <li>Flour: {{ recipe.gFlour }} g</li>
  <li>Water: {{ recipe.gWater }} g</li>
  <li>Starter: {{ recipe.gStarter }} g</li>
  <li>Salt: {{ recipe.gSalt }} g</li>
</ul>
"#;

/// Shared state of the recipe service.
#[derive(Clone)]
pub struct Bakery {
    pub store: RecipeStore,
    pub templates: Arc<Environment<'static>>,
}

impl Bakery {
    pub fn new() -> Self {
        Self::with_store(RecipeStore::new())
    }

    pub fn with_store(store: RecipeStore) -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        if let Err(e) = env.add_template(RECIPE_TEMPLATE, RECIPE_SOURCE) {
            // recipe pages answer 500 through template_or_error
            tracing::error!(error = %e, "Failed to compile recipe template");
        }

        Self {
            store,
            templates: Arc::new(env),
        }
    }
}

impl Default for Bakery {
    fn default() -> Self {
        Self::new()
    }
}

/// Adapt a bakery handler to the `(Request, Params) -> Response` contract.
fn route<F>(bakery: &Bakery, f: F) -> With<impl Handler>
where
    F: Fn(&Bakery, &Request, &Params) -> Response + Clone + Send + Sync + 'static,
{
    let bakery = bakery.clone();
    with(move |req: Request, params: Params| {
        let bakery = bakery.clone();
        let f = f.clone();
        async move { f(&bakery, &req, &params) }
    })
}

/// Build the recipe routes.
pub fn routes(bakery: Bakery) -> Router {
    Router::new()
        .route("/", get(route(&bakery, handlers::hello)))
        .route("/bread/saveRecipe", get(route(&bakery, handlers::save_recipe)))
        .route("/bread/getRecipe", get(route(&bakery, handlers::get_recipe)))
        .route("/bread/recipes/{name}", get(route(&bakery, handlers::recipe_page)))
        .route("/bread/find", get(route(&bakery, handlers::find_recipe)))
}
