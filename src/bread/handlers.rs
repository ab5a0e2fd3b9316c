//! Pure handlers for the recipe routes.
//!
//! Each handler reads the request and returns a [`Response`]; none of them
//! touches the connection.

use std::collections::HashMap;

use axum::extract::Request;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use minijinja::context;

use crate::bread::recipe::DoughRecipe;
use crate::bread::store::StoreError;
use crate::bread::Bakery;
use crate::handler::Params;
use crate::observability::hooks::log_outcome;
use crate::respond_with::{json_or_error, redirect, template_or_error};
use crate::response::Response;
use crate::{errorf, stringf};

fn query_pairs(req: &Request) -> HashMap<String, String> {
    let query = req.uri().query().unwrap_or("");
    url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}

/// `GET /`
pub fn hello(_: &Bakery, _: &Request, _: &Params) -> Response {
    stringf!("Hello, World!")
}

/// `GET /bread/saveRecipe?name=..&gFlour=..&gSalt=..&gStarter=..&gWater=..`
pub fn save_recipe(bakery: &Bakery, req: &Request, _: &Params) -> Response {
    let recipe = DoughRecipe::from_query(&query_pairs(req));

    if let Err(e) = recipe.validate() {
        return errorf!(StatusCode::BAD_REQUEST, "error: {}", e);
    }

    let name = recipe.name.clone();
    if let Err(StoreError::Exists(_)) = bakery.store.put(recipe) {
        return errorf!(
            StatusCode::BAD_REQUEST,
            "error: recipe already exists, please choose a different name"
        );
    }

    stringf!("Ok! We saved your recipe under the name '{}'!", name)
        .with_hooks([log_outcome("save_recipe")])
}

/// `GET /bread/getRecipe?name=..`
pub fn get_recipe(bakery: &Bakery, req: &Request, _: &Params) -> Response {
    let query = query_pairs(req);
    let name = match query.get("name") {
        Some(name) if !name.is_empty() => name,
        _ => return errorf!(StatusCode::BAD_REQUEST, "error: must specify a recipe name"),
    };

    match bakery.store.get(name) {
        Some(recipe) => json_or_error(&recipe).with_hooks([log_outcome("get_recipe")]),
        None => errorf!(StatusCode::BAD_REQUEST, "error: recipe does not exist"),
    }
}

/// `GET /bread/recipes/{name}`
pub fn recipe_page(bakery: &Bakery, _: &Request, params: &Params) -> Response {
    let Some(recipe) = params.by_name("name").and_then(|name| bakery.store.get(name)) else {
        return errorf!(StatusCode::NOT_FOUND, "error: recipe does not exist");
    };

    let template = bakery.templates.get_template(super::RECIPE_TEMPLATE).ok();
    let res = template_or_error(template.as_ref(), context! { recipe => recipe });
    if res.status != Some(StatusCode::OK) {
        return res;
    }

    res.with_header_option(|hdr: &mut HeaderMap| {
        hdr.insert(CONTENT_TYPE, HeaderValue::from_static("text/html; charset=utf-8"));
    })
}

/// `GET /bread/find?name=..` redirects to the recipe page.
pub fn find_recipe(_: &Bakery, req: &Request, _: &Params) -> Response {
    match query_pairs(req).get("name") {
        Some(name) if !name.is_empty() => {
            redirect(req, &format!("recipes/{}", name), StatusCode::SEE_OTHER)
        }
        _ => errorf!(StatusCode::BAD_REQUEST, "error: must specify a recipe name"),
    }
}
