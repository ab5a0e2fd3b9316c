//! JSON and template responses.

use axum::http::StatusCode;
use minijinja::Template;
use serde::Serialize;

use super::basic::{bytes, error, set_content_json};
use crate::response::Response;

pub const JSON_ERROR_MESSAGE: &str = "server failed to marshal JSON response";
pub const TEMPLATE_ERROR_MESSAGE: &str = "server failed to execute template";
pub const NIL_TEMPLATE_MESSAGE: &str =
    "server failed to execute template (nil template specified)";

/// Serialize `value` as JSON with status 200 and `application/json`, or
/// answer 500 with [`JSON_ERROR_MESSAGE`].
///
/// Serialization goes through the value's own `Serialize` implementation, so
/// types with a hand-written encoding are respected.
pub fn json_or_error<T>(value: &T) -> Response
where
    T: Serialize + ?Sized,
{
    match serde_json::to_vec(value) {
        Ok(body) => bytes(StatusCode::OK, body).with_header_option(set_content_json),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize JSON response");
            error(StatusCode::INTERNAL_SERVER_ERROR, JSON_ERROR_MESSAGE)
        }
    }
}

/// Render `template` with `ctx` and answer 200 with the output.
///
/// A missing template or a render failure answers 500 with a fixed message.
pub fn template_or_error<S>(template: Option<&Template<'_, '_>>, ctx: S) -> Response
where
    S: Serialize,
{
    let Some(template) = template else {
        tracing::error!("No template given to render");
        return error(StatusCode::INTERNAL_SERVER_ERROR, NIL_TEMPLATE_MESSAGE);
    };

    match template.render(ctx) {
        Ok(rendered) => Response::new(StatusCode::OK).body(rendered),
        Err(e) => {
            tracing::error!(template = template.name(), error = %e, "Failed to render template");
            error(StatusCode::INTERNAL_SERVER_ERROR, TEMPLATE_ERROR_MESSAGE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::CONTENT_TYPE;
    use minijinja::{context, Environment, UndefinedBehavior};
    use serde::ser::{Error as _, Serializer};
    use serde::Deserialize;
    use std::collections::HashMap;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Loaf {
        name: String,
        grams: u32,
        seeds: Vec<String>,
    }

    struct Leaky;

    impl Serialize for Leaky {
        fn serialize<S: Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("db password is hunter2"))
        }
    }

    struct Shouting(&'static str);

    impl Serialize for Shouting {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.0.to_uppercase())
        }
    }

    #[test]
    fn test_json_round_trip() {
        let loaf = Loaf {
            name: "Pompeii Sourdough".into(),
            grams: 1600,
            seeds: vec!["sesame".into(), "poppy".into()],
        };

        let res = json_or_error(&loaf);
        assert_eq!(res.status, Some(StatusCode::OK));
        assert_eq!(res.headers().get(CONTENT_TYPE).unwrap(), "application/json");

        let decoded: Loaf = serde_json::from_slice(res.body_bytes().unwrap()).unwrap();
        assert_eq!(decoded, loaf);
    }

    #[test]
    fn test_json_uses_custom_serialization() {
        let res = json_or_error(&Shouting("rye"));
        assert_eq!(res.body_bytes().unwrap(), "\"RYE\"");
    }

    #[test]
    fn test_json_failure_hides_error() {
        let res = json_or_error(&Leaky);
        assert_eq!(res.status, Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(res.body_bytes().unwrap(), JSON_ERROR_MESSAGE);
        assert_eq!(
            res.headers().get(CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );

        let mut by_pair = HashMap::new();
        by_pair.insert((1, 2), "tuple keys are not valid JSON object keys");
        let res = json_or_error(&by_pair);
        assert_eq!(res.status, Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(res.body_bytes().unwrap(), JSON_ERROR_MESSAGE);
    }

    #[test]
    fn test_template_renders() {
        let mut env = Environment::new();
        env.add_template("loaf.html", "<h1>{{ name }}</h1>").unwrap();
        let tmpl = env.get_template("loaf.html").unwrap();

        let res = template_or_error(Some(&tmpl), context! { name => "Rye & Spelt" });
        assert_eq!(res.status, Some(StatusCode::OK));
        assert_eq!(res.body_bytes().unwrap(), "<h1>Rye &amp; Spelt</h1>");
        assert!(res.headers().is_empty());
    }

    #[test]
    fn test_nil_template() {
        let res = template_or_error(None, context! { name => "rye" });
        assert_eq!(res.status, Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(res.body_bytes().unwrap(), NIL_TEMPLATE_MESSAGE);
    }

    #[test]
    fn test_template_failure_hides_error() {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.add_template("loaf.html", "{{ loaf.crumb }}").unwrap();
        let tmpl = env.get_template("loaf.html").unwrap();

        let res = template_or_error(Some(&tmpl), context! { loaf => context! { name => "rye" } });
        assert_eq!(res.status, Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(res.body_bytes().unwrap(), TEMPLATE_ERROR_MESSAGE);
    }
}
