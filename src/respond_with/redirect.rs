//! HTTP redirects relative to the current request.

use axum::http::header::{CONTENT_TYPE, LOCATION};
use axum::http::{HeaderMap, HeaderValue, Method, Request, StatusCode};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use url::Url;

use crate::response::Response;

/// Control bytes, DEL and everything outside ASCII.
const LOCATION_ESCAPE: &AsciiSet = &CONTROLS.add(0x7f);

/// Redirect to `target`, which may be a path relative to the request path.
///
/// `code` should be in the 3xx range, usually `MOVED_PERMANENTLY`, `FOUND`
/// or `SEE_OTHER`. Unless the request already carries a `Content-Type`
/// header, `GET` and `HEAD` requests get `text/html; charset=utf-8`, and `GET`
/// requests additionally get a small HTML body linking to the target.
pub fn redirect<B>(req: &Request<B>, target: &str, code: StatusCode) -> Response {
    let target = resolve_target(req.uri().path(), target);
    let location = utf8_percent_encode(&target, LOCATION_ESCAPE).to_string();

    let mut res = Response::new(code).with_header_option(move |hdr: &mut HeaderMap| {
        if let Ok(value) = HeaderValue::from_str(&location) {
            hdr.insert(LOCATION, value);
        }
    });

    if req.headers().contains_key(CONTENT_TYPE) {
        return res;
    }

    let method = req.method();
    if method == Method::GET || method == Method::HEAD {
        res = res.with_header_option(|hdr: &mut HeaderMap| {
            hdr.insert(CONTENT_TYPE, HeaderValue::from_static("text/html; charset=utf-8"));
        });
    }

    if method == Method::GET {
        let body = format!(
            "<a href=\"{}\">{}</a>.\n",
            html_escape(&target),
            code.canonical_reason().unwrap_or("")
        );
        res = res.body(body);
    }

    res
}

/// Make a relative target absolute against `current_path`. Targets with a
/// scheme or host are returned unchanged.
fn resolve_target(current_path: &str, target: &str) -> String {
    if !is_relative(target) {
        return target.to_string();
    }

    let current_path = if current_path.is_empty() { "/" } else { current_path };

    let joined = if target.starts_with('/') {
        target.to_string()
    } else {
        let dir = match current_path.rfind('/') {
            Some(i) => &current_path[..=i],
            None => "",
        };
        format!("{}{}", dir, target)
    };

    let (path, query) = match joined.find('?') {
        Some(i) => joined.split_at(i),
        None => (joined.as_str(), ""),
    };

    let trailing = path.ends_with('/');
    let mut resolved = clean_path(path);
    if trailing && !resolved.ends_with('/') {
        resolved.push('/');
    }
    resolved.push_str(query);
    resolved
}

fn is_relative(target: &str) -> bool {
    match Url::parse(target) {
        Ok(_) => false,
        // "//host/path" keeps the request scheme but names a host
        Err(url::ParseError::RelativeUrlWithoutBase) => !target.starts_with("//"),
        Err(_) => false,
    }
}

/// Lexically simplify a slash-separated path: drop empty and `.` segments,
/// resolve `..` against the preceding segment. Never touches the filesystem.
pub(crate) fn clean_path(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if rooted => {}
                _ => segments.push(".."),
            },
            s => segments.push(s),
        }
    }

    let joined = segments.join("/");
    if rooted {
        format!("/{}", joined)
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(method: Method, path: &str) -> Request<()> {
        Request::builder().method(method).uri(path).body(()).unwrap()
    }

    fn location(res: &Response) -> String {
        res.headers()
            .get(LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_clean_path() {
        let cases = [
            ("", "."),
            ("/", "/"),
            ("/a/b/../c", "/a/c"),
            ("/a/./b//c/", "/a/b/c"),
            ("/../a", "/a"),
            ("a/../../b", "../b"),
            ("a/..", "."),
            ("../../x/./y", "../../x/y"),
        ];
        for (input, expected) in cases {
            assert_eq!(clean_path(input), expected, "clean_path({:?})", input);
        }
    }

    #[test]
    fn test_resolve_relative_parent() {
        assert_eq!(resolve_target("/a/b", "../c"), "/a/c");
        assert_eq!(resolve_target("/a/b", "c"), "/a/c");
        assert_eq!(resolve_target("/a/b", ""), "/a/");
    }

    #[test]
    fn test_resolve_preserves_trailing_slash() {
        assert_eq!(resolve_target("/a/b/", "sub/"), "/a/b/sub/");
        assert_eq!(resolve_target("/a/b/", "./"), "/a/b/");
    }

    #[test]
    fn test_resolve_keeps_query_out_of_cleaning() {
        assert_eq!(resolve_target("/a/b", "c?next=../d"), "/a/c?next=../d");
        assert_eq!(resolve_target("/a/b", "/x/./y?q=1"), "/x/y?q=1");
    }

    #[test]
    fn test_absolute_targets_untouched() {
        assert_eq!(
            resolve_target("/a/b", "https://example.com/../x"),
            "https://example.com/../x"
        );
        assert_eq!(resolve_target("/a/b", "//cdn.example.com/x"), "//cdn.example.com/x");
    }

    #[test]
    fn test_location_escapes_controls_only() {
        let req = request(Method::POST, "/");
        let cases = [
            ("/plain/path?q=1", "/plain/path?q=1"),
            ("/rye bread", "/rye bread"),
            ("/a\nb\x7f", "/a%0Ab%7F"),
        ];
        for (target, expected) in cases {
            let res = redirect(&req, target, StatusCode::FOUND);
            assert_eq!(location(&res), expected, "redirect to {:?}", target);
        }
    }

    #[test]
    fn test_get_redirect_has_html_body() {
        let req = request(Method::GET, "/bread/find");
        let res = redirect(&req, "recipes/<rye>", StatusCode::SEE_OTHER);
        let headers = res.headers();

        assert_eq!(res.status, Some(StatusCode::SEE_OTHER));
        assert_eq!(location(&res), "/bread/recipes/<rye>");
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "text/html; charset=utf-8");
        assert_eq!(
            res.body_bytes().unwrap(),
            "<a href=\"/bread/recipes/&lt;rye&gt;\">See Other</a>.\n"
        );
    }

    #[test]
    fn test_head_redirect_has_content_type_only() {
        let req = request(Method::HEAD, "/a/b");
        let res = redirect(&req, "../c", StatusCode::FOUND);

        assert_eq!(location(&res), "/a/c");
        assert_eq!(res.headers().get(CONTENT_TYPE).unwrap(), "text/html; charset=utf-8");
        assert!(res.body.is_none());
    }

    #[test]
    fn test_post_redirect_has_no_body() {
        let req = request(Method::POST, "/a/b");
        let res = redirect(&req, "../c", StatusCode::FOUND);

        assert_eq!(location(&res), "/a/c");
        assert!(res.headers().get(CONTENT_TYPE).is_none());
        assert!(res.body.is_none());
    }

    #[test]
    fn test_existing_content_type_disables_defaults() {
        let req = Request::builder()
            .method(Method::GET)
            .uri("/a/b")
            .header(CONTENT_TYPE, "application/json")
            .body(())
            .unwrap();
        let res = redirect(&req, "c", StatusCode::MOVED_PERMANENTLY);

        assert_eq!(location(&res), "/a/c");
        assert!(res.headers().get(CONTENT_TYPE).is_none());
        assert!(res.body.is_none());
    }

    #[test]
    fn test_non_ascii_location_is_escaped() {
        let req = request(Method::GET, "/");
        let res = redirect(&req, "/brötchen", StatusCode::FOUND);

        assert_eq!(location(&res), "/br%C3%B6tchen");
        assert_eq!(
            res.body_bytes().unwrap(),
            "<a href=\"/brötchen\">Found</a>.\n"
        );
    }
}
