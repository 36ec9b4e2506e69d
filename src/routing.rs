//! Request path validation and dispatch.
//!
//! Every title-based route goes through [`make_handler`], which runs
//! [`extract`] on the request path before the page handler sees anything.
//! [`extract`] is the only place titles are checked.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::LazyLock;

use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{any, get},
};
use log::{debug, warn};
use regex::Regex;
use thiserror::Error;

use crate::handlers;
use crate::types::AppState;

static VALID_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/(edit|save|view)/([a-zA-Z0-9]+)$").expect("valid page path regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Edit,
    Save,
    View,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Edit => "edit",
            Operation::Save => "save",
            Operation::View => "view",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A well-formed page path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub operation: Operation,
    pub title: String,
}

/// A path that is not `/{edit,save,view}/<alphanumeric title>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid page path {0:?}")]
pub struct Rejected(pub String);

impl IntoResponse for Rejected {
    fn into_response(self) -> Response {
        warn!("Rejected path: {:?}", self.0);
        (StatusCode::NOT_FOUND, "404 page not found").into_response()
    }
}

/// Split a request path into its operation and page title.
pub fn extract(path: &str) -> Result<Route, Rejected> {
    let caps = VALID_PATH
        .captures(path)
        .ok_or_else(|| Rejected(path.to_string()))?;

    let operation = match &caps[1] {
        "edit" => Operation::Edit,
        "save" => Operation::Save,
        _ => Operation::View,
    };

    Ok(Route {
        operation,
        title: caps[2].to_string(),
    })
}

/// Percent-decode a request path. Paths that do not decode to UTF-8 are
/// rejected.
pub fn decode_path(raw: &str) -> Result<String, Rejected> {
    urlencoding::decode(raw)
        .map(|path| path.into_owned())
        .map_err(|_| Rejected(raw.to_string()))
}

pub type HandlerFuture = Pin<Box<dyn Future<Output = Response> + Send>>;

/// Wrap a handler taking a page title into an axum handler taking the whole
/// request. Malformed paths get a 404 and never reach `handler`.
pub fn make_handler<F, Fut, R>(
    handler: F,
) -> impl Fn(State<AppState>, Request) -> HandlerFuture + Clone + Send + Sync + 'static
where
    F: Fn(AppState, Request, String) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    move |State(state): State<AppState>, request: Request| -> HandlerFuture {
        let handler = handler.clone();
        Box::pin(async move {
            let route = match decode_path(request.uri().path()).and_then(|path| extract(&path)) {
                Ok(route) => route,
                Err(rejected) => return rejected.into_response(),
            };
            debug!("Dispatching {} for {:?}", route.operation, route.title);
            handler(state, request, route.title).await.into_response()
        })
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let view = make_handler(handlers::view);
    let edit = make_handler(handlers::edit);
    let save = make_handler(handlers::save);

    Router::new()
        .route("/", any(handlers::index))
        .route("/view/*rest", get(view.clone()).post(view))
        .route("/edit/*rest", get(edit.clone()).post(edit))
        .route("/save/*rest", get(save.clone()).post(save))
        .fallback(handlers::not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extracts_operation_and_title() {
        assert_eq!(
            extract("/view/Foo123").unwrap(),
            Route { operation: Operation::View, title: "Foo123".to_string() }
        );
        assert_eq!(extract("/edit/a").unwrap().operation, Operation::Edit);
        assert_eq!(extract("/save/Z9").unwrap().operation, Operation::Save);
    }

    #[test]
    fn rejects_malformed_paths() {
        for path in [
            "/view/",
            "/view/Foo Bar",
            "/delete/Foo",
            "/view/Foo/Bar",
            "/view/Foo_Bar",
            "/view/Foo.txt",
            "/view/../secret",
            "view/Foo",
            "/View/Foo",
            "/view/Foo\n",
            "/",
            "",
        ] {
            assert_eq!(extract(path), Err(Rejected(path.to_string())), "{path:?}");
        }
    }

    #[test]
    fn decodes_percent_escapes_before_matching() {
        assert_eq!(decode_path("/edit/Foo%41").unwrap(), "/edit/FooA");
        assert_eq!(extract(&decode_path("/edit/Foo%41").unwrap()).unwrap().title, "FooA");
        assert!(extract(&decode_path("/view/Foo%20Bar").unwrap()).is_err());
        assert!(extract(&decode_path("/view/Foo%2FBar").unwrap()).is_err());
        assert_eq!(decode_path("/view/%FF"), Err(Rejected("/view/%FF".to_string())));
    }
}
