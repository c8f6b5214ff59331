//! Radix-tree request router.
//!
//! One tree per HTTP method, O(path-length) lookup. A path registered under
//! another method answers `405` instead of `404`.

use std::collections::HashMap;
use std::sync::Arc;

use http::Method;
use matchit::Router as MatchitRouter;

use super::handler::{BoxedHandler, Handler};

/// The application router. Build it once at startup; pass it to
/// [`Server::serve`](crate::server::Server::serve).
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
}

/// Outcome of routing one request.
pub(crate) enum Route {
    Found(BoxedHandler),
    MethodNotAllowed,
    NotFound,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Registers a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// # Panics
    ///
    /// Panics if `path` is malformed or conflicts with an earlier route.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::GET, path, handler)
    }

    pub(crate) fn lookup(&self, method: &Method, path: &str) -> Route {
        if let Some(matched) = self.routes.get(method).and_then(|tree| tree.at(path).ok()) {
            return Route::Found(Arc::clone(matched.value));
        }

        let elsewhere = self
            .routes
            .iter()
            .any(|(m, tree)| m != method && tree.at(path).is_ok());
        if elsewhere { Route::MethodNotAllowed } else { Route::NotFound }
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{Request, Response};
    use crate::http::request::test_request;

    async fn echo(req: Request) -> Response {
        Response::text(req.query())
    }

    async fn help(_req: Request) -> Response {
        Response::text("help")
    }

    fn app() -> Router {
        Router::new()
            .get("/scrape/content", echo)
            .get("/scrape/content/help", help)
    }

    #[tokio::test]
    async fn exact_path_picks_its_handler() {
        let Route::Found(handler) = app().lookup(&Method::GET, "/scrape/content") else {
            panic!("route not found");
        };
        let res = handler(test_request("/scrape/content?option=producao")).await;
        assert_eq!(res.body(), b"option=producao");

        let Route::Found(handler) = app().lookup(&Method::GET, "/scrape/content/help") else {
            panic!("route not found");
        };
        assert_eq!(handler(test_request("/")).await.body(), b"help");
    }

    #[test]
    fn wrong_method_is_405() {
        assert!(matches!(
            app().lookup(&Method::POST, "/scrape/content"),
            Route::MethodNotAllowed
        ));
    }

    #[test]
    fn unknown_path_is_404() {
        assert!(matches!(app().lookup(&Method::GET, "/nope"), Route::NotFound));
    }

    #[test]
    #[should_panic(expected = "invalid route")]
    fn conflicting_route_panics() {
        let _ = app().get("/scrape/content", echo);
    }
}
