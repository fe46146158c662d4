//! The route registry and the dispatch table built from it.
//!
//! Patterns are exact paths: `/hello` matches `/hello` and nothing else.
//! Method selection and every other admission rule live in the endpoint's
//! filters, not in the table.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use matchit::Router as MatchitRouter;

use crate::endpoint::Endpoint;
use crate::error::{ConfigError, ServeError};
use crate::handler::BoxedHandler;
use crate::server::Server;

/// Pattern → [`Endpoint`] registry. Build it once at startup, then call
/// [`Routes::serve`].
///
/// Registering the same pattern twice is an error
/// ([`ConfigError::DuplicateRoute`]); there is no silent "last one wins".
///
/// ```rust,no_run
/// use warden::{filter, middleware, Endpoint, Request, Routes};
///
/// async fn hello(_req: Request) -> &'static str { "Hello\n" }
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     Routes::new()
///         .route("/hello", Endpoint::new(hello).wrap(middleware::logging()))?
///         .route("/private", Endpoint::new(hello).allow(filter::cidr(["127.0.0.1/32"])?))?
///         .serve("localhost:1217")
///         .await?;
///     Ok(())
/// }
/// ```
#[derive(Clone, Debug, Default)]
pub struct Routes {
    endpoints: BTreeMap<String, Endpoint>,
}

impl Routes {
    pub fn new() -> Self {
        Self { endpoints: BTreeMap::new() }
    }

    /// Registers `endpoint` under `pattern`. Returns `self` for chaining.
    ///
    /// `pattern` must start with `/` and may not use `{`, `}` or `*`:
    /// path parameters and wildcards are not supported.
    pub fn route(mut self, pattern: &str, endpoint: Endpoint) -> Result<Self, ConfigError> {
        validate(pattern)?;
        if self.endpoints.contains_key(pattern) {
            return Err(ConfigError::DuplicateRoute(pattern.to_owned()));
        }
        self.endpoints.insert(pattern.to_owned(), endpoint);
        Ok(self)
    }

    /// Registered patterns, sorted.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.endpoints.keys().map(String::as_str)
    }

    pub fn get(&self, pattern: &str) -> Option<&Endpoint> {
        self.endpoints.get(pattern)
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Builds every endpoint into a fresh dispatch table.
    pub(crate) fn build(&self) -> Result<Dispatcher, ConfigError> {
        let mut tree = MatchitRouter::new();
        for (pattern, endpoint) in &self.endpoints {
            tree.insert(pattern.as_str(), endpoint.build())
                .map_err(|e| ConfigError::InvalidPattern { pattern: pattern.clone(), reason: e.to_string() })?;
        }
        Ok(Dispatcher { tree })
    }

    /// Builds the table, binds `addr` and serves until the listener fails or
    /// the process receives SIGTERM / Ctrl-C.
    pub async fn serve(self, addr: &str) -> Result<(), ServeError> {
        Server::bind(addr).serve(self).await
    }

    /// Like [`serve`](Routes::serve), but stops when `signal` resolves.
    pub async fn serve_with_shutdown(
        self,
        addr: &str,
        signal: impl Future<Output = ()>,
    ) -> Result<(), ServeError> {
        Server::bind(addr).serve_with_shutdown(self, signal).await
    }
}

fn validate(pattern: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &str| -> Result<(), ConfigError> {
        Err(ConfigError::InvalidPattern { pattern: pattern.to_owned(), reason: reason.to_owned() })
    };
    if !pattern.starts_with('/') {
        return invalid("must start with `/`");
    }
    if pattern.contains(['{', '}', '*']) {
        return invalid("path parameters and wildcards are not supported");
    }
    Ok(())
}

/// Exact-path lookup over built handlers. Read-only while serving.
pub(crate) struct Dispatcher {
    tree: MatchitRouter<BoxedHandler>,
}

impl Dispatcher {
    pub(crate) fn lookup(&self, path: &str) -> Option<BoxedHandler> {
        let matched = self.tree.at(path).ok()?;
        Some(Arc::clone(matched.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Request;

    async fn one(_req: Request) -> &'static str { "one" }
    async fn two(_req: Request) -> &'static str { "two" }

    #[test]
    fn duplicate_pattern_is_rejected() {
        let err = Routes::new()
            .route("/hello", Endpoint::new(one)).unwrap()
            .route("/hello", Endpoint::new(two))
            .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateRoute(p) if p == "/hello"));
    }

    #[test]
    fn malformed_patterns_are_rejected() {
        for pattern in ["hello", "", "/users/{id}", "/static/*rest"] {
            let err = Routes::new().route(pattern, Endpoint::new(one)).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidPattern { .. }), "{pattern}");
        }
    }

    #[test]
    fn router_rejection_keeps_its_reason() {
        // Only reachable by bypassing `route`, which refuses parameters.
        let mut routes = Routes::new();
        routes.endpoints.insert("/users/{id}".to_owned(), Endpoint::new(one));
        routes.endpoints.insert("/users/{name}".to_owned(), Endpoint::new(two));

        let Err(err) = routes.build() else { panic!("conflicting patterns were accepted") };
        match err {
            ConfigError::InvalidPattern { pattern, reason } => {
                assert_eq!(pattern, "/users/{name}");
                assert!(!reason.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn patterns_are_listed_in_order() {
        let routes = Routes::new()
            .route("/test", Endpoint::new(one)).unwrap()
            .route("/hello", Endpoint::new(one)).unwrap()
            .route("/private", Endpoint::new(two)).unwrap();
        assert_eq!(routes.patterns().collect::<Vec<_>>(), ["/hello", "/private", "/test"]);
        assert_eq!(routes.len(), 3);
        assert!(routes.get("/private").is_some());
    }

    #[tokio::test]
    async fn dispatch_is_exact() {
        let table = Routes::new()
            .route("/", Endpoint::new(one)).unwrap()
            .route("/hello", Endpoint::new(two)).unwrap()
            .build()
            .unwrap();

        let res = table.lookup("/hello").unwrap().call(Request::builder().build()).await;
        assert_eq!(res.body(), b"two");
        let res = table.lookup("/").unwrap().call(Request::builder().build()).await;
        assert_eq!(res.body(), b"one");
        assert!(table.lookup("/hello/").is_none());
        assert!(table.lookup("/hello/world").is_none());
        assert!(table.lookup("/nope").is_none());
    }
}
