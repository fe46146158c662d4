//! Middleware: handler-to-handler transforms.
//!
//! A [`Middleware`] takes the handler it wraps and returns a new one. The new
//! handler may run code before and after delegating, or not delegate at all
//! (that is how [`allow`] rejects requests).
//!
//! # Fold order
//!
//! A [`Stack`] is applied by folding from the base handler outwards:
//!
//! ```text
//! Stack [m1, m2, m3] applied to h  ==  m3(m2(m1(h)))
//!
//! request  ──► m3 ──► m2 ──► m1 ──► h
//! response ◄── m3 ◄── m2 ◄── m1 ◄──┘
//! ```
//!
//! The **last** middleware in the list is the outermost layer and sees the
//! request first; the first one sits right next to the handler.
//!
//! Built-ins:
//! - [`allow`] — access gate, `403 Forbidden` when the filter says no
//! - [`set_header`] — response header injection
//! - [`logging`] — one `tracing` event per request
//!
//! Custom middleware is easiest written with [`from_fn`].

mod gate;
mod headers;
mod logging;

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::handler::{BoxedHandler, Handler};
use crate::request::Request;
use crate::response::Response;

pub use gate::allow;
pub use headers::set_header;
pub use logging::logging;

/// A transform from one handler to another.
#[derive(Clone)]
pub struct Middleware(Arc<dyn Fn(BoxedHandler) -> BoxedHandler + Send + Sync + 'static>);

impl Middleware {
    pub fn new(f: impl Fn(BoxedHandler) -> BoxedHandler + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Wraps `inner`, returning the decorated handler.
    pub fn wrap(&self, inner: BoxedHandler) -> BoxedHandler {
        (self.0)(inner)
    }
}

impl fmt::Debug for Middleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Middleware(..)")
    }
}

/// The rest of the chain, as seen from inside a [`from_fn`] middleware.
#[derive(Clone)]
pub struct Next(BoxedHandler);

impl Next {
    /// Delegates to the wrapped handler.
    pub async fn run(self, req: Request) -> Response {
        self.0.call(req).await
    }
}

/// Builds a middleware from an async function of the request and the rest of
/// the chain.
///
/// ```rust
/// use warden::middleware::{self, Next};
/// use warden::{Request, Response};
///
/// let no_store = middleware::from_fn(|req: Request, next: Next| async move {
///     let mut res = next.run(req).await;
///     res.set_header("cache-control", "no-store");
///     res
/// });
/// # let _ = no_store;
/// ```
pub fn from_fn<F, Fut>(f: F) -> Middleware
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    let f = Arc::new(f);
    Middleware::new(move |inner: BoxedHandler| -> BoxedHandler {
        let f = Arc::clone(&f);
        (move |req: Request| (*f)(req, Next(Arc::clone(&inner)))).into_boxed_handler()
    })
}

/// An ordered list of middleware. See the module docs for the fold order.
#[derive(Clone, Debug, Default)]
pub struct Stack(Vec<Middleware>);

impl Stack {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends `middleware`, making it the new outermost layer.
    pub fn push(&mut self, middleware: Middleware) {
        self.0.push(middleware);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Folds the stack over `base`: each middleware, in list order, wraps the
    /// result of the previous one. An empty stack returns `base` unchanged.
    pub fn apply(&self, base: BoxedHandler) -> BoxedHandler {
        self.0.iter().fold(base, |acc, middleware| middleware.wrap(acc))
    }
}

impl From<Vec<Middleware>> for Stack {
    fn from(middleware: Vec<Middleware>) -> Self {
        Self(middleware)
    }
}

impl FromIterator<Middleware> for Stack {
    fn from_iter<I: IntoIterator<Item = Middleware>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Middleware> for Stack {
    fn extend<I: IntoIterator<Item = Middleware>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}
