//! One handler, the filters guarding it, and the middleware around it.

use std::fmt;

use crate::filter::{Filters, RequestFilter};
use crate::handler::{BoxedHandler, Handler};
use crate::middleware::{self, Middleware, Stack};

/// A handler bound to an access-filter set and a middleware stack.
///
/// ```rust
/// use warden::{filter, middleware, Endpoint, Request};
///
/// async fn hello(_req: Request) -> &'static str { "Hello\n" }
///
/// # fn main() -> Result<(), warden::ConfigError> {
/// let private = Endpoint::new(hello)
///     .allow(filter::cidr(["127.0.0.1/32"])?)
///     .allow(filter::password_header("opensesame"))
///     .wrap(middleware::logging())
///     .wrap(middleware::set_header("X-Foo", "Bar")?);
/// let _handler = private.build();
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Endpoint {
    handler: BoxedHandler,
    allow: Filters,
    middleware: Stack,
}

impl Endpoint {
    /// An endpoint that admits everything and has no middleware.
    pub fn new(handler: impl Handler) -> Self {
        Self::from_parts(handler, Filters::new(), Stack::new())
    }

    pub fn from_parts(handler: impl Handler, allow: Filters, middleware: Stack) -> Self {
        Self { handler: handler.into_boxed_handler(), allow, middleware }
    }

    /// Adds an admission filter. All filters must match.
    pub fn allow(mut self, filter: RequestFilter) -> Self {
        self.allow.push(filter);
        self
    }

    /// Appends a middleware; the last one added is the outermost.
    pub fn wrap(mut self, middleware: Middleware) -> Self {
        self.middleware.push(middleware);
        self
    }

    /// The filters a request must pass, in the order they were added.
    /// They are combined with AND when the endpoint is built.
    pub fn filters(&self) -> &Filters {
        &self.allow
    }

    /// The middleware around the gate, innermost first.
    pub fn stack(&self) -> &Stack {
        &self.middleware
    }

    /// Assembles the servable handler: the filters, combined, gate the raw
    /// handler, and the middleware stack is folded over the gated handler.
    ///
    /// Pure assembly with no I/O. Building twice yields two handlers that
    /// behave identically.
    pub fn build(&self) -> BoxedHandler {
        let gate = middleware::allow(self.allow.combine());
        let restricted = gate.wrap(self.handler.clone());
        self.middleware.apply(restricted)
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("filters", &self.allow.len())
            .field("middleware", &self.middleware.len())
            .finish_non_exhaustive()
    }
}
