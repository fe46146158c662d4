//! # warden
//!
//! Declarative access control and middleware stacks for HTTP routes.
//!
//! Each route is an [`Endpoint`]: a handler, the [filters](filter) a request
//! must pass to reach it, and the [middleware] wrapped around it. A
//! [`Routes`] value maps paths to endpoints and serves them.
//!
//! ## How an endpoint is assembled
//!
//! ```text
//! Endpoint { handler: h, allow: [f1, f2], middleware: [m1, m2] }
//!
//!     build()  ==  m2( m1( allow(f1 AND f2)( h ) ) )
//!
//! request ──► m2 ──► m1 ──► gate ──► h
//!                            └── 403 Forbidden if f1 AND f2 is false
//! ```
//!
//! The gate always sits innermost, right next to the handler, so middleware
//! such as [`middleware::logging`] sees denied requests too.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use warden::{filter, middleware, Endpoint, Request, Routes};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let routes = Routes::new()
//!         .route("/hello", Endpoint::new(hello)
//!             .wrap(middleware::logging()))?
//!         .route("/private", Endpoint::new(hello)
//!             .allow(filter::cidr(["127.0.0.1/32"])?)
//!             .allow(filter::password_header("opensesame"))
//!             .wrap(middleware::logging()))?;
//!
//!     routes.serve("localhost:1217").await?;
//!     Ok(())
//! }
//!
//! async fn hello(_req: Request) -> &'static str {
//!     "Hello\n"
//! }
//! ```
//!
//! Everything that can be misconfigured (a malformed CIDR range, an invalid
//! header, a duplicate route) fails with a [`ConfigError`] while you build
//! the routes, before a socket is opened.

mod endpoint;
mod error;
mod handler;
mod method;
mod request;
mod response;
mod routes;
mod server;
mod status;

pub mod filter;
pub mod middleware;

pub use endpoint::Endpoint;
pub use error::{ConfigError, ServeError};
pub use filter::{Filters, RequestFilter};
pub use handler::{BoxFuture, BoxedHandler, ErasedHandler, Handler};
pub use method::{InvalidMethod, Method};
pub use middleware::{Middleware, Next, Stack};
pub use request::{Request, RequestBuilder};
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use routes::Routes;
pub use server::Server;
pub use status::Status;
