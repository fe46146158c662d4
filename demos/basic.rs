//! Three routes: open, locked down, and decorated.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example basic
//!
//! Try:
//!   curl -i http://localhost:1217/hello
//!   curl -i http://localhost:1217/private                              # 403
//!   curl -i -H 'X-Password: opensesame' http://localhost:1217/private  # 200
//!   curl -i http://localhost:1217/test                                 # X-Foo: Bar
//!   curl -i -X DELETE http://localhost:1217/readonly                   # 403

use warden::{filter, middleware, Endpoint, Method, Request, Response, Routes};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let routes = Routes::new()
        .route("/hello", Endpoint::new(hello)
            .wrap(middleware::logging()))?
        .route("/private", Endpoint::new(hello)
            .allow(filter::cidr(["127.0.0.1/32", "::1/128"])?)
            .allow(filter::password_header("opensesame"))
            .wrap(middleware::logging()))?
        // set_header is listed last, so it is the outer layer around logging.
        .route("/test", Endpoint::new(hello)
            .wrap(middleware::logging())
            .wrap(middleware::set_header("X-Foo", "Bar")?))?
        .route("/readonly", Endpoint::new(echo_method)
            .allow(filter::method([Method::Get, Method::Head]))
            .wrap(middleware::logging()))?;

    routes.serve("localhost:1217").await?;
    Ok(())
}

async fn hello(_req: Request) -> &'static str {
    "Hello\n"
}

async fn echo_method(req: Request) -> Response {
    Response::text(format!("{} {}\n", req.method(), req.target()))
}
