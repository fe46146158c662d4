//! Request logging.

use std::sync::Arc;

use tracing::info;

use super::Middleware;
use crate::handler::{BoxFuture, BoxedHandler, ErasedHandler};
use crate::request::Request;

/// Emits one `info` event per request (`method`, `uri`, `remote`), then
/// delegates. The response is passed through untouched.
///
/// The timestamp comes from the installed `tracing` subscriber, which also
/// serialises concurrent writes.
pub fn logging() -> Middleware {
    Middleware::new(|inner: BoxedHandler| -> BoxedHandler { Arc::new(Logger { inner }) })
}

struct Logger {
    inner: BoxedHandler,
}

impl ErasedHandler for Logger {
    fn call(&self, req: Request) -> BoxFuture {
        info!(method = %req.method(), uri = req.target(), remote = req.remote_addr(), "request");
        self.inner.call(req)
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Mutex;

    use super::*;
    use crate::handler::Handler;
    use crate::method::Method;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn logs_method_and_target_then_delegates() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let h = logging().wrap((|_req: Request| async { "Hello\n" }).into_boxed_handler());
        let req = Request::builder()
            .method(Method::Post)
            .target("/hello?x=1")
            .remote_addr("127.0.0.1:4000")
            .build();
        let res = h.call(req).await;

        assert_eq!(res.body(), b"Hello\n");
        let out = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert_eq!(out.lines().count(), 1, "{out}");
        assert!(out.contains("method=POST"), "{out}");
        assert!(out.contains("/hello?x=1"), "{out}");
    }
}
