//! Access gate: the single place where a filter's verdict is enforced.

use std::sync::Arc;

use tracing::debug;

use super::Middleware;
use crate::filter::RequestFilter;
use crate::handler::{BoxFuture, BoxedHandler, ErasedHandler};
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// Admits a request to the wrapped handler only if `filter` matches it.
///
/// Rejected requests get `403 Forbidden` with an empty body and the wrapped
/// handler is never called.
pub fn allow(filter: RequestFilter) -> Middleware {
    Middleware::new(move |inner: BoxedHandler| -> BoxedHandler {
        Arc::new(Gate { filter: filter.clone(), inner })
    })
}

struct Gate {
    filter: RequestFilter,
    inner: BoxedHandler,
}

impl ErasedHandler for Gate {
    fn call(&self, req: Request) -> BoxFuture {
        if self.filter.matches(&req) {
            return self.inner.call(req);
        }
        debug!(method = %req.method(), uri = req.target(), remote = req.remote_addr(), "access denied");
        Box::pin(std::future::ready(Response::status(Status::Forbidden)))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::handler::Handler;

    fn counting_handler() -> (BoxedHandler, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let h = (move |_req: Request| {
            counter.fetch_add(1, Ordering::SeqCst);
            async { Response::builder().status(Status::Accepted).text("inner") }
        })
        .into_boxed_handler();
        (h, calls)
    }

    #[tokio::test]
    async fn rejecting_filter_never_reaches_handler() {
        let (inner, calls) = counting_handler();
        let h = allow(RequestFilter::never()).wrap(inner);

        for _ in 0..3 {
            let res = h.call(Request::builder().build()).await;
            assert_eq!(res.status_code(), 403);
            assert!(res.body().is_empty());
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn admitting_filter_leaves_response_untouched() {
        let (inner, calls) = counting_handler();
        let h = allow(RequestFilter::always()).wrap(inner);

        let res = h.call(Request::builder().build()).await;
        assert_eq!(res.status_code(), 202);
        assert_eq!(res.body(), b"inner");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
