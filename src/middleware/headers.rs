//! Response header injection.

use std::sync::Arc;

use http::{HeaderName, HeaderValue};

use super::Middleware;
use crate::error::ConfigError;
use crate::handler::{BoxFuture, BoxedHandler, ErasedHandler};
use crate::request::Request;

/// Sets response header `name: value` on every response that passes through,
/// including rejections produced by layers further in.
///
/// The header is laid down before the inner handler runs, so a value the
/// handler (or an inner layer) sets for the same name wins.
///
/// Both name and value are validated here; an invalid one is a
/// [`ConfigError::InvalidHeader`].
pub fn set_header(name: &str, value: &str) -> Result<Middleware, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidHeader { name: name.to_owned(), reason };
    HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(e.to_string()))?;
    HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;

    let name: Arc<str> = name.into();
    let value: Arc<str> = value.into();
    Ok(Middleware::new(move |inner: BoxedHandler| -> BoxedHandler {
        Arc::new(SetHeader { name: Arc::clone(&name), value: Arc::clone(&value), inner })
    }))
}

struct SetHeader {
    name: Arc<str>,
    value: Arc<str>,
    inner: BoxedHandler,
}

impl ErasedHandler for SetHeader {
    fn call(&self, req: Request) -> BoxFuture {
        let fut = self.inner.call(req);
        let name = Arc::clone(&self.name);
        let value = Arc::clone(&self.value);
        Box::pin(async move {
            let mut res = fut.await;
            if res.header(&name).is_none() {
                res.set_header(&name, &value);
            }
            res
        })
    }
}
