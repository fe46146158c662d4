//! Incoming HTTP request type.
//!
//! Everything on a [`Request`] is read-only. Filters inspect it by reference,
//! middleware reads what it needs and then hands ownership to the next layer.

use crate::method::Method;

/// An incoming HTTP request.
#[derive(Clone, Debug)]
pub struct Request {
    pub(crate) remote_addr: String,
    pub(crate) method: Method,
    pub(crate) target: String,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Vec<u8>,
}

impl Request {
    /// Starts a request by hand, e.g. to exercise an endpoint without a socket.
    ///
    /// ```rust
    /// use warden::{Method, Request};
    ///
    /// let req = Request::builder()
    ///     .remote_addr("127.0.0.1:54321")
    ///     .method(Method::Post)
    ///     .target("/private?verbose=1")
    ///     .header("X-Password", "opensesame")
    ///     .body(b"hi".to_vec());
    /// assert_eq!(req.path(), "/private");
    /// ```
    pub fn builder() -> RequestBuilder {
        RequestBuilder {
            remote_addr: String::new(),
            method: Method::Get,
            target: "/".to_owned(),
            headers: Vec::new(),
        }
    }

    pub(crate) fn from_parts(parts: http::request::Parts, body: Vec<u8>, remote_addr: String, method: Method) -> Self {
        let headers = parts.headers.iter()
            .map(|(k, v)| (k.as_str().to_owned(), String::from_utf8_lossy(v.as_bytes()).into_owned()))
            .collect();
        let target = parts.uri.path_and_query()
            .map(|pq| pq.as_str().to_owned())
            .unwrap_or_else(|| parts.uri.path().to_owned());
        Self { remote_addr, method, target, headers, body }
    }

    /// Peer address in `host:port` form, exactly as the transport reported it.
    pub fn remote_addr(&self) -> &str { &self.remote_addr }
    pub fn method(&self) -> &Method { &self.method }
    /// The request target as received: path plus query string.
    pub fn target(&self) -> &str { &self.target }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Path component of the target, without the query string.
    pub fn path(&self) -> &str {
        self.target.split_once('?').map_or(self.target.as_str(), |(path, _)| path)
    }

    /// Case-insensitive header lookup. Returns the first value if repeated.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Fluent builder for [`Request`]. Obtain via [`Request::builder()`].
pub struct RequestBuilder {
    remote_addr: String,
    method: Method,
    target: String,
    headers: Vec<(String, String)>,
}

impl RequestBuilder {
    pub fn remote_addr(mut self, addr: impl Into<String>) -> Self {
        self.remote_addr = addr.into();
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Terminate with a body.
    pub fn body(self, body: Vec<u8>) -> Request {
        Request {
            remote_addr: self.remote_addr,
            method: self.method,
            target: self.target,
            headers: self.headers,
            body,
        }
    }

    /// Terminate with an empty body.
    pub fn build(self) -> Request {
        self.body(Vec::new())
    }
}
