//! Header-value filters.

use super::RequestFilter;
use crate::request::Request;

/// Header carrying the shared secret checked by [`password_header`].
pub const PASSWORD_HEADER: &str = "X-Password";

/// Admits requests that carry header `key` with a value exactly equal to
/// `expected`. The name is matched case-insensitively; the value is compared
/// byte for byte, case-sensitive and untrimmed.
pub fn header_equals(key: impl Into<String>, expected: impl Into<String>) -> RequestFilter {
    let key = key.into();
    let expected = expected.into();
    RequestFilter::new(move |req: &Request| req.header(&key) == Some(expected.as_str()))
}

/// Admits requests whose `X-Password` header equals `password`.
pub fn password_header(password: impl Into<String>) -> RequestFilter {
    header_equals(PASSWORD_HEADER, password)
}
