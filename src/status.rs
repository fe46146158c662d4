//! HTTP status codes as a typed enum.
//!
//! Use [`Status`] anywhere a status code is accepted: `Response::status()`,
//! `Response::builder().status()`, or as a bare handler return value.
//!
//! ```rust
//! use warden::{Response, Status};
//!
//! Response::status(Status::NoContent);
//!
//! Response::builder()
//!     .status(Status::Created)
//!     .header("location", "/users/42")
//!     .text("created");
//!
//! async fn purge(_req: warden::Request) -> Status {
//!     Status::Accepted
//! }
//! ```

macro_rules! statuses {
    ($($(#[$group:meta])* $variant:ident = $code:literal,)+) => {
        /// The status codes this crate produces or that handlers commonly return.
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        pub enum Status {
            $($(#[$group])* $variant,)+
        }

        impl Status {
            /// Numeric code, e.g. `403`.
            pub fn code(self) -> u16 {
                match self {
                    $(Self::$variant => $code,)+
                }
            }
        }
    };
}

statuses! {
    // ── 2xx ─────────────────────────────────────────────────────────────────
    Ok                  = 200,
    Created             = 201,
    Accepted            = 202,
    NoContent           = 204,
    // ── 3xx ─────────────────────────────────────────────────────────────────
    MovedPermanently    = 301,
    Found               = 302,
    SeeOther            = 303,
    NotModified         = 304,
    TemporaryRedirect   = 307,
    PermanentRedirect   = 308,
    // ── 4xx ─────────────────────────────────────────────────────────────────
    BadRequest          = 400,
    Unauthorized        = 401,
    Forbidden           = 403,
    NotFound            = 404,
    MethodNotAllowed    = 405,
    Conflict            = 409,
    Gone                = 410,
    ContentTooLarge     = 413,
    UnprocessableContent = 422,
    TooManyRequests     = 429,
    // ── 5xx ─────────────────────────────────────────────────────────────────
    InternalServerError = 500,
    NotImplemented      = 501,
    BadGateway          = 502,
    ServiceUnavailable  = 503,
    GatewayTimeout      = 504,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_the_table() {
        assert_eq!(Status::Ok.code(), 200);
        assert_eq!(Status::Forbidden.code(), 403);
        assert_eq!(Status::NotFound.code(), 404);
        assert_eq!(Status::GatewayTimeout.code(), 504);
    }
}
