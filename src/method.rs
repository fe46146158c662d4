//! HTTP method as a typed enum.
//!
//! Methods outside the named set are kept as [`Method::Other`] with their
//! exact token, so extension methods (`PROPFIND`, `MKCOL`, ...) still reach
//! the endpoint and its filters decide what to do with them.

use std::fmt;
use std::str::FromStr;

macro_rules! methods {
    ($($variant:ident => $wire:literal,)+) => {
        /// An HTTP method: one of the RFC 9110 methods, `PURGE`, or any
        /// other valid token.
        #[derive(Clone, Debug, Eq, Hash, PartialEq)]
        pub enum Method {
            $($variant,)+
            /// An extension method, stored exactly as received.
            Other(String),
        }

        impl Method {
            /// Every named method, in declaration order.
            pub const ALL: &'static [Method] = &[$(Method::$variant,)+];

            /// Returns the wire representation (e.g. `"GET"`).
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $wire,)+
                    Self::Other(token) => token,
                }
            }
        }

        /// Parses a method token. Case-sensitive per RFC 9110 §9.1, so `get`
        /// is an extension method, not `GET`.
        impl FromStr for Method {
            type Err = InvalidMethod;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    _ if is_token(s) => Ok(Self::Other(s.to_owned())),
                    _ => Err(InvalidMethod(s.to_owned())),
                }
            }
        }
    };
}

methods! {
    Connect => "CONNECT",
    Delete  => "DELETE",
    Get     => "GET",
    Head    => "HEAD",
    Options => "OPTIONS",
    Patch   => "PATCH",
    Post    => "POST",
    Put     => "PUT",
    Trace   => "TRACE",
    Purge   => "PURGE",
}

// RFC 9110 §5.6.2 `token`.
fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(|b| b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b))
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The string is not a syntactically valid method token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid HTTP method `{0}`")]
pub struct InvalidMethod(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_named_method() {
        for m in Method::ALL {
            assert_eq!(m.as_str().parse::<Method>(), Ok(m.clone()));
        }
    }

    #[test]
    fn extension_methods_keep_their_token() {
        let m: Method = "PROPFIND".parse().unwrap();
        assert_eq!(m, Method::Other("PROPFIND".into()));
        assert_eq!(m.to_string(), "PROPFIND");
        assert_eq!("get".parse::<Method>(), Ok(Method::Other("get".into())));
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        assert_eq!("".parse::<Method>(), Err(InvalidMethod(String::new())));
        assert!("BAD METHOD".parse::<Method>().is_err());
        assert!("G(ET".parse::<Method>().is_err());
    }
}
