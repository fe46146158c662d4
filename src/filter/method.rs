use super::RequestFilter;
use crate::method::Method;
use crate::request::Request;

/// Admits requests whose method is one of `allowed`. An empty set admits
/// nothing. Extension methods match only if listed as [`Method::Other`].
pub fn method(allowed: impl IntoIterator<Item = Method>) -> RequestFilter {
    let allowed: Vec<Method> = allowed.into_iter().collect();
    RequestFilter::new(move |req: &Request| allowed.contains(req.method()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with(m: Method) -> Request {
        Request::builder().method(m).build()
    }

    #[test]
    fn admits_listed_methods_only() {
        let f = method([Method::Get, Method::Head]);
        assert!(f.matches(&with(Method::Get)));
        assert!(f.matches(&with(Method::Head)));
        assert!(!f.matches(&with(Method::Post)));
    }

    #[test]
    fn extension_methods_match_by_token() {
        let propfind = Method::Other("PROPFIND".into());
        assert!(!method([Method::Get]).matches(&with(propfind.clone())));
        assert!(method([propfind.clone()]).matches(&with(propfind)));
        assert!(!method([Method::Other("MKCOL".into())]).matches(&with(Method::Get)));
    }

    #[test]
    fn empty_set_admits_nothing() {
        let f = method(Vec::new());
        assert!(!f.matches(&with(Method::Get)));
    }
}
