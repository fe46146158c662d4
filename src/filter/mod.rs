//! Request filters: admission predicates over a [`Request`].
//!
//! A [`RequestFilter`] answers one question, "may this request proceed?",
//! and nothing else. It never writes a response; rejection is enforced by
//! [`middleware::allow`](crate::middleware::allow).
//!
//! Filters compose:
//!
//! ```rust
//! use warden::filter::{self, Filters};
//! use warden::Method;
//!
//! # fn main() -> Result<(), warden::ConfigError> {
//! let local = filter::cidr(["127.0.0.1/32", "::1/128"])?;
//! let office = filter::cidr(["10.20.0.0/16"])?;
//! let readers = filter::method([Method::Get, Method::Head]);
//!
//! // local, or (office and read-only)
//! let admit = local.or(office.and(readers));
//!
//! // conjunction of a list; empty list admits everything
//! let all: Filters = vec![admit, filter::password_header("opensesame")].into();
//! let _one = all.combine();
//! # Ok(())
//! # }
//! ```
//!
//! Every filter is `Send + Sync` and cheap to clone: the same value is
//! evaluated concurrently by every in-flight request.

mod cidr;
mod header;
mod method;

use std::fmt;
use std::sync::Arc;

use crate::request::Request;

pub use cidr::cidr;
pub use header::{header_equals, password_header};
pub use method::method;

/// A predicate deciding admission of a request.
///
/// Total and side-effect free: configuration problems are reported when the
/// filter is constructed, and anything a filter cannot interpret at request
/// time evaluates to `false`.
#[derive(Clone)]
pub struct RequestFilter(Arc<dyn Fn(&Request) -> bool + Send + Sync + 'static>);

impl RequestFilter {
    pub fn new(f: impl Fn(&Request) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Admits every request.
    pub fn always() -> Self {
        Self::new(|_| true)
    }

    /// Rejects every request.
    pub fn never() -> Self {
        Self::new(|_| false)
    }

    pub fn matches(&self, req: &Request) -> bool {
        (self.0)(req)
    }

    /// True iff both are true. `other` is not evaluated when `self` is false.
    pub fn and(self, other: RequestFilter) -> Self {
        Self::new(move |req| self.matches(req) && other.matches(req))
    }

    /// True iff either is true. `other` is not evaluated when `self` is true.
    pub fn or(self, other: RequestFilter) -> Self {
        Self::new(move |req| self.matches(req) || other.matches(req))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self::new(move |req| !self.matches(req))
    }
}

impl fmt::Debug for RequestFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RequestFilter(..)")
    }
}

/// An ordered list of filters read as a logical AND.
#[derive(Clone, Debug, Default)]
pub struct Filters(Vec<RequestFilter>);

impl Filters {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, filter: RequestFilter) {
        self.0.push(filter);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reduces the list to one filter: true iff every element is true,
    /// evaluated in list order, stopping at the first `false`.
    /// An empty list admits everything.
    pub fn combine(&self) -> RequestFilter {
        let filters = self.0.clone();
        RequestFilter::new(move |req| filters.iter().all(|f| f.matches(req)))
    }
}

impl From<Vec<RequestFilter>> for Filters {
    fn from(filters: Vec<RequestFilter>) -> Self {
        Self(filters)
    }
}

impl FromIterator<RequestFilter> for Filters {
    fn from_iter<I: IntoIterator<Item = RequestFilter>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn req() -> Request {
        Request::builder().remote_addr("127.0.0.1:1").build()
    }

    /// A constant filter that counts how often it was asked.
    fn spy(answer: bool) -> (RequestFilter, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let f = RequestFilter::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            answer
        });
        (f, calls)
    }

    #[test]
    fn and_or_follow_truth_tables() {
        let r = req();
        for a in [false, true] {
            for b in [false, true] {
                let (f, _) = spy(a);
                let (g, _) = spy(b);
                assert_eq!(f.clone().and(g.clone()).matches(&r), a && b, "{a} and {b}");
                assert_eq!(f.or(g).matches(&r), a || b, "{a} or {b}");
            }
        }
    }

    #[test]
    fn and_skips_right_side_when_left_is_false() {
        let (f, _) = spy(false);
        let (g, g_calls) = spy(true);
        assert!(!f.and(g).matches(&req()));
        assert_eq!(g_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn or_skips_right_side_when_left_is_true() {
        let (f, _) = spy(true);
        let (g, g_calls) = spy(false);
        assert!(f.or(g).matches(&req()));
        assert_eq!(g_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn not_inverts() {
        assert!(RequestFilter::never().not().matches(&req()));
        assert!(!RequestFilter::always().not().matches(&req()));
    }

    #[test]
    fn empty_combination_admits_everything() {
        assert!(Filters::new().combine().matches(&req()));
        assert!(Filters::new().combine().matches(&Request::builder().build()));
    }

    #[test]
    fn single_combination_equals_the_filter() {
        for answer in [false, true] {
            let (f, _) = spy(answer);
            let one: Filters = vec![f].into();
            assert_eq!(one.combine().matches(&req()), answer);
        }
    }

    #[test]
    fn combination_stops_at_first_rejection() {
        let (first, first_calls) = spy(true);
        let (second, _) = spy(false);
        let (third, third_calls) = spy(true);
        let all: Filters = [first, second, third].into_iter().collect();

        assert!(!all.combine().matches(&req()));
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(third_calls.load(Ordering::SeqCst), 0);
    }
}
