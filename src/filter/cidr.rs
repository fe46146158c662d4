//! Network range filter.

use std::net::{IpAddr, SocketAddr};

use ipnet::IpNet;

use super::RequestFilter;
use crate::error::ConfigError;
use crate::request::Request;

/// Admits requests whose peer address falls inside at least one of `ranges`.
///
/// Ranges use CIDR notation (`"127.0.0.1/32"`, `"fd00::/8"`) and are parsed
/// here; the first malformed one is returned as
/// [`ConfigError::InvalidRange`]. An empty list admits nothing.
///
/// At request time the host part of [`Request::remote_addr`] is parsed as an
/// IP. IPv4-mapped IPv6 peers (`::ffff:127.0.0.1`, as seen on dual-stack
/// listeners) are matched as their IPv4 address. A peer address that does
/// not parse is outside every range.
pub fn cidr<I, S>(ranges: I) -> Result<RequestFilter, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let nets = ranges.into_iter()
        .map(|range| {
            let range = range.as_ref();
            range.trim().parse::<IpNet>().map_err(|source| ConfigError::InvalidRange {
                range: range.to_owned(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RequestFilter::new(move |req: &Request| {
        peer_ip(req.remote_addr())
            .is_some_and(|ip| nets.iter().any(|net| net.contains(&ip)))
    }))
}

/// Host part of a `host:port` peer address, parsed as an IP.
fn peer_ip(remote_addr: &str) -> Option<IpAddr> {
    let ip = match remote_addr.parse::<SocketAddr>() {
        Ok(addr) => addr.ip(),
        // Transports that report a bare address without a port.
        Err(_) => remote_addr.parse::<IpAddr>().ok()?,
    };
    Some(ip.to_canonical())
}
