//! Default network interface discovery.
//!
//! VRRP instances without an explicit interface are bound to the NIC that
//! owns the host's default route. The lookup sits behind [`NicResolver`] so
//! callers and tests can substitute their own.

use common::{Error, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, trace};

/// Kernel IPv4 routing table
pub const PROC_NET_ROUTE: &str = "/proc/net/route";

/// Kernel IPv6 routing table
pub const PROC_NET_IPV6_ROUTE: &str = "/proc/net/ipv6_route";

const RTF_UP: u32 = 0x0001;
const RTF_REJECT: u32 = 0x0200;
const LOOPBACK: &str = "lo";

/// Resolves the name of the host's default network interface.
#[cfg_attr(test, mockall::automock)]
pub trait NicResolver {
    fn default_nic(&self) -> Result<String>;
}

impl<F> NicResolver for F
where
    F: Fn() -> Result<String>,
{
    fn default_nic(&self) -> Result<String> {
        self()
    }
}

/// Resolver backed by the kernel routing tables under `/proc`.
///
/// The IPv4 table is consulted first, then the IPv6 table. Among default
/// routes that are up, the one with the lowest metric wins.
#[derive(Debug, Clone)]
pub struct RouteTableResolver {
    ipv4_routes: PathBuf,
    ipv6_routes: PathBuf,
}

impl Default for RouteTableResolver {
    fn default() -> Self {
        Self {
            ipv4_routes: PathBuf::from(PROC_NET_ROUTE),
            ipv6_routes: PathBuf::from(PROC_NET_IPV6_ROUTE),
        }
    }
}

impl RouteTableResolver {
    /// Create a resolver reading the standard `/proc` routing tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver reading routing tables from custom locations.
    pub fn with_paths(ipv4_routes: impl Into<PathBuf>, ipv6_routes: impl Into<PathBuf>) -> Self {
        Self {
            ipv4_routes: ipv4_routes.into(),
            ipv6_routes: ipv6_routes.into(),
        }
    }

    #[cfg_attr(not(target_os = "linux"), allow(dead_code))]
    fn lookup(&self) -> Result<String> {
        let ipv4 = fs::read_to_string(&self.ipv4_routes)?;
        if let Some(nic) = parse_ipv4_default_route(&ipv4) {
            debug!(nic = %nic, "Found IPv4 default route");
            return Ok(nic);
        }

        match fs::read_to_string(&self.ipv6_routes) {
            Ok(ipv6) => {
                if let Some(nic) = parse_ipv6_default_route(&ipv6) {
                    debug!(nic = %nic, "Found IPv6 default route");
                    return Ok(nic);
                }
            }
            // IPv6 disabled on the host
            Err(e) if e.kind() == ErrorKind::NotFound => {
                trace!(path = %self.ipv6_routes.display(), "IPv6 routing table not present");
            }
            Err(e) => return Err(e.into()),
        }

        Err(Error::nic("no default route found"))
    }
}

impl NicResolver for RouteTableResolver {
    #[cfg(target_os = "linux")]
    fn default_nic(&self) -> Result<String> {
        self.lookup()
    }

    #[cfg(not(target_os = "linux"))]
    fn default_nic(&self) -> Result<String> {
        Err(Error::unsupported(
            "default route lookup is only implemented on Linux",
        ))
    }
}

struct Route<'a> {
    iface: &'a str,
    metric: u32,
}

/// Find the interface of the best IPv4 default route in `/proc/net/route` format.
///
/// ```text
/// Iface  Destination  Gateway   Flags  RefCnt  Use  Metric  Mask      MTU  Window  IRTT
/// eth0   00000000     0102A8C0  0003   0       0    100     00000000  0    0       0
/// ```
pub fn parse_ipv4_default_route(contents: &str) -> Option<String> {
    contents
        .lines()
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 8 || fields[0] == "Iface" {
                return None;
            }
            let flags = u32::from_str_radix(fields[3], 16).ok()?;
            let metric = fields[6].parse::<u32>().ok()?;
            let default = fields[1] == "00000000" && fields[7] == "00000000";
            (default && usable(fields[0], flags)).then_some(Route {
                iface: fields[0],
                metric,
            })
        })
        .min_by_key(|route| route.metric)
        .map(|route| route.iface.to_string())
}

/// Find the interface of the best IPv6 default route in `/proc/net/ipv6_route` format.
///
/// Columns: destination, prefix length, source, source prefix length,
/// next hop, metric, refcount, use, flags, interface. Numbers are hex.
pub fn parse_ipv6_default_route(contents: &str) -> Option<String> {
    contents
        .lines()
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 10 {
                return None;
            }
            let prefix_len = u8::from_str_radix(fields[1], 16).ok()?;
            let metric = u32::from_str_radix(fields[5], 16).ok()?;
            let flags = u32::from_str_radix(fields[8], 16).ok()?;
            let default = prefix_len == 0 && fields[0].bytes().all(|b| b == b'0');
            (default && usable(fields[9], flags)).then_some(Route {
                iface: fields[9],
                metric,
            })
        })
        .min_by_key(|route| route.metric)
        .map(|route| route.iface.to_string())
}

fn usable(iface: &str, flags: u32) -> bool {
    flags & RTF_UP != 0 && flags & RTF_REJECT == 0 && iface != LOOPBACK
}
