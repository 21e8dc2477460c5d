//! Control plane load balancing data types.
//!
//! Field names on the wire are camelCase and must stay stable: they are shared
//! with every other consumer of the cluster configuration document.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Default VRRP virtual router ID (keepalived's default).
pub const DEFAULT_VIRTUAL_ROUTER_ID: i32 = 51;

/// Highest valid VRRP virtual router ID.
pub const MAX_VIRTUAL_ROUTER_ID: i32 = 255;

/// Default VRRP advertisement interval in seconds (keepalived's default).
pub const DEFAULT_ADVERT_INTERVAL: i32 = 1;

/// Maximum length of a VRRP authentication password, in bytes.
pub const MAX_AUTH_PASS_LEN: usize = 8;

/// Default persistence timeout for virtual servers (6 minutes).
pub const DEFAULT_PERSISTENCE_TIMEOUT_SECONDS: i64 = 360;

/// Default weight of a real server.
pub const DEFAULT_REAL_SERVER_WEIGHT: i64 = 1;

/// Control plane load balancing configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadBalancingSpec {
    /// Whether control plane load balancing is enabled.
    #[serde(default, skip_serializing_if = "is_false")]
    pub enabled: bool,

    /// Backing load balancer implementation. Defaults to `Keepalived`.
    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_as_none"
    )]
    pub lb_type: Option<CplbType>,

    /// Keepalived specific settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keepalived: Option<KeepalivedSpec>,
}

/// Type of the control plane load balancer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CplbType {
    Keepalived,
    /// Unsupported value, kept verbatim so it can be reported.
    Other(String),
}

impl CplbType {
    pub fn as_str(&self) -> &str {
        match self {
            CplbType::Keepalived => "Keepalived",
            CplbType::Other(s) => s,
        }
    }
}

/// Keepalived configuration: VRRP instances and IPVS virtual servers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeepalivedSpec {
    /// VRRP instances, one per group of virtual IPs.
    #[serde(
        rename = "vrrpInstances",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub vrrp_instances: Vec<VrrpInstance>,

    /// Virtual servers, keyed by `ipAddress`.
    #[serde(
        rename = "virtualServers",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub virtual_servers: Vec<VirtualServer>,
}

/// A single VRRP instance.
///
/// All control plane nodes must share the same `virtual_router_id`, and two
/// clusters in the same broadcast domain must not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VrrpInstance {
    /// Virtual IPs in CIDR notation.
    #[serde(rename = "virtualIPs", default, skip_serializing_if = "Vec::is_empty")]
    pub virtual_ips: Vec<String>,

    /// NIC used by the virtual router. Defaults to the NIC owning the default route.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub interface: String,

    /// VRRP router ID (1-255).
    #[serde(
        rename = "virtualRouterID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub virtual_router_id: Option<i32>,

    /// Advertisement interval in seconds.
    #[serde(
        rename = "advertInterval",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub advert_interval: Option<i32>,

    /// Password shared by the VRRP peers. This only guards against accidental
    /// misconfiguration, it is not a security feature.
    #[serde(rename = "authPass", default)]
    pub auth_pass: String,
}

/// A single IPVS virtual server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualServer {
    /// Virtual IP address served by this virtual server.
    #[serde(rename = "ipAddress", default)]
    pub ip_address: String,

    /// Delay between health check polls, in seconds.
    #[serde(rename = "delayLoop", default, skip_serializing_if = "is_zero")]
    pub delay_loop: i64,

    /// Scheduling algorithm. Defaults to `rr`.
    #[serde(
        rename = "lbAlgo",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_as_none"
    )]
    pub lb_algo: Option<LbAlgo>,

    /// Forwarding method. Defaults to `DR`.
    #[serde(
        rename = "lbKind",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_as_none"
    )]
    pub lb_kind: Option<LbKind>,

    /// Persistence timeout in seconds. Zero means unset and becomes 360.
    #[serde(
        rename = "persistenceTimeoutSeconds",
        default,
        skip_serializing_if = "is_zero"
    )]
    pub persistence_timeout_seconds: i64,

    /// Backends behind this virtual server.
    #[serde(rename = "realServers", default, skip_serializing_if = "Vec::is_empty")]
    pub real_servers: Vec<RealServer>,
}

/// A backend of a virtual server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealServer {
    #[serde(rename = "ipAddress", default)]
    pub ip_address: String,

    /// Relative weight. Zero means unset and becomes 1.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub weight: i64,
}

/// IPVS scheduling algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LbAlgo {
    RoundRobin,
    WeightedRoundRobin,
    LeastConnection,
    WeightedLeastConnection,
    LocalityBasedLeastConnection,
    DestinationHashing,
    SourceHashing,
    ShortestExpectedDelay,
    NeverQueue,
    /// Unknown algorithm, kept verbatim so it can be reported.
    Other(String),
}

impl LbAlgo {
    pub fn as_str(&self) -> &str {
        match self {
            LbAlgo::RoundRobin => "rr",
            LbAlgo::WeightedRoundRobin => "wrr",
            LbAlgo::LeastConnection => "lc",
            LbAlgo::WeightedLeastConnection => "wlc",
            LbAlgo::LocalityBasedLeastConnection => "lblc",
            LbAlgo::DestinationHashing => "dh",
            LbAlgo::SourceHashing => "sh",
            LbAlgo::ShortestExpectedDelay => "sed",
            LbAlgo::NeverQueue => "nq",
            LbAlgo::Other(s) => s,
        }
    }
}

/// IPVS forwarding method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LbKind {
    /// Masquerading
    Nat,
    /// Direct routing
    DirectRouting,
    /// IP-in-IP tunneling
    Tunnel,
    /// Unknown kind, kept verbatim so it can be reported.
    Other(String),
}

impl LbKind {
    pub fn as_str(&self) -> &str {
        match self {
            LbKind::Nat => "NAT",
            LbKind::DirectRouting => "DR",
            LbKind::Tunnel => "TUN",
            LbKind::Other(s) => s,
        }
    }
}

impl From<String> for CplbType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Keepalived" => CplbType::Keepalived,
            _ => CplbType::Other(s),
        }
    }
}

impl From<String> for LbAlgo {
    fn from(s: String) -> Self {
        match s.as_str() {
            "rr" => LbAlgo::RoundRobin,
            "wrr" => LbAlgo::WeightedRoundRobin,
            "lc" => LbAlgo::LeastConnection,
            "wlc" => LbAlgo::WeightedLeastConnection,
            "lblc" => LbAlgo::LocalityBasedLeastConnection,
            "dh" => LbAlgo::DestinationHashing,
            "sh" => LbAlgo::SourceHashing,
            "sed" => LbAlgo::ShortestExpectedDelay,
            "nq" => LbAlgo::NeverQueue,
            _ => LbAlgo::Other(s),
        }
    }
}

impl From<String> for LbKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "NAT" => LbKind::Nat,
            "DR" => LbKind::DirectRouting,
            "TUN" => LbKind::Tunnel,
            _ => LbKind::Other(s),
        }
    }
}

impl From<&str> for CplbType {
    fn from(s: &str) -> Self {
        s.to_string().into()
    }
}

impl From<&str> for LbAlgo {
    fn from(s: &str) -> Self {
        s.to_string().into()
    }
}

impl From<&str> for LbKind {
    fn from(s: &str) -> Self {
        s.to_string().into()
    }
}

impl From<CplbType> for String {
    fn from(t: CplbType) -> Self {
        t.as_str().to_string()
    }
}

impl From<LbAlgo> for String {
    fn from(a: LbAlgo) -> Self {
        a.as_str().to_string()
    }
}

impl From<LbKind> for String {
    fn from(k: LbKind) -> Self {
        k.as_str().to_string()
    }
}

impl fmt::Display for CplbType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for LbAlgo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for LbKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// An empty string in the input means "unset", same as an absent field.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()).map(T::from))
}

fn is_false(b: &bool) -> bool {
    !*b
}

fn is_zero(n: &i64) -> bool {
    *n == 0
}
