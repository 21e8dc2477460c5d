//! Control plane load balancing (CPLB) configuration validation.
//!
//! Validates and defaults the keepalived based load balancing section of a
//! cluster configuration: VRRP instances that float virtual IPs between
//! control plane nodes, and IPVS virtual servers that balance traffic across
//! them.
//!
//! Validation is a pure, synchronous pass over a caller owned spec. Defaults
//! are written back in place and every problem found is returned, in order,
//! rather than stopping at the first one.
//!
//! # Example
//!
//! ```
//! use cplb::{KeepalivedSpec, LoadBalancingSpec, VrrpInstance};
//!
//! let mut spec = LoadBalancingSpec {
//!     enabled: true,
//!     lb_type: None,
//!     keepalived: Some(KeepalivedSpec {
//!         vrrp_instances: vec![VrrpInstance {
//!             virtual_ips: vec!["192.168.1.100/24".to_string()],
//!             auth_pass: "secret".to_string(),
//!             ..Default::default()
//!         }],
//!         virtual_servers: vec![],
//!     }),
//! };
//!
//! let default_nic = || -> common::Result<String> { Ok("eth0".to_string()) };
//! let errors = spec.validate_with("", &default_nic);
//! assert!(errors.is_empty());
//! assert_eq!(spec.keepalived.unwrap().vrrp_instances[0].virtual_router_id, Some(51));
//! ```

mod error;
pub mod nic;
mod types;
mod validate;
mod virtual_server;
mod vrrp;

pub use error::{ErrorKind, ValidationError, ValidationErrors};
pub use nic::{NicResolver, RouteTableResolver};
pub use types::{
    CplbType, DEFAULT_ADVERT_INTERVAL, DEFAULT_PERSISTENCE_TIMEOUT_SECONDS,
    DEFAULT_REAL_SERVER_WEIGHT, DEFAULT_VIRTUAL_ROUTER_ID, KeepalivedSpec, LbAlgo, LbKind,
    LoadBalancingSpec, MAX_AUTH_PASS_LEN, MAX_VIRTUAL_ROUTER_ID, RealServer, VirtualServer,
    VrrpInstance,
};
pub use validate::validate;
