//! cplb-check - validate control plane load balancing configuration
//!
//! Reads a cluster configuration document, defaults and validates its
//! `controlPlaneLoadBalancing` section and reports every problem found.
//!
//! # Components
//!
//! - **Config**: tool settings (logging, output, routing table locations)
//! - **Cluster**: the cluster configuration document model
//! - **Check**: runs the validation over a document

pub mod check;
pub mod cluster;
pub mod config;

pub use check::check_cluster_config;
pub use cluster::ClusterConfig;
pub use config::{Config, ConfigError, LogFormat, OutputFormat, Overrides};
