//! Cluster configuration document.
//!
//! Only the parts the check needs are typed: `.spec.api.externalAddress` and
//! `.spec.network.controlPlaneLoadBalancing`. Everything else is carried
//! through untouched so the defaulted document can be written back out.

use crate::config::OutputFormat;
use common::Result;
use cplb::LoadBalancingSpec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

type Extra = BTreeMap<String, serde_yaml::Value>;

/// A cluster configuration document (YAML or JSON).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterConfig {
    #[serde(default)]
    pub spec: ClusterSpec,

    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<ApiSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<NetworkSpec>,

    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiSpec {
    /// Address the API is reached through from outside the cluster.
    #[serde(
        rename = "externalAddress",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub external_address: String,

    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    #[serde(
        rename = "controlPlaneLoadBalancing",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub control_plane_load_balancing: Option<LoadBalancingSpec>,

    #[serde(flatten)]
    pub extra: Extra,
}

impl ClusterConfig {
    /// Parse a document. JSON input is accepted as YAML.
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Read a document from a file, or from stdin when `path` is `-`.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = if path == Path::new("-") {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        } else {
            std::fs::read_to_string(path)?
        };
        Self::parse(&contents)
    }

    /// `.spec.api.externalAddress`, empty when not set.
    pub fn external_address(&self) -> &str {
        self.spec
            .api
            .as_ref()
            .map(|api| api.external_address.as_str())
            .unwrap_or_default()
    }

    /// `.spec.network.controlPlaneLoadBalancing`, if present.
    pub fn load_balancing_mut(&mut self) -> Option<&mut LoadBalancingSpec> {
        self.spec
            .network
            .as_mut()
            .and_then(|network| network.control_plane_load_balancing.as_mut())
    }

    /// Serialize the document in the requested format.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        Ok(match format {
            OutputFormat::Yaml => serde_yaml::to_string(self)?,
            OutputFormat::Json => serde_json::to_string_pretty(self)?,
        })
    }
}
