//! Running validation over a cluster configuration document.

use crate::cluster::ClusterConfig;
use cplb::{NicResolver, ValidationErrors};
use tracing::{debug, info};

/// Validate and default the document's load balancing section in place.
///
/// `external_address` overrides `.spec.api.externalAddress` when given.
/// A document without a load balancing section is valid.
pub fn check_cluster_config<R>(
    config: &mut ClusterConfig,
    external_address: Option<&str>,
    resolver: &R,
) -> ValidationErrors
where
    R: NicResolver + ?Sized,
{
    let external_address = external_address
        .map(str::to_string)
        .unwrap_or_else(|| config.external_address().to_string());

    let Some(spec) = config.load_balancing_mut() else {
        info!("No controlPlaneLoadBalancing section, nothing to check");
        return ValidationErrors::default();
    };

    debug!(
        enabled = spec.enabled,
        external_address = %external_address,
        "Checking control plane load balancing"
    );
    let errors = ValidationErrors::from(spec.validate_with(&external_address, resolver));

    if errors.is_empty() {
        info!("Control plane load balancing configuration is valid");
    } else {
        info!(errors = errors.len(), "Control plane load balancing configuration is invalid");
    }
    errors
}
