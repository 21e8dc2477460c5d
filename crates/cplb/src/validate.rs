//! Top-level validation of a control plane load balancing spec.

use crate::error::ValidationError;
use crate::nic::{NicResolver, RouteTableResolver};
use crate::types::{CplbType, LoadBalancingSpec};
use tracing::debug;

/// Validate an optional load balancing section. An absent section is trivially valid.
///
/// `external_address` is the cluster's `.spec.api.externalAddress`.
pub fn validate(spec: Option<&mut LoadBalancingSpec>, external_address: &str) -> Vec<ValidationError> {
    match spec {
        Some(spec) => spec.validate(external_address),
        None => Vec::new(),
    }
}

impl LoadBalancingSpec {
    /// Default and validate in place, resolving the default NIC from
    /// the host routing table.
    pub fn validate(&mut self, external_address: &str) -> Vec<ValidationError> {
        self.validate_with(external_address, &RouteTableResolver::default())
    }

    /// Same as [`LoadBalancingSpec::validate`] with a caller supplied resolver.
    ///
    /// Defaults are written back whether or not errors are found. Nothing
    /// short-circuits: a bad type still lets the nested sections be defaulted
    /// and checked.
    pub fn validate_with<R>(&mut self, external_address: &str, resolver: &R) -> Vec<ValidationError>
    where
        R: NicResolver + ?Sized,
    {
        let mut errs = Vec::new();

        if self.lb_type.is_none() {
            self.lb_type = Some(CplbType::Keepalived);
        }

        if !self.enabled {
            debug!("Control plane load balancing disabled, skipping validation");
            return errs;
        }

        if let Some(CplbType::Other(value)) = &self.lb_type {
            errs.push(ValidationError::UnsupportedType {
                value: value.clone(),
            });
        }

        let Some(keepalived) = self.keepalived.as_mut() else {
            debug!(errors = errs.len(), "No keepalived section to validate");
            return errs;
        };

        errs.extend(keepalived.validate_vrrp_instances(resolver));
        errs.extend(keepalived.validate_virtual_servers());

        // The reconciler watches the kubernetes API endpoints to find the
        // control plane addresses, which an external address bypasses.
        if !external_address.is_empty() && !keepalived.virtual_servers.is_empty() {
            errs.push(ValidationError::ExternalAddressConflict);
        }

        debug!(
            vrrp_instances = keepalived.vrrp_instances.len(),
            virtual_servers = keepalived.virtual_servers.len(),
            errors = errs.len(),
            "Validated control plane load balancing spec"
        );

        errs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nic::MockNicResolver;
    use crate::types::{KeepalivedSpec, VirtualServer, VrrpInstance};
    use common::Result;

    fn eth0() -> Result<String> {
        Ok("eth0".to_string())
    }

    fn vrrp() -> VrrpInstance {
        VrrpInstance {
            virtual_ips: vec!["10.0.0.100/24".to_string()],
            auth_pass: "secret".to_string(),
            ..Default::default()
        }
    }

    fn virtual_server() -> VirtualServer {
        VirtualServer {
            ip_address: "10.0.0.100".to_string(),
            ..Default::default()
        }
    }

    fn enabled(keepalived: Option<KeepalivedSpec>) -> LoadBalancingSpec {
        LoadBalancingSpec {
            enabled: true,
            lb_type: None,
            keepalived,
        }
    }

    #[test]
    fn test_absent_spec_is_valid() {
        assert!(validate(None, "").is_empty());
        assert!(validate(None, "api.example.com").is_empty());
    }

    #[test]
    fn test_type_defaults_to_keepalived() {
        let mut spec = enabled(None);
        assert!(spec.validate_with("", &eth0).is_empty());
        assert_eq!(spec.lb_type, Some(CplbType::Keepalived));
    }

    #[test]
    fn test_unsupported_type_still_validates_nested() {
        let mut spec = enabled(Some(KeepalivedSpec {
            vrrp_instances: vec![VrrpInstance {
                auth_pass: String::new(),
                ..vrrp()
            }],
            virtual_servers: vec![],
        }));
        spec.lb_type = Some(CplbType::from("HAProxy"));

        let errs = spec.validate_with("", &eth0);
        assert_eq!(errs.len(), 2);
        assert!(matches!(&errs[0], ValidationError::UnsupportedType { value } if value == "HAProxy"));
        assert!(matches!(errs[1], ValidationError::AuthPassMissing { index: 0 }));

        // Type kept, nested defaults applied
        assert_eq!(spec.lb_type, Some(CplbType::Other("HAProxy".to_string())));
        let keepalived = spec.keepalived.as_ref().unwrap();
        assert_eq!(keepalived.vrrp_instances[0].virtual_router_id, Some(51));
    }

    #[test]
    fn test_disabled_spec_only_defaults_type() {
        let keepalived = KeepalivedSpec {
            vrrp_instances: vec![VrrpInstance::default()],
            virtual_servers: vec![VirtualServer::default()],
        };
        let mut spec = LoadBalancingSpec {
            enabled: false,
            lb_type: None,
            keepalived: Some(keepalived.clone()),
        };

        let mut resolver = MockNicResolver::new();
        resolver.expect_default_nic().never();

        assert!(spec.validate_with("api.example.com", &resolver).is_empty());
        assert_eq!(spec.lb_type, Some(CplbType::Keepalived));
        assert_eq!(spec.keepalived, Some(keepalived));
    }

    #[test]
    fn test_external_address_conflicts_with_virtual_servers() {
        let mut spec = enabled(Some(KeepalivedSpec {
            vrrp_instances: vec![vrrp()],
            virtual_servers: vec![virtual_server()],
        }));

        let errs = spec.validate_with("api.example.com", &eth0);
        assert_eq!(errs.len(), 1);
        assert!(matches!(errs[0], ValidationError::ExternalAddressConflict));
    }

    #[test]
    fn test_external_address_allowed_with_vrrp_only() {
        let mut spec = enabled(Some(KeepalivedSpec {
            vrrp_instances: vec![vrrp()],
            virtual_servers: vec![],
        }));
        assert!(spec.validate_with("api.example.com", &eth0).is_empty());
    }

    #[test]
    fn test_no_external_address_never_conflicts() {
        let mut spec = enabled(Some(KeepalivedSpec {
            vrrp_instances: vec![vrrp()],
            virtual_servers: vec![virtual_server(), VirtualServer {
                ip_address: "10.0.0.101".to_string(),
                ..Default::default()
            }],
        }));
        assert!(spec.validate_with("", &eth0).is_empty());
    }

    #[test]
    fn test_error_order() {
        let mut spec = enabled(Some(KeepalivedSpec {
            vrrp_instances: vec![VrrpInstance {
                virtual_router_id: Some(300),
                ..vrrp()
            }],
            virtual_servers: vec![VirtualServer {
                delay_loop: -1,
                ..virtual_server()
            }],
        }));
        spec.lb_type = Some(CplbType::from("IPVS"));

        let errs = spec.validate_with("10.0.0.1", &eth0);
        let kinds: Vec<_> = errs.iter().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                crate::ErrorKind::Enum,
                crate::ErrorKind::Range,
                crate::ErrorKind::Range,
                crate::ErrorKind::Conflict,
            ]
        );
    }
}
