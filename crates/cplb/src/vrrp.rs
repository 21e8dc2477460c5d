//! VRRP instance defaulting and validation.

use crate::error::ValidationError;
use crate::nic::NicResolver;
use crate::types::{
    DEFAULT_ADVERT_INTERVAL, DEFAULT_VIRTUAL_ROUTER_ID, KeepalivedSpec, MAX_AUTH_PASS_LEN,
    MAX_VIRTUAL_ROUTER_ID, VrrpInstance,
};
use ipnetwork::IpNetwork;
use tracing::trace;

impl KeepalivedSpec {
    /// Default and validate every VRRP instance.
    ///
    /// Never stops early: each instance is defaulted even when an earlier one
    /// failed, and all problems are returned in order. Only a router ID set by
    /// the caller is range checked, never one assigned here.
    pub fn validate_vrrp_instances<R>(&mut self, resolver: &R) -> Vec<ValidationError>
    where
        R: NicResolver + ?Sized,
    {
        let mut errs = Vec::new();
        for (index, instance) in self.vrrp_instances.iter_mut().enumerate() {
            let router_id_err = instance.router_id_error(index);
            if let Err(e) = instance.apply_defaults(index, resolver) {
                errs.push(e);
            }
            errs.extend(router_id_err);
            errs.extend(instance.field_errors(index));
        }
        errs
    }
}

impl VrrpInstance {
    /// Fill in unset fields.
    ///
    /// An unset router ID becomes `51 + index`, which keeps IDs unique within
    /// one spec. If the default NIC cannot be resolved the error is returned,
    /// and the interface is left empty.
    pub fn apply_defaults<R>(&mut self, index: usize, resolver: &R) -> Result<(), ValidationError>
    where
        R: NicResolver + ?Sized,
    {
        let mut result = Ok(());

        if self.interface.is_empty() {
            self.interface = match resolver.default_nic() {
                Ok(nic) => nic,
                Err(source) => {
                    result = Err(ValidationError::DefaultNic { index, source });
                    String::new()
                }
            };
            trace!(index, interface = %self.interface, "Defaulted VRRP interface");
        }

        if self.virtual_router_id.is_none() {
            let offset = i32::try_from(index).unwrap_or(i32::MAX);
            self.virtual_router_id = Some(DEFAULT_VIRTUAL_ROUTER_ID.saturating_add(offset));
        }

        if self.advert_interval.is_none() {
            self.advert_interval = Some(DEFAULT_ADVERT_INTERVAL);
        }

        result
    }

    /// Report constraint violations without modifying anything.
    ///
    /// The router ID lower bound check is `< 0`, so 0 is accepted. An unset
    /// router ID is not checked.
    pub fn check_constraints(&self, index: usize) -> Vec<ValidationError> {
        let mut errs: Vec<ValidationError> = self.router_id_error(index).into_iter().collect();
        errs.extend(self.field_errors(index));
        errs
    }

    fn router_id_error(&self, index: usize) -> Option<ValidationError> {
        self.virtual_router_id
            .filter(|value| !(0..=MAX_VIRTUAL_ROUTER_ID).contains(value))
            .map(|value| ValidationError::VirtualRouterIdOutOfRange { index, value })
    }

    /// Auth pass and virtual IP checks.
    fn field_errors(&self, index: usize) -> Vec<ValidationError> {
        let mut errs = Vec::new();

        if self.auth_pass.is_empty() {
            errs.push(ValidationError::AuthPassMissing { index });
        }
        if self.auth_pass.len() > MAX_AUTH_PASS_LEN {
            errs.push(ValidationError::AuthPassTooLong {
                index,
                len: self.auth_pass.len(),
            });
        }

        if self.virtual_ips.is_empty() {
            errs.push(ValidationError::VirtualIpsMissing { index });
        }
        for vip in &self.virtual_ips {
            if !is_cidr(vip) {
                errs.push(ValidationError::InvalidVirtualIp {
                    index,
                    value: vip.clone(),
                });
            }
        }

        errs
    }
}

/// `address/prefix` with a numeric prefix length, IPv4 or IPv6.
fn is_cidr(value: &str) -> bool {
    match value.split_once('/') {
        // IpNetwork also accepts a bare address or a dotted netmask
        Some((_, prefix)) if !prefix.is_empty() && prefix.bytes().all(|b| b.is_ascii_digit()) => {
            value.parse::<IpNetwork>().is_ok()
        }
        _ => false,
    }
}
