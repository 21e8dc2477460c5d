//! IPVS virtual server defaulting and validation.

use crate::error::ValidationError;
use crate::types::{
    DEFAULT_PERSISTENCE_TIMEOUT_SECONDS, DEFAULT_REAL_SERVER_WEIGHT, KeepalivedSpec, LbAlgo,
    LbKind, RealServer, VirtualServer,
};
use std::net::IpAddr;

impl KeepalivedSpec {
    /// Default and validate every virtual server.
    ///
    /// `ipAddress` uniqueness is not checked here; the list is keyed by it
    /// at the schema level.
    pub fn validate_virtual_servers(&mut self) -> Vec<ValidationError> {
        let mut errs = Vec::new();
        for (index, server) in self.virtual_servers.iter_mut().enumerate() {
            server.apply_defaults();
            errs.extend(server.check_constraints(index));
        }
        errs
    }
}

impl VirtualServer {
    /// Fill in unset fields.
    ///
    /// A persistence timeout of 0 is indistinguishable from unset and is
    /// replaced by 360. Invalid values are never reset.
    pub fn apply_defaults(&mut self) {
        if self.lb_algo.is_none() {
            self.lb_algo = Some(LbAlgo::RoundRobin);
        }

        if self.lb_kind.is_none() {
            self.lb_kind = Some(LbKind::DirectRouting);
        }

        if self.persistence_timeout_seconds == 0 {
            self.persistence_timeout_seconds = DEFAULT_PERSISTENCE_TIMEOUT_SECONDS;
        }

        for real_server in &mut self.real_servers {
            real_server.apply_defaults();
        }
    }

    /// Report constraint violations without modifying anything.
    pub fn check_constraints(&self, index: usize) -> Vec<ValidationError> {
        let mut errs = Vec::new();

        // An empty address trips both checks.
        if self.ip_address.is_empty() {
            errs.push(ValidationError::IpAddressMissing { index });
        }
        if self.ip_address.parse::<IpAddr>().is_err() {
            errs.push(ValidationError::InvalidIpAddress {
                index,
                value: self.ip_address.clone(),
            });
        }

        if let Some(LbAlgo::Other(value)) = &self.lb_algo {
            errs.push(ValidationError::InvalidLbAlgo {
                index,
                value: value.clone(),
            });
        }

        if let Some(LbKind::Other(value)) = &self.lb_kind {
            errs.push(ValidationError::InvalidLbKind {
                index,
                value: value.clone(),
            });
        }

        if self.persistence_timeout_seconds < 0 {
            errs.push(ValidationError::NegativePersistenceTimeout {
                index,
                value: self.persistence_timeout_seconds,
            });
        }

        if self.delay_loop < 0 {
            errs.push(ValidationError::NegativeDelayLoop {
                index,
                value: self.delay_loop,
            });
        }

        errs
    }
}

impl RealServer {
    pub fn apply_defaults(&mut self) {
        if self.weight == 0 {
            self.weight = DEFAULT_REAL_SERVER_WEIGHT;
        }
    }
}
