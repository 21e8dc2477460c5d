//! Validation errors.

use crate::types::{CplbType, MAX_AUTH_PASS_LEN};
use std::fmt;
use thiserror::Error;

/// A single problem found while validating a load balancing spec.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("vrrpInstances[{index}]: failed to get default NIC: {source}")]
    DefaultNic {
        index: usize,
        #[source]
        source: common::Error,
    },

    #[error("vrrpInstances[{index}]: VirtualRouterID must be in the range of 1-255, got {value}")]
    VirtualRouterIdOutOfRange { index: usize, value: i32 },

    #[error("vrrpInstances[{index}]: AuthPass must be defined")]
    AuthPassMissing { index: usize },

    #[error(
        "vrrpInstances[{index}]: AuthPass must be {} characters or less, got {len}",
        MAX_AUTH_PASS_LEN
    )]
    AuthPassTooLong { index: usize, len: usize },

    #[error("vrrpInstances[{index}]: VirtualIPs must be defined")]
    VirtualIpsMissing { index: usize },

    #[error("vrrpInstances[{index}]: VirtualIPs must be a CIDR. Got: {value}")]
    InvalidVirtualIp { index: usize, value: String },

    #[error("virtualServers[{index}]: IPAddress must be defined")]
    IpAddressMissing { index: usize },

    #[error("virtualServers[{index}]: invalid IP address: {value}")]
    InvalidIpAddress { index: usize, value: String },

    #[error("virtualServers[{index}]: invalid LBAlgo: {value}")]
    InvalidLbAlgo { index: usize, value: String },

    #[error("virtualServers[{index}]: invalid LBKind: {value}")]
    InvalidLbKind { index: usize, value: String },

    #[error("virtualServers[{index}]: PersistenceTimeout must not be negative, got {value}")]
    NegativePersistenceTimeout { index: usize, value: i64 },

    #[error("virtualServers[{index}]: DelayLoop must not be negative, got {value}")]
    NegativeDelayLoop { index: usize, value: i64 },

    #[error("unsupported CPLB type: {value}. Only allowed value: {}", CplbType::Keepalived)]
    UnsupportedType { value: String },

    #[error(".spec.api.externalAddress and virtualServers cannot be used together")]
    ExternalAddressConflict,
}

/// Broad class of a [`ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Default interface lookup failed
    Lookup,
    /// Numeric value outside its bounds
    Range,
    /// Malformed CIDR or IP literal
    Format,
    /// Value outside a fixed set
    Enum,
    /// Required field is empty
    Required,
    /// Value too long
    Length,
    /// Fields that cannot be combined
    Conflict,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Lookup => write!(f, "lookup"),
            ErrorKind::Range => write!(f, "range"),
            ErrorKind::Format => write!(f, "format"),
            ErrorKind::Enum => write!(f, "enum"),
            ErrorKind::Required => write!(f, "required"),
            ErrorKind::Length => write!(f, "length"),
            ErrorKind::Conflict => write!(f, "conflict"),
        }
    }
}

impl ValidationError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::DefaultNic { .. } => ErrorKind::Lookup,
            ValidationError::VirtualRouterIdOutOfRange { .. }
            | ValidationError::NegativePersistenceTimeout { .. }
            | ValidationError::NegativeDelayLoop { .. } => ErrorKind::Range,
            ValidationError::InvalidVirtualIp { .. } | ValidationError::InvalidIpAddress { .. } => {
                ErrorKind::Format
            }
            ValidationError::InvalidLbAlgo { .. }
            | ValidationError::InvalidLbKind { .. }
            | ValidationError::UnsupportedType { .. } => ErrorKind::Enum,
            ValidationError::AuthPassMissing { .. }
            | ValidationError::VirtualIpsMissing { .. }
            | ValidationError::IpAddressMissing { .. } => ErrorKind::Required,
            ValidationError::AuthPassTooLong { .. } => ErrorKind::Length,
            ValidationError::ExternalAddressConflict => ErrorKind::Conflict,
        }
    }
}

/// All problems found in one validation pass.
///
/// Displays one message per line, in the order they were found.
#[derive(Debug, Default)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// `Ok(())` when nothing was found, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), Self> {
        if self.0.is_empty() { Ok(()) } else { Err(self) }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<ValidationError> {
        self.0
    }
}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
