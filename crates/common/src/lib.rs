//! Common utilities and types shared across CPLB components.

pub mod error;
pub mod logging;

pub use error::{Error, Result};
