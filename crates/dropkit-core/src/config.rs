//! Configuration structures for dropkit-core.
//!
//! Explicit, injectable configuration used by the drop client. The core crate
//! does not read environment variables; hosts construct and pass these in.

use crate::errors::{DropError, DropResult};
use crate::ITEM_BATCH_SIZE;

/// Configuration for drop client operations.
#[derive(Debug, Clone)]
pub struct DropConfig {
    /// Items per registration transaction during a lazy mint.
    pub batch_size: usize,
    pub limits: LimitsConfig,
}

impl Default for DropConfig {
    fn default() -> Self {
        Self {
            batch_size: ITEM_BATCH_SIZE,
            limits: LimitsConfig::default(),
        }
    }
}

/// Size limits applied to registration entries.
///
/// Defaults match the on-chain config-line layout: 32-byte names and 200-byte
/// URIs.
#[derive(Debug, Clone)]
pub struct LimitsConfig {
    pub max_name_len: usize,
    pub max_uri_len: usize,
    /// Upper bound on items accepted by a single lazy mint call.
    pub max_items_per_mint: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_name_len: 32,
            max_uri_len: 200,
            max_items_per_mint: 10_000,
        }
    }
}

/// Validate a full configuration object.
pub fn validate_config(cfg: &DropConfig) -> DropResult<()> {
    if cfg.batch_size == 0 {
        return Err(DropError::invalid_argument("batch_size must be greater than zero"));
    }
    if cfg.limits.max_name_len == 0 || cfg.limits.max_uri_len == 0 {
        return Err(DropError::invalid_argument(
            "name and uri limits must be greater than zero",
        ));
    }
    if cfg.limits.max_items_per_mint == 0 {
        return Err(DropError::invalid_argument(
            "max_items_per_mint must be greater than zero",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = DropConfig::default();
        validate_config(&cfg).unwrap();
        assert_eq!(cfg.batch_size, 5);
    }

    #[test]
    fn zero_batch_size_detected() {
        let mut cfg = DropConfig::default();
        cfg.batch_size = 0;
        assert!(validate_config(&cfg).is_err());
    }
}
