//! dropkit-core
//!
//! Core primitives for dropkit:
//! - Item metadata models and validation
//! - Batch partitioning for lazy-mint registration
//! - Explicit configuration objects
//! - Typed errors
//!
//! This crate performs no network or chain I/O. All policy inputs are provided
//! explicitly by the caller; nothing is read from the environment.

pub mod batch;
pub mod config;
pub mod errors;
pub mod model;

pub use crate::errors::{DropError, DropResult};

/// Number of items registered per on-chain transaction during a lazy mint.
///
/// Registration instructions carry the item payload inline, so batches are
/// kept small to stay under the transaction size limit.
pub const ITEM_BATCH_SIZE: usize = 5;

/// Convenience re-exports.
pub mod prelude {
    pub use crate::batch::{partition, ItemBatch};
    pub use crate::config::{DropConfig, LimitsConfig};
    pub use crate::model::{ItemAttribute, ItemEntry, ItemMetadata};
    pub use crate::{DropError, DropResult, ITEM_BATCH_SIZE};
}
