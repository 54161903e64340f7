//! dropkit-chains
//!
//! Server-side chain registry fetching:
//! - a reqwest client for the remote chains API (list and single lookup)
//! - an injected, immutable enrichment table overlaying static presentation
//!   metadata onto fetched descriptors
//!
//! The remote API and its schema are external; this crate only fetches,
//! parses, and merges. A missing single-chain payload is a navigable
//! not-found outcome for the host, not an error.

pub mod client;
pub mod enrichment;
pub mod model;

pub use client::{ChainsClient, DEFAULT_CHAINS_HOST};
pub use enrichment::{ChainCta, ChainEnrichment, ChainEnrichmentTable, EnrichedChain};
pub use model::{ChainDescriptor, ChainIcon, ChainService, NativeCurrency};
