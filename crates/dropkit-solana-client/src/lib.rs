//! dropkit-solana-client
//!
//! Off-chain client wiring for candy-machine style NFT drops.
//!
//! It includes:
//! - capability interfaces for the external drop program, transaction
//!   broadcast, and content storage
//! - the drop client facade (collection reads, lazy mint, serialized claims,
//!   transfer and burn)
//! - a blocking RPC-backed broadcaster
//! - PDA derivation helpers and program constants
//!
//! The on-chain drop program itself is an external collaborator: this crate
//! never builds its instruction encodings. Hosts supply `CollectionReader` and
//! `TransactionBuilder` implementations backed by the program SDK they deploy
//! against.

pub mod broadcaster;
pub mod capabilities;
pub mod constants;
pub mod drop;
pub mod memory;
pub mod pda;
pub mod types;

#[cfg(test)]
mod tests;

pub use broadcaster::RpcBroadcaster;
pub use capabilities::*;
pub use constants::*;
pub use drop::{ClaimEligibility, DropClient, SerialClaimQueue, SupplyClaimConditions};
pub use memory::MemoryStorage;
pub use pda::*;
pub use types::*;
