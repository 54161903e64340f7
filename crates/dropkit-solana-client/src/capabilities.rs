//! Capability interfaces consumed by the drop client.
//!
//! IMPORTANT: this crate does NOT implement the on-chain drop program or the
//! storage network. Account layouts, instruction encodings, and upload
//! protocols belong to the host layer, which wires them in behind these
//! interfaces. The facade only ever talks to:
//!
//! - `CollectionReader`  — on-chain collection state and asset lookups
//! - `TransactionBuilder` — instruction construction for the drop program
//! - `Broadcaster`       — signing, broadcast, and confirmation
//! - `StorageClient`     — content upload/download by URI
//!
//! Splitting the object graph this way keeps every facade flow substitutable
//! in tests.

use anyhow::{anyhow, Result};
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature};
use solana_sdk::signer::Signer;

use dropkit_core::model::ItemEntry;

use crate::types::{BatchSend, ClaimedAsset, CollectionState};

/// Read access to a drop collection's on-chain state.
pub trait CollectionReader: Send + Sync {
    /// Current collection counters and collection mint.
    fn collection(&self) -> Result<CollectionState>;

    /// The full configured item list, in registration order.
    fn configured_items(&self) -> Result<Vec<ItemEntry>>;

    /// All claimed assets of the collection.
    fn claimed_assets(&self) -> Result<Vec<ClaimedAsset>>;

    /// Look up one claimed asset by mint.
    fn asset(&self, mint: &Pubkey) -> Result<ClaimedAsset>;

    /// How many units of `mint` the wallet owns.
    fn owned_amount(&self, owner: &Pubkey, mint: &Pubkey) -> Result<u64>;
}

/// A fully prepared claim: the mint the program will create, the instructions
/// to submit, and any additional transaction signers (typically the fresh
/// mint keypair).
#[derive(Debug)]
pub struct ClaimPlan {
    pub mint: Pubkey,
    pub instructions: Vec<Instruction>,
    pub extra_signers: Vec<Keypair>,
}

/// Instruction construction for the external drop program.
pub trait TransactionBuilder: Send + Sync {
    /// Register a batch of items starting at the given absolute index.
    fn register_items(&self, start_index: u64, items: &[ItemEntry]) -> Result<Vec<Instruction>>;

    /// Prepare a single claim minting to `receiver`, paid by `payer`.
    fn claim(&self, payer: &Pubkey, receiver: &Pubkey) -> Result<ClaimPlan>;

    /// Transfer one owned item to another wallet.
    fn transfer(&self, owner: &Pubkey, to: &Pubkey, mint: &Pubkey) -> Result<Vec<Instruction>>;

    /// Burn one owned item. `collection` carries the collection mint when the
    /// drop has one, so the program can also retire the collection linkage.
    fn burn(&self, owner: &Pubkey, mint: &Pubkey, collection: Option<&Pubkey>)
        -> Result<Vec<Instruction>>;
}

/// Transaction signing, broadcast, and confirmation.
pub trait Broadcaster: Send + Sync {
    /// Sign every instruction group against one recent blockhash and send each
    /// resulting transaction without waiting for confirmation.
    fn send_batch(&self, payer: &dyn Signer, groups: &[Vec<Instruction>]) -> Result<BatchSend>;

    /// Await the whole batch together, returning how many signatures reached
    /// confirmation. Batches are independent; no ordering is guaranteed.
    fn confirm_batch(&self, sent: &BatchSend) -> Result<usize>;

    /// Sign, send, and block until this one transaction confirms.
    fn send_and_confirm(
        &self,
        payer: &dyn Signer,
        extra_signers: &[&dyn Signer],
        instructions: &[Instruction],
    ) -> Result<Signature>;
}

/// Content storage for item metadata.
pub trait StorageClient: Send + Sync {
    /// Upload all payloads, returning one content URI per payload in order.
    fn upload_batch(&self, payloads: &[serde_json::Value]) -> Result<Vec<String>>;

    /// Download and parse one JSON document by URI.
    fn download_json(&self, uri: &str) -> Result<serde_json::Value>;
}

/// Default program client used when no on-chain integration is wired.
pub struct NoProgramClient;

impl CollectionReader for NoProgramClient {
    fn collection(&self) -> Result<CollectionState> {
        Err(no_program())
    }

    fn configured_items(&self) -> Result<Vec<ItemEntry>> {
        Err(no_program())
    }

    fn claimed_assets(&self) -> Result<Vec<ClaimedAsset>> {
        Err(no_program())
    }

    fn asset(&self, _mint: &Pubkey) -> Result<ClaimedAsset> {
        Err(no_program())
    }

    fn owned_amount(&self, _owner: &Pubkey, _mint: &Pubkey) -> Result<u64> {
        Err(no_program())
    }
}

impl TransactionBuilder for NoProgramClient {
    fn register_items(&self, _start_index: u64, _items: &[ItemEntry]) -> Result<Vec<Instruction>> {
        Err(no_program())
    }

    fn claim(&self, _payer: &Pubkey, _receiver: &Pubkey) -> Result<ClaimPlan> {
        Err(no_program())
    }

    fn transfer(&self, _owner: &Pubkey, _to: &Pubkey, _mint: &Pubkey) -> Result<Vec<Instruction>> {
        Err(no_program())
    }

    fn burn(
        &self,
        _owner: &Pubkey,
        _mint: &Pubkey,
        _collection: Option<&Pubkey>,
    ) -> Result<Vec<Instruction>> {
        Err(no_program())
    }
}

fn no_program() -> anyhow::Error {
    anyhow!("no drop program integration wired; provide CollectionReader/TransactionBuilder implementations in the host layer")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_program_client_fails_clearly() {
        let e = NoProgramClient.collection().unwrap_err();
        assert!(e.to_string().contains("no drop program integration"));
        let e = NoProgramClient
            .claim(&Pubkey::new_unique(), &Pubkey::new_unique())
            .unwrap_err();
        assert!(e.to_string().contains("host layer"));
    }
}
