//! Client-side views over drop collection state.
//!
//! These are transient request/response payloads. No entity here is owned by
//! this layer; everything mirrors on-chain state read through the
//! `CollectionReader` seam or content fetched through the `StorageClient`.

use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;

use dropkit_core::model::{ItemEntry, ItemMetadata};

/// Snapshot of a drop collection's counters and collection mint.
#[derive(Debug, Clone)]
pub struct CollectionState {
    pub address: Pubkey,
    pub authority: Pubkey,
    /// Mint of the collection NFT, when one has been initialized.
    pub collection_mint: Option<Pubkey>,
    /// Items registered so far via lazy mint.
    pub items_loaded: u64,
    /// Items already claimed.
    pub items_minted: u64,
    /// Items the program will still hand out.
    pub items_remaining: u64,
}

impl CollectionState {
    /// Registered items still claimable. The program can never hand out more
    /// than it has loaded, so this is bounded by both counters.
    pub fn total_unclaimed(&self) -> u64 {
        self.items_loaded.min(self.items_remaining)
    }

    pub fn total_claimed(&self) -> u64 {
        self.items_minted
    }
}

/// A claimed item as recorded by the on-chain program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimedAsset {
    pub mint: Pubkey,
    pub owner: Pubkey,
    pub name: String,
    pub uri: String,
}

/// A claimed asset together with its downloaded metadata.
#[derive(Debug, Clone)]
pub struct ClaimedNft {
    pub asset: ClaimedAsset,
    pub metadata: ItemMetadata,
}

/// One entry of the reconciled item list returned by `DropClient::get_all`.
///
/// Unclaimed entries carry placeholder mint/owner values and zero supply; they
/// exist as registration config only until someone claims them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropItem {
    pub name: String,
    pub uri: String,
    pub mint: Pubkey,
    pub owner: Pubkey,
    pub supply: u64,
    pub claimed: bool,
}

impl DropItem {
    pub fn claimed(asset: ClaimedAsset) -> Self {
        Self {
            name: asset.name,
            uri: asset.uri,
            mint: asset.mint,
            owner: asset.owner,
            supply: 1,
            claimed: true,
        }
    }

    pub fn unclaimed(entry: ItemEntry) -> Self {
        Self {
            name: entry.name,
            uri: entry.uri,
            mint: Pubkey::default(),
            owner: Pubkey::default(),
            supply: 0,
            claimed: false,
        }
    }
}

/// Normalized metadata of the collection NFT itself.
#[derive(Debug, Clone)]
pub struct CollectionMetadata {
    pub mint: Pubkey,
    pub uri: String,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// Signatures produced by a batch broadcast, plus the blockhash every
/// transaction in the batch was signed against.
#[derive(Debug, Clone)]
pub struct BatchSend {
    pub signatures: Vec<Signature>,
    pub recent_blockhash: Hash,
}

/// Result of a lazy mint: the registered entries and confirmation tally.
#[derive(Debug, Clone)]
pub struct LazyMintOutcome {
    pub entries: Vec<ItemEntry>,
    pub signatures: Vec<Signature>,
    pub confirmed: usize,
}

/// Progress notifications emitted during a lazy mint.
#[derive(Debug, Clone, Copy)]
pub enum LazyMintProgress {
    Uploading { total: usize },
    Uploaded { total: usize },
    Broadcast { transactions: usize },
    Confirmed { confirmed: usize, transactions: usize },
}
