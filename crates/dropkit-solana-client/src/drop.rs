//! Drop client facade.
//!
//! Wraps one on-chain drop collection. Every state transition (registration,
//! claim, transfer, burn) is owned by the external drop program; this layer
//! reads state, prepares transactions through the injected capabilities, and
//! orchestrates the two flows with real shape:
//!
//! - lazy mint: upload content, register items in fixed-size batches with
//!   strictly increasing start indices, sign the batch together, broadcast,
//!   and confirm the whole batch as a group
//! - claim: eligibility check first, then strictly one claim at a time
//!
//! There is no retry, backoff, or partial-failure recovery. Collaborator
//! failures propagate unmodified.

use anyhow::{anyhow, bail, Result};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::signer::Signer;
use tracing::debug;

use dropkit_core::batch;
use dropkit_core::config::{validate_config, DropConfig};
use dropkit_core::model::{ItemEntry, ItemMetadata};

use crate::capabilities::{
    Broadcaster, ClaimPlan, CollectionReader, StorageClient, TransactionBuilder,
};
use crate::types::{
    ClaimedAsset, ClaimedNft, CollectionMetadata, CollectionState, DropItem, LazyMintOutcome,
    LazyMintProgress,
};

/// Claim eligibility collaborator.
///
/// The facade consults this before building any claim transaction. Hosts can
/// wire allowlists, payment gates, or live-date rules here.
pub trait ClaimEligibility: Send + Sync {
    /// Err when `wallet` cannot claim `quantity` items right now.
    fn assert_claimable(
        &self,
        state: &CollectionState,
        wallet: &Pubkey,
        quantity: u64,
    ) -> Result<()>;
}

/// Supply-based eligibility: a positive quantity that fits the unclaimed
/// remainder.
pub struct SupplyClaimConditions;

impl ClaimEligibility for SupplyClaimConditions {
    fn assert_claimable(
        &self,
        state: &CollectionState,
        _wallet: &Pubkey,
        quantity: u64,
    ) -> Result<()> {
        if quantity == 0 {
            bail!("claim quantity must be greater than zero");
        }
        let unclaimed = state.total_unclaimed();
        if quantity > unclaimed {
            bail!("not enough unclaimed items: requested {quantity}, available {unclaimed}");
        }
        Ok(())
    }
}

/// Claims executed strictly one at a time.
///
/// The drop program does not support overlapping claims from one caller, so
/// the queue runs each task to confirmed completion before starting the next.
/// Minted addresses are returned in issuance order. This ordering is a
/// correctness constraint, not a performance choice; do not parallelize it.
pub struct SerialClaimQueue {
    tasks: Vec<ClaimPlan>,
}

impl SerialClaimQueue {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    pub fn push(&mut self, plan: ClaimPlan) {
        self.tasks.push(plan);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Execute every task in insertion order, one at a time. A failed task
    /// aborts the run; already-confirmed claims are not rolled back.
    pub fn run(self, payer: &dyn Signer, broadcaster: &dyn Broadcaster) -> Result<Vec<Pubkey>> {
        let mut minted = Vec::with_capacity(self.tasks.len());
        for plan in self.tasks {
            let extra: Vec<&dyn Signer> =
                plan.extra_signers.iter().map(|k| k as &dyn Signer).collect();
            broadcaster.send_and_confirm(payer, &extra, &plan.instructions)?;
            minted.push(plan.mint);
        }
        Ok(minted)
    }
}

impl Default for SerialClaimQueue {
    fn default() -> Self {
        Self::new()
    }
}

pub struct DropClient {
    address: Pubkey,
    identity: Box<dyn Signer + Send + Sync>,
    reader: Box<dyn CollectionReader>,
    builder: Box<dyn TransactionBuilder>,
    broadcaster: Box<dyn Broadcaster>,
    storage: Box<dyn StorageClient>,
    eligibility: Box<dyn ClaimEligibility>,
    config: DropConfig,
}

impl DropClient {
    /// Build a client for the collection at `address` from its capability set.
    pub fn new(
        address: Pubkey,
        identity: Box<dyn Signer + Send + Sync>,
        reader: Box<dyn CollectionReader>,
        builder: Box<dyn TransactionBuilder>,
        broadcaster: Box<dyn Broadcaster>,
        storage: Box<dyn StorageClient>,
    ) -> Self {
        Self {
            address,
            identity,
            reader,
            builder,
            broadcaster,
            storage,
            eligibility: Box::new(SupplyClaimConditions),
            config: DropConfig::default(),
        }
    }

    pub fn with_config(mut self, config: DropConfig) -> Result<Self> {
        validate_config(&config)?;
        self.config = config;
        Ok(self)
    }

    pub fn with_eligibility(mut self, eligibility: Box<dyn ClaimEligibility>) -> Self {
        self.eligibility = eligibility;
        self
    }

    pub fn address(&self) -> Pubkey {
        self.address
    }

    /// Metadata of the collection NFT.
    ///
    /// Requires an initialized collection mint; fails with a descriptive error
    /// otherwise.
    pub fn metadata(&self) -> Result<CollectionMetadata> {
        let state = self.reader.collection()?;
        let mint = state.collection_mint.ok_or_else(|| {
            anyhow!(
                "drop {} has no collection mint address; initialize the collection before reading metadata",
                self.address
            )
        })?;

        let asset = self.reader.asset(&mint)?;
        let json = self.storage.download_json(&asset.uri)?;
        let meta = ItemMetadata::from_json(json)?;

        Ok(CollectionMetadata {
            mint,
            uri: asset.uri,
            name: meta.name,
            description: meta.description,
            image: meta.image,
        })
    }

    /// One claimed asset plus its downloaded metadata.
    pub fn get(&self, mint: &Pubkey) -> Result<ClaimedNft> {
        let asset = self.reader.asset(mint)?;
        let json = self.storage.download_json(&asset.uri)?;
        let metadata = ItemMetadata::from_json(json)?;
        Ok(ClaimedNft { asset, metadata })
    }

    /// One entry per configured item, claimed and unclaimed alike.
    ///
    /// Claimed records are matched to configured entries by `(name, uri)`.
    /// That join is not guaranteed unique: duplicate configured entries with
    /// the same name and URI resolve to the same claimed record. Keep item
    /// names unique within a collection if exact attribution matters.
    pub fn get_all(&self) -> Result<Vec<DropItem>> {
        let items = self.reader.configured_items()?;
        let claimed = self.reader.claimed_assets()?;

        Ok(items
            .into_iter()
            .map(|entry| {
                match claimed
                    .iter()
                    .find(|c| c.name == entry.name && c.uri == entry.uri)
                {
                    Some(asset) => DropItem::claimed(asset.clone()),
                    None => DropItem::unclaimed(entry),
                }
            })
            .collect())
    }

    pub fn get_all_claimed(&self) -> Result<Vec<ClaimedAsset>> {
        self.reader.claimed_assets()
    }

    /// How many units of `mint` the client identity owns.
    pub fn balance(&self, mint: &Pubkey) -> Result<u64> {
        self.balance_of(&self.identity.pubkey(), mint)
    }

    pub fn balance_of(&self, wallet: &Pubkey, mint: &Pubkey) -> Result<u64> {
        self.reader.owned_amount(wallet, mint)
    }

    pub fn total_unclaimed_supply(&self) -> Result<u64> {
        Ok(self.reader.collection()?.total_unclaimed())
    }

    pub fn total_claimed_supply(&self) -> Result<u64> {
        Ok(self.reader.collection()?.total_claimed())
    }

    /// Transfer one owned item to `to`.
    pub fn transfer(&self, to: &Pubkey, mint: &Pubkey) -> Result<Signature> {
        let instructions = self.builder.transfer(&self.identity.pubkey(), to, mint)?;
        self.broadcaster
            .send_and_confirm(self.identity.as_ref(), &[], &instructions)
    }

    /// Burn one owned item, passing the collection mint as context when the
    /// drop has one.
    pub fn burn(&self, mint: &Pubkey) -> Result<Signature> {
        let state = self.reader.collection()?;
        let instructions = self.builder.burn(
            &self.identity.pubkey(),
            mint,
            state.collection_mint.as_ref(),
        )?;
        self.broadcaster
            .send_and_confirm(self.identity.as_ref(), &[], &instructions)
    }

    /// Register new items without minting them. See
    /// [`lazy_mint_with_progress`](Self::lazy_mint_with_progress).
    pub fn lazy_mint(&self, items: Vec<ItemMetadata>) -> Result<LazyMintOutcome> {
        self.lazy_mint_with_progress(items, |_| {})
    }

    /// Upload item metadata and register the resulting entries on-chain.
    ///
    /// Entries are partitioned into batches of `config.batch_size`; each batch
    /// becomes one registration transaction whose start index is offset by the
    /// collection's already-loaded count. All batch transactions are signed
    /// against one blockhash, broadcast, and confirmed as a group. Zero
    /// confirmations is an error.
    pub fn lazy_mint_with_progress(
        &self,
        items: Vec<ItemMetadata>,
        mut on_progress: impl FnMut(LazyMintProgress),
    ) -> Result<LazyMintOutcome> {
        if items.is_empty() {
            bail!("lazy mint requires at least one item");
        }
        if items.len() > self.config.limits.max_items_per_mint {
            bail!(
                "lazy mint of {} items exceeds the configured maximum of {}",
                items.len(),
                self.config.limits.max_items_per_mint
            );
        }

        let normalized = items
            .into_iter()
            .map(ItemMetadata::normalized)
            .collect::<Result<Vec<_>, _>>()?;
        let payloads = normalized
            .iter()
            .map(ItemMetadata::to_json)
            .collect::<Result<Vec<_>, _>>()?;

        on_progress(LazyMintProgress::Uploading { total: payloads.len() });
        let uris = self.storage.upload_batch(&payloads)?;
        if uris.len() != normalized.len() {
            bail!(
                "storage returned {} uris for {} payloads",
                uris.len(),
                normalized.len()
            );
        }
        on_progress(LazyMintProgress::Uploaded { total: uris.len() });

        let entries: Vec<ItemEntry> = normalized
            .iter()
            .zip(&uris)
            .map(|(meta, uri)| ItemEntry::new(meta.name.clone(), uri.clone()))
            .collect();
        for entry in &entries {
            entry.check_limits(self.config.limits.max_name_len, self.config.limits.max_uri_len)?;
        }

        let state = self.reader.collection()?;
        let batches = batch::partition(&entries, state.items_loaded, self.config.batch_size)?;
        let groups = batches
            .iter()
            .map(|b| self.builder.register_items(b.start_index, &b.items))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            drop = %self.address,
            batches = groups.len(),
            offset = state.items_loaded,
            "broadcasting lazy mint registration"
        );
        let sent = self.broadcaster.send_batch(self.identity.as_ref(), &groups)?;
        on_progress(LazyMintProgress::Broadcast { transactions: sent.signatures.len() });

        let confirmed = self.broadcaster.confirm_batch(&sent)?;
        if confirmed == 0 {
            bail!(
                "lazy mint failed: none of the {} registration transactions confirmed",
                sent.signatures.len()
            );
        }
        on_progress(LazyMintProgress::Confirmed {
            confirmed,
            transactions: sent.signatures.len(),
        });

        Ok(LazyMintOutcome {
            entries,
            signatures: sent.signatures,
            confirmed,
        })
    }

    /// Claim `quantity` items to the client identity.
    pub fn claim(&self, quantity: u64) -> Result<Vec<Pubkey>> {
        let receiver = self.identity.pubkey();
        self.claim_to(&receiver, quantity)
    }

    /// Claim `quantity` items to `receiver`, returning minted addresses in
    /// issuance order.
    ///
    /// Eligibility is asserted before any transaction is built. Claims then
    /// run through a [`SerialClaimQueue`]: strictly one at a time, each
    /// confirmed before the next begins.
    pub fn claim_to(&self, receiver: &Pubkey, quantity: u64) -> Result<Vec<Pubkey>> {
        let state = self.reader.collection()?;
        self.eligibility.assert_claimable(&state, receiver, quantity)?;

        let payer = self.identity.pubkey();
        let mut queue = SerialClaimQueue::new();
        for _ in 0..quantity {
            queue.push(self.builder.claim(&payer, receiver)?);
        }

        debug!(drop = %self.address, quantity, receiver = %receiver, "executing claims serially");
        queue.run(self.identity.as_ref(), self.broadcaster.as_ref())
    }
}
