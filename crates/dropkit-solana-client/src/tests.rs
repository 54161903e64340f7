//! Behavior tests for the drop client facade over recording capability
//! doubles. These exercise the orchestration contracts: batch shape and
//! offsets, grouped confirmation, serialized claims, reconciliation, and
//! delegation.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use solana_sdk::hash::Hash;
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature};
use solana_sdk::signer::Signer;

use dropkit_core::config::DropConfig;
use dropkit_core::model::{ItemEntry, ItemMetadata};

use crate::capabilities::{
    Broadcaster, ClaimPlan, CollectionReader, StorageClient, TransactionBuilder,
};
use crate::drop::{ClaimEligibility, DropClient};
use crate::memory::MemoryStorage;
use crate::types::{BatchSend, ClaimedAsset, CollectionState, LazyMintProgress};

fn noop_instruction() -> Instruction {
    Instruction {
        program_id: Pubkey::new_unique(),
        accounts: vec![],
        data: vec![],
    }
}

/// CollectionReader over fixed fixtures.
struct FixtureReader {
    state: CollectionState,
    items: Vec<ItemEntry>,
    claimed: Vec<ClaimedAsset>,
}

impl FixtureReader {
    fn with_state(state: CollectionState) -> Self {
        Self { state, items: vec![], claimed: vec![] }
    }
}

fn empty_state() -> CollectionState {
    CollectionState {
        address: Pubkey::new_unique(),
        authority: Pubkey::new_unique(),
        collection_mint: None,
        items_loaded: 0,
        items_minted: 0,
        items_remaining: 0,
    }
}

impl CollectionReader for FixtureReader {
    fn collection(&self) -> Result<CollectionState> {
        Ok(self.state.clone())
    }

    fn configured_items(&self) -> Result<Vec<ItemEntry>> {
        Ok(self.items.clone())
    }

    fn claimed_assets(&self) -> Result<Vec<ClaimedAsset>> {
        Ok(self.claimed.clone())
    }

    fn asset(&self, mint: &Pubkey) -> Result<ClaimedAsset> {
        self.claimed
            .iter()
            .find(|c| c.mint == *mint)
            .cloned()
            .ok_or_else(|| anyhow!("asset not found: {mint}"))
    }

    fn owned_amount(&self, owner: &Pubkey, mint: &Pubkey) -> Result<u64> {
        Ok(self
            .claimed
            .iter()
            .filter(|c| c.owner == *owner && c.mint == *mint)
            .count() as u64)
    }
}

/// TransactionBuilder that records every call.
#[derive(Clone, Default)]
struct RecordingBuilder {
    register_calls: Arc<Mutex<Vec<(u64, Vec<ItemEntry>)>>>,
    claim_mints: Arc<Mutex<Vec<Pubkey>>>,
    transfer_calls: Arc<Mutex<Vec<(Pubkey, Pubkey, Pubkey)>>>,
    burn_collections: Arc<Mutex<Vec<Option<Pubkey>>>>,
}

impl TransactionBuilder for RecordingBuilder {
    fn register_items(&self, start_index: u64, items: &[ItemEntry]) -> Result<Vec<Instruction>> {
        self.register_calls
            .lock()
            .unwrap()
            .push((start_index, items.to_vec()));
        Ok(vec![noop_instruction()])
    }

    fn claim(&self, _payer: &Pubkey, _receiver: &Pubkey) -> Result<ClaimPlan> {
        let mint_keypair = Keypair::new();
        let mint = mint_keypair.pubkey();
        self.claim_mints.lock().unwrap().push(mint);
        Ok(ClaimPlan {
            mint,
            instructions: vec![noop_instruction()],
            extra_signers: vec![mint_keypair],
        })
    }

    fn transfer(&self, owner: &Pubkey, to: &Pubkey, mint: &Pubkey) -> Result<Vec<Instruction>> {
        self.transfer_calls.lock().unwrap().push((*owner, *to, *mint));
        Ok(vec![noop_instruction()])
    }

    fn burn(
        &self,
        _owner: &Pubkey,
        _mint: &Pubkey,
        collection: Option<&Pubkey>,
    ) -> Result<Vec<Instruction>> {
        self.burn_collections.lock().unwrap().push(collection.copied());
        Ok(vec![noop_instruction()])
    }
}

/// Broadcaster scripted to confirm a fixed number of batch transactions and to
/// log every single-transaction submission in call order.
#[derive(Clone)]
struct ScriptedBroadcaster {
    confirm_limit: Option<usize>,
    sent_group_counts: Arc<Mutex<Vec<usize>>>,
    submission_log: Arc<Mutex<Vec<usize>>>,
    next_submission: Arc<AtomicUsize>,
}

impl ScriptedBroadcaster {
    fn confirming_all() -> Self {
        Self::confirming(None)
    }

    fn confirming(limit: Option<usize>) -> Self {
        Self {
            confirm_limit: limit,
            sent_group_counts: Arc::new(Mutex::new(vec![])),
            submission_log: Arc::new(Mutex::new(vec![])),
            next_submission: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl Broadcaster for ScriptedBroadcaster {
    fn send_batch(&self, _payer: &dyn Signer, groups: &[Vec<Instruction>]) -> Result<BatchSend> {
        self.sent_group_counts.lock().unwrap().push(groups.len());
        Ok(BatchSend {
            signatures: groups.iter().map(|_| Signature::new_unique()).collect(),
            recent_blockhash: Hash::new_unique(),
        })
    }

    fn confirm_batch(&self, sent: &BatchSend) -> Result<usize> {
        Ok(match self.confirm_limit {
            Some(limit) => limit.min(sent.signatures.len()),
            None => sent.signatures.len(),
        })
    }

    fn send_and_confirm(
        &self,
        _payer: &dyn Signer,
        _extra_signers: &[&dyn Signer],
        _instructions: &[Instruction],
    ) -> Result<Signature> {
        let seq = self.next_submission.fetch_add(1, Ordering::SeqCst);
        self.submission_log.lock().unwrap().push(seq);
        Ok(Signature::new_unique())
    }
}

fn item(n: u32) -> ItemMetadata {
    ItemMetadata::new(format!("Drop #{n}"))
}

fn client(
    reader: FixtureReader,
    builder: RecordingBuilder,
    broadcaster: ScriptedBroadcaster,
) -> DropClient {
    DropClient::new(
        Pubkey::new_unique(),
        Box::new(Keypair::new()),
        Box::new(reader),
        Box::new(builder),
        Box::new(broadcaster),
        Box::new(MemoryStorage::new()),
    )
}

#[test]
fn lazy_mint_partitions_into_fives_offset_by_loaded_count() {
    let mut state = empty_state();
    state.items_loaded = 12;
    state.items_remaining = 100;

    let builder = RecordingBuilder::default();
    let broadcaster = ScriptedBroadcaster::confirming_all();
    let drop = client(FixtureReader::with_state(state), builder.clone(), broadcaster.clone());

    let outcome = drop
        .lazy_mint((0..13).map(item).collect())
        .unwrap();

    assert_eq!(outcome.entries.len(), 13);
    assert_eq!(outcome.confirmed, 3);
    assert!(outcome.entries.iter().all(|e| e.uri.starts_with("mem://")));

    let calls = builder.register_calls.lock().unwrap();
    let starts: Vec<u64> = calls.iter().map(|(s, _)| *s).collect();
    let sizes: Vec<usize> = calls.iter().map(|(_, items)| items.len()).collect();
    assert_eq!(starts, vec![12, 17, 22]);
    assert_eq!(sizes, vec![5, 5, 3]);
    for pair in starts.windows(2) {
        assert!(pair[0] < pair[1]);
    }

    // One broadcast of all three batches, signed together.
    assert_eq!(*broadcaster.sent_group_counts.lock().unwrap(), vec![3]);
}

#[test]
fn lazy_mint_reports_progress() {
    let mut state = empty_state();
    state.items_remaining = 100;

    let drop = client(
        FixtureReader::with_state(state),
        RecordingBuilder::default(),
        ScriptedBroadcaster::confirming_all(),
    );

    let mut stages = Vec::new();
    drop.lazy_mint_with_progress((0..6).map(item).collect(), |p| stages.push(p))
        .unwrap();

    assert!(matches!(stages[0], LazyMintProgress::Uploading { total: 6 }));
    assert!(matches!(
        stages.last().copied(),
        Some(LazyMintProgress::Confirmed { confirmed: 2, transactions: 2 })
    ));
}

#[test]
fn lazy_mint_with_zero_confirmations_errors() {
    let mut state = empty_state();
    state.items_remaining = 100;

    let drop = client(
        FixtureReader::with_state(state),
        RecordingBuilder::default(),
        ScriptedBroadcaster::confirming(Some(0)),
    );

    let err = drop.lazy_mint((0..3).map(item).collect()).unwrap_err();
    assert!(err.to_string().contains("none of the 1 registration transactions confirmed"));
}

#[test]
fn lazy_mint_rejects_empty_and_invalid_input() {
    let drop = client(
        FixtureReader::with_state(empty_state()),
        RecordingBuilder::default(),
        ScriptedBroadcaster::confirming_all(),
    );

    assert!(drop.lazy_mint(vec![]).is_err());
    assert!(drop.lazy_mint(vec![ItemMetadata::new("   ")]).is_err());
}

#[test]
fn claim_to_runs_exactly_n_claims_in_issuance_order() {
    let mut state = empty_state();
    state.items_loaded = 10;
    state.items_remaining = 10;

    let builder = RecordingBuilder::default();
    let broadcaster = ScriptedBroadcaster::confirming_all();
    let drop = client(FixtureReader::with_state(state), builder.clone(), broadcaster.clone());

    let receiver = Pubkey::new_unique();
    let minted = drop.claim_to(&receiver, 3).unwrap();

    assert_eq!(minted.len(), 3);
    assert_eq!(minted, *builder.claim_mints.lock().unwrap());
    // Submissions happened strictly one after another, in order.
    assert_eq!(*broadcaster.submission_log.lock().unwrap(), vec![0, 1, 2]);
}

#[test]
fn claim_to_asserts_eligibility_before_building_transactions() {
    let mut state = empty_state();
    state.items_loaded = 10;
    state.items_remaining = 2;

    let builder = RecordingBuilder::default();
    let broadcaster = ScriptedBroadcaster::confirming_all();
    let drop = client(FixtureReader::with_state(state), builder.clone(), broadcaster.clone());

    let receiver = Pubkey::new_unique();
    let err = drop.claim_to(&receiver, 3).unwrap_err();
    assert!(err.to_string().contains("not enough unclaimed items"));

    let err = drop.claim_to(&receiver, 0).unwrap_err();
    assert!(err.to_string().contains("greater than zero"));

    // Nothing was built or broadcast.
    assert!(builder.claim_mints.lock().unwrap().is_empty());
    assert!(broadcaster.submission_log.lock().unwrap().is_empty());
}

#[test]
fn get_all_reconciles_claimed_and_unclaimed_entries() {
    let owner = Pubkey::new_unique();
    let mint = Pubkey::new_unique();
    let mut reader = FixtureReader::with_state(empty_state());
    reader.items = vec![
        ItemEntry::new("Drop #0", "mem://0"),
        ItemEntry::new("Drop #1", "mem://1"),
        ItemEntry::new("Drop #2", "mem://2"),
    ];
    reader.claimed = vec![ClaimedAsset {
        mint,
        owner,
        name: "Drop #1".to_string(),
        uri: "mem://1".to_string(),
    }];

    let drop = client(reader, RecordingBuilder::default(), ScriptedBroadcaster::confirming_all());
    let all = drop.get_all().unwrap();

    assert_eq!(all.len(), 3);

    assert!(!all[0].claimed);
    assert_eq!(all[0].supply, 0);
    assert_eq!(all[0].owner, Pubkey::default());
    assert_eq!(all[0].mint, Pubkey::default());

    assert!(all[1].claimed);
    assert_eq!(all[1].supply, 1);
    assert_eq!(all[1].owner, owner);
    assert_eq!(all[1].mint, mint);

    assert!(!all[2].claimed);
}

#[test]
fn supply_counters_follow_collection_state() {
    let mut state = empty_state();
    state.items_loaded = 10;
    state.items_remaining = 3;
    state.items_minted = 7;

    let drop = client(
        FixtureReader::with_state(state),
        RecordingBuilder::default(),
        ScriptedBroadcaster::confirming_all(),
    );

    assert_eq!(drop.total_unclaimed_supply().unwrap(), 3);
    assert_eq!(drop.total_claimed_supply().unwrap(), 7);
}

#[test]
fn metadata_requires_a_collection_mint() {
    let drop = client(
        FixtureReader::with_state(empty_state()),
        RecordingBuilder::default(),
        ScriptedBroadcaster::confirming_all(),
    );

    let err = drop.metadata().unwrap_err();
    assert!(err.to_string().contains("no collection mint address"));
}

#[test]
fn metadata_downloads_and_normalizes_collection_json() {
    let storage = MemoryStorage::new();
    let payload = ItemMetadata {
        name: "The Drop".to_string(),
        description: Some("season one".to_string()),
        image: Some("mem://cover".to_string()),
        ..ItemMetadata::default()
    };
    let uri = storage
        .upload_batch(&[payload.to_json().unwrap()])
        .unwrap()
        .remove(0);

    let collection_mint = Pubkey::new_unique();
    let mut state = empty_state();
    state.collection_mint = Some(collection_mint);

    let mut reader = FixtureReader::with_state(state);
    reader.claimed = vec![ClaimedAsset {
        mint: collection_mint,
        owner: Pubkey::new_unique(),
        name: "The Drop".to_string(),
        uri: uri.clone(),
    }];

    let drop = DropClient::new(
        Pubkey::new_unique(),
        Box::new(Keypair::new()),
        Box::new(reader),
        Box::new(RecordingBuilder::default()),
        Box::new(ScriptedBroadcaster::confirming_all()),
        Box::new(storage),
    );

    let meta = drop.metadata().unwrap();
    assert_eq!(meta.mint, collection_mint);
    assert_eq!(meta.uri, uri);
    assert_eq!(meta.name, "The Drop");
    assert_eq!(meta.description.as_deref(), Some("season one"));
}

#[test]
fn burn_passes_collection_context_only_when_present() {
    let collection_mint = Pubkey::new_unique();

    for expected in [None, Some(collection_mint)] {
        let mut state = empty_state();
        state.collection_mint = expected;

        let builder = RecordingBuilder::default();
        let drop = client(
            FixtureReader::with_state(state),
            builder.clone(),
            ScriptedBroadcaster::confirming_all(),
        );

        drop.burn(&Pubkey::new_unique()).unwrap();
        assert_eq!(builder.burn_collections.lock().unwrap().last(), Some(&expected));
    }
}

#[test]
fn transfer_delegates_to_the_builder() {
    let builder = RecordingBuilder::default();
    let drop = client(
        FixtureReader::with_state(empty_state()),
        builder.clone(),
        ScriptedBroadcaster::confirming_all(),
    );

    let to = Pubkey::new_unique();
    let mint = Pubkey::new_unique();
    drop.transfer(&to, &mint).unwrap();

    let calls = builder.transfer_calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1, to);
    assert_eq!(calls[0].2, mint);
}

#[test]
fn custom_config_and_eligibility_are_injected() {
    struct DenyAll;

    impl ClaimEligibility for DenyAll {
        fn assert_claimable(
            &self,
            _state: &CollectionState,
            _wallet: &Pubkey,
            _quantity: u64,
        ) -> Result<()> {
            Err(anyhow!("drop is private"))
        }
    }

    let mut state = empty_state();
    state.items_remaining = 100;

    let builder = RecordingBuilder::default();
    let drop = client(
        FixtureReader::with_state(state),
        builder.clone(),
        ScriptedBroadcaster::confirming_all(),
    )
    .with_config(DropConfig { batch_size: 3, ..DropConfig::default() })
    .unwrap()
    .with_eligibility(Box::new(DenyAll));

    drop.lazy_mint((0..7).map(item).collect()).unwrap();
    {
        let calls = builder.register_calls.lock().unwrap();
        let starts: Vec<u64> = calls.iter().map(|(s, _)| *s).collect();
        assert_eq!(starts, vec![0, 3, 6]);
    }

    let err = drop.claim_to(&Pubkey::new_unique(), 1).unwrap_err();
    assert!(err.to_string().contains("drop is private"));
}

#[test]
fn balance_of_counts_owned_units() {
    let owner = Pubkey::new_unique();
    let mint = Pubkey::new_unique();
    let mut reader = FixtureReader::with_state(empty_state());
    reader.claimed = vec![ClaimedAsset {
        mint,
        owner,
        name: "Drop #0".to_string(),
        uri: "mem://0".to_string(),
    }];

    let drop = client(reader, RecordingBuilder::default(), ScriptedBroadcaster::confirming_all());
    assert_eq!(drop.balance_of(&owner, &mint).unwrap(), 1);
    assert_eq!(drop.balance_of(&Pubkey::new_unique(), &mint).unwrap(), 0);
}
