//! Blocking RPC-backed broadcaster.
//!
//! Batch broadcast signs every transaction against one recent blockhash,
//! sends each without waiting, then polls the full signature set together
//! until every transaction is decided or the shared blockhash expires.
//! Failures propagate unmodified; there is no retry or backoff here.

use std::thread;
use std::time::Duration;

use anyhow::Result;
use solana_client::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::instruction::Instruction;
use solana_sdk::signature::Signature;
use solana_sdk::signer::Signer;
use solana_sdk::transaction::Transaction;
use tracing::debug;

use crate::capabilities::Broadcaster;
use crate::types::BatchSend;

const CONFIRM_POLL_INTERVAL: Duration = Duration::from_millis(500);

pub struct RpcBroadcaster {
    rpc: RpcClient,
    poll_interval: Duration,
}

impl RpcBroadcaster {
    pub fn new(rpc_url: &str) -> Self {
        Self {
            rpc: RpcClient::new_with_commitment(rpc_url.to_string(), CommitmentConfig::confirmed()),
            poll_interval: CONFIRM_POLL_INTERVAL,
        }
    }

    pub fn rpc_url(&self) -> String {
        self.rpc.url()
    }
}

impl Broadcaster for RpcBroadcaster {
    fn send_batch(&self, payer: &dyn Signer, groups: &[Vec<Instruction>]) -> Result<BatchSend> {
        let recent_blockhash = self.rpc.get_latest_blockhash()?;

        let mut signatures = Vec::with_capacity(groups.len());
        for group in groups {
            let signers: Vec<&dyn Signer> = vec![payer];
            let tx = Transaction::new_signed_with_payer(
                group,
                Some(&payer.pubkey()),
                &signers,
                recent_blockhash,
            );
            signatures.push(self.rpc.send_transaction(&tx)?);
        }

        debug!(transactions = signatures.len(), "batch broadcast sent");
        Ok(BatchSend { signatures, recent_blockhash })
    }

    fn confirm_batch(&self, sent: &BatchSend) -> Result<usize> {
        let mut pending = sent.signatures.clone();
        let mut confirmed = 0usize;

        loop {
            let mut still_pending = Vec::with_capacity(pending.len());
            for sig in pending {
                if self.rpc.confirm_transaction(&sig)? {
                    confirmed += 1;
                } else {
                    still_pending.push(sig);
                }
            }
            pending = still_pending;

            if pending.is_empty() {
                break;
            }
            // Once the shared blockhash expires the remaining transactions can
            // no longer land.
            if !self
                .rpc
                .is_blockhash_valid(&sent.recent_blockhash, CommitmentConfig::processed())?
            {
                debug!(unconfirmed = pending.len(), "blockhash expired with transactions pending");
                break;
            }
            thread::sleep(self.poll_interval);
        }

        Ok(confirmed)
    }

    fn send_and_confirm(
        &self,
        payer: &dyn Signer,
        extra_signers: &[&dyn Signer],
        instructions: &[Instruction],
    ) -> Result<Signature> {
        let recent_blockhash = self.rpc.get_latest_blockhash()?;

        let mut signers: Vec<&dyn Signer> = vec![payer];
        signers.extend_from_slice(extra_signers);

        let tx = Transaction::new_signed_with_payer(
            instructions,
            Some(&payer.pubkey()),
            &signers,
            recent_blockhash,
        );
        Ok(self.rpc.send_and_confirm_transaction(&tx)?)
    }
}
