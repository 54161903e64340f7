use std::fs;

use anyhow::{anyhow, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use walkdir::WalkDir;

use dropkit_core::batch;
use dropkit_core::config::DropConfig;
use dropkit_core::model::{ItemEntry, ItemMetadata};
use dropkit_solana_client::capabilities::StorageClient;
use dropkit_solana_client::MemoryStorage;

use crate::output;

#[derive(Debug, Serialize)]
pub struct BatchOut {
    pub start_index: u64,
    pub items: usize,
}

#[derive(Debug, Serialize)]
pub struct PlanOut {
    pub items: usize,
    pub transactions: usize,
    pub batches: Vec<BatchOut>,
    pub uris: Vec<String>,
}

pub async fn run(dir: &str, loaded: u64) -> Result<()> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));

    pb.set_message("reading metadata");
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == "json")
        {
            files.push(entry.path().to_path_buf());
        }
    }
    if files.is_empty() {
        pb.finish_and_clear();
        return Err(anyhow!("no metadata json files found in {dir}"));
    }

    let mut items = Vec::with_capacity(files.len());
    for path in &files {
        let raw = fs::read_to_string(path)?;
        let meta: ItemMetadata = serde_json::from_str(&raw)
            .map_err(|e| anyhow!("{}: invalid metadata: {e}", path.display()))?;
        items.push(meta.normalized()?);
    }

    pb.set_message("computing content uris");
    let payloads = items
        .iter()
        .map(ItemMetadata::to_json)
        .collect::<Result<Vec<_>, _>>()?;
    let storage = MemoryStorage::new();
    let uris = storage.upload_batch(&payloads)?;

    let cfg = DropConfig::default();
    let entries: Vec<ItemEntry> = items
        .iter()
        .zip(&uris)
        .map(|(meta, uri)| ItemEntry::new(meta.name.clone(), uri.clone()))
        .collect();
    for entry in &entries {
        entry.check_limits(cfg.limits.max_name_len, cfg.limits.max_uri_len)?;
    }

    pb.set_message("partitioning batches");
    let batches = batch::partition(&entries, loaded, cfg.batch_size)?;
    pb.finish_and_clear();

    output::print(&PlanOut {
        items: entries.len(),
        transactions: batches.len(),
        batches: batches
            .iter()
            .map(|b| BatchOut { start_index: b.start_index, items: b.items.len() })
            .collect(),
        uris,
    })?;
    Ok(())
}
