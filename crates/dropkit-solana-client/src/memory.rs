//! Deterministic in-memory content storage.
//!
//! Payloads are addressed by the sha256 of their JSON bytes and served back by
//! URI. Tests and dry-run tooling use this to obtain real content URIs without
//! a storage network.

use std::collections::BTreeMap;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::capabilities::StorageClient;

/// URI scheme for in-memory objects.
pub const MEMORY_URI_SCHEME: &str = "mem";

#[derive(Default)]
pub struct MemoryStorage {
    objects: Mutex<BTreeMap<String, Value>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().map(|o| o.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn content_uri(bytes: &[u8]) -> String {
    format!("{MEMORY_URI_SCHEME}://{}", hex::encode(Sha256::digest(bytes)))
}

impl StorageClient for MemoryStorage {
    fn upload_batch(&self, payloads: &[Value]) -> Result<Vec<String>> {
        let mut objects = self
            .objects
            .lock()
            .map_err(|_| anyhow!("memory storage lock poisoned"))?;

        let mut uris = Vec::with_capacity(payloads.len());
        for payload in payloads {
            let bytes = serde_json::to_vec(payload)?;
            let uri = content_uri(&bytes);
            objects.insert(uri.clone(), payload.clone());
            uris.push(uri);
        }
        Ok(uris)
    }

    fn download_json(&self, uri: &str) -> Result<Value> {
        let objects = self
            .objects
            .lock()
            .map_err(|_| anyhow!("memory storage lock poisoned"))?;
        objects
            .get(uri)
            .cloned()
            .ok_or_else(|| anyhow!("object not found: {uri}"))
    }
}
