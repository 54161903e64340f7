//! Chains API client.
//!
//! Two read operations against the remote registry:
//! - `GET {base}/v1/chains?includeServices=true` — the full list
//! - `GET {base}/v1/chains/{idOrSlug}?includeServices=true` — one descriptor
//!
//! A non-success list response drains the unused body once, then fails with a
//! generic error. A single-chain payload without a `data` field is a
//! not-found outcome (`Ok(None)`), not an error; hosts decide how to
//! navigate it. Everything else propagates unmodified — no retries.

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::enrichment::{ChainEnrichmentTable, EnrichedChain};
use crate::model::ChainDescriptor;

/// Default chains API host.
pub const DEFAULT_CHAINS_HOST: &str = "https://api.thirdweb.com";

#[derive(Debug, Clone)]
pub struct ChainsClient {
    http: reqwest::Client,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct ListEnvelope {
    #[serde(default)]
    data: Option<Vec<ChainDescriptor>>,
}

#[derive(Debug, Deserialize)]
struct SingleEnvelope {
    #[serde(default)]
    data: Option<ChainDescriptor>,
}

impl ChainsClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| anyhow!("invalid chains host: {e}"))?;
        Ok(Self { http: reqwest::Client::new(), base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| anyhow!("invalid chains endpoint {path}: {e}"))?;
        url.set_query(Some("includeServices=true"));
        Ok(url)
    }

    /// Fetch every chain descriptor.
    pub async fn get_chains(&self) -> Result<Vec<ChainDescriptor>> {
        let url = self.endpoint("/v1/chains")?;
        debug!(%url, "fetching chain list");

        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            // Consume the unused body before surfacing the failure.
            let _ = resp.bytes().await;
            return Err(anyhow!("failed to fetch chains: http {status}"));
        }

        let envelope = resp.json::<ListEnvelope>().await?;
        envelope
            .data
            .ok_or_else(|| anyhow!("chains response is missing data"))
    }

    /// Fetch one chain by numeric id or slug. `Ok(None)` when the registry
    /// has no such chain.
    pub async fn get_chain(&self, id_or_slug: &str) -> Result<Option<ChainDescriptor>> {
        let url = self.endpoint(&format!("/v1/chains/{id_or_slug}"))?;
        debug!(%url, "fetching chain");

        let resp = self.http.get(url).send().await?;
        let envelope = resp.json::<SingleEnvelope>().await?;
        Ok(envelope.data)
    }

    /// Fetch every chain and overlay enrichment from `table`.
    pub async fn get_chains_enriched(
        &self,
        table: &ChainEnrichmentTable,
    ) -> Result<Vec<EnrichedChain>> {
        let chains = self.get_chains().await?;
        Ok(chains
            .into_iter()
            .map(|c| EnrichedChain::overlay(c, table))
            .collect())
    }

    /// Fetch one chain and overlay enrichment from `table`.
    pub async fn get_chain_enriched(
        &self,
        id_or_slug: &str,
        table: &ChainEnrichmentTable,
    ) -> Result<Option<EnrichedChain>> {
        Ok(self
            .get_chain(id_or_slug)
            .await?
            .map(|c| EnrichedChain::overlay(c, table)))
    }
}
