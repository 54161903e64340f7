use anyhow::Result;
use serde::Serialize;

use dropkit_chains::{ChainEnrichmentTable, ChainsClient, EnrichedChain};

use crate::output;

#[derive(Debug, Serialize)]
pub struct ChainsOut {
    pub total: usize,
    pub chains: Vec<EnrichedChain>,
}

#[derive(Debug, Serialize)]
pub struct ChainOut {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain: Option<EnrichedChain>,
}

pub async fn list(host: &str) -> Result<()> {
    let client = ChainsClient::new(host)?;
    let table = ChainEnrichmentTable::builtin();

    let chains = client.get_chains_enriched(&table).await?;
    output::print(&ChainsOut { total: chains.len(), chains })?;
    Ok(())
}

pub async fn get(host: &str, id_or_slug: &str) -> Result<()> {
    let client = ChainsClient::new(host)?;
    let table = ChainEnrichmentTable::builtin();

    match client.get_chain_enriched(id_or_slug, &table).await? {
        Some(chain) => output::print(&ChainOut { found: true, chain: Some(chain) })?,
        None => {
            // Absent data is a navigable not-found outcome, not a failure.
            if !output::is_json() {
                output::eprintln_line(&format!("chain not found: {id_or_slug}"));
            }
            output::print(&ChainOut { found: false, chain: None })?;
        }
    }
    Ok(())
}
