//! Chain enrichment overlay.
//!
//! Presentation metadata (banner image, description, sponsorship and
//! verification flags, promotional call-to-action) keyed by numeric chain id.
//! The table is immutable, built at process start, and injected into whatever
//! needs it; there is no module-level global. A lookup miss yields no
//! enrichment, never an error.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::ChainDescriptor;

/// Promotional call-to-action block shown on a chain page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainCta {
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_link: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainEnrichment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_img: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,

    /// Transactions on this chain are eligible for sponsored gas.
    pub gas_sponsored: bool,

    pub verified: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta: Option<ChainCta>,
}

/// Immutable enrichment lookup table keyed by chain id.
#[derive(Debug, Clone, Default)]
pub struct ChainEnrichmentTable {
    entries: BTreeMap<u64, ChainEnrichment>,
}

impl ChainEnrichmentTable {
    pub fn new(entries: BTreeMap<u64, ChainEnrichment>) -> Self {
        Self { entries }
    }

    /// The production enrichment set.
    pub fn builtin() -> Self {
        let mut entries = BTreeMap::new();

        entries.insert(
            1,
            ChainEnrichment {
                about: Some("The original smart contract platform.".to_string()),
                verified: true,
                ..ChainEnrichment::default()
            },
        );
        entries.insert(
            10,
            ChainEnrichment {
                header_img: Some("https://assets.dropkit.dev/chains/optimism-header.png".to_string()),
                about: Some("Low-cost Ethereum L2 built on the OP Stack.".to_string()),
                verified: true,
                ..ChainEnrichment::default()
            },
        );
        entries.insert(
            137,
            ChainEnrichment {
                verified: true,
                ..ChainEnrichment::default()
            },
        );
        entries.insert(
            8453,
            ChainEnrichment {
                header_img: Some("https://assets.dropkit.dev/chains/base-header.png".to_string()),
                about: Some(
                    "An Ethereum L2 incubated by Coinbase, built for the next million builders."
                        .to_string(),
                ),
                gas_sponsored: true,
                verified: true,
                cta: Some(ChainCta {
                    title: "Launch your drop on Base".to_string(),
                    button_text: Some("Get started".to_string()),
                    button_link: Some("https://dropkit.dev/deploy?chain=base".to_string()),
                    background_image: Some(
                        "https://assets.dropkit.dev/chains/base-cta.png".to_string(),
                    ),
                }),
            },
        );
        entries.insert(
            42161,
            ChainEnrichment {
                about: Some("High-throughput optimistic rollup on Ethereum.".to_string()),
                verified: true,
                ..ChainEnrichment::default()
            },
        );
        entries.insert(
            43114,
            ChainEnrichment {
                verified: true,
                ..ChainEnrichment::default()
            },
        );

        Self::new(entries)
    }

    pub fn get(&self, chain_id: u64) -> Option<&ChainEnrichment> {
        self.entries.get(&chain_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A fetched descriptor merged with its optional enrichment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedChain {
    #[serde(flatten)]
    pub chain: ChainDescriptor,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrichment: Option<ChainEnrichment>,
}

impl EnrichedChain {
    pub fn overlay(chain: ChainDescriptor, table: &ChainEnrichmentTable) -> Self {
        let enrichment = table.get(chain.chain_id).cloned();
        Self { chain, enrichment }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_is_gas_sponsored() {
        let table = ChainEnrichmentTable::builtin();
        let base = table.get(8453).unwrap();
        assert!(base.gas_sponsored);
        assert!(base.verified);
        assert!(base.cta.is_some());
    }

    #[test]
    fn unknown_chain_has_no_enrichment() {
        let table = ChainEnrichmentTable::builtin();
        assert!(table.get(999_999).is_none());
    }

    #[test]
    fn overlay_attaches_enrichment_by_id() {
        let table = ChainEnrichmentTable::builtin();

        let base = ChainDescriptor {
            chain_id: 8453,
            name: "Base".to_string(),
            slug: Some("base".to_string()),
            icon: None,
            native_currency: None,
            services: vec![],
        };
        let enriched = EnrichedChain::overlay(base, &table);
        assert!(enriched.enrichment.unwrap().gas_sponsored);

        let unknown = ChainDescriptor {
            chain_id: 999_999,
            name: "Testnet".to_string(),
            slug: None,
            icon: None,
            native_currency: None,
            services: vec![],
        };
        assert!(EnrichedChain::overlay(unknown, &table).enrichment.is_none());
    }

    #[test]
    fn custom_tables_are_injectable() {
        let mut entries = BTreeMap::new();
        entries.insert(7777, ChainEnrichment { verified: true, ..ChainEnrichment::default() });
        let table = ChainEnrichmentTable::new(entries);
        assert_eq!(table.len(), 1);
        assert!(table.get(7777).unwrap().verified);
        assert!(table.get(8453).is_none());
    }
}
