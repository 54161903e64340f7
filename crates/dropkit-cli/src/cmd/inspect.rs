use anyhow::{anyhow, Result};
use serde::Serialize;
use solana_sdk::pubkey::Pubkey;

use dropkit_solana_client::pda;

use crate::output;

#[derive(Debug, Serialize)]
pub struct InspectOut {
    pub candy_machine: String,
    pub creator_authority: String,
    pub creator_bump: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub master_edition: Option<String>,
}

pub async fn run(candy_machine: &str, mint: Option<&str>) -> Result<()> {
    let cm: Pubkey = candy_machine
        .parse()
        .map_err(|_| anyhow!("invalid drop collection address: {candy_machine}"))?;
    let (creator, creator_bump) = pda::derive_candy_creator(&cm);

    let mut out = InspectOut {
        candy_machine: cm.to_string(),
        creator_authority: creator.to_string(),
        creator_bump,
        metadata: None,
        master_edition: None,
    };

    if let Some(mint) = mint {
        let mint: Pubkey = mint.parse().map_err(|_| anyhow!("invalid mint address: {mint}"))?;
        out.metadata = Some(pda::derive_metadata(&mint).0.to_string());
        out.master_edition = Some(pda::derive_master_edition(&mint).0.to_string());
    }

    output::print(&out)?;
    Ok(())
}
