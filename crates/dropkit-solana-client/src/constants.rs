//! Constants shared with the on-chain drop program and its companions.
//!
//! Keep these stable because they affect PDA derivation.

use solana_program::pubkey::Pubkey;

/// PDA seed prefix for the drop creator authority.
pub const SEED_CANDY_MACHINE: &[u8] = b"candy_machine";

/// PDA seed prefix for token metadata accounts.
pub const SEED_METADATA: &[u8] = b"metadata";

/// PDA seed suffix for master edition accounts.
pub const SEED_EDITION: &[u8] = b"edition";

/// Candy machine program id.
pub const CANDY_MACHINE_PROGRAM_ID: &str = "cndy3Z4yapfJBmL3ShUp5exZKqR3z33thTzeNMm2gRZ";

/// Token metadata program id.
pub const TOKEN_METADATA_PROGRAM_ID: &str = "metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s";

pub fn candy_machine_program_id() -> Pubkey {
    CANDY_MACHINE_PROGRAM_ID.parse().unwrap_or_else(|_| Pubkey::default())
}

pub fn token_metadata_program_id() -> Pubkey {
    TOKEN_METADATA_PROGRAM_ID.parse().unwrap_or_else(|_| Pubkey::default())
}
