//! PDA derivation helpers.
//!
//! Client-side derivation of the program addresses a drop collection hangs
//! off: the creator authority the drop program signs with, and the token
//! metadata accounts of minted items.

use solana_program::pubkey::Pubkey;

use crate::constants::{
    candy_machine_program_id, token_metadata_program_id, SEED_CANDY_MACHINE, SEED_EDITION,
    SEED_METADATA,
};

/// Derive the creator authority PDA for a drop collection.
///
/// The drop program signs mint instructions with this address, which is why
/// it appears as the first verified creator on every claimed item.
pub fn derive_candy_creator(candy_machine: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[SEED_CANDY_MACHINE, candy_machine.as_ref()],
        &candy_machine_program_id(),
    )
}

/// Derive the token metadata account for a mint.
pub fn derive_metadata(mint: &Pubkey) -> (Pubkey, u8) {
    let token_metadata = token_metadata_program_id();
    Pubkey::find_program_address(
        &[SEED_METADATA, token_metadata.as_ref(), mint.as_ref()],
        &token_metadata,
    )
}

/// Derive the master edition account for a mint.
pub fn derive_master_edition(mint: &Pubkey) -> (Pubkey, u8) {
    let token_metadata = token_metadata_program_id();
    Pubkey::find_program_address(
        &[SEED_METADATA, token_metadata.as_ref(), mint.as_ref(), SEED_EDITION],
        &token_metadata,
    )
}
