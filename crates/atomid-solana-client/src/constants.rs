//! Constants shared between the on-chain program and clients.
//!
//! Keep these stable because they affect address derivation and decoding.

use solana_program::pubkey::Pubkey;

/// Seed for identity records, followed by the owner's address.
pub const SEED_IDENTITY: &[u8] = b"atomid";

/// Seed for the protocol config account.
pub const SEED_CONFIG: &[u8] = b"atomid_config";

/// Seed for attestations under the attestation program.
pub const SEED_ATTESTATION: &[u8] = b"attestation";

/// Seed for the attestation program's event authority.
pub const SEED_EVENT_AUTHORITY: &[u8] = b"__event_authority";

/// Seed for the program's attestation signing authority.
pub const SEED_SAS_AUTHORITY: &[u8] = b"sas_authority";

/// Allocated size of an identity record:
/// discriminator + owner + total_burned + rank + metadata (4 + 200) + two slots + bump.
pub const IDENTITY_ACCOUNT_SIZE: usize = 8 + 32 + 8 + 1 + 204 + 8 + 8 + 1;

/// Account type name used for the identity discriminator.
pub const IDENTITY_ACCOUNT_NAME: &str = "AtomId";

pub const IX_CREATE: &str = "create_atomid";
pub const IX_UPGRADE: &str = "upgrade_atomid";

pub const TOKEN_PROGRAM_ID: Pubkey = solana_program::pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");

pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey =
    solana_program::pubkey!("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");

/// Substring of the RPC error returned when a resubmitted transaction has
/// already landed.
pub const ALREADY_PROCESSED: &str = "already been processed";
