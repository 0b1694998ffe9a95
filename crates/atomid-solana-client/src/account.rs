//! Decoding of program-owned accounts.
//!
//! Identity records use the Anchor account layout: an 8-byte type
//! discriminator followed by the borsh-encoded fields. Accounts are allocated
//! at a fixed size, so trailing bytes after the fields are padding.

use atomid_core::model::{AttestationData, IdentityRecord};
use atomid_core::validate::MAX_METADATA_LEN;
use borsh::{BorshDeserialize, BorshSerialize};
use sha2::{Digest, Sha256};
use solana_program::pubkey::Pubkey;

use crate::constants::{IDENTITY_ACCOUNT_NAME, IDENTITY_ACCOUNT_SIZE};
use crate::error::{ClientError, ClientResult};

/// First 8 bytes of `sha256("<namespace>:<name>")`.
pub fn anchor_discriminator(namespace: &str, name: &str) -> [u8; 8] {
    let mut h = Sha256::new();
    h.update(namespace.as_bytes());
    h.update(b":");
    h.update(name.as_bytes());
    let digest = h.finalize();
    let mut out = [0u8; 8];
    out.copy_from_slice(&digest[..8]);
    out
}

pub fn identity_discriminator() -> [u8; 8] {
    anchor_discriminator("account", IDENTITY_ACCOUNT_NAME)
}

/// Identity record with the owner as a `Pubkey`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityAccount {
    pub owner: Pubkey,
    pub total_burned: u64,
    pub rank: u8,
    pub metadata: String,
    pub created_at_slot: u64,
    pub updated_at_slot: u64,
    pub bump: u8,
}

impl IdentityAccount {
    pub fn into_record(self) -> IdentityRecord {
        IdentityRecord {
            owner: self.owner.to_string(),
            total_burned: self.total_burned,
            rank: self.rank,
            metadata: self.metadata,
            created_at_slot: self.created_at_slot,
            updated_at_slot: self.updated_at_slot,
            bump: self.bump,
        }
    }
}

#[derive(BorshSerialize, BorshDeserialize)]
struct IdentityLayout {
    owner: [u8; 32],
    total_burned: u64,
    rank: u8,
    metadata: String,
    created_at_slot: u64,
    updated_at_slot: u64,
    bump: u8,
}

pub fn decode_identity(data: &[u8]) -> ClientResult<IdentityAccount> {
    if data.len() < 8 {
        return Err(ClientError::decode(format!(
            "identity account too short: {} bytes",
            data.len()
        )));
    }
    if data[..8] != identity_discriminator() {
        return Err(ClientError::decode("not an identity account (discriminator mismatch)"));
    }

    let mut body = &data[8..];
    let raw = IdentityLayout::deserialize(&mut body)
        .map_err(|e| ClientError::decode(format!("identity layout: {e}")))?;

    if raw.metadata.len() > MAX_METADATA_LEN {
        return Err(ClientError::decode(format!(
            "metadata is {} bytes, limit is {MAX_METADATA_LEN}",
            raw.metadata.len()
        )));
    }

    Ok(IdentityAccount {
        owner: Pubkey::new_from_array(raw.owner),
        total_burned: raw.total_burned,
        rank: raw.rank,
        metadata: raw.metadata,
        created_at_slot: raw.created_at_slot,
        updated_at_slot: raw.updated_at_slot,
        bump: raw.bump,
    })
}

/// Encode a record into its allocated account size. Used for fixtures and
/// local test validators.
pub fn encode_identity(account: &IdentityAccount) -> ClientResult<Vec<u8>> {
    let layout = IdentityLayout {
        owner: account.owner.to_bytes(),
        total_burned: account.total_burned,
        rank: account.rank,
        metadata: account.metadata.clone(),
        created_at_slot: account.created_at_slot,
        updated_at_slot: account.updated_at_slot,
        bump: account.bump,
    };
    let mut out = identity_discriminator().to_vec();
    let body = borsh::to_vec(&layout).map_err(|e| ClientError::Encode(e.to_string()))?;
    out.extend_from_slice(&body);
    if out.len() > IDENTITY_ACCOUNT_SIZE {
        return Err(ClientError::Encode(format!(
            "record needs {} bytes, account holds {IDENTITY_ACCOUNT_SIZE}",
            out.len()
        )));
    }
    out.resize(IDENTITY_ACCOUNT_SIZE, 0);
    Ok(out)
}

/// Attestation account as written by the attestation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttestationAccount {
    pub nonce: Pubkey,
    pub credential: Pubkey,
    pub schema: Pubkey,
    pub data: AttestationData,
    pub signer: Pubkey,
    pub expiry: i64,
}

#[derive(BorshSerialize, BorshDeserialize)]
struct AttestationLayout {
    nonce: [u8; 32],
    credential: [u8; 32],
    schema: [u8; 32],
    data: Vec<u8>,
    signer: [u8; 32],
    expiry: i64,
    token_account: [u8; 32],
}

/// Decode an attestation account: a one-byte account type, then the fields.
pub fn decode_attestation(data: &[u8]) -> ClientResult<AttestationAccount> {
    let Some((_, mut body)) = data.split_first() else {
        return Err(ClientError::decode("empty attestation account"));
    };
    let raw = AttestationLayout::deserialize(&mut body)
        .map_err(|e| ClientError::decode(format!("attestation layout: {e}")))?;
    let payload = AttestationData::from_bytes(&raw.data).map_err(|e| ClientError::decode(e.to_string()))?;

    Ok(AttestationAccount {
        nonce: Pubkey::new_from_array(raw.nonce),
        credential: Pubkey::new_from_array(raw.credential),
        schema: Pubkey::new_from_array(raw.schema),
        data: payload,
        signer: Pubkey::new_from_array(raw.signer),
        expiry: raw.expiry,
    })
}

/// Inverse of [`decode_attestation`], for fixtures.
pub fn encode_attestation(account: &AttestationAccount, account_type: u8) -> ClientResult<Vec<u8>> {
    let layout = AttestationLayout {
        nonce: account.nonce.to_bytes(),
        credential: account.credential.to_bytes(),
        schema: account.schema.to_bytes(),
        data: account.data.to_bytes().to_vec(),
        signer: account.signer.to_bytes(),
        expiry: account.expiry,
        token_account: [0u8; 32],
    };
    let mut out = vec![account_type];
    out.extend(borsh::to_vec(&layout).map_err(|e| ClientError::Encode(e.to_string()))?);
    Ok(out)
}

/// SPL token account balance: the `amount` field at offset 64.
pub fn token_amount(data: &[u8]) -> ClientResult<u64> {
    let bytes = data
        .get(64..72)
        .ok_or_else(|| ClientError::decode(format!("token account too short: {} bytes", data.len())))?;
    let mut amount = [0u8; 8];
    amount.copy_from_slice(bytes);
    Ok(u64::from_le_bytes(amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> IdentityAccount {
        IdentityAccount {
            owner: Pubkey::new_unique(),
            total_burned: 25_000_000_000,
            rank: 3,
            metadata: "I burn for truth".to_string(),
            created_at_slot: 299_144_100,
            updated_at_slot: 299_150_000,
            bump: 254,
        }
    }

    #[test]
    fn account_size_matches_layout() {
        assert_eq!(IDENTITY_ACCOUNT_SIZE, 270);
        let full = IdentityAccount { metadata: "x".repeat(200), ..sample() };
        assert_eq!(encode_identity(&full).unwrap().len(), IDENTITY_ACCOUNT_SIZE);
    }

    #[test]
    fn decodes_padded_account() {
        let acct = sample();
        let data = encode_identity(&acct).unwrap();
        assert_eq!(data.len(), IDENTITY_ACCOUNT_SIZE);
        assert_eq!(decode_identity(&data).unwrap(), acct);

        let record = decode_identity(&data).unwrap().into_record();
        assert_eq!(record.rank_name(), "Guardian");
        assert_eq!(record.formatted_burned(), "25,000");
    }

    #[test]
    fn rejects_foreign_accounts() {
        let mut data = encode_identity(&sample()).unwrap();
        data[0] ^= 0xff;
        assert!(decode_identity(&data).is_err());
        assert!(decode_identity(&[1, 2, 3]).is_err());
        // config account of the same program would fail the same way
        let mut config = anchor_discriminator("account", "AtomConfig").to_vec();
        config.extend_from_slice(&[0u8; 64]);
        assert!(decode_identity(&config).is_err());
    }

    #[test]
    fn rejects_truncated_body() {
        let data = encode_identity(&sample()).unwrap();
        assert!(decode_identity(&data[..40]).is_err());
    }

    #[test]
    fn attestation_account_decodes() {
        let acct = AttestationAccount {
            nonce: Pubkey::new_unique(),
            credential: Pubkey::new_unique(),
            schema: Pubkey::new_unique(),
            data: AttestationData { rank: 5, total_burned: 100_000_000_000, created_at_slot: 42 },
            signer: Pubkey::new_unique(),
            expiry: 0,
        };
        let bytes = encode_attestation(&acct, 2).unwrap();
        assert_eq!(decode_attestation(&bytes).unwrap(), acct);
        assert!(decode_attestation(&[]).is_err());
    }

    #[test]
    fn reads_token_amount() {
        let mut data = vec![0u8; 165];
        data[64..72].copy_from_slice(&1_234_000_000u64.to_le_bytes());
        assert_eq!(token_amount(&data).unwrap(), 1_234_000_000);
        assert!(token_amount(&data[..70]).is_err());
    }

    #[test]
    fn discriminators_differ_by_name() {
        assert_ne!(identity_discriminator(), anchor_discriminator("account", "AtomConfig"));
        assert_ne!(
            anchor_discriminator("global", "create_atomid"),
            anchor_discriminator("global", "upgrade_atomid")
        );
    }
}
