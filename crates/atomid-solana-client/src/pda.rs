//! Derived-address helpers for the AtomID program and the attestation service.
//!
//! These helpers implement deterministic address derivation and match the
//! seeds the on-chain programs use.

use std::str::FromStr;

use atomid_core::config::{Network, NetworkConfig};
use serde::Serialize;
use solana_program::pubkey::Pubkey;

use crate::constants::{
    ASSOCIATED_TOKEN_PROGRAM_ID, SEED_ATTESTATION, SEED_CONFIG, SEED_EVENT_AUTHORITY,
    SEED_IDENTITY, SEED_SAS_AUTHORITY, TOKEN_PROGRAM_ID,
};
use crate::error::{ClientError, ClientResult};

/// Parsed program and attestation addresses for one network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramAddresses {
    pub network: Network,
    pub program_id: Pubkey,
    pub atom_mint: Pubkey,
    pub min_create_burn: u64,
    pub sas_program: Pubkey,
    pub sas_credential: Pubkey,
    pub sas_schema: Pubkey,
}

impl ProgramAddresses {
    pub fn from_config(cfg: &NetworkConfig) -> ClientResult<Self> {
        Ok(Self {
            network: cfg.network,
            program_id: parse_pubkey("program_id", &cfg.program_id)?,
            atom_mint: parse_pubkey("atom_mint", &cfg.atom_mint)?,
            min_create_burn: cfg.min_create_burn,
            sas_program: parse_pubkey("sas_program_id", &cfg.sas_program_id)?,
            sas_credential: parse_pubkey("sas_credential", &cfg.sas_credential)?,
            sas_schema: parse_pubkey("sas_schema", &cfg.sas_schema)?,
        })
    }
}

pub fn parse_pubkey(field: &'static str, value: &str) -> ClientResult<Pubkey> {
    Pubkey::from_str(value.trim()).map_err(|_| ClientError::InvalidAddress {
        field,
        value: value.to_string(),
    })
}

/// Derive an owner's identity record address.
pub fn derive_identity(program_id: &Pubkey, owner: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[SEED_IDENTITY, owner.as_ref()], program_id)
}

/// Derive the protocol config address.
pub fn derive_config(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[SEED_CONFIG], program_id)
}

/// Derive an attestation address. The program uses the owner as nonce.
pub fn derive_attestation(
    sas_program: &Pubkey,
    credential: &Pubkey,
    schema: &Pubkey,
    nonce: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[SEED_ATTESTATION, credential.as_ref(), schema.as_ref(), nonce.as_ref()],
        sas_program,
    )
}

/// Derive the attestation program's event authority.
pub fn derive_sas_event_authority(sas_program: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[SEED_EVENT_AUTHORITY], sas_program)
}

/// Derive the AtomID program's attestation signing authority.
pub fn derive_sas_authority(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[SEED_SAS_AUTHORITY], program_id)
}

/// Derive the owner's associated token account for `mint`.
pub fn derive_token_account(owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[owner.as_ref(), TOKEN_PROGRAM_ID.as_ref(), mint.as_ref()],
        &ASSOCIATED_TOKEN_PROGRAM_ID,
    )
    .0
}

/// Every address a create/upgrade flow needs for one owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityPdas {
    pub owner: Pubkey,
    pub identity: (Pubkey, u8),
    pub config: (Pubkey, u8),
    pub attestation: (Pubkey, u8),
    pub sas_authority: (Pubkey, u8),
    pub sas_event_authority: (Pubkey, u8),
    pub token_account: Pubkey,
}

impl IdentityPdas {
    pub fn derive(addrs: &ProgramAddresses, owner: &Pubkey) -> Self {
        Self {
            owner: *owner,
            identity: derive_identity(&addrs.program_id, owner),
            config: derive_config(&addrs.program_id),
            attestation: derive_attestation(
                &addrs.sas_program,
                &addrs.sas_credential,
                &addrs.sas_schema,
                owner,
            ),
            sas_authority: derive_sas_authority(&addrs.program_id),
            sas_event_authority: derive_sas_event_authority(&addrs.sas_program),
            token_account: derive_token_account(owner, &addrs.atom_mint),
        }
    }

    /// Base58 view for printing.
    pub fn summary(&self) -> PdaSummary {
        PdaSummary {
            owner: self.owner.to_string(),
            identity: self.identity.0.to_string(),
            config: self.config.0.to_string(),
            attestation: self.attestation.0.to_string(),
            sas_authority: self.sas_authority.0.to_string(),
            sas_event_authority: self.sas_event_authority.0.to_string(),
            token_account: self.token_account.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PdaSummary {
    pub owner: String,
    pub identity: String,
    pub config: String,
    pub attestation: String,
    pub sas_authority: String,
    pub sas_event_authority: String,
    pub token_account: String,
}
