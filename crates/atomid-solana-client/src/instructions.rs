//! Instruction builders for the AtomID program.
//!
//! Instruction data is an 8-byte method discriminator followed by the
//! borsh-encoded arguments `(burn_amount: u64, metadata: Option<String>)`.

use borsh::BorshSerialize;
use solana_program::instruction::{AccountMeta, Instruction};
use solana_program::pubkey::Pubkey;

use atomid_core::validate::{
    metadata_arg, validate_create_burn, validate_metadata, validate_upgrade_burn, ValidationError,
};

use crate::account::anchor_discriminator;
use crate::constants::{IX_CREATE, IX_UPGRADE, TOKEN_PROGRAM_ID};
use crate::error::{ClientError, ClientResult};
use crate::pda::{IdentityPdas, ProgramAddresses};

/// A validated burn, ready to encode.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize)]
pub struct BurnRequest {
    pub burn_amount: u64,
    pub metadata: Option<String>,
}

impl BurnRequest {
    /// Validate form input for a new identity.
    pub fn for_create(amount: &str, metadata: &str, minimum: u64) -> Result<Self, ValidationError> {
        let burn_amount = validate_create_burn(amount, minimum)?;
        validate_metadata(metadata)?;
        Ok(Self { burn_amount, metadata: metadata_arg(metadata) })
    }

    /// Validate form input for an upgrade. No minimum applies.
    pub fn for_upgrade(amount: &str, metadata: &str) -> Result<Self, ValidationError> {
        let burn_amount = validate_upgrade_burn(amount)?;
        validate_metadata(metadata)?;
        Ok(Self { burn_amount, metadata: metadata_arg(metadata) })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityIx {
    Create,
    Upgrade,
}

impl IdentityIx {
    pub fn method(self) -> &'static str {
        match self {
            Self::Create => IX_CREATE,
            Self::Upgrade => IX_UPGRADE,
        }
    }

    pub fn encode(self, req: &BurnRequest) -> ClientResult<Vec<u8>> {
        let mut out = anchor_discriminator("global", self.method()).to_vec();
        let args = borsh::to_vec(req).map_err(|e| ClientError::Encode(e.to_string()))?;
        out.extend_from_slice(&args);
        Ok(out)
    }
}

/// Build the create instruction for `user`.
pub fn ix_create_identity(
    addrs: &ProgramAddresses,
    user: &Pubkey,
    req: &BurnRequest,
) -> ClientResult<Instruction> {
    let pdas = IdentityPdas::derive(addrs, user);
    let data = IdentityIx::Create.encode(req)?;

    Ok(Instruction {
        program_id: addrs.program_id,
        accounts: vec![
            AccountMeta::new(pdas.identity.0, false),
            AccountMeta::new(pdas.config.0, false),
            AccountMeta::new(*user, true),
            AccountMeta::new(pdas.token_account, false),
            AccountMeta::new(addrs.atom_mint, false),
            AccountMeta::new(pdas.attestation.0, false),
            AccountMeta::new_readonly(addrs.sas_credential, false),
            AccountMeta::new_readonly(addrs.sas_schema, false),
            AccountMeta::new_readonly(pdas.sas_authority.0, false),
            AccountMeta::new_readonly(addrs.sas_program, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(solana_program::system_program::id(), false),
        ],
        data,
    })
}

/// Build the upgrade instruction for `user`.
///
/// The attestation is closed and re-issued at the same address, so it is
/// passed as both the old and the new attestation account.
pub fn ix_upgrade_identity(
    addrs: &ProgramAddresses,
    user: &Pubkey,
    req: &BurnRequest,
) -> ClientResult<Instruction> {
    let pdas = IdentityPdas::derive(addrs, user);
    let data = IdentityIx::Upgrade.encode(req)?;

    Ok(Instruction {
        program_id: addrs.program_id,
        accounts: vec![
            AccountMeta::new(pdas.identity.0, false),
            AccountMeta::new(pdas.config.0, false),
            AccountMeta::new(*user, true),
            AccountMeta::new(pdas.token_account, false),
            AccountMeta::new(addrs.atom_mint, false),
            AccountMeta::new(pdas.attestation.0, false),
            AccountMeta::new(pdas.attestation.0, false),
            AccountMeta::new_readonly(addrs.sas_credential, false),
            AccountMeta::new_readonly(addrs.sas_schema, false),
            AccountMeta::new_readonly(pdas.sas_authority.0, false),
            AccountMeta::new_readonly(pdas.sas_event_authority.0, false),
            AccountMeta::new_readonly(addrs.sas_program, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(solana_program::system_program::id(), false),
        ],
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use atomid_core::amount::ATOM_UNIT;
    use atomid_core::config::NetworkConfig;

    fn addrs() -> ProgramAddresses {
        ProgramAddresses::from_config(&NetworkConfig::devnet()).unwrap()
    }

    #[test]
    fn encodes_discriminator_and_args() {
        let req = BurnRequest { burn_amount: 1_000 * ATOM_UNIT, metadata: Some("hi".into()) };
        let data = IdentityIx::Create.encode(&req).unwrap();
        assert_eq!(&data[..8], &anchor_discriminator("global", "create_atomid"));
        assert_eq!(&data[8..16], &(1_000 * ATOM_UNIT).to_le_bytes());
        // Some tag, u32 length, bytes
        assert_eq!(&data[16..], &[1, 2, 0, 0, 0, b'h', b'i']);
    }

    #[test]
    fn empty_metadata_encodes_none() {
        let req = BurnRequest::for_upgrade("5", "").unwrap();
        let data = IdentityIx::Upgrade.encode(&req).unwrap();
        assert_eq!(data.len(), 8 + 8 + 1);
        assert_eq!(*data.last().unwrap(), 0);
    }

    #[test]
    fn create_request_validation() {
        let min = NetworkConfig::devnet().min_create_burn;
        assert!(BurnRequest::for_create("1000", "", min).is_ok());
        assert_eq!(
            BurnRequest::for_create("999", "", min),
            Err(ValidationError::BelowMinimum { minimum: min })
        );
        assert!(matches!(
            BurnRequest::for_create("1000", &"x".repeat(201), min),
            Err(ValidationError::MetadataTooLong { .. })
        ));
    }

    #[test]
    fn create_accounts() {
        let a = addrs();
        let user = Pubkey::new_unique();
        let req = BurnRequest::for_create("1000", "", a.min_create_burn).unwrap();
        let ix = ix_create_identity(&a, &user, &req).unwrap();
        assert_eq!(ix.program_id, a.program_id);
        assert_eq!(ix.accounts.len(), 12);

        let signers: Vec<_> = ix.accounts.iter().filter(|m| m.is_signer).collect();
        assert_eq!(signers.len(), 1);
        assert_eq!(signers[0].pubkey, user);

        let pdas = IdentityPdas::derive(&a, &user);
        assert_eq!(ix.accounts[0].pubkey, pdas.identity.0);
        assert_eq!(ix.accounts[5].pubkey, pdas.attestation.0);
        assert_eq!(ix.accounts[11].pubkey, solana_program::system_program::id());
    }

    #[test]
    fn upgrade_accounts() {
        let a = addrs();
        let user = Pubkey::new_unique();
        let req = BurnRequest::for_upgrade("1", "").unwrap();
        let ix = ix_upgrade_identity(&a, &user, &req).unwrap();
        assert_eq!(ix.accounts.len(), 14);
        assert_eq!(ix.accounts[5].pubkey, ix.accounts[6].pubkey);
        assert!(ix.accounts[5].is_writable);
        assert_eq!(
            ix.accounts[10].pubkey,
            IdentityPdas::derive(&a, &user).sas_event_authority.0
        );
    }
}
