//! RPC client for the AtomID program.
//!
//! This client can:
//! - derive addresses
//! - read identity records, attestations and token balances
//! - scan every identity record for leaderboards
//! - submit create/upgrade burns
//!
//! The program is deployed externally; this crate provides the off-chain
//! wiring for CLIs, bots and servers.

use atomid_core::config::{NetworkConfig, SEND_MAX_RETRIES};
use atomid_core::model::{leaderboard, AttestationData, HallOfFlame, IdentityRecord, LeaderboardEntry};
use atomid_core::validate::ValidationError;
use serde::Serialize;
use solana_account_decoder::UiAccountEncoding;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig, RpcSendTransactionConfig};
use solana_client::rpc_filter::{Memcmp, RpcFilterType};
use solana_program::pubkey::Pubkey;
use solana_sdk::commitment_config::{CommitmentConfig, CommitmentLevel};
use solana_sdk::signature::{Keypair, Signer};
use solana_sdk::transaction::Transaction;
use tracing::{debug, info, warn};

use crate::account::{decode_attestation, decode_identity, identity_discriminator, token_amount, IdentityAccount};
use crate::constants::ALREADY_PROCESSED;
use crate::error::{ClientError, ClientResult};
use crate::instructions::{ix_create_identity, ix_upgrade_identity, BurnRequest};
use crate::pda::{self, IdentityPdas, ProgramAddresses};
use crate::tx::TxPlan;

pub struct IdentityClient {
    pub addresses: ProgramAddresses,
    pub rpc: RpcClient,
}

/// Result of a submitted burn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SendOutcome {
    Submitted { signature: String },
    /// The node reported the transaction as already processed, i.e. an
    /// earlier attempt landed. Treated as success.
    AlreadyProcessed,
}

impl SendOutcome {
    pub fn signature(&self) -> Option<&str> {
        match self {
            Self::Submitted { signature } => Some(signature),
            Self::AlreadyProcessed => None,
        }
    }
}

/// The payload of an attestation account issued under this deployment's
/// credential and schema.
fn own_attestation(
    addresses: &ProgramAddresses,
    owner: &Pubkey,
    address: &Pubkey,
    data: &[u8],
) -> Option<AttestationData> {
    let att = match decode_attestation(data) {
        Ok(att) => att,
        Err(e) => {
            warn!(%owner, %address, error = %e, "undecodable attestation; ignoring");
            return None;
        }
    };
    if att.credential != addresses.sas_credential || att.schema != addresses.sas_schema {
        warn!(%owner, %address, "attestation issued under another credential/schema");
        return None;
    }
    Some(att.data)
}

/// `getProgramAccounts` config selecting identity records by discriminator.
/// Account size is not filtered on.
fn identity_scan_config(commitment: CommitmentConfig) -> RpcProgramAccountsConfig {
    RpcProgramAccountsConfig {
        filters: Some(vec![RpcFilterType::Memcmp(Memcmp::new_base58_encoded(
            0,
            &identity_discriminator(),
        ))]),
        account_config: RpcAccountInfoConfig {
            encoding: Some(UiAccountEncoding::Base64),
            commitment: Some(commitment),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// True when an RPC error means the transaction already landed.
pub fn is_already_processed(message: &str) -> bool {
    message.contains(ALREADY_PROCESSED)
}

impl IdentityClient {
    pub fn new(cfg: &NetworkConfig) -> ClientResult<Self> {
        atomid_core::config::validate_config(cfg)?;
        let addresses = ProgramAddresses::from_config(cfg)?;
        let rpc = RpcClient::new_with_commitment(cfg.rpc_url.clone(), CommitmentConfig::confirmed());
        Ok(Self { addresses, rpc })
    }

    pub fn pdas(&self, owner: &Pubkey) -> IdentityPdas {
        IdentityPdas::derive(&self.addresses, owner)
    }

    pub fn derive_identity(&self, owner: &Pubkey) -> (Pubkey, u8) {
        pda::derive_identity(&self.addresses.program_id, owner)
    }

    /// Raw account bytes at `address`, `None` when the account does not exist.
    pub async fn account_data(&self, address: &Pubkey) -> ClientResult<Option<Vec<u8>>> {
        let resp = self
            .rpc
            .get_account_with_commitment(address, self.rpc.commitment())
            .await?;
        Ok(resp.value.map(|a| a.data))
    }

    /// Raw identity account, `None` when the owner has no record.
    pub async fn fetch_identity_account(&self, owner: &Pubkey) -> ClientResult<Option<IdentityAccount>> {
        let (address, _) = self.derive_identity(owner);
        debug!(%owner, %address, "fetching identity record");
        match self.account_data(&address).await? {
            Some(data) => Ok(Some(decode_identity(&data)?)),
            None => Ok(None),
        }
    }

    pub async fn fetch_identity(&self, owner: &Pubkey) -> ClientResult<Option<IdentityRecord>> {
        Ok(self.fetch_identity_account(owner).await?.map(IdentityAccount::into_record))
    }

    pub async fn has_identity(&self, owner: &Pubkey) -> ClientResult<bool> {
        let (address, _) = self.derive_identity(owner);
        Ok(self.account_data(&address).await?.is_some())
    }

    /// The attestation issued for `owner`, if any. Attestations under a
    /// different credential or schema, or with a payload this client cannot
    /// decode, are reported as absent.
    pub async fn fetch_attestation(&self, owner: &Pubkey) -> ClientResult<Option<AttestationData>> {
        let address = self.pdas(owner).attestation.0;
        Ok(self
            .account_data(&address)
            .await?
            .and_then(|data| own_attestation(&self.addresses, owner, &address, &data)))
    }

    /// $ATOM balance in smallest units; zero when the token account does not exist.
    pub async fn token_balance(&self, owner: &Pubkey) -> ClientResult<u64> {
        let ata = pda::derive_token_account(owner, &self.addresses.atom_mint);
        match self.account_data(&ata).await? {
            Some(data) => token_amount(&data),
            None => Ok(0),
        }
    }

    /// Every identity record owned by the program.
    ///
    /// Accounts that fail to decode are skipped.
    pub async fn fetch_all_identities(&self) -> ClientResult<Vec<IdentityRecord>> {
        let config = identity_scan_config(self.rpc.commitment());
        let accounts = self
            .rpc
            .get_program_accounts_with_config(&self.addresses.program_id, config)
            .await?;

        let total = accounts.len();
        let records: Vec<IdentityRecord> = accounts
            .into_iter()
            .filter_map(|(address, account)| match decode_identity(&account.data) {
                Ok(acct) => Some(acct.into_record()),
                Err(e) => {
                    debug!(%address, error = %e, "skipping undecodable account");
                    None
                }
            })
            .collect();
        info!(total, decoded = records.len(), "scanned identity records");
        Ok(records)
    }

    pub async fn leaderboard(&self, limit: usize) -> ClientResult<Vec<LeaderboardEntry>> {
        Ok(leaderboard(self.fetch_all_identities().await?, limit))
    }

    pub async fn hall_of_flame(&self) -> ClientResult<HallOfFlame> {
        Ok(HallOfFlame::from_records(self.fetch_all_identities().await?))
    }

    /// Instructions for a create, without touching the network.
    pub fn plan_create(&self, user: &Pubkey, req: &BurnRequest) -> ClientResult<TxPlan> {
        Ok(TxPlan::with_compute_budget(ix_create_identity(&self.addresses, user, req)?))
    }

    /// Instructions for an upgrade, without touching the network.
    pub fn plan_upgrade(&self, user: &Pubkey, req: &BurnRequest) -> ClientResult<TxPlan> {
        Ok(TxPlan::with_compute_budget(ix_upgrade_identity(&self.addresses, user, req)?))
    }

    /// Burn and create an identity. Refuses when one already exists.
    pub async fn create_identity(&self, payer: &Keypair, req: &BurnRequest) -> ClientResult<SendOutcome> {
        if req.burn_amount < self.addresses.min_create_burn {
            return Err(ValidationError::BelowMinimum { minimum: self.addresses.min_create_burn }.into());
        }
        let user = payer.pubkey();
        if self.has_identity(&user).await? {
            return Err(ValidationError::IdentityExists.into());
        }
        let plan = self.plan_create(&user, req)?;
        info!(%user, burn = req.burn_amount, "creating identity");
        self.send(payer, &plan).await
    }

    /// Burn more tokens into an existing identity.
    pub async fn upgrade_identity(&self, payer: &Keypair, req: &BurnRequest) -> ClientResult<SendOutcome> {
        let user = payer.pubkey();
        if !self.has_identity(&user).await? {
            return Err(ValidationError::IdentityMissing.into());
        }
        let plan = self.plan_upgrade(&user, req)?;
        info!(%user, burn = req.burn_amount, "upgrading identity");
        self.send(payer, &plan).await
    }

    /// Sign and submit a plan with preflight simulation and node-side retries.
    pub async fn send(&self, payer: &Keypair, plan: &TxPlan) -> ClientResult<SendOutcome> {
        let blockhash = self.rpc.get_latest_blockhash().await?;
        let tx = Transaction::new_signed_with_payer(
            &plan.instructions,
            Some(&payer.pubkey()),
            &[payer],
            blockhash,
        );
        let config = RpcSendTransactionConfig {
            skip_preflight: false,
            preflight_commitment: Some(CommitmentLevel::Confirmed),
            max_retries: Some(SEND_MAX_RETRIES),
            ..Default::default()
        };

        let signature = match self.rpc.send_transaction_with_config(&tx, config).await {
            Ok(sig) => sig,
            Err(e) if is_already_processed(&e.to_string()) => {
                info!("transaction already processed");
                return Ok(SendOutcome::AlreadyProcessed);
            }
            Err(e) => return Err(ClientError::Rpc(e)),
        };
        debug!(%signature, "sent; waiting for confirmation");
        self.rpc
            .poll_for_signature_with_commitment(&signature, CommitmentConfig::confirmed())
            .await?;
        info!(%signature, "transaction confirmed");
        Ok(SendOutcome::Submitted { signature: signature.to_string() })
    }
}
