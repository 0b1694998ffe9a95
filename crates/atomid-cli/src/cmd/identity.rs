use std::fmt::Write as _;

use anyhow::Result;
use atomid_core::amount::{format_atom, format_atom_precise};
use atomid_core::config::Network;
use atomid_core::explorer::Explorer;
use atomid_core::model::{AttestationData, IdentityRecord};
use atomid_core::rank::{meets_rank, progress, rank_name, Rank, RankProgress};
use serde::Serialize;

use crate::args::Cli;
use crate::{context, output};

/// Bytes of raw account data shown by `profile --raw`.
const RAW_PREVIEW_LEN: usize = 64;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileOut {
    pub network: Network,
    pub owner: String,
    pub identity: String,
    pub found: bool,
    pub record: Option<IdentityRecord>,
    pub rank_name: Option<&'static str>,
    pub progress: Option<RankProgress>,
    pub attestation_address: String,
    pub attestation: Option<AttestationData>,
    pub explorer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_preview: Option<String>,
}

pub async fn profile(cli: &Cli, owner: &str, raw: bool) -> Result<()> {
    let owner = context::owner(owner)?;
    let client = context::identity_client(cli)?;
    let pdas = client.pdas(&owner);
    let identity = pdas.identity.0;

    let pb = output::spinner(format!("fetching identity {identity}"));
    let fetched = tokio::try_join!(client.fetch_identity(&owner), client.fetch_attestation(&owner));
    pb.finish_and_clear();
    let (record, attestation) = fetched?;

    let raw_preview = if raw && record.is_some() {
        client
            .account_data(&identity)
            .await?
            .map(|data| hex::encode(&data[..data.len().min(RAW_PREVIEW_LEN)]))
    } else {
        None
    };

    let out = ProfileOut {
        network: cli.network,
        owner: owner.to_string(),
        identity: identity.to_string(),
        found: record.is_some(),
        rank_name: record.as_ref().map(IdentityRecord::rank_name),
        progress: record.as_ref().map(|r| progress(r.total_burned)),
        record,
        attestation_address: pdas.attestation.0.to_string(),
        attestation,
        explorer: Explorer::Solscan.account_url(cli.network, &identity.to_string()),
        raw_preview,
    };

    output::print(&out, || render_profile(&out))
}

fn render_profile(out: &ProfileOut) -> String {
    let Some(record) = &out.record else {
        return format!(
            "No AtomID found for {}.\nCreate one with `atomid create --keypair <FILE> --amount <ATOM>`.\n",
            out.owner
        );
    };

    let mut s = String::new();
    let _ = writeln!(s, "AtomID for {}", out.owner);
    let _ = writeln!(s, "  rank          {} ({})", record.rank_name(), record.rank);
    let _ = writeln!(s, "  total burned  {} $ATOM", format_atom_precise(record.total_burned));
    if !record.metadata.is_empty() {
        let _ = writeln!(s, "  metadata      {}", record.metadata);
    }
    let _ = writeln!(s, "  created slot  {}", record.created_at_slot);
    let _ = writeln!(s, "  updated slot  {}", record.updated_at_slot);
    if let Some(p) = &out.progress {
        match (p.next, p.remaining) {
            (Some(next), Some(rem)) => {
                let _ = writeln!(s, "  next rank     {next} in {} $ATOM", format_atom_precise(rem));
            }
            _ => {
                let _ = writeln!(s, "  next rank     none, highest rank reached");
            }
        }
    }
    match &out.attestation {
        Some(a) => {
            let _ = writeln!(
                s,
                "  attestation   {} ({}, {} $ATOM)",
                out.attestation_address,
                rank_name(a.rank as i64),
                format_atom(a.total_burned)
            );
        }
        None => {
            let _ = writeln!(s, "  attestation   not issued");
        }
    }
    let _ = writeln!(s, "  explorer      {}", out.explorer);
    if let Some(hex) = &out.raw_preview {
        let _ = writeln!(s, "  raw[..{RAW_PREVIEW_LEN}]     {hex}");
    }
    s
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckOut {
    pub owner: String,
    pub has_identity: bool,
    pub rank: Option<u8>,
    pub rank_name: Option<&'static str>,
    pub min_rank: u8,
    pub passed: bool,
}

/// Exits with status 1 when the wallet fails the gate.
pub async fn check(cli: &Cli, owner: &str, min_rank: u8) -> Result<()> {
    let required = Rank::from_index(min_rank)
        .ok_or_else(|| anyhow::anyhow!("--min-rank must be between 0 and {}", atomid_core::rank::MAX_RANK))?;
    let owner = context::owner(owner)?;
    let client = context::identity_client(cli)?;

    let pb = output::spinner("checking identity");
    let record = client.fetch_identity(&owner).await;
    pb.finish_and_clear();
    let record = record?;

    let out = CheckOut {
        owner: owner.to_string(),
        has_identity: record.is_some(),
        rank: record.as_ref().map(|r| r.rank),
        rank_name: record.as_ref().map(IdentityRecord::rank_name),
        min_rank,
        passed: record.as_ref().is_some_and(|r| meets_rank(r.rank, required.index())),
    };

    output::print(&out, || match out.rank_name {
        Some(name) if out.passed => format!("pass: {} holds {name}, required {required}\n", out.owner),
        Some(name) => format!("fail: {} holds {name}, required {required}\n", out.owner),
        None => format!("fail: {} has no AtomID\n", out.owner),
    })?;

    if !out.passed {
        std::process::exit(1);
    }
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceOut {
    pub owner: String,
    pub token_account: String,
    pub balance: u64,
}

pub async fn balance(cli: &Cli, owner: &str) -> Result<()> {
    let owner = context::owner(owner)?;
    let client = context::identity_client(cli)?;
    let token_account = client.pdas(&owner).token_account;

    let pb = output::spinner("fetching $ATOM balance");
    let balance = client.token_balance(&owner).await;
    pb.finish_and_clear();
    let balance = balance?;

    let out = BalanceOut { owner: owner.to_string(), token_account: token_account.to_string(), balance };
    output::print(&out, || format!("{} $ATOM ({})\n", format_atom_precise(out.balance), out.token_account))
}
