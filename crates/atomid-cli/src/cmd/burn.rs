use std::fmt::Write as _;

use anyhow::{bail, Result};
use atomid_core::amount::format_atom_precise;
use atomid_core::config::Network;
use atomid_core::explorer::Explorer;
use atomid_core::model::IdentityRecord;
use atomid_solana_client::{BurnRequest, IxSummary, SendOutcome};
use serde::Serialize;
use solana_sdk::signature::Signer;
use tracing::info;

use crate::args::{BurnArgs, Cli};
use crate::{context, output};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Upgrade,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DryRunOut {
    pub action: Action,
    pub network: Network,
    pub user: String,
    pub identity: String,
    pub burn_amount: u64,
    pub metadata: Option<String>,
    pub instructions: Vec<IxSummary>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnOut {
    pub action: Action,
    pub network: Network,
    pub user: String,
    pub identity: String,
    pub burn_amount: u64,
    pub outcome: SendOutcome,
    pub explorer: Option<String>,
    pub record: Option<IdentityRecord>,
}

pub async fn run(cli: &Cli, args: &BurnArgs, action: Action) -> Result<()> {
    let client = context::identity_client(cli)?;
    let payer = context::keypair(&args.keypair)?;
    let user = payer.pubkey();

    let req = match action {
        Action::Create => BurnRequest::for_create(&args.amount, &args.metadata, client.addresses.min_create_burn)?,
        Action::Upgrade => BurnRequest::for_upgrade(&args.amount, &args.metadata)?,
    };
    let plan = match action {
        Action::Create => client.plan_create(&user, &req)?,
        Action::Upgrade => client.plan_upgrade(&user, &req)?,
    };
    let identity = client.derive_identity(&user).0.to_string();

    if args.dry_run {
        let out = DryRunOut {
            action,
            network: cli.network,
            user: user.to_string(),
            identity,
            burn_amount: req.burn_amount,
            metadata: req.metadata.clone(),
            instructions: plan.summary(),
        };
        return output::print(&out, || {
            let mut s = format!(
                "dry run: {:?} burning {} $ATOM from {} on {}\n",
                out.action,
                format_atom_precise(out.burn_amount),
                out.user,
                out.network
            );
            let _ = writeln!(s, "identity: {}", out.identity);
            let _ = writeln!(s, "plan: {}", plan.describe());
            for (i, ix) in out.instructions.iter().enumerate() {
                let _ = writeln!(s, "  [{i}] {} ({} accounts, {} data bytes)", ix.program_id, ix.accounts.len(), ix.data_len);
            }
            s
        });
    }

    let pb = output::spinner("checking $ATOM balance");
    let balance = client.token_balance(&user).await;
    pb.finish_and_clear();
    let balance = balance?;
    if balance < req.burn_amount {
        bail!(
            "insufficient $ATOM balance: have {}, need {}",
            format_atom_precise(balance),
            format_atom_precise(req.burn_amount)
        );
    }

    info!(%user, ?action, burn = req.burn_amount, "submitting burn");
    let pb = output::spinner("submitting burn and waiting for confirmation");
    let sent = match action {
        Action::Create => client.create_identity(&payer, &req).await,
        Action::Upgrade => client.upgrade_identity(&payer, &req).await,
    };
    pb.finish_and_clear();
    let outcome = sent?;
    let record = client.fetch_identity(&user).await?;

    let out = BurnOut {
        action,
        network: cli.network,
        user: user.to_string(),
        identity,
        burn_amount: req.burn_amount,
        explorer: outcome.signature().map(|sig| Explorer::Solscan.tx_url(cli.network, sig)),
        outcome,
        record,
    };
    output::print(&out, || {
        let verb = match out.action {
            Action::Create => "created",
            Action::Upgrade => "upgraded",
        };
        let mut s = format!("AtomID {verb}: burned {} $ATOM\n", format_atom_precise(out.burn_amount));
        match &out.outcome {
            SendOutcome::Submitted { signature } => {
                let _ = writeln!(s, "signature: {signature}");
            }
            SendOutcome::AlreadyProcessed => s.push_str("transaction was already processed\n"),
        }
        if let Some(url) = &out.explorer {
            let _ = writeln!(s, "explorer: {url}");
        }
        if let Some(r) = &out.record {
            let _ = writeln!(s, "rank: {} | total burned: {} $ATOM", r.rank_name(), format_atom_precise(r.total_burned));
        }
        s
    })
}
