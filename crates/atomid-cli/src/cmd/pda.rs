use anyhow::Result;
use atomid_solana_client::{IdentityPdas, ProgramAddresses};

use crate::args::Cli;
use crate::{context, output};

/// Derivation only; no RPC traffic.
pub fn run(cli: &Cli, owner: &str) -> Result<()> {
    let owner = context::owner(owner)?;
    let addrs = ProgramAddresses::from_config(&context::network_config(cli))?;
    let summary = IdentityPdas::derive(&addrs, &owner).summary();

    output::print(&summary, || {
        [
            ("owner", &summary.owner),
            ("identity", &summary.identity),
            ("config", &summary.config),
            ("attestation", &summary.attestation),
            ("sas authority", &summary.sas_authority),
            ("event authority", &summary.sas_event_authority),
            ("token account", &summary.token_account),
        ]
        .iter()
        .map(|(k, v)| format!("{k:<16} {v}\n"))
        .collect()
    })
}
