use anyhow::Result;
use atomid_core::config::validate_config;
use serde::Serialize;

use crate::args::Cli;
use crate::{context, output};

#[derive(Debug, Serialize)]
pub struct Check {
    pub name: String,
    pub ok: bool,
    pub required: bool,
    pub detail: String,
}

impl Check {
    fn new(name: &str, required: bool, result: Result<String, String>) -> Self {
        let (ok, detail) = match result {
            Ok(d) => (true, d),
            Err(d) => (false, d),
        };
        Self { name: name.to_string(), ok, required, detail }
    }
}

#[derive(Debug, Serialize)]
pub struct DoctorOut {
    pub ok: bool,
    pub network: String,
    pub rpc_url: String,
    pub checks: Vec<Check>,
}

pub async fn run(cli: &Cli) -> Result<()> {
    let cfg = context::network_config(cli);
    let mut checks = Vec::new();

    checks.push(Check::new(
        "config",
        true,
        validate_config(&cfg).map(|_| format!("{} addresses valid", cfg.network)).map_err(|e| e.to_string()),
    ));

    match context::identity_client(cli) {
        Ok(client) => {
            let pb = output::spinner(format!("probing {}", cfg.rpc_url));
            let version = client.rpc.get_version().await;
            let program = client.account_data(&client.addresses.program_id).await;
            pb.finish_and_clear();

            checks.push(Check::new(
                "rpc",
                true,
                version.map(|v| format!("solana-core {}", v.solana_core)).map_err(|e| e.to_string()),
            ));
            checks.push(Check::new(
                "program",
                true,
                match program {
                    Ok(Some(_)) => Ok(format!("{} deployed", client.addresses.program_id)),
                    Ok(None) => Err(format!("{} not found on {}", client.addresses.program_id, cfg.network)),
                    Err(e) => Err(e.to_string()),
                },
            ));
        }
        Err(e) => checks.push(Check::new("rpc", true, Err(format!("{e:#}")))),
    }

    let feed = match context::feed_config(cli) {
        Some(_) => match context::feed_client(cli) {
            Ok(client) => {
                let pb = output::spinner("probing rewards feed");
                let stats = client.fetch_stats().await;
                pb.finish_and_clear();
                stats.map(|s| match s {
                    Some(_) => "reachable".to_string(),
                    None => "reachable, no stats row yet".to_string(),
                })
                .map_err(|e| e.to_string())
            }
            Err(e) => Err(format!("{e:#}")),
        },
        None => Err("not configured (ATOMID_FEED_URL / ATOMID_FEED_KEY); needed for `rewards`".to_string()),
    };
    checks.push(Check::new("feed", false, feed));

    checks.push(Check::new(
        "solana",
        false,
        if which_ok("solana") {
            Ok("solana CLI found".to_string())
        } else {
            Err("optional (keypair management)".to_string())
        },
    ));

    let ok = checks.iter().all(|c| c.ok || !c.required);
    let out = DoctorOut { ok, network: cfg.network.to_string(), rpc_url: cfg.rpc_url.clone(), checks };
    output::print(&out, || {
        let mut s = format!("network {} via {}\n", out.network, out.rpc_url);
        for c in &out.checks {
            let mark = match (c.ok, c.required) {
                (true, _) => "ok  ",
                (false, true) => "FAIL",
                (false, false) => "warn",
            };
            s.push_str(&format!("  [{mark}] {:<8} {}\n", c.name, c.detail));
        }
        s
    })
}

fn which_ok(cmd: &str) -> bool {
    std::env::var_os("PATH").and_then(|paths| {
        for p in std::env::split_paths(&paths) {
            let full = p.join(cmd);
            if full.exists() {
                return Some(());
            }
            #[cfg(windows)]
            {
                let full_exe = p.join(format!("{cmd}.exe"));
                if full_exe.exists() {
                    return Some(());
                }
            }
        }
        None
    }).is_some()
}
