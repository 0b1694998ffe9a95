use std::io::Write;
use std::time::Duration;

use anyhow::{bail, Result};
use atomid_core::amount::format_sol;
use atomid_core::config::Network;
use atomid_core::explorer::Explorer;
use atomid_feed::format::format_timestamp;
use atomid_feed::{FeedSnapshot, LogLevel, Poller};
use termcolor::Color;
use tracing::warn;

use crate::args::Cli;
use crate::{context, output};

pub async fn run(cli: &Cli, watch: bool, interval: u64, limit: usize) -> Result<()> {
    let client = context::feed_client(cli)?;
    let network = cli.network;

    if !watch {
        let pb = output::spinner("fetching rewards feed");
        let snapshot = client.snapshot(limit).await;
        pb.finish_and_clear();
        return render(&snapshot?, network);
    }

    if interval == 0 {
        bail!("--interval must be at least 1 second");
    }
    let poller = Poller::new(client)
        .with_interval(Duration::from_secs(interval))
        .with_log_limit(limit);
    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    poller
        .run(
            |snapshot| {
                if let Err(e) = render(snapshot, network) {
                    warn!(error = %e, "failed to render snapshot");
                }
            },
            shutdown,
        )
        .await;
    Ok(())
}

fn level_color(level: &LogLevel) -> Color {
    match level {
        LogLevel::Success => Color::Green,
        LogLevel::Error => Color::Red,
        LogLevel::Warning => Color::Yellow,
        LogLevel::Info | LogLevel::Other(_) => Color::Cyan,
    }
}

fn render(snapshot: &FeedSnapshot, network: Network) -> Result<()> {
    if output::is_json() {
        return output::print(snapshot, String::new);
    }

    let mut out = output::stdout();
    writeln!(out, "Rewards collector")?;
    match &snapshot.stats {
        Some(stats) => {
            writeln!(out, "  total paid    {} SOL", format_sol(stats.total_sol_paid))?;
            writeln!(
                out,
                "  last payout   {} SOL ({})",
                format_sol(stats.last_payout_amount),
                format_timestamp(stats.last_payout_at)
            )?;
        }
        None => writeln!(out, "  no payouts recorded yet")?,
    }
    writeln!(
        out,
        "  shown logs    {} ({} SOL paid)\n",
        snapshot.logs.len(),
        format_sol(snapshot.paid_in_window())
    )?;

    if snapshot.logs.is_empty() {
        writeln!(out, "No activity yet.")?;
    }
    for log in &snapshot.logs {
        output::write_colored(&mut out, level_color(&log.level), log.level.glyph())?;
        write!(out, " {}  {}", format_timestamp(Some(log.timestamp)), log.message)?;
        if let Some(sol) = log.sol_amount {
            write!(out, "  {} SOL", format_sol(sol))?;
        }
        if let Some(sig) = log.signature() {
            write!(out, "  {}", Explorer::Solscan.tx_url(network, sig))?;
        }
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

