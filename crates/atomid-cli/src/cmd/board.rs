use std::fmt::Write as _;

use anyhow::Result;
use atomid_core::amount::{format_atom, format_atom_total};
use atomid_core::model::{truncate_address, LeaderboardEntry};

use crate::args::Cli;
use crate::{context, output};

fn render_entries(s: &mut String, entries: &[LeaderboardEntry]) {
    for e in entries {
        let _ = writeln!(
            s,
            "{:>4}  {:<11} {:>14} $ATOM  {}",
            format!("#{}", e.position),
            truncate_address(&e.owner),
            format_atom(e.total_burned),
            e.rank_name
        );
    }
}

pub async fn leaderboard(cli: &Cli, limit: usize) -> Result<()> {
    let client = context::identity_client(cli)?;
    let pb = output::spinner("scanning identity records");
    let entries = client.leaderboard(limit).await;
    pb.finish_and_clear();
    let entries = entries?;

    output::print(&entries, || {
        if entries.is_empty() {
            return "No identities yet.".to_string();
        }
        let mut s = String::new();
        render_entries(&mut s, &entries);
        s
    })
}

pub async fn hall(cli: &Cli) -> Result<()> {
    let client = context::identity_client(cli)?;
    let pb = output::spinner("scanning identity records");
    let hall = client.hall_of_flame().await;
    pb.finish_and_clear();
    let hall = hall?;

    output::print(&hall, || {
        let mut s = String::from("Hall of Flame\n");
        let _ = writeln!(s, "  identities    {}", hall.total_accounts);
        let _ = writeln!(
            s,
            "  total burned  {} $ATOM",
            format_atom_total(hall.total_burned)
        );
        let _ = writeln!(s, "  average burn  {} $ATOM\n", format_atom(hall.average_burned));
        render_entries(&mut s, &hall.top);
        s
    })
}
