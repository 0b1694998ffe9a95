use std::fmt::Write as _;

use anyhow::Result;
use atomid_core::amount::{format_atom, format_atom_precise, parse_atom};
use atomid_core::rank::{progress, Rank, UNRANKED};
use serde::Serialize;

use crate::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankRow {
    pub rank: u8,
    pub name: &'static str,
    pub threshold: u64,
}

pub fn list() -> Result<()> {
    let rows: Vec<RankRow> = Rank::all()
        .map(|r| RankRow { rank: r.index(), name: r.name(), threshold: r.threshold() })
        .collect();

    output::print(&rows, || {
        let mut s = String::new();
        for r in &rows {
            let _ = writeln!(s, "{:>2}  {:<10} {:>12} $ATOM", r.rank, r.name, format_atom(r.threshold));
        }
        s
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionOut {
    pub total_burned: u64,
    pub rank: Option<u8>,
    pub rank_name: &'static str,
    pub next_rank: Option<u8>,
    pub next_rank_name: Option<&'static str>,
    pub remaining: Option<u64>,
}

pub fn project(total: &str) -> Result<()> {
    let total_burned = parse_atom(total)?;
    let p = progress(total_burned);
    let out = ProjectionOut {
        total_burned,
        rank: p.current.map(Rank::index),
        rank_name: p.current.map_or(UNRANKED, Rank::name),
        next_rank: p.next.map(Rank::index),
        next_rank_name: p.next.map(Rank::name),
        remaining: p.remaining,
    };

    output::print(&out, || {
        let mut s = format!("{} $ATOM -> {}\n", format_atom_precise(out.total_burned), out.rank_name);
        match (out.next_rank_name, out.remaining) {
            (Some(next), Some(rem)) => {
                let _ = writeln!(s, "next: {next} in {} $ATOM", format_atom_precise(rem));
            }
            _ => s.push_str("highest rank reached\n"),
        }
        s
    })
}
