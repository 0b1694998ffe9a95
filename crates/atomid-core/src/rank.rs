//! Rank names and burn thresholds.
//!
//! The program stores the authoritative rank on each identity record. The
//! helpers here only name ranks and project what a given cumulative burn
//! would reach, e.g. to preview an upgrade.

use std::fmt;

use crate::amount::ATOM_UNIT;

/// Rank names, indexed by rank.
pub const RANK_NAMES: [&str; 10] = [
    "Initiate",
    "Believer",
    "Devotee",
    "Guardian",
    "Keeper",
    "Oracle",
    "Architect",
    "Sage",
    "Ascended",
    "Eternal",
];

/// Label for any index outside the defined ranks.
pub const UNRANKED: &str = "Unranked";

/// Minimum cumulative burn per rank, in smallest units.
pub const RANK_THRESHOLDS: [u64; 10] = [
    1_000 * ATOM_UNIT,
    5_000 * ATOM_UNIT,
    10_000 * ATOM_UNIT,
    25_000 * ATOM_UNIT,
    50_000 * ATOM_UNIT,
    100_000 * ATOM_UNIT,
    250_000 * ATOM_UNIT,
    500_000 * ATOM_UNIT,
    1_000_000 * ATOM_UNIT,
    10_000_000 * ATOM_UNIT,
];

pub const MAX_RANK: u8 = (RANK_NAMES.len() - 1) as u8;

/// Name for a rank index. Total over all inputs.
pub fn rank_name(rank: i64) -> &'static str {
    usize::try_from(rank)
        .ok()
        .and_then(|i| RANK_NAMES.get(i).copied())
        .unwrap_or(UNRANKED)
}

/// A rank within `0..=MAX_RANK`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rank(u8);

impl Rank {
    pub fn from_index(index: u8) -> Option<Self> {
        (index <= MAX_RANK).then_some(Self(index))
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn name(self) -> &'static str {
        RANK_NAMES[self.0 as usize]
    }

    /// Minimum cumulative burn for this rank.
    pub fn threshold(self) -> u64 {
        RANK_THRESHOLDS[self.0 as usize]
    }

    pub fn next(self) -> Option<Self> {
        Self::from_index(self.0 + 1)
    }

    pub fn all() -> impl Iterator<Item = Rank> {
        (0..=MAX_RANK).map(Rank)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Highest rank whose threshold `total_burned` meets, if any.
pub fn rank_for_burned(total_burned: u64) -> Option<Rank> {
    let reached = RANK_THRESHOLDS
        .iter()
        .take_while(|t| total_burned >= **t)
        .count();
    reached.checked_sub(1).map(|i| Rank(i as u8))
}

/// Where a cumulative burn sits relative to the rank ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RankProgress {
    pub current: Option<Rank>,
    pub next: Option<Rank>,
    /// Smallest units still needed to reach `next`.
    pub remaining: Option<u64>,
}

pub fn progress(total_burned: u64) -> RankProgress {
    let current = rank_for_burned(total_burned);
    let next = match current {
        Some(r) => r.next(),
        None => Some(Rank(0)),
    };
    RankProgress {
        current,
        next,
        remaining: next.map(|r| r.threshold() - total_burned),
    }
}

/// Gate check used by integrators: a stored rank of at least `required`.
pub fn meets_rank(stored_rank: u8, required: u8) -> bool {
    stored_rank >= required
}
