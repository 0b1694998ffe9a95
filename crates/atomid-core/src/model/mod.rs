//! AtomID data models.
//!
//! These are the decoded, chain-agnostic views of what the program stores:
//! identity records, attestation payloads, and the aggregates built over all
//! records (leaderboard, Hall of Flame). Decoding from raw account bytes
//! happens in `atomid-solana-client`; this module holds plain data plus the
//! small amount of policy shared by every client.

use crate::amount::format_atom;
use crate::errors::{AtomIdError, AtomIdResult};
use crate::rank::rank_name;

/// Entries shown on the leaderboard by default.
pub const LEADERBOARD_LIMIT: usize = 100;

/// Entries shown in the Hall of Flame.
pub const HALL_OF_FLAME_SIZE: usize = 10;

/// A user's identity record as stored by the program.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct IdentityRecord {
    /// Owner wallet, base58.
    pub owner: String,
    /// Cumulative burn in smallest units.
    pub total_burned: u64,
    pub rank: u8,
    pub metadata: String,
    pub created_at_slot: u64,
    pub updated_at_slot: u64,
    pub bump: u8,
}

impl IdentityRecord {
    pub fn rank_name(&self) -> &'static str {
        rank_name(self.rank as i64)
    }

    pub fn formatted_burned(&self) -> String {
        format_atom(self.total_burned)
    }
}

/// Attestation payload written by the program: rank, total burned and
/// creation slot, little-endian, 17 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AttestationData {
    pub rank: u8,
    pub total_burned: u64,
    pub created_at_slot: u64,
}

impl AttestationData {
    pub const LEN: usize = 17;

    pub fn from_bytes(bytes: &[u8]) -> AtomIdResult<Self> {
        if bytes.len() != Self::LEN {
            return Err(AtomIdError::decode(format!(
                "attestation data must be {} bytes, got {}",
                Self::LEN,
                bytes.len()
            )));
        }
        let mut burned = [0u8; 8];
        burned.copy_from_slice(&bytes[1..9]);
        let mut slot = [0u8; 8];
        slot.copy_from_slice(&bytes[9..17]);
        Ok(Self {
            rank: bytes[0],
            total_burned: u64::from_le_bytes(burned),
            created_at_slot: u64::from_le_bytes(slot),
        })
    }

    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let mut out = [0u8; Self::LEN];
        out[0] = self.rank;
        out[1..9].copy_from_slice(&self.total_burned.to_le_bytes());
        out[9..17].copy_from_slice(&self.created_at_slot.to_le_bytes());
        out
    }
}

impl From<&IdentityRecord> for AttestationData {
    fn from(record: &IdentityRecord) -> Self {
        Self {
            rank: record.rank,
            total_burned: record.total_burned,
            created_at_slot: record.created_at_slot,
        }
    }
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct LeaderboardEntry {
    /// 1-based position.
    pub position: usize,
    pub owner: String,
    pub total_burned: u64,
    pub rank: u8,
    pub rank_name: &'static str,
    pub metadata: String,
}

/// Sort records by cumulative burn (descending) and keep the first `limit`.
///
/// Ties are ordered by owner so the output is stable across RPC nodes, which
/// return program accounts in no particular order.
pub fn leaderboard(mut records: Vec<IdentityRecord>, limit: usize) -> Vec<LeaderboardEntry> {
    sort_by_burn(&mut records);
    records
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, r)| LeaderboardEntry {
            position: i + 1,
            rank_name: r.rank_name(),
            owner: r.owner,
            total_burned: r.total_burned,
            rank: r.rank,
            metadata: r.metadata,
        })
        .collect()
}

/// Aggregate burn statistics plus the top burners.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct HallOfFlame {
    pub top: Vec<LeaderboardEntry>,
    pub total_burned: u128,
    pub total_accounts: usize,
    /// Floor of `total_burned / total_accounts`; zero with no accounts.
    pub average_burned: u64,
}

impl HallOfFlame {
    pub fn from_records(records: Vec<IdentityRecord>) -> Self {
        let total_accounts = records.len();
        let total_burned: u128 = records.iter().map(|r| r.total_burned as u128).sum();
        let average_burned = if total_accounts == 0 {
            0
        } else {
            (total_burned / total_accounts as u128) as u64
        };
        Self {
            top: leaderboard(records, HALL_OF_FLAME_SIZE),
            total_burned,
            total_accounts,
            average_burned,
        }
    }
}

fn sort_by_burn(records: &mut [IdentityRecord]) {
    records.sort_by(|a, b| {
        b.total_burned
            .cmp(&a.total_burned)
            .then_with(|| a.owner.cmp(&b.owner))
    });
}

/// `"AbCd...WxYz"`: first four and last four characters.
pub fn truncate_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 8 {
        return address.to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::ATOM_UNIT;

    fn record(owner: &str, burned: u64, rank: u8) -> IdentityRecord {
        IdentityRecord {
            owner: owner.to_string(),
            total_burned: burned * ATOM_UNIT,
            rank,
            metadata: String::new(),
            created_at_slot: 299_144_100,
            updated_at_slot: 299_144_100,
            bump: 255,
        }
    }

    #[test]
    fn leaderboard_sorted_and_limited() {
        let rows = leaderboard(
            vec![record("b", 5_000, 1), record("c", 50_000, 4), record("a", 5_000, 1)],
            2,
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].owner, "c");
        assert_eq!(rows[0].position, 1);
        assert_eq!(rows[0].rank_name, "Keeper");
        // tie broken by owner
        assert_eq!(rows[1].owner, "a");
    }

    #[test]
    fn hall_of_flame_totals() {
        let records: Vec<_> = (0..12).map(|i| record(&format!("o{i:02}"), 1_000 + i, 0)).collect();
        let hall = HallOfFlame::from_records(records);
        assert_eq!(hall.top.len(), HALL_OF_FLAME_SIZE);
        assert_eq!(hall.total_accounts, 12);
        assert_eq!(hall.total_burned, (12_000 + 66) as u128 * ATOM_UNIT as u128);
        assert_eq!(hall.average_burned, 1_005_500_000);
        assert_eq!(hall.top[0].owner, "o11");
    }

    #[test]
    fn empty_hall_has_zero_average() {
        let hall = HallOfFlame::from_records(vec![]);
        assert_eq!(hall.average_burned, 0);
        assert!(hall.top.is_empty());
    }

    #[test]
    fn attestation_layout() {
        let data = AttestationData { rank: 3, total_burned: 25_000 * ATOM_UNIT, created_at_slot: 299_144_100 };
        let bytes = data.to_bytes();
        assert_eq!(bytes[0], 3);
        assert_eq!(&bytes[9..17], &299_144_100u64.to_le_bytes());
        assert_eq!(AttestationData::from_bytes(&bytes).unwrap(), data);
        assert!(AttestationData::from_bytes(&bytes[..16]).is_err());
    }

    #[test]
    fn record_display_helpers() {
        let r = record("x", 25_000, 3);
        assert_eq!(r.rank_name(), "Guardian");
        assert_eq!(r.formatted_burned(), "25,000");
        assert_eq!(AttestationData::from(&r).rank, 3);
    }

    #[test]
    fn truncates_addresses() {
        assert_eq!(
            truncate_address("rnc2fycemiEgj4YbMSuwKFpdV6nkJonojCXib3j2by6"),
            "rnc2...2by6"
        );
        assert_eq!(truncate_address("short"), "short");
    }
}
