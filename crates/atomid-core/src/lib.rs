//! atomid-core
//!
//! Core primitives shared by every AtomID client:
//! - network configuration (program, mint and attestation addresses)
//! - $ATOM amount parsing and formatting
//! - rank names, thresholds and progress
//! - client-side form validation
//! - identity record, attestation and leaderboard models
//! - explorer link helpers
//!
//! Nothing in this crate performs I/O. Network access lives in
//! `atomid-solana-client` and `atomid-feed`.

pub mod amount;
pub mod config;
pub mod errors;
pub mod explorer;
pub mod model;
pub mod rank;
pub mod validate;

pub use crate::errors::{AtomIdError, AtomIdResult};

/// Convenience re-exports.
pub mod prelude {
    pub use crate::amount::{format_atom, format_atom_precise, format_sol, parse_atom};
    pub use crate::config::{Network, NetworkConfig};
    pub use crate::model::{AttestationData, HallOfFlame, IdentityRecord, LeaderboardEntry};
    pub use crate::rank::{rank_name, Rank, RankProgress};
    pub use crate::validate::{validate_create_burn, validate_metadata, validate_upgrade_burn, ValidationError};
    pub use crate::{AtomIdError, AtomIdResult};
}
