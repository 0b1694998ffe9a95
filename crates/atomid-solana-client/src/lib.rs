//! atomid-solana-client
//!
//! A small, focused Rust client for the AtomID on-chain program.
//!
//! It includes:
//! - seed constants and derived-address helpers
//! - identity record and attestation account decoding
//! - create/upgrade instruction builders with the compute-budget prefix
//! - an async RPC client for reads and for submitting burns
//!
//! The program itself is external; program and attestation addresses come
//! from `atomid_core::config::NetworkConfig`.

pub mod account;
pub mod client;
pub mod constants;
pub mod error;
pub mod instructions;
pub mod pda;
pub mod tx;

pub use account::*;
pub use client::*;
pub use constants::*;
pub use error::{ClientError, ClientResult};
pub use instructions::*;
pub use pda::*;
pub use tx::*;
