//! Network configuration for AtomID clients.
//!
//! Every deployment of the AtomID program is described by a `NetworkConfig`:
//! the program id, the $ATOM mint, the minimum burn for a new identity, an
//! RPC endpoint and the attestation credential/schema pair.
//!
//! The core crate itself does not read environment variables. The CLI (or any
//! other caller) resolves flags and environment into an explicit config.

use std::fmt;

use crate::errors::{AtomIdError, AtomIdResult};

/// Attestation service program id. Same address on every cluster.
pub const SAS_PROGRAM_ID: &str = "22zoJMtdu4tQc2PzL74ZUT7FrwgB1Udec8DdW4yw4BdG";

/// Compute unit limit requested ahead of every create/upgrade instruction.
pub const COMPUTE_UNIT_LIMIT: u32 = 400_000;

/// Retry count handed to the RPC node when sending a transaction.
pub const SEND_MAX_RETRIES: usize = 3;

/// Supported clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Network {
    Devnet,
    Mainnet,
}

impl Network {
    /// Parse a network name. `mainnet-beta` is accepted as an alias.
    pub fn parse(s: &str) -> AtomIdResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "devnet" => Ok(Self::Devnet),
            "mainnet" | "mainnet-beta" => Ok(Self::Mainnet),
            other => Err(AtomIdError::invalid_argument(format!(
                "unsupported network: {other}"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Devnet => "devnet",
            Self::Mainnet => "mainnet",
        }
    }

    pub fn is_mainnet(&self) -> bool {
        matches!(self, Self::Mainnet)
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::Mainnet
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Network {
    type Err = AtomIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Addresses and limits for one deployment.
///
/// Addresses are kept as base58 strings; the Solana client parses them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkConfig {
    pub network: Network,
    pub program_id: String,
    pub atom_mint: String,
    /// Minimum burn for a new identity, in smallest units.
    pub min_create_burn: u64,
    pub rpc_url: String,
    pub sas_program_id: String,
    pub sas_credential: String,
    pub sas_schema: String,
}

impl NetworkConfig {
    pub fn devnet() -> Self {
        Self {
            network: Network::Devnet,
            program_id: "334fZWRf33wfDSuF1837w4mSQTgTd6r4XjgdLX8TNRjo".to_string(),
            atom_mint: "DEmAM5nQE5fpAwu3xotx5N19FG6GiDt3e3o6ysDYmaqT".to_string(),
            min_create_burn: 1_000_000_000,
            rpc_url: "https://api.devnet.solana.com".to_string(),
            sas_program_id: SAS_PROGRAM_ID.to_string(),
            sas_credential: "5Ldy7HgzHqmQvX6xQJShzzinmM6yj7bQWLSzAAbUE4Nr".to_string(),
            sas_schema: "833nW63cXf3q14uz1otraFknAeMAfw8yFwEPGmAhG8xA".to_string(),
        }
    }

    pub fn mainnet() -> Self {
        Self {
            network: Network::Mainnet,
            program_id: "rnc2fycemiEgj4YbMSuwKFpdV6nkJonojCXib3j2by6".to_string(),
            atom_mint: "6KeQaJXFHczWKjrcXdMGKP773JKQmMWDXy4446adpump".to_string(),
            min_create_burn: 1_000_000_000,
            rpc_url: "https://api.mainnet-beta.solana.com".to_string(),
            sas_program_id: SAS_PROGRAM_ID.to_string(),
            sas_credential: "FwzkkBBBcW69tGhQCuuMry8SzS5zN886Qzjw8UDa1aAN".to_string(),
            sas_schema: "J7nRQzymcR6sot5rLcRGBU5JfwVBhLVc9xNzsLnc2J4v".to_string(),
        }
    }

    pub fn for_network(network: Network) -> Self {
        match network {
            Network::Devnet => Self::devnet(),
            Network::Mainnet => Self::mainnet(),
        }
    }

    /// Replace the RPC endpoint (e.g. a private node).
    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = rpc_url.into();
        self
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::for_network(Network::default())
    }
}

/// Validate a full configuration object.
pub fn validate_config(cfg: &NetworkConfig) -> AtomIdResult<()> {
    if cfg.rpc_url.trim().is_empty() {
        return Err(AtomIdError::invalid_argument("rpc_url must not be empty"));
    }

    if cfg.min_create_burn == 0 {
        return Err(AtomIdError::invalid_argument(
            "min_create_burn must be greater than zero",
        ));
    }

    for (name, value) in [
        ("program_id", &cfg.program_id),
        ("atom_mint", &cfg.atom_mint),
        ("sas_program_id", &cfg.sas_program_id),
        ("sas_credential", &cfg.sas_credential),
        ("sas_schema", &cfg.sas_schema),
    ] {
        if !is_address(value) {
            return Err(AtomIdError::invalid_argument(format!(
                "{name} is not a valid address: {value}"
            )));
        }
    }

    Ok(())
}

/// True when `s` is a base58 string decoding to exactly 32 bytes.
pub fn is_address(s: &str) -> bool {
    matches!(bs58::decode(s).into_vec(), Ok(bytes) if bytes.len() == 32)
}
