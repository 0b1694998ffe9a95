use atomid_core::config::Network;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(name = "atomid", version, about = "AtomID CLI: burn $ATOM for a permanent on-chain identity")]
pub struct Cli {
    /// Emit JSON output on stdout.
    #[arg(long, global = true)]
    pub json: bool,

    /// Cluster to talk to: devnet|mainnet
    #[arg(long, global = true, env = "ATOMID_NETWORK", default_value = "mainnet")]
    pub network: Network,

    /// Override the cluster's default RPC endpoint.
    #[arg(long, global = true, env = "ATOMID_RPC_URL")]
    pub rpc_url: Option<String>,

    /// Base URL of the rewards feed.
    #[arg(long, global = true, env = "ATOMID_FEED_URL")]
    pub feed_url: Option<String>,

    /// Anon key for the rewards feed.
    #[arg(long, global = true, env = "ATOMID_FEED_KEY", hide_env_values = true)]
    pub feed_key: Option<String>,

    /// Log filter when ATOMID_LOG is unset (e.g. info, atomid_solana_client=debug).
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct BurnArgs {
    /// Keypair file of the wallet that burns and signs.
    #[arg(long, env = "ATOMID_KEYPAIR")]
    pub keypair: String,

    /// Amount of $ATOM to burn, e.g. 1000 or 2500.5
    #[arg(long)]
    pub amount: String,

    /// Optional metadata stored on the record (max 200 characters).
    #[arg(long, default_value = "")]
    pub metadata: String,

    /// Validate and print the transaction without sending it.
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List rank names and thresholds.
    Ranks,

    /// Show which rank a cumulative burn reaches.
    Rank {
        /// Cumulative burn in $ATOM.
        total: String,
    },

    /// Derive every address associated with a wallet.
    Pda { owner: String },

    /// Show a wallet's identity record and attestation.
    Profile {
        owner: String,
        /// Include a hex preview of the raw record.
        #[arg(long)]
        raw: bool,
    },

    /// Check whether a wallet holds an identity at or above a rank.
    Check {
        owner: String,
        #[arg(long, default_value_t = 0)]
        min_rank: u8,
    },

    /// Show a wallet's $ATOM balance.
    Balance { owner: String },

    /// Top identities by total burned.
    Leaderboard {
        #[arg(long, default_value_t = atomid_core::model::LEADERBOARD_LIMIT)]
        limit: usize,
    },

    /// Top ten burners and protocol totals.
    Hall,

    /// Burn $ATOM to create a new identity.
    Create(BurnArgs),

    /// Burn more $ATOM into an existing identity.
    Upgrade(BurnArgs),

    /// Show the rewards collector's stats and recent logs.
    Rewards {
        /// Keep refreshing until interrupted.
        #[arg(long)]
        watch: bool,
        /// Refresh interval in seconds.
        #[arg(long, default_value_t = 60)]
        interval: u64,
        /// Number of log rows to show.
        #[arg(long, default_value_t = atomid_feed::config::DEFAULT_LOG_LIMIT)]
        limit: usize,
    },

    /// Run environment and connectivity checks.
    Doctor,
}
