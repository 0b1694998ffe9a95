//! Resolves global flags into explicit configs for the library crates.

use anyhow::{anyhow, Context, Result};
use atomid_core::config::NetworkConfig;
use atomid_feed::{FeedClient, FeedConfig};
use atomid_solana_client::{parse_pubkey, IdentityClient};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{read_keypair_file, Keypair};

use crate::args::Cli;

pub fn network_config(cli: &Cli) -> NetworkConfig {
    let cfg = NetworkConfig::for_network(cli.network);
    match cli.rpc_url.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
        Some(url) => cfg.with_rpc_url(url),
        None => cfg,
    }
}

pub fn identity_client(cli: &Cli) -> Result<IdentityClient> {
    let cfg = network_config(cli);
    IdentityClient::new(&cfg).with_context(|| format!("invalid {} configuration", cfg.network))
}

/// Feed config from flags/env, `None` when either half is missing.
pub fn feed_config(cli: &Cli) -> Option<FeedConfig> {
    let url = cli.feed_url.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
    let key = cli.feed_key.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
    Some(FeedConfig::new(url, key))
}

pub fn feed_client(cli: &Cli) -> Result<FeedClient> {
    let cfg = feed_config(cli).ok_or_else(|| {
        anyhow!("rewards feed not configured: set --feed-url/ATOMID_FEED_URL and --feed-key/ATOMID_FEED_KEY")
    })?;
    Ok(FeedClient::new(cfg)?)
}

pub fn owner(value: &str) -> Result<Pubkey> {
    Ok(parse_pubkey("owner", value)?)
}

pub fn keypair(path: &str) -> Result<Keypair> {
    read_keypair_file(path).map_err(|e| anyhow!("failed to read keypair {path}: {e}"))
}
