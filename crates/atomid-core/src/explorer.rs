//! Block explorer links for accounts and transactions.

use crate::config::Network;

const SOLSCAN: &str = "https://solscan.io";
const SOLANA_EXPLORER: &str = "https://explorer.solana.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Explorer {
    Solscan,
    SolanaExplorer,
}

impl Explorer {
    pub fn account_url(self, network: Network, address: &str) -> String {
        match self {
            Self::Solscan => format!("{SOLSCAN}/account/{address}{}", cluster_suffix(network)),
            Self::SolanaExplorer => {
                format!("{SOLANA_EXPLORER}/address/{address}{}", cluster_suffix(network))
            }
        }
    }

    pub fn tx_url(self, network: Network, signature: &str) -> String {
        match self {
            Self::Solscan => format!("{SOLSCAN}/tx/{signature}{}", cluster_suffix(network)),
            Self::SolanaExplorer => {
                format!("{SOLANA_EXPLORER}/tx/{signature}{}", cluster_suffix(network))
            }
        }
    }
}

fn cluster_suffix(network: Network) -> &'static str {
    if network.is_mainnet() {
        ""
    } else {
        "?cluster=devnet"
    }
}

/// True for a base58 string decoding to a 64-byte signature.
pub fn is_signature(s: &str) -> bool {
    matches!(bs58::decode(s).into_vec(), Ok(bytes) if bytes.len() == 64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mainnet_links_have_no_cluster() {
        assert_eq!(
            Explorer::Solscan.account_url(Network::Mainnet, "abc"),
            "https://solscan.io/account/abc"
        );
        assert_eq!(
            Explorer::SolanaExplorer.tx_url(Network::Mainnet, "sig"),
            "https://explorer.solana.com/tx/sig"
        );
    }

    #[test]
    fn devnet_links_carry_cluster() {
        assert_eq!(
            Explorer::Solscan.tx_url(Network::Devnet, "sig"),
            "https://solscan.io/tx/sig?cluster=devnet"
        );
        assert_eq!(
            Explorer::SolanaExplorer.account_url(Network::Devnet, "abc"),
            "https://explorer.solana.com/address/abc?cluster=devnet"
        );
    }

    #[test]
    fn signature_shape() {
        let sig = bs58::encode([7u8; 64]).into_string();
        assert!(is_signature(&sig));
        assert!(!is_signature(&bs58::encode([7u8; 32]).into_string()));
        assert!(!is_signature("0OIl"));
    }
}
