//! Known EVM networks addressed by their x402 v1 network names.
//!
//! V1 requirements name chains with human-readable strings such as
//! `"base-sepolia"`; the EIP-712 domain needs the numeric EIP-155 chain id.

/// EIP-155 chain identifier.
pub type ChainId = u64;

/// Base Mainnet chain ID.
pub const BASE_MAINNET: ChainId = 8453;

/// Base Sepolia (testnet) chain ID.
pub const BASE_SEPOLIA: ChainId = 84532;

/// Avalanche C-Chain chain ID.
pub const AVALANCHE_MAINNET: ChainId = 43114;

/// Avalanche Fuji (testnet) chain ID.
pub const AVALANCHE_FUJI: ChainId = 43113;

/// Polygon Mainnet chain ID.
pub const POLYGON_MAINNET: ChainId = 137;

/// Polygon Amoy (testnet) chain ID.
pub const POLYGON_AMOY: ChainId = 80002;

/// A network name paired with its chain id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownNetwork {
    /// The x402 v1 network name.
    pub name: &'static str,
    /// The EIP-155 chain id.
    pub chain_id: ChainId,
}

/// Every network the exact EVM payer can sign for.
pub const KNOWN_NETWORKS: &[KnownNetwork] = &[
    KnownNetwork {
        name: "base",
        chain_id: BASE_MAINNET,
    },
    KnownNetwork {
        name: "base-sepolia",
        chain_id: BASE_SEPOLIA,
    },
    KnownNetwork {
        name: "avalanche",
        chain_id: AVALANCHE_MAINNET,
    },
    KnownNetwork {
        name: "avalanche-fuji",
        chain_id: AVALANCHE_FUJI,
    },
    KnownNetwork {
        name: "polygon",
        chain_id: POLYGON_MAINNET,
    },
    KnownNetwork {
        name: "polygon-amoy",
        chain_id: POLYGON_AMOY,
    },
];

/// Resolves a v1 network name to its chain id.
///
/// Matching is exact and case-sensitive.
#[must_use]
pub fn chain_id_by_network_name(name: &str) -> Option<ChainId> {
    KNOWN_NETWORKS
        .iter()
        .find(|n| n.name == name)
        .map(|n| n.chain_id)
}

/// Resolves a chain id back to its v1 network name.
#[must_use]
pub fn network_name_by_chain_id(chain_id: ChainId) -> Option<&'static str> {
    KNOWN_NETWORKS
        .iter()
        .find(|n| n.chain_id == chain_id)
        .map(|n| n.name)
}
