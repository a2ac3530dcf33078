//! Gateway Configuration
//!
//! Network and contract settings. Read from an env-style source once,
//! validated, and passed into the gateway as an immutable value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const NETWORK_KEY: &str = "APTOS_NETWORK";
pub const CONTRACT_ADDRESS_KEY: &str = "CONTRACT_ADDRESS";
pub const NODE_URL_KEY: &str = "APTOS_NODE_URL";

/// Recognized ledger networks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
    Devnet,
    Local,
    /// Any other node; requires an explicit node URL
    Custom,
}

impl Network {
    pub const ALL: [Network; 5] = [
        Network::Mainnet,
        Network::Testnet,
        Network::Devnet,
        Network::Local,
        Network::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Devnet => "devnet",
            Network::Local => "local",
            Network::Custom => "custom",
        }
    }

    /// Public fullnode REST endpoint for the network, if it has one
    pub fn default_node_url(&self) -> Option<&'static str> {
        match self {
            Network::Mainnet => Some("https://fullnode.mainnet.aptoslabs.com/v1"),
            Network::Testnet => Some("https://fullnode.testnet.aptoslabs.com/v1"),
            Network::Devnet => Some("https://fullnode.devnet.aptoslabs.com/v1"),
            Network::Local => Some("http://127.0.0.1:8080/v1"),
            Network::Custom => None,
        }
    }

    fn allowed_values() -> String {
        Self::ALL.iter().map(Network::as_str).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|network| network.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConfigError::InvalidNetwork {
                value: s.to_string(),
                allowed: Self::allowed_values(),
            })
    }
}

/// Validated settings for one deployed todo contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    network: Network,
    contract_address: String,
    node_url: String,
}

impl GatewayConfig {
    /// Build a config for `network`, using the network's public node.
    pub fn new(network: Network, contract_address: &str) -> Result<Self, ConfigError> {
        let contract_address = contract_address.trim();
        if contract_address.is_empty() {
            return Err(ConfigError::MissingSetting { key: CONTRACT_ADDRESS_KEY });
        }
        let node_url = network
            .default_node_url()
            .ok_or(ConfigError::MissingSetting { key: NODE_URL_KEY })?;

        Ok(Self {
            network,
            contract_address: contract_address.to_string(),
            node_url: node_url.to_string(),
        })
    }

    /// Point the config at a specific node REST endpoint.
    pub fn with_node_url(mut self, node_url: &str) -> Result<Self, ConfigError> {
        self.node_url = normalize_node_url(node_url)?;
        Ok(self)
    }

    /// Read settings through `lookup`. Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let network: Network = read(NETWORK_KEY)
            .ok_or(ConfigError::MissingSetting { key: NETWORK_KEY })?
            .parse()?;
        let contract_address = read(CONTRACT_ADDRESS_KEY)
            .ok_or(ConfigError::MissingSetting { key: CONTRACT_ADDRESS_KEY })?;

        match read(NODE_URL_KEY) {
            Some(node_url) => {
                let node_url = normalize_node_url(&node_url)?;
                Ok(Self {
                    network,
                    contract_address: contract_address.trim().to_string(),
                    node_url,
                })
            }
            None => Self::new(network, &contract_address),
        }
    }

    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn contract_address(&self) -> &str {
        &self.contract_address
    }

    pub fn node_url(&self) -> &str {
        &self.node_url
    }
}

fn normalize_node_url(node_url: &str) -> Result<String, ConfigError> {
    let trimmed = node_url.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidNodeUrl {
            key: NODE_URL_KEY,
            value: node_url.to_string(),
        });
    }
    Ok(trimmed.to_string())
}
