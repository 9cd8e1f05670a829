use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
#[error("Unknown network: {0}")]
pub struct UnknownNetwork(pub String);

/// Networks the deploy scripts know about. The name doubles as the directory
/// that deployment records are stored under.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Network {
    Localhost,
    ArbitrumRinkeby,
    ArbitrumSepolia,
    Arbitrum,
}

impl Network {
    pub const ALL: [Network; 4] = [
        Network::Localhost,
        Network::ArbitrumRinkeby,
        Network::ArbitrumSepolia,
        Network::Arbitrum,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Network::Localhost => "localhost",
            Network::ArbitrumRinkeby => "arbitrumRinkeby",
            Network::ArbitrumSepolia => "arbitrumSepolia",
            Network::Arbitrum => "arbitrum",
        }
    }

    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Localhost => 31337,
            Network::ArbitrumRinkeby => 421611,
            Network::ArbitrumSepolia => 421614,
            Network::Arbitrum => 42161,
        }
    }

    pub fn is_live(&self) -> bool {
        !matches!(self, Network::Localhost)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Network {
    type Err = UnknownNetwork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Network::ALL
            .into_iter()
            .find(|network| network.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownNetwork(s.to_string()))
    }
}
