//! Runtime configuration loaded from the environment (and `.env`)

use std::env;

use crate::error::GatewayError;
use crate::Result;

const DEFAULT_PORT: u16 = 9000;
const DEFAULT_API_KEY: &str = "demo-key";

#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    pub port: u16,
    /// Bearer token expected on gateway and tool routes.
    pub api_key: String,
    /// Seed for the mock gateway and mock stock quotes.
    pub mock_seed: Option<u64>,
    /// Sleep for the simulated latency when the demo mode asks for it.
    pub simulate_latency: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            api_key: DEFAULT_API_KEY.to_string(),
            mock_seed: None,
            simulate_latency: true,
        }
    }
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |keys: &[&str]| keys.iter().find_map(|key| lookup(key));

        let port = match first(&["PORT", "API_PORT"]) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| GatewayError::Config(format!("invalid port '{}'", raw)))?,
            None => DEFAULT_PORT,
        };

        let api_key = first(&["GATEWAY_API_KEY", "API_KEY"])
            .filter(|key| !key.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_KEY.to_string());

        let mock_seed = match lookup("MOCK_SEED") {
            Some(raw) => Some(
                raw.trim()
                    .parse()
                    .map_err(|_| GatewayError::Config(format!("invalid MOCK_SEED '{}'", raw)))?,
            ),
            None => None,
        };

        let simulate_latency = match lookup("SIMULATE_LATENCY") {
            Some(raw) => match raw.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(GatewayError::Config(format!(
                        "invalid SIMULATE_LATENCY '{}'",
                        raw
                    )))
                }
            },
            None => true,
        };

        Ok(Self {
            port,
            api_key,
            mock_seed,
            simulate_latency,
        })
    }
}
