//! Financial Advisor Gateway
//!
//! Demo harness for routing natural-language financial queries to
//! specialist agents through an AI gateway:
//! - Deterministic financial calculators (loans, mortgages, investments,
//!   currency conversion, mock stock quotes)
//! - A tool registry exposing each calculator to the agent layer
//! - Agent profiles and keyword routing of queries to gateway routes
//! - A mock gateway with simulated latency, rate limiting and fallback

pub mod agents;
pub mod api;
pub mod config;
pub mod error;
pub mod finance;
pub mod gateway;
pub mod models;
pub mod tools;

pub use error::Result;

// Re-export common types
pub use models::*;
pub use agents::{AgentProfile, QueryRouter};
pub use config::GatewayConfig;
