//! Mock AI gateway
//!
//! Stands in for the real gateway during demos: picks a model for the
//! route, returns a canned answer and fabricates token usage. The demo
//! modes sent by the dashboard switch on simulated latency, rate limiting
//! and model fallback. All randomness comes from one seedable generator.

mod catalog;

pub use catalog::{models_for, ollama_model, responses_for, ModelInfo, OLLAMA_MODELS};

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, info};

use crate::models::QueryCategory;

/// Seconds a rate-limited caller is told to wait.
pub const RETRY_AFTER_SECS: u64 = 30;

/// Feature flags the dashboard can enable per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoMode {
    RateLimiting,
    ModelFallback,
    RequestTracing,
    TokenUsage,
    LatencyMetrics,
}

impl DemoMode {
    pub const fn label(self) -> &'static str {
        match self {
            DemoMode::RateLimiting => "Rate Limiting",
            DemoMode::ModelFallback => "Model Fallback",
            DemoMode::RequestTracing => "Request Tracing",
            DemoMode::TokenUsage => "Token Usage",
            DemoMode::LatencyMetrics => "Latency Metrics",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayRequest {
    pub prompt: String,
    #[serde(default)]
    pub demo_modes: Vec<String>,
    /// Specific Ollama model; ignored unless it is a known local model.
    #[serde(default)]
    pub model: Option<String>,
}

impl GatewayRequest {
    pub fn has_mode(&self, mode: DemoMode) -> bool {
        self.demo_modes.iter().any(|m| m == mode.label())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: usize,
    pub output_tokens: usize,
    pub total_tokens: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GatewayResponse {
    pub response: String,
    pub model: String,
    pub provider: String,
    pub used_fallback: bool,
    pub original_model: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub usage: TokenUsage,
    pub request_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RateLimitError {
    pub error: String,
    pub message: String,
    pub retry_after: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GatewayOutcome {
    Completed(GatewayResponse),
    RateLimited(RateLimitError),
}

/// Outcome plus the latency the caller should wait before answering.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayReply {
    pub outcome: GatewayOutcome,
    pub simulated_latency: Option<Duration>,
}

/// Probabilities behind the rate limiting and fallback demo modes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationSettings {
    pub cloud_rate_limit_chance: f64,
    pub local_rate_limit_chance: f64,
    pub cloud_fallback_chance: f64,
    pub local_fallback_chance: f64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            cloud_rate_limit_chance: 0.10,
            local_rate_limit_chance: 0.03,
            cloud_fallback_chance: 0.15,
            local_fallback_chance: 0.05,
        }
    }
}

/// Rough token estimate: one token per four characters.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4
}

/// Category and local flag for a route such as `/v1/loan-local`.
pub fn resolve_route(route: &str) -> (QueryCategory, bool) {
    let query_type = route.rsplit('/').next().unwrap_or(route);
    let local = query_type.contains("local");

    let category = if query_type.contains("investment") {
        QueryCategory::Investment
    } else if query_type.contains("loan") {
        QueryCategory::Loan
    } else if query_type.contains("customer") {
        QueryCategory::Customer
    } else {
        QueryCategory::General
    };

    (category, local && category != QueryCategory::General)
}

fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

pub struct MockGateway {
    rng: Mutex<StdRng>,
    settings: SimulationSettings,
}

impl MockGateway {
    pub fn new(seed: Option<u64>) -> Self {
        Self::with_settings(seed, SimulationSettings::default())
    }

    pub fn with_settings(seed: Option<u64>, settings: SimulationSettings) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng: Mutex::new(rng),
            settings,
        }
    }

    /// Simulate one gateway call for `route`.
    pub fn respond(&self, route: &str, request: &GatewayRequest, now: DateTime<Utc>) -> GatewayReply {
        let (category, local) = resolve_route(route);
        let catalog = models_for(category, local);

        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut model = *pick(&mut *rng, catalog);
        if let Some(custom) = request.model.as_deref().and_then(ollama_model) {
            model = ModelInfo {
                name: custom,
                provider: catalog::LOCAL_PROVIDER,
                latency_range: catalog::CUSTOM_MODEL_LATENCY,
            };
        }

        let response_text = *pick(&mut *rng, responses_for(category));

        let simulated_latency = request.has_mode(DemoMode::LatencyMetrics).then(|| {
            let (min, max) = model.latency_range;
            Duration::from_secs_f64(rng.gen_range(min..max))
        });

        let input_tokens = estimate_tokens(&request.prompt);
        let output_tokens = estimate_tokens(response_text);
        let is_local = model.provider == catalog::LOCAL_PROVIDER;

        if request.has_mode(DemoMode::RateLimiting) {
            let chance = if is_local {
                self.settings.local_rate_limit_chance
            } else {
                self.settings.cloud_rate_limit_chance
            };
            if rng.gen_bool(chance.clamp(0.0, 1.0)) {
                info!(route, model = model.name, "Simulated rate limit");
                return GatewayReply {
                    outcome: GatewayOutcome::RateLimited(RateLimitError {
                        error: "rate_limit_exceeded".to_string(),
                        message: "You have exceeded your rate limit. Please try again later."
                            .to_string(),
                        retry_after: RETRY_AFTER_SECS,
                    }),
                    simulated_latency,
                };
            }
        }

        let original_model = model.name;
        let mut used_fallback = false;
        if request.has_mode(DemoMode::ModelFallback) {
            let chance = if is_local {
                self.settings.local_fallback_chance
            } else {
                self.settings.cloud_fallback_chance
            };
            if rng.gen_bool(chance.clamp(0.0, 1.0)) {
                // Only a real switch counts: a single-model route stays on its
                // model and reports no fallback, even when the draw fires.
                let options: Vec<&ModelInfo> =
                    catalog.iter().filter(|m| m.name != original_model).collect();
                if !options.is_empty() {
                    model = **pick(&mut *rng, &options);
                    used_fallback = true;
                    info!(route, from = original_model, to = model.name, "Simulated model fallback");
                }
            }
        }

        let request_id = format!("req_{}", rng.gen_range(10_000..=99_999));
        debug!(route, %request_id, model = model.name, "Mock gateway response");

        GatewayReply {
            outcome: GatewayOutcome::Completed(GatewayResponse {
                response: response_text.to_string(),
                model: model.name.to_string(),
                provider: model.provider.to_string(),
                used_fallback,
                original_model: used_fallback.then(|| original_model.to_string()),
                timestamp: now,
                usage: TokenUsage {
                    input_tokens,
                    output_tokens,
                    total_tokens: input_tokens + output_tokens,
                },
                request_id,
            }),
            simulated_latency,
        }
    }
}
