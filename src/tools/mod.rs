//! Tool trait and registry
//!
//! Each financial calculator is exposed as a tool taking a JSON object of
//! named arguments. Invalid enumerated arguments are hard failures (`Err`);
//! an unsupported currency is a soft failure carried in the output payload.

use crate::error::GatewayError;
use crate::finance::{self, InvestmentTerms, LoanTerms, MortgageOptions};
use crate::models::{CompoundFrequency, PaymentFrequency, ToolInput, ToolOutput};
use crate::Result;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const LOAN_PAYMENT: &str = "calculate_loan_payment";
pub const MORTGAGE_PAYMENT: &str = "calculate_mortgage_payment";
pub const INVESTMENT_RETURNS: &str = "calculate_investment_returns";
pub const STOCK_PRICE: &str = "fetch_stock_price";
pub const EXCHANGE_RATE: &str = "get_exchange_rate";

/// Trait for a single tool
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    async fn execute(&self, input: &ToolInput) -> Result<ToolOutput>;
}

/// Tool registry for looking up and executing tools
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Registered tool names, sorted.
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Look up `input.tool_name` and run it.
    pub async fn execute(&self, input: &ToolInput) -> Result<ToolOutput> {
        let tool = self
            .get(&input.tool_name)
            .ok_or_else(|| GatewayError::ToolNotFound(input.tool_name.clone()))?;

        debug!(tool_name = %input.tool_name, "Executing tool");

        let output = tool.execute(input).await;
        match &output {
            Ok(out) if !out.success => warn!(
                tool_name = %input.tool_name,
                error = ?out.error,
                "Tool returned an error payload"
            ),
            Err(e) => warn!(tool_name = %input.tool_name, error = %e, "Tool execution failed"),
            Ok(_) => {}
        }
        output
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Deserialize the named arguments of a tool call.
fn parse_arguments<T: DeserializeOwned>(input: &ToolInput) -> Result<T> {
    if !input.parameters.is_object() {
        return Err(GatewayError::InvalidToolInput(
            "tool_input must be a JSON object".to_string(),
        ));
    }

    serde_json::from_value(input.parameters.clone()).map_err(|e| {
        GatewayError::InvalidToolInput(format!("{}: {}", input.tool_name, e))
    })
}

fn default_payment_frequency() -> String {
    PaymentFrequency::Monthly.as_str().to_string()
}

fn default_compound_frequency() -> String {
    CompoundFrequency::Monthly.as_str().to_string()
}

fn default_data_points() -> u32 {
    1
}

fn default_amount() -> f64 {
    1.0
}

// =============================
// Loan
// =============================

#[derive(Debug, Deserialize)]
struct LoanArgs {
    principal: f64,
    annual_interest_rate: f64,
    loan_term_years: u32,
    #[serde(default = "default_payment_frequency")]
    payment_frequency: String,
}

pub struct LoanPaymentTool;

#[async_trait::async_trait]
impl Tool for LoanPaymentTool {
    fn name(&self) -> &'static str {
        LOAN_PAYMENT
    }

    fn description(&self) -> &'static str {
        "Calculate loan payment details including payment amount and an amortization preview"
    }

    async fn execute(&self, input: &ToolInput) -> Result<ToolOutput> {
        let args: LoanArgs = parse_arguments(input)?;
        let terms = LoanTerms {
            principal: args.principal,
            annual_interest_rate: args.annual_interest_rate,
            loan_term_years: args.loan_term_years,
            payment_frequency: args.payment_frequency.parse()?,
        };

        let result = finance::calculate_loan_payment(&terms)?;
        Ok(ToolOutput::ok(serde_json::to_value(result)?))
    }
}

// =============================
// Mortgage
// =============================

#[derive(Debug, Deserialize)]
struct MortgageArgs {
    home_price: f64,
    down_payment: f64,
    annual_interest_rate: f64,
    loan_term_years: u32,
    #[serde(flatten)]
    options: MortgageOptions,
}

pub struct MortgagePaymentTool;

#[async_trait::async_trait]
impl Tool for MortgagePaymentTool {
    fn name(&self) -> &'static str {
        MORTGAGE_PAYMENT
    }

    fn description(&self) -> &'static str {
        "Calculate a monthly mortgage payment with taxes, insurance and PMI"
    }

    async fn execute(&self, input: &ToolInput) -> Result<ToolOutput> {
        let args: MortgageArgs = parse_arguments(input)?;
        let result = finance::calculate_mortgage_payment(
            args.home_price,
            args.down_payment,
            args.annual_interest_rate,
            args.loan_term_years,
            &args.options,
        );
        Ok(ToolOutput::ok(serde_json::to_value(result)?))
    }
}

// =============================
// Investment
// =============================

#[derive(Debug, Deserialize)]
struct InvestmentArgs {
    initial_investment: f64,
    monthly_contribution: f64,
    annual_return_rate: f64,
    investment_period_years: u32,
    #[serde(default = "default_compound_frequency")]
    compound_frequency: String,
    #[serde(default)]
    tax_rate: Option<f64>,
}

pub struct InvestmentReturnsTool;

#[async_trait::async_trait]
impl Tool for InvestmentReturnsTool {
    fn name(&self) -> &'static str {
        INVESTMENT_RETURNS
    }

    fn description(&self) -> &'static str {
        "Project investment growth with regular contributions over time"
    }

    async fn execute(&self, input: &ToolInput) -> Result<ToolOutput> {
        let args: InvestmentArgs = parse_arguments(input)?;
        let terms = InvestmentTerms {
            initial_investment: args.initial_investment,
            monthly_contribution: args.monthly_contribution,
            annual_return_rate: args.annual_return_rate,
            investment_period_years: args.investment_period_years,
            compound_frequency: args.compound_frequency.parse()?,
            tax_rate: args.tax_rate,
        };

        let result = finance::calculate_investment_returns(&terms)?;
        Ok(ToolOutput::ok(serde_json::to_value(result)?))
    }
}

// =============================
// Stock price (mock)
// =============================

#[derive(Debug, Deserialize)]
struct StockArgs {
    ticker_symbol: String,
    #[serde(default = "default_data_points")]
    data_points: u32,
}

pub struct StockPriceTool {
    seed: Option<u64>,
}

impl StockPriceTool {
    /// `seed` makes every call return the same random draws.
    pub fn new(seed: Option<u64>) -> Self {
        Self { seed }
    }
}

#[async_trait::async_trait]
impl Tool for StockPriceTool {
    fn name(&self) -> &'static str {
        STOCK_PRICE
    }

    fn description(&self) -> &'static str {
        "Fetch (mock) stock price data for a ticker symbol"
    }

    async fn execute(&self, input: &ToolInput) -> Result<ToolOutput> {
        let args: StockArgs = parse_arguments(input)?;
        info!(ticker = %args.ticker_symbol, data_points = args.data_points, "Fetching stock data");

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let result = finance::fetch_stock_price(&args.ticker_symbol, args.data_points, &mut rng, Utc::now());

        let data = serde_json::to_value(&result)?;
        if let Some(message) = result.error_message() {
            warn!(ticker = %args.ticker_symbol, "{}", message);
            return Ok(ToolOutput::soft_error(data, message.to_string()));
        }
        Ok(ToolOutput::ok(data))
    }
}

// =============================
// Exchange rate
// =============================

#[derive(Debug, Deserialize)]
struct ExchangeArgs {
    from_currency: String,
    to_currency: String,
    #[serde(default = "default_amount")]
    amount: f64,
}

pub struct ExchangeRateTool;

#[async_trait::async_trait]
impl Tool for ExchangeRateTool {
    fn name(&self) -> &'static str {
        EXCHANGE_RATE
    }

    fn description(&self) -> &'static str {
        "Convert an amount between two supported currencies"
    }

    async fn execute(&self, input: &ToolInput) -> Result<ToolOutput> {
        let args: ExchangeArgs = parse_arguments(input)?;
        let result = finance::get_exchange_rate(&args.from_currency, &args.to_currency, args.amount);

        let mut data: Value = serde_json::to_value(&result)?;
        if let Some(message) = result.error_message() {
            return Ok(ToolOutput::soft_error(data, message.to_string()));
        }

        data["timestamp"] = json!(Utc::now().to_rfc3339());
        Ok(ToolOutput::ok(data))
    }
}

/// Registry with every financial tool; `stock_seed` pins the mock quotes.
pub fn create_registry(stock_seed: Option<u64>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    registry.register(Arc::new(LoanPaymentTool));
    registry.register(Arc::new(MortgagePaymentTool));
    registry.register(Arc::new(InvestmentReturnsTool));
    registry.register(Arc::new(StockPriceTool::new(stock_seed)));
    registry.register(Arc::new(ExchangeRateTool));

    registry
}

/// Registry with unseeded mock quotes.
pub fn create_default_registry() -> ToolRegistry {
    create_registry(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(tool_name: &str, parameters: Value) -> ToolInput {
        ToolInput {
            tool_name: tool_name.to_string(),
            parameters,
        }
    }

    #[test]
    fn test_registry_lists_all_tools() {
        let registry = create_default_registry();
        assert_eq!(
            registry.list(),
            vec![
                "calculate_investment_returns",
                "calculate_loan_payment",
                "calculate_mortgage_payment",
                "fetch_stock_price",
                "get_exchange_rate",
            ]
        );
    }

    #[tokio::test]
    async fn test_loan_tool_defaults_to_monthly() {
        let registry = create_default_registry();
        let output = registry
            .execute(&input(
                LOAN_PAYMENT,
                json!({ "principal": 12000.0, "annual_interest_rate": 0.0, "loan_term_years": 1 }),
            ))
            .await
            .unwrap();

        assert!(output.success);
        assert_eq!(output.data["payment_amount"], json!(1000.0));
        assert_eq!(output.data["payment_frequency"], json!("monthly"));
        assert_eq!(output.data["total_interest"], json!(0.0));
        assert_eq!(output.data["amortization_preview"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_loan_tool_rejects_unknown_frequency() {
        let registry = create_default_registry();
        let err = registry
            .execute(&input(
                LOAN_PAYMENT,
                json!({
                    "principal": 1000.0,
                    "annual_interest_rate": 5.0,
                    "loan_term_years": 1,
                    "payment_frequency": "daily"
                }),
            ))
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_long_terms_do_not_overflow() {
        let registry = create_default_registry();
        let err = registry
            .execute(&input(
                LOAN_PAYMENT,
                json!({
                    "principal": 1000.0,
                    "annual_interest_rate": 5.0,
                    "loan_term_years": 100_000_000,
                    "payment_frequency": "weekly"
                }),
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidArgument(_)));

        let output = registry
            .execute(&input(
                MORTGAGE_PAYMENT,
                json!({
                    "home_price": 400000.0,
                    "down_payment": 80000.0,
                    "annual_interest_rate": 6.5,
                    "loan_term_years": 400_000_000
                }),
            ))
            .await
            .unwrap();
        assert!(output.success);
        assert!(output.data["total_payment_over_term"].as_f64().unwrap().is_finite());
    }

    #[tokio::test]
    async fn test_missing_argument_is_invalid_input() {
        let registry = create_default_registry();
        let err = registry
            .execute(&input(LOAN_PAYMENT, json!({ "principal": 1000.0 })))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidToolInput(_)));

        let err = registry
            .execute(&input(LOAN_PAYMENT, json!([1000.0, 5.0])))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidToolInput(_)));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let registry = create_default_registry();
        let err = registry
            .execute(&input("google_search", json!({})))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::ToolNotFound(_)));
    }

    #[tokio::test]
    async fn test_mortgage_tool_applies_option_defaults() {
        let registry = create_default_registry();
        let output = registry
            .execute(&input(
                MORTGAGE_PAYMENT,
                json!({
                    "home_price": 100000.0,
                    "down_payment": 19000.0,
                    "annual_interest_rate": 6.0,
                    "loan_term_years": 30
                }),
            ))
            .await
            .unwrap();

        assert_eq!(output.data["monthly_pmi"], json!(35.44));
        assert_eq!(output.data["monthly_insurance"], json!(83.33));

        let output = registry
            .execute(&input(
                MORTGAGE_PAYMENT,
                json!({
                    "home_price": 100000.0,
                    "down_payment": 19000.0,
                    "annual_interest_rate": 6.0,
                    "loan_term_years": 30,
                    "include_pmi": false
                }),
            ))
            .await
            .unwrap();
        assert_eq!(output.data["monthly_pmi"], json!(0.0));
    }

    #[tokio::test]
    async fn test_investment_tool_after_tax_fields() {
        let registry = create_default_registry();
        let output = registry
            .execute(&input(
                INVESTMENT_RETURNS,
                json!({
                    "initial_investment": 1000.0,
                    "monthly_contribution": 0.0,
                    "annual_return_rate": 0.0,
                    "investment_period_years": 5,
                    "compound_frequency": "annually"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(output.data["total_future_value"], json!(1000.0));
        assert_eq!(output.data["after_tax_earnings"], Value::Null);
        assert_eq!(output.data["compound_frequency"], json!("annually"));

        let err = registry
            .execute(&input(
                INVESTMENT_RETURNS,
                json!({
                    "initial_investment": 1000.0,
                    "monthly_contribution": 0.0,
                    "annual_return_rate": 0.0,
                    "investment_period_years": 5,
                    "compound_frequency": "daily"
                }),
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_exchange_tool_soft_error() {
        let registry = create_default_registry();
        let output = registry
            .execute(&input(
                EXCHANGE_RATE,
                json!({ "from_currency": "USD", "to_currency": "XYZ" }),
            ))
            .await
            .unwrap();

        assert!(!output.success);
        assert_eq!(output.data["error"], json!(true));
        assert!(output.error.unwrap().contains("Supported currencies"));
    }

    #[tokio::test]
    async fn test_exchange_tool_defaults_amount() {
        let registry = create_default_registry();
        let output = registry
            .execute(&input(
                EXCHANGE_RATE,
                json!({ "from_currency": "usd", "to_currency": "eur" }),
            ))
            .await
            .unwrap();

        assert!(output.success);
        assert_eq!(output.data["amount"], json!(1.0));
        assert_eq!(output.data["converted_amount"], json!(0.93));
        assert!(output.data["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_seeded_stock_tool_is_reproducible() {
        let registry = create_registry(Some(11));
        let params = json!({ "ticker_symbol": "AAPL", "data_points": 3 });

        let first = registry.execute(&input(STOCK_PRICE, params.clone())).await.unwrap();
        let second = registry.execute(&input(STOCK_PRICE, params)).await.unwrap();

        assert_eq!(first.data["current_price"], json!(336.0));
        assert_eq!(first.data["change_percent"], second.data["change_percent"]);
        assert_eq!(
            first.data["historical_data"][0]["price"],
            second.data["historical_data"][0]["price"]
        );
        assert_eq!(first.data["historical_data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_stock_tool_history_out_of_range_is_soft_error() {
        let registry = create_registry(Some(11));
        let output = registry
            .execute(&input(
                STOCK_PRICE,
                json!({ "ticker_symbol": "AAPL", "data_points": 1_000_000 }),
            ))
            .await
            .unwrap();

        assert!(!output.success);
        assert_eq!(output.data["error"], json!(true));
        assert!(output.error.unwrap().starts_with("Failed to fetch stock data"));
    }
}
