use financial_advisor_gateway::{
    agents,
    models::ToolInput,
    tools::create_registry,
    GatewayConfig,
};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Run one tool: `toolbox <tool_name> '<json arguments>'`.
/// Without arguments, runs a sample call of every tool.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    let config = GatewayConfig::from_env()?;
    let registry = create_registry(config.mock_seed);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let calls = match args.as_slice() {
        [tool_name, parameters] => vec![ToolInput {
            tool_name: tool_name.clone(),
            parameters: serde_json::from_str(parameters)?,
        }],
        [] => sample_calls(),
        _ => {
            eprintln!("usage: toolbox [<tool_name> '<json arguments>']");
            eprintln!("tools: {}", registry.list().join(", "));
            std::process::exit(2);
        }
    };

    for call in calls {
        let owner = agents::all_agents()
            .into_iter()
            .find(|agent| agent.tools.iter().any(|tool| *tool == call.tool_name))
            .map(|agent| agent.name)
            .unwrap_or("none");
        info!(tool_name = %call.tool_name, agent = owner, "Running tool");

        match registry.execute(&call).await {
            Ok(output) => {
                println!("\n=== {} ===", call.tool_name);
                if let Some(error) = &output.error {
                    println!("Error: {}", error);
                }
                println!("{}", serde_json::to_string_pretty(&output.data)?);
            }
            Err(e) => {
                eprintln!("\n=== {} ===", call.tool_name);
                eprintln!("Rejected: {}", e);
            }
        }
    }

    Ok(())
}

fn sample_calls() -> Vec<ToolInput> {
    let call = |tool_name: &str, parameters| ToolInput {
        tool_name: tool_name.to_string(),
        parameters,
    };

    vec![
        call(
            "calculate_loan_payment",
            json!({
                "principal": 25000.0,
                "annual_interest_rate": 4.5,
                "loan_term_years": 5,
                "payment_frequency": "monthly"
            }),
        ),
        call(
            "calculate_mortgage_payment",
            json!({
                "home_price": 400000.0,
                "down_payment": 60000.0,
                "annual_interest_rate": 6.5,
                "loan_term_years": 30
            }),
        ),
        call(
            "calculate_investment_returns",
            json!({
                "initial_investment": 10000.0,
                "monthly_contribution": 500.0,
                "annual_return_rate": 7.0,
                "investment_period_years": 20,
                "compound_frequency": "monthly",
                "tax_rate": 15.0
            }),
        ),
        call("fetch_stock_price", json!({ "ticker_symbol": "AAPL", "data_points": 5 })),
        call(
            "get_exchange_rate",
            json!({ "from_currency": "USD", "to_currency": "EUR", "amount": 100.0 }),
        ),
    ]
}
