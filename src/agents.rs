//! Specialist agent profiles and query routing
//!
//! The coordinator hands each user query to one of three specialists, or
//! answers it itself as a general query. Routing is a keyword score over
//! the lower-cased query text.

use serde::Serialize;

use crate::models::{Deployment, QueryCategory};
use crate::tools::{self, ToolRegistry};

/// Tools that live outside this crate (resolved by the agent runtime).
pub const WEB_SEARCH: &str = "google_search";

const AGENT_MODEL: &str = "gemini-2.0-pro";

const EDUCATIONAL_DISCLAIMER: &str =
    "Always clarify that you're providing educational information, not financial advice.";

#[derive(Debug, Clone, Serialize)]
pub struct AgentProfile {
    pub name: &'static str,
    pub model: &'static str,
    pub description: &'static str,
    pub instruction: String,
    pub category: QueryCategory,
    pub tools: Vec<&'static str>,
}

impl AgentProfile {
    /// Tools this agent uses that the registry can serve locally.
    pub fn local_tools<'a>(&'a self, registry: &ToolRegistry) -> Vec<&'a str> {
        self.tools
            .iter()
            .copied()
            .filter(|name| registry.contains(name))
            .collect()
    }
}

pub fn investment_advisor() -> AgentProfile {
    AgentProfile {
        name: "investment_advisor",
        model: AGENT_MODEL,
        description: "Provides investment advice and portfolio management guidance",
        instruction: format!(
            "You are a Financial Investment Advisor. Provide investment guidance based on \
             user goals and risk tolerance, analyze portfolio allocations, explain market \
             concepts, and use the financial tools to project investment returns and look \
             up stock data. Be professional, thorough, and consider long-term horizons. {}",
            EDUCATIONAL_DISCLAIMER
        ),
        category: QueryCategory::Investment,
        tools: vec![tools::INVESTMENT_RETURNS, tools::STOCK_PRICE, WEB_SEARCH],
    }
}

pub fn loan_specialist() -> AgentProfile {
    AgentProfile {
        name: "loan_specialist",
        model: AGENT_MODEL,
        description: "Provides loan calculations and financing information",
        instruction: format!(
            "You are a Loan Specialist. Calculate loan payments and amortization schedules, \
             explain financing options, provide mortgage calculations and help compare loan \
             offers. Be concise, accurate, and educational. {}",
            EDUCATIONAL_DISCLAIMER
        ),
        category: QueryCategory::Loan,
        tools: vec![tools::LOAN_PAYMENT, tools::MORTGAGE_PAYMENT, tools::EXCHANGE_RATE],
    }
}

pub fn customer_service() -> AgentProfile {
    AgentProfile {
        name: "customer_service",
        model: AGENT_MODEL,
        description: "Assists with general banking questions and customer service",
        instruction: "You are a Financial Customer Service Representative. Answer general \
                      banking questions, explain account features and typical procedures, \
                      and direct users to the right resources. Be empathetic and clear, and \
                      avoid jargon. Never request or provide access to real accounts."
            .to_string(),
        category: QueryCategory::Customer,
        tools: vec![WEB_SEARCH],
    }
}

/// Root agent that routes to the specialists and handles general queries.
pub fn financial_coordinator() -> AgentProfile {
    AgentProfile {
        name: "financial_coordinator",
        model: AGENT_MODEL,
        description: "Coordinates financial advisor services by routing queries to specialized agents",
        instruction: "You are a Financial Services Coordinator. Understand the user's \
                      financial question, route it to the investment, loan or customer \
                      service agent when needed, and handle simple queries yourself."
            .to_string(),
        category: QueryCategory::General,
        tools: vec![],
    }
}

/// All profiles, specialists first.
pub fn all_agents() -> Vec<AgentProfile> {
    vec![
        investment_advisor(),
        loan_specialist(),
        customer_service(),
        financial_coordinator(),
    ]
}

/// Profile that answers queries of `category`.
pub fn agent_for(category: QueryCategory) -> AgentProfile {
    match category {
        QueryCategory::Investment => investment_advisor(),
        QueryCategory::Loan => loan_specialist(),
        QueryCategory::Customer => customer_service(),
        QueryCategory::General => financial_coordinator(),
    }
}

/// Gateway route serving `category`. General queries have no local variant.
pub fn gateway_route(category: QueryCategory, deployment: Deployment) -> &'static str {
    match (category, deployment) {
        (QueryCategory::Investment, Deployment::Cloud) => "/v1/investment",
        (QueryCategory::Investment, Deployment::Local) => "/v1/investment-local",
        (QueryCategory::Loan, Deployment::Cloud) => "/v1/loan",
        (QueryCategory::Loan, Deployment::Local) => "/v1/loan-local",
        (QueryCategory::Customer, Deployment::Cloud) => "/v1/customer",
        (QueryCategory::Customer, Deployment::Local) => "/v1/customer-local",
        (QueryCategory::General, _) => "/v1/general",
    }
}

/// Static keyword lists, zero allocation
const INVESTMENT_KEYWORDS: &[&str] = &[
    "invest", "portfolio", "stock", "share", "market", "fund", "etf", "bond",
    "dividend", "retire", "401k", "ira", "allocation", "diversif", "return",
    "compound", "ticker", "price",
];

const LOAN_KEYWORDS: &[&str] = &[
    "loan", "mortgage", "borrow", "lend", "refinanc", "amortiz", "interest rate",
    "apr", "down payment", "pmi", "monthly payment", "financing", "debt",
    "exchange rate", "currency", "convert",
];

const CUSTOMER_KEYWORDS: &[&str] = &[
    "account", "card", "deposit", "withdraw", "transfer", "wire", "branch",
    "password", "login", "fraud", "unauthorized", "statement", "fee", "atm",
    "check", "balance",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteDecision {
    pub category: QueryCategory,
    pub score: usize,
}

/// Keyword-based query classifier
pub struct QueryRouter;

impl QueryRouter {
    /// Pick the category with the most keyword hits; ties and misses go general.
    pub fn classify(query: &str) -> RouteDecision {
        let text = query.to_lowercase();

        let score = |keywords: &[&str]| keywords.iter().filter(|kw| text.contains(**kw)).count();

        let scores = [
            (QueryCategory::Loan, score(LOAN_KEYWORDS)),
            (QueryCategory::Investment, score(INVESTMENT_KEYWORDS)),
            (QueryCategory::Customer, score(CUSTOMER_KEYWORDS)),
        ];

        let best = scores.iter().map(|(_, s)| *s).max().unwrap_or(0);
        let leaders: Vec<QueryCategory> = scores
            .iter()
            .filter(|(_, s)| *s == best)
            .map(|(c, _)| *c)
            .collect();

        if best == 0 || leaders.len() > 1 {
            RouteDecision {
                category: QueryCategory::General,
                score: best,
            }
        } else {
            RouteDecision {
                category: leaders[0],
                score: best,
            }
        }
    }
}
