//! Model catalog and canned answers served by the mock gateway

use crate::models::QueryCategory;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelInfo {
    pub name: &'static str,
    pub provider: &'static str,
    /// Simulated response latency bounds, in seconds.
    pub latency_range: (f64, f64),
}

const fn model(name: &'static str, provider: &'static str, min: f64, max: f64) -> ModelInfo {
    ModelInfo {
        name,
        provider,
        latency_range: (min, max),
    }
}

pub const LOCAL_PROVIDER: &str = "ollama";

/// Models a caller may request explicitly on a local route.
pub const OLLAMA_MODELS: [&str; 5] = ["llama3-8b", "mistral-7b", "phi-2", "codellama-7b", "solar-10.7b"];

/// Latency bounds used when the caller picks a specific Ollama model.
pub const CUSTOM_MODEL_LATENCY: (f64, f64) = (0.2, 0.8);

static INVESTMENT_MODELS: [ModelInfo; 2] = [
    model("gpt-4-1106-preview", "openai", 0.8, 1.5),
    model("claude-3-opus-20240229", "anthropic", 0.9, 1.7),
];

static INVESTMENT_LOCAL_MODELS: [ModelInfo; 2] = [
    model("llama3-8b", LOCAL_PROVIDER, 0.3, 0.8),
    model("mistral-7b", LOCAL_PROVIDER, 0.2, 0.7),
];

static LOAN_MODELS: [ModelInfo; 1] = [model("gpt-4-1106-preview", "openai", 0.5, 1.2)];

static LOAN_LOCAL_MODELS: [ModelInfo; 2] = [
    model("llama3-8b", LOCAL_PROVIDER, 0.2, 0.6),
    model("phi-2", LOCAL_PROVIDER, 0.1, 0.5),
];

static CUSTOMER_MODELS: [ModelInfo; 1] = [model("claude-3-sonnet-20240229", "anthropic", 0.7, 1.3)];

static CUSTOMER_LOCAL_MODELS: [ModelInfo; 2] = [
    model("mistral-7b", LOCAL_PROVIDER, 0.2, 0.7),
    model("solar-10.7b", LOCAL_PROVIDER, 0.3, 0.9),
];

static GENERAL_MODELS: [ModelInfo; 1] = [model("gemini-1.5-pro", "google", 0.6, 1.1)];

/// Models serving a category. General queries only have a cloud catalog.
pub fn models_for(category: QueryCategory, local: bool) -> &'static [ModelInfo] {
    match (category, local) {
        (QueryCategory::Investment, false) => &INVESTMENT_MODELS,
        (QueryCategory::Investment, true) => &INVESTMENT_LOCAL_MODELS,
        (QueryCategory::Loan, false) => &LOAN_MODELS,
        (QueryCategory::Loan, true) => &LOAN_LOCAL_MODELS,
        (QueryCategory::Customer, false) => &CUSTOMER_MODELS,
        (QueryCategory::Customer, true) => &CUSTOMER_LOCAL_MODELS,
        (QueryCategory::General, _) => &GENERAL_MODELS,
    }
}

static INVESTMENT_RESPONSES: [&str; 4] = [
    "Based on your risk tolerance and goals, I recommend a diversified portfolio with 60% stocks, 30% bonds, and 10% cash equivalents. This allocation provides a good balance between growth and stability.",
    "For long-term investment, index funds are generally a cost-effective strategy. Consider allocating a portion of your portfolio to a total market index fund to gain broad market exposure.",
    "Dollar-cost averaging can be an effective strategy for investing in volatile markets. By investing a fixed amount regularly, you buy more shares when prices are low and fewer when prices are high.",
    "When planning for retirement, consider tax-advantaged accounts like 401(k)s and IRAs. These accounts offer tax benefits that can significantly increase your long-term returns.",
];

static LOAN_RESPONSES: [&str; 4] = [
    "Based on your income and debt-to-income ratio, you might qualify for a mortgage of approximately $350,000. With current interest rates, your monthly payment would be around $1,800 including principal, interest, taxes, and insurance.",
    "For a $25,000 auto loan over 5 years at 4.5% interest, your monthly payment would be approximately $466. The total interest paid over the life of the loan would be about $2,960.",
    "Refinancing your mortgage could make sense if you can lower your interest rate by at least 0.75 percentage points. With current rates, you could save approximately $200 per month on your payment.",
    "When comparing loan offers, pay attention to the APR, not just the interest rate. The APR includes fees and gives you a more accurate picture of the total cost of borrowing.",
];

static CUSTOMER_RESPONSES: [&str; 4] = [
    "To open a new account, you'll need to provide identification (such as a driver's license or passport), proof of address, and your Social Security number. You can start this process online or visit a branch for assistance.",
    "Mobile check deposit is available through our mobile app. Simply endorse the check, take photos of the front and back, and submit through the app. Funds are typically available within 1-2 business days.",
    "Our international wire transfer service allows you to send money worldwide. Transfers typically arrive within 1-3 business days, and fees vary based on the destination country and amount sent.",
    "If you notice an unauthorized transaction on your account, please contact us immediately at our fraud hotline. Your liability is limited if you report fraud promptly.",
];

static GENERAL_RESPONSES: [&str; 4] = [
    "Financial planning is a process that helps you make informed decisions about your money to achieve your life goals. It typically includes budgeting, saving, investing, debt management, and insurance planning.",
    "A good emergency fund typically contains 3-6 months of essential expenses, kept in easily accessible accounts like high-yield savings accounts or money market funds.",
    "The Rule of 72 is a simple way to estimate how long it will take for an investment to double. Divide 72 by the annual return rate to get the approximate number of years.",
    "Compound interest is the addition of interest to the principal sum of a loan or deposit, or in other words, interest on interest. It is the result of reinvesting interest, rather than paying it out.",
];

pub fn responses_for(category: QueryCategory) -> &'static [&'static str] {
    match category {
        QueryCategory::Investment => &INVESTMENT_RESPONSES,
        QueryCategory::Loan => &LOAN_RESPONSES,
        QueryCategory::Customer => &CUSTOMER_RESPONSES,
        QueryCategory::General => &GENERAL_RESPONSES,
    }
}

/// Look up a requested model among the known Ollama models.
pub fn ollama_model(name: &str) -> Option<&'static str> {
    OLLAMA_MODELS.iter().copied().find(|m| *m == name)
}
