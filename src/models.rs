//! Shared data models: frequency enums, routing categories and tool I/O

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GatewayError;

//
// ================= Frequencies =================
//

/// How often an installment loan is paid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PaymentFrequency {
    Monthly,
    Biweekly,
    Weekly,
}

impl PaymentFrequency {
    pub const fn periods_per_year(self) -> u32 {
        match self {
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::Biweekly => 26,
            PaymentFrequency::Weekly => 52,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            PaymentFrequency::Monthly => "monthly",
            PaymentFrequency::Biweekly => "biweekly",
            PaymentFrequency::Weekly => "weekly",
        }
    }
}

impl FromStr for PaymentFrequency {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monthly" => Ok(PaymentFrequency::Monthly),
            "biweekly" => Ok(PaymentFrequency::Biweekly),
            "weekly" => Ok(PaymentFrequency::Weekly),
            other => Err(GatewayError::InvalidArgument(format!(
                "Payment frequency must be 'monthly', 'biweekly', or 'weekly' (got '{}')",
                other
            ))),
        }
    }
}

/// How often investment returns compound.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CompoundFrequency {
    Monthly,
    Quarterly,
    Annually,
}

impl CompoundFrequency {
    pub const fn periods_per_year(self) -> u32 {
        match self {
            CompoundFrequency::Monthly => 12,
            CompoundFrequency::Quarterly => 4,
            CompoundFrequency::Annually => 1,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            CompoundFrequency::Monthly => "monthly",
            CompoundFrequency::Quarterly => "quarterly",
            CompoundFrequency::Annually => "annually",
        }
    }
}

impl FromStr for CompoundFrequency {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monthly" => Ok(CompoundFrequency::Monthly),
            "quarterly" => Ok(CompoundFrequency::Quarterly),
            "annually" => Ok(CompoundFrequency::Annually),
            other => Err(GatewayError::InvalidArgument(format!(
                "Compound frequency must be 'monthly', 'quarterly', or 'annually' (got '{}')",
                other
            ))),
        }
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for CompoundFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//
// ================= Routing =================
//

/// Category of a financial query; each one has its own gateway route.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum QueryCategory {
    Investment,
    Loan,
    Customer,
    General,
}

impl QueryCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            QueryCategory::Investment => "investment",
            QueryCategory::Loan => "loan",
            QueryCategory::Customer => "customer",
            QueryCategory::General => "general",
        }
    }
}

impl fmt::Display for QueryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where the models behind a route run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Deployment {
    #[default]
    Cloud,
    Local,
}

//
// ================= Tool I/O =================
//

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInput {
    pub tool_name: String,
    pub parameters: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    pub success: bool,
    pub data: serde_json::Value,
    pub error: Option<String>,
}

impl ToolOutput {
    pub fn ok(data: serde_json::Value) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }

    /// Soft failure: the payload carries the error flag, the caller checks it.
    pub fn soft_error(data: serde_json::Value, message: String) -> Self {
        Self {
            success: false,
            data,
            error: Some(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_frequency_parsing() {
        assert_eq!("monthly".parse::<PaymentFrequency>().unwrap(), PaymentFrequency::Monthly);
        assert_eq!("weekly".parse::<PaymentFrequency>().unwrap().periods_per_year(), 52);
        assert_eq!("biweekly".parse::<PaymentFrequency>().unwrap().periods_per_year(), 26);

        let err = "daily".parse::<PaymentFrequency>().unwrap_err();
        assert!(matches!(err, GatewayError::InvalidArgument(_)));
        assert!(err.to_string().contains("monthly"));
    }

    #[test]
    fn test_compound_frequency_parsing() {
        assert_eq!("quarterly".parse::<CompoundFrequency>().unwrap().periods_per_year(), 4);
        assert_eq!("annually".parse::<CompoundFrequency>().unwrap().periods_per_year(), 1);
        assert!("Monthly".parse::<CompoundFrequency>().is_err());
        assert!("weekly".parse::<CompoundFrequency>().is_err());
    }

    #[test]
    fn test_frequency_serializes_lowercase() {
        let json = serde_json::to_value(PaymentFrequency::Biweekly).unwrap();
        assert_eq!(json, serde_json::json!("biweekly"));
        let json = serde_json::to_value(CompoundFrequency::Annually).unwrap();
        assert_eq!(json, serde_json::json!("annually"));
    }
}
