//! Response shape requested from the upstream analysis service.
//!
//! The renderer does not depend on these types: it reads payloads loosely
//! through [`crate::fields`]. The schema is what gets handed to the producer
//! so that well-behaved responses land on the structured path.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisReport {
    #[serde(
        rename = "monthlyOverview",
        alias = "monthly_overview",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    #[schemars(
        description = "One row per statement month. Every row should use the same keys, e.g. month, monthly_revenue, deposits, ending_balance. Values may be numbers or currency strings such as \"$12,500.00\"."
    )]
    pub monthly_overview: Vec<Map<String, Value>>,

    #[serde(
        rename = "mcaIndicators",
        alias = "mca_indicators",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    #[schemars(description = "Evidence that the business has taken merchant cash advance funding")]
    pub mca_indicators: Vec<Indicator>,

    #[serde(
        rename = "fundingSources",
        alias = "funding_sources",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    #[schemars(description = "Large or unusual deposits and the repayments tied to them")]
    pub funding_sources: Vec<FundingSource>,

    #[serde(
        rename = "paymentPatterns",
        alias = "payment_patterns",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    #[schemars(description = "Short sentences describing recurring debit patterns")]
    pub payment_patterns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Indicator {
    #[schemars(description = "Short name of the indicator, e.g. 'Fixed daily ACH debits'")]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    #[schemars(description = "Supporting transactions or observations")]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FundingSource {
    #[serde(alias = "funder")]
    #[schemars(description = "Funder or depositor name as it appears on the statement")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Amount as shown on the statement, e.g. \"$25,000.00\"")]
    pub amount: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "How often it recurs, e.g. 'Daily', 'Weekly', 'One-time'")]
    pub frequency: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl AnalysisReport {
    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(AnalysisReport)
    }

    pub fn schema_as_json() -> Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}
