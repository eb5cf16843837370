use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Prepend the report stylesheet so the markup is self-contained.
    pub embed_styles: bool,

    /// Text of the notice shown when there is nothing to render.
    pub empty_notice: String,

    /// Title heading of the standalone export page.
    pub page_title: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            embed_styles: true,
            empty_notice: "No analysis data available.".to_string(),
            page_title: "Financial Analysis Report".to_string(),
        }
    }
}

impl ReportConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ReportConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_title.trim().is_empty() {
            return Err(ReportError::InvalidConfig(
                "page_title must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
