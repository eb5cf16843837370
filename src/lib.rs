//! # Analysis Report
//!
//! A library for turning a financial-analysis result of unknown shape into a
//! normalized, displayable HTML report.
//!
//! ## Core Concepts
//!
//! - **Payload**: whatever the analysis service returned. An object, JSON text,
//!   markdown text, ready-made markup, or nothing at all
//! - **Classification**: deciding which of those it is, falling back quietly
//!   when a guess does not pan out (malformed JSON is retried as markdown, then
//!   shown as plain text)
//! - **Document**: an immutable sequence of [`Block`]s produced by either the
//!   markdown parser or the structured-data renderer
//! - **Aggregates**: synthetic table rows computed from noisy currency cells,
//!   currently the average of a "monthly revenue" column
//!
//! Rendering never fails for a payload that fits [`AnalysisPayload`]. Rendering
//! is not idempotent: the output is markup, and feeding it back in passes it
//! through unchanged rather than re-parsing it.
//!
//! ## Example
//!
//! ```rust,ignore
//! use analysis_report::*;
//! use serde_json::json;
//!
//! let payload = AnalysisPayload::Structured(json!({
//!     "monthly_overview": [
//!         { "month": "January", "monthly_revenue": "$42,100.00" },
//!         { "month": "February", "monthly_revenue": "$39,850.50" }
//!     ],
//!     "paymentPatterns": ["Daily ACH debit of $412 to Rapid Capital"]
//! }));
//!
//! let html = render(&payload);
//! assert!(html.contains("Total Average: $40,975.25"));
//! ```

pub mod aggregate;
pub mod amount;
pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod fields;
pub mod markdown;
pub mod payload;
pub mod render;
pub mod schema;
pub mod structured;

pub use amount::{format_currency, parse_amount, parse_amount_value, Amount};
pub use config::ReportConfig;
pub use document::{AggregateRow, Block, DocumentKind, ReportDocument};
pub use error::{ReportError, Result};
pub use export::render_page;
pub use fields::{is_omitted, resolve, resolve_section, FieldAliasSet, ReportSection};
pub use markdown::{parse_markdown, MarkdownParser, ParserState};
pub use payload::{classify, AnalysisPayload, Route};
pub use render::{render_document, HtmlRenderer};
pub use schema::AnalysisReport;
pub use structured::build_structured_document;

use log::debug;
use serde_json::Value;

pub struct ReportFormatter;

impl ReportFormatter {
    /// Builds the document for a payload, or `None` when the payload is
    /// already markup and must be passed through as-is.
    pub fn document(payload: &AnalysisPayload, config: &ReportConfig) -> Option<ReportDocument> {
        let document = match classify(payload) {
            Route::Empty => ReportDocument::empty(config.empty_notice.as_str()),
            Route::Markup(_) => return None,
            Route::Structured(value) => build_structured_document(&value),
            Route::Markdown(text) => parse_markdown(text),
            Route::PlainText(text) => ReportDocument::plain_text(text),
        };

        debug!(
            "Built {:?} document with {} blocks",
            document.kind(),
            document.len()
        );
        Some(document)
    }

    pub fn format(payload: &AnalysisPayload, config: &ReportConfig) -> String {
        match Self::document(payload, config) {
            Some(document) => HtmlRenderer::new(config).render(&document),
            // Only text payloads are ever classified as markup.
            None => match payload {
                AnalysisPayload::Text(markup) => markup.clone(),
                _ => String::new(),
            },
        }
    }

    pub fn format_value(value: Value, config: &ReportConfig) -> Result<String> {
        let payload = AnalysisPayload::from_value(value)?;
        Ok(Self::format(&payload, config))
    }
}

pub fn render(payload: &AnalysisPayload) -> String {
    ReportFormatter::format(payload, &ReportConfig::default())
}

pub fn render_with_config(payload: &AnalysisPayload, config: &ReportConfig) -> String {
    ReportFormatter::format(payload, config)
}

/// Renders a raw JSON value. Errors only for bare numbers and booleans.
pub fn render_value(value: Value) -> Result<String> {
    ReportFormatter::format_value(value, &ReportConfig::default())
}
