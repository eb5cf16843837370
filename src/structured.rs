use crate::aggregate::{average_row, revenue_column};
use crate::amount::{parse_amount_value, Amount};
use crate::document::{Block, DocumentKind, ReportDocument};
use crate::fields::{resolve, resolve_section, ReportSection};
use log::debug;
use serde_json::Value;

pub const FUNDING_HEADERS: [&str; 4] = ["Funder / Source", "Amount", "Frequency", "Notes"];

/// Builds a document from a JSON-like analysis object.
///
/// Each known section is looked up independently, in [`ReportSection::ALL`]
/// order. When none is present the whole payload is shown as pretty-printed
/// JSON instead.
pub fn build_structured_document(data: &Value) -> ReportDocument {
    let mut blocks = Vec::new();
    let mut found_any = false;

    for section in ReportSection::ALL {
        let Some(value) = resolve_section(data, section) else {
            debug!("Section {} not present, skipping", section.aliases().canonical);
            continue;
        };
        debug!("Resolved section {}", section.aliases().canonical);
        found_any = true;

        match section {
            ReportSection::MonthlyOverview => monthly_overview(value, &mut blocks),
            ReportSection::McaIndicators => mca_indicators(value, &mut blocks),
            ReportSection::FundingSources => funding_sources(value, &mut blocks),
            ReportSection::PaymentPatterns => payment_patterns(value, &mut blocks),
        }
    }

    if !found_any {
        debug!("No known report sections, falling back to raw JSON");
        let pretty = serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string());
        blocks.push(Block::RawPreformatted { text: pretty });
    }

    ReportDocument::new(DocumentKind::Structured, blocks)
}

/// `monthly_revenue` -> `Monthly Revenue`. Only the first letter of each
/// word changes, so `monthlyRevenue` becomes `MonthlyRevenue`.
pub fn humanize_key(key: &str) -> String {
    let mut label = String::with_capacity(key.len());
    let mut prev_is_word = false;
    for ch in key.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        let is_word = ch.is_ascii_alphanumeric();
        if is_word && !prev_is_word {
            label.push(ch.to_ascii_uppercase());
        } else {
            label.push(ch);
        }
        prev_is_word = is_word;
    }
    label
}

/// Display text for a loosely-typed cell.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        // Whole floats print without a trailing `.0`.
        Value::Number(n) if n.is_f64() => n.as_f64().map(|f| f.to_string()).unwrap_or_default(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Arrays yield their elements, a lone object is a single row.
fn as_rows(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        Value::Object(_) => vec![value],
        _ => Vec::new(),
    }
}

fn field_text(row: &Value, key: &str) -> String {
    row.get(key).map(cell_text).unwrap_or_default()
}

fn non_empty_text(value: Option<&Value>) -> Option<String> {
    value.map(cell_text).filter(|text| !text.is_empty())
}

fn string_items(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().map(cell_text).collect(),
        Value::String(s) => vec![s.clone()],
        _ => Vec::new(),
    }
}

fn monthly_overview(value: &Value, blocks: &mut Vec<Block>) {
    let rows = as_rows(value);
    let keys: Vec<&str> = rows
        .first()
        .and_then(|row| row.as_object())
        .map(|first| first.keys().map(String::as_str).collect())
        .unwrap_or_default();

    let aggregate = revenue_column(keys.iter().copied()).and_then(|idx| {
        let key = keys[idx];
        average_row(
            idx,
            rows.iter().map(|row| {
                row.get(key)
                    .map(parse_amount_value)
                    .unwrap_or(Amount::Unparseable)
            }),
        )
    });

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| keys.iter().map(|key| field_text(row, key)).collect())
        .collect();

    blocks.push(Block::heading(2, "Monthly Overview"));
    blocks.push(Block::Table {
        caption: Some("Monthly financial summary".to_string()),
        headers: keys.iter().map(|key| humanize_key(key)).collect(),
        rows: cells,
        aggregate,
    });
}

fn mca_indicators(value: &Value, blocks: &mut Vec<Block>) {
    blocks.push(Block::heading(2, "Indicators of MCA Funding"));

    match value {
        Value::Array(indicators) => {
            for (idx, indicator) in indicators.iter().enumerate() {
                let title = non_empty_text(resolve(indicator, &["title"]))
                    .unwrap_or_else(|| "Indicator".to_string());
                blocks.push(Block::heading(3, format!("{}. {}", idx + 1, title)));

                if let Some(description) = non_empty_text(resolve(indicator, &["description"])) {
                    blocks.push(Block::paragraph(description));
                }

                if let Some(items @ Value::Array(_)) = indicator.get("items") {
                    blocks.push(Block::List {
                        ordered: false,
                        items: string_items(items),
                    });
                }
            }
        }
        Value::Object(map) => {
            for (key, entry) in map {
                blocks.push(Block::heading(3, key.as_str()));
                match entry {
                    Value::String(text) => blocks.push(Block::paragraph(text.as_str())),
                    Value::Array(_) => blocks.push(Block::List {
                        ordered: false,
                        items: string_items(entry),
                    }),
                    _ => {}
                }
            }
        }
        _ => debug!("MCA indicators are neither a list nor an object, rendering heading only"),
    }
}

fn funding_sources(value: &Value, blocks: &mut Vec<Block>) {
    let rows: Vec<Vec<String>> = as_rows(value)
        .into_iter()
        .map(|source| {
            vec![
                resolve(source, &["name", "funder"])
                    .map(cell_text)
                    .unwrap_or_default(),
                field_text(source, "amount"),
                field_text(source, "frequency"),
                field_text(source, "notes"),
            ]
        })
        .collect();

    blocks.push(Block::heading(3, "Large/Unusual Deposits and Repayments"));
    blocks.push(Block::Table {
        caption: Some("Funding sources and repayment patterns".to_string()),
        headers: FUNDING_HEADERS.iter().map(|h| h.to_string()).collect(),
        rows,
        aggregate: None,
    });
}

fn payment_patterns(value: &Value, blocks: &mut Vec<Block>) {
    blocks.push(Block::heading(3, "MCA Payment Patterns:"));
    blocks.push(Block::List {
        ordered: false,
        items: string_items(value),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::AggregateRow;
    use serde_json::json;

    fn table_at(
        doc: &ReportDocument,
        idx: usize,
    ) -> (&Vec<String>, &Vec<Vec<String>>, &Option<AggregateRow>) {
        match &doc.blocks()[idx] {
            Block::Table {
                headers,
                rows,
                aggregate,
                ..
            } => (headers, rows, aggregate),
            other => panic!("expected table at {}, got {:?}", idx, other),
        }
    }

    #[test]
    fn test_humanize_key() {
        assert_eq!(humanize_key("monthly_revenue"), "Monthly Revenue");
        assert_eq!(humanize_key("month"), "Month");
        assert_eq!(humanize_key("monthlyRevenue"), "MonthlyRevenue");
        assert_eq!(humanize_key("nsf_count_q1"), "Nsf Count Q1");
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&json!(null)), "");
        assert_eq!(cell_text(&json!("x")), "x");
        assert_eq!(cell_text(&json!(12)), "12");
        assert_eq!(cell_text(&json!(0)), "0");
        assert_eq!(cell_text(&json!(25000.0)), "25000");
        assert_eq!(cell_text(&json!(1.5)), "1.5");
        assert_eq!(cell_text(&json!(-3.25)), "-3.25");
        assert_eq!(cell_text(&json!(true)), "true");
        assert_eq!(cell_text(&json!([1, 2])), "[1,2]");
    }

    #[test]
    fn test_monthly_overview_with_average() {
        let data = json!({
            "monthly_overview": [
                { "month": "Jan", "monthly_revenue": "$10,000.00", "deposits": 4 },
                { "month": "Feb", "monthly_revenue": 20000 },
                { "month": "Mar", "monthly_revenue": "unknown" }
            ]
        });
        let doc = build_structured_document(&data);
        assert_eq!(doc.kind(), DocumentKind::Structured);
        assert_eq!(doc.blocks()[0], Block::heading(2, "Monthly Overview"));

        let (headers, rows, aggregate) = table_at(&doc, 1);
        assert_eq!(headers, &vec!["Month", "Monthly Revenue", "Deposits"]);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], vec!["Feb", "20000", ""]);

        let aggregate = aggregate.as_ref().unwrap();
        assert_eq!(aggregate.column_index, 1);
        assert_eq!(aggregate.value, Amount::Parsed(15000.0));
        assert_eq!(aggregate.label, "Total Average: $15,000.00");
    }

    #[test]
    fn test_monthly_overview_without_parseable_revenue() {
        let data = json!({
            "monthlyOverview": [
                { "month": "Jan", "monthlyRevenue": "n/a" },
                { "month": "Feb" }
            ]
        });
        let doc = build_structured_document(&data);
        let (_, rows, aggregate) = table_at(&doc, 1);
        assert_eq!(rows.len(), 2);
        assert!(aggregate.is_none());
    }

    #[test]
    fn test_empty_monthly_overview_still_renders_table() {
        let doc = build_structured_document(&json!({ "monthlyOverview": [] }));
        let (headers, rows, aggregate) = table_at(&doc, 1);
        assert!(headers.is_empty());
        assert!(rows.is_empty());
        assert!(aggregate.is_none());
    }

    #[test]
    fn test_indicator_list_form() {
        let data = json!({
            "mcaIndicators": [
                { "title": "Daily debits", "description": "Fixed ACH pulls", "items": ["ABC Funding $450/day"] },
                { "items": "not a list" }
            ]
        });
        let doc = build_structured_document(&data);
        assert_eq!(
            doc.blocks(),
            &[
                Block::heading(2, "Indicators of MCA Funding"),
                Block::heading(3, "1. Daily debits"),
                Block::paragraph("Fixed ACH pulls"),
                Block::List {
                    ordered: false,
                    items: vec!["ABC Funding $450/day".to_string()],
                },
                Block::heading(3, "2. Indicator"),
            ]
        );
    }

    #[test]
    fn test_indicator_object_form() {
        let data = json!({
            "mca_indicators": {
                "Stacking": "Two funders active in March",
                "Evidence": ["Wire from XYZ Capital", "Weekly debit"],
                "Score": 7
            }
        });
        let doc = build_structured_document(&data);
        assert_eq!(
            doc.blocks(),
            &[
                Block::heading(2, "Indicators of MCA Funding"),
                Block::heading(3, "Stacking"),
                Block::paragraph("Two funders active in March"),
                Block::heading(3, "Evidence"),
                Block::List {
                    ordered: false,
                    items: vec!["Wire from XYZ Capital".to_string(), "Weekly debit".to_string()],
                },
                Block::heading(3, "Score"),
            ]
        );
    }

    #[test]
    fn test_funding_sources_missing_fields_are_blank() {
        let data = json!({
            "fundingSources": [
                { "funder": "Rapid Capital", "amount": "$25,000", "frequency": "Once" },
                { "name": "Acme Advance", "notes": "Daily ACH" }
            ]
        });
        let doc = build_structured_document(&data);
        let (headers, rows, aggregate) = table_at(&doc, 1);
        assert_eq!(headers, &FUNDING_HEADERS.to_vec());
        assert_eq!(rows[0], vec!["Rapid Capital", "$25,000", "Once", ""]);
        assert_eq!(rows[1], vec!["Acme Advance", "", "", "Daily ACH"]);
        assert!(aggregate.is_none());
    }

    #[test]
    fn test_payment_patterns_string_or_list() {
        let single = build_structured_document(&json!({ "paymentPatterns": "Weekly on Fridays" }));
        assert_eq!(
            single.blocks()[1],
            Block::List {
                ordered: false,
                items: vec!["Weekly on Fridays".to_string()],
            }
        );

        let many = build_structured_document(&json!({ "payment_patterns": ["A", "B"] }));
        assert_eq!(
            many.blocks()[1],
            Block::List {
                ordered: false,
                items: vec!["A".to_string(), "B".to_string()],
            }
        );
    }

    #[test]
    fn test_sections_render_in_fixed_order() {
        let data = json!({
            "paymentPatterns": ["weekly"],
            "fundingSources": [],
            "monthlyOverview": []
        });
        let doc = build_structured_document(&data);
        let headings: Vec<&str> = doc
            .blocks()
            .iter()
            .filter_map(|b| match b {
                Block::Heading { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            headings,
            vec![
                "Monthly Overview",
                "Large/Unusual Deposits and Repayments",
                "MCA Payment Patterns:"
            ]
        );
    }

    #[test]
    fn test_whole_float_amount_in_funding_table() {
        let doc = build_structured_document(&json!({
            "fundingSources": [{ "name": "Rapid Capital", "amount": 25000.0 }]
        }));
        let (_, rows, _) = table_at(&doc, 1);
        assert_eq!(rows[0], vec!["Rapid Capital", "25000", "", ""]);
    }

    #[test]
    fn test_blank_payment_patterns_fall_back_to_json() {
        let data = json!({ "paymentPatterns": "" });
        let doc = build_structured_document(&data);
        assert_eq!(doc.len(), 1);
        match &doc.blocks()[0] {
            Block::RawPreformatted { text } => {
                let parsed: Value = serde_json::from_str(text).unwrap();
                assert_eq!(parsed, data);
            }
            other => panic!("expected raw block, got {:?}", other),
        }
    }

    #[test]
    fn test_false_or_zero_sections_are_skipped() {
        let doc = build_structured_document(&json!({
            "mcaIndicators": false,
            "monthlyOverview": 0,
            "paymentPatterns": ["Daily ACH debit"]
        }));
        assert_eq!(
            doc.blocks(),
            &[
                Block::heading(3, "MCA Payment Patterns:"),
                Block::List {
                    ordered: false,
                    items: vec!["Daily ACH debit".to_string()],
                },
            ]
        );

        let only_false = build_structured_document(&json!({ "mcaIndicators": false }));
        assert!(matches!(only_false.blocks(), [Block::RawPreformatted { .. }]));
    }

    #[test]
    fn test_empty_funding_name_uses_funder() {
        let doc = build_structured_document(&json!({
            "fundingSources": [{ "name": "", "funder": "Rapid Capital", "amount": "$25,000" }]
        }));
        let (_, rows, _) = table_at(&doc, 1);
        assert_eq!(rows[0], vec!["Rapid Capital", "$25,000", "", ""]);
    }

    #[test]
    fn test_unknown_shape_falls_back_to_json() {
        let data = json!({ "summary": "ok", "score": 3 });
        let doc = build_structured_document(&data);
        assert_eq!(doc.len(), 1);
        match &doc.blocks()[0] {
            Block::RawPreformatted { text } => {
                let parsed: Value = serde_json::from_str(text).unwrap();
                assert_eq!(parsed, data);
            }
            other => panic!("expected raw block, got {:?}", other),
        }
    }
}
