use serde_json::Value;

/// Accepted literal spellings for one semantic field of the analysis payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldAliasSet {
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
}

pub const MONTHLY_OVERVIEW: FieldAliasSet = FieldAliasSet {
    canonical: "monthlyOverview",
    aliases: &["monthlyOverview", "monthly_overview"],
};

pub const MCA_INDICATORS: FieldAliasSet = FieldAliasSet {
    canonical: "mcaIndicators",
    aliases: &["mcaIndicators", "mca_indicators"],
};

pub const FUNDING_SOURCES: FieldAliasSet = FieldAliasSet {
    canonical: "fundingSources",
    aliases: &["fundingSources", "funding_sources"],
};

pub const PAYMENT_PATTERNS: FieldAliasSet = FieldAliasSet {
    canonical: "paymentPatterns",
    aliases: &["paymentPatterns", "payment_patterns"],
};

/// The report sections the structured renderer knows, in rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSection {
    MonthlyOverview,
    McaIndicators,
    FundingSources,
    PaymentPatterns,
}

impl ReportSection {
    pub const ALL: [ReportSection; 4] = [
        ReportSection::MonthlyOverview,
        ReportSection::McaIndicators,
        ReportSection::FundingSources,
        ReportSection::PaymentPatterns,
    ];

    pub fn aliases(self) -> &'static FieldAliasSet {
        match self {
            ReportSection::MonthlyOverview => &MONTHLY_OVERVIEW,
            ReportSection::McaIndicators => &MCA_INDICATORS,
            ReportSection::FundingSources => &FUNDING_SOURCES,
            ReportSection::PaymentPatterns => &PAYMENT_PATTERNS,
        }
    }
}

/// `null`, `""`, `false` and zero carry no content. Empty arrays and
/// objects still do.
pub fn is_omitted(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Returns the value of the first alias present on `object`.
///
/// Keys are matched exactly and in declared order. A key holding an
/// omitted value (see [`is_omitted`]) is skipped. Non-object values have no
/// fields.
pub fn resolve<'a>(object: &'a Value, aliases: &[&str]) -> Option<&'a Value> {
    let map = object.as_object()?;
    aliases
        .iter()
        .filter_map(|key| map.get(*key))
        .find(|value| !is_omitted(value))
}

pub fn resolve_section(object: &Value, section: ReportSection) -> Option<&Value> {
    resolve(object, section.aliases().aliases)
}
