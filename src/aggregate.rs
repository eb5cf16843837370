use crate::amount::{format_currency, Amount};
use crate::document::AggregateRow;
use log::debug;

pub const AVERAGE_LABEL: &str = "Total Average";

/// Case- and whitespace-insensitive check for a "monthly revenue" column,
/// covering `Monthly Revenue`, `monthly_revenue` and `monthlyRevenue`.
pub fn is_monthly_revenue_header(header: &str) -> bool {
    let normalized: String = header
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();
    normalized.contains("monthly") && normalized.contains("revenue")
}

/// Index of the first monthly revenue column. Later matches are ignored.
pub fn revenue_column<'a, I>(headers: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    headers.into_iter().position(is_monthly_revenue_header)
}

/// Averages the parseable amounts of one column into an [`AggregateRow`].
///
/// Returns `None` when no cell parses.
pub fn average_row<I>(column_index: usize, amounts: I) -> Option<AggregateRow>
where
    I: IntoIterator<Item = Amount>,
{
    let (total, count) = amounts
        .into_iter()
        .filter_map(Amount::value)
        .fold((0.0_f64, 0_usize), |(total, count), v| (total + v, count + 1));

    if count == 0 {
        debug!("Column {} has no parseable amounts, skipping average", column_index);
        return None;
    }

    let mean = total / count as f64;
    debug!(
        "Averaged {} values in column {}: {}",
        count, column_index, mean
    );

    Some(AggregateRow {
        column_index,
        label: format!("{}: {}", AVERAGE_LABEL, format_currency(mean)),
        value: Amount::Parsed(mean),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::parse_amount;

    #[test]
    fn test_revenue_header_spellings() {
        assert!(is_monthly_revenue_header("Monthly Revenue"));
        assert!(is_monthly_revenue_header("monthly_revenue"));
        assert!(is_monthly_revenue_header("monthlyRevenue"));
        assert!(is_monthly_revenue_header("MONTHLY  REVENUE (USD)"));
        assert!(!is_monthly_revenue_header("Revenue"));
        assert!(!is_monthly_revenue_header("Monthly Deposits"));
    }

    #[test]
    fn test_first_matching_column_wins() {
        let headers = ["Month", "Monthly Revenue", "Monthly Revenue (Adj)"];
        assert_eq!(revenue_column(headers), Some(1));
        assert_eq!(revenue_column(["Month", "Deposits"]), None);
    }

    #[test]
    fn test_average_skips_unparseable() {
        let cells = ["$1,000.00", "n/a", "$2,000.00", ""];
        let row = average_row(2, cells.iter().map(|c| parse_amount(c))).unwrap();
        assert_eq!(row.column_index, 2);
        assert_eq!(row.value, Amount::Parsed(1500.0));
        assert_eq!(row.label, "Total Average: $1,500.00");
    }

    #[test]
    fn test_no_parseable_cells_means_no_row() {
        let cells = ["n/a", "pending"];
        assert!(average_row(0, cells.iter().map(|c| parse_amount(c))).is_none());
        assert!(average_row(0, std::iter::empty()).is_none());
    }
}
