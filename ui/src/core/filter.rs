//! Client-side filtering for the transaction history table.

use time::{format_description::well_known::Rfc3339, Duration, OffsetDateTime};

use super::bootstrap::TransactionRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRange {
    #[default]
    All,
    Today,
    Week,
    Month,
}

impl DateRange {
    /// Values of the `date-filter` select. Unknown values behave like `all`.
    pub fn from_value(value: &str) -> Self {
        match value {
            "today" => Self::Today,
            "week" => Self::Week,
            "month" => Self::Month,
            _ => Self::All,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableFilter {
    pub search: String,
    /// `all` or a badge text such as `High`.
    pub risk: String,
    pub range: DateRange,
}

impl Default for TableFilter {
    fn default() -> Self {
        Self::new("", "all", "all")
    }
}

impl TableFilter {
    pub fn new(search: &str, risk: &str, range: &str) -> Self {
        Self {
            search: search.to_lowercase(),
            risk: if risk.is_empty() {
                "all".to_string()
            } else {
                risk.to_lowercase()
            },
            range: DateRange::from_value(range),
        }
    }

    pub fn matches(&self, row: &TransactionRow, now: OffsetDateTime) -> bool {
        self.matches_search(row) && self.matches_risk(row) && self.matches_date(row, now)
    }

    fn matches_search(&self, row: &TransactionRow) -> bool {
        self.search.is_empty() || row_text(row).to_lowercase().contains(&self.search)
    }

    fn matches_risk(&self, row: &TransactionRow) -> bool {
        self.risk == "all" || row.risk_level.to_lowercase() == self.risk
    }

    fn matches_date(&self, row: &TransactionRow, now: OffsetDateTime) -> bool {
        if self.range == DateRange::All {
            return true;
        }
        let Some(raw) = row.timestamp.as_deref() else {
            return true;
        };
        let Ok(stamp) = OffsetDateTime::parse(raw, &Rfc3339) else {
            return false;
        };

        match self.range {
            DateRange::All => true,
            DateRange::Today => stamp.to_offset(now.offset()).date() == now.date(),
            DateRange::Week => stamp >= now - Duration::days(7),
            DateRange::Month => stamp >= now - Duration::days(30),
        }
    }
}

/// Everything a row shows, concatenated the way its cells render.
fn row_text(row: &TransactionRow) -> String {
    [
        row.transaction_id.as_str(),
        row.amount.as_str(),
        row.recipient.as_str(),
        row.risk_level.as_str(),
        row.timestamp.as_deref().unwrap_or_default(),
    ]
    .join(" ")
}
