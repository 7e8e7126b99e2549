use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Column order of the checkout export. The file carries no usable header.
pub const CHECKOUT_COLUMNS: [&str; 6] = [
    "book_uid",
    "isbn_13",
    "patron_id",
    "date_checkout",
    "date_due",
    "date_returned",
];

pub const REPORT_HEADERS: [&str; 2] = ["patron_id", "late_fees"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRecord {
    pub book_uid: String,
    pub isbn_13: String,
    pub patron_id: String,
    pub date_checkout: String,
    pub date_due: String,
    pub date_returned: String,
}

/// Running fee per patron, kept in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatronFeeTotals {
    totals: IndexMap<String, Decimal>,
}

impl PatronFeeTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `fee` to the patron's total, registering the patron at zero first
    /// if this is the first time it is seen.
    pub fn add(&mut self, patron_id: &str, fee: Decimal) {
        *self
            .totals
            .entry(patron_id.to_string())
            .or_insert(Decimal::ZERO) += fee;
    }

    pub fn get(&self, patron_id: &str) -> Option<Decimal> {
        self.totals.get(patron_id).copied()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn total(&self) -> Decimal {
        self.totals.values().copied().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.totals.iter().map(|(id, fee)| (id.as_str(), *fee))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeReportRow {
    pub patron_id: String,
    pub late_fees: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeeReport {
    pub patrons: Vec<FeeReportRow>,
    pub records_read: usize,
    pub late_records: usize,
    pub total_fees: String,
}
