use crate::domain::model::{CheckoutRecord, FeeReport, FeeReportRow, PatronFeeTotals};
use crate::utils::dates::DateParser;
use crate::utils::error::Result;
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

pub const DEFAULT_DAILY_RATE: Decimal = Decimal::from_parts(25, 0, 0, false, 2);
pub const DEFAULT_DATE_FORMAT: &str = "%m/%d/%Y";

/// Whole days between the due date and the return date. Zero or negative
/// means the book came back on time.
pub fn days_late(due: NaiveDate, returned: NaiveDate) -> i64 {
    (returned - due).num_days()
}

pub fn late_fee(delay: i64, daily_rate: Decimal) -> Decimal {
    if delay > 0 {
        Decimal::from(delay) * daily_rate
    } else {
        Decimal::ZERO
    }
}

/// Two fractional digits, always: `1` becomes `1.00`, `0.125` becomes `0.13`.
pub fn format_fee(fee: Decimal) -> String {
    let mut rounded = fee.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

/// Accumulates fees over every record. Fails on the first unparseable date.
pub fn accumulate_fees(
    records: &[CheckoutRecord],
    daily_rate: Decimal,
    date_format: &str,
) -> Result<(PatronFeeTotals, usize)> {
    let parser = DateParser::new(date_format)?;
    let mut totals = PatronFeeTotals::new();
    let mut late_records = 0;

    for record in records {
        let due = parser.parse("date_due", &record.date_due)?;
        let returned = parser.parse("date_returned", &record.date_returned)?;
        let delay = days_late(due, returned);

        if delay > 0 {
            late_records += 1;
            tracing::debug!(
                "Patron {} returned {} {} day(s) late",
                record.patron_id,
                record.book_uid,
                delay
            );
        }

        totals.add(&record.patron_id, late_fee(delay, daily_rate));
    }

    Ok((totals, late_records))
}

pub fn build_report(totals: &PatronFeeTotals, records_read: usize, late_records: usize) -> FeeReport {
    let patrons = totals
        .iter()
        .map(|(patron_id, fee)| FeeReportRow {
            patron_id: patron_id.to_string(),
            late_fees: format_fee(fee),
        })
        .collect();

    FeeReport {
        patrons,
        records_read,
        late_records,
        total_fees: format_fee(totals.total()),
    }
}
