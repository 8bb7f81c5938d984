//! Earnings-calendar scans.
//!
//! The calendar mixes upcoming entries (estimates only) with reported ones
//! (estimates and actuals), latest first, so positional offsets are useless.
//! Lookups instead walk the series until a record qualifies.

use crate::accessor::FieldAccessor;
use crate::fields;
use metrics_core::{FieldValue, StatementKind, StatementRecord, StatementSeries};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// First entry carrying a revenue estimate (the next scheduled report).
    Estimate,
    /// First entry carrying a reported revenue (the latest reported quarter).
    Actual,
}

impl ScanMode {
    fn marker(self) -> &'static str {
        match self {
            ScanMode::Estimate => fields::REVENUE_ESTIMATED,
            ScanMode::Actual => fields::REVENUE_ACTUAL,
        }
    }
}

fn has_value(record: &StatementRecord, field: &str) -> bool {
    record.field(field).is_some_and(|v| !v.is_null())
}

/// First record, latest to oldest, whose marker field for `mode` is non-null.
pub fn first_qualifying(series: &StatementSeries, mode: ScanMode) -> Option<&StatementRecord> {
    series.iter().find(|record| has_value(record, mode.marker()))
}

/// `field` of the first qualifying calendar record, or `None` if nothing qualifies.
pub fn scan_earnings<'a>(data: &FieldAccessor<'a>, field: &str, mode: ScanMode) -> Option<&'a FieldValue> {
    let series = data.series(StatementKind::EarningsCalendar)?;
    first_qualifying(series, mode)?.field(field)
}

/// Sums `field` over the `beg_n`-th through `end_n`-th records (1-based,
/// inclusive) that have a numeric `field`; records without one are not
/// counted. Stops as soon as the `end_n`-th is reached.
///
/// `None` when no record falls inside the window.
pub fn sum_series(series: &StatementSeries, field: &str, beg_n: usize, end_n: usize) -> Option<f64> {
    let mut total: Option<f64> = None;
    let mut counter = 0usize;

    for record in series.iter() {
        if let Some(value) = record.field(field).and_then(FieldValue::as_f64) {
            counter += 1;
            if counter >= beg_n {
                total = Some(total.unwrap_or(0.0) + value);
            }
        }
        if counter >= end_n {
            break;
        }
    }

    total
}

pub fn sum_earnings(data: &FieldAccessor<'_>, field: &str, beg_n: usize, end_n: usize) -> Option<f64> {
    let series = data.series(StatementKind::EarningsCalendar)?;
    sum_series(series, field, beg_n, end_n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TickerStatements;
    use crate::testing::calendar_entry;
    use metrics_core::{ProfileLookup, Ticker};

    fn create_test_calendar(entries: Vec<StatementRecord>) -> TickerStatements {
        TickerStatements::new(ProfileLookup::Unavailable)
            .with_statement(StatementKind::EarningsCalendar, StatementSeries::new(entries))
    }

    #[test]
    fn test_scan_without_qualifying_record() {
        let ticker = Ticker::new("XYZ");
        let data = create_test_calendar(vec![
            calendar_entry("2025-07-30", None, None, None, None),
            calendar_entry("2025-04-30", None, None, None, None),
        ]);
        let acc = FieldAccessor::new(&ticker, Some(&data));

        assert!(scan_earnings(&acc, "date", ScanMode::Estimate).is_none());
        assert!(scan_earnings(&acc, "date", ScanMode::Actual).is_none());
    }

    #[test]
    fn test_scan_finds_third_record() {
        let ticker = Ticker::new("XYZ");
        let data = create_test_calendar(vec![
            calendar_entry("2025-10-30", None, Some(1.5), None, Some(100.0)),
            calendar_entry("2025-07-30", None, Some(1.4), None, Some(95.0)),
            calendar_entry("2025-04-30", Some(1.6), Some(1.3), Some(98.0), Some(90.0)),
        ]);
        let acc = FieldAccessor::new(&ticker, Some(&data));

        let value = scan_earnings(&acc, "epsActual", ScanMode::Actual);
        assert_eq!(value, Some(&FieldValue::Number(1.6)));

        let date = scan_earnings(&acc, "date", ScanMode::Estimate).and_then(|v| v.as_str());
        assert_eq!(date, Some("2025-10-30"));
    }

    #[test]
    fn test_scan_without_calendar() {
        let ticker = Ticker::new("XYZ");
        let acc = FieldAccessor::new(&ticker, None);
        assert!(scan_earnings(&acc, "date", ScanMode::Actual).is_none());
        assert_eq!(sum_earnings(&acc, "epsActual", 1, 4), None);
    }

    #[test]
    fn test_sum_counts_only_non_null_records() {
        let entries: Vec<StatementRecord> = vec![
            calendar_entry("2026-01-30", None, Some(2.0), None, Some(10.0)),
            calendar_entry("2025-10-30", Some(1.0), None, Some(9.0), None),
            calendar_entry("2025-07-30", Some(2.0), None, Some(9.0), None),
            calendar_entry("2025-04-30", Some(3.0), None, Some(9.0), None),
            calendar_entry("2025-01-30", Some(4.0), None, Some(9.0), None),
            calendar_entry("2024-10-30", Some(5.0), None, Some(9.0), None),
            calendar_entry("2024-07-30", Some(6.0), None, Some(9.0), None),
        ];
        let series = StatementSeries::new(entries);

        assert_eq!(sum_series(&series, "epsActual", 1, 4), Some(10.0));
        assert_eq!(sum_series(&series, "epsActual", 5, 8), Some(11.0));
        assert_eq!(sum_series(&series, "epsActual", 9, 12), None);
    }
}
