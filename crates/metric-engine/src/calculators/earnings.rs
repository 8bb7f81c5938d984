use super::MetricCalculator;
use crate::accessor::FieldAccessor;
use crate::fields;
use crate::scan::{scan_earnings, ScanMode};
use metrics_core::{safe_div, FieldValue, Metric, MetricRecord, MetricSet};

/// Next scheduled report and the latest beat / miss, from the earnings calendar.
pub struct EarningsCalculator;

fn scan_number(data: &FieldAccessor<'_>, field: &str, mode: ScanMode) -> Option<f64> {
    scan_earnings(data, field, mode).and_then(FieldValue::as_f64)
}

impl MetricCalculator for EarningsCalculator {
    fn name(&self) -> &'static str {
        "earnings"
    }

    fn calculate(&self, data: &FieldAccessor<'_>, _computed: &MetricRecord) -> MetricSet {
        let next_date = scan_earnings(data, fields::DATE, ScanMode::Estimate).and_then(FieldValue::as_date);
        let next_eps = scan_number(data, fields::EPS_ESTIMATED, ScanMode::Estimate);
        let next_revenue = scan_number(data, fields::REVENUE_ESTIMATED, ScanMode::Estimate);

        let beat = safe_div(
            scan_number(data, fields::EPS_ACTUAL, ScanMode::Actual),
            scan_number(data, fields::EPS_ESTIMATED, ScanMode::Actual),
        )
        .map(|ratio| ratio - 1.0);
        let updated_on = scan_earnings(data, fields::DATE, ScanMode::Actual).and_then(FieldValue::as_date);

        vec![
            (Metric::NextEarningsDate, next_date.into()),
            (Metric::NextEarningsEstimateEps, next_eps.into()),
            (Metric::NextEarningsEstimateRevenue, next_revenue.into()),
            (Metric::BeatEstimate, beat.into()),
            (Metric::BeatEstimateUpdatedOn, updated_on.into()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TickerStatements;
    use crate::testing::{calendar_entry, full_statements};
    use chrono::NaiveDate;
    use metrics_core::{MetricValue, ProfileLookup, StatementKind, StatementSeries, Ticker};

    fn run(data: &TickerStatements) -> MetricRecord {
        let ticker = Ticker::new("XYZ");
        let acc = FieldAccessor::new(&ticker, Some(data));
        let mut record = MetricRecord::new(ticker.clone());
        record.merge(EarningsCalculator.calculate(&acc, &record));
        record
    }

    fn date(y: i32, m: u32, d: u32) -> MetricValue {
        MetricValue::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_next_and_latest_report() {
        let record = run(&full_statements("XYZ"));

        assert_eq!(record.get(Metric::NextEarningsDate), &date(2026, 1, 29));
        assert_eq!(record.number(Metric::NextEarningsEstimateEps), Some(2.6));
        assert_eq!(record.number(Metric::NextEarningsEstimateRevenue), Some(1.3e11));

        let beat = record.number(Metric::BeatEstimate).unwrap();
        assert!((beat - (1.8 / 1.6 - 1.0)).abs() < 1e-12);
        assert_eq!(record.get(Metric::BeatEstimateUpdatedOn), &date(2025, 10, 30));
    }

    #[test]
    fn test_calendar_without_actuals() {
        let data = TickerStatements::new(ProfileLookup::Unavailable).with_statement(
            StatementKind::EarningsCalendar,
            StatementSeries::new(vec![calendar_entry("2026-04-30", None, Some(1.2), None, Some(9.0e10))]),
        );
        let record = run(&data);

        assert_eq!(record.get(Metric::NextEarningsDate), &date(2026, 4, 30));
        assert!(record.get(Metric::BeatEstimate).is_null());
        assert!(record.get(Metric::BeatEstimateUpdatedOn).is_null());
    }

    #[test]
    fn test_zero_estimate_is_null() {
        let data = TickerStatements::new(ProfileLookup::Unavailable).with_statement(
            StatementKind::EarningsCalendar,
            StatementSeries::new(vec![calendar_entry("2025-10-30", Some(0.4), Some(0.0), Some(5.0), Some(5.0))]),
        );
        assert!(run(&data).get(Metric::BeatEstimate).is_null());
    }
}
