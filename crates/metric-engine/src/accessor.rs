use crate::store::{StatementStore, TickerStatements};
use chrono::NaiveDate;
use metrics_core::{sum_all, FieldValue, StatementKind, StatementRecord, StatementSeries, Ticker};
use std::ops::Range;

/// Point-in-time lookups into one ticker's statements.
///
/// Offsets count back from the latest record (0 = latest). The accessor never
/// fails: a missing ticker, statement kind, record or field key resolves to the
/// caller's default, while a field the provider sent as `null` resolves to
/// `None` regardless of the default.
#[derive(Debug, Clone, Copy)]
pub struct FieldAccessor<'a> {
    ticker: &'a Ticker,
    data: Option<&'a TickerStatements>,
}

impl<'a> FieldAccessor<'a> {
    pub fn new(ticker: &'a Ticker, data: Option<&'a TickerStatements>) -> Self {
        Self { ticker, data }
    }

    pub fn from_store(store: &'a StatementStore, ticker: &'a Ticker) -> Self {
        Self::new(ticker, store.get(ticker))
    }

    pub fn ticker(&self) -> &'a Ticker {
        self.ticker
    }

    pub fn series(&self, kind: StatementKind) -> Option<&'a StatementSeries> {
        self.data?.statement(kind)
    }

    pub fn series_len(&self, kind: StatementKind) -> usize {
        self.series(kind).map(|s| s.len()).unwrap_or(0)
    }

    pub fn lookup(&self, kind: StatementKind, offset: usize) -> Option<&'a StatementRecord> {
        self.series(kind)?.get(offset)
    }

    /// Numeric field at `offset`, or `default` when it cannot be located.
    ///
    /// Dividend history has no meaningful default: an absent or empty series
    /// always yields `None`.
    pub fn get(&self, kind: StatementKind, field: &str, offset: usize, default: Option<f64>) -> Option<f64> {
        if kind == StatementKind::DividendHistory && self.series_len(kind) == 0 {
            return None;
        }

        match self.lookup(kind, offset).and_then(|r| r.field(field)) {
            Some(value) => value.as_f64(),
            None => default,
        }
    }

    /// [`get`](Self::get) with the conventional `0.0` default.
    pub fn number(&self, kind: StatementKind, field: &str, offset: usize) -> Option<f64> {
        self.get(kind, field, offset, Some(0.0))
    }

    /// [`get`](Self::get) with no default.
    pub fn optional(&self, kind: StatementKind, field: &str, offset: usize) -> Option<f64> {
        self.get(kind, field, offset, None)
    }

    pub fn text(&self, kind: StatementKind, field: &str, offset: usize) -> Option<&'a str> {
        self.lookup(kind, offset)?.field(field)?.as_str()
    }

    pub fn date(&self, kind: StatementKind, field: &str, offset: usize) -> Option<NaiveDate> {
        self.lookup(kind, offset)?.field(field)?.as_date()
    }

    /// Sum of `field` over `offsets`, each defaulting to `0.0`. Any explicit
    /// null in the range makes the whole sum `None`.
    pub fn sum(&self, kind: StatementKind, field: &str, offsets: Range<usize>) -> Option<f64> {
        sum_all(offsets.map(|i| self.number(kind, field, i)))
    }

    /// Like [`sum`](Self::sum) but without a default: a missing record, kind
    /// or key makes the whole sum `None`.
    pub fn sum_optional(&self, kind: StatementKind, field: &str, offsets: Range<usize>) -> Option<f64> {
        sum_all(offsets.map(|i| self.optional(kind, field, i)))
    }

    /// Trailing twelve months: the latest four records.
    pub fn ttm(&self, kind: StatementKind, field: &str) -> Option<f64> {
        self.sum(kind, field, 0..4)
    }

    pub fn ttm_optional(&self, kind: StatementKind, field: &str) -> Option<f64> {
        self.sum_optional(kind, field, 0..4)
    }

    fn profile_field(&self, field: &str) -> Option<&'a FieldValue> {
        self.data?.profile().record()?.field(field)
    }

    pub fn has_profile(&self) -> bool {
        self.data.and_then(|d| d.profile().record()).is_some()
    }

    pub fn profile_number(&self, field: &str) -> Option<f64> {
        self.profile_field(field)?.as_f64()
    }

    pub fn profile_text(&self, field: &str) -> Option<&'a str> {
        self.profile_field(field)?.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{resolved_profile, series};
    use metrics_core::{ProfileLookup, StatementKind::*};

    fn create_test_statements() -> TickerStatements {
        TickerStatements::new(resolved_profile("XYZ"))
            .with_statement(QuarterlyIncome, series("netIncome", &[Some(100.0), Some(90.0), Some(80.0), Some(70.0)]))
            .with_statement(AnnualIncome, series("eps", &[Some(2.0), None]))
            .with_statement(DividendHistory, StatementSeries::default())
    }

    #[test]
    fn test_missing_ticker_returns_default() {
        let ticker = Ticker::new("NONE");
        let acc = FieldAccessor::new(&ticker, None);
        assert_eq!(acc.number(AnnualIncome, "revenue", 0), Some(0.0));
        assert_eq!(acc.optional(AnnualIncome, "revenue", 0), None);
        assert_eq!(acc.get(AnnualIncome, "revenue", 0, Some(7.5)), Some(7.5));
        assert!(!acc.has_profile());
    }

    #[test]
    fn test_missing_kind_offset_and_key_return_default() {
        let ticker = Ticker::new("XYZ");
        let data = create_test_statements();
        let acc = FieldAccessor::new(&ticker, Some(&data));

        assert_eq!(acc.number(QuarterlyBalance, "totalEquity", 0), Some(0.0));
        assert_eq!(acc.number(QuarterlyIncome, "netIncome", 4), Some(0.0));
        assert_eq!(acc.number(QuarterlyIncome, "revenue", 0), Some(0.0));
        assert_eq!(acc.number(QuarterlyIncome, "netIncome", 1), Some(90.0));
    }

    #[test]
    fn test_explicit_null_ignores_default() {
        let ticker = Ticker::new("XYZ");
        let data = create_test_statements();
        let acc = FieldAccessor::new(&ticker, Some(&data));

        assert_eq!(acc.number(AnnualIncome, "eps", 1), None);
        assert_eq!(acc.sum(AnnualIncome, "eps", 0..2), None);
        assert_eq!(acc.ttm(QuarterlyIncome, "netIncome"), Some(340.0));
    }

    #[test]
    fn test_optional_sum_has_no_default() {
        let ticker = Ticker::new("XYZ");
        let data = create_test_statements();
        let acc = FieldAccessor::new(&ticker, Some(&data));

        assert_eq!(acc.ttm_optional(QuarterlyIncome, "netIncome"), Some(340.0));
        assert_eq!(acc.ttm_optional(QuarterlyIncome, "grossProfit"), None);
        assert_eq!(acc.sum_optional(QuarterlyIncome, "netIncome", 0..5), None);
        assert_eq!(acc.ttm(QuarterlyIncome, "grossProfit"), Some(0.0));
    }

    #[test]
    fn test_dividend_history_empty_is_null() {
        let ticker = Ticker::new("XYZ");
        let data = create_test_statements();
        let acc = FieldAccessor::new(&ticker, Some(&data));
        assert_eq!(acc.number(DividendHistory, "dividend", 0), None);

        let bare = TickerStatements::new(ProfileLookup::Unavailable);
        let acc = FieldAccessor::new(&ticker, Some(&bare));
        assert_eq!(acc.number(DividendHistory, "dividend", 0), None);
    }

    #[test]
    fn test_profile_fields() {
        let ticker = Ticker::new("XYZ");
        let data = create_test_statements();
        let acc = FieldAccessor::new(&ticker, Some(&data));
        assert!(acc.has_profile());
        assert_eq!(acc.profile_text("symbol"), Some("XYZ"));
        assert_eq!(acc.profile_number("price"), Some(100.0));
    }
}
