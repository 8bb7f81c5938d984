//! Shared fixtures for unit tests.

use crate::store::{StatementStore, TickerStatements};
use async_trait::async_trait;
use metrics_core::{
    ProfileLookup, StatementKind, StatementRecord, StatementSeries, StatementSource, Ticker,
};
use std::collections::HashMap;

/// Single-field series, latest first. `None` entries are sent as JSON null.
pub(crate) fn series(field: &str, values: &[Option<f64>]) -> StatementSeries {
    values
        .iter()
        .map(|v| StatementRecord::new().with(field, *v))
        .collect()
}

/// Multi-field series built column by column; all columns must be equally long.
pub(crate) fn table(columns: &[(&str, Vec<f64>)]) -> StatementSeries {
    let rows = columns.first().map(|(_, values)| values.len()).unwrap_or(0);
    (0..rows)
        .map(|i| {
            columns
                .iter()
                .fold(StatementRecord::new(), |record, (field, values)| record.with(field, values[i]))
        })
        .collect()
}

pub(crate) fn resolved_profile(symbol: &str) -> ProfileLookup {
    ProfileLookup::Resolved(
        StatementRecord::new()
            .with("companyName", format!("{} Inc.", symbol).as_str())
            .with("symbol", symbol)
            .with("sector", "Technology")
            .with("currency", "USD")
            .with("price", 100.0)
            .with("marketCap", 2.5e12)
            .with("beta", 1.2),
    )
}

pub(crate) fn calendar_entry(
    date: &str,
    eps_actual: Option<f64>,
    eps_estimated: Option<f64>,
    revenue_actual: Option<f64>,
    revenue_estimated: Option<f64>,
) -> StatementRecord {
    StatementRecord::new()
        .with("date", date)
        .with("epsActual", eps_actual)
        .with("epsEstimated", eps_estimated)
        .with("revenueActual", revenue_actual)
        .with("revenueEstimated", revenue_estimated)
}

/// A ticker with enough history for every metric family.
pub(crate) fn full_statements(symbol: &str) -> TickerStatements {
    use StatementKind::*;

    let calendar = StatementSeries::new(vec![
        calendar_entry("2026-01-29", None, Some(2.6), None, Some(1.3e11)),
        calendar_entry("2025-10-30", Some(1.8), Some(1.6), Some(1.0e11), Some(0.98e11)),
        calendar_entry("2025-07-31", Some(1.6), Some(1.5), Some(0.95e11), Some(0.9e11)),
        calendar_entry("2025-05-01", Some(1.6), Some(1.6), Some(0.95e11), Some(0.94e11)),
        calendar_entry("2025-01-30", Some(2.4), Some(2.3), Some(1.2e11), Some(1.2e11)),
        calendar_entry("2024-10-31", Some(1.6), Some(1.6), Some(0.9e11), Some(0.9e11)),
        calendar_entry("2024-08-01", Some(1.4), Some(1.3), Some(0.85e11), Some(0.85e11)),
        calendar_entry("2024-05-02", Some(1.5), Some(1.5), Some(0.9e11), Some(0.9e11)),
        calendar_entry("2024-02-01", Some(2.2), Some(2.1), Some(1.1e11), Some(1.1e11)),
    ]);

    TickerStatements::new(resolved_profile(symbol))
        .with_statement(
            AnnualIncome,
            table(&[
                ("revenue", vec![400.0, 380.0, 360.0, 340.0, 300.0]),
                ("netIncome", vec![100.0, 95.0, 90.0, 80.0, 70.0]),
                ("eps", vec![6.0, 5.5, 5.0, 4.5, 4.0]),
            ]),
        )
        .with_statement(
            QuarterlyIncome,
            table(&[
                ("revenue", vec![110.0, 100.0, 95.0, 95.0, 90.0, 85.0, 90.0, 105.0]),
                ("grossProfit", vec![50.0, 45.0, 42.0, 43.0, 40.0, 38.0, 40.0, 47.0]),
                ("netIncome", vec![30.0, 25.0, 24.0, 21.0, 22.0, 20.0, 21.0, 27.0]),
                ("eps", vec![1.8, 1.6, 1.6, 2.4, 1.6, 1.4, 1.5, 2.2]),
                ("ebit", vec![36.0, 30.0, 29.0, 25.0, 26.0, 24.0, 25.0, 32.0]),
            ]),
        )
        .with_statement(
            AnnualBalance,
            table(&[
                ("totalEquity", vec![250.0, 240.0, 230.0, 220.0, 200.0]),
                ("netReceivables", vec![40.0, 38.0, 36.0, 34.0, 30.0]),
                ("inventory", vec![20.0, 19.0, 18.0, 17.0, 15.0]),
            ]),
        )
        .with_statement(
            QuarterlyBalance,
            table(&[
                ("totalEquity", vec![260.0, 255.0]),
                ("totalDebt", vec![120.0, 118.0]),
                ("netDebt", vec![65.0, 60.0]),
                ("cashAndCashEquivalents", vec![55.0, 58.0]),
            ]),
        )
        .with_statement(
            AnnualCashFlow,
            table(&[("capitalExpenditure", vec![-10.0, -9.0, -9.0, -8.0, -7.0])]),
        )
        .with_statement(
            QuarterlyCashFlow,
            table(&[("capitalExpenditure", vec![-3.0, -2.5, -2.5, -2.0])]),
        )
        .with_statement(
            AnnualRatios,
            table(&[
                ("grossProfitMargin", vec![0.45, 0.44, 0.43, 0.42, 0.41]),
                ("effectiveTaxRate", vec![0.15, 0.16, 0.16, 0.17, 0.18]),
            ]),
        )
        .with_statement(QuarterlyRatios, table(&[("grossProfitMargin", vec![0.4545])]))
        .with_statement(
            TrailingRatios,
            table(&[
                ("dividendYieldTTM", vec![0.005]),
                ("priceToEarningsRatioTTM", vec![30.0]),
                ("priceToEarningsGrowthRatioTTM", vec![2.5]),
                ("dividendPayoutRatioTTM", vec![0.15]),
            ]),
        )
        .with_statement(
            DividendHistory,
            StatementSeries::new(vec![
                StatementRecord::new().with("recordDate", "2025-11-10").with("dividend", 0.26),
                StatementRecord::new().with("recordDate", "2025-08-11").with("dividend", 0.25),
            ]),
        )
        .with_statement(EarningsCalendar, calendar)
}

/// In-memory source. Tickers listed in `panics` blow up mid-fetch.
#[derive(Default)]
pub(crate) struct MockSource {
    pub statements: HashMap<Ticker, TickerStatements>,
    pub panics: Vec<Ticker>,
}

impl MockSource {
    pub fn with(mut self, ticker: &str, statements: TickerStatements) -> Self {
        self.statements.insert(Ticker::new(ticker), statements);
        self
    }
}

#[async_trait]
impl StatementSource for MockSource {
    async fn fetch_profile(&self, ticker: &Ticker) -> ProfileLookup {
        if self.panics.contains(ticker) {
            panic!("simulated fetch failure for {}", ticker);
        }
        self.statements
            .get(ticker)
            .map(|s| s.profile().clone())
            .unwrap_or(ProfileLookup::NotFound)
    }

    async fn fetch_statement(&self, ticker: &Ticker, kind: StatementKind) -> Option<StatementSeries> {
        self.statements.get(ticker)?.statement(kind).cloned()
    }
}

pub(crate) fn store_with(entries: Vec<(&str, TickerStatements)>) -> StatementStore {
    let mut store = StatementStore::new();
    for (ticker, statements) in entries {
        store.insert(Ticker::new(ticker), statements);
    }
    store
}
