use crate::accessor::FieldAccessor;
use crate::calculators::{default_pipeline, MetricCalculator};
use crate::store::StatementStore;
use metrics_core::{MetricRecord, OrderedTable, ReportError, Ticker};
use serde::Serialize;
use std::collections::HashSet;

/// Output of one assembly run: the table plus the tickers that were dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssembledReport {
    pub table: OrderedTable,
    pub not_found: Vec<Ticker>,
}

impl AssembledReport {
    /// User-facing warning for dropped tickers, if any.
    pub fn warning(&self) -> Option<ReportError> {
        if self.not_found.is_empty() {
            return None;
        }
        Some(ReportError::NotFound(
            self.not_found.iter().map(|t| t.to_string()).collect(),
        ))
    }
}

/// Runs the calculator pipeline over every requested ticker.
pub struct ReportAssembler {
    calculators: Vec<Box<dyn MetricCalculator>>,
}

impl Default for ReportAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportAssembler {
    pub fn new() -> Self {
        Self::with_calculators(default_pipeline())
    }

    pub fn with_calculators(calculators: Vec<Box<dyn MetricCalculator>>) -> Self {
        Self { calculators }
    }

    /// Builds one row per requested ticker, in request order.
    ///
    /// Duplicates keep their first position. Tickers the store has never seen,
    /// or whose profile lookup came back empty, are excluded from the table and
    /// reported in `not_found`. A ticker whose profile was merely unavailable
    /// stays in, with whatever its statements support.
    pub fn assemble(&self, tickers: &[Ticker], store: &StatementStore) -> AssembledReport {
        let mut seen = HashSet::new();
        let mut rows = Vec::new();
        let mut not_found = Vec::new();

        for ticker in tickers {
            if !seen.insert(ticker) {
                continue;
            }

            match store.get(ticker) {
                Some(data) if !data.profile().is_not_found() => {
                    rows.push(self.derive(&FieldAccessor::new(ticker, Some(data))));
                }
                _ => not_found.push(ticker.clone()),
            }
        }

        if !not_found.is_empty() {
            tracing::warn!("Tickers not found: {:?}", not_found.iter().map(Ticker::as_str).collect::<Vec<_>>());
        }
        tracing::debug!("Assembled {} rows from {} tickers", rows.len(), seen.len());

        AssembledReport {
            table: OrderedTable::new(rows),
            not_found,
        }
    }

    fn derive(&self, data: &FieldAccessor<'_>) -> MetricRecord {
        let mut record = MetricRecord::new(data.ticker().clone());
        for calculator in &self.calculators {
            let set = calculator.calculate(data, &record);
            tracing::trace!("{} => {} values for {}", calculator.name(), set.len(), data.ticker());
            record.merge(set);
        }
        record
    }
}
