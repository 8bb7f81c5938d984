use metrics_core::{ProfileLookup, StatementKind, StatementSeries, Ticker};
use std::collections::HashMap;

/// Everything fetched for one ticker. A kind missing from the map is the
/// absent marker (never fetched, timed out, or rejected by the provider).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickerStatements {
    profile: ProfileLookup,
    statements: HashMap<StatementKind, StatementSeries>,
}

impl TickerStatements {
    pub fn new(profile: ProfileLookup) -> Self {
        Self {
            profile,
            statements: HashMap::new(),
        }
    }

    pub fn with_statement(mut self, kind: StatementKind, series: StatementSeries) -> Self {
        self.insert_statement(kind, series);
        self
    }

    pub fn insert_statement(&mut self, kind: StatementKind, series: StatementSeries) {
        self.statements.insert(kind, series);
    }

    pub fn profile(&self) -> &ProfileLookup {
        &self.profile
    }

    pub fn statement(&self, kind: StatementKind) -> Option<&StatementSeries> {
        self.statements.get(&kind)
    }

    pub fn statement_count(&self) -> usize {
        self.statements.len()
    }
}

/// Per-run store of raw statements, keyed by ticker.
///
/// Populated once, then only read. A second insert for the same ticker is
/// ignored so the first snapshot wins.
#[derive(Debug, Clone, Default)]
pub struct StatementStore {
    entries: HashMap<Ticker, TickerStatements>,
}

impl StatementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the ticker was already present.
    pub fn insert(&mut self, ticker: Ticker, statements: TickerStatements) -> bool {
        if self.entries.contains_key(&ticker) {
            return false;
        }
        self.entries.insert(ticker, statements);
        true
    }

    pub fn get(&self, ticker: &Ticker) -> Option<&TickerStatements> {
        self.entries.get(ticker)
    }

    pub fn contains(&self, ticker: &Ticker) -> bool {
        self.entries.contains_key(ticker)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
