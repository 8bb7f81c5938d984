//! Ticker input parsing and watchlist grouping.

use crate::layout::SheetLayout;
use metrics_core::{ReportError, Ticker};
use std::collections::{BTreeMap, HashSet};

fn is_ticker_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '=' | '&')
}

/// Splits free-form input into tickers, uppercased and deduplicated in order.
///
/// Accepts `,`, `;` and whitespace as delimiters. Anything else between
/// symbols is rejected.
pub fn parse_tickers(text: &str) -> Result<Vec<Ticker>, ReportError> {
    let mut seen = HashSet::new();
    let mut tickers = Vec::new();

    for token in text.split(|c: char| c == ',' || c == ';' || c.is_whitespace()) {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        if !token.chars().all(is_ticker_char) {
            return Err(ReportError::InvalidInput("Please use comma as delimiter.".to_string()));
        }
        let ticker = Ticker::new(token);
        if seen.insert(ticker.clone()) {
            tickers.push(ticker);
        }
    }

    Ok(tickers)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    UnitedStates,
    China,
    Japan,
}

impl Region {
    /// Order of region blocks inside a sheet.
    pub const SHEET_ORDER: [Region; 3] = [Region::UnitedStates, Region::China, Region::Japan];
    /// Order regions are concatenated into the fetch list.
    pub const MASTER_ORDER: [Region; 3] = [Region::China, Region::UnitedStates, Region::Japan];

    pub fn label(&self) -> &'static str {
        match self {
            Region::UnitedStates => "United States",
            Region::China => "China",
            Region::Japan => "Japan",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WatchlistGroup {
    Value,
    Growth,
    Theme,
    Watchlist,
}

impl WatchlistGroup {
    pub const ALL: [WatchlistGroup; 4] = [
        WatchlistGroup::Value,
        WatchlistGroup::Growth,
        WatchlistGroup::Theme,
        WatchlistGroup::Watchlist,
    ];

    /// Sheet name.
    pub fn label(&self) -> &'static str {
        match self {
            WatchlistGroup::Value => "Value Stock",
            WatchlistGroup::Growth => "Growth Stock",
            WatchlistGroup::Theme => "Theme Stock",
            WatchlistGroup::Watchlist => "Watchlist Stock",
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            WatchlistGroup::Value => "Value",
            WatchlistGroup::Growth => "Growth",
            WatchlistGroup::Theme => "Theme",
            WatchlistGroup::Watchlist => "Watchlist",
        }
    }

    pub fn layout(&self) -> SheetLayout {
        match self {
            WatchlistGroup::Value => SheetLayout::Value,
            _ => SheetLayout::Standard,
        }
    }
}

/// Tickers entered per watchlist group and region.
#[derive(Debug, Clone, Default)]
pub struct WatchlistSet {
    lists: BTreeMap<(WatchlistGroup, Region), Vec<Ticker>>,
}

impl WatchlistSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `text` and appends it to the group/region list.
    pub fn add(&mut self, group: WatchlistGroup, region: Region, text: &str) -> Result<(), ReportError> {
        let parsed = parse_tickers(text)?;
        let list = self.lists.entry((group, region)).or_default();
        for ticker in parsed {
            if !list.contains(&ticker) {
                list.push(ticker);
            }
        }
        Ok(())
    }

    pub fn tickers(&self, group: WatchlistGroup, region: Region) -> &[Ticker] {
        self.lists.get(&(group, region)).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Groups with at least one ticker, in sheet order.
    pub fn groups(&self) -> Vec<WatchlistGroup> {
        WatchlistGroup::ALL
            .into_iter()
            .filter(|g| Region::SHEET_ORDER.iter().any(|r| !self.tickers(*g, *r).is_empty()))
            .collect()
    }

    /// Every ticker to fetch: per group CN + US + JP, groups in order,
    /// deduplicated across the whole set.
    pub fn master_list(&self) -> Result<Vec<Ticker>, ReportError> {
        let mut seen = HashSet::new();
        let mut master = Vec::new();

        for group in WatchlistGroup::ALL {
            for region in Region::MASTER_ORDER {
                for ticker in self.tickers(group, region) {
                    if seen.insert(ticker) {
                        master.push(ticker.clone());
                    }
                }
            }
        }

        if master.is_empty() {
            return Err(ReportError::EmptyInput);
        }
        Ok(master)
    }
}
