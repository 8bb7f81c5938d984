//! Fundamental metric derivation over per-ticker statement snapshots.
//!
//! Data flows one way: [`fetcher`] fills a [`StatementStore`], calculators read
//! it through a [`FieldAccessor`], and [`ReportAssembler`] merges their output
//! into an ordered table that [`workbook`] splits into sheets.

pub mod accessor;
pub mod assembler;
pub mod calculators;
pub mod fetcher;
pub mod fields;
pub mod format;
pub mod input;
pub mod layout;
pub mod scan;
pub mod store;
pub mod workbook;

#[cfg(test)]
pub(crate) mod testing;

pub use accessor::FieldAccessor;
pub use assembler::{AssembledReport, ReportAssembler};
pub use calculators::{default_pipeline, Horizon, MetricCalculator};
pub use fetcher::{fetch_ticker, populate_store};
pub use format::{format_number, format_percentage, render};
pub use input::{parse_tickers, Region, WatchlistGroup, WatchlistSet};
pub use layout::SheetLayout;
pub use scan::{scan_earnings, sum_earnings, ScanMode};
pub use store::{StatementStore, TickerStatements};
pub use workbook::build_workbook;
