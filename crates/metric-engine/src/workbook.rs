use crate::assembler::AssembledReport;
use crate::input::{Region, WatchlistSet};
use metrics_core::{Column, Sheet, SheetGroup, Workbook};
use std::collections::HashSet;

/// Splits an assembled report into one sheet per non-empty watchlist group.
///
/// Rows are grouped by region (United States, China, Japan). Tickers the
/// report dropped as not found are skipped, a ticker listed twice in the same
/// sheet appears once, and groups or sheets left without rows are omitted.
pub fn build_workbook(report: &AssembledReport, watchlists: &WatchlistSet) -> Workbook {
    let mut sheets = Vec::new();

    for group in watchlists.groups() {
        let columns: Vec<Column> = group.layout().columns().into_iter().map(Column::of).collect();
        let mut placed = HashSet::new();
        let mut groups = Vec::new();

        for region in Region::SHEET_ORDER {
            let rows: Vec<_> = watchlists
                .tickers(group, region)
                .iter()
                .filter(|ticker| placed.insert(*ticker))
                .filter_map(|ticker| report.table.row(ticker).cloned())
                .collect();

            if !rows.is_empty() {
                groups.push(SheetGroup {
                    label: format!("{} {}", region.label(), group.short_name()),
                    rows,
                });
            }
        }

        if groups.is_empty() {
            tracing::debug!("Skipping empty sheet {}", group.label());
            continue;
        }
        sheets.push(Sheet {
            name: group.label().to_string(),
            columns,
            groups,
        });
    }

    Workbook { sheets }
}
