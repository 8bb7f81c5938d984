use crate::{FormatClass, Metric, MetricRecord, Section, Ticker};
use serde::Serialize;

/// Column descriptor handed to writers alongside the data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Column {
    pub metric: Metric,
    pub label: &'static str,
    pub section: Section,
    pub format: FormatClass,
}

impl Column {
    pub fn of(metric: Metric) -> Self {
        Self {
            metric,
            label: metric.label(),
            section: metric.section(),
            format: metric.format_class(),
        }
    }
}

/// Rows in input order, columns in a fixed order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderedTable {
    pub columns: Vec<Column>,
    pub rows: Vec<MetricRecord>,
}

impl OrderedTable {
    /// Table over the full canonical column set.
    pub fn new(rows: Vec<MetricRecord>) -> Self {
        Self {
            columns: Metric::ALL.iter().copied().map(Column::of).collect(),
            rows,
        }
    }

    pub fn row(&self, ticker: &Ticker) -> Option<&MetricRecord> {
        self.rows.iter().find(|r| r.ticker() == ticker)
    }

    /// Same rows restricted to `columns`, in that order.
    pub fn select(&self, columns: &[Metric]) -> Self {
        Self {
            columns: columns.iter().copied().map(Column::of).collect(),
            rows: self.rows.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A labelled block of rows inside a sheet (one per region).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetGroup {
    pub label: String,
    pub rows: Vec<MetricRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sheet {
    pub name: String,
    pub columns: Vec<Column>,
    pub groups: Vec<SheetGroup>,
}

impl Sheet {
    pub fn row_count(&self) -> usize {
        self.groups.iter().map(|g| g.rows.len()).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}
