use metric_engine::render;
use metrics_core::{FormatClass, MetricValue, ReportError, Sheet, SheetWriter};

/// Writes a sheet as CSV: a section banner row, then per region group a label
/// row, the column headers and the rendered rows. Groups are separated by an
/// empty row.
///
/// By default cells are rendered for reading (`12.3%`, `1.2B`). In raw mode
/// numbers are written at full precision so a spreadsheet can apply its own
/// number formats.
#[derive(Debug, Default)]
pub struct CsvSheetWriter {
    raw_numbers: bool,
}

impl CsvSheetWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw() -> Self {
        Self { raw_numbers: true }
    }

    fn cell(&self, value: &MetricValue, format: FormatClass) -> String {
        match value {
            MetricValue::Number(n) if self.raw_numbers => n.to_string(),
            _ => render(value, format),
        }
    }

    /// Section label above the first column of each section, blank elsewhere.
    fn section_row(sheet: &Sheet) -> Vec<&'static str> {
        let mut previous = None;
        sheet
            .columns
            .iter()
            .map(|column| {
                if previous == Some(column.section) {
                    ""
                } else {
                    previous = Some(column.section);
                    column.section.label()
                }
            })
            .collect()
    }
}

fn export_error(e: impl std::fmt::Display) -> ReportError {
    ReportError::ExportError(e.to_string())
}

impl SheetWriter for CsvSheetWriter {
    fn extension(&self) -> &'static str {
        "csv"
    }

    fn write_sheet(&self, sheet: &Sheet) -> Result<Vec<u8>, ReportError> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());
        let width = sheet.columns.len().max(2);

        writer.write_record(Self::section_row(sheet)).map_err(export_error)?;

        for (i, group) in sheet.groups.iter().enumerate() {
            if i > 0 {
                writer.write_record(vec![""; width]).map_err(export_error)?;
            }
            writer.write_record([group.label.as_str()]).map_err(export_error)?;
            writer
                .write_record(sheet.columns.iter().map(|c| c.label))
                .map_err(export_error)?;

            for row in &group.rows {
                writer
                    .write_record(sheet.columns.iter().map(|c| self.cell(row.get(c.metric), c.format)))
                    .map_err(export_error)?;
            }
        }

        writer.into_inner().map_err(export_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_core::{Column, Metric, MetricRecord, SheetGroup, Ticker};

    fn create_test_sheet() -> Sheet {
        let mut aapl = MetricRecord::new(Ticker::new("AAPL"));
        aapl.set(Metric::MarketCap, MetricValue::Number(3.2e12));
        aapl.set(Metric::Roic, MetricValue::Number(0.3127));
        let baba = MetricRecord::new(Ticker::new("BABA"));

        Sheet {
            name: "Value Stock".to_string(),
            columns: [Metric::Ticker, Metric::MarketCap, Metric::Roic]
                .into_iter()
                .map(Column::of)
                .collect(),
            groups: vec![
                SheetGroup { label: "United States Value".to_string(), rows: vec![aapl] },
                SheetGroup { label: "China Value".to_string(), rows: vec![baba] },
            ],
        }
    }

    fn read_back(bytes: &[u8]) -> Vec<Vec<String>> {
        csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes)
            .records()
            .map(|r| r.unwrap().iter().map(String::from).collect())
            .collect()
    }

    #[test]
    fn test_write_sheet() {
        let bytes = CsvSheetWriter::new().write_sheet(&create_test_sheet()).unwrap();
        let rows = read_back(&bytes);

        assert_eq!(rows[0], vec!["(A) Basic Info", "", "(E) Financial Ratio"]);
        assert_eq!(rows[1], vec!["United States Value"]);
        assert_eq!(rows[2], vec!["Ticker", "Market Cap", "ROIC"]);
        assert_eq!(rows[3], vec!["AAPL", "3,200.0B", "31.3%"]);
        assert_eq!(rows[4], vec!["", "", ""]);
        assert_eq!(rows[5], vec!["China Value"]);
        assert_eq!(rows[7], vec!["BABA", "", ""]);
        assert_eq!(rows.len(), 8);
    }

    #[test]
    fn test_raw_numbers_keep_precision() {
        let bytes = CsvSheetWriter::raw().write_sheet(&create_test_sheet()).unwrap();
        let rows = read_back(&bytes);

        assert_eq!(rows[2], vec!["Ticker", "Market Cap", "ROIC"]);
        assert_eq!(rows[3], vec!["AAPL", "3200000000000", "0.3127"]);
        assert_eq!(rows[7], vec!["BABA", "", ""]);
    }

    #[test]
    fn test_extension() {
        assert_eq!(CsvSheetWriter::new().extension(), "csv");
    }
}
