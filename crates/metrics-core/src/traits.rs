use async_trait::async_trait;
use crate::{ProfileLookup, ReportError, Sheet, StatementKind, StatementSeries, Ticker};

/// Fetch collaborator that supplies raw statements for a ticker.
///
/// Implementations swallow transport failures: a statement that could not be
/// retrieved is reported as `None`, exactly like one the provider does not have.
#[async_trait]
pub trait StatementSource: Send + Sync {
    async fn fetch_profile(&self, ticker: &Ticker) -> ProfileLookup;

    async fn fetch_statement(&self, ticker: &Ticker, kind: StatementKind) -> Option<StatementSeries>;
}

/// Renders one sheet into a downloadable blob.
pub trait SheetWriter: Send + Sync {
    fn extension(&self) -> &'static str;

    fn write_sheet(&self, sheet: &Sheet) -> Result<Vec<u8>, ReportError>;
}
