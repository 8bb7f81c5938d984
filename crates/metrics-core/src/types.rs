use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Normalized equity symbol (trimmed, uppercased).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticker(String);

impl Ticker {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Ticker {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// Every statement family fetched per ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatementKind {
    AnnualIncome,
    QuarterlyIncome,
    AnnualBalance,
    QuarterlyBalance,
    AnnualCashFlow,
    QuarterlyCashFlow,
    AnnualRatios,
    QuarterlyRatios,
    TrailingRatios,
    DividendHistory,
    EarningsCalendar,
}

impl StatementKind {
    pub const ALL: [StatementKind; 11] = [
        StatementKind::AnnualIncome,
        StatementKind::QuarterlyIncome,
        StatementKind::AnnualBalance,
        StatementKind::QuarterlyBalance,
        StatementKind::AnnualCashFlow,
        StatementKind::QuarterlyCashFlow,
        StatementKind::AnnualRatios,
        StatementKind::QuarterlyRatios,
        StatementKind::TrailingRatios,
        StatementKind::DividendHistory,
        StatementKind::EarningsCalendar,
    ];

    /// Provider endpoint path segment.
    pub fn endpoint(&self) -> &'static str {
        match self {
            StatementKind::AnnualIncome | StatementKind::QuarterlyIncome => "income-statement",
            StatementKind::AnnualBalance | StatementKind::QuarterlyBalance => "balance-sheet-statement",
            StatementKind::AnnualCashFlow | StatementKind::QuarterlyCashFlow => "cash-flow-statement",
            StatementKind::AnnualRatios | StatementKind::QuarterlyRatios => "ratios",
            StatementKind::TrailingRatios => "ratios-ttm",
            StatementKind::DividendHistory => "dividends",
            StatementKind::EarningsCalendar => "earnings",
        }
    }

    /// Reporting period query value, if the endpoint takes one.
    pub fn period(&self) -> Option<&'static str> {
        match self {
            StatementKind::AnnualIncome
            | StatementKind::AnnualBalance
            | StatementKind::AnnualCashFlow
            | StatementKind::AnnualRatios => Some("annual"),
            StatementKind::QuarterlyIncome
            | StatementKind::QuarterlyBalance
            | StatementKind::QuarterlyCashFlow
            | StatementKind::QuarterlyRatios => Some("quarterly"),
            _ => None,
        }
    }

    pub fn is_quarterly(&self) -> bool {
        self.period() == Some("quarterly")
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.period() {
            Some(period) => write!(f, "{} ({})", self.endpoint(), period),
            None => f.write_str(self.endpoint()),
        }
    }
}

/// A single scalar line item as delivered by the provider.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Nested arrays and objects have no scalar form and are skipped.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(FieldValue::Null),
            Value::Bool(b) => Some(FieldValue::Bool(*b)),
            Value::Number(n) => n.as_f64().map(FieldValue::Number),
            Value::String(s) => Some(FieldValue::Text(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Parses `YYYY-MM-DD`, ignoring any trailing time component.
    pub fn as_date(&self) -> Option<NaiveDate> {
        let text = self.as_str()?;
        let day = text.get(..10).unwrap_or(text);
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<Option<f64>> for FieldValue {
    fn from(n: Option<f64>) -> Self {
        n.map(FieldValue::Number).unwrap_or(FieldValue::Null)
    }
}

/// One statement row: field name to scalar value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatementRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl StatementRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `None` when `value` is not a JSON object.
    pub fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let fields = object
            .iter()
            .filter_map(|(name, v)| FieldValue::from_json(v).map(|fv| (name.clone(), fv)))
            .collect();
        Some(Self { fields })
    }

    pub fn with(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<FieldValue>) {
        self.fields.insert(name.to_string(), value.into());
    }

    /// `None` means the key is missing; `Some(FieldValue::Null)` means it was sent as null.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Records ordered most recent first, exactly as received.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatementSeries(Vec<StatementRecord>);

impl StatementSeries {
    pub fn new(records: Vec<StatementRecord>) -> Self {
        Self(records)
    }

    /// Non-object elements are dropped; a non-array payload yields an empty series.
    pub fn from_json(value: &Value) -> Self {
        match value.as_array() {
            Some(items) => Self(items.iter().filter_map(StatementRecord::from_json).collect()),
            None => Self::default(),
        }
    }

    pub fn get(&self, offset: usize) -> Option<&StatementRecord> {
        self.0.get(offset)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatementRecord> {
        self.0.iter()
    }
}

impl FromIterator<StatementRecord> for StatementSeries {
    fn from_iter<I: IntoIterator<Item = StatementRecord>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Outcome of resolving a ticker's company profile.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ProfileLookup {
    Resolved(StatementRecord),
    /// The provider answered but knows no such symbol.
    NotFound,
    /// The lookup itself failed (timeout, HTTP error, bad payload).
    #[default]
    Unavailable,
}

impl ProfileLookup {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProfileLookup::NotFound)
    }

    pub fn record(&self) -> Option<&StatementRecord> {
        match self {
            ProfileLookup::Resolved(record) => Some(record),
            _ => None,
        }
    }
}
