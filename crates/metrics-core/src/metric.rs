use crate::Ticker;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Labeled column groups of the report, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Section {
    BasicInfo,
    InvestmentMetrics,
    InvestmentRisks,
    Valuation,
    FinancialRatios,
}

impl Section {
    pub fn label(&self) -> &'static str {
        match self {
            Section::BasicInfo => "(A) Basic Info",
            Section::InvestmentMetrics => "(B) Investment Metrics",
            Section::InvestmentRisks => "(C) Investment Risks",
            Section::Valuation => "(D) Valuation",
            Section::FinancialRatios => "(E) Financial Ratio",
        }
    }
}

/// Writer hint for how a column's numbers are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FormatClass {
    /// `0.123` renders as `12.3%`.
    Percentage,
    /// One-decimal plain number.
    Decimal,
    /// `1.2B`, `345.6M`, `78.9K`, else two decimals.
    Abbreviated,
    Text,
}

/// Every output column. Declaration order is the canonical column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Metric {
    // (A) Basic Info
    CompanyName,
    Ticker,
    Sector,
    Currency,
    CurrentPrice,
    MarketCap,
    Beta,

    // (B) Investment Metrics
    GrossMarginLastQuarter,
    GrossMarginTtm,
    GrossMarginFy1,
    GrossMarginFy3,
    GrossMarginFy5,
    GrossMarginFy10,
    EpsCagrTtm,
    EpsCagr1y,
    EpsCagr3y,
    EpsCagr5y,
    EpsCagr10y,
    RevenueCagr1y,
    RevenueCagr3y,
    RevenueCagr5y,
    RevenueCagr10y,
    RoeTtm,
    RoeFy1,
    RoeFy3,
    RoeFy5,
    RoeFy10,
    CapexToNetIncomeTtm,
    CapexToNetIncome5yAvg,
    CapexToNetIncome10yAvg,

    // (C) Investment Risks
    NetDebtToEquity,
    ReceivableToRevenue,
    InventoryToRevenue,

    // (D) Valuation
    DividendYieldTtm,
    TrailingPeTtm,
    PegTtm,
    PegFy1,
    PegFy3,

    // (E) Financial Ratio
    TotalRevenueLastQuarter,
    GrossProfitLastQuarter,
    CapexLastYear,
    NetIncomeLastQuarter,
    NetIncomeLastYear,
    NetIncomeTtm,
    EpsTtm,
    LastExDividendDate,
    LastDividendValue,
    Roic,
    PayoutRatioTtm,
    NextEarningsDate,
    NextEarningsEstimateEps,
    NextEarningsEstimateRevenue,
    BeatEstimate,
    BeatEstimateUpdatedOn,
}

impl Metric {
    pub const ALL: [Metric; 54] = [
        Metric::CompanyName,
        Metric::Ticker,
        Metric::Sector,
        Metric::Currency,
        Metric::CurrentPrice,
        Metric::MarketCap,
        Metric::Beta,
        Metric::GrossMarginLastQuarter,
        Metric::GrossMarginTtm,
        Metric::GrossMarginFy1,
        Metric::GrossMarginFy3,
        Metric::GrossMarginFy5,
        Metric::GrossMarginFy10,
        Metric::EpsCagrTtm,
        Metric::EpsCagr1y,
        Metric::EpsCagr3y,
        Metric::EpsCagr5y,
        Metric::EpsCagr10y,
        Metric::RevenueCagr1y,
        Metric::RevenueCagr3y,
        Metric::RevenueCagr5y,
        Metric::RevenueCagr10y,
        Metric::RoeTtm,
        Metric::RoeFy1,
        Metric::RoeFy3,
        Metric::RoeFy5,
        Metric::RoeFy10,
        Metric::CapexToNetIncomeTtm,
        Metric::CapexToNetIncome5yAvg,
        Metric::CapexToNetIncome10yAvg,
        Metric::NetDebtToEquity,
        Metric::ReceivableToRevenue,
        Metric::InventoryToRevenue,
        Metric::DividendYieldTtm,
        Metric::TrailingPeTtm,
        Metric::PegTtm,
        Metric::PegFy1,
        Metric::PegFy3,
        Metric::TotalRevenueLastQuarter,
        Metric::GrossProfitLastQuarter,
        Metric::CapexLastYear,
        Metric::NetIncomeLastQuarter,
        Metric::NetIncomeLastYear,
        Metric::NetIncomeTtm,
        Metric::EpsTtm,
        Metric::LastExDividendDate,
        Metric::LastDividendValue,
        Metric::Roic,
        Metric::PayoutRatioTtm,
        Metric::NextEarningsDate,
        Metric::NextEarningsEstimateEps,
        Metric::NextEarningsEstimateRevenue,
        Metric::BeatEstimate,
        Metric::BeatEstimateUpdatedOn,
    ];

    /// Column header text.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::CompanyName => "Company Name",
            Metric::Ticker => "Ticker",
            Metric::Sector => "Sector",
            Metric::Currency => "Currency",
            Metric::CurrentPrice => "Current Price",
            Metric::MarketCap => "Market Cap",
            Metric::Beta => "Beta (5Y)",
            Metric::GrossMarginLastQuarter => "Gross Margin (Last Quarter)",
            Metric::GrossMarginTtm => "Gross Margin (TTM)",
            Metric::GrossMarginFy1 => "Gross Margin (FY -1)",
            Metric::GrossMarginFy3 => "Gross Margin (FY -3)",
            Metric::GrossMarginFy5 => "Gross Margin (FY -5)",
            Metric::GrossMarginFy10 => "Gross Margin (FY -10)",
            Metric::EpsCagrTtm => "EPS CAGR (TTM)",
            Metric::EpsCagr1y => "EPS CAGR (1Y)",
            Metric::EpsCagr3y => "EPS CAGR (3Y, TTM)",
            Metric::EpsCagr5y => "EPS CAGR (5Y, TTM)",
            Metric::EpsCagr10y => "EPS CAGR (10Y, TTM)",
            Metric::RevenueCagr1y => "Revenue CAGR (1Y)",
            Metric::RevenueCagr3y => "Revenue CAGR (3Y)",
            Metric::RevenueCagr5y => "Revenue CAGR (5Y)",
            Metric::RevenueCagr10y => "Revenue CAGR (10Y)",
            Metric::RoeTtm => "ROE (TTM)",
            Metric::RoeFy1 => "ROE (FY -1)",
            Metric::RoeFy3 => "ROE (FY -3)",
            Metric::RoeFy5 => "ROE (FY -5)",
            Metric::RoeFy10 => "ROE (FY -10)",
            Metric::CapexToNetIncomeTtm => "CAPEX / Net Income (TTM)",
            Metric::CapexToNetIncome5yAvg => "CAPEX / Net Income (5Y AVG)",
            Metric::CapexToNetIncome10yAvg => "CAPEX / Net Income (10Y AVG)",
            Metric::NetDebtToEquity => "Net Debt to Equity (Last Quarter)",
            Metric::ReceivableToRevenue => "Receivable / Revenue (Last FY)",
            Metric::InventoryToRevenue => "Inventory / Revenue (Last FY)",
            Metric::DividendYieldTtm => "Dividend Yield (TTM)",
            Metric::TrailingPeTtm => "Trailing PE (TTM)",
            Metric::PegTtm => "PEG Ratio (TTM)",
            Metric::PegFy1 => "PEG Ratio (FY -1)",
            Metric::PegFy3 => "PEG Ratio (FY -3)",
            Metric::TotalRevenueLastQuarter => "Total Revenue (Last Quarter)",
            Metric::GrossProfitLastQuarter => "Gross Profit (Last Quarter)",
            Metric::CapexLastYear => "Capital Expenditure (Last Year)",
            Metric::NetIncomeLastQuarter => "Net Income (Last Quarter)",
            Metric::NetIncomeLastYear => "Net Income (Last Year)",
            Metric::NetIncomeTtm => "Net Income (TTM)",
            Metric::EpsTtm => "EPS (TTM)",
            Metric::LastExDividendDate => "Last Ex-Dividend Date",
            Metric::LastDividendValue => "Last Dividend Value",
            Metric::Roic => "ROIC",
            Metric::PayoutRatioTtm => "Payout Ratio (TTM)",
            Metric::NextEarningsDate => "Next Earnings Date",
            Metric::NextEarningsEstimateEps => "Next Earnings Estimate EPS",
            Metric::NextEarningsEstimateRevenue => "Next Earnings Estimate Revenue",
            Metric::BeatEstimate => "Beat Estimate",
            Metric::BeatEstimateUpdatedOn => "Beat Estimate (Updated On)",
        }
    }

    pub fn section(&self) -> Section {
        use Metric::*;
        match self {
            CompanyName | Ticker | Sector | Currency | CurrentPrice | MarketCap | Beta => {
                Section::BasicInfo
            }
            GrossMarginLastQuarter | GrossMarginTtm | GrossMarginFy1 | GrossMarginFy3
            | GrossMarginFy5 | GrossMarginFy10 | EpsCagrTtm | EpsCagr1y | EpsCagr3y | EpsCagr5y
            | EpsCagr10y | RevenueCagr1y | RevenueCagr3y | RevenueCagr5y | RevenueCagr10y
            | RoeTtm | RoeFy1 | RoeFy3 | RoeFy5 | RoeFy10 | CapexToNetIncomeTtm
            | CapexToNetIncome5yAvg | CapexToNetIncome10yAvg => Section::InvestmentMetrics,
            NetDebtToEquity | ReceivableToRevenue | InventoryToRevenue => Section::InvestmentRisks,
            DividendYieldTtm | TrailingPeTtm | PegTtm | PegFy1 | PegFy3 => Section::Valuation,
            _ => Section::FinancialRatios,
        }
    }

    pub fn format_class(&self) -> FormatClass {
        use Metric::*;
        match self {
            GrossMarginLastQuarter | GrossMarginTtm | GrossMarginFy1 | GrossMarginFy3
            | GrossMarginFy5 | GrossMarginFy10 | EpsCagrTtm | EpsCagr1y | EpsCagr3y | EpsCagr5y
            | EpsCagr10y | RevenueCagr1y | RevenueCagr3y | RevenueCagr5y | RevenueCagr10y
            | RoeTtm | RoeFy1 | RoeFy3 | RoeFy5 | RoeFy10 | DividendYieldTtm | PayoutRatioTtm
            | CapexToNetIncomeTtm | CapexToNetIncome5yAvg | CapexToNetIncome10yAvg
            | NetDebtToEquity | ReceivableToRevenue | InventoryToRevenue | BeatEstimate | Roic => {
                FormatClass::Percentage
            }
            CurrentPrice | Beta | TrailingPeTtm | PegTtm | PegFy1 | PegFy3 | EpsTtm
            | LastDividendValue | NextEarningsEstimateEps => FormatClass::Decimal,
            MarketCap | TotalRevenueLastQuarter | GrossProfitLastQuarter | CapexLastYear
            | NextEarningsEstimateRevenue | NetIncomeLastQuarter | NetIncomeLastYear
            | NetIncomeTtm => FormatClass::Abbreviated,
            CompanyName | Ticker | Sector | Currency | LastExDividendDate | NextEarningsDate
            | BeatEstimateUpdatedOn => FormatClass::Text,
        }
    }

    /// Human-readable derivation, shown in the formula reference.
    pub fn formula(&self) -> &'static str {
        use Metric::*;
        match self {
            CompanyName | Ticker | Sector | Currency | CurrentPrice | MarketCap | Beta => {
                "Company profile field"
            }
            GrossMarginLastQuarter => "Latest quarter gross profit margin",
            GrossMarginTtm => "(GP Prev 1Q + .. + GP Prev 4Q) / (Rev Prev 1Q + .. + Rev Prev 4Q)",
            GrossMarginFy1 => "Previous 1 financial year's gross profit margin",
            GrossMarginFy3 => "Previous 3 financial year's gross profit margin",
            GrossMarginFy5 => "Previous 5 financial year's gross profit margin",
            GrossMarginFy10 => "Previous 10 financial year's gross profit margin",
            EpsCagrTtm => "(EPS Prev 1Q + .. + EPS Prev 4Q) / (EPS Prev 5Q + .. + EPS Prev 8Q) - 1",
            EpsCagr1y => "(EPS FY -1 / EPS FY -2) - 1",
            EpsCagr3y => "(EPS FY -1 / EPS FY -3) ^ (1/3) - 1, else quarters 1-4 vs 9-12",
            EpsCagr5y => "(EPS FY -1 / EPS FY -5) ^ (1/5) - 1, else quarters 1-4 vs 17-20",
            EpsCagr10y => "(EPS FY -1 / EPS FY -10) ^ (1/10) - 1, else quarters 1-4 vs 37-40",
            RevenueCagr1y => "(Rev FY -1 / Rev FY -2) - 1",
            RevenueCagr3y => "(Rev FY -1 / Rev FY -3) ^ (1/3) - 1",
            RevenueCagr5y => "(Rev FY -1 / Rev FY -5) ^ (1/5) - 1",
            RevenueCagr10y => "(Rev FY -1 / Rev FY -10) ^ (1/10) - 1",
            RoeTtm => "(NI Prev 1Q + .. + NI Prev 4Q) / TE Prev 1Q",
            RoeFy1 => "NI FY -1 / TE FY -1",
            RoeFy3 => "NI FY -3 / TE FY -3",
            RoeFy5 => "NI FY -5 / TE FY -5",
            RoeFy10 => "NI FY -10 / TE FY -10",
            CapexToNetIncomeTtm => "(CAPEX Prev 1Q + .. + CAPEX Prev 4Q) / (NI Prev 1Q + .. + NI Prev 4Q)",
            CapexToNetIncome5yAvg => "(CAPEX FY -1 + .. + CAPEX FY -5) / (NI FY -1 + .. + NI FY -5)",
            CapexToNetIncome10yAvg => "(CAPEX FY -1 + .. + CAPEX FY -10) / (NI FY -1 + .. + NI FY -10)",
            NetDebtToEquity => "Net Debt Prev 1Q / TE Prev 1Q",
            ReceivableToRevenue => "Net Receivables FY -1 / Rev FY -1",
            InventoryToRevenue => "Inventory FY -1 / Rev FY -1",
            DividendYieldTtm => "Provider trailing dividend yield",
            TrailingPeTtm => "Provider trailing price to earnings",
            PegTtm => "Provider trailing price to earnings growth",
            PegFy1 => "Trailing PE / EPS CAGR (1Y)",
            PegFy3 => "Trailing PE / EPS CAGR (3Y, TTM)",
            TotalRevenueLastQuarter => "Rev Prev 1Q",
            GrossProfitLastQuarter => "GP Prev 1Q",
            CapexLastYear => "CAPEX FY -1",
            NetIncomeLastQuarter => "NI Prev 1Q",
            NetIncomeLastYear => "NI FY -1",
            NetIncomeTtm => "NI Prev 1Q + .. + NI Prev 4Q",
            EpsTtm => "Sum of the latest 4 reported EPS actuals",
            LastExDividendDate => "Record date of the latest dividend",
            LastDividendValue => "Latest dividend per share",
            Roic => "EBIT TTM * (1 - Tax Rate FY -1) / (Total Debt + TE - Cash) Prev 1Q",
            PayoutRatioTtm => "Provider trailing dividend payout ratio",
            NextEarningsDate => "Date of the first calendar entry with a revenue estimate",
            NextEarningsEstimateEps => "EPS estimate of the first calendar entry with a revenue estimate",
            NextEarningsEstimateRevenue => "Revenue estimate of the first calendar entry with a revenue estimate",
            BeatEstimate => "(Actual EPS / Estimated EPS) - 1 for the latest reported quarter",
            BeatEstimateUpdatedOn => "Date of the latest reported quarter",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A typed, nullable cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Null,
    Number(f64),
    Text(String),
    Date(NaiveDate),
}

impl MetricValue {
    pub fn is_null(&self) -> bool {
        matches!(self, MetricValue::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<Option<f64>> for MetricValue {
    fn from(n: Option<f64>) -> Self {
        match n {
            Some(n) if n.is_finite() => MetricValue::Number(n),
            _ => MetricValue::Null,
        }
    }
}

impl From<Option<&str>> for MetricValue {
    fn from(s: Option<&str>) -> Self {
        s.map(|s| MetricValue::Text(s.to_string())).unwrap_or(MetricValue::Null)
    }
}

impl From<Option<NaiveDate>> for MetricValue {
    fn from(d: Option<NaiveDate>) -> Self {
        d.map(MetricValue::Date).unwrap_or(MetricValue::Null)
    }
}

/// Partial output of one calculator.
pub type MetricSet = Vec<(Metric, MetricValue)>;

static NULL_VALUE: MetricValue = MetricValue::Null;

/// One report row. Holds exactly one value per [`Metric`], `Null` until set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRecord {
    ticker: Ticker,
    values: BTreeMap<Metric, MetricValue>,
}

impl MetricRecord {
    pub fn new(ticker: Ticker) -> Self {
        let mut values: BTreeMap<Metric, MetricValue> =
            Metric::ALL.iter().map(|m| (*m, MetricValue::Null)).collect();
        values.insert(Metric::Ticker, MetricValue::Text(ticker.to_string()));
        Self { ticker, values }
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn get(&self, metric: Metric) -> &MetricValue {
        self.values.get(&metric).unwrap_or(&NULL_VALUE)
    }

    pub fn number(&self, metric: Metric) -> Option<f64> {
        self.get(metric).as_f64()
    }

    pub fn set(&mut self, metric: Metric, value: MetricValue) {
        self.values.insert(metric, value);
    }

    pub fn merge(&mut self, set: MetricSet) {
        for (metric, value) in set {
            self.set(metric, value);
        }
    }

    /// Values in canonical column order.
    pub fn iter(&self) -> impl Iterator<Item = (&Metric, &MetricValue)> {
        self.values.iter()
    }
}
