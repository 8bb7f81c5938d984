use metrics_core::Metric;

/// Column sets used by the exported sheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetLayout {
    /// Value-investing view: income, balance sheet health and dividends first.
    Value,
    /// Growth, theme and watchlist sheets.
    Standard,
}

const BASIC_INFO: [Metric; 6] = [
    Metric::CompanyName,
    Metric::Ticker,
    Metric::Sector,
    Metric::Currency,
    Metric::CurrentPrice,
    Metric::MarketCap,
];

const VALUE_COLUMNS: [Metric; 35] = [
    Metric::DividendYieldTtm,
    Metric::Roic,
    Metric::TrailingPeTtm,
    Metric::PegTtm,
    Metric::CapexToNetIncomeTtm,
    Metric::CapexToNetIncome5yAvg,
    Metric::CapexToNetIncome10yAvg,
    Metric::GrossMarginTtm,
    Metric::GrossMarginLastQuarter,
    Metric::GrossMarginFy1,
    Metric::GrossMarginFy3,
    Metric::EpsCagrTtm,
    Metric::EpsCagr3y,
    Metric::EpsCagr5y,
    Metric::EpsCagr10y,
    Metric::NetDebtToEquity,
    Metric::ReceivableToRevenue,
    Metric::InventoryToRevenue,
    Metric::NextEarningsDate,
    Metric::NextEarningsEstimateEps,
    Metric::NextEarningsEstimateRevenue,
    Metric::BeatEstimate,
    Metric::BeatEstimateUpdatedOn,
    Metric::LastExDividendDate,
    Metric::LastDividendValue,
    Metric::PayoutRatioTtm,
    Metric::RevenueCagr1y,
    Metric::RevenueCagr3y,
    Metric::RevenueCagr5y,
    Metric::RevenueCagr10y,
    Metric::Beta,
    Metric::RoeTtm,
    Metric::RoeFy3,
    Metric::PegFy1,
    Metric::PegFy3,
];

const STANDARD_COLUMNS: [Metric; 42] = [
    Metric::Beta,
    Metric::Roic,
    Metric::EpsCagrTtm,
    Metric::EpsCagr3y,
    Metric::EpsCagr5y,
    Metric::EpsCagr10y,
    Metric::RevenueCagr1y,
    Metric::RevenueCagr3y,
    Metric::RevenueCagr5y,
    Metric::RevenueCagr10y,
    Metric::GrossMarginTtm,
    Metric::GrossMarginLastQuarter,
    Metric::GrossMarginFy1,
    Metric::GrossMarginFy3,
    Metric::CapexToNetIncomeTtm,
    Metric::CapexToNetIncome5yAvg,
    Metric::CapexToNetIncome10yAvg,
    Metric::TrailingPeTtm,
    Metric::NetDebtToEquity,
    Metric::ReceivableToRevenue,
    Metric::InventoryToRevenue,
    Metric::DividendYieldTtm,
    Metric::NextEarningsDate,
    Metric::NextEarningsEstimateEps,
    Metric::NextEarningsEstimateRevenue,
    Metric::BeatEstimate,
    Metric::BeatEstimateUpdatedOn,
    Metric::PegTtm,
    Metric::RoeTtm,
    Metric::RoeFy3,
    Metric::PegFy1,
    Metric::PegFy3,
    Metric::TotalRevenueLastQuarter,
    Metric::GrossProfitLastQuarter,
    Metric::CapexLastYear,
    Metric::NetIncomeTtm,
    Metric::NetIncomeLastYear,
    Metric::NetIncomeLastQuarter,
    Metric::EpsTtm,
    Metric::LastExDividendDate,
    Metric::LastDividendValue,
    Metric::PayoutRatioTtm,
];

impl SheetLayout {
    /// Basic info followed by the layout's metric columns.
    pub fn columns(&self) -> Vec<Metric> {
        let body: &[Metric] = match self {
            SheetLayout::Value => &VALUE_COLUMNS,
            SheetLayout::Standard => &STANDARD_COLUMNS,
        };
        BASIC_INFO.iter().chain(body).copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_layouts_have_no_duplicates() {
        for layout in [SheetLayout::Value, SheetLayout::Standard] {
            let columns = layout.columns();
            let unique: HashSet<_> = columns.iter().collect();
            assert_eq!(unique.len(), columns.len());
            assert_eq!(columns[0], Metric::CompanyName);
            assert_eq!(columns[1], Metric::Ticker);
        }
    }

    #[test]
    fn test_layout_sizes() {
        assert_eq!(SheetLayout::Value.columns().len(), 41);
        assert_eq!(SheetLayout::Standard.columns().len(), 48);
    }
}
