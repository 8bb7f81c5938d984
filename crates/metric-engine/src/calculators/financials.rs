use super::growth::calendar_eps_ttm;
use super::MetricCalculator;
use crate::accessor::FieldAccessor;
use crate::fields;
use metrics_core::{safe_div, sum_all, Metric, MetricRecord, MetricSet, StatementKind};

/// Raw statement figures, dividends, ROIC and payout.
pub struct FinancialsCalculator;

impl FinancialsCalculator {
    fn eps_ttm(data: &FieldAccessor<'_>) -> Option<f64> {
        calendar_eps_ttm(data).or_else(|| {
            if data.series_len(StatementKind::QuarterlyIncome) >= 4 {
                data.ttm(StatementKind::QuarterlyIncome, fields::EPS)
            } else {
                None
            }
        })
    }

    /// NOPAT over invested capital (debt + equity - cash).
    fn roic(data: &FieldAccessor<'_>) -> Option<f64> {
        let ebit = data.ttm(StatementKind::QuarterlyIncome, fields::EBIT);
        let tax_rate = data.number(StatementKind::AnnualRatios, fields::EFFECTIVE_TAX_RATE, 0);
        let nopat = ebit.zip(tax_rate).map(|(ebit, tax)| ebit * (1.0 - tax));

        let invested = sum_all([
            data.number(StatementKind::QuarterlyBalance, fields::TOTAL_DEBT, 0),
            data.number(StatementKind::QuarterlyBalance, fields::TOTAL_EQUITY, 0),
            data.number(StatementKind::QuarterlyBalance, fields::CASH_AND_EQUIVALENTS, 0).map(|c| -c),
        ]);
        safe_div(nopat, invested)
    }
}

impl MetricCalculator for FinancialsCalculator {
    fn name(&self) -> &'static str {
        "financials"
    }

    fn calculate(&self, data: &FieldAccessor<'_>, _computed: &MetricRecord) -> MetricSet {
        use StatementKind::*;

        vec![
            (Metric::TotalRevenueLastQuarter, data.number(QuarterlyIncome, fields::REVENUE, 0).into()),
            (Metric::GrossProfitLastQuarter, data.number(QuarterlyIncome, fields::GROSS_PROFIT, 0).into()),
            (Metric::CapexLastYear, data.number(AnnualCashFlow, fields::CAPEX, 0).into()),
            (Metric::NetIncomeLastQuarter, data.number(QuarterlyIncome, fields::NET_INCOME, 0).into()),
            (Metric::NetIncomeLastYear, data.number(AnnualIncome, fields::NET_INCOME, 0).into()),
            (Metric::NetIncomeTtm, data.ttm(QuarterlyIncome, fields::NET_INCOME).into()),
            (Metric::EpsTtm, Self::eps_ttm(data).into()),
            (Metric::LastExDividendDate, data.date(DividendHistory, fields::RECORD_DATE, 0).into()),
            (Metric::LastDividendValue, data.number(DividendHistory, fields::DIVIDEND, 0).into()),
            (Metric::Roic, Self::roic(data).into()),
            (Metric::PayoutRatioTtm, data.number(TrailingRatios, fields::PAYOUT_RATIO_TTM, 0).into()),
        ]
    }
}
