use super::MetricCalculator;
use crate::accessor::FieldAccessor;
use crate::fields;
use metrics_core::{safe_div, Metric, MetricRecord, MetricSet, StatementKind};

/// Provider TTM multiples plus PEG ratios over computed EPS growth.
///
/// Reads `EpsCagr1y` / `EpsCagr3y` from `computed`, so it must run after
/// [`GrowthCalculator`](super::GrowthCalculator).
pub struct ValuationCalculator;

impl MetricCalculator for ValuationCalculator {
    fn name(&self) -> &'static str {
        "valuation"
    }

    fn calculate(&self, data: &FieldAccessor<'_>, computed: &MetricRecord) -> MetricSet {
        let pe = data.number(StatementKind::TrailingRatios, fields::PE_RATIO_TTM, 0);
        let dividend_yield = data.number(StatementKind::TrailingRatios, fields::DIVIDEND_YIELD_TTM, 0);
        let peg = data.number(StatementKind::TrailingRatios, fields::PEG_RATIO_TTM, 0);

        vec![
            (Metric::DividendYieldTtm, dividend_yield.into()),
            (Metric::TrailingPeTtm, pe.into()),
            (Metric::PegTtm, peg.into()),
            (Metric::PegFy1, safe_div(pe, computed.number(Metric::EpsCagr1y)).into()),
            (Metric::PegFy3, safe_div(pe, computed.number(Metric::EpsCagr3y)).into()),
        ]
    }
}
