use super::{Horizon, MetricCalculator};
use crate::accessor::FieldAccessor;
use crate::fields;
use crate::scan::sum_earnings;
use metrics_core::{cagr, safe_div, Metric, MetricRecord, MetricSet, StatementKind};

/// EPS and revenue growth rates.
///
/// EPS prefers the income statements. When they are too short for a horizon
/// the earnings calendar's reported quarters are bucketed into consecutive
/// four-quarter sums instead.
pub struct GrowthCalculator;

const EPS_METRICS: [(Horizon, Metric); 4] = [
    (Horizon::OneYear, Metric::EpsCagr1y),
    (Horizon::ThreeYears, Metric::EpsCagr3y),
    (Horizon::FiveYears, Metric::EpsCagr5y),
    (Horizon::TenYears, Metric::EpsCagr10y),
];

const REVENUE_METRICS: [(Horizon, Metric); 4] = [
    (Horizon::OneYear, Metric::RevenueCagr1y),
    (Horizon::ThreeYears, Metric::RevenueCagr3y),
    (Horizon::FiveYears, Metric::RevenueCagr5y),
    (Horizon::TenYears, Metric::RevenueCagr10y),
];

/// Sum of the latest four reported EPS actuals from the calendar.
pub(crate) fn calendar_eps_ttm(data: &FieldAccessor<'_>) -> Option<f64> {
    sum_earnings(data, fields::EPS_ACTUAL, 1, 4)
}

impl GrowthCalculator {
    fn eps_cagr_ttm(data: &FieldAccessor<'_>) -> Option<f64> {
        let ratio = if data.series_len(StatementKind::QuarterlyIncome) >= 8 {
            safe_div(
                data.sum(StatementKind::QuarterlyIncome, fields::EPS, 0..4),
                data.sum(StatementKind::QuarterlyIncome, fields::EPS, 4..8),
            )
        } else {
            safe_div(calendar_eps_ttm(data), sum_earnings(data, fields::EPS_ACTUAL, 5, 8))
        };
        ratio.map(|r| r - 1.0)
    }

    fn eps_cagr(data: &FieldAccessor<'_>, horizon: Horizon) -> Option<f64> {
        let base = horizon.base_offset();
        if data.series_len(StatementKind::AnnualIncome) > base {
            return cagr(
                data.number(StatementKind::AnnualIncome, fields::EPS, 0),
                data.number(StatementKind::AnnualIncome, fields::EPS, base),
                horizon.years(),
            );
        }

        let (beg_n, end_n) = horizon.calendar_bucket();
        cagr(
            calendar_eps_ttm(data),
            sum_earnings(data, fields::EPS_ACTUAL, beg_n, end_n),
            horizon.years(),
        )
    }

    fn revenue_cagr(data: &FieldAccessor<'_>, horizon: Horizon) -> Option<f64> {
        cagr(
            data.number(StatementKind::AnnualIncome, fields::REVENUE, 0),
            data.number(StatementKind::AnnualIncome, fields::REVENUE, horizon.base_offset()),
            horizon.years(),
        )
    }
}

impl MetricCalculator for GrowthCalculator {
    fn name(&self) -> &'static str {
        "growth"
    }

    fn calculate(&self, data: &FieldAccessor<'_>, _computed: &MetricRecord) -> MetricSet {
        let mut set = vec![(Metric::EpsCagrTtm, Self::eps_cagr_ttm(data).into())];
        set.extend(
            EPS_METRICS
                .iter()
                .map(|(horizon, metric)| (*metric, Self::eps_cagr(data, *horizon).into())),
        );
        set.extend(
            REVENUE_METRICS
                .iter()
                .map(|(horizon, metric)| (*metric, Self::revenue_cagr(data, *horizon).into())),
        );
        set
    }
}
