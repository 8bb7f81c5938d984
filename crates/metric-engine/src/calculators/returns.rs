use super::{Horizon, MetricCalculator};
use crate::accessor::FieldAccessor;
use crate::fields;
use metrics_core::{safe_div, Metric, MetricRecord, MetricSet, StatementKind};

/// Return on equity.
pub struct ReturnsCalculator;

const FY_METRICS: [(Horizon, Metric); 4] = [
    (Horizon::OneYear, Metric::RoeFy1),
    (Horizon::ThreeYears, Metric::RoeFy3),
    (Horizon::FiveYears, Metric::RoeFy5),
    (Horizon::TenYears, Metric::RoeFy10),
];

impl MetricCalculator for ReturnsCalculator {
    fn name(&self) -> &'static str {
        "returns"
    }

    fn calculate(&self, data: &FieldAccessor<'_>, _computed: &MetricRecord) -> MetricSet {
        let roe_ttm = safe_div(
            data.ttm(StatementKind::QuarterlyIncome, fields::NET_INCOME),
            data.number(StatementKind::QuarterlyBalance, fields::TOTAL_EQUITY, 0),
        );

        let mut set = vec![(Metric::RoeTtm, roe_ttm.into())];
        set.extend(FY_METRICS.iter().map(|(horizon, metric)| {
            let offset = horizon.fy_offset();
            let roe = safe_div(
                data.number(StatementKind::AnnualIncome, fields::NET_INCOME, offset),
                data.number(StatementKind::AnnualBalance, fields::TOTAL_EQUITY, offset),
            );
            (*metric, roe.into())
        }));
        set
    }
}
