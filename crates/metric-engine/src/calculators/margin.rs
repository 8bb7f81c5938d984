use super::{Horizon, MetricCalculator};
use crate::accessor::FieldAccessor;
use crate::fields;
use metrics_core::{safe_div, Metric, MetricRecord, MetricSet, StatementKind};

pub struct MarginCalculator;

const FY_METRICS: [(Horizon, Metric); 4] = [
    (Horizon::OneYear, Metric::GrossMarginFy1),
    (Horizon::ThreeYears, Metric::GrossMarginFy3),
    (Horizon::FiveYears, Metric::GrossMarginFy5),
    (Horizon::TenYears, Metric::GrossMarginFy10),
];

impl MetricCalculator for MarginCalculator {
    fn name(&self) -> &'static str {
        "margin"
    }

    fn calculate(&self, data: &FieldAccessor<'_>, _computed: &MetricRecord) -> MetricSet {
        // no gross profit line (banks, insurers) means no margin, not a zero margin
        let last_quarter = data.optional(StatementKind::QuarterlyRatios, fields::GROSS_PROFIT_MARGIN, 0);
        let ttm = safe_div(
            data.ttm_optional(StatementKind::QuarterlyIncome, fields::GROSS_PROFIT),
            data.ttm(StatementKind::QuarterlyIncome, fields::REVENUE),
        );

        let mut set = vec![
            (Metric::GrossMarginLastQuarter, last_quarter.into()),
            (Metric::GrossMarginTtm, ttm.into()),
        ];
        set.extend(FY_METRICS.iter().map(|(horizon, metric)| {
            let margin = data.optional(StatementKind::AnnualRatios, fields::GROSS_PROFIT_MARGIN, horizon.fy_offset());
            (*metric, margin.into())
        }));
        set
    }
}
