use super::MetricCalculator;
use crate::accessor::FieldAccessor;
use crate::fields;
use metrics_core::{safe_div, Metric, MetricRecord, MetricSet, StatementKind};

/// CAPEX relative to net income.
pub struct EfficiencyCalculator;

impl EfficiencyCalculator {
    fn annual_ratio(data: &FieldAccessor<'_>, years: usize) -> Option<f64> {
        safe_div(
            data.sum(StatementKind::AnnualCashFlow, fields::CAPEX, 0..years),
            data.sum(StatementKind::AnnualIncome, fields::NET_INCOME, 0..years),
        )
    }
}

impl MetricCalculator for EfficiencyCalculator {
    fn name(&self) -> &'static str {
        "efficiency"
    }

    fn calculate(&self, data: &FieldAccessor<'_>, _computed: &MetricRecord) -> MetricSet {
        let ttm = safe_div(
            data.ttm(StatementKind::QuarterlyCashFlow, fields::CAPEX),
            data.ttm(StatementKind::QuarterlyIncome, fields::NET_INCOME),
        );

        vec![
            (Metric::CapexToNetIncomeTtm, ttm.into()),
            (Metric::CapexToNetIncome5yAvg, Self::annual_ratio(data, 5).into()),
            (Metric::CapexToNetIncome10yAvg, Self::annual_ratio(data, 10).into()),
        ]
    }
}
