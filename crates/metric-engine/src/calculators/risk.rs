use super::MetricCalculator;
use crate::accessor::FieldAccessor;
use crate::fields;
use metrics_core::{safe_div, Metric, MetricRecord, MetricSet, StatementKind};

/// Leverage and working-capital exposure.
pub struct RiskCalculator;

impl MetricCalculator for RiskCalculator {
    fn name(&self) -> &'static str {
        "risk"
    }

    fn calculate(&self, data: &FieldAccessor<'_>, _computed: &MetricRecord) -> MetricSet {
        let revenue = data.number(StatementKind::AnnualIncome, fields::REVENUE, 0);

        let net_debt_to_equity = safe_div(
            data.number(StatementKind::QuarterlyBalance, fields::NET_DEBT, 0),
            data.number(StatementKind::QuarterlyBalance, fields::TOTAL_EQUITY, 0),
        );
        let receivables = safe_div(data.number(StatementKind::AnnualBalance, fields::NET_RECEIVABLES, 0), revenue);
        let inventory = safe_div(data.number(StatementKind::AnnualBalance, fields::INVENTORY, 0), revenue);

        vec![
            (Metric::NetDebtToEquity, net_debt_to_equity.into()),
            (Metric::ReceivableToRevenue, receivables.into()),
            (Metric::InventoryToRevenue, inventory.into()),
        ]
    }
}
