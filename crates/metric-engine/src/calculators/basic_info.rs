use super::MetricCalculator;
use crate::accessor::FieldAccessor;
use crate::fields;
use metrics_core::{Metric, MetricRecord, MetricSet, MetricValue};

/// Company profile fields. Leaves everything but the ticker null when the
/// profile could not be fetched.
pub struct BasicInfoCalculator;

impl MetricCalculator for BasicInfoCalculator {
    fn name(&self) -> &'static str {
        "basic_info"
    }

    fn calculate(&self, data: &FieldAccessor<'_>, _computed: &MetricRecord) -> MetricSet {
        if !data.has_profile() {
            return Vec::new();
        }

        let symbol = data
            .profile_text(fields::SYMBOL)
            .unwrap_or_else(|| data.ticker().as_str());
        let market_cap = data
            .profile_number(fields::MARKET_CAP)
            .or_else(|| data.profile_number(fields::MARKET_CAP_LEGACY));

        vec![
            (Metric::CompanyName, data.profile_text(fields::COMPANY_NAME).into()),
            (Metric::Ticker, MetricValue::Text(symbol.to_string())),
            (Metric::Sector, data.profile_text(fields::SECTOR).into()),
            (Metric::Currency, data.profile_text(fields::CURRENCY).into()),
            (Metric::CurrentPrice, data.profile_number(fields::PRICE).into()),
            (Metric::MarketCap, market_cap.into()),
            (Metric::Beta, data.profile_number(fields::BETA).into()),
        ]
    }
}
