//! Metric calculators, one per family.
//!
//! Each calculator is a pure function of one ticker's statements (plus the
//! metrics computed by calculators that ran before it) and never fails: an
//! input it cannot find becomes a null output.

mod basic_info;
mod earnings;
mod efficiency;
mod financials;
mod growth;
mod margin;
mod returns;
mod risk;
mod valuation;

pub use basic_info::BasicInfoCalculator;
pub use earnings::EarningsCalculator;
pub use efficiency::EfficiencyCalculator;
pub use financials::FinancialsCalculator;
pub use growth::GrowthCalculator;
pub use margin::MarginCalculator;
pub use returns::ReturnsCalculator;
pub use risk::RiskCalculator;
pub use valuation::ValuationCalculator;

use crate::accessor::FieldAccessor;
use metrics_core::{MetricRecord, MetricSet};

pub trait MetricCalculator: Send + Sync {
    fn name(&self) -> &'static str;

    /// `computed` holds everything earlier calculators produced for this ticker.
    fn calculate(&self, data: &FieldAccessor<'_>, computed: &MetricRecord) -> MetricSet;
}

/// Multi-year look-back horizons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizon {
    OneYear,
    ThreeYears,
    FiveYears,
    TenYears,
}

impl Horizon {
    pub const ALL: [Horizon; 4] = [
        Horizon::OneYear,
        Horizon::ThreeYears,
        Horizon::FiveYears,
        Horizon::TenYears,
    ];

    pub fn years(self) -> u32 {
        match self {
            Horizon::OneYear => 1,
            Horizon::ThreeYears => 3,
            Horizon::FiveYears => 5,
            Horizon::TenYears => 10,
        }
    }

    /// Annual offset compared against offset 0 for growth rates.
    pub fn base_offset(self) -> usize {
        match self {
            Horizon::OneYear => 1,
            Horizon::ThreeYears => 2,
            Horizon::FiveYears => 4,
            Horizon::TenYears => 9,
        }
    }

    /// Annual offset of the FY -N point value (FY -1 is the latest record).
    pub fn fy_offset(self) -> usize {
        self.years() as usize - 1
    }

    /// 1-based window of reported quarters compared against quarters 1-4.
    pub fn calendar_bucket(self) -> (usize, usize) {
        match self {
            Horizon::OneYear => (5, 8),
            Horizon::ThreeYears => (9, 12),
            Horizon::FiveYears => (17, 20),
            Horizon::TenYears => (37, 40),
        }
    }
}

/// Calculators in dependency order: valuation reads growth output.
pub fn default_pipeline() -> Vec<Box<dyn MetricCalculator>> {
    vec![
        Box::new(BasicInfoCalculator),
        Box::new(GrowthCalculator),
        Box::new(MarginCalculator),
        Box::new(ReturnsCalculator),
        Box::new(EfficiencyCalculator),
        Box::new(RiskCalculator),
        Box::new(ValuationCalculator),
        Box::new(FinancialsCalculator),
        Box::new(EarningsCalculator),
    ]
}
