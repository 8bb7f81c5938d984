//! Provider field names, one canonical name per concept.

// Company profile
pub const COMPANY_NAME: &str = "companyName";
pub const SYMBOL: &str = "symbol";
pub const SECTOR: &str = "sector";
pub const CURRENCY: &str = "currency";
pub const PRICE: &str = "price";
pub const MARKET_CAP: &str = "marketCap";
/// Older profile payloads use this key instead.
pub const MARKET_CAP_LEGACY: &str = "mktCap";
pub const BETA: &str = "beta";

// Income statement
pub const REVENUE: &str = "revenue";
pub const GROSS_PROFIT: &str = "grossProfit";
pub const NET_INCOME: &str = "netIncome";
pub const EPS: &str = "eps";
pub const EBIT: &str = "ebit";

// Balance sheet
pub const TOTAL_EQUITY: &str = "totalEquity";
pub const TOTAL_DEBT: &str = "totalDebt";
pub const NET_DEBT: &str = "netDebt";
pub const CASH_AND_EQUIVALENTS: &str = "cashAndCashEquivalents";
pub const NET_RECEIVABLES: &str = "netReceivables";
pub const INVENTORY: &str = "inventory";

// Cash flow
pub const CAPEX: &str = "capitalExpenditure";

// Ratios
pub const GROSS_PROFIT_MARGIN: &str = "grossProfitMargin";
pub const EFFECTIVE_TAX_RATE: &str = "effectiveTaxRate";
pub const DIVIDEND_YIELD_TTM: &str = "dividendYieldTTM";
pub const PE_RATIO_TTM: &str = "priceToEarningsRatioTTM";
pub const PEG_RATIO_TTM: &str = "priceToEarningsGrowthRatioTTM";
pub const PAYOUT_RATIO_TTM: &str = "dividendPayoutRatioTTM";

// Dividend history
pub const RECORD_DATE: &str = "recordDate";
pub const DIVIDEND: &str = "dividend";

// Earnings calendar
pub const DATE: &str = "date";
pub const EPS_ACTUAL: &str = "epsActual";
pub const EPS_ESTIMATED: &str = "epsEstimated";
pub const REVENUE_ACTUAL: &str = "revenueActual";
pub const REVENUE_ESTIMATED: &str = "revenueEstimated";
