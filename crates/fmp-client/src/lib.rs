use async_trait::async_trait;
use dashmap::DashMap;
use metrics_core::{ProfileLookup, ReportError, StatementKind, StatementRecord, StatementSeries, StatementSource, Ticker};
use reqwest::Client;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

pub const BASE_URL: &str = "https://financialmodelingprep.com/stable";

/// Earnings calendar entries requested on top of the statement limit, so the
/// 10Y EPS buckets (quarters 37-40) are reachable.
const EARNINGS_EXTRA_ROWS: u32 = 40;

/// Sliding-window rate limiter: at most `max_requests` per `window` duration.
#[derive(Clone)]
struct RateLimiter {
    timestamps: Arc<Mutex<VecDeque<Instant>>>,
    max_requests: usize,
    window: Duration,
}

impl RateLimiter {
    fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            timestamps: Arc::new(Mutex::new(VecDeque::new())),
            max_requests: max_requests.max(1),
            window,
        }
    }

    async fn acquire(&self) {
        loop {
            let mut ts = self.timestamps.lock().await;
            let now = Instant::now();

            while let Some(&front) = ts.front() {
                if now.duration_since(front) >= self.window {
                    ts.pop_front();
                } else {
                    break;
                }
            }

            if ts.len() < self.max_requests {
                ts.push_back(now);
                return;
            }

            // Wait until the oldest request falls out of the window
            let Some(&oldest) = ts.front() else { continue };
            let sleep_dur = (oldest + self.window).saturating_duration_since(now) + Duration::from_millis(50);
            drop(ts);
            tracing::debug!("Rate limiter: waiting {:.1}s for FMP API slot", sleep_dur.as_secs_f64());
            tokio::time::sleep(sleep_dur).await;
        }
    }
}

/// Connection settings for [`FmpClient`].
#[derive(Debug, Clone)]
pub struct FmpSettings {
    pub base_url: String,
    /// Requests allowed per minute.
    pub rate_limit: usize,
    pub timeout: Duration,
    /// Rows requested per statement endpoint.
    pub statement_limit: u32,
}

/// Starter plan allowance, requests per minute.
pub const DEFAULT_RATE_LIMIT: usize = 300;

impl Default for FmpSettings {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            rate_limit: DEFAULT_RATE_LIMIT,
            timeout: Duration::from_secs(10),
            statement_limit: 10,
        }
    }
}

/// Financial Modeling Prep REST client.
///
/// Responses are cached per (ticker, endpoint) for the lifetime of the client,
/// so a ticker listed in several watchlists is only fetched once.
#[derive(Clone)]
pub struct FmpClient {
    api_key: String,
    client: Client,
    settings: FmpSettings,
    rate_limiter: RateLimiter,
    profile_cache: Arc<DashMap<Ticker, ProfileLookup>>,
    statement_cache: Arc<DashMap<(Ticker, StatementKind), StatementSeries>>,
}

impl FmpClient {
    pub fn new(api_key: String) -> Self {
        Self::with_settings(api_key, FmpSettings::default())
    }

    pub fn with_settings(api_key: String, settings: FmpSettings) -> Self {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            api_key,
            client,
            rate_limiter: RateLimiter::new(settings.rate_limit, Duration::from_secs(60)),
            settings,
            profile_cache: Arc::new(DashMap::new()),
            statement_cache: Arc::new(DashMap::new()),
        }
    }

    pub fn settings(&self) -> &FmpSettings {
        &self.settings
    }

    /// Send a request with rate limiting and automatic 429 retry.
    async fn send_request(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::Response, ReportError> {
        let request = builder.build().map_err(|e| ReportError::ApiError(e.to_string()))?;

        for attempt in 0..3u32 {
            self.rate_limiter.acquire().await;
            let req_clone = request
                .try_clone()
                .ok_or_else(|| ReportError::ApiError("Cannot clone request".to_string()))?;
            let response = self.client.execute(req_clone).await.map_err(|e| {
                if e.is_timeout() {
                    ReportError::ApiError(format!("timed out after {}s", self.settings.timeout.as_secs()))
                } else {
                    ReportError::ApiError(e.to_string())
                }
            })?;

            if response.status().as_u16() != 429 {
                return Ok(response);
            }

            let wait_secs = 15u64;
            tracing::warn!("FMP 429 rate limited, waiting {}s before retry {}/3", wait_secs, attempt + 1);
            tokio::time::sleep(Duration::from_secs(wait_secs)).await;
        }

        Err(ReportError::ApiError("Rate limited by FMP after 3 retries".to_string()))
    }

    async fn get_json(&self, endpoint: &str, query: &[(&'static str, String)]) -> Result<Value, ReportError> {
        let url = format!("{}/{}", self.settings.base_url, endpoint);

        let response = self
            .send_request(self.client.get(&url).query(query).query(&[("apikey", &self.api_key)]))
            .await?;

        if !response.status().is_success() {
            return Err(ReportError::ApiError(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ReportError::ApiError(e.to_string()))
    }

    /// Query parameters for one statement endpoint.
    pub fn statement_query(&self, ticker: &Ticker, kind: StatementKind) -> Vec<(&'static str, String)> {
        let limit = match kind {
            StatementKind::EarningsCalendar => self.settings.statement_limit + EARNINGS_EXTRA_ROWS,
            _ => self.settings.statement_limit,
        };

        let mut query = vec![("symbol", ticker.to_string())];
        if let Some(period) = kind.period() {
            query.push(("period", period.to_string()));
        }
        query.push(("limit", limit.to_string()));
        query
    }

    /// Get company profile; an empty answer means the symbol is unknown.
    pub async fn get_profile(&self, ticker: &Ticker) -> Result<ProfileLookup, ReportError> {
        let body = self.get_json("profile", &[("symbol", ticker.to_string())]).await?;
        parse_profile(&body)
    }

    /// Get one statement series, most recent first.
    pub async fn get_statement(&self, ticker: &Ticker, kind: StatementKind) -> Result<StatementSeries, ReportError> {
        let body = self.get_json(kind.endpoint(), &self.statement_query(ticker, kind)).await?;
        parse_series(&body)
    }
}

#[async_trait]
impl StatementSource for FmpClient {
    async fn fetch_profile(&self, ticker: &Ticker) -> ProfileLookup {
        if let Some(cached) = self.profile_cache.get(ticker) {
            return cached.clone();
        }

        match self.get_profile(ticker).await {
            Ok(lookup) => {
                self.profile_cache.insert(ticker.clone(), lookup.clone());
                lookup
            }
            Err(e) => {
                tracing::warn!("{}: profile unavailable: {}", ticker, e);
                ProfileLookup::Unavailable
            }
        }
    }

    async fn fetch_statement(&self, ticker: &Ticker, kind: StatementKind) -> Option<StatementSeries> {
        let key = (ticker.clone(), kind);
        if let Some(cached) = self.statement_cache.get(&key) {
            return Some(cached.clone());
        }

        match self.get_statement(ticker, kind).await {
            Ok(series) => {
                self.statement_cache.insert(key, series.clone());
                Some(series)
            }
            Err(e) => {
                tracing::warn!("{}: {} unavailable: {}", ticker, kind, e);
                None
            }
        }
    }
}

/// FMP reports bad keys and plan limits as a 200 with an error object.
fn error_message(body: &Value) -> String {
    body.get("Error Message")
        .and_then(|m| m.as_str())
        .map(|m| m.to_string())
        .unwrap_or_else(|| "unexpected response payload".to_string())
}

fn parse_series(body: &Value) -> Result<StatementSeries, ReportError> {
    if body.is_array() {
        Ok(StatementSeries::from_json(body))
    } else {
        Err(ReportError::ApiError(error_message(body)))
    }
}

fn parse_profile(body: &Value) -> Result<ProfileLookup, ReportError> {
    let items = body
        .as_array()
        .ok_or_else(|| ReportError::ApiError(error_message(body)))?;

    match items.first() {
        None => Ok(ProfileLookup::NotFound),
        Some(first) => StatementRecord::from_json(first)
            .map(ProfileLookup::Resolved)
            .ok_or_else(|| ReportError::ApiError("profile entry is not an object".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_core::FieldValue;
    use serde_json::json;

    fn create_test_client() -> FmpClient {
        FmpClient::with_settings(
            "test-key".to_string(),
            FmpSettings {
                base_url: BASE_URL.to_string(),
                rate_limit: 10,
                timeout: Duration::from_secs(10),
                statement_limit: 10,
            },
        )
    }

    #[test]
    fn test_default_settings_ignore_environment() {
        std::env::set_var("FMP_RATE_LIMIT", "5");
        let settings = FmpSettings::default();
        std::env::remove_var("FMP_RATE_LIMIT");

        assert_eq!(settings.rate_limit, DEFAULT_RATE_LIMIT);
        assert_eq!(settings.base_url, BASE_URL);
        assert_eq!(settings.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_statement_query() {
        let client = create_test_client();
        let ticker = Ticker::new("aapl");

        let query = client.statement_query(&ticker, StatementKind::QuarterlyIncome);
        assert_eq!(
            query,
            vec![
                ("symbol", "AAPL".to_string()),
                ("period", "quarterly".to_string()),
                ("limit", "10".to_string()),
            ]
        );

        let query = client.statement_query(&ticker, StatementKind::EarningsCalendar);
        assert_eq!(query.len(), 2);
        assert_eq!(query[1], ("limit", "50".to_string()));
    }

    #[test]
    fn test_parse_profile() {
        let resolved = parse_profile(&json!([{"symbol": "AAPL", "price": 190.5, "beta": 1.2}])).unwrap();
        let record = resolved.record().unwrap();
        assert_eq!(record.field("price"), Some(&FieldValue::Number(190.5)));

        assert_eq!(parse_profile(&json!([])).unwrap(), ProfileLookup::NotFound);
        assert!(parse_profile(&json!({"Error Message": "Invalid API KEY."})).is_err());
    }

    #[test]
    fn test_parse_series_error_payload() {
        let err = parse_series(&json!({"Error Message": "Limit Reach"})).unwrap_err();
        assert_eq!(err, ReportError::ApiError("Limit Reach".to_string()));

        let series = parse_series(&json!([{"revenue": 1.0}, {"revenue": null}])).unwrap();
        assert_eq!(series.len(), 2);
    }

    #[tokio::test]
    async fn test_rate_limiter_allows_burst_within_limit() {
        let limiter = RateLimiter::new(3, Duration::from_secs(60));
        let start = Instant::now();
        for _ in 0..3 {
            limiter.acquire().await;
        }
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    #[ignore] // Only run with a valid FMP_KEY
    async fn test_fetch_profile_live() {
        let client = FmpClient::new(std::env::var("FMP_KEY").unwrap());
        let lookup = client.fetch_profile(&Ticker::new("AAPL")).await;
        println!("Profile: {:?}", lookup);
        assert!(lookup.record().is_some());

        let missing = client.fetch_profile(&Ticker::new("NOTAREALTICKER")).await;
        assert_eq!(missing, ProfileLookup::NotFound);
    }
}
