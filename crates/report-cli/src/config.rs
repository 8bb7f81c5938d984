use anyhow::{Context, Result};
use fmp_client::{FmpSettings, BASE_URL, DEFAULT_RATE_LIMIT};
use metrics_core::ReportError;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub fmp_key: String,
    pub fmp_base_url: String,
    pub rate_limit: usize,          // requests per minute
    pub timeout_secs: u64,          // per request
    pub statement_limit: u32,       // rows per statement endpoint
    pub concurrency: usize,         // tickers fetched in parallel
    pub output_dir: PathBuf,
}

impl ReportConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let fmp_key = var("FMP_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ReportError::ConfigError("FMP_KEY must be set".to_string()))?;

        let default_concurrency = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);

        let config = Self {
            fmp_key,
            fmp_base_url: var("FMP_BASE_URL").unwrap_or_else(|| BASE_URL.to_string()),
            rate_limit: match var("FMP_RATE_LIMIT") {
                Some(v) => v.parse().context("FMP_RATE_LIMIT must be a positive integer")?,
                None => DEFAULT_RATE_LIMIT,
            },
            timeout_secs: var("FMP_TIMEOUT_SECS")
                .unwrap_or_else(|| "10".to_string())
                .parse()
                .context("FMP_TIMEOUT_SECS must be a positive integer")?,
            statement_limit: var("FMP_STATEMENT_LIMIT")
                .unwrap_or_else(|| "10".to_string())
                .parse()
                .context("FMP_STATEMENT_LIMIT must be a positive integer")?,
            concurrency: match var("REPORT_CONCURRENCY") {
                Some(v) => v.parse().context("REPORT_CONCURRENCY must be a positive integer")?,
                None => default_concurrency,
            },
            output_dir: PathBuf::from(var("REPORT_OUTPUT_DIR").unwrap_or_else(|| ".".to_string())),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.rate_limit == 0 {
            return Err(ReportError::ConfigError("FMP_RATE_LIMIT must be greater than 0".to_string()).into());
        }
        if self.timeout_secs == 0 {
            return Err(ReportError::ConfigError("FMP_TIMEOUT_SECS must be greater than 0".to_string()).into());
        }
        if self.concurrency == 0 {
            return Err(ReportError::ConfigError("REPORT_CONCURRENCY must be greater than 0".to_string()).into());
        }
        Ok(())
    }

    pub fn fmp_settings(&self) -> FmpSettings {
        FmpSettings {
            base_url: self.fmp_base_url.clone(),
            rate_limit: self.rate_limit,
            timeout: Duration::from_secs(self.timeout_secs),
            statement_limit: self.statement_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ReportConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ReportConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("FMP_KEY", "demo")]).unwrap();
        assert_eq!(config.fmp_base_url, BASE_URL);
        assert_eq!(config.rate_limit, DEFAULT_RATE_LIMIT);
        assert_eq!(config.statement_limit, 10);
        assert!(config.concurrency >= 1);
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.fmp_settings().timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_missing_key() {
        let err = config_from(&[]).unwrap_err();
        assert!(err.to_string().contains("FMP_KEY"));
        assert!(config_from(&[("FMP_KEY", "  ")]).is_err());
    }

    #[test]
    fn test_overrides_and_validation() {
        let config = config_from(&[
            ("FMP_KEY", "demo"),
            ("FMP_RATE_LIMIT", "750"),
            ("REPORT_CONCURRENCY", "3"),
            ("REPORT_OUTPUT_DIR", "/tmp/reports"),
        ])
        .unwrap();
        assert_eq!(config.fmp_settings().rate_limit, 750);
        assert_eq!(config.concurrency, 3);

        assert!(config_from(&[("FMP_KEY", "demo"), ("FMP_RATE_LIMIT", "fast")]).is_err());
        assert!(config_from(&[("FMP_KEY", "demo"), ("REPORT_CONCURRENCY", "0")]).is_err());
    }
}
