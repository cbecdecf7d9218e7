use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use reqwest::Client as HttpClient;

use crate::config::{API, DEBUG_FLAGS};
use crate::data::decode::{decode_scan, RequestEcho, Week52High};
use crate::domain::{PatternKind, SeriesSelector};
use crate::engine::ScanSnapshot;

/// Everything one pattern scan request carries.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanRequest {
    pub symbol: String,
    pub pattern: PatternKind,
    pub lookback_weeks: u32,
    /// Sent only for NRB scans; the backend rejects it elsewhere.
    pub cooldown_weeks: u32,
    pub dip_threshold_pct: f64,
    pub series: SeriesSelector,
}

/// HTTP client for the two scan-service endpoints.
///
/// Cheap to clone; reqwest's client shares its connection pool internally.
#[derive(Debug, Clone)]
pub struct ScanService {
    client: HttpClient,
    base_url: String,
}

impl ScanService {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = HttpClient::builder()
            .timeout(Duration::from_secs(API.request_timeout_secs))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub async fn fetch_pattern_scan(&self, request: &ScanRequest) -> Result<ScanSnapshot> {
        let url = format!("{}{}", self.base_url, API.pattern_scan_path);

        let mut params: Vec<(&str, String)> = vec![
            ("scrip", request.symbol.clone()),
            ("pattern", request.pattern.api_name().to_string()),
            ("success_rate", request.dip_threshold_pct.to_string()),
        ];
        if request.pattern.is_nrb() {
            params.push(("weeks", request.lookback_weeks.to_string()));
            params.push(("cooldown_weeks", request.cooldown_weeks.to_string()));
        }
        if let Some(series) = request.series.query_value() {
            params.push(("series", series.to_string()));
        }

        if DEBUG_FLAGS.print_scan_requests {
            log::info!("GET {} scrip={} pattern={}", url, request.symbol, request.pattern.api_name());
        }

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .with_context(|| format!("scan request to {url} failed"))?;

        if !response.status().is_success() {
            // The backend reports failures as {"error": "..."} bodies
            let status = response.status();
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            let detail = body
                .get("error")
                .and_then(|e| e.as_str())
                .unwrap_or("an unknown scan service error occurred");
            return Err(anyhow!("scan failed ({status}): {detail}"));
        }

        let value: serde_json::Value = response
            .json()
            .await
            .context("scan response body was not valid JSON")?;

        let echo = RequestEcho {
            symbol: request.symbol.clone(),
            pattern: request.pattern,
            series: request.series,
        };
        Ok(decode_scan(value, &echo)?)
    }

    pub async fn fetch_week52_high(&self, symbol: &str) -> Result<Week52High> {
        let url = format!("{}{}", self.base_url, API.week52_high_path);

        if DEBUG_FLAGS.print_scan_requests {
            log::info!("GET {} scrip={}", url, symbol);
        }

        let response = self
            .client
            .get(&url)
            .query(&[("scrip", symbol)])
            .send()
            .await
            .with_context(|| format!("52-week-high request to {url} failed"))?;

        response
            .error_for_status()
            .context("52-week-high lookup rejected")?
            .json::<Week52High>()
            .await
            .context("52-week-high response body was malformed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let service = ScanService::new("http://localhost:8000/").unwrap();
        assert_eq!(service.base_url, "http://localhost:8000");
    }

    #[test]
    fn test_nrb_request_carries_windowing_params() {
        let request = ScanRequest {
            symbol: "TCS".to_string(),
            pattern: PatternKind::NarrowRangeBreak,
            lookback_weeks: 52,
            cooldown_weeks: 5,
            dip_threshold_pct: 20.0,
            series: SeriesSelector::ClosingPrice,
        };
        assert!(request.pattern.is_nrb());
        assert_eq!(request.pattern.api_name(), "Narrow Range Break");
        assert!(request.series.query_value().is_none());
    }

    #[test]
    fn test_bowl_request_omits_windowing_params() {
        let request = ScanRequest {
            symbol: "TCS".to_string(),
            pattern: PatternKind::Bowl,
            lookback_weeks: 52,
            cooldown_weeks: 5,
            dip_threshold_pct: 20.0,
            series: SeriesSelector::RscRatio,
        };
        assert!(!request.pattern.is_nrb());
        assert_eq!(request.series.query_value(), Some("rsc30"));
    }
}
