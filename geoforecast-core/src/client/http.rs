use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::{
    Config,
    model::{ForecastResponse, Position},
};

use super::ForecastClient;

/// Forecast client speaking JSON over HTTP to the server root.
#[derive(Debug, Clone)]
pub struct HttpForecastClient {
    endpoint: String,
    http: Client,
}

impl HttpForecastClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http: Client::new(),
        }
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            endpoint: endpoint.into(),
            http,
        })
    }

    /// Build a client from the configured server URL and timeout.
    pub fn from_config(config: &Config) -> Result<Self> {
        let endpoint = config.server_url.as_deref().ok_or_else(|| {
            anyhow!(
                "No forecast server configured.\n\
                 Hint: run `geoforecast configure` or pass `--server <url>`."
            )
        })?;

        Self::with_timeout(endpoint, Duration::from_secs(config.timeout_secs))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ForecastClient for HttpForecastClient {
    async fn fetch_forecast(&self, position: &Position) -> Result<ForecastResponse> {
        debug!(endpoint = %self.endpoint, ?position, "posting position");

        let res = self
            .http
            .post(&self.endpoint)
            .json(position)
            .send()
            .await
            .context("Failed to send request to forecast server")?;

        let status = res.status();
        let body = res.text().await.context("Failed to read forecast response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Forecast request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        serde_json::from_str(&body).context("Failed to parse forecast JSON")
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, method, path},
    };

    fn forecast_body() -> serde_json::Value {
        json!({
            "latitude": 51.5,
            "longitude": -0.1,
            "today": "2024-01-01",
            "forecast": {
                "current": {
                    "icon_url": "https://openweathermap.org/img/wn/01d@2x.png",
                    "description": "Clear sky",
                    "temperature": 7.5,
                    "precipitation": 0.0
                },
                "hourly": {
                    "2024-01-01T09:00:00+00:00": {
                        "icon_url": "a",
                        "description": "Clear sky",
                        "temperature": 8.1,
                        "precipitation": 0.0
                    }
                }
            }
        })
    }

    #[tokio::test]
    async fn posts_position_as_json_to_root() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .and(body_json(json!({ "latitude": 51.5, "longitude": -0.1 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpForecastClient::new(format!("{}/", server.uri()));
        let response = client.fetch_forecast(&Position::new(51.5, -0.1)).await.unwrap();

        let forecast = response.into_forecast().unwrap();
        assert_eq!(forecast.current.description, "Clear sky");
        assert_eq!(forecast.hourly.entries.len(), 1);
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = HttpForecastClient::new(server.uri());
        let err = client.fetch_forecast(&Position::new(0.0, 0.0)).await.unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("boom"));
    }

    #[tokio::test]
    async fn malformed_body_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let client = HttpForecastClient::new(server.uri());
        let err = client.fetch_forecast(&Position::new(0.0, 0.0)).await.unwrap_err();

        assert!(err.to_string().contains("Failed to parse forecast JSON"));
    }

    #[test]
    fn from_config_requires_server_url() {
        let err = HttpForecastClient::from_config(&Config::default()).unwrap_err();
        assert!(err.to_string().contains("No forecast server configured"));
    }

    #[test]
    fn from_config_uses_server_url() {
        let config = Config {
            server_url: Some("http://localhost:8000/".into()),
            ..Config::default()
        };
        let client = HttpForecastClient::from_config(&config).unwrap();

        assert_eq!(client.endpoint(), "http://localhost:8000/");
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let body = "°".repeat(300);
        let truncated = truncate_body(&body);

        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 203);
    }
}
