use async_trait::async_trait;
use std::fmt::Debug;

use crate::model::{ForecastResponse, Position};

pub mod http;

pub use http::HttpForecastClient;

/// Posts a position to the forecast server and returns its answer.
#[async_trait]
pub trait ForecastClient: Send + Sync + Debug {
    async fn fetch_forecast(&self, position: &Position) -> anyhow::Result<ForecastResponse>;
}
