//! Core library for `geoforecast`.
//!
//! This crate defines:
//! - The forecast data model as served by the forecast server
//! - A page abstraction and the renderers that fill it
//! - Abstractions over the forecast client and location source
//! - Configuration handling
//!
//! [`ForecastView`] ties these together: it is the entry point a hosting page
//! calls to acquire a position, fetch its forecast and render it.

pub mod client;
pub mod config;
pub mod error;
pub mod location;
pub mod model;
pub mod page;
pub mod render;
pub mod view;

pub use client::{ForecastClient, HttpForecastClient};
pub use config::Config;
pub use error::{LocationError, ViewError};
pub use location::{FixedLocation, LocationSource};
pub use model::{
    Conditions, Forecast, ForecastResponse, ForecastTime, HourlyEntry, HourlyForecast, Position,
};
pub use page::{MemoryPage, Page, PageTargets};
pub use render::ClockZone;
pub use view::{ForecastView, SubmitOutcome};
