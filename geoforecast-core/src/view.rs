use tracing::{debug, error};

use crate::{
    client::ForecastClient,
    error::ViewError,
    location::LocationSource,
    model::{ForecastResponse, Position},
    page::{Page, PageTargets},
    render::{self, ClockZone},
};

/// What a single view update ended with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// No position was available; the page is untouched.
    NoLocation,
    /// The forecast could not be fetched; only the location label was written.
    FetchFailed,
    Rendered { hourly: usize },
    /// More hourly entries than page slots. Every slot was written before
    /// rendering stopped.
    Partial { hourly: usize },
}

/// Forecast view bound to a page and a forecast client.
#[derive(Debug)]
pub struct ForecastView<P: Page, C> {
    page: P,
    targets: PageTargets<P::Element>,
    client: C,
    zone: ClockZone,
}

impl<P, C> ForecastView<P, C>
where
    P: Page,
    C: ForecastClient,
{
    /// Bind to `page`, resolving every element the view writes to.
    pub fn new(page: P, client: C) -> Result<Self, ViewError> {
        let targets = PageTargets::resolve(&page)?;
        debug!(hourly_slots = targets.hourly.len(), "page targets resolved");

        Ok(Self {
            page,
            targets,
            client,
            zone: ClockZone::Local,
        })
    }

    pub fn with_clock_zone(mut self, zone: ClockZone) -> Self {
        self.zone = zone;
        self
    }

    /// Entry point for the hosting page: acquire a position, then submit it.
    ///
    /// A missing or denied position leaves the page as it is.
    pub async fn init<L>(&mut self, source: &L) -> SubmitOutcome
    where
        L: LocationSource + ?Sized,
    {
        match source.current_position().await {
            Ok(position) => self.submit(position).await,
            Err(err) => {
                debug!("no position, skipping forecast: {err}");
                SubmitOutcome::NoLocation
            }
        }
    }

    /// Show `position`, fetch its forecast and render it.
    ///
    /// Failures are logged, never returned: the page keeps whatever was
    /// written before the failure.
    pub async fn submit(&mut self, position: Position) -> SubmitOutcome {
        let label = render::location_label(&position);
        self.page.set_text(self.targets.location, &label);

        let fetched = self.client.fetch_forecast(&position).await;

        let forecast = match fetched.and_then(ForecastResponse::into_forecast) {
            Ok(forecast) => forecast,
            Err(err) => {
                error!("Error getting data: {err:#}");
                return SubmitOutcome::FetchFailed;
            }
        };

        render::render_current(&mut self.page, &self.targets.current, &forecast.current);

        let slots = &self.targets.hourly;
        match render::render_hourly(&mut self.page, slots, &forecast.hourly, self.zone) {
            Ok(hourly) => {
                debug!(hourly, "forecast rendered");
                SubmitOutcome::Rendered { hourly }
            }
            Err(err) => {
                error!("Error getting data: {err}");
                SubmitOutcome::Partial {
                    hourly: slots.len(),
                }
            }
        }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn into_page(self) -> P {
        self.page
    }
}
