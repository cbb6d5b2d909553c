//! Page abstraction the view renders into.
//!
//! A [`Page`] resolves element ids to handles and writes text or image
//! sources through them. [`PageTargets`] resolves every handle the view needs
//! once, so rendering never assembles id strings on the fly.

use std::{collections::HashMap, fmt::Debug};

use crate::error::ViewError;

pub mod ids {
    pub const LOCATION: &str = "location";
    pub const CURRENT_ICON: &str = "current-icon";
    pub const CURRENT_FORECAST: &str = "current-forecast";
    pub const CURRENT_TEMPERATURE: &str = "current-temperature";
    pub const CURRENT_RAIN: &str = "current-rain-mm";

    pub fn hourly_icon(i: usize) -> String {
        format!("hourly-icon-{i}")
    }

    pub fn hourly_forecast(i: usize) -> String {
        format!("hourly-forecast-{i}")
    }

    pub fn hourly_temperature(i: usize) -> String {
        format!("hourly-temperature-{i}")
    }

    pub fn hourly_rain(i: usize) -> String {
        format!("hourly-rain-mm-{i}")
    }

    pub fn hourly_time(i: usize) -> String {
        format!("hourly-time-{i}")
    }
}

pub trait Page {
    type Element: Copy + Debug;

    fn query(&self, id: &str) -> Option<Self::Element>;

    fn set_text(&mut self, element: Self::Element, text: &str);

    fn set_image_src(&mut self, element: Self::Element, url: &str);
}

#[derive(Debug, Clone, Copy)]
pub struct CurrentTargets<E> {
    pub icon: E,
    pub description: E,
    pub temperature: E,
    pub rain: E,
}

#[derive(Debug, Clone, Copy)]
pub struct HourlyTargets<E> {
    pub icon: E,
    pub description: E,
    pub temperature: E,
    pub rain: E,
    pub time: E,
}

/// Every element handle the view writes to.
#[derive(Debug, Clone)]
pub struct PageTargets<E> {
    pub location: E,
    pub current: CurrentTargets<E>,
    /// Hourly slots in display order; slot `i` holds the `*-{i}` elements.
    pub hourly: Vec<HourlyTargets<E>>,
}

impl<E: Copy + Debug> PageTargets<E> {
    /// Resolve the fixed elements and scan hourly slots `0, 1, ...` until
    /// one is incomplete.
    pub fn resolve<P>(page: &P) -> Result<Self, ViewError>
    where
        P: Page<Element = E>,
    {
        let location = require(page, ids::LOCATION)?;
        let current = CurrentTargets {
            icon: require(page, ids::CURRENT_ICON)?,
            description: require(page, ids::CURRENT_FORECAST)?,
            temperature: require(page, ids::CURRENT_TEMPERATURE)?,
            rain: require(page, ids::CURRENT_RAIN)?,
        };

        let hourly = (0..).map_while(|i| hourly_slot(page, i)).collect();

        Ok(Self {
            location,
            current,
            hourly,
        })
    }
}

fn require<P: Page>(page: &P, id: &str) -> Result<P::Element, ViewError> {
    page.query(id)
        .ok_or_else(|| ViewError::MissingElement(id.to_string()))
}

fn hourly_slot<P: Page>(page: &P, i: usize) -> Option<HourlyTargets<P::Element>> {
    Some(HourlyTargets {
        icon: page.query(&ids::hourly_icon(i))?,
        description: page.query(&ids::hourly_forecast(i))?,
        temperature: page.query(&ids::hourly_temperature(i))?,
        rain: page.query(&ids::hourly_rain(i))?,
        time: page.query(&ids::hourly_time(i))?,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementHandle(usize);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryElement {
    pub id: String,
    pub text: Option<String>,
    pub image_src: Option<String>,
}

/// Page held in memory, used by the CLI host and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
    elements: Vec<MemoryElement>,
    index: HashMap<String, usize>,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard forecast page with `hourly_slots` hourly rows.
    pub fn with_layout(hourly_slots: usize) -> Self {
        let mut page = Self::new();

        for id in [
            ids::LOCATION,
            ids::CURRENT_ICON,
            ids::CURRENT_FORECAST,
            ids::CURRENT_TEMPERATURE,
            ids::CURRENT_RAIN,
        ] {
            page.add(id);
        }

        for i in 0..hourly_slots {
            page.add(ids::hourly_icon(i));
            page.add(ids::hourly_forecast(i));
            page.add(ids::hourly_temperature(i));
            page.add(ids::hourly_rain(i));
            page.add(ids::hourly_time(i));
        }

        page
    }

    /// Add an empty element. Re-adding an id keeps the existing element.
    pub fn add(&mut self, id: impl Into<String>) -> ElementHandle {
        let id = id.into();
        if let Some(&idx) = self.index.get(&id) {
            return ElementHandle(idx);
        }

        let idx = self.elements.len();
        self.index.insert(id.clone(), idx);
        self.elements.push(MemoryElement {
            id,
            ..Default::default()
        });
        ElementHandle(idx)
    }

    pub fn element(&self, id: &str) -> Option<&MemoryElement> {
        self.index.get(id).map(|&idx| &self.elements[idx])
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.element(id)?.text.as_deref()
    }

    pub fn image_src(&self, id: &str) -> Option<&str> {
        self.element(id)?.image_src.as_deref()
    }

    /// Elements in the order they were added.
    pub fn elements(&self) -> impl Iterator<Item = &MemoryElement> {
        self.elements.iter()
    }
}

impl Page for MemoryPage {
    type Element = ElementHandle;

    fn query(&self, id: &str) -> Option<ElementHandle> {
        self.index.get(id).copied().map(ElementHandle)
    }

    fn set_text(&mut self, element: ElementHandle, text: &str) {
        if let Some(el) = self.elements.get_mut(element.0) {
            el.text = Some(text.to_string());
        }
    }

    fn set_image_src(&mut self, element: ElementHandle, url: &str) {
        if let Some(el) = self.elements.get_mut(element.0) {
            el.image_src = Some(url.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_standard_layout() {
        let page = MemoryPage::with_layout(5);
        let targets = PageTargets::resolve(&page).unwrap();

        assert_eq!(targets.hourly.len(), 5);
        assert_eq!(Some(targets.location), page.query("location"));
        assert_eq!(Some(targets.hourly[4].time), page.query("hourly-time-4"));
    }

    #[test]
    fn missing_fixed_element_is_an_error() {
        let mut page = MemoryPage::new();
        page.add(ids::LOCATION);

        let err = PageTargets::resolve(&page).unwrap_err();
        assert!(matches!(err, ViewError::MissingElement(id) if id == "current-icon"));
    }

    #[test]
    fn hourly_scan_stops_at_incomplete_slot() {
        let mut page = MemoryPage::with_layout(1);
        page.add(ids::hourly_icon(1));
        page.add(ids::hourly_forecast(1));

        let targets = PageTargets::resolve(&page).unwrap();
        assert_eq!(targets.hourly.len(), 1);
    }

    #[test]
    fn add_is_idempotent() {
        let mut page = MemoryPage::new();
        let first = page.add("location");
        let second = page.add("location");

        assert_eq!(first, second);
        assert_eq!(page.elements().count(), 1);
    }

    #[test]
    fn writes_are_visible_by_id() {
        let mut page = MemoryPage::with_layout(0);
        let icon = page.query(ids::CURRENT_ICON).unwrap();

        page.set_image_src(icon, "https://x/a.png");

        assert_eq!(page.image_src(ids::CURRENT_ICON), Some("https://x/a.png"));
        assert_eq!(page.text(ids::CURRENT_ICON), None);
    }
}
