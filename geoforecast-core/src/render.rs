use chrono::{FixedOffset, Local};
use std::iter;

use crate::{
    error::ViewError,
    model::{Conditions, ForecastTime, HourlyForecast, Position},
    page::{CurrentTargets, HourlyTargets, Page, ids},
};

/// Every finite `f64` has at most this many fractional decimal digits.
const EXACT_DIGITS: usize = 1074;

/// Time zone hourly timestamps are displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockZone {
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl ClockZone {
    pub fn from_offset_minutes(minutes: i32) -> anyhow::Result<Self> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(Self::Fixed)
            .ok_or_else(|| anyhow::anyhow!("UTC offset of {minutes} minutes is out of range"))
    }
}

/// Format a number the way a browser does when it is interpolated into a
/// string: shortest form, no trailing `.0`, and no negative zero.
pub fn display_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// Fixed-point formatting with `Number.prototype.toFixed` rounding.
///
/// Rounding works on the exact decimal value of the float, so `0.15` (really
/// `0.1499...`) gives `"0.1"`. Exact ties go away from zero and the sign of a
/// negative value is kept even when it rounds to zero.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return display_number(value);
    }

    let exact = format!("{:.*}", EXACT_DIGITS, value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut kept: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(iter::repeat(b'0')).take(digits))
        .map(|b| b - b'0')
        .collect();

    if matches!(frac_part.as_bytes().get(digits), Some(b'5'..=b'9')) {
        increment(&mut kept);
    }

    let int_len = kept.len() - digits;
    let mut out = String::with_capacity(kept.len() + 2);
    if value < 0.0 {
        out.push('-');
    }
    for (i, d) in kept.iter().enumerate() {
        if i == int_len {
            out.push('.');
        }
        out.push(char::from(b'0' + d));
    }

    out
}

/// Add one unit in the last place to a big-endian list of decimal digits.
fn increment(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == 9 {
            *d = 0;
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, 1);
}

pub fn location_label(position: &Position) -> String {
    let lat = to_fixed(position.latitude, 0);
    let long = to_fixed(position.longitude, 0);

    format!("{lat}°, {long}°")
}

pub fn clock_label(time: &ForecastTime, zone: ClockZone) -> String {
    const FMT: &str = "%H:%M";

    match (time, zone) {
        (ForecastTime::Naive(naive), _) => naive.format(FMT).to_string(),
        (ForecastTime::Zoned(dt), ClockZone::Local) => {
            dt.with_timezone(&Local).format(FMT).to_string()
        }
        (ForecastTime::Zoned(dt), ClockZone::Fixed(offset)) => {
            dt.with_timezone(&offset).format(FMT).to_string()
        }
    }
}

pub fn render_current<P: Page>(
    page: &mut P,
    targets: &CurrentTargets<P::Element>,
    conditions: &Conditions,
) {
    let temperature = display_number(conditions.temperature);
    let rain = display_number(conditions.precipitation);

    page.set_image_src(targets.icon, &conditions.icon_url);
    page.set_text(targets.description, &conditions.description);
    page.set_text(targets.temperature, &format!("{temperature}°C"));
    page.set_text(targets.rain, &format!("{rain}mm"));
}

/// Render the visible hourly entries into consecutive slots.
///
/// Returns the number of slots written. An entry without a slot aborts
/// rendering; slots before it keep their new values.
pub fn render_hourly<P: Page>(
    page: &mut P,
    slots: &[HourlyTargets<P::Element>],
    hourly: &HourlyForecast,
    zone: ClockZone,
) -> Result<usize, ViewError> {
    let entries = hourly.visible();

    for (i, entry) in entries.iter().enumerate() {
        let slot = slots
            .get(i)
            .ok_or_else(|| ViewError::MissingElement(ids::hourly_icon(i)))?;
        let hour = &entry.conditions;
        let temperature = to_fixed(hour.temperature, 1);
        let rain = display_number(hour.precipitation);

        page.set_image_src(slot.icon, &hour.icon_url);
        page.set_text(slot.description, &hour.description);
        page.set_text(slot.temperature, &format!("{temperature}°C"));
        page.set_text(slot.rain, &format!("{rain}mm"));
        page.set_text(slot.time, &clock_label(&entry.time, zone));
    }

    Ok(entries.len())
}
