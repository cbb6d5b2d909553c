use geoforecast_core::{MemoryPage, SubmitOutcome, page::ids};

/// Lines to print for a rendered page.
///
/// A partial render still shows every hourly row that reached the page.
pub fn report(page: &MemoryPage, outcome: SubmitOutcome) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(location) = page.text(ids::LOCATION) {
        lines.push(format!("Location: {location}"));
    }

    let hourly = match outcome {
        SubmitOutcome::NoLocation | SubmitOutcome::FetchFailed => return lines,
        SubmitOutcome::Rendered { hourly } | SubmitOutcome::Partial { hourly } => hourly,
    };

    lines.push(current_line(page));
    lines.extend((0..hourly).map(|i| hourly_line(page, i)));
    lines
}

fn current_line(page: &MemoryPage) -> String {
    format!(
        "Now    {:<24} {:>8} {:>7}",
        text(page, ids::CURRENT_FORECAST),
        text(page, ids::CURRENT_TEMPERATURE),
        text(page, ids::CURRENT_RAIN),
    )
}

fn hourly_line(page: &MemoryPage, i: usize) -> String {
    format!(
        "{:<6} {:<24} {:>8} {:>7}",
        text(page, &ids::hourly_time(i)),
        text(page, &ids::hourly_forecast(i)),
        text(page, &ids::hourly_temperature(i)),
        text(page, &ids::hourly_rain(i)),
    )
}

fn text<'a>(page: &'a MemoryPage, id: &str) -> &'a str {
    page.text(id).unwrap_or("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoforecast_core::Page;

    fn write(page: &mut MemoryPage, id: &str, value: &str) {
        let el = page.query(id).unwrap();
        page.set_text(el, value);
    }

    #[test]
    fn current_line_shows_rendered_values() {
        let mut page = MemoryPage::with_layout(1);
        write(&mut page, ids::CURRENT_FORECAST, "Clear sky");
        write(&mut page, ids::CURRENT_TEMPERATURE, "7.5°C");
        write(&mut page, ids::CURRENT_RAIN, "0mm");

        let line = current_line(&page);
        assert!(line.starts_with("Now    Clear sky"));
        assert!(line.contains("7.5°C"));
        assert!(line.ends_with("0mm"));
    }

    #[test]
    fn partial_outcome_lists_only_written_rows() {
        let mut page = MemoryPage::with_layout(1);
        write(&mut page, ids::LOCATION, "52°, -0°");
        write(&mut page, &ids::hourly_time(0), "09:00");

        let lines = report(&page, SubmitOutcome::Partial { hourly: 1 });

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Location: 52°, -0°");
        assert!(lines[1].starts_with("Now"));
        assert!(lines[2].starts_with("09:00"));
    }

    #[test]
    fn fetch_failure_lists_location_only() {
        let mut page = MemoryPage::with_layout(2);
        write(&mut page, ids::LOCATION, "10°, 21°");

        let lines = report(&page, SubmitOutcome::FetchFailed);

        assert_eq!(lines, ["Location: 10°, 21°"]);
    }

    #[test]
    fn hourly_line_uses_placeholder_for_empty_slot() {
        let mut page = MemoryPage::with_layout(1);
        write(&mut page, &ids::hourly_time(0), "09:00");

        let line = hourly_line(&page, 0);
        assert!(line.starts_with("09:00"));
        assert!(line.contains(" - "));
    }
}
