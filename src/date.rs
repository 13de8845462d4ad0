//! Lenient parsing of genealogical dates.
//!
//! Family records rarely carry full dates. Accepted shapes are `YYYY`,
//! `YYYY-MM` and `YYYY-MM-DD`, optionally followed by a time part
//! (`1950-04-02T00:00:00Z`), which is ignored. Missing month or day default to
//! the first. Anything else is treated as "no date".

use time::{Date, Month};

/// Parse a date string into a calendar date, or `None` when it is absent or
/// not in one of the accepted shapes.
#[must_use]
pub fn parse_date(raw: &str) -> Option<Date> {
    let day_part = raw.trim().split(['T', ' ']).next().unwrap_or_default();
    if day_part.is_empty() {
        return None;
    }

    let mut parts = day_part.split('-');
    let year = parse_component::<i32>(parts.next()?)?;
    let month = match parts.next() {
        Some(m) => parse_component::<u8>(m)?,
        None => 1,
    };
    let day = match parts.next() {
        Some(d) => parse_component::<u8>(d)?,
        None => 1,
    };
    if parts.next().is_some() {
        return None;
    }

    let month = Month::try_from(month).ok()?;
    Date::from_calendar_date(year, month, day).ok()
}

/// Calendar year of a date string, if it parses.
#[must_use]
pub fn parse_year(raw: &str) -> Option<i32> {
    parse_date(raw).map(Date::year)
}

fn parse_component<T: std::str::FromStr>(raw: &str) -> Option<T> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<T>().ok()
}

#[cfg(test)]
#[path = "date_test.rs"]
mod tests;
