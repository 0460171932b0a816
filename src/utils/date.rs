//! Date helpers for sitemap, rss and post listings.
//!
//! Post dates are kept as the raw frontmatter string everywhere they are
//! passed through (sitemap `lastmod`); these helpers only parse them for
//! sorting and display.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Today's date in UTC, formatted `YYYY-MM-DD`.
pub fn today_ymd() -> String {
    ymd(Utc::now().date_naive())
}

/// Format a date as `YYYY-MM-DD`.
pub fn ymd(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Current year, for the footer.
pub fn current_year() -> i32 {
    use chrono::Datelike;
    Utc::now().year()
}

/// Parse a `publishedAt` value.
///
/// Accepts `YYYY-MM-DD` (midnight UTC), `YYYY-MM-DDTHH:MM:SS` and RFC 3339.
pub fn parse_published(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_utc())
}

/// Long display form, e.g. `January 1, 2024`.
///
/// Unparseable input is returned unchanged.
pub fn format_long(s: &str) -> String {
    parse_published(s)
        .map(|dt| dt.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|| s.to_owned())
}

/// RFC 2822 form for rss `pubDate`.
pub fn to_rfc2822(s: &str) -> Option<String> {
    parse_published(s).map(|dt| Utc.from_utc_datetime(&dt).to_rfc2822())
}
