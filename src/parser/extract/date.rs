use std::sync::LazyLock;

use chrono::{DateTime, Duration, Months, NaiveDate, NaiveTime, Utc};
use regex::Regex;

static RELATIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(\d+|an?|one)\s+(seconds?|secs?|minutes?|mins?|hours?|hrs?|days?|weeks?|months?|years?)\s+ago$",
    )
    .unwrap()
});

/// Date-only formats seen in result snippets. Parsed as midnight UTC.
const LOOSE_PATTERNS: &[&str] = &[
    "%b %e, %Y", // Jan 5, 2024
    "%b %d, %Y", // Jan 05, 2024
    "%e %b %Y",  // 5 Jan 2024
    "%d %b %Y",  // 05 Jan 2024
    "%B %e, %Y", // January 5, 2024
    "%B %d, %Y", // January 05, 2024
    "%e %B %Y",  // 5 January 2024
    "%d %B %Y",  // 05 January 2024
    "%d.%m.%Y",  // 05.01.2024
];

/// Coerce the timestamp text of a result ("3 days ago", "Jan 5, 2024", ...)
/// into a point in time. Relative forms are resolved against `now`.
pub fn parse_updated_at(raw: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let s = raw
        .trim()
        .trim_end_matches(|c: char| c.is_whitespace() || matches!(c, '—' | '–' | '-' | '·' | '…' | '.'))
        .trim();
    if s.is_empty() {
        return None;
    }

    if let Some(dt) = parse_relative(s, now) {
        return Some(dt);
    }

    for pat in LOOSE_PATTERNS {
        if let Ok(date) = NaiveDate::parse_from_str(s, pat) {
            return date.and_hms_opt(0, 0, 0).map(|ndt| ndt.and_utc());
        }
    }

    // Naive dates and times are read as UTC, date-only input as midnight.
    dateparser::parse_with(s, &Utc, NaiveTime::MIN).ok()
}

fn parse_relative(s: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match s.to_lowercase().as_str() {
        "just now" | "now" | "today" => return Some(now),
        "yesterday" => return now.checked_sub_signed(Duration::days(1)),
        _ => {}
    }

    let caps = RELATIVE_RE.captures(s)?;
    let amount: u32 = match caps[1].to_lowercase().as_str() {
        "a" | "an" | "one" => 1,
        n => n.parse().ok()?,
    };
    let unit = caps[2].to_lowercase();
    let amount64 = i64::from(amount);

    match unit.trim_end_matches('s') {
        "second" | "sec" => now.checked_sub_signed(Duration::seconds(amount64)),
        "minute" | "min" => now.checked_sub_signed(Duration::minutes(amount64)),
        "hour" | "hr" => now.checked_sub_signed(Duration::hours(amount64)),
        "day" => now.checked_sub_signed(Duration::days(amount64)),
        "week" => now.checked_sub_signed(Duration::weeks(amount64)),
        "month" => now.checked_sub_months(Months::new(amount)),
        "year" => now.checked_sub_months(Months::new(amount.checked_mul(12)?)),
        _ => None,
    }
}
