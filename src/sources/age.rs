//! Posting age helpers. Ages are whole days; unknown ages use [`UNKNOWN_AGE_DAYS`].

use std::sync::LazyLock;

use regex::Regex;
use time::OffsetDateTime;

/// Age assigned to postings whose date could not be determined.
pub const UNKNOWN_AGE_DAYS: i64 = 999;

const SECONDS_PER_DAY: i64 = 86_400;
const FRESH_MARKERS: [&str; 5] = ["today", "just now", "minutes ago", "hours ago", "hour ago"];

static DAYS: LazyLock<Regex> = LazyLock::new(|| relative_unit("day"));
static WEEKS: LazyLock<Regex> = LazyLock::new(|| relative_unit("week"));
static MONTHS: LazyLock<Regex> = LazyLock::new(|| relative_unit("month"));

fn relative_unit(unit: &str) -> Regex {
    Regex::new(&format!(r"(\d+)\s*{unit}")).expect("valid relative age pattern")
}

/// Interpret free-form relative dates such as `3 days ago` or `Posted 2 weeks ago`.
pub fn parse_relative_age(text: &str) -> i64 {
    let lower = text.to_lowercase();
    if lower.trim().is_empty() {
        return UNKNOWN_AGE_DAYS;
    }
    if FRESH_MARKERS.iter().any(|marker| lower.contains(marker)) {
        return 0;
    }
    if lower.contains("yesterday") {
        return 1;
    }

    for (pattern, factor) in [(&*DAYS, 1), (&*WEEKS, 7), (&*MONTHS, 30)] {
        if let Some(count) = pattern
            .captures(&lower)
            .and_then(|caps| caps[1].parse::<i64>().ok())
        {
            return count.saturating_mul(factor);
        }
    }

    UNKNOWN_AGE_DAYS
}

/// Whole days elapsed between `then` and `now`, rounded towards negative infinity.
pub fn days_since(then: OffsetDateTime, now: OffsetDateTime) -> i64 {
    (now - then).whole_seconds().div_euclid(SECONDS_PER_DAY)
}
