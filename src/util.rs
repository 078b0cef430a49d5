//! Utility functions for devlog

use std::time::{Duration, SystemTime, UNIX_EPOCH};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Current Unix time in seconds.
pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Prefix that leads from a page `depth` directories deep back to the site root.
///
/// Empty for root level pages.
pub fn relative_root(depth: usize) -> String {
    "../".repeat(depth)
}

/// Lowercases a category name into a path segment.
///
/// Runs of anything other than ASCII letters and digits collapse to a single
/// hyphen, so "All posts" becomes "all-posts".
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Formats Unix timestamp as human readable relative time
///
/// Converts Unix epoch seconds to relative time strings like "5 min ago"
/// or "2 weeks ago". Future timestamps are treated as "just now".
///
/// # Arguments
///
/// * `seconds`: Unix timestamp in seconds since epoch
///
/// # Returns
///
/// Human readable relative time string
pub fn format_timestamp(seconds: i64) -> String {
    let timestamp = UNIX_EPOCH + Duration::from_secs(seconds.max(0) as u64);
    let now = SystemTime::now();

    // Clock skew between writers can put rows slightly in the future
    let duration = now.duration_since(timestamp).unwrap_or(Duration::ZERO);
    let secs = duration.as_secs();
    let minutes = secs / 60;
    let hours = secs / 3600;
    let days = secs / 86400;

    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{} min ago", minutes)
    } else if hours < 24 {
        format!("{} hr ago", hours)
    } else if days < 7 {
        format!("{} days ago", days)
    } else if days < 30 {
        format!("{} weeks ago", days / 7)
    } else if days < 365 {
        format!("{} months ago", days / 30)
    } else {
        format!("{} years ago", days / 365)
    }
}

/// Formats Unix timestamp as a calendar date such as "Mar 5, 2024" (UTC).
pub fn format_date(seconds: i64) -> String {
    let (year, month, day) = civil_from_days(seconds.div_euclid(86_400));
    format!("{} {}, {}", MONTHS[(month - 1) as usize], day, year)
}

/// Formats Unix timestamp as a 24 hour "HH:MM" clock reading (UTC).
pub fn format_clock(seconds: i64) -> String {
    let secs_of_day = seconds.rem_euclid(86_400);
    format!("{:02}:{:02}", secs_of_day / 3600, (secs_of_day % 3600) / 60)
}

// Days since 1970-01-01 to (year, month, day) in the proleptic Gregorian calendar.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_root() {
        assert_eq!(relative_root(0), "");
        assert_eq!(relative_root(2), "../../");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("All posts"), "all-posts");
        assert_eq!(slugify("Frontend"), "frontend");
        assert_eq!(slugify("  C++ / Rust  "), "c-rust");
    }

    #[test]
    fn test_format_timestamp_recent() {
        // Arrange
        let now = unix_now();

        // Act & Assert
        assert_eq!(format_timestamp(now), "just now");
        assert_eq!(format_timestamp(now - 300), "5 min ago");
        assert_eq!(format_timestamp(now - 3 * 3600), "3 hr ago");
        assert_eq!(format_timestamp(now - 14 * 86_400), "2 weeks ago");
    }

    #[test]
    fn test_format_timestamp_future() {
        assert_eq!(format_timestamp(unix_now() + 3600), "just now");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(0), "Jan 1, 1970");
        // 2024-03-05T12:00:00Z
        assert_eq!(format_date(1_709_640_000), "Mar 5, 2024");
        // 2000-02-29
        assert_eq!(format_date(951_782_400), "Feb 29, 2000");
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(9 * 3600 + 5 * 60 + 59), "09:05");
        assert_eq!(format_clock(-60), "23:59");
    }
}
