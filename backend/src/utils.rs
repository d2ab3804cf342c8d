use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::cmp::Ordering;

/// Parse an RFC3339 timestamp as returned by the YouTube Data API.
pub fn parse_iso8601_to_datetime(date_str: &str) -> Option<DateTime<Utc>> {
    if date_str.is_empty() {
        return None;
    }
    date_str.parse::<DateTime<Utc>>().ok()
}

/// Parse a form date. Accepts `YYYY-MM-DD` or a full RFC3339 timestamp.
/// Date-only input resolves to the first (`end_of_day == false`) or last
/// second of that day in UTC.
pub fn parse_form_date(date_str: &str, end_of_day: bool) -> Option<DateTime<Utc>> {
    let trimmed = date_str.trim();
    if let Some(dt) = parse_iso8601_to_datetime(trimmed) {
        return Some(dt);
    }
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()?;
    let time = if end_of_day {
        NaiveTime::from_hms_opt(23, 59, 59)?
    } else {
        NaiveTime::MIN
    };
    Some(date.and_time(time).and_utc())
}

/// Parse ISO8601 duration string (PT1H2M3S, P1DT2H) to total seconds
pub fn parse_iso8601_duration_to_seconds(duration_str: &str) -> i64 {
    let Some(duration_part) = duration_str.strip_prefix('P') else {
        return 0;
    };
    let (date_part, time_part) = duration_part.split_once('T').unwrap_or((duration_part, ""));

    let date_seconds = sum_duration_units(date_part, |unit| match unit {
        'W' => Some(7.0 * 86_400.0),
        'D' => Some(86_400.0),
        _ => None,
    });
    let time_seconds = sum_duration_units(time_part, |unit| match unit {
        'H' => Some(3600.0),
        'M' => Some(60.0),
        'S' => Some(1.0),
        _ => None,
    });

    (date_seconds + time_seconds) as i64
}

fn sum_duration_units(part: &str, unit_seconds: impl Fn(char) -> Option<f64>) -> f64 {
    let mut total_seconds = 0.0;
    let mut current_number = String::new();

    for ch in part.chars() {
        if ch.is_ascii_digit() || ch == '.' {
            current_number.push(ch);
            continue;
        }
        if let (Ok(num), Some(seconds)) = (current_number.parse::<f64>(), unit_seconds(ch)) {
            total_seconds += num * seconds;
        }
        current_number.clear();
    }

    total_seconds
}

/// Provider statistics are decimal strings; anything missing or malformed counts as zero.
pub fn parse_count(value: Option<&str>) -> u64 {
    value
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(0)
}

/// Fractional days elapsed between `published_at` and `now`. Negative when
/// the publish time lies in the future.
pub fn days_between(published_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - published_at).num_milliseconds() as f64 / 86_400_000.0
}

/// Descending order for scores; NaN sorts last.
pub fn compare_desc_nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// Format a view count with a K/M suffix.
pub fn format_views_compact(views: u64) -> String {
    if views >= 1_000_000 {
        return format!("{:.1}M", views as f64 / 1_000_000.0);
    }
    if views >= 1_000 {
        return format!("{:.1}K", views as f64 / 1_000.0);
    }
    views.to_string()
}

/// Insert thousands separators: 12345 -> "12,345".
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
