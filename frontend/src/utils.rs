use chrono::{DateTime, NaiveDate, Utc};

pub fn format_iso8601_date(iso_date: &str) -> String {
    if let Ok(datetime) = iso_date.parse::<DateTime<Utc>>() {
        datetime.format("%Y-%m-%d").to_string()
    } else {
        iso_date.to_string()
    }
}

/// Parses RFC 3339 timestamps as well as bare `YYYY-MM-DD` dates.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn compact(value: f64, suffix: &str) -> String {
    let formatted = format!("{value:.1}");
    let formatted = formatted.strip_suffix(".0").unwrap_or(&formatted);
    format!("{formatted}{suffix}")
}

// Likes, subscribers, comment counts: 1.2M, 7.3K, 7K
pub fn format_number(number: u64) -> String {
    if number >= 1_000_000 {
        compact(number as f64 / 1_000_000.0, "M")
    } else if number >= 1_000 {
        compact(number as f64 / 1_000.0, "K")
    } else {
        number.to_string()
    }
}

// View counts keep the decimal for millions and floor thousands: 1.0M, 253K
pub fn format_views(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{}K", count / 1_000)
    } else {
        count.to_string()
    }
}

pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }
    let total = seconds.floor() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let remaining_seconds = total % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{remaining_seconds:02}")
    } else {
        format!("{minutes}:{remaining_seconds:02}")
    }
}

const TIME_AGO_INTERVALS: [(&str, i64); 6] = [
    ("year", 31_536_000),
    ("month", 2_592_000),
    ("week", 604_800),
    ("day", 86_400),
    ("hour", 3_600),
    ("minute", 60),
];

pub fn format_time_ago(date: &str, now: DateTime<Utc>) -> String {
    let Some(date) = parse_timestamp(date) else {
        return "Unknown".to_string();
    };
    let elapsed = now.signed_duration_since(date).num_seconds();

    for (label, seconds) in TIME_AGO_INTERVALS {
        let count = elapsed / seconds;
        if count >= 1 {
            let plural = if count > 1 { "s" } else { "" };
            return format!("{count} {label}{plural} ago");
        }
    }
    "Just now".to_string()
}

pub fn format_time_ago_now(date: Option<&str>) -> String {
    match date {
        Some(date) => format_time_ago(date, Utc::now()),
        None => "Unknown".to_string(),
    }
}

/// First letter of a name, upper-cased, for avatar placeholders.
pub fn initial(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "U".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn compact_numbers() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(7_300), "7.3K");
        assert_eq!(format_number(7_000), "7K");
        assert_eq!(format_number(1_020_000), "1M");
        assert_eq!(format_number(2_500_000), "2.5M");
    }

    #[test]
    fn view_counts() {
        assert_eq!(format_views(253_999), "253K");
        assert_eq!(format_views(1_000_000), "1.0M");
        assert_eq!(format_views(42), "42");
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration(0.0), "0:00");
        assert_eq!(format_duration(-3.0), "0:00");
        assert_eq!(format_duration(65.4), "1:05");
        assert_eq!(format_duration(3_930.0), "1:05:30");
    }

    #[test]
    fn time_ago_buckets() {
        let now = Utc.with_ymd_and_hms(2025, 1, 27, 10, 30, 0).unwrap();
        assert_eq!(format_time_ago("2025-01-20T10:30:00Z", now), "1 week ago");
        assert_eq!(format_time_ago("2025-01-27T07:30:00Z", now), "3 hours ago");
        assert_eq!(format_time_ago("2025-01-27T10:29:30Z", now), "Just now");
        assert_eq!(format_time_ago("2023-01-01", now), "2 years ago");
        assert_eq!(format_time_ago("yesterday-ish", now), "Unknown");
    }

    #[test]
    fn iso_date_falls_back_to_input() {
        assert_eq!(format_iso8601_date("2025-01-20T10:30:00Z"), "2025-01-20");
        assert_eq!(format_iso8601_date("soon"), "soon");
    }

    #[test]
    fn avatar_initial() {
        assert_eq!(initial("wermbu"), "W");
        assert_eq!(initial(""), "U");
    }
}
