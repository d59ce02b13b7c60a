use anyhow::Result;
use chrono::{NaiveDate, NaiveTime, Utc};
use chrono_english::{parse_date_string, Dialect};

/// Parses a calendar date from natural language or ISO form.
pub fn parse_date(date_str: &str) -> Result<NaiveDate> {
    parse_date_string(date_str, Utc::now(), Dialect::Us)
        .map(|dt| dt.date_naive())
        .map_err(|e| anyhow::anyhow!("Failed to parse date '{}': {}", date_str, e))
}

/// Parse time string like "9:00 AM", "14:30", "9pm", "noon", "midnight"
pub fn parse_time(time_str: &str) -> Result<NaiveTime> {
    let input = time_str.trim().to_lowercase();

    match input.as_str() {
        "noon" => return Ok(NaiveTime::from_hms_opt(12, 0, 0).unwrap()),
        "midnight" => return Ok(NaiveTime::from_hms_opt(0, 0, 0).unwrap()),
        _ => {}
    }

    let formats = [
        "%H:%M:%S", // 14:30:00
        "%H:%M",    // 14:30
        "%I:%M %p", // 9:00 am
        "%I%p",     // 9am
        "%I %p",    // 9 am
    ];

    for format in &formats {
        if let Ok(time) = NaiveTime::parse_from_str(&input, format) {
            return Ok(time);
        }
    }

    Err(anyhow::anyhow!(
        "Invalid time format: '{}'. Use 24-hour ('14:30'), 12-hour ('2:30 PM', '9am'), 'noon', or 'midnight'.",
        time_str
    ))
}

/// Parse a days-of-week list like "mon,wed,fri" or "weekdays" into the
/// stored comma-separated form (1 = Monday .. 7 = Sunday).
pub fn parse_weekdays(days_str: &str) -> Result<String> {
    let input = days_str.trim().to_lowercase();

    match input.as_str() {
        "weekdays" | "workdays" => return Ok("1,2,3,4,5".to_string()),
        "weekends" => return Ok("6,7".to_string()),
        "daily" | "everyday" => return Ok("1,2,3,4,5,6,7".to_string()),
        _ => {}
    }

    let mut numbers: Vec<u8> = Vec::new();
    let mut invalid = Vec::new();

    for day in input.split(',') {
        let day = day.trim();
        if day.is_empty() {
            continue;
        }

        let number = match day {
            "mon" | "monday" => 1,
            "tue" | "tuesday" => 2,
            "wed" | "wednesday" => 3,
            "thu" | "thursday" => 4,
            "fri" | "friday" => 5,
            "sat" | "saturday" => 6,
            "sun" | "sunday" => 7,
            _ => {
                invalid.push(day.to_string());
                continue;
            }
        };
        if !numbers.contains(&number) {
            numbers.push(number);
        }
    }

    if !invalid.is_empty() {
        return Err(anyhow::anyhow!(
            "Invalid day(s): {}. Use names like 'mon,wed,fri' or groups like 'weekdays'.",
            invalid.join(", ")
        ));
    }
    if numbers.is_empty() {
        return Err(anyhow::anyhow!(
            "No valid days specified in: '{}'",
            days_str
        ));
    }

    numbers.sort_unstable();
    Ok(numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(","))
}
