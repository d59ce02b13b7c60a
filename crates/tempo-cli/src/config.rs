use chrono::{Datelike, Days, NaiveDate, NaiveTime};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

/// Clock style used when rendering times of day.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeFormat {
    #[serde(rename = "12h")]
    TwelveHour,
    #[serde(rename = "24h")]
    #[default]
    TwentyFourHour,
}

/// Presentation preferences, loaded from `tempo.toml` and `TEMPO_`-prefixed
/// environment variables. Passed by reference into the view layer; the
/// occurrence expansion itself never reads it.
#[derive(Deserialize, Debug)]
pub struct Config {
    #[serde(default)]
    pub time_format: TimeFormat,
    #[serde(default = "default_week_starts_monday")]
    pub week_starts_monday: bool,
    /// Overrides the default database location.
    #[serde(default)]
    pub database_path: Option<String>,
}

fn default_week_starts_monday() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_format: TimeFormat::default(),
            week_starts_monday: true,
            database_path: None,
        }
    }
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Toml::file("tempo.toml"))
            .merge(Env::prefixed("TEMPO_"))
            .extract()
    }
}

/// Renders a time of day according to the configured clock style.
pub fn format_time(time: NaiveTime, config: &Config) -> String {
    match config.time_format {
        TimeFormat::TwelveHour => time.format("%-I:%M %p").to_string(),
        TimeFormat::TwentyFourHour => time.format("%H:%M").to_string(),
    }
}

/// First day of the week containing `date`, honoring the configured week
/// start.
pub fn week_start_of(date: NaiveDate, config: &Config) -> NaiveDate {
    let days_back = if config.week_starts_monday {
        date.weekday().num_days_from_monday()
    } else {
        date.weekday().num_days_from_sunday()
    };
    date - Days::new(u64::from(days_back))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn time_formats_follow_config() {
        let time = NaiveTime::from_hms_opt(14, 30, 0).unwrap();
        let mut config = Config::default();
        assert_eq!(format_time(time, &config), "14:30");
        config.time_format = TimeFormat::TwelveHour;
        assert_eq!(format_time(time, &config), "2:30 PM");
    }

    #[test]
    fn week_start_respects_configuration() {
        // 2024-03-06 is a Wednesday
        let wednesday = date(2024, 3, 6);
        let mut config = Config::default();
        assert_eq!(week_start_of(wednesday, &config), date(2024, 3, 4));
        config.week_starts_monday = false;
        assert_eq!(week_start_of(wednesday, &config), date(2024, 3, 3));
    }
}
