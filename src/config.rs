use chrono::{Months, Weekday};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::calendar::{CalendarDate, YearMonth};
use crate::error::{Error, Result};
use crate::selection::SelectionMode;
use crate::theme::CalendarTheme;

pub const DEFAULT_HEADER_FORMAT: &str = "%b %Y";
pub const DEFAULT_WEEKDAY_SYMBOLS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub start_date:           CalendarDate,
    pub end_date:             CalendarDate,
    pub selection_mode:       SelectionMode,
    pub show_adjacent_months: bool,
    pub show_month_with_year: bool,
    #[serde(with = "weekday_name")]
    pub week_start:           Weekday,
    /// chrono strftime pattern for page titles.
    pub header_format:        String,
    /// Sunday-first labels; rotated to `week_start` by the picker.
    pub weekday_symbols:      Option<Vec<String>>,
    pub theme:                CalendarTheme,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        let (start_date, end_date) = default_date_range(CalendarDate::today());
        Self {
            start_date, end_date,
            selection_mode:       SelectionMode::default(),
            show_adjacent_months: false,
            show_month_with_year: false,
            week_start:           Weekday::Sun,
            header_format:        DEFAULT_HEADER_FORMAT.to_owned(),
            weekday_symbols:      None,
            theme:                CalendarTheme::default(),
        }
    }
}

impl CalendarConfig {
    /// Reads `<config dir>/monthgrid/config.toml`, or defaults if it is absent.
    pub fn load() -> Result<Self> {
        let path = config_dir().join("config.toml");
        if path.exists() {
            Self::from_path(&path)
        } else {
            Ok(CalendarConfig::default())
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let cfg = Self::from_toml_str(&std::fs::read_to_string(path)?)?;
        tracing::info!("loaded config from {}", path.display());
        Ok(cfg)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: CalendarConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.start_date > self.end_date {
            return Err(Error::InvalidRange { start: self.start_date, end: self.end_date });
        }
        if let Some(ym) = YearMonth::new(2000, 1) {
            ym.format(&self.header_format)?;
        }
        if let Some(ref symbols) = self.weekday_symbols {
            if symbols.len() != 7 {
                return Err(Error::InvalidWeekdaySymbols(symbols.len()));
            }
        }
        Ok(())
    }
}

/// One year either side of `today`. Feb 29 clamps to Feb 28.
pub fn default_date_range(today: CalendarDate) -> (CalendarDate, CalendarDate) {
    let t = today.naive();
    match (t.checked_sub_months(Months::new(12)), t.checked_add_months(Months::new(12))) {
        (Some(a), Some(b)) => (a.into(), b.into()),
        _                  => (today, today),
    }
}

pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("monthgrid")
}

/// `Weekday` as a short lowercase name ("sun"); accepts anything chrono parses.
mod weekday_name {
    use chrono::Weekday;
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(w: &Weekday, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(match w {
            Weekday::Mon => "mon", Weekday::Tue => "tue", Weekday::Wed => "wed",
            Weekday::Thu => "thu", Weekday::Fri => "fri", Weekday::Sat => "sat",
            Weekday::Sun => "sun",
        })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Weekday, D::Error> {
        let s = String::deserialize(d)?;
        s.parse().map_err(|_| D::Error::custom(format!("invalid weekday: {s}")))
    }
}
