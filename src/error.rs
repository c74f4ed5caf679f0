use thiserror::Error;

use crate::calendar::CalendarDate;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange { start: CalendarDate, end: CalendarDate },

    #[error("expected 7 weekday symbols, got {0}")]
    InvalidWeekdaySymbols(usize),

    #[error("invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("invalid header format: {0:?}")]
    InvalidHeaderFormat(String),

    #[error("invalid month: {0} (expected YYYY-MM)")]
    InvalidYearMonth(String),

    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
