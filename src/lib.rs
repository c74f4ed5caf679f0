//! Month-grid generation and tap-driven date selection for calendar pickers.
//! All dates are day-precision UTC; nothing here draws.

pub mod calendar;
pub mod config;
pub mod error;
pub mod picker;
pub mod selection;
pub mod theme;

pub use calendar::grid::{generate, row_count, MonthDescriptor, GRID_CELLS};
pub use calendar::{CalendarContext, CalendarDate, YearMonth};
pub use config::CalendarConfig;
pub use error::{Error, Result};
pub use picker::CalendarPicker;
pub use selection::{SelectionController, SelectionEvent, SelectionMode, SelectionState};
pub use theme::CalendarTheme;
