use chrono::{Days, Months};
use serde::Serialize;

use super::{CalendarContext, CalendarDate, YearMonth};
use crate::error::{Error, Result};

/// Cells per page: 6 rows of 7 days.
pub const GRID_CELLS: usize = 42;
pub const GRID_ROWS:  usize = 6;

/// One page of the calendar. `cells[i] == None` is a padding slot, which only
/// appears when adjacent months are hidden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthDescriptor {
    year:  i32,
    month: u32,
    cells: Vec<Option<CalendarDate>>,
    #[serde(skip)]
    ym:    YearMonth,
}

impl MonthDescriptor {
    pub fn year(&self)  -> i32 { self.year }
    pub fn month(&self) -> u32 { self.month }

    pub fn year_month(&self) -> YearMonth { self.ym }

    pub fn cells(&self) -> &[Option<CalendarDate>] { &self.cells }

    pub fn cell(&self, index: usize) -> Option<CalendarDate> {
        self.cells.get(index).copied().flatten()
    }

    /// The grid split into rows of 7.
    pub fn weeks(&self) -> impl Iterator<Item = &[Option<CalendarDate>]> {
        self.cells.chunks(7)
    }

    /// True when `date` belongs to this page's own month (not an adjacent one).
    pub fn contains(&self, date: CalendarDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn index_of(&self, date: CalendarDate) -> Option<usize> {
        self.cells.iter().position(|c| *c == Some(date))
    }
}

/// Builds one descriptor per month from `start`'s month to `end`'s month
/// inclusive, in ascending order.
pub fn generate(
    ctx:   &CalendarContext,
    start: CalendarDate,
    end:   CalendarDate,
    show_adjacent_months: bool,
) -> Result<Vec<MonthDescriptor>> {
    if start > end {
        return Err(Error::InvalidRange { start, end });
    }

    let last = end.year_month();
    let mut out = Vec::new();
    let mut ym = Some(start.year_month());
    while let Some(cur) = ym.filter(|m| *m <= last) {
        out.push(month_descriptor(ctx, cur, show_adjacent_months));
        ym = cur.succ();
    }

    tracing::debug!(
        months = out.len(),
        adjacent = show_adjacent_months,
        "generated month grid {}..={}", start.year_month(), last
    );
    Ok(out)
}

/// Lays out a single month onto the 42-cell grid.
pub fn month_descriptor(
    ctx: &CalendarContext,
    ym:  YearMonth,
    show_adjacent_months: bool,
) -> MonthDescriptor {
    let first   = ym.first_day().naive();
    let leading = ctx.weekday_index(ym.first_day()) as usize;
    let mut cells: Vec<Option<CalendarDate>> = Vec::with_capacity(GRID_CELLS);

    if show_adjacent_months {
        match first.checked_sub_days(Days::new(leading as u64)) {
            Some(from) => cells.extend(from.iter_days().take(leading).map(|d| Some(CalendarDate::from(d)))),
            None       => cells.extend(padding(leading)),
        }
    } else {
        cells.extend(padding(leading));
    }

    cells.extend(ym.days().map(Some));

    let remaining = GRID_CELLS - cells.len();
    if show_adjacent_months {
        match first.checked_add_months(Months::new(1)) {
            Some(next) => cells.extend(next.iter_days().take(remaining).map(|d| Some(CalendarDate::from(d)))),
            None       => cells.extend(padding(remaining)),
        }
    } else {
        cells.extend(padding(remaining));
    }

    MonthDescriptor { year: ym.year(), month: ym.month(), cells, ym }
}

fn padding(n: usize) -> impl Iterator<Item = Option<CalendarDate>> {
    std::iter::repeat(None).take(n)
}

/// Rows a caller needs to show for `ym`: always 6 with adjacent months,
/// otherwise only the rows that hold days of the month.
pub fn row_count(ctx: &CalendarContext, ym: YearMonth, show_adjacent_months: bool) -> usize {
    if show_adjacent_months {
        return GRID_ROWS;
    }
    let slots = ym.days_in_month() + ctx.weekday_index(ym.first_day());
    slots.div_ceil(7) as usize
}
