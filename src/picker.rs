use crate::calendar::grid::{self, MonthDescriptor};
use crate::calendar::{CalendarContext, CalendarDate, YearMonth};
use crate::config::{CalendarConfig, DEFAULT_WEEKDAY_SYMBOLS};
use crate::error::Result;
use crate::selection::{SelectionController, SelectionEvent};

#[derive(Debug)]
pub struct CalendarPicker {
    config:        CalendarConfig,
    ctx:           CalendarContext,
    months:        Vec<MonthDescriptor>,
    current_index: usize,
    controller:    SelectionController,
}

impl CalendarPicker {
    /// `ctx.week_start` is replaced by the config's; `ctx.today` picks the
    /// initial page.
    pub fn new(config: CalendarConfig, ctx: CalendarContext) -> Result<Self> {
        config.validate()?;
        let ctx    = CalendarContext { week_start: config.week_start, ..ctx };
        let months = grid::generate(&ctx, config.start_date, config.end_date, config.show_adjacent_months)?;
        let controller = SelectionController::new(ctx, config.selection_mode, config.show_adjacent_months);
        let current_index = initial_index(&months, ctx.today);
        Ok(Self { config, ctx, months, current_index, controller })
    }

    pub fn config(&self)  -> &CalendarConfig       { &self.config }
    pub fn context(&self) -> &CalendarContext      { &self.ctx }
    pub fn months(&self)  -> &[MonthDescriptor]    { &self.months }

    pub fn controller(&self) -> &SelectionController { &self.controller }
    pub fn controller_mut(&mut self) -> &mut SelectionController { &mut self.controller }

    // ── Paging ────────────────────────────────────────────────────────────────

    pub fn current_index(&self) -> usize { self.current_index }

    pub fn current_month(&self) -> &MonthDescriptor { &self.months[self.current_index] }

    /// Ignores indices past the last page. Returns whether the page changed.
    pub fn set_current_index(&mut self, index: usize) -> bool {
        if index >= self.months.len() || index == self.current_index {
            return false;
        }
        self.current_index = index;
        true
    }

    pub fn next_page(&mut self) -> bool { self.set_current_index(self.current_index + 1) }

    pub fn prev_page(&mut self) -> bool {
        match self.current_index.checked_sub(1) {
            Some(i) => self.set_current_index(i),
            None    => false,
        }
    }

    pub fn go_to(&mut self, ym: YearMonth) -> bool {
        match self.months.iter().position(|m| m.year_month() == ym) {
            Some(i) => self.set_current_index(i),
            None    => false,
        }
    }

    // ── Presentation ──────────────────────────────────────────────────────────

    /// Whether the month/year header is shown at all.
    pub fn show_header(&self) -> bool { self.config.show_month_with_year }

    /// Header text for the current page, `None` when the header is hidden.
    pub fn title(&self) -> Result<Option<String>> {
        if !self.show_header() {
            return Ok(None);
        }
        self.current_month().year_month().format(&self.config.header_format).map(Some)
    }

    pub fn visible_rows(&self) -> usize {
        grid::row_count(&self.ctx, self.current_month().year_month(), self.config.show_adjacent_months)
    }

    /// Column labels starting at the configured first day of the week.
    pub fn weekday_symbols(&self) -> Vec<String> {
        let base: Vec<String> = match self.config.weekday_symbols {
            Some(ref s) => s.clone(),
            None        => DEFAULT_WEEKDAY_SYMBOLS.iter().map(|s| (*s).to_owned()).collect(),
        };
        let shift = self.ctx.week_start.num_days_from_sunday() as usize;
        base.iter().cycle().skip(shift).take(7).cloned().collect()
    }

    // ── Selection ─────────────────────────────────────────────────────────────

    pub fn tap(&mut self, date: CalendarDate) -> Option<SelectionEvent> {
        let ym = self.current_month().year_month();
        self.controller.handle_selected_date(date, ym)
    }

    /// Taps whatever is in cell `index` of the current page. Padding cells do
    /// nothing.
    pub fn tap_cell(&mut self, index: usize) -> Option<SelectionEvent> {
        let date = self.current_month().cell(index)?;
        self.tap(date)
    }

    /// Swaps in a new configuration. Months are regenerated and the selection
    /// starts over, keeping registered callbacks; the page stays put if its
    /// month still exists.
    pub fn reconfigure(&mut self, config: CalendarConfig) -> Result<()> {
        let shown = self.current_month().year_month();
        let mut next = Self::new(config, self.ctx)?;
        next.go_to(shown);
        next.controller.set_callbacks(self.controller.take_callbacks());
        tracing::debug!(months = next.months.len(), page = next.current_index, "picker reconfigured");
        *self = next;
        Ok(())
    }
}

/// Page holding `today`, else the middle page.
fn initial_index(months: &[MonthDescriptor], today: CalendarDate) -> usize {
    let ym = today.year_month();
    months.iter()
        .position(|m| m.year_month() == ym)
        .unwrap_or(months.len() / 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::SelectionMode;
    use chrono::Weekday;

    fn d(y: i32, m: u32, day: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, day).unwrap()
    }

    fn config(start: CalendarDate, end: CalendarDate) -> CalendarConfig {
        CalendarConfig {
            start_date: start,
            end_date:   end,
            show_month_with_year: true,
            ..CalendarConfig::default()
        }
    }

    fn ctx(today: CalendarDate) -> CalendarContext {
        CalendarContext::default().with_today(today)
    }

    #[test]
    fn opens_on_todays_month() {
        let p = CalendarPicker::new(config(d(2024, 1, 1), d(2024, 12, 31)), ctx(d(2024, 3, 10))).unwrap();
        assert_eq!(p.months().len(), 12);
        assert_eq!(p.current_index(), 2);
        assert_eq!(p.title().unwrap().as_deref(), Some("Mar 2024"));
    }

    #[test]
    fn header_follows_show_month_with_year() {
        let hidden = CalendarConfig { show_month_with_year: false, ..config(d(2024, 3, 1), d(2024, 3, 31)) };
        let p = CalendarPicker::new(hidden, ctx(d(2024, 3, 1))).unwrap();
        assert!(!p.show_header());
        assert_eq!(p.title().unwrap(), None);

        let shown = CalendarConfig { header_format: "%B %Y".into(), ..config(d(2024, 3, 1), d(2024, 3, 31)) };
        let p = CalendarPicker::new(shown, ctx(d(2024, 3, 1))).unwrap();
        assert!(p.show_header());
        assert_eq!(p.title().unwrap().as_deref(), Some("March 2024"));
    }

    #[test]
    fn rejects_time_of_day_header_format() {
        let cfg = CalendarConfig { header_format: "%b %Y %H:%M".into(), ..config(d(2024, 3, 1), d(2024, 3, 31)) };
        assert!(matches!(
            CalendarPicker::new(cfg, ctx(d(2024, 3, 1))),
            Err(crate::error::Error::InvalidHeaderFormat(_))
        ));
    }

    #[test]
    fn falls_back_to_middle_page() {
        let p = CalendarPicker::new(config(d(2024, 1, 1), d(2024, 5, 31)), ctx(d(2030, 1, 1))).unwrap();
        assert_eq!(p.current_index(), 2);
    }

    #[test]
    fn paging_is_clamped() {
        let mut p = CalendarPicker::new(config(d(2024, 1, 1), d(2024, 2, 29)), ctx(d(2024, 1, 5))).unwrap();
        assert!(!p.prev_page());
        assert!(p.next_page());
        assert!(!p.next_page());
        assert_eq!(p.current_month().month(), 2);
        assert!(!p.set_current_index(9));
        assert!(p.go_to(YearMonth::new(2024, 1).unwrap()));
    }

    #[test]
    fn visible_rows_track_current_page() {
        let mut p = CalendarPicker::new(config(d(2024, 2, 1), d(2024, 3, 31)), ctx(d(2024, 2, 1))).unwrap();
        assert_eq!(p.visible_rows(), 5);
        p.next_page();
        assert_eq!(p.visible_rows(), 6);
    }

    #[test]
    fn weekday_symbols_rotate_with_week_start() {
        let cfg = CalendarConfig { week_start: Weekday::Mon, ..config(d(2024, 1, 1), d(2024, 1, 31)) };
        let p = CalendarPicker::new(cfg, ctx(d(2024, 1, 1))).unwrap();
        assert_eq!(p.weekday_symbols(), ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]);
        assert_eq!(p.current_month().cell(0), Some(d(2024, 1, 1)));
    }

    #[test]
    fn tap_cell_uses_current_page() {
        let mut p = CalendarPicker::new(config(d(2024, 3, 1), d(2024, 3, 31)), ctx(d(2024, 3, 1))).unwrap();
        assert_eq!(p.tap_cell(0), None);
        assert_eq!(p.tap_cell(5), Some(SelectionEvent::DateSelected { date: d(2024, 3, 1) }));
        assert_eq!(p.tap_cell(99), None);
    }

    #[test]
    fn reconfigure_resets_selection_and_keeps_page() {
        let mut p = CalendarPicker::new(config(d(2024, 1, 1), d(2024, 12, 31)), ctx(d(2024, 6, 1))).unwrap();
        p.tap(d(2024, 6, 12));
        let cfg = CalendarConfig {
            selection_mode: SelectionMode::Range,
            ..config(d(2024, 4, 1), d(2024, 8, 31))
        };
        p.reconfigure(cfg).unwrap();
        assert_eq!(p.title().unwrap().as_deref(), Some("Jun 2024"));
        assert_eq!(p.controller().mode(), SelectionMode::Range);
        assert_eq!(p.controller().state().from, None);
    }

    #[test]
    fn reconfigure_keeps_callbacks() {
        use std::cell::Cell;
        use std::rc::Rc;

        let hits = Rc::new(Cell::new(0));
        let mut p = CalendarPicker::new(config(d(2024, 1, 1), d(2024, 3, 31)), ctx(d(2024, 2, 1))).unwrap();
        let h = Rc::clone(&hits);
        p.controller_mut().on_date_selected(move |_| h.set(h.get() + 1));
        p.reconfigure(config(d(2024, 2, 1), d(2024, 2, 29))).unwrap();
        p.tap(d(2024, 2, 14));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn rejects_inverted_range() {
        assert!(CalendarPicker::new(config(d(2024, 2, 1), d(2024, 1, 1)), ctx(d(2024, 1, 1))).is_err());
    }
}
