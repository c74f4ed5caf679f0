use serde::{Deserialize, Serialize};
use std::fmt;

use crate::calendar::{CalendarContext, CalendarDate, YearMonth};

// ─── Types ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    None,
    #[default]
    Single,
    Multiple,
    Range,
}

impl std::str::FromStr for SelectionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none"     => Ok(Self::None),
            "single"   => Ok(Self::Single),
            "multiple" => Ok(Self::Multiple),
            "range"    => Ok(Self::Range),
            other      => Err(format!("unknown selection mode: {other}")),
        }
    }
}

/// What changed after an accepted tap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionEvent {
    DateSelected { date: CalendarDate },
    RangeSelected { from: CalendarDate, to: CalendarDate },
    MultipleSelected { dates: Vec<CalendarDate> },
}

/// Single and range modes use `from`/`to`; multiple mode uses `selected`,
/// kept in insertion order. In range mode `from <= to` whenever `to` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    pub from:     Option<CalendarDate>,
    pub to:       Option<CalendarDate>,
    pub selected: Vec<CalendarDate>,
}

type DateFn     = Box<dyn FnMut(CalendarDate)>;
type RangeFn    = Box<dyn FnMut(CalendarDate, CalendarDate)>;
type MultipleFn = Box<dyn FnMut(&[CalendarDate])>;

/// Hooks fired alongside the matching [`SelectionEvent`].
#[derive(Default)]
pub struct SelectionCallbacks {
    pub on_date_selected:           Option<DateFn>,
    pub on_range_selected:          Option<RangeFn>,
    pub on_multiple_dates_selected: Option<MultipleFn>,
}

impl fmt::Debug for SelectionCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionCallbacks")
            .field("on_date_selected", &self.on_date_selected.is_some())
            .field("on_range_selected", &self.on_range_selected.is_some())
            .field("on_multiple_dates_selected", &self.on_multiple_dates_selected.is_some())
            .finish()
    }
}

// ─── Controller ───────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct SelectionController {
    ctx:                  CalendarContext,
    mode:                 SelectionMode,
    show_adjacent_months: bool,
    state:                SelectionState,
    version:              u64,
    callbacks:            SelectionCallbacks,
}

impl SelectionController {
    pub fn new(ctx: CalendarContext, mode: SelectionMode, show_adjacent_months: bool) -> Self {
        Self {
            ctx, mode, show_adjacent_months,
            state:     SelectionState::default(),
            version:   0,
            callbacks: SelectionCallbacks::default(),
        }
    }

    pub fn mode(&self)  -> SelectionMode   { self.mode }
    pub fn state(&self) -> &SelectionState { &self.state }

    /// Bumped on every accepted tap, including range taps that emit nothing.
    pub fn version(&self) -> u64 { self.version }

    pub fn set_callbacks(&mut self, callbacks: SelectionCallbacks) { self.callbacks = callbacks; }

    pub fn take_callbacks(&mut self) -> SelectionCallbacks { std::mem::take(&mut self.callbacks) }

    pub fn on_date_selected(&mut self, f: impl FnMut(CalendarDate) + 'static) {
        self.callbacks.on_date_selected = Some(Box::new(f));
    }

    pub fn on_range_selected(&mut self, f: impl FnMut(CalendarDate, CalendarDate) + 'static) {
        self.callbacks.on_range_selected = Some(Box::new(f));
    }

    pub fn on_multiple_dates_selected(&mut self, f: impl FnMut(&[CalendarDate]) + 'static) {
        self.callbacks.on_multiple_dates_selected = Some(Box::new(f));
    }

    // ── Mutation ──────────────────────────────────────────────────────────────

    /// Applies a tap on `date`, shown on the page for `month_of_date`.
    pub fn handle_selected_date(
        &mut self,
        date:          CalendarDate,
        month_of_date: YearMonth,
    ) -> Option<SelectionEvent> {
        if self.mode == SelectionMode::None {
            tracing::trace!(%date, "tap ignored: selection disabled");
            return None;
        }
        if !self.show_adjacent_months && !month_of_date.contains(date) {
            tracing::trace!(%date, page = %month_of_date, "tap ignored: outside page month");
            return None;
        }
        if self.state.from == Some(date) || self.state.to == Some(date) {
            tracing::trace!(%date, "tap ignored: already an endpoint");
            return None;
        }

        self.version += 1;
        let event = match self.mode {
            SelectionMode::Single   => self.select_single(date),
            SelectionMode::Range    => self.select_range(date),
            SelectionMode::Multiple => self.toggle_multiple(date),
            SelectionMode::None     => None,
        };
        tracing::debug!(%date, mode = ?self.mode, ?event, "tap accepted");

        if let Some(ref ev) = event {
            self.notify(ev);
        }
        event
    }

    fn select_single(&mut self, date: CalendarDate) -> Option<SelectionEvent> {
        self.state.from = Some(date);
        self.state.to   = None;
        Some(SelectionEvent::DateSelected { date })
    }

    fn select_range(&mut self, date: CalendarDate) -> Option<SelectionEvent> {
        match (self.state.from, self.state.to) {
            // Nothing yet, or a finished range: start over.
            (None, _) | (Some(_), Some(_)) => {
                self.state.from = Some(date);
                self.state.to   = None;
                None
            }
            (Some(from), None) if date < from => {
                self.state.from = Some(date);
                None
            }
            (Some(from), None) => {
                self.state.to = Some(date);
                Some(SelectionEvent::RangeSelected { from, to: date })
            }
        }
    }

    fn toggle_multiple(&mut self, date: CalendarDate) -> Option<SelectionEvent> {
        match self.state.selected.iter().position(|d| *d == date) {
            Some(i) => { self.state.selected.remove(i); }
            None    => self.state.selected.push(date),
        }
        Some(SelectionEvent::MultipleSelected { dates: self.state.selected.clone() })
    }

    fn notify(&mut self, event: &SelectionEvent) {
        match event {
            SelectionEvent::DateSelected { date } => {
                if let Some(f) = self.callbacks.on_date_selected.as_mut() { f(*date); }
            }
            SelectionEvent::RangeSelected { from, to } => {
                if let Some(f) = self.callbacks.on_range_selected.as_mut() { f(*from, *to); }
            }
            SelectionEvent::MultipleSelected { dates } => {
                if let Some(f) = self.callbacks.on_multiple_dates_selected.as_mut() { f(dates); }
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    pub fn is_start(&self, date: CalendarDate) -> bool { self.state.from == Some(date) }

    pub fn is_end(&self, date: CalendarDate) -> bool { self.state.to == Some(date) }

    pub fn is_selected(&self, date: CalendarDate) -> bool {
        self.is_start(date) || self.is_end(date)
    }

    /// Strictly between the endpoints of a completed range.
    pub fn is_in_range(&self, date: CalendarDate) -> bool {
        match (self.state.from, self.state.to) {
            (Some(from), Some(to)) => from < date && date < to,
            _ => false,
        }
    }

    pub fn is_middle(&self, date: CalendarDate) -> bool {
        self.is_in_range(date) && !self.is_start(date) && !self.is_end(date)
    }

    pub fn is_multiple_selected(&self, date: CalendarDate) -> bool {
        self.state.selected.contains(&date)
    }

    pub fn is_today(&self, date: CalendarDate) -> bool { self.ctx.today == date }

    pub fn selected_dates(&self) -> &[CalendarDate] { &self.state.selected }
}
