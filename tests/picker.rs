use std::cell::RefCell;
use std::rc::Rc;

use monthgrid::{
    generate, CalendarConfig, CalendarContext, CalendarDate, CalendarPicker, Error,
    SelectionEvent, SelectionMode, GRID_CELLS,
};

fn d(y: i32, m: u32, day: u32) -> CalendarDate {
    CalendarDate::from_ymd(y, m, day).unwrap()
}

fn picker(mode: SelectionMode, today: CalendarDate) -> CalendarPicker {
    let cfg = CalendarConfig {
        start_date:     d(2024, 1, 1),
        end_date:       d(2024, 12, 31),
        selection_mode: mode,
        ..CalendarConfig::default()
    };
    CalendarPicker::new(cfg, CalendarContext::default().with_today(today)).unwrap()
}

#[test]
fn every_page_has_42_cells_across_a_long_range() {
    let ctx = CalendarContext::default();
    for adjacent in [false, true] {
        let months = generate(&ctx, d(1999, 7, 15), d(2001, 3, 2), adjacent).unwrap();
        assert_eq!(months.len(), 21);
        for m in &months {
            assert_eq!(m.cells().len(), GRID_CELLS);
            let own = m.cells().iter().flatten().filter(|c| m.contains(**c)).count();
            let other = m.cells().iter().flatten().count() - own;
            assert_eq!(own as u32, m.year_month().days_in_month());
            if adjacent {
                assert_eq!(own + other, GRID_CELLS);
            } else {
                assert_eq!(other, 0);
            }
        }
        assert!(months.windows(2).all(|w| w[0].year_month() < w[1].year_month()));
    }
}

#[test]
fn inverted_range_fails_fast() {
    let err = generate(&CalendarContext::default(), d(2024, 5, 1), d(2024, 4, 30), false).unwrap_err();
    assert!(matches!(err, Error::InvalidRange { .. }));
}

#[test]
fn range_scenario() {
    let mut p = picker(SelectionMode::Range, d(2024, 3, 1));
    let ranges = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&ranges);
    p.controller_mut().on_range_selected(move |f, t| sink.borrow_mut().push((f, t)));

    assert_eq!(p.tap(d(2024, 3, 10)), None);
    assert_eq!(p.tap(d(2024, 3, 5)), None);
    assert_eq!(p.controller().state().from, Some(d(2024, 3, 5)));
    assert_eq!(
        p.tap(d(2024, 3, 20)),
        Some(SelectionEvent::RangeSelected { from: d(2024, 3, 5), to: d(2024, 3, 20) })
    );
    assert_eq!(*ranges.borrow(), [(d(2024, 3, 5), d(2024, 3, 20))]);

    let c = p.controller();
    assert!(c.is_start(d(2024, 3, 5)));
    assert!(c.is_end(d(2024, 3, 20)));
    assert!(c.is_in_range(d(2024, 3, 6)));
    assert!(!c.is_in_range(d(2024, 3, 21)));
}

#[test]
fn multiple_scenario() {
    let mut p = picker(SelectionMode::Multiple, d(2024, 3, 1));
    assert_eq!(
        p.tap(d(2024, 3, 10)),
        Some(SelectionEvent::MultipleSelected { dates: vec![d(2024, 3, 10)] })
    );
    assert_eq!(p.tap(d(2024, 3, 10)), Some(SelectionEvent::MultipleSelected { dates: vec![] }));
    assert!(p.controller().selected_dates().is_empty());
}

#[test]
fn single_scenario() {
    let mut p = picker(SelectionMode::Single, d(2024, 3, 1));
    assert_eq!(p.tap(d(2024, 3, 10)), Some(SelectionEvent::DateSelected { date: d(2024, 3, 10) }));
    assert_eq!(p.tap(d(2024, 3, 15)), Some(SelectionEvent::DateSelected { date: d(2024, 3, 15) }));
    assert_eq!(p.controller().state().from, Some(d(2024, 3, 15)));
    assert_eq!(p.controller().state().to, None);

    let v = p.controller().version();
    assert_eq!(p.tap(d(2024, 3, 15)), None);
    assert_eq!(p.controller().version(), v);
}

#[test]
fn taps_on_another_page_are_ignored_when_adjacent_hidden() {
    let mut p = picker(SelectionMode::Single, d(2024, 3, 1));
    assert_eq!(p.tap(d(2024, 4, 2)), None);
    p.next_page();
    assert!(p.tap(d(2024, 4, 2)).is_some());
}

#[test]
fn march_2024_layout() {
    let months = generate(&CalendarContext::default(), d(2024, 3, 1), d(2024, 3, 31), false).unwrap();
    let cells = months[0].cells();
    assert_eq!(cells.iter().take_while(|c| c.is_none()).count(), 5);
    assert_eq!(cells.iter().rev().take_while(|c| c.is_none()).count(), 6);
    assert_eq!(cells[5], Some(d(2024, 3, 1)));
    assert_eq!(cells[35], Some(d(2024, 3, 31)));
}
