//! Tests for the board state manager.

use super::*;
use crate::prompt::AssumeYes;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn widget(wid: &str) -> WidgetDescriptor {
    WidgetDescriptor::new(wid)
}

fn record(wid: &str, x: u32, y: u32, w: u32, h: u32) -> LayoutRecord {
    LayoutRecord::new(wid, GridRect::new(x, y, w, h))
}

fn decline(_: &str) -> bool {
    false
}

fn board_of(ids: &[&str]) -> Board {
    let widgets = ids.iter().map(|id| widget(id)).collect();
    let layout = ids
        .iter()
        .enumerate()
        .map(|(i, id)| record(id, i as u32, 0, 1, 1))
        .collect();
    Board::from_parts(widgets, layout)
}

// ---------------------------------------------------------------------------
// from_parts / to_parts
// ---------------------------------------------------------------------------

#[test]
fn test_from_parts_pairs_by_identifier() {
    let board = Board::from_parts(
        vec![widget("weather-1"), widget("note-2")],
        vec![record("note-2", 1, 0, 1, 2), record("weather-1", 0, 0, 1, 1)],
    );
    assert_eq!(board.len(), 2);
    assert_eq!(board.get("note-2").map(|p| p.rect), Some(GridRect::new(1, 0, 1, 2)));
    assert_eq!(board.get("weather-1").map(|p| p.rect), Some(GridRect::ORIGIN));
}

#[test]
fn test_from_parts_keeps_widget_order() {
    let board = Board::from_parts(
        vec![widget("b-1"), widget("a-1")],
        vec![record("a-1", 0, 0, 1, 1), record("b-1", 1, 0, 1, 1)],
    );
    assert_eq!(board.ids().collect::<Vec<_>>(), vec!["b-1", "a-1"]);
}

#[test]
fn test_from_parts_drops_widget_without_layout() {
    let board = Board::from_parts(
        vec![widget("weather-1"), widget("note-2")],
        vec![record("weather-1", 0, 0, 1, 1)],
    );
    assert_eq!(board.ids().collect::<Vec<_>>(), vec!["weather-1"]);
}

#[test]
fn test_from_parts_drops_layout_without_widget() {
    let board = Board::from_parts(
        vec![widget("weather-1")],
        vec![record("weather-1", 0, 0, 1, 1), record("ghost-9", 3, 3, 1, 1)],
    );
    let (widgets, layout) = board.to_parts();
    assert_eq!(widgets.len(), 1);
    assert_eq!(layout.len(), 1);
    assert_eq!(layout[0].i, "weather-1");
}

#[test]
fn test_from_parts_first_duplicate_wins() {
    let board = Board::from_parts(
        vec![widget("note-1"), widget("note-1")],
        vec![record("note-1", 2, 0, 1, 1), record("note-1", 3, 0, 1, 1)],
    );
    assert_eq!(board.len(), 1);
    assert_eq!(board.get("note-1").map(|p| p.rect.x), Some(2));
}

#[test]
fn test_to_parts_arrays_share_identifiers_in_order() {
    let board = board_of(&["weather-1", "stock-2", "note-3"]);
    let (widgets, layout) = board.to_parts();
    let widget_ids: Vec<_> = widgets.iter().map(|w| w.wid.as_str()).collect();
    let layout_ids: Vec<_> = layout.iter().map(|r| r.i.as_str()).collect();
    assert_eq!(widget_ids, layout_ids);
}

#[test]
fn test_defaults_are_three_unit_widgets() {
    let board = Board::defaults();
    assert_eq!(
        board.ids().collect::<Vec<_>>(),
        vec!["weather-default", "stock-default", "note-default"]
    );
    assert!(board.iter().all(|p| p.rect.w == 1 && p.rect.h == 1));
}

// ---------------------------------------------------------------------------
// add_widget
// ---------------------------------------------------------------------------

#[test]
fn test_add_widget_creates_paired_entry_at_origin() {
    let mut board = Board::new();
    let wid = board.add_widget(Some(WidgetKind::Weather)).expect("added");

    assert!(wid.starts_with("weather-"));
    let placement = board.get(&wid).expect("placement exists");
    assert_eq!(placement.rect, GridRect::ORIGIN);

    let (widgets, layout) = board.to_parts();
    assert_eq!(widgets, vec![WidgetDescriptor::new(wid.clone())]);
    assert_eq!(layout, vec![LayoutRecord::new(wid, GridRect::ORIGIN)]);
}

#[test]
fn test_add_widget_appends_after_existing() {
    let mut board = board_of(&["note-1"]);
    let wid = board.add_widget(Some(WidgetKind::Lofi)).expect("added");
    assert_eq!(board.ids().collect::<Vec<_>>(), vec!["note-1", wid.as_str()]);
}

#[test]
fn test_add_widget_cancelled_changes_nothing() {
    let mut board = board_of(&["note-1"]);
    let before = board.clone();
    assert_eq!(board.add_widget(None), None);
    assert_eq!(board, before);
}

#[test]
fn test_add_widget_regenerates_colliding_identifier() {
    // Same seed produces the same first identifier; the second add must
    // step past it.
    let mut first_rng = StdRng::seed_from_u64(42);
    let mut board = Board::new();
    let first = board
        .add_widget_with(Some(WidgetKind::Note), &mut first_rng)
        .expect("added");

    let mut replay_rng = StdRng::seed_from_u64(42);
    let second = board
        .add_widget_with(Some(WidgetKind::Note), &mut replay_rng)
        .expect("added");

    assert_ne!(first, second);
    assert_eq!(board.len(), 2);
}

#[test]
fn test_add_many_widgets_keeps_identifiers_unique() {
    let mut board = Board::new();
    for _ in 0..200 {
        board.add_widget(Some(WidgetKind::StockMini));
    }
    let ids: HashSet<_> = board.ids().collect();
    assert_eq!(ids.len(), 200);
}

// ---------------------------------------------------------------------------
// delete_widget
// ---------------------------------------------------------------------------

#[test]
fn test_delete_removes_exactly_one_entry() {
    let mut board = board_of(&["weather-1", "stock-2", "note-3"]);
    let outcome = board.delete_widget("stock-2", &AssumeYes);

    match outcome {
        DeleteOutcome::Removed(p) => assert_eq!(p.wid(), "stock-2"),
        other => panic!("expected Removed, got: {other:?}"),
    }
    let (widgets, layout) = board.to_parts();
    assert_eq!(widgets.len(), 2);
    assert_eq!(layout.len(), 2);
    assert_eq!(board.ids().collect::<Vec<_>>(), vec!["weather-1", "note-3"]);
    assert_eq!(board.get("note-3").map(|p| p.rect.x), Some(2));
}

#[test]
fn test_delete_declined_changes_nothing() {
    let mut board = board_of(&["weather-1"]);
    let before = board.clone();
    assert_eq!(board.delete_widget("weather-1", &decline), DeleteOutcome::Declined);
    assert_eq!(board, before);
}

#[test]
fn test_delete_missing_is_silent_noop_without_prompt() {
    let mut board = board_of(&["weather-1"]);
    let asked = std::cell::Cell::new(false);
    let confirm = |_: &str| {
        asked.set(true);
        true
    };
    assert_eq!(board.delete_widget("nope-1", &confirm), DeleteOutcome::Missing);
    assert!(!asked.get());
    assert_eq!(board.len(), 1);
}

#[test]
fn test_delete_asks_delete_question() {
    let mut board = board_of(&["weather-1"]);
    let question = std::cell::RefCell::new(String::new());
    let confirm = |q: &str| {
        *question.borrow_mut() = q.to_string();
        true
    };
    board.delete_widget("weather-1", &confirm);
    assert_eq!(*question.borrow(), DELETE_QUESTION);
}

// ---------------------------------------------------------------------------
// apply_layout
// ---------------------------------------------------------------------------

#[test]
fn test_apply_layout_moves_matching_widgets() {
    let mut board = board_of(&["weather-1", "stock-2"]);
    let applied = board.apply_layout(&[record("weather-1", 3, 1, 1, 2), record("stock-2", 0, 0, 2, 1)]);
    assert_eq!(applied, 2);
    assert_eq!(board.get("weather-1").map(|p| p.rect), Some(GridRect::new(3, 1, 1, 2)));
    assert_eq!(board.get("stock-2").map(|p| p.rect), Some(GridRect::new(0, 0, 2, 1)));
}

#[test]
fn test_apply_layout_ignores_unknown_identifiers() {
    let mut board = board_of(&["weather-1"]);
    let applied = board.apply_layout(&[record("ghost-1", 1, 1, 1, 1)]);
    assert_eq!(applied, 0);
    assert_eq!(board.len(), 1);
    assert!(!board.contains("ghost-1"));
}

#[test]
fn test_apply_layout_partial_keeps_other_rects() {
    let mut board = board_of(&["weather-1", "stock-2"]);
    board.apply_layout(&[record("stock-2", 2, 2, 1, 1)]);
    assert_eq!(board.get("weather-1").map(|p| p.rect), Some(GridRect::ORIGIN));
}

#[test]
fn test_apply_layout_does_not_reorder() {
    let mut board = board_of(&["weather-1", "stock-2"]);
    board.apply_layout(&[record("stock-2", 0, 0, 1, 1), record("weather-1", 1, 0, 1, 1)]);
    assert_eq!(board.ids().collect::<Vec<_>>(), vec!["weather-1", "stock-2"]);
}

// ---------------------------------------------------------------------------
// Placement
// ---------------------------------------------------------------------------

#[test]
fn test_placement_kind_from_identifier() {
    assert_eq!(Placement::new("stock-123", GridRect::ORIGIN).kind(), Some(WidgetKind::Stock));
    assert_eq!(Placement::new("odd-1", GridRect::ORIGIN).kind(), None);
}
