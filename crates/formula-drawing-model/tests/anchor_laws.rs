use formula_drawing_model::drawings::{
    AnchorKind, AnchorPlacement, CellMarker, EditAs, EmuSize, OneCellAnchor, TwoCellAnchor,
};
use formula_drawing_model::DrawingError;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn fresh_placement_defaults_to_visible_region() {
    let mut placement = AnchorPlacement::new();

    let from = *placement.top_left();
    let to = *placement.bottom_right().expect("two-cell anchor has a bottom-right");

    assert_eq!(from, CellMarker::with_offsets(5, 0, 0, 0));
    assert_eq!(to, CellMarker::with_offsets(10, 20, 0, 0));
    assert_eq!(
        placement.as_two_cell().map(|anchor| anchor.edit_as),
        Some(EditAs::MoveOnly)
    );
}

#[test]
fn default_offsets_are_explicitly_present() {
    let mut placement = AnchorPlacement::new();
    placement.set_defaults();

    let anchor = placement.as_two_cell().expect("two-cell");
    for marker in [anchor.from, anchor.to] {
        assert_eq!(marker.col_off, Some(0));
        assert_eq!(marker.row_off, Some(0));
    }
}

#[test]
fn top_left_handles_share_the_same_marker() {
    let mut placement = AnchorPlacement::new();

    placement.top_left().set_row(12);
    placement.top_left().set_col_offset(9_525);

    let marker = placement.top_left();
    assert_eq!(marker.row(), 12);
    assert_eq!(marker.col(), 5);
    assert_eq!(marker.col_offset(), 9_525);
}

#[test]
fn bottom_right_mutation_is_visible() {
    let mut placement = AnchorPlacement::new();
    placement.bottom_right().unwrap().move_to(3, 4);

    assert_eq!(
        placement.as_two_cell().map(|anchor| anchor.to),
        Some(CellMarker::new(3, 4))
    );
}

#[test]
fn bottom_right_on_one_cell_anchor_fails_without_mutation() {
    let original = OneCellAnchor::new(CellMarker::new(1, 1), EmuSize::new(952_500, 476_250));
    let mut placement = AnchorPlacement::from(original.clone());
    let before = placement.clone();

    let err = placement.bottom_right().unwrap_err();

    assert_eq!(
        err,
        DrawingError::UnsupportedAnchorKind {
            kind: AnchorKind::OneCell
        }
    );
    assert_eq!(err.to_string(), "one-cell anchors have no bottom-right marker");
    assert_eq!(placement, before);
    assert_eq!(placement.as_one_cell(), Some(&original));
}

#[test]
fn set_defaults_replaces_existing_region() {
    let mut placement =
        AnchorPlacement::from(TwoCellAnchor::new(CellMarker::new(0, 0), CellMarker::new(1, 1)));
    placement.set_defaults();
    assert_eq!(placement.as_two_cell(), Some(&TwoCellAnchor::default_region()));
}

proptest! {
    #[test]
    fn marker_writes_round_trip(col in 0u32..16_384, row in 0u32..1_048_576, dx in -1_000_000i64..1_000_000, dy in -1_000_000i64..1_000_000) {
        let mut placement = AnchorPlacement::new();
        {
            let marker = placement.bottom_right().unwrap();
            marker.move_to(col, row);
            marker.set_col_offset(dx);
            marker.set_row_offset(dy);
        }

        let to = placement.as_two_cell().unwrap().to;
        prop_assert_eq!(to, CellMarker::with_offsets(col, row, dx, dy));
        // The other endpoint keeps its default.
        prop_assert_eq!(*placement.top_left(), CellMarker::new(5, 0));
    }

    #[test]
    fn one_cell_anchor_never_yields_bottom_right(col in 0u32..16_384, row in 0u32..1_048_576, cx in 0i64..10_000_000, cy in 0i64..10_000_000) {
        let mut placement = AnchorPlacement::from(OneCellAnchor::new(CellMarker::new(col, row), EmuSize::new(cx, cy)));
        prop_assert!(placement.bottom_right().is_err());
        prop_assert_eq!(placement.kind(), AnchorKind::OneCell);
        prop_assert_eq!(*placement.top_left(), CellMarker::new(col, row));
    }
}
