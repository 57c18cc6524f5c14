//! Controller Tests
//!
//! Drives `SortableController` through pointer sequences against a
//! uniform 40px stack: A = [0, 40], B = [40, 80], C = [80, 120].

#[cfg(test)]
mod tests {
    use crate::controller::{Direction, ReorderEvent, Slot, SortableController};
    use crate::error::SortableError;
    use crate::geometry::{Layout, Point, Rect, StackLayout};

    const A: u32 = 1;
    const B: u32 = 2;
    const C: u32 = 3;
    const ROW: f64 = 40.0;

    fn setup() -> (SortableController<u32>, StackLayout<u32>) {
        let controller = SortableController::new([A, B, C]);
        let layout = StackLayout::uniform(Point::default(), 300.0, &[A, B, C], ROW);
        (controller, layout)
    }

    fn at(y: f64) -> Point {
        Point::new(10.0, y)
    }

    #[test]
    fn test_new_keeps_order_and_length() {
        let controller = SortableController::new([5u32, 3, 9, 1]);
        assert_eq!(controller.order(), vec![5, 3, 9, 1]);
        assert_eq!(controller.len(), 4);
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_new_drops_duplicate_keys() {
        let controller = SortableController::new([A, B, A, C, B]);
        assert_eq!(controller.order(), vec![A, B, C]);
    }

    #[test]
    fn test_null_drag_keeps_order() {
        let (mut controller, layout) = setup();

        controller.start_drag(B, at(60.0), &layout).expect("start failed");
        let event = controller.end_drag().expect("end failed");

        assert_eq!(event, ReorderEvent { key: B, from: 1, to: 1 });
        assert_eq!(controller.order(), vec![A, B, C]);
        assert!(controller.placeholder_index().is_none());
    }

    #[test]
    fn test_start_drag_sets_placeholder_and_neighbors() {
        let (mut controller, layout) = setup();

        controller.start_drag(B, Point::new(25.0, 55.0), &layout).unwrap();

        assert_eq!(controller.slots(), &[Slot::Item(A), Slot::Placeholder, Slot::Item(C)]);
        assert_eq!(controller.dragged(), Some(B));
        assert_eq!(controller.dragged_position(), Some(Point::new(0.0, 40.0)));
        assert_eq!(controller.dragged_size(), Some((300.0, ROW)));
        // Logical order still has B in its slot
        assert_eq!(controller.order(), vec![A, B, C]);

        let neighbors = controller.neighbors();
        assert_eq!(neighbors.len(), 2);
        assert_eq!((neighbors[0].key, neighbors[0].direction), (A, Direction::Previous));
        assert_eq!((neighbors[0].top, neighbors[0].bottom), (0.0, 40.0));
        assert_eq!((neighbors[1].key, neighbors[1].direction), (C, Direction::Next));
        assert_eq!((neighbors[1].top, neighbors[1].bottom), (80.0, 120.0));
    }

    #[test]
    fn test_drag_follows_pointer_offset() {
        let (mut controller, layout) = setup();

        controller.start_drag(B, Point::new(25.0, 55.0), &layout).unwrap();
        let moved = controller.drag_move(Point::new(35.0, 65.0), &layout).unwrap();

        assert!(!moved);
        assert_eq!(controller.dragged_position(), Some(Point::new(10.0, 50.0)));
    }

    #[test]
    fn test_drag_into_previous_swaps() {
        let (mut controller, layout) = setup();

        controller.start_drag(B, at(60.0), &layout).unwrap();
        assert!(controller.drag_move(at(20.0), &layout).unwrap());
        let event = controller.end_drag().unwrap();

        assert_eq!(controller.order(), vec![B, A, C]);
        assert_eq!(event, ReorderEvent { key: B, from: 1, to: 0 });
    }

    #[test]
    fn test_drag_first_to_last() {
        let (mut controller, layout) = setup();

        controller.start_drag(A, at(20.0), &layout).unwrap();
        assert!(controller.drag_move(at(60.0), &layout).unwrap());
        assert_eq!(controller.slots(), &[Slot::Item(B), Slot::Placeholder, Slot::Item(C)]);
        assert!(controller.drag_move(at(100.0), &layout).unwrap());
        let event = controller.end_drag().unwrap();

        assert_eq!(controller.order(), vec![B, C, A]);
        assert_eq!(event, ReorderEvent { key: A, from: 0, to: 2 });
    }

    #[test]
    fn test_far_band_is_not_a_neighbor() {
        let (mut controller, layout) = setup();

        controller.start_drag(A, at(20.0), &layout).unwrap();
        // C is two rows away; only B is cached
        assert!(!controller.drag_move(at(100.0), &layout).unwrap());
        controller.end_drag().unwrap();

        assert_eq!(controller.order(), vec![A, B, C]);
    }

    #[test]
    fn test_last_item_has_no_next_neighbor() {
        let (mut controller, layout) = setup();

        controller.start_drag(C, at(100.0), &layout).unwrap();

        let neighbors = controller.neighbors();
        assert_eq!(neighbors.len(), 1);
        assert_eq!(neighbors[0].key, B);
        assert_eq!(neighbors[0].direction, Direction::Previous);
    }

    /// Rows on a 40px stride that are 100px tall, so adjacent bands overlap
    struct OverlappingRows;

    impl Layout<u32> for OverlappingRows {
        fn measure(&self, slots: &[Slot<u32>], index: usize) -> Option<Rect> {
            slots.get(index)?;
            Some(Rect::new(index as f64 * ROW, 0.0, 300.0, 100.0))
        }
    }

    #[test]
    fn test_overlapping_bands_prefer_previous() {
        let mut controller = SortableController::new([A, B, C]);

        controller.start_drag(B, at(60.0), &OverlappingRows).unwrap();
        // A spans (0, 100) and C spans (80, 180)
        assert!(controller.drag_move(at(90.0), &OverlappingRows).unwrap());

        assert_eq!(controller.slots(), &[Slot::Placeholder, Slot::Item(A), Slot::Item(C)]);
    }

    #[test]
    fn test_pointer_on_row_edge_does_not_flip() {
        let (mut controller, layout) = setup();

        controller.start_drag(A, at(20.0), &layout).unwrap();
        for x in [10.0, 11.0, 12.0, 13.0] {
            assert!(!controller.drag_move(Point::new(x, 40.0), &layout).unwrap());
        }
        assert_eq!(controller.placeholder_index(), Some(0));

        assert!(controller.drag_move(at(60.0), &layout).unwrap());
        for y in [40.0, 80.0, 40.0, 80.0] {
            assert!(!controller.drag_move(at(y), &layout).unwrap());
        }
        assert_eq!(controller.slots(), &[Slot::Item(B), Slot::Placeholder, Slot::Item(C)]);
    }

    #[test]
    fn test_unmeasured_neighbor_never_matches() {
        let mut controller = SortableController::new([A, B, C]);
        let mut layout = StackLayout::new(Point::default(), 300.0);
        layout.set_height(B, ROW);
        layout.set_placeholder_height(ROW);

        // A has no geometry, so B cannot be measured either
        assert_eq!(controller.start_drag(B, at(60.0), &layout), Err(SortableError::Unmeasured));
        assert!(!controller.is_dragging());

        let layout = StackLayout::uniform(Point::default(), 300.0, &[A, B], ROW);
        controller.start_drag(B, at(60.0), &layout).unwrap();
        assert_eq!(controller.neighbors().len(), 1);
        assert!(!controller.drag_move(at(100.0), &layout).unwrap());
        controller.end_drag().unwrap();
        assert_eq!(controller.order(), vec![A, B, C]);
    }

    #[test]
    fn test_second_session_is_rejected() {
        let (mut controller, layout) = setup();

        controller.start_drag(B, at(60.0), &layout).unwrap();
        let before = controller.clone();

        assert_eq!(controller.start_drag(A, at(20.0), &layout), Err(SortableError::Busy));
        assert_eq!(controller, before);

        controller.end_drag().unwrap();
        assert_eq!(controller.order(), vec![A, B, C]);
        // Free again once the first session ended
        controller.start_drag(A, at(20.0), &layout).unwrap();
        assert_eq!(controller.dragged(), Some(A));
    }

    #[test]
    fn test_calls_without_session_are_ignored() {
        let (mut controller, layout) = setup();
        let before = controller.clone();

        assert_eq!(controller.drag_move(at(20.0), &layout), Err(SortableError::NoSession));
        assert_eq!(controller.end_drag(), Err(SortableError::NoSession));
        assert_eq!(controller.cancel_drag(), Err(SortableError::NoSession));
        assert_eq!(controller, before);
    }

    #[test]
    fn test_start_drag_unknown_item() {
        let (mut controller, layout) = setup();
        assert_eq!(controller.start_drag(42, at(0.0), &layout), Err(SortableError::UnknownItem));
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_cancel_restores_origin() {
        let (mut controller, layout) = setup();

        controller.start_drag(A, at(20.0), &layout).unwrap();
        controller.drag_move(at(60.0), &layout).unwrap();
        controller.drag_move(at(100.0), &layout).unwrap();
        controller.cancel_drag().unwrap();

        assert_eq!(controller.order(), vec![A, B, C]);
        assert!(!controller.is_dragging());
        assert!(controller.placeholder_index().is_none());
    }

    #[test]
    fn test_delete_item() {
        let (mut controller, _) = setup();

        let event = controller.delete_item(B).unwrap();
        assert_eq!((event.key, event.index), (B, 1));
        assert_eq!(controller.order(), vec![A, C]);

        assert_eq!(controller.delete_item(B), Err(SortableError::UnknownItem));
        assert_eq!(controller.order(), vec![A, C]);
    }

    #[test]
    fn test_delete_dragged_item_ends_session() {
        let (mut controller, layout) = setup();

        controller.start_drag(B, at(60.0), &layout).unwrap();
        let event = controller.delete_item(B).unwrap();

        assert_eq!(event.index, 1);
        assert!(!controller.is_dragging());
        assert_eq!(controller.slots(), &[Slot::Item(A), Slot::Item(C)]);
    }

    #[test]
    fn test_delete_neighbor_during_drag() {
        let (mut controller, layout) = setup();

        controller.start_drag(B, at(60.0), &layout).unwrap();
        controller.delete_item(A).unwrap();

        assert!(controller.neighbors().iter().all(|n| n.key != A));
        let event = controller.end_drag().unwrap();
        assert_eq!(event.to, 0);
        assert_eq!(controller.order(), vec![B, C]);
    }

    #[test]
    fn test_delete_during_drag_remeasures_neighbors() {
        const D: u32 = 4;
        let mut controller = SortableController::new([A, B, C, D]);
        let layout = StackLayout::uniform(Point::default(), 300.0, &[A, B, C, D], ROW);

        controller.start_drag(C, at(100.0), &layout).unwrap();
        controller.delete_item(A).unwrap();
        assert_eq!(controller.slots(), &[Slot::Item(B), Slot::Placeholder, Slot::Item(D)]);

        // Rows shifted up by one; the next move samples them again
        assert!(!controller.drag_move(at(60.0), &layout).unwrap());
        let bands: Vec<_> = controller
            .neighbors()
            .iter()
            .map(|n| (n.key, n.top, n.bottom, n.direction))
            .collect();
        assert_eq!(
            bands,
            vec![(B, 0.0, 40.0, Direction::Previous), (D, 80.0, 120.0, Direction::Next)]
        );

        assert!(controller.drag_move(at(20.0), &layout).unwrap());
        controller.end_drag().unwrap();
        assert_eq!(controller.order(), vec![C, B, D]);
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let (mut controller, layout) = setup();

        controller.start_drag(A, at(20.0), &layout).unwrap();
        controller.destroy();
        assert!(controller.is_empty());
        assert!(!controller.is_dragging());

        controller.destroy();
        assert!(controller.is_empty());
        assert_eq!(controller.end_drag(), Err(SortableError::NoSession));
    }
}
