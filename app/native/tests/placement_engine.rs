//! End-to-end behavior of the placement engine on a 5x5 grid.

use widgetbox_lib::grid::{
    GridBounds, GridError, GridRect, MoveRequest, Placement, PlacementId, PlacementSet, Proposal,
    SizeCatalog, Span, find_free_slot, validate,
};

fn grid() -> GridBounds { GridBounds::new(5, 5) }

fn catalog() -> SizeCatalog {
    SizeCatalog::new([
        ("small", Span::new(1, 1)),
        ("medium", Span::new(2, 2)),
        ("huge", Span::new(4, 4)),
    ])
}

/// `a` at (0,0) 2x2 and `b` at (2,0) 1x1.
fn two_widgets() -> (PlacementSet, PlacementId, PlacementId) {
    let a = Placement::new("system.weather.simple", GridRect::new(0, 0, 2, 2));
    let b = Placement::new("system.time.simple", GridRect::new(2, 0, 1, 1));
    let (a_id, b_id) = (a.id, b.id);
    (PlacementSet::from_placements(vec![a, b]), a_id, b_id)
}

fn assert_invariants(set: &PlacementSet) {
    let bounds = grid();
    for (i, first) in set.iter().enumerate() {
        assert!(bounds.contains(&first.rect), "{} is off the grid", first.rect);
        for second in set.iter().skip(i + 1) {
            assert!(!first.rect.overlaps(&second.rect), "{} overlaps {}", first.rect, second.rect);
        }
    }
}

#[test]
fn test_move_onto_occupied_cell_names_the_occupant() {
    let a = Placement::new("system.weather.simple", GridRect::new(0, 0, 2, 2));
    let a_id = a.id;
    let mut set = PlacementSet::from_placements(vec![a]);
    let b = set
        .insert(Placement::new("system.time.simple", GridRect::new(4, 4, 1, 1)), &grid())
        .unwrap()
        .id;
    let before = set.clone();

    let err = set.move_or_resize(b, &MoveRequest::move_to(0, 0), &grid(), &catalog()).unwrap_err();

    assert!(matches!(err, GridError::Overlap { .. }));
    assert_eq!(err.conflicting_ids(), &[a_id]);
    assert_eq!(set, before);
}

#[test]
fn test_move_into_free_cell_is_committed() {
    let (mut set, _, b) = two_widgets();
    let moved = set.move_or_resize(b, &MoveRequest::move_to(2, 1), &grid(), &catalog()).unwrap();

    assert_eq!(moved.rect, GridRect::new(2, 1, 1, 1));
    assert_eq!(set.get(b).unwrap().rect, GridRect::new(2, 1, 1, 1));
    assert_invariants(&set);
}

#[test]
fn test_resize_into_neighbor_is_rejected_and_keeps_span() {
    let (mut set, a, b) = two_widgets();

    let err =
        set.move_or_resize(a, &MoveRequest::resize_to("huge"), &grid(), &catalog()).unwrap_err();

    assert_eq!(err.conflicting_ids(), &[b]);
    assert_eq!(set.get(a).unwrap().rect, GridRect::new(0, 0, 2, 2));
}

#[test]
fn test_resize_to_unknown_size_is_rejected() {
    let (mut set, a, _) = two_widgets();
    let err = set
        .move_or_resize(a, &MoveRequest::resize_to("colossal"), &grid(), &catalog())
        .unwrap_err();
    assert_eq!(err, GridError::UnknownSize { name: "colossal".into() });
}

#[test]
fn test_batch_swap_is_accepted() {
    let a = Placement::new("system.time.simple", GridRect::new(0, 0, 1, 1));
    let b = Placement::new("system.time.simple", GridRect::new(1, 0, 1, 1));
    let (a_id, b_id) = (a.id, b.id);
    let mut set = PlacementSet::from_placements(vec![a, b]);

    let outcome = set
        .apply_batch(&[Proposal::new(a_id, 1, 0), Proposal::new(b_id, 0, 0)], &grid())
        .unwrap();

    assert_eq!(outcome.accepted, 2);
    assert_eq!(outcome.changed.as_slice(), &[a_id, b_id]);
    assert_eq!(set.get(a_id).unwrap().rect, GridRect::new(1, 0, 1, 1));
    assert_eq!(set.get(b_id).unwrap().rect, GridRect::new(0, 0, 1, 1));
    assert_invariants(&set);
}

#[test]
fn test_batch_with_one_entry_off_grid_changes_nothing() {
    let (mut set, a, b) = two_widgets();
    let before = set.clone();

    let err = set
        .apply_batch(&[Proposal::new(b, 3, 3), Proposal::new(a, 4, 0)], &grid())
        .unwrap_err();

    assert!(matches!(err, GridError::OutOfBounds { id: Some(id), .. } if id == a));
    assert_eq!(set, before);
}

#[test]
fn test_batch_rejections_are_atomic() {
    let (set, a, b) = two_widgets();
    let stranger = PlacementId::new();

    let batches = [
        vec![Proposal::new(a, 3, 3), Proposal::new(stranger, 0, 0)],
        vec![Proposal::new(a, 2, 2), Proposal::new(b, 3, 3)],
        vec![
            Proposal::new(b, 4, 4),
            Proposal {
                x: None,
                ..Proposal::new(a, 1, 0)
            },
        ],
        vec![Proposal::new(a, 3, 3), Proposal::new(a, 0, 0)],
    ];

    for proposals in &batches {
        let mut attempt = set.clone();
        assert!(attempt.apply_batch(proposals, &grid()).is_err());
        assert_eq!(attempt, set);
    }
}

#[test]
fn test_batch_overlap_with_untouched_widget_is_rejected() {
    let (mut set, _, b) = two_widgets();
    let c = set
        .insert(Placement::new("system.time.simple", GridRect::new(4, 4, 1, 1)), &grid())
        .unwrap()
        .id;

    let err = set.apply_batch(&[Proposal::new(c, 1, 1)], &grid()).unwrap_err();
    assert!(matches!(err, GridError::Overlap { .. }));
    assert!(!err.conflicting_ids().contains(&b));
}

#[test]
fn test_resubmitting_committed_move_is_a_no_op() {
    let (mut set, _, b) = two_widgets();
    set.move_or_resize(b, &MoveRequest::move_to(3, 3), &grid(), &catalog()).unwrap();
    let after_first = set.clone();

    set.move_or_resize(b, &MoveRequest::move_to(3, 3), &grid(), &catalog()).unwrap();
    assert_eq!(set, after_first);

    let outcome = set.apply_batch(&[Proposal::new(b, 3, 3)], &grid()).unwrap();
    assert!(outcome.changed.is_empty());
    assert_eq!(set, after_first);
}

#[test]
fn test_full_grid_rectangle_is_valid_only_alone() {
    let full = GridRect::new(0, 0, 5, 5);

    assert!(validate(&full, &PlacementSet::new(), None, &grid()).is_ok());

    let (set, ..) = two_widgets();
    assert!(matches!(validate(&full, &set, None, &grid()), Err(GridError::Overlap { .. })));

    let mut alone = PlacementSet::new();
    let id = alone.insert(Placement::new("system.stats.simple", full), &grid()).unwrap().id;
    assert!(validate(&full, &alone, Some(id), &grid()).is_ok());
    assert_eq!(find_free_slot(Span::new(1, 1), &alone, &grid()), None);
}

#[test]
fn test_invariants_hold_across_a_sequence_of_operations() {
    let bounds = grid();
    let catalog = catalog();
    let mut set = PlacementSet::new();

    let mut ids = Vec::new();
    while let Some(rect) = find_free_slot(Span::new(2, 1), &set, &bounds) {
        ids.push(set.insert(Placement::new("system.time.simple", rect), &bounds).unwrap().id);
    }
    assert_eq!(ids.len(), 10);
    assert_invariants(&set);

    // Free the left column pair so later moves and resizes have room.
    for id in ids.iter().step_by(2) {
        set.remove(*id).unwrap();
    }
    let ids: Vec<_> = ids.into_iter().skip(1).step_by(2).collect();
    assert_eq!(set.get(ids[0]).unwrap().rect, GridRect::new(2, 0, 2, 1));

    set.move_or_resize(ids[0], &MoveRequest::move_to(0, 0), &bounds, &catalog).unwrap();
    set.move_or_resize(ids[0], &MoveRequest::resize_to("small"), &bounds, &catalog).unwrap();
    assert_eq!(set.get(ids[0]).unwrap().rect, GridRect::new(0, 0, 1, 1));

    let sizes = ["small", "medium", "huge"];
    let (mut moved, mut resized, mut rejected) = (0, 0, 0);
    let mut seed: u32 = 7;
    for _ in 0..200 {
        seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        let roll = seed >> 8;
        let id = ids[roll as usize % ids.len()];
        let request = if roll % 3 == 0 {
            MoveRequest::resize_to(sizes[(roll / 3) as usize % sizes.len()])
        } else {
            let (x, y) = ((roll / 7 % 6) as i32 - 1, (roll / 42 % 6) as i32 - 1);
            MoveRequest::move_to(x, y)
        };
        let before = set.clone();

        match set.move_or_resize(id, &request, &bounds, &catalog) {
            Ok(_) if request.span.is_some() => resized += 1,
            Ok(_) => moved += 1,
            Err(_) => {
                assert_eq!(set, before);
                rejected += 1;
            }
        }
        assert_invariants(&set);
    }

    assert!(moved > 0, "no move was committed");
    assert!(resized > 0, "no resize was committed");
    assert!(rejected > 0, "no request was rejected");
    set.check_invariants(&bounds).unwrap();
}
