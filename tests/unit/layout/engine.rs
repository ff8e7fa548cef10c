use super::*;

const EPS: f64 = 1e-9;

fn canvas(w: u32, h: u32) -> Canvas {
    Canvas::new(w, h).unwrap()
}

fn assert_close(a: Point, b: Point) {
    assert!(
        (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6,
        "{a:?} != {b:?}"
    );
}

#[test]
fn grid_dims_cover_n() {
    assert_eq!(grid_dims(0), (0, 0));
    assert_eq!(grid_dims(1), (1, 1));
    assert_eq!(grid_dims(3), (2, 2));
    assert_eq!(grid_dims(4), (2, 2));
    assert_eq!(grid_dims(5), (3, 2));
    assert_eq!(grid_dims(9), (3, 3));
    assert_eq!(grid_dims(10), (4, 3));
    for n in 1..200 {
        let (cols, rows) = grid_dims(n);
        assert!(cols * rows >= n, "n={n}");
        assert!(cols * (rows - 1) < n, "n={n} has an empty row");
    }
}

#[test]
fn grid_stays_inside_canvas_for_many_counts() {
    let kind = LayoutKind::Grid(GridParams::default());
    for c in [canvas(800, 600), canvas(300, 900), canvas(64, 64)] {
        for n in 1..=30 {
            let placements = compute_placements(n, &kind, c).unwrap();
            assert_eq!(placements.len(), n);
            assert!(placements.iter().all(|p| p.within(c, EPS)), "n={n} c={c:?}");
        }
    }
}

#[test]
fn grid_three_images_on_800x600() {
    let placements =
        compute_placements(3, &LayoutKind::Grid(GridParams::default()), canvas(800, 600)).unwrap();
    let cell_w = (800.0 - 3.0 * 20.0) / 2.0;
    let cell_h = (600.0 - 3.0 * 20.0) / 2.0;
    assert_eq!(
        placements,
        vec![
            Placement::new(0.0, 0.0, cell_w, cell_h),
            Placement::new(cell_w + 20.0, 0.0, cell_w, cell_h),
            Placement::new(0.0, cell_h + 20.0, cell_w, cell_h),
        ]
    );
}

#[test]
fn circular_four_tiles_sit_on_quarter_angles() {
    let c = canvas(800, 600);
    let placements =
        compute_placements(4, &LayoutKind::Circular(CircularParams::default()), c).unwrap();
    let r = 600.0 * 0.3;
    let expected = [
        Point::new(400.0 + r, 300.0),
        Point::new(400.0, 300.0 + r),
        Point::new(400.0 - r, 300.0),
        Point::new(400.0, 300.0 - r),
    ];
    for (p, e) in placements.iter().zip(expected) {
        assert_eq!((p.width, p.height), (120.0, 120.0));
        assert_close(p.center(), e);
    }
}

#[test]
fn heart_curve_at_zero_and_single_sample() {
    assert_close(heart_curve(0.0), Point::new(0.0, 5.0));

    let placements =
        compute_placements(1, &LayoutKind::Heart(HeartParams::default()), canvas(800, 600))
            .unwrap();
    let scale = 600.0 * 0.025;
    assert_eq!(placements.len(), 1);
    assert_eq!((placements[0].width, placements[0].height), (80.0, 80.0));
    assert_close(placements[0].center(), Point::new(400.0, 300.0 - 5.0 * scale));
}

#[test]
fn heart_tiles_stay_inside_canvas() {
    let c = canvas(400, 400);
    let placements =
        compute_placements(24, &LayoutKind::Heart(HeartParams::default()), c).unwrap();
    assert!(placements.iter().all(|p| p.within(c, EPS)));
}

#[test]
fn mosaic_is_reproducible_per_seed_and_in_bounds() {
    let c = canvas(800, 600);
    let a = LayoutKind::Mosaic(MosaicParams {
        seed: 42,
        ..MosaicParams::default()
    });
    let b = LayoutKind::Mosaic(MosaicParams {
        seed: 43,
        ..MosaicParams::default()
    });
    let first = compute_placements(12, &a, c).unwrap();
    assert_eq!(first, compute_placements(12, &a, c).unwrap());
    assert_ne!(first, compute_placements(12, &b, c).unwrap());

    let sizes = [120.0, 100.0, 140.0, 110.0, 130.0];
    for (i, p) in first.iter().enumerate() {
        assert_eq!(p.width, sizes[i % sizes.len()]);
        assert!(p.x >= 20.0 - EPS && p.x + p.width <= 800.0 - 20.0 + EPS);
        assert!(p.y >= 20.0 - EPS && p.y + p.height <= 600.0 - 20.0 + EPS);
    }
}

#[test]
fn mosaic_tiles_shrink_on_small_canvas() {
    let c = canvas(90, 60);
    let placements =
        compute_placements(5, &LayoutKind::Mosaic(MosaicParams::default()), c).unwrap();
    assert!(placements.iter().all(|p| p.width <= 60.0 && p.within(c, EPS)));
}

#[test]
fn diagonal_steps_evenly_and_handles_single_item() {
    let kind = LayoutKind::Diagonal(DiagonalParams::default());
    let c = canvas(800, 600);

    let one = compute_placements(1, &kind, c).unwrap();
    assert_eq!(one, vec![Placement::new(0.0, 0.0, 120.0, 120.0)]);

    let three = compute_placements(3, &kind, c).unwrap();
    assert_eq!(
        three,
        vec![
            Placement::new(0.0, 0.0, 120.0, 120.0),
            Placement::new(340.0, 240.0, 120.0, 120.0),
            Placement::new(680.0, 480.0, 120.0, 120.0),
        ]
    );
}

#[test]
fn zero_items_is_empty() {
    for name in ["grid", "mosaic", "circular", "diagonal", "heart"] {
        let kind = LayoutKind::from_name(name).unwrap();
        assert_eq!(kind.name(), name);
        assert!(compute_placements(0, &kind, canvas(10, 10)).unwrap().is_empty());
    }
}

#[test]
fn area_offsets_placements() {
    let area = Rect::new(0.0, 60.0, 800.0, 600.0);
    let placements =
        compute_placements_in(4, &LayoutKind::Grid(GridParams::default()), area).unwrap();
    assert_eq!(placements[0].y, 60.0);
    assert!(placements.iter().all(|p| p.y >= 60.0 && p.y + p.height <= 600.0 + EPS));
}

#[test]
fn invalid_inputs_are_rejected() {
    let zero = Canvas {
        width: 0,
        height: 10,
    };
    assert!(matches!(
        compute_placements(1, &LayoutKind::default(), zero),
        Err(KeepsakeError::InvalidParameter(_))
    ));

    let bad = [
        LayoutKind::Mosaic(MosaicParams {
            sizes: vec![],
            ..MosaicParams::default()
        }),
        LayoutKind::Diagonal(DiagonalParams { tile: 0.0 }),
        LayoutKind::Circular(CircularParams {
            radius_factor: f64::NAN,
            tile: 120.0,
        }),
        LayoutKind::Heart(HeartParams {
            scale_factor: f64::INFINITY,
            tile: 80.0,
        }),
        LayoutKind::Grid(GridParams { padding: -1.0 }),
    ];
    for kind in &bad {
        assert!(
            matches!(
                compute_placements(3, kind, canvas(100, 100)),
                Err(KeepsakeError::InvalidParameter(_))
            ),
            "{kind:?}"
        );
    }
    assert!(LayoutKind::from_name("spiral").is_err());
}

#[test]
fn layout_kind_deserializes_with_defaults() {
    let kind: LayoutKind = serde_json::from_str(r#"{"kind": "mosaic", "seed": 7}"#).unwrap();
    assert_eq!(
        kind,
        LayoutKind::Mosaic(MosaicParams {
            seed: 7,
            ..MosaicParams::default()
        })
    );
    let kind: LayoutKind = serde_json::from_str(r#"{"kind": "heart"}"#).unwrap();
    assert_eq!(kind, LayoutKind::Heart(HeartParams::default()));
}
