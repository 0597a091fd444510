use std::sync::Arc;

use finderscan_filter_engine::{GeometryFilter, PointCloudFilter, PreciseRectFilter, Verdict};
use finderscan_platform_core::FixedPixelDensity;
use finderscan_scan_model::{DetectionEvent, FinderRegion, GateState};
use proptest::prelude::*;

fn fires(
    filter: &dyn GeometryFilter,
    event: &DetectionEvent,
    finder: &FinderRegion,
    gate: GateState,
) -> bool {
    let mut calls = 0;
    filter.evaluate(event, finder, gate, &mut |_| calls += 1);
    assert!(calls <= 1);
    calls == 1
}

fn point_cloud(ratio: f64) -> PointCloudFilter {
    PointCloudFilter::new(Arc::new(FixedPixelDensity(ratio)))
}

fn finder_strategy() -> impl Strategy<Value = (i64, i64, i64, i64)> {
    (-200i64..200, -200i64..200, 1i64..400, 1i64..400)
}

/// A rect inside the finder, as offsets derived from raw seeds.
fn inner_rect(
    fx: i64,
    fy: i64,
    fw: i64,
    fh: i64,
    seeds: (i64, i64, i64, i64),
) -> (i64, i64, i64, i64) {
    let (a, b, c, d) = seeds;
    let x_off = a % (fw + 1);
    let y_off = c % (fh + 1);
    let w = b % (fw - x_off + 1);
    let h = d % (fh - y_off + 1);
    (fx + x_off, fy + y_off, w, h)
}

fn rect_seeds() -> impl Strategy<Value = (i64, i64, i64, i64)> {
    (0i64..10_000, 0i64..10_000, 0i64..10_000, 0i64..10_000)
}

fn densities() -> impl Strategy<Value = f64> {
    prop::sample::select(vec![0.75, 1.0, 1.5, 2.0, 2.625, 3.0, 4.0])
}

fn closed_gates() -> impl Strategy<Value = GateState> {
    prop::sample::select(vec![
        GateState::new(true, true),
        GateState::new(false, false),
        GateState::new(true, false),
    ])
}

proptest! {
    #[test]
    fn closed_gate_never_fires(
        gate in closed_gates(),
        (fx, fy, fw, fh) in finder_strategy(),
        seeds in rect_seeds(),
        ratio in densities(),
    ) {
        let finder = FinderRegion::new(fx as f64, fy as f64, fw as f64, fh as f64);
        let (x, y, w, h) = inner_rect(fx, fy, fw, fh, seeds);

        let rect = DetectionEvent::rect("r", x as f64, y as f64, w as f64, h as f64);
        prop_assert!(!fires(&PreciseRectFilter::new(), &rect, &finder, gate));

        let cloud = DetectionEvent::point_cloud("c", &[(x as f64 * ratio, y as f64 * ratio)]);
        prop_assert!(!fires(&point_cloud(ratio), &cloud, &finder, gate));
    }

    #[test]
    fn contained_rect_fires(
        (fx, fy, fw, fh) in finder_strategy(),
        seeds in rect_seeds(),
    ) {
        let finder = FinderRegion::new(fx as f64, fy as f64, fw as f64, fh as f64);
        let (x, y, w, h) = inner_rect(fx, fy, fw, fh, seeds);
        let event = DetectionEvent::rect("r", x as f64, y as f64, w as f64, h as f64);
        prop_assert!(fires(&PreciseRectFilter::new(), &event, &finder, GateState::open()));
    }

    #[test]
    fn rect_one_unit_past_an_edge_is_rejected(
        (fx, fy, fw, fh) in finder_strategy(),
        seeds in rect_seeds(),
        edge in 0u8..4,
    ) {
        let finder = FinderRegion::new(fx as f64, fy as f64, fw as f64, fh as f64);
        let (mut x, mut y, mut w, mut h) = inner_rect(fx, fy, fw, fh, seeds);
        match edge {
            0 => x = fx - 1,
            1 => w = fx + fw + 1 - x,
            2 => y = fy - 1,
            _ => h = fy + fh + 1 - y,
        }
        let event = DetectionEvent::rect("r", x as f64, y as f64, w as f64, h as f64);
        prop_assert!(!fires(&PreciseRectFilter::new(), &event, &finder, GateState::open()));
    }

    #[test]
    fn rect_with_invalid_field_never_fires(
        field in 0usize..4,
        (fx, fy, fw, fh) in finder_strategy(),
        seeds in rect_seeds(),
    ) {
        let finder = FinderRegion::new(fx as f64, fy as f64, fw as f64, fh as f64);
        let (x, y, w, h) = inner_rect(fx, fy, fw, fh, seeds);
        let mut values = [x as f64, y as f64, w as f64, h as f64];
        values[field] = f64::NAN;
        let event = DetectionEvent::rect("r", values[0], values[1], values[2], values[3]);

        let mut calls = 0;
        let verdict = PreciseRectFilter::new()
            .evaluate(&event, &finder, GateState::open(), &mut |_| calls += 1);
        prop_assert_eq!(verdict, Verdict::OutsideFinder);
        prop_assert_eq!(calls, 0);
    }

    #[test]
    fn corners_inside_after_normalization_fire(
        (fx, fy, fw, fh) in finder_strategy(),
        offsets in prop::collection::vec((0i64..10_000, 0i64..10_000), 1..8),
        ratio in densities(),
    ) {
        let finder = FinderRegion::new(fx as f64, fy as f64, fw as f64, fh as f64);
        let points: Vec<(f64, f64)> = offsets
            .iter()
            .map(|(a, b)| {
                let x = (fx + a % (fw + 1)) as f64;
                let y = (fy + b % (fh + 1)) as f64;
                (x * ratio, y * ratio)
            })
            .collect();
        let event = DetectionEvent::point_cloud("c", &points);
        prop_assert!(fires(&point_cloud(ratio), &event, &finder, GateState::open()));
    }

    #[test]
    fn any_corner_outside_rejects(
        (fx, fy, fw, fh) in finder_strategy(),
        offsets in prop::collection::vec((0i64..10_000, 0i64..10_000), 1..8),
        outlier in (0usize..8, 0u8..4),
        ratio in densities(),
    ) {
        let finder = FinderRegion::new(fx as f64, fy as f64, fw as f64, fh as f64);
        let mut logical: Vec<(i64, i64)> = offsets
            .iter()
            .map(|(a, b)| (fx + a % (fw + 1), fy + b % (fh + 1)))
            .collect();
        let (index, edge) = outlier;
        let index = index % logical.len();
        match edge {
            0 => logical[index].0 = fx - 1,
            1 => logical[index].0 = fx + fw + 1,
            2 => logical[index].1 = fy - 1,
            _ => logical[index].1 = fy + fh + 1,
        }
        let points: Vec<(f64, f64)> = logical
            .iter()
            .map(|&(x, y)| (x as f64 * ratio, y as f64 * ratio))
            .collect();
        let event = DetectionEvent::point_cloud("c", &points);
        prop_assert!(!fires(&point_cloud(ratio), &event, &finder, GateState::open()));
    }

    #[test]
    fn unit_ratio_compares_raw_points(
        (fx, fy, fw, fh) in finder_strategy(),
        points in prop::collection::vec((-500.0f64..500.0, -500.0f64..500.0), 0..8),
    ) {
        let finder = FinderRegion::new(fx as f64, fy as f64, fw as f64, fh as f64);
        let expected = points.iter().all(|&(x, y)| finder.contains_point(x, y));
        let event = DetectionEvent::point_cloud("c", &points);
        prop_assert_eq!(fires(&point_cloud(1.0), &event, &finder, GateState::open()), expected);
    }

    #[test]
    fn doubling_points_and_ratio_keeps_the_outcome(
        (fx, fy, fw, fh) in finder_strategy(),
        points in prop::collection::vec((-1000.0f64..1000.0, -1000.0f64..1000.0), 0..8),
        ratio in densities(),
    ) {
        let finder = FinderRegion::new(fx as f64, fy as f64, fw as f64, fh as f64);
        let doubled: Vec<(f64, f64)> = points.iter().map(|&(x, y)| (x * 2.0, y * 2.0)).collect();

        let base = fires(
            &point_cloud(ratio),
            &DetectionEvent::point_cloud("c", &points),
            &finder,
            GateState::open(),
        );
        let scaled = fires(
            &point_cloud(ratio * 2.0),
            &DetectionEvent::point_cloud("c", &doubled),
            &finder,
            GateState::open(),
        );
        prop_assert_eq!(base, scaled);
    }
}
