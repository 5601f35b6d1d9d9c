//! Property tests for the focal-point zoom controller.

use proptest::prelude::*;
use zoom_pane::zoom::{content_origin, min_effective_scale};
use zoom_pane::{
    Point, ScrollHost, ScrollPosition, Size, ViewportZoomController, ZoomConfig, ZoomOutcome,
};

struct Host {
    content: Size,
    viewport: Size,
    position: ScrollPosition,
}

impl ScrollHost for Host {
    fn content_size(&self) -> Size {
        self.content
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn scroll_position(&self) -> ScrollPosition {
        self.position
    }

    fn set_scroll_position(&mut self, position: ScrollPosition) {
        self.position = position;
    }

    fn apply_scale(&mut self, _scale: f64) {}

    fn request_layout(&mut self) {}
}

impl Host {
    fn local_under(&self, scale: f64, cursor: Point) -> Point {
        let origin = content_origin(self.content.scaled(scale), self.viewport, self.position);
        Point::new((cursor.x - origin.x) / scale, (cursor.y - origin.y) / scale)
    }
}

// ===== Strategies =====

/// Content large enough that the minimum-size floor stays below `max_scale`.
fn arb_content() -> impl Strategy<Value = Size> {
    (400.0..4000.0f64, 400.0..4000.0f64).prop_map(|(w, h)| Size::new(w, h))
}

fn arb_viewport() -> impl Strategy<Value = Size> {
    (100.0..1200.0f64, 100.0..1200.0f64).prop_map(|(w, h)| Size::new(w, h))
}

fn arb_position() -> impl Strategy<Value = ScrollPosition> {
    (0.0..=1.0f64, 0.0..=1.0f64).prop_map(|(h, v)| ScrollPosition::new(h, v))
}

fn arb_event() -> impl Strategy<Value = (f64, f64, f64)> {
    (-3000.0..3000.0f64, 0.0..1.0f64, 0.0..1.0f64)
}

proptest! {
    #[test]
    fn scale_stays_within_bounds(
        content in arb_content(),
        viewport in arb_viewport(),
        position in arb_position(),
        events in prop::collection::vec(arb_event(), 1..40),
    ) {
        let config = ZoomConfig::default();
        let mut host = Host { content, viewport, position };
        let mut zoom = ViewportZoomController::new(config);
        let min_scale = min_effective_scale(content, &config).unwrap();

        for (delta, fx, fy) in events {
            let cursor = Point::new(fx * viewport.width, fy * viewport.height);
            let outcome = zoom.on_scroll(&mut host, delta, cursor);

            if outcome != ZoomOutcome::Unchanged {
                // The floor check multiplies rather than divides; allow an ulp of slack.
                prop_assert!(
                    zoom.scale() >= min_scale * (1.0 - 1e-12),
                    "{} < {}",
                    zoom.scale(),
                    min_scale
                );
                prop_assert!(zoom.scale() <= config.max_scale);
            }
            prop_assert!(zoom.scale().is_finite() && zoom.scale() > 0.0);
            prop_assert!((0.0..=1.0).contains(&host.position.h()));
            prop_assert!((0.0..=1.0).contains(&host.position.v()));
        }
    }

    #[test]
    fn inverse_zooms_restore_scale(
        side in 1000.0..2000.0f64,
        factor in 1.01..1.5f64,
        position in arb_position(),
        fx in 0.0..1.0f64,
        fy in 0.0..1.0f64,
    ) {
        let viewport = Size::new(900.0, 900.0);
        let mut host = Host { content: Size::new(side, side), viewport, position };
        let mut zoom = ViewportZoomController::default();
        let cursor = Point::new(fx * viewport.width, fy * viewport.height);

        let zoomed_in = zoom.zoom_by(&mut host, factor, cursor);
        prop_assert!(matches!(zoomed_in, ZoomOutcome::Zoomed { .. }), "expected ZoomOutcome::Zoomed");
        let zoomed_out = zoom.zoom_by(&mut host, 1.0 / factor, cursor);
        prop_assert!(matches!(zoomed_out, ZoomOutcome::Zoomed { .. }), "expected ZoomOutcome::Zoomed");

        prop_assert!((zoom.scale() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn floor_is_exact(
        content in arb_content(),
        delta in -100_000.0..-2500.0f64,
    ) {
        let mut host = Host {
            content,
            viewport: Size::new(800.0, 600.0),
            position: ScrollPosition::CENTER,
        };
        let mut zoom = ViewportZoomController::default();

        let outcome = zoom.on_scroll(&mut host, delta, Point::new(10.0, 10.0));

        let expected = 900.0 / content.max_side();
        prop_assert_eq!(outcome, ZoomOutcome::ClampedToMin { scale: expected });
        prop_assert_eq!(zoom.scale(), expected);
        prop_assert_eq!(host.position, ScrollPosition::CENTER);
    }

    #[test]
    fn ceiling_is_exact(
        content in arb_content(),
        delta in 1000.0..100_000.0f64,
    ) {
        let mut host = Host {
            content,
            viewport: Size::new(800.0, 600.0),
            position: ScrollPosition::new(0.1, 0.2),
        };
        let mut zoom = ViewportZoomController::default();

        let outcome = zoom.on_scroll(&mut host, delta, Point::new(10.0, 10.0));

        prop_assert_eq!(outcome, ZoomOutcome::ClampedToMax { scale: 2.5 });
        prop_assert_eq!(zoom.scale(), 2.5);
        prop_assert_eq!(host.position, ScrollPosition::new(0.1, 0.2));
    }

    #[test]
    fn zoom_in_keeps_point_under_cursor(
        side_w in 1000.0..3000.0f64,
        side_h in 1000.0..3000.0f64,
        factor in 1.0001..1.5f64,
        position in arb_position(),
        fx in 0.0..=1.0f64,
        fy in 0.0..=1.0f64,
    ) {
        let viewport = Size::new(900.0, 900.0);
        let mut host = Host { content: Size::new(side_w, side_h), viewport, position };
        let mut zoom = ViewportZoomController::default();
        let cursor = Point::new(fx * viewport.width, fy * viewport.height);
        let before = host.local_under(1.0, cursor);

        let outcome = zoom.zoom_by(&mut host, factor, cursor);

        prop_assert!(matches!(outcome, ZoomOutcome::Zoomed { .. }), "expected ZoomOutcome::Zoomed");
        let after = host.local_under(zoom.scale(), cursor);
        prop_assert!((after.x - before.x).abs() < 1e-6, "{:?} vs {:?}", after, before);
        prop_assert!((after.y - before.y).abs() < 1e-6, "{:?} vs {:?}", after, before);
    }

    #[test]
    fn zero_delta_is_a_no_op(
        content in arb_content(),
        position in arb_position(),
        x in -500.0..2000.0f64,
        y in -500.0..2000.0f64,
    ) {
        let mut host = Host { content, viewport: Size::new(900.0, 900.0), position };
        let mut zoom = ViewportZoomController::default();

        prop_assert_eq!(zoom.on_scroll(&mut host, 0.0, Point::new(x, y)), ZoomOutcome::Unchanged);
        prop_assert_eq!(zoom.scale(), 1.0);
        prop_assert_eq!(host.position, position);
    }
}

#[test]
fn worked_example_from_center() {
    let mut host = Host {
        content: Size::new(1000.0, 1000.0),
        viewport: Size::new(900.0, 900.0),
        position: ScrollPosition::CENTER,
    };
    let mut zoom = ViewportZoomController::default();
    let cursor = Point::new(450.0, 450.0);
    let before = host.local_under(1.0, cursor);

    let delta = 1.1f64.ln() / ZoomConfig::default().zoom_intensity;
    let outcome = zoom.on_scroll(&mut host, delta, cursor);

    assert!(matches!(outcome, ZoomOutcome::Zoomed { .. }), "{outcome:?}");
    assert!((zoom.scale() - 1.1).abs() < 1e-9);
    let after = host.local_under(zoom.scale(), cursor);
    assert!((after.x - before.x).abs() < 1e-6);
    assert!((after.y - before.y).abs() < 1e-6);
}
