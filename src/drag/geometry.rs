use egui::{Pos2, Rect, Vec2};

use super::options::AutoscrollMode;

/// Client (viewport) position to document position.
pub fn document_pos(client_pos: Pos2, scroll: Vec2) -> Pos2 {
    client_pos + scroll
}

/// Clamp one axis into `[margin, extent - margin - size]`.
///
/// If the range is empty (document too small for the proxy) the lower bound wins.
fn clamp_axis(value: f32, size: f32, extent: f32, margin: f32) -> f32 {
    // Not `f32::clamp`: it panics when the range is empty.
    let upper = extent - margin - size;
    value.min(upper).max(margin)
}

/// Document-space position of the proxy's top-left corner for a pointer at `document_pos`,
/// kept inside the document with `margin` on every side.
pub fn clamp_proxy_pos(
    document_pos: Pos2,
    proxy_size: Vec2,
    document_size: Vec2,
    margin: f32,
) -> Pos2 {
    Pos2::new(
        clamp_axis(document_pos.x, proxy_size.x, document_size.x, margin),
        clamp_axis(document_pos.y, proxy_size.y, document_size.y, margin),
    )
}

/// Square of `2 * half_size` centered on the pointer.
pub fn indicator_rect(document_pos: Pos2, half_size: f32) -> Rect {
    Rect::from_center_size(document_pos, Vec2::splat(2.0 * half_size))
}

/// Signed scroll delta along one axis for a pointer at `pos` inside a viewport of `extent`.
///
/// The far edge (right/bottom) takes precedence when the viewport is narrower than two
/// trigger bands.
fn axis_nudge(pos: f32, extent: f32, trigger: f32, mode: AutoscrollMode) -> f32 {
    let to_far_edge = extent - pos;
    match mode {
        AutoscrollMode::Disabled => 0.0,
        AutoscrollMode::FixedStep(step) => {
            if to_far_edge < trigger {
                step
            } else if pos < trigger {
                -step
            } else {
                0.0
            }
        }
        AutoscrollMode::Proportional => {
            if to_far_edge < trigger {
                trigger - to_far_edge
            } else if pos < trigger {
                -(trigger - pos)
            } else {
                0.0
            }
        }
    }
}

/// Viewport metrics needed to evaluate autoscroll.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollMetrics {
    pub scroll: Vec2,
    pub viewport_size: Vec2,
    pub document_size: Vec2,
}

impl ScrollMetrics {
    /// Largest valid scroll offset.
    pub fn max_scroll(&self) -> Vec2 {
        (self.document_size - self.viewport_size).max(Vec2::ZERO)
    }
}

/// New scroll offset requested by a pointer at `client_pos`, or `None` if nothing should move.
///
/// The result is clamped to the scrollable range, so a pointer resting at the edge of a fully
/// scrolled document does not keep requesting scrolls.
pub fn autoscroll_offset(
    client_pos: Pos2,
    metrics: ScrollMetrics,
    trigger_distance: f32,
    mode: AutoscrollMode,
) -> Option<Vec2> {
    let delta = Vec2::new(
        axis_nudge(client_pos.x, metrics.viewport_size.x, trigger_distance, mode),
        axis_nudge(client_pos.y, metrics.viewport_size.y, trigger_distance, mode),
    );
    if delta == Vec2::ZERO {
        return None;
    }

    let max = metrics.max_scroll();
    let wanted = metrics.scroll + delta;
    let next = Vec2::new(wanted.x.min(max.x).max(0.0), wanted.y.min(max.y).max(0.0));
    (next != metrics.scroll).then_some(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: Vec2 = Vec2::new(1000.0, 800.0);
    const PROXY: Vec2 = Vec2::new(100.0, 50.0);

    fn metrics(scroll: Vec2) -> ScrollMetrics {
        ScrollMetrics {
            scroll,
            viewport_size: Vec2::new(800.0, 600.0),
            document_size: Vec2::new(2000.0, 1500.0),
        }
    }

    #[test]
    fn proxy_is_clamped_for_any_pointer() {
        let margin = 30.0;
        let probes = [
            Pos2::new(-500.0, -500.0),
            Pos2::new(0.0, 0.0),
            Pos2::new(29.0, 31.0),
            Pos2::new(500.0, 400.0),
            Pos2::new(880.0, 730.0),
            Pos2::new(5000.0, 5000.0),
            Pos2::new(f32::MAX, -f32::MAX),
        ];
        for p in probes {
            let pos = clamp_proxy_pos(p, PROXY, DOC, margin);
            assert!(pos.x >= margin && pos.x <= DOC.x - margin - PROXY.x, "x out of range: {pos:?}");
            assert!(pos.y >= margin && pos.y <= DOC.y - margin - PROXY.y, "y out of range: {pos:?}");
        }
    }

    #[test]
    fn clamp_keeps_interior_positions() {
        let p = Pos2::new(400.0, 300.0);
        assert_eq!(clamp_proxy_pos(p, PROXY, DOC, 30.0), p);
    }

    #[test]
    fn empty_clamp_range_pins_to_margin() {
        let tiny_doc = Vec2::new(80.0, 80.0);
        let pos = clamp_proxy_pos(Pos2::new(500.0, 10.0), PROXY, tiny_doc, 30.0);
        assert_eq!(pos, Pos2::new(30.0, 30.0));
    }

    #[test]
    fn fixed_step_scrolls_toward_each_edge() {
        let mode = AutoscrollMode::FixedStep(30.0);
        let m = metrics(Vec2::new(300.0, 300.0));

        let right = autoscroll_offset(Pos2::new(750.0, 300.0), m, 100.0, mode);
        assert_eq!(right, Some(Vec2::new(330.0, 300.0)));

        let left = autoscroll_offset(Pos2::new(50.0, 300.0), m, 100.0, mode);
        assert_eq!(left, Some(Vec2::new(270.0, 300.0)));

        let down = autoscroll_offset(Pos2::new(400.0, 590.0), m, 100.0, mode);
        assert_eq!(down, Some(Vec2::new(300.0, 330.0)));

        let up = autoscroll_offset(Pos2::new(400.0, 10.0), m, 100.0, mode);
        assert_eq!(up, Some(Vec2::new(300.0, 270.0)));

        let corner = autoscroll_offset(Pos2::new(790.0, 590.0), m, 100.0, mode);
        assert_eq!(corner, Some(Vec2::new(330.0, 330.0)));
    }

    #[test]
    fn center_of_viewport_does_not_scroll() {
        let m = metrics(Vec2::new(300.0, 300.0));
        let none = autoscroll_offset(Pos2::new(400.0, 300.0), m, 100.0, AutoscrollMode::default());
        assert_eq!(none, None);
    }

    #[test]
    fn scroll_stays_inside_document() {
        let mode = AutoscrollMode::FixedStep(30.0);

        // Already at the top-left: scrolling further up/left is a no-op.
        let at_origin = metrics(Vec2::ZERO);
        assert_eq!(autoscroll_offset(Pos2::new(5.0, 5.0), at_origin, 100.0, mode), None);

        // Ten units left before the right end.
        let near_end = metrics(Vec2::new(1190.0, 0.0));
        assert_eq!(
            autoscroll_offset(Pos2::new(790.0, 300.0), near_end, 100.0, mode),
            Some(Vec2::new(1200.0, 0.0))
        );
        let at_end = metrics(Vec2::new(1200.0, 0.0));
        assert_eq!(autoscroll_offset(Pos2::new(790.0, 300.0), at_end, 100.0, mode), None);
    }

    #[test]
    fn proportional_scroll_grows_toward_the_edge() {
        let m = metrics(Vec2::new(300.0, 300.0));
        let mode = AutoscrollMode::Proportional;
        let shallow = autoscroll_offset(Pos2::new(710.0, 300.0), m, 100.0, mode).unwrap();
        let deep = autoscroll_offset(Pos2::new(790.0, 300.0), m, 100.0, mode).unwrap();
        assert_eq!(shallow.x, 310.0);
        assert_eq!(deep.x, 390.0);

        let left = autoscroll_offset(Pos2::new(20.0, 300.0), m, 100.0, mode).unwrap();
        assert_eq!(left.x, 220.0);
    }

    #[test]
    fn disabled_mode_never_scrolls() {
        let m = metrics(Vec2::new(300.0, 300.0));
        assert_eq!(
            autoscroll_offset(Pos2::new(799.0, 599.0), m, 100.0, AutoscrollMode::Disabled),
            None
        );
    }

    #[test]
    fn indicator_is_centered_on_pointer() {
        let rect = indicator_rect(Pos2::new(100.0, 50.0), 5.0);
        assert_eq!(rect.min, Pos2::new(95.0, 45.0));
        assert_eq!(rect.max, Pos2::new(105.0, 55.0));
    }
}
