//! Scaled monitor map layout
//!
//! Maps the virtual-desktop arrangement of all monitors onto a small canvas
//! so the selector window can draw one tile per monitor. The layout keeps
//! every monitor at the same scale so relative sizes and positions survive.

use crate::domain::core::{Monitor, Rect};

/// Parameters controlling how the desktop is scaled onto the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Maximum canvas width including padding
    pub max_width: i32,
    /// Maximum canvas height including padding
    pub max_height: i32,
    /// Blank margin around the tiles, in canvas pixels
    pub padding: i32,
    /// Initial scale factor applied before fitting
    pub base_scale: f32,
}

impl LayoutParams {
    pub const DEFAULT_MAX_WIDTH: i32 = 700;
    pub const DEFAULT_MAX_HEIGHT: i32 = 500;
    pub const DEFAULT_PADDING: i32 = 20;
    pub const DEFAULT_BASE_SCALE: f32 = 0.1;
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            max_width: Self::DEFAULT_MAX_WIDTH,
            max_height: Self::DEFAULT_MAX_HEIGHT,
            padding: Self::DEFAULT_PADDING,
            base_scale: Self::DEFAULT_BASE_SCALE,
        }
    }
}

/// Result of a layout pass
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorLayout {
    /// Display rectangles, one per input monitor, in input order
    pub display_rects: Vec<Rect>,
    /// Scale factor that was finally applied
    pub scale: f32,
}

impl MonitorLayout {
    pub fn empty(scale: f32) -> Self {
        Self {
            display_rects: Vec::new(),
            scale,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.display_rects.is_empty()
    }

    /// Smallest canvas that holds every tile plus the trailing padding
    pub fn canvas_size(&self, padding: i32) -> (i32, i32) {
        let width = self
            .display_rects
            .iter()
            .map(Rect::right)
            .max()
            .unwrap_or(0);
        let height = self
            .display_rects
            .iter()
            .map(Rect::bottom)
            .max()
            .unwrap_or(0);
        (width + padding, height + padding)
    }
}

/// Computes the display rectangle of every monitor
///
/// The desktop bounding box is scaled by `base_scale`; when the scaled box
/// plus padding on both sides exceeds the target canvas, the scale shrinks by
/// the tighter of the two axis ratios. Offsets are measured from the bounding
/// box origin so negative desktop coordinates map onto the canvas.
///
/// Tiles stay within `max_width + padding` by `max_height + padding`; the
/// fit ratio is taken against the padded size, so the trailing margin can
/// be narrower than `padding` after shrinking.
pub fn compute_layout(monitors: &[Monitor], params: &LayoutParams) -> MonitorLayout {
    let bounds = match Rect::union_all(monitors.iter().map(|m| &m.bounds)) {
        Some(bounds) => bounds,
        None => return MonitorLayout::empty(params.base_scale),
    };

    let mut scale = params.base_scale;
    let padded_width = (bounds.w as f32 * scale) as i32 + params.padding * 2;
    let padded_height = (bounds.h as f32 * scale) as i32 + params.padding * 2;

    if (padded_width > params.max_width || padded_height > params.max_height)
        && padded_width > 0
        && padded_height > 0
    {
        let scale_x = params.max_width as f32 / padded_width as f32;
        let scale_y = params.max_height as f32 / padded_height as f32;
        scale *= scale_x.min(scale_y);
    }

    tracing::debug!(
        "Layout of {} monitors: desktop {}x{} at ({}, {}), scale {:.4}",
        monitors.len(),
        bounds.w,
        bounds.h,
        bounds.x,
        bounds.y,
        scale
    );

    let display_rects = monitors
        .iter()
        .map(|monitor| {
            Rect::new(
                params.padding + ((monitor.bounds.x - bounds.x) as f32 * scale) as i32,
                params.padding + ((monitor.bounds.y - bounds.y) as f32 * scale) as i32,
                (monitor.bounds.w as f32 * scale) as i32,
                (monitor.bounds.h as f32 * scale) as i32,
            )
        })
        .collect();

    MonitorLayout {
        display_rects,
        scale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitors(rects: &[Rect]) -> Vec<Monitor> {
        rects
            .iter()
            .enumerate()
            .map(|(index, rect)| Monitor::new(index, *rect))
            .collect()
    }

    fn assert_within_canvas(layout: &MonitorLayout, params: &LayoutParams) {
        for rect in &layout.display_rects {
            assert!(rect.x >= 0 && rect.y >= 0, "tile {:?} has negative origin", rect);
            assert!(
                rect.right() <= params.max_width + params.padding,
                "tile {:?} exceeds width",
                rect
            );
            assert!(
                rect.bottom() <= params.max_height + params.padding,
                "tile {:?} exceeds height",
                rect
            );
        }
    }

    #[test]
    fn empty_input_yields_empty_layout() {
        let layout = compute_layout(&[], &LayoutParams::default());
        assert!(layout.is_empty());
        assert_eq!(layout.scale, LayoutParams::DEFAULT_BASE_SCALE);
    }

    #[test]
    fn single_monitor_keeps_base_scale_when_it_fits() {
        let params = LayoutParams::default();
        let layout = compute_layout(&monitors(&[Rect::new(0, 0, 1920, 1080)]), &params);

        assert_eq!(layout.scale, 0.1);
        assert_eq!(layout.display_rects, vec![Rect::new(20, 20, 192, 108)]);
        assert_within_canvas(&layout, &params);
    }

    #[test]
    fn side_by_side_monitors_are_placed_left_to_right() {
        let params = LayoutParams::default();
        let layout = compute_layout(
            &monitors(&[Rect::new(0, 0, 1920, 1080), Rect::new(1920, 0, 1920, 1080)]),
            &params,
        );

        assert_eq!(layout.display_rects[0], Rect::new(20, 20, 192, 108));
        assert_eq!(layout.display_rects[1], Rect::new(212, 20, 192, 108));
        assert_eq!(layout.canvas_size(params.padding), (424, 148));
    }

    #[test]
    fn negative_origin_is_translated_onto_canvas() {
        let params = LayoutParams::default();
        let layout = compute_layout(
            &monitors(&[Rect::new(0, 0, 1920, 1080), Rect::new(-1920, 0, 1920, 1080)]),
            &params,
        );

        // Primary sits to the right of the secondary
        assert_eq!(layout.display_rects[1].x, params.padding);
        assert!(layout.display_rects[0].x > layout.display_rects[1].x);
        assert_within_canvas(&layout, &params);
    }

    #[test]
    fn wide_desktop_is_shrunk_to_fit() {
        let params = LayoutParams::default();
        let rects: Vec<Rect> = (0..4).map(|i| Rect::new(i * 3840, 0, 3840, 2160)).collect();
        let layout = compute_layout(&monitors(&rects), &params);

        assert!(layout.scale < params.base_scale);
        assert_within_canvas(&layout, &params);
    }

    #[test]
    fn tall_desktop_is_shrunk_to_fit() {
        let params = LayoutParams::default();
        let rects: Vec<Rect> = (0..3).map(|i| Rect::new(0, i * 2160, 3840, 2160)).collect();
        let layout = compute_layout(&monitors(&rects), &params);

        assert!(layout.scale < params.base_scale);
        assert_within_canvas(&layout, &params);
    }

    #[test]
    fn relative_ordering_is_preserved() {
        let params = LayoutParams::default();
        let rects = [
            Rect::new(-2560, -400, 2560, 1440),
            Rect::new(0, 0, 1920, 1080),
            Rect::new(1920, 0, 1080, 1920),
            Rect::new(0, 1080, 1920, 1080),
            Rect::new(5000, 3000, 7680, 4320),
        ];
        let layout = compute_layout(&monitors(&rects), &params);
        assert_within_canvas(&layout, &params);

        for (a, ra) in rects.iter().enumerate() {
            for (b, rb) in rects.iter().enumerate() {
                let da = layout.display_rects[a];
                let db = layout.display_rects[b];
                if ra.x < rb.x {
                    assert!(da.x <= db.x, "monitor {} should stay left of {}", a, b);
                }
                if ra.y < rb.y {
                    assert!(da.y <= db.y, "monitor {} should stay above {}", a, b);
                }
            }
        }
    }

    #[test]
    fn zero_padding_with_degenerate_bounds_does_not_divide_by_zero() {
        let params = LayoutParams {
            max_width: 0,
            max_height: 0,
            padding: 0,
            base_scale: 0.1,
        };
        let layout = compute_layout(&monitors(&[Rect::new(0, 0, 0, 0)]), &params);

        assert_eq!(layout.scale, 0.1);
        assert_eq!(layout.display_rects, vec![Rect::new(0, 0, 0, 0)]);
    }
}
