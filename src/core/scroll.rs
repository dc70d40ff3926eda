//! Minimal scroll adjustment to keep the focused folder row in view.

/// Fixed margin kept between the focused row and the viewport edge being
/// approached.
pub const FOCUS_MARGIN: f32 = 20.0;

/// Scroll geometry of the folder list, captured when the view mounts and on
/// every scroll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRegion {
    pub viewport_height: f32,
    pub offset: f32,
}

/// New absolute offset bringing a row fully into view, or `None` when it is
/// already fully visible. `row_top` is the row's top relative to the visible
/// area (negative when scrolled above it).
pub fn adjustment(region: ScrollRegion, row_top: f32, row_height: f32) -> Option<f32> {
    if row_top < 0.0 {
        Some((region.offset + row_top - FOCUS_MARGIN).max(0.0))
    } else if row_top + row_height > region.viewport_height {
        Some(region.offset + row_top - region.viewport_height + row_height + FOCUS_MARGIN)
    } else {
        None
    }
}

/// Focused-row scroll contract: without a mounted region this is a no-op
/// (`None`, nothing adjusted); otherwise the minimal adjustment, if any.
pub fn scroll_to_focused(
    region: Option<ScrollRegion>,
    row_top: f32,
    row_height: f32,
) -> Option<f32> {
    adjustment(region?, row_top, row_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGION: ScrollRegion = ScrollRegion {
        viewport_height: 300.0,
        offset: 100.0,
    };

    #[test]
    fn unmounted_region_is_a_no_op() {
        assert_eq!(scroll_to_focused(None, -50.0, 32.0), None);
    }

    #[test]
    fn fully_visible_row_needs_no_adjustment() {
        assert_eq!(scroll_to_focused(Some(REGION), 0.0, 32.0), None);
        assert_eq!(scroll_to_focused(Some(REGION), 268.0, 32.0), None);
    }

    #[test]
    fn row_above_viewport_scrolls_up_with_margin() {
        // Row top is 50px above the visible area.
        assert_eq!(scroll_to_focused(Some(REGION), -50.0, 32.0), Some(30.0));
    }

    #[test]
    fn row_below_viewport_scrolls_down_with_margin() {
        // Row top at 290 with height 32 overhangs the 300px viewport.
        assert_eq!(scroll_to_focused(Some(REGION), 290.0, 32.0), Some(142.0));
    }

    #[test]
    fn upward_adjustment_clamps_at_zero() {
        let region = ScrollRegion {
            viewport_height: 300.0,
            offset: 10.0,
        };
        assert_eq!(scroll_to_focused(Some(region), -5.0, 32.0), Some(0.0));
    }
}
