//! Edge-gutter speed math for reorder auto-scrolling.
//!
//! Near each strip edge two nested gutters control the scroll speed:
//!
//! ```text
//! Speed: MAX    MIN                  MIN    MAX
//! |-------|======|--------------------|======|-------|
//! ```
//!
//! Inside the outer band the speed ramps linearly from zero at the inner
//! boundary to full speed at the outer one.

use crate::config::StripConfig;
use crate::strip::geometry::flip_sign_if;
use crate::strip::layout::Viewport;
use crate::strip::reorder::session::ReorderSession;

/// Fraction of the maximum edge-scroll speed the drag currently asks for,
/// in logical sign convention: positive scrolls toward the strip start.
///
/// `x`/`width` are the dragged element's visual draw bounds. A direction
/// only produces speed once the session has seen a drag that way.
pub fn drag_speed_ratio(
    session: &ReorderSession,
    x: f32,
    width: f32,
    viewport: &Viewport,
    config: &StripConfig,
) -> f32 {
    let start_min = config.reorder.edge_scroll_start_min;
    let start_max = config.reorder.edge_scroll_start_max;
    let ramp = start_min - start_max;

    let left_min = viewport.left_margin + start_min;
    let left_max = viewport.left_margin + start_max;
    let right_min = viewport.width - viewport.right_margin - start_min;
    let right_max = viewport.width - viewport.right_margin - start_max;

    let ratio = if session.may_scroll_left() && x < left_min {
        (left_min - x.max(left_max)) / ramp
    } else if session.may_scroll_right() && x + width > right_min {
        -((x + width).min(right_max) - right_min) / ramp
    } else {
        0.0
    };

    // A visually-left scroll reveals the logical end in RTL.
    flip_sign_if(ratio, viewport.rtl)
}
