//! State carried for the lifetime of one reorder interaction.

use crate::strip::element::ElementKey;

/// No edge scrolling allowed yet.
pub const SCROLL_NONE: u8 = 0;
/// The drag has moved visually left at least once.
pub const SCROLL_LEFT: u8 = 1;
/// The drag has moved visually right at least once.
pub const SCROLL_RIGHT: u8 = 2;

/// How a position update entered the strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReorderType {
    /// An ordinary drag move inside the strip.
    DragWithinStrip,
    /// An external drag crossed into the strip.
    DragOntoStrip,
    /// The drag left the strip bounds.
    DragOutOfStrip,
}

/// Live state for the active reorder. At most one exists at a time.
#[derive(Debug)]
pub struct ReorderSession {
    /// The element being dragged.
    pub interacting: ElementKey,
    /// Most recent raw x of the drag, in visual space.
    pub last_x: f32,
    /// Tab width snapshot taken when the reorder started. Thresholds stay
    /// stable even if tabs resize mid-drag.
    pub tab_width: f32,
    /// Bitmask of `SCROLL_LEFT` / `SCROLL_RIGHT`.
    pub scroll_state: u8,
    /// When the drag last sat in an edge gutter, for speed integration.
    pub last_scroll_time: Option<u64>,
}

impl ReorderSession {
    pub fn new(interacting: ElementKey, x: f32, tab_width: f32) -> Self {
        Self {
            interacting,
            last_x: x,
            tab_width,
            scroll_state: SCROLL_NONE,
            last_scroll_time: None,
        }
    }

    /// Records the directions the user has dragged. Edge scrolling in a
    /// direction only unlocks after the user moves that way.
    pub fn note_drag_direction(&mut self, visual_delta: f32) {
        if visual_delta <= -1.0 {
            self.scroll_state |= SCROLL_LEFT;
        }
        if visual_delta >= 1.0 {
            self.scroll_state |= SCROLL_RIGHT;
        }
    }

    pub fn may_scroll_left(&self) -> bool {
        self.scroll_state & SCROLL_LEFT != 0
    }

    pub fn may_scroll_right(&self) -> bool {
        self.scroll_state & SCROLL_RIGHT != 0
    }
}
