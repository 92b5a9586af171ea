//! Pure layout math for the strip.
//!
//! Every function in this module is a pure calculation over the element
//! sequence: given widths, margins, and the scroll state it produces ideal
//! x positions. No animation, no side effects outside the passed slice.

use crate::config::StripConfig;
use crate::strip::element::StripElement;
use crate::strip::geometry::flip_sign_if;

/// Viewport metrics the layout works inside, in dp.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub width: f32,
    pub left_margin: f32,
    pub right_margin: f32,
    pub rtl: bool,
}

impl Viewport {
    /// Width available to elements after the outer margins.
    pub fn strip_width(&self) -> f32 {
        self.width - self.left_margin - self.right_margin
    }
}

/// Inputs for one ideal-position pass.
#[derive(Clone, Copy, Debug)]
pub struct LayoutParams {
    /// Where the first element begins. Already incorporates scroll offset,
    /// leading margin, and the reorder start margin.
    pub start_x: f32,
    /// The adaptive tab width currently applied to all live tabs.
    pub tab_width: f32,
    pub tab_overlap: f32,
    pub group_title_overlap: f32,
    pub rtl: bool,
    /// Trailing margins only participate while a reorder (or its margin
    /// animation) is running.
    pub in_reorder: bool,
}

/// Computes the adaptive tab width with overflow compression.
///
/// Tabs shrink from `max_tab_width` down to `min_tab_width` as more open.
/// Dying tabs keep their space elsewhere but do not count here.
pub fn compute_tab_width(num_live_tabs: usize, strip_width: f32, config: &StripConfig) -> f32 {
    let num_tabs = num_live_tabs.max(1) as f32;
    let overlap_reclaimed = config.layout.tab_overlap * (num_tabs - 1.0);
    let optimal = (strip_width + overlap_reclaimed) / num_tabs;
    optimal.clamp(config.layout.min_tab_width, config.layout.max_tab_width)
}

/// Walks the element sequence once and assigns each element its ideal x.
///
/// Idempotent for unchanged inputs: the walk only reads widths, weights,
/// and margins, and overwrites ideal positions from scratch.
pub fn compute_ideal_positions(elements: &mut [StripElement], params: &LayoutParams) {
    let mut cursor = params.start_x;

    for element in elements.iter_mut() {
        let mut delta = match element {
            StripElement::Tab(tab) => {
                tab.ideal_x = cursor;
                if tab.dying {
                    // A dying tab reserves its full slot until removal
                    // settles, regardless of its animated weight.
                    params.tab_width - params.tab_overlap
                } else {
                    (tab.width - params.tab_overlap) * tab.width_weight
                }
            }
            StripElement::GroupTitle(title) => {
                // The cursor tracks tab slots; shift the narrower title so
                // its visual foot lines up with the adjacent tabs.
                let foot_offset = if params.rtl {
                    params.tab_width - title.width
                } else {
                    0.0
                };
                title.ideal_x = cursor + foot_offset;
                (title.width - params.group_title_overlap) * title.width_weight
            }
        };
        if params.in_reorder {
            delta += element.trailing_margin();
        }
        cursor += flip_sign_if(delta, params.rtl);
    }
}

/// Pushes draw positions from the ideal positions and drag offsets.
pub fn push_draw_positions(elements: &mut [StripElement]) {
    for element in elements.iter_mut() {
        element.set_draw_x(element.ideal_x() + element.offset_x());
    }
}

/// Total width the element sequence occupies, including reorder margins.
///
/// Mirrors the ideal-position walk: per-element effective widths plus
/// trailing margins, corrected for the trailing overlap fencepost.
pub fn total_elements_width(
    elements: &[StripElement],
    params: &LayoutParams,
    reorder_start_margin: f32,
) -> f32 {
    let mut total = reorder_start_margin;
    for element in elements {
        total += match element {
            StripElement::Tab(tab) => {
                if tab.dying {
                    params.tab_width - params.tab_overlap
                } else {
                    (tab.width - params.tab_overlap) * tab.width_weight
                }
            }
            StripElement::GroupTitle(title) => {
                (title.width - params.group_title_overlap) * title.width_weight
            }
        };
        if params.in_reorder {
            total += element.trailing_margin();
        }
    }
    total + params.tab_overlap
}

/// Returns the index of the element whose drawn bounds contain `x`.
pub fn element_at(elements: &[StripElement], x: f32) -> Option<usize> {
    elements
        .iter()
        .position(|el| x >= el.draw_x() && x < el.draw_x() + el.width())
}

// ── Tests ────────────────────────────────────────────────────────────
