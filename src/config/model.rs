use serde::{Deserialize, Serialize};

/// Policy constants for the strip. The defaults are load-bearing: reorder
/// feel depends on them, so embedders should only override deliberately.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StripConfig {
    pub layout: LayoutConfig,
    pub reorder: ReorderConfig,
    pub scroll: ScrollConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Lower bound for the adaptive tab width, in dp.
    pub min_tab_width: f32,
    /// Upper bound for the adaptive tab width, in dp.
    pub max_tab_width: f32,
    /// How far adjacent tabs overlap, in dp.
    pub tab_overlap: f32,
    /// Rendered width of a group-title marker. Text measurement is the
    /// renderer's concern, so the engine treats this as fixed.
    pub group_title_width: f32,
    /// Overlap between a group title and its first tab, in dp.
    pub group_title_overlap: f32,
    /// Inset subtracted from a group's bottom-indicator width.
    pub group_indicator_inset: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_tab_width: 108.0,
            max_tab_width: 265.0,
            tab_overlap: 24.0,
            group_title_width: 48.0,
            group_title_overlap: 16.0,
            group_indicator_inset: 4.0,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ReorderConfig {
    /// Fraction of a neighbor's effective width the dragged element must
    /// cross past its midpoint before a swap triggers. The hysteresis that
    /// prevents oscillation between two nearly equal-width elements.
    pub overlap_switch_fraction: f32,
    /// Duration of the slide animation for displaced elements, in ms.
    pub move_duration_ms: u64,
    /// Duration of margin / indicator / slide-out animations, in ms.
    pub slide_duration_ms: u64,
    /// Duration of the container lift / reattach animation, in ms.
    pub attach_duration_ms: u64,
    /// Peak auto-scroll speed when dragging at the strip edge, in dp/s.
    pub edge_scroll_max_speed: f32,
    /// Distance from the strip edge at which auto-scroll starts, in dp.
    pub edge_scroll_start_min: f32,
    /// Distance from the strip edge at which auto-scroll peaks, in dp.
    pub edge_scroll_start_max: f32,
    /// Minimum time between auto-scroll nudges, in ms.
    pub min_autoscroll_interval_ms: u64,
}

impl Default for ReorderConfig {
    fn default() -> Self {
        Self {
            overlap_switch_fraction: 0.53,
            move_duration_ms: 125,
            slide_duration_ms: 250,
            attach_duration_ms: 75,
            edge_scroll_max_speed: 1000.0,
            edge_scroll_start_min: 87.4,
            edge_scroll_start_max: 18.4,
            min_autoscroll_interval_ms: 16,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Distance from a scroll limit over which the edge fade reaches full
    /// opacity, in dp.
    pub fade_threshold: f32,
    /// Duration of an animated (non-fling) scroll, in ms.
    pub scroll_duration_ms: u64,
    /// Constant fling deceleration, in dp/s^2.
    pub fling_deceleration: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            fade_threshold: 24.0,
            scroll_duration_ms: 250,
            fling_deceleration: 1500.0,
        }
    }
}

impl StripConfig {
    /// Nominal tab width minus the inter-tab overlap.
    pub fn effective_tab_width(&self, tab_width: f32) -> f32 {
        tab_width - self.layout.tab_overlap
    }

    /// Half the effective tab width; the base quantity for merge thresholds.
    pub fn half_tab_width(&self, tab_width: f32) -> f32 {
        self.effective_tab_width(tab_width) / 2.0
    }
}
