//! Scroll state for the strip: the logical offset, its limits, and the
//! programmatic scrollers (eased scrolls and flings).
//!
//! The offset is stored in logical space: 0 pins the strip to its start
//! side, negative values scroll content out past the start. `min_offset`
//! tracks how far the content overflows the viewport.

use crate::config::StripConfig;

/// Offsets closer to a limit than this snap onto it.
const LIMIT_EPSILON: f32 = 0.001;

#[derive(Clone, Copy, Debug)]
enum Scroller {
    /// Cubic ease-out from `from` to `to` over `duration_ms`.
    Eased {
        from: f32,
        to: f32,
        start_time: u64,
        duration_ms: u64,
    },
    /// Constant deceleration from an initial velocity in dp/s.
    Fling {
        from: f32,
        velocity: f32,
        start_time: u64,
        duration_ms: u64,
    },
}

#[derive(Debug)]
pub struct ScrollController {
    offset: f32,
    min_offset: f32,
    /// Extra space reserved at the strip start during a reorder, so the
    /// interacting tab can visually leave a grouped first tab.
    reorder_start_margin: f32,
    scroller: Option<Scroller>,
}

impl ScrollController {
    pub fn new() -> Self {
        Self {
            offset: 0.0,
            min_offset: 0.0,
            reorder_start_margin: 0.0,
            scroller: None,
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn min_offset(&self) -> f32 {
        self.min_offset
    }

    pub fn reorder_start_margin(&self) -> f32 {
        self.reorder_start_margin
    }

    pub fn set_reorder_start_margin(&mut self, margin: f32) {
        self.reorder_start_margin = margin;
    }

    /// Sets the offset, clamped into `[min_offset, 0]`. Returns the delta
    /// actually applied, which callers use to detect hitting a limit.
    pub fn set_offset(&mut self, offset: f32) -> f32 {
        let clamped = offset.clamp(self.min_offset, 0.0);
        let applied = clamped - self.offset;
        self.offset = clamped;
        applied
    }

    /// Applies a logical-space delta. Returns the portion applied.
    pub fn scroll_by(&mut self, delta: f32) -> f32 {
        self.set_offset(self.offset + delta)
    }

    /// Recomputes `min_offset` from the content and viewport widths and
    /// re-clamps the current offset.
    ///
    /// `total_width` is what the element sequence occupies including the
    /// reorder start margin; `strip_width` is the viewport minus its outer
    /// margins.
    pub fn update_limits(&mut self, total_width: f32, strip_width: f32) {
        let mut min = (strip_width - total_width).min(0.0);
        if min > -LIMIT_EPSILON {
            min = 0.0;
        }
        self.min_offset = min;
        self.offset = self.offset.clamp(self.min_offset, 0.0);
    }

    // ── Programmatic scrolling ───────────────────────────────────────

    /// Starts an eased scroll to `to`, or jumps there when not animated.
    pub fn start_scroll(&mut self, time: u64, to: f32, animate: bool, config: &StripConfig) {
        let to = to.clamp(self.min_offset, 0.0);
        if animate {
            self.scroller = Some(Scroller::Eased {
                from: self.offset,
                to,
                start_time: time,
                duration_ms: config.scroll.scroll_duration_ms,
            });
        } else {
            self.scroller = None;
            self.offset = to;
        }
    }

    /// Starts a fling with the given logical velocity in dp/s.
    pub fn fling(&mut self, time: u64, velocity: f32, config: &StripConfig) {
        if velocity == 0.0 {
            return;
        }
        let duration_ms = (velocity.abs() / config.scroll.fling_deceleration * 1000.0) as u64;
        self.scroller = Some(Scroller::Fling {
            from: self.offset,
            velocity,
            start_time: time,
            duration_ms,
        });
    }

    /// The offset a running fling would settle at, used to redirect a drag
    /// that interrupts one. Returns the current offset when idle.
    pub fn final_offset(&self) -> f32 {
        match self.scroller {
            Some(Scroller::Eased { to, .. }) => to,
            Some(Scroller::Fling {
                from,
                velocity,
                duration_ms,
                ..
            }) => {
                let travel = velocity * duration_ms as f32 / 2000.0;
                (from + travel).clamp(self.min_offset, 0.0)
            }
            None => self.offset,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.scroller.is_none()
    }

    /// Stops any programmatic scroll at its current position.
    pub fn force_finish(&mut self) {
        self.scroller = None;
    }

    /// Advances the active scroller. Returns true while one is running.
    pub fn update(&mut self, time: u64) -> bool {
        let Some(scroller) = self.scroller else {
            return false;
        };
        match scroller {
            Scroller::Eased {
                from,
                to,
                start_time,
                duration_ms,
            } => {
                let elapsed = time.saturating_sub(start_time);
                if elapsed >= duration_ms {
                    self.offset = to.clamp(self.min_offset, 0.0);
                    self.scroller = None;
                } else {
                    let t = elapsed as f32 / duration_ms as f32;
                    let eased = 1.0 - (1.0 - t).powi(3);
                    self.set_offset(from + (to - from) * eased);
                }
            }
            Scroller::Fling {
                from,
                velocity,
                start_time,
                duration_ms,
            } => {
                let elapsed = time.saturating_sub(start_time);
                if elapsed >= duration_ms {
                    self.offset = self.final_offset();
                    self.scroller = None;
                } else {
                    let t = elapsed as f32 / 1000.0;
                    let decel = velocity.signum()
                        * (velocity.abs() / duration_ms as f32 * 1000.0);
                    let travelled = velocity * t - decel * t * t / 2.0;
                    let applied = self.set_offset(from + travelled);
                    // Hitting a limit kills the remaining momentum.
                    if applied == 0.0 && travelled != 0.0 {
                        self.scroller = None;
                        return false;
                    }
                }
            }
        }
        self.scroller.is_some()
    }

    // ── Edge fades ───────────────────────────────────────────────────

    /// Opacity of the fade drawn over one strip edge.
    ///
    /// Fades in linearly as scrollable content approaches from that side
    /// and saturates once at least `fade_threshold` dp is hidden.
    pub fn fade_opacity(&self, is_left_edge: bool, rtl: bool, config: &StripConfig) -> f32 {
        // In RTL the logical start sits at the right edge.
        let hidden = if is_left_edge != rtl {
            -self.offset
        } else {
            self.offset - self.min_offset
        };
        (hidden / config.scroll.fade_threshold).clamp(0.0, 1.0)
    }
}

impl Default for ScrollController {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ────────────────────────────────────────────────────────────
