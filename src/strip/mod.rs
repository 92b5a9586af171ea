//! Tab strip state: the element sequence, scrolling, and reordering.
//!
//! [`Strip`] is the orchestrator the embedder talks to. It owns the
//! visual element sequence and derives it from the embedder's
//! [`TabCollection`]; pointer events come in through the entry points
//! below and visual changes go back out through the [`AnimationHost`].

pub mod animation;
pub mod collection;
pub mod element;
pub mod geometry;
pub mod layout;
pub mod reorder;
pub mod scroll;

use crate::config::StripConfig;
use animation::{Animation, AnimatedProperty, AnimationHost, CompletionEvent};
use collection::TabCollection;
use element::{find_tab, GroupId, GroupTitleElement, StripElement, TabElement, TabId};
use geometry::to_logical_delta;
use layout::{LayoutParams, Viewport};
use reorder::{ReorderEngine, ReorderEnv, ReorderType};
use scroll::ScrollController;

pub struct Strip {
    config: StripConfig,
    viewport: Viewport,
    elements: Vec<StripElement>,
    scroll: ScrollController,
    reorder: ReorderEngine,
    /// Adaptive width currently applied to all live tabs.
    tab_width: f32,
    /// Trailing margins stay in the layout until the post-reorder
    /// animations settle, not just until the session ends.
    reorder_visuals_active: bool,
}

impl Strip {
    pub fn new(config: StripConfig, viewport: Viewport) -> Self {
        let tab_width = config.layout.max_tab_width;
        Self {
            config,
            viewport,
            elements: Vec::new(),
            scroll: ScrollController::new(),
            reorder: ReorderEngine::new(),
            tab_width,
            reorder_visuals_active: false,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn elements(&self) -> &[StripElement] {
        &self.elements
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll.offset()
    }

    pub fn tab_width(&self) -> f32 {
        self.tab_width
    }

    pub fn in_reorder(&self) -> bool {
        self.reorder.in_reorder()
    }

    /// Opacity of the fade drawn over the given strip edge.
    pub fn fade_opacity(&self, is_left_edge: bool) -> f32 {
        self.scroll
            .fade_opacity(is_left_edge, self.viewport.rtl, &self.config)
    }

    pub fn set_viewport(&mut self, viewport: Viewport, model: &dyn TabCollection) {
        self.viewport = viewport;
        self.update_tab_width(model);
        self.relayout();
    }

    // ── Model synchronization ────────────────────────────────────────

    /// Re-derives the element sequence from the model. Call after any
    /// model change the strip did not make itself (tab added, group
    /// created or collapsed, selection moved).
    pub fn sync(&mut self, model: &dyn TabCollection) {
        rebuild_elements(&mut self.elements, model, self.tab_width, &self.config);
        self.update_tab_width(model);
        self.relayout();
    }

    /// Starts the removal of a closed tab. The element stays in the
    /// strip, shrinking, until its slide-out settles; the model should
    /// already have dropped the tab.
    pub fn tab_closed(&mut self, id: TabId, host: &mut dyn AnimationHost) {
        let Some(index) = find_tab(&self.elements, id) else {
            return;
        };
        let Some(tab) = self.elements[index].as_tab_mut() else {
            return;
        };
        if tab.dying {
            return;
        }
        tab.dying = true;
        let from = tab.width_weight;
        host.start_animations(
            vec![Animation::new(
                element::ElementKey::Tab(id),
                AnimatedProperty::WidthWeight,
                from,
                0.0,
                self.config.reorder.slide_duration_ms,
            )],
            Some(CompletionEvent::ClosedTabSettled(id)),
        );
        host.request_update();
    }

    /// Delivered by the host when an animation batch with a completion
    /// event has finished.
    pub fn on_animations_complete(&mut self, event: CompletionEvent, model: &dyn TabCollection) {
        match event {
            CompletionEvent::ReorderVisualsSettled => {
                for element in &mut self.elements {
                    element.set_foregrounded(false);
                    element.set_trailing_margin(0.0);
                }
                self.reorder_visuals_active = false;
                self.relayout();
            }
            CompletionEvent::ClosedTabSettled(id) => {
                if let Some(index) = find_tab(&self.elements, id) {
                    self.elements.remove(index);
                }
                self.update_tab_width(model);
                self.relayout();
            }
        }
    }

    /// Scrolls so the given tab is fully inside the visible strip, easing
    /// there when `animate` is set. No-op when it already is.
    pub fn scroll_tab_into_view(
        &mut self,
        time: u64,
        id: TabId,
        animate: bool,
        host: &mut dyn AnimationHost,
    ) {
        let Some(index) = find_tab(&self.elements, id) else {
            return;
        };
        let draw_x = self.elements[index].draw_x();
        let width = self.elements[index].width();
        let left = self.viewport.left_margin;
        let right = self.viewport.width - self.viewport.right_margin;

        let visual_delta = if draw_x < left {
            left - draw_x
        } else if draw_x + width > right {
            right - (draw_x + width)
        } else {
            return;
        };
        let target = self.scroll.offset() + to_logical_delta(visual_delta, self.viewport.rtl);
        self.scroll.start_scroll(time, target, animate, &self.config);
        if !animate {
            self.relayout();
        }
        host.request_update();
    }

    // ── Pointer entry points ─────────────────────────────────────────

    pub fn on_down(&mut self, _time: u64, _x: f32) {
        // A touch anywhere stops coasting.
        self.scroll.force_finish();
    }

    pub fn on_long_press(
        &mut self,
        _time: u64,
        x: f32,
        model: &mut dyn TabCollection,
        host: &mut dyn AnimationHost,
    ) {
        let Some(index) = layout::element_at(&self.elements, x) else {
            return;
        };
        let key = self.elements[index].key();
        let Strip {
            config,
            viewport,
            elements,
            scroll,
            reorder,
            tab_width,
            ..
        } = self;
        let mut env = ReorderEnv {
            elements,
            scroll,
            model,
            host,
            config,
            viewport: *viewport,
            tab_width: *tab_width,
        };
        reorder.start_reorder(&mut env, key, x);
        if reorder.in_reorder() {
            self.reorder_visuals_active = true;
        }
    }

    pub fn drag(
        &mut self,
        _time: u64,
        x: f32,
        delta_x: f32,
        kind: ReorderType,
        model: &mut dyn TabCollection,
        host: &mut dyn AnimationHost,
    ) {
        if self.reorder.in_reorder() {
            let Strip {
                config,
                viewport,
                elements,
                scroll,
                reorder,
                tab_width,
                ..
            } = self;
            let mut env = ReorderEnv {
                elements,
                scroll,
                model,
                host,
                config,
                viewport: *viewport,
                tab_width: *tab_width,
            };
            reorder.update_reorder_position(&mut env, x, delta_x, kind);
            host.request_update();
            return;
        }
        self.scroll.force_finish();
        self.scroll
            .scroll_by(to_logical_delta(delta_x, self.viewport.rtl));
        self.relayout();
        host.request_update();
    }

    pub fn fling(&mut self, time: u64, velocity: f32, host: &mut dyn AnimationHost) {
        if self.reorder.in_reorder() {
            return;
        }
        self.scroll.fling(
            time,
            to_logical_delta(velocity, self.viewport.rtl),
            &self.config,
        );
        host.request_update();
    }

    pub fn on_up_or_cancel(
        &mut self,
        model: &mut dyn TabCollection,
        host: &mut dyn AnimationHost,
    ) {
        if !self.reorder.in_reorder() {
            return;
        }
        let Strip {
            config,
            viewport,
            elements,
            scroll,
            reorder,
            tab_width,
            ..
        } = self;
        let mut env = ReorderEnv {
            elements,
            scroll,
            model,
            host,
            config,
            viewport: *viewport,
            tab_width: *tab_width,
        };
        reorder.stop_reorder(&mut env);
    }

    /// Per-frame tick. Advances programmatic scrolling, drives reorder
    /// auto-scroll, and refreshes positions. Returns true while more
    /// frames are needed.
    pub fn update(
        &mut self,
        time: u64,
        model: &mut dyn TabCollection,
        host: &mut dyn AnimationHost,
    ) -> bool {
        let scrolling = self.scroll.update(time);
        if self.reorder.in_reorder() {
            let Strip {
                config,
                viewport,
                elements,
                scroll,
                reorder,
                tab_width,
                ..
            } = self;
            let mut env = ReorderEnv {
                elements,
                scroll,
                model,
                host,
                config,
                viewport: *viewport,
                tab_width: *tab_width,
            };
            reorder.update_auto_scroll(&mut env, time);
        }
        self.relayout();
        scrolling || self.reorder.in_reorder()
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn update_tab_width(&mut self, model: &dyn TabCollection) {
        let live = self
            .elements
            .iter()
            .filter_map(|el| el.as_tab())
            .filter(|tab| !tab.dying && !tab.collapsed)
            .count()
            .max(model.len().min(1));
        self.tab_width =
            layout::compute_tab_width(live, self.viewport.strip_width(), &self.config);
        for element in &mut self.elements {
            if let Some(tab) = element.as_tab_mut() {
                if !tab.dying {
                    tab.width = self.tab_width;
                }
            }
        }
    }

    fn relayout(&mut self) {
        let in_reorder = self.reorder.in_reorder() || self.reorder_visuals_active;
        relayout(
            &mut self.elements,
            &mut self.scroll,
            &self.viewport,
            self.tab_width,
            &self.config,
            in_reorder,
        );
    }
}

/// Recomputes scroll limits and every element's ideal and draw position.
pub(crate) fn relayout(
    elements: &mut [StripElement],
    scroll: &mut ScrollController,
    viewport: &Viewport,
    tab_width: f32,
    config: &StripConfig,
    in_reorder: bool,
) {
    let mut params = LayoutParams {
        start_x: 0.0,
        tab_width,
        tab_overlap: config.layout.tab_overlap,
        group_title_overlap: config.layout.group_title_overlap,
        rtl: viewport.rtl,
        in_reorder,
    };
    let total = layout::total_elements_width(elements, &params, scroll.reorder_start_margin());
    scroll.update_limits(total, viewport.strip_width());

    params.start_x = if viewport.rtl {
        viewport.width
            - viewport.right_margin
            - tab_width
            - scroll.offset()
            - scroll.reorder_start_margin()
    } else {
        viewport.left_margin + scroll.offset() + scroll.reorder_start_margin()
    };
    layout::compute_ideal_positions(elements, &params);
    layout::push_draw_positions(elements);
}

/// Re-derives the element sequence from the model, preserving per-element
/// visual state across the rebuild. Each group's title is inserted ahead
/// of its first member; dying tabs keep their old slot until their
/// removal settles.
pub(crate) fn rebuild_elements(
    elements: &mut Vec<StripElement>,
    model: &dyn TabCollection,
    tab_width: f32,
    config: &StripConfig,
) {
    let old = std::mem::take(elements);
    let dying: Vec<(usize, StripElement)> = old
        .iter()
        .enumerate()
        .filter(|(_, el)| el.as_tab().is_some_and(|t| t.dying))
        .map(|(i, el)| (i, el.clone()))
        .collect();

    let take_tab = |id: TabId| -> Option<TabElement> {
        old.iter()
            .filter_map(|el| el.as_tab())
            .find(|t| t.id == id)
            .cloned()
    };
    let take_title = |group: GroupId| -> Option<GroupTitleElement> {
        old.iter()
            .filter_map(|el| el.as_group_title())
            .find(|t| t.group == group)
            .cloned()
    };

    let selected = model.selected_tab();
    let mut rebuilt = Vec::with_capacity(model.len() * 2);
    let mut last_group: Option<GroupId> = None;
    for i in 0..model.len() {
        let Some(id) = model.tab_at(i) else {
            continue;
        };
        let group = model.group_of(id);
        if let Some(g) = group {
            if last_group != Some(g) {
                let mut title = take_title(g).unwrap_or_else(|| {
                    let mut title =
                        GroupTitleElement::new(g, config.layout.group_title_width);
                    title.bottom_indicator_width = reorder::bottom_indicator_width(
                        model.group_member_count(g),
                        title.width,
                        tab_width,
                        config,
                    );
                    title
                });
                title.collapsed = model.is_group_collapsed(g);
                rebuilt.push(StripElement::GroupTitle(title));
            }
        }
        last_group = group;

        let mut tab = take_tab(id).unwrap_or_else(|| TabElement::new(id, tab_width));
        tab.group = group;
        tab.collapsed = group.is_some_and(|g| model.is_group_collapsed(g));
        tab.width_weight = if tab.collapsed { 0.0 } else { 1.0 };
        tab.selected = selected == Some(id);
        rebuilt.push(StripElement::Tab(tab));
    }

    for (index, element) in dying {
        rebuilt.insert(index.min(rebuilt.len()), element);
    }
    *elements = rebuilt;
}

#[cfg(test)]
#[path = "../../tests/unit/strip.rs"]
mod tests;
