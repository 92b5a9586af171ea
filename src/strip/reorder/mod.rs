//! The reorder engine: a state machine that owns at most one drag
//! session and rewrites tab order as the drag crosses its neighbors.
//!
//! The engine mutates the element sequence in place and mirrors every
//! committed move into the backing [`TabCollection`]. It never raises
//! user-visible errors: a bad precondition means the call is a no-op.

pub mod autoscroll;
pub mod session;

pub use session::{ReorderSession, ReorderType};

use crate::config::StripConfig;
use crate::strip::animation::{
    Animation, AnimatedProperty, AnimationHost, CompletionEvent,
};
use crate::strip::collection::TabCollection;
use crate::strip::element::{
    find_group_title, find_tab, ElementKey, GroupId, StripElement, TabId,
};
use crate::strip::geometry::{from_logical_delta, is_offset_toward_end};
use crate::strip::layout::Viewport;
use crate::strip::{rebuild_elements, relayout};

/// Everything a reorder operation needs from the strip, borrowed for the
/// duration of one call.
pub struct ReorderEnv<'a> {
    pub elements: &'a mut Vec<StripElement>,
    pub scroll: &'a mut crate::strip::scroll::ScrollController,
    pub model: &'a mut dyn TabCollection,
    pub host: &'a mut dyn AnimationHost,
    pub config: &'a StripConfig,
    pub viewport: Viewport,
    /// The adaptive tab width currently in effect.
    pub tab_width: f32,
}

#[derive(Default)]
pub struct ReorderEngine {
    session: Option<ReorderSession>,
    /// True while the drag has left the strip bounds. Suppresses edge
    /// auto-scrolling until the drag returns.
    off_strip: bool,
}

impl ReorderEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_reorder(&self) -> bool {
        self.session.is_some()
    }

    pub fn interacting(&self) -> Option<ElementKey> {
        self.session.as_ref().map(|s| s.interacting)
    }

    // ── Start ────────────────────────────────────────────────────────

    /// Begins a reorder on the given element. No-ops when a session is
    /// already active, the model is not ready, or the element is gone.
    pub fn start_reorder(&mut self, env: &mut ReorderEnv, interacting: ElementKey, x: f32) {
        if self.session.is_some() || !env.model.is_initialized() {
            return;
        }
        match interacting {
            ElementKey::Tab(id) => self.start_tab_reorder(env, id, x),
            ElementKey::GroupTitle(group) => self.start_group_reorder(env, group, x),
        }
    }

    fn start_tab_reorder(&mut self, env: &mut ReorderEnv, id: TabId, x: f32) {
        let Some(index) = find_tab(env.elements, id) else {
            return;
        };
        let Some(tab) = env.elements[index].as_tab() else {
            return;
        };
        if tab.dying {
            return;
        }
        env.host.finish_animations();

        // Select the tab so it stays in the foreground for the drag.
        env.model.select_tab(id);
        if let Some(tab) = env.elements[index].as_tab_mut() {
            tab.reordering = true;
            tab.selected = true;
            tab.attached = false;
        }
        env.elements[index].set_foregrounded(true);

        self.off_strip = false;
        self.session = Some(ReorderSession::new(ElementKey::Tab(id), x, env.tab_width));
        self.set_edge_margins(env);
        self.relayout(env);

        env.host.start_animations(
            vec![Animation::new(
                ElementKey::Tab(id),
                AnimatedProperty::Lift,
                0.0,
                1.0,
                env.config.reorder.attach_duration_ms,
            )],
            None,
        );
        env.host.haptic_feedback();
        env.host.request_update();
        log::debug!("reorder started on tab {}", id.0);
    }

    fn start_group_reorder(&mut self, env: &mut ReorderEnv, group: GroupId, x: f32) {
        if find_group_title(env.elements, group).is_none() {
            return;
        }
        env.host.finish_animations();

        let mut animations = Vec::new();
        let selected = env.model.selected_tab();
        for element in env.elements.iter_mut() {
            let in_group = match element {
                StripElement::GroupTitle(title) => title.group == group,
                StripElement::Tab(tab) => tab.group == Some(group),
            };
            if !in_group {
                continue;
            }
            element.set_foregrounded(true);
            if let Some(tab) = element.as_tab_mut() {
                // Lift the selected tab's container when it rides along.
                if selected == Some(tab.id) {
                    tab.attached = false;
                    animations.push(Animation::new(
                        ElementKey::Tab(tab.id),
                        AnimatedProperty::Lift,
                        0.0,
                        1.0,
                        env.config.reorder.attach_duration_ms,
                    ));
                }
            }
        }

        self.off_strip = false;
        self.session = Some(ReorderSession::new(
            ElementKey::GroupTitle(group),
            x,
            env.tab_width,
        ));

        env.host.start_animations(animations, None);
        env.host.haptic_feedback();
        env.host.request_update();
        log::debug!("reorder started on group {}", group.0);
    }

    // ── Position updates ─────────────────────────────────────────────

    /// Processes one drag move at `end_x`, with `delta_x` the raw visual
    /// delta since the previous event. For in-strip drags, sub-dp moves
    /// accumulate until they reach a whole dp.
    pub fn update_reorder_position(
        &mut self,
        env: &mut ReorderEnv,
        end_x: f32,
        delta_x: f32,
        kind: ReorderType,
    ) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let accumulated = end_x - session.last_x;
        match kind {
            ReorderType::DragWithinStrip => {
                if accumulated.abs() < 1.0 {
                    return;
                }
                session.note_drag_direction(delta_x);
                session.last_x = end_x;
            }
            ReorderType::DragOntoStrip => {
                self.off_strip = false;
                session.last_x = end_x;
                if let ElementKey::Tab(id) = session.interacting {
                    if let Some(i) = find_tab(env.elements, id) {
                        if let Some(tab) = env.elements[i].as_tab_mut() {
                            tab.dragged_off_strip = false;
                        }
                    }
                }
            }
            ReorderType::DragOutOfStrip => {
                self.off_strip = true;
                session.last_x = end_x;
                if let ElementKey::Tab(id) = session.interacting {
                    if let Some(i) = find_tab(env.elements, id) {
                        if let Some(tab) = env.elements[i].as_tab_mut() {
                            tab.dragged_off_strip = true;
                        }
                    }
                }
            }
        }
        self.apply_position_update(env, accumulated, false);
    }

    /// `from_scroll` marks deltas produced by auto-scroll rather than the
    /// pointer; they need backing out of the post-reorder offset.
    fn apply_position_update(&mut self, env: &mut ReorderEnv, delta: f32, from_scroll: bool) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let interacting = session.interacting;
        let tab_width = session.tab_width;
        match interacting {
            ElementKey::Tab(id) => {
                self.update_tab_position(env, id, delta, tab_width, from_scroll)
            }
            ElementKey::GroupTitle(group) => {
                self.update_group_position(env, group, delta, tab_width, from_scroll)
            }
        }
    }

    fn update_tab_position(
        &mut self,
        env: &mut ReorderEnv,
        id: TabId,
        delta: f32,
        tab_width: f32,
        from_scroll: bool,
    ) {
        let rtl = env.viewport.rtl;
        let Some(el_index) = find_tab(env.elements, id) else {
            return;
        };
        let old_ideal = env.elements[el_index].ideal_x();
        let mut offset = env.elements[el_index].offset_x() + delta;

        if self.reorder_tab_if_threshold_reached(env, id, offset, tab_width) {
            // A merge or eject can change which edge tab is grouped.
            self.set_edge_margins(env);
            self.relayout(env);
            offset = adjust_offset_after_reorder(
                env,
                ElementKey::Tab(id),
                offset,
                delta,
                old_ideal,
                from_scroll,
            );
        }

        // The first tab can't drag past the strip start and the last one
        // can't drag past the end, with extra headroom when the edge tab
        // is grouped so it can still be pulled out of its group.
        let Some(index) = env.model.index_of_tab(id) else {
            return;
        };
        if index == 0 {
            let limit = match env.elements.first() {
                Some(StripElement::GroupTitle(title)) => {
                    drag_out_threshold(tab_width, title.width, false, env.config)
                }
                _ => env.scroll.reorder_start_margin(),
            };
            offset = if rtl { offset.min(limit) } else { offset.max(-limit) };
        }
        if index + 1 == env.model.len() {
            let limit = last_tab_trailing_margin(env.elements);
            offset = if rtl { offset.max(-limit) } else { offset.min(limit) };
        }

        if let Some(el_index) = find_tab(env.elements, id) {
            env.elements[el_index].set_offset_x(offset);
        }
    }

    /// Handles the four threshold cases for a dragged tab:
    ///
    /// A] no group boundary nearby: plain swap with the neighbor,
    /// B] the tab is grouped: maybe drag it out of its group,
    /// C.1] neighbor is a collapsed group: maybe hop the whole group,
    /// C.2] neighbor is an expanded group: maybe merge into it.
    ///
    /// Commits the move to the model and rebuilds the element sequence
    /// when a threshold is crossed. Returns whether anything moved.
    fn reorder_tab_if_threshold_reached(
        &mut self,
        env: &mut ReorderEnv,
        id: TabId,
        offset: f32,
        tab_width: f32,
    ) -> bool {
        let toward_end = is_offset_toward_end(offset, env.viewport.rtl);
        let Some(index) = env.model.index_of_tab(id) else {
            return false;
        };
        let adjacent = if toward_end {
            env.model.tab_at(index + 1)
        } else {
            index.checked_sub(1).and_then(|i| env.model.tab_at(i))
        };
        let group = env.model.group_of(id);
        let crosses_group_boundary = match adjacent {
            None => group.is_some(),
            Some(adj) => {
                let adj_group = env.model.group_of(adj);
                let related = group.is_some() && group == adj_group;
                !related && (group.is_some() || adj_group.is_some())
            }
        };

        // Case A: plain swap.
        if !crosses_group_boundary {
            let Some(adj) = adjacent else {
                return false;
            };
            if offset.abs() <= tab_swap_threshold(tab_width, env.config) {
                return false;
            }
            let displaced = ElementKey::Tab(adj);
            let displaced_ideal = ideal_of(env.elements, displaced);
            let dest = if toward_end { index + 2 } else { index - 1 };
            env.model.move_tab(id, dest);
            self.resync(env);
            self.slide_to_ideal(env, &[(displaced, displaced_ideal)]);
            log::debug!("tab {} swapped to index {}", id.0, dest.min(env.model.len()));
            return true;
        }

        // Case B: drag out of the tab's own group.
        if let Some(group) = group {
            let title_width = group_title_width(env.elements, group, env.config);
            let threshold = drag_out_threshold(tab_width, title_width, toward_end, env.config);
            if offset.abs() <= threshold {
                return false;
            }
            env.model.move_tab_out_of_group(id, toward_end);
            self.resync(env);
            self.animate_group_indicator(env, group);
            log::info!("tab {} removed from group {} by reorder", id.0, group.0);
            return true;
        }

        // The boundary cases below always have an adjacent grouped tab.
        let Some(adj) = adjacent else {
            return false;
        };
        let Some(adj_group) = env.model.group_of(adj) else {
            return false;
        };

        if env.model.is_group_collapsed(adj_group) {
            // Case C.1: hop over the collapsed group in one move.
            let title_width = group_title_width(env.elements, adj_group, env.config);
            let threshold = title_width * env.config.reorder.overlap_switch_fraction;
            if offset.abs() <= threshold {
                return false;
            }
            let count = env.model.group_member_count(adj_group);
            let dest = if toward_end {
                index + 1 + count
            } else {
                index.saturating_sub(count)
            };
            let displaced = ElementKey::GroupTitle(adj_group);
            let displaced_ideal = ideal_of(env.elements, displaced);
            env.model.move_tab(id, dest);
            self.resync(env);
            self.slide_to_ideal(env, &[(displaced, displaced_ideal)]);
            log::debug!("tab {} moved past collapsed group {}", id.0, adj_group.0);
        } else {
            // Case C.2: merge into the adjacent group.
            if offset.abs() <= drag_in_threshold(tab_width, env.config) {
                return false;
            }
            env.model.move_tab_into_group(id, adj_group);
            self.resync(env);
            self.animate_group_indicator(env, adj_group);
            log::info!("tab {} merged into group {} by reorder", id.0, adj_group.0);
        }
        true
    }

    fn update_group_position(
        &mut self,
        env: &mut ReorderEnv,
        group: GroupId,
        delta: f32,
        tab_width: f32,
        from_scroll: bool,
    ) {
        let rtl = env.viewport.rtl;
        let Some(title_index) = find_group_title(env.elements, group) else {
            return;
        };
        let old_ideal = env.elements[title_index].ideal_x();
        let mut offset = env.elements[title_index].offset_x() + delta;

        if self.reorder_group_if_threshold_reached(env, group, offset, tab_width) {
            offset = adjust_offset_after_reorder(
                env,
                ElementKey::GroupTitle(group),
                offset,
                delta,
                old_ideal,
                from_scroll,
            );
        }

        // Clamp the whole group to the scrollable region.
        let members = group_member_indices(env.model, group);
        if members.first() == Some(&0) {
            offset = if rtl { offset.min(0.0) } else { offset.max(0.0) };
        }
        if members.last().copied() == env.model.len().checked_sub(1) {
            offset = if rtl { offset.max(0.0) } else { offset.min(0.0) };
        }

        for element in env.elements.iter_mut() {
            let riding = match element {
                StripElement::GroupTitle(title) => title.group == group,
                StripElement::Tab(tab) => tab.group == Some(group),
            };
            if riding {
                element.set_offset_x(offset);
            }
        }
    }

    /// Threshold cases for a dragged group: hop an adjacent group, or
    /// swap with an adjacent ungrouped tab.
    fn reorder_group_if_threshold_reached(
        &mut self,
        env: &mut ReorderEnv,
        group: GroupId,
        offset: f32,
        tab_width: f32,
    ) -> bool {
        let toward_end = is_offset_toward_end(offset, env.viewport.rtl);
        let members = group_member_indices(env.model, group);
        let (Some(&first), Some(&last)) = (members.first(), members.last()) else {
            return false;
        };
        let adj_index = if toward_end {
            last + 1
        } else {
            match first.checked_sub(1) {
                Some(i) => i,
                None => return false,
            }
        };
        let Some(adj) = env.model.tab_at(adj_index) else {
            return false;
        };

        if let Some(adj_group) = env.model.group_of(adj) {
            let threshold = group_swap_threshold(env, adj_group);
            if offset.abs() <= threshold {
                return false;
            }
            let adj_members = group_member_indices(env.model, adj_group);
            let (Some(&adj_first), Some(&adj_last)) =
                (adj_members.first(), adj_members.last())
            else {
                return false;
            };
            let dest = if toward_end { adj_last + 1 } else { adj_first };

            // The adjacent group's views slide into the vacated space.
            let mut displaced = vec![(
                ElementKey::GroupTitle(adj_group),
                ideal_of(env.elements, ElementKey::GroupTitle(adj_group)),
            )];
            if !env.model.is_group_collapsed(adj_group) {
                for &i in &adj_members {
                    if let Some(tab) = env.model.tab_at(i) {
                        let key = ElementKey::Tab(tab);
                        displaced.push((key, ideal_of(env.elements, key)));
                    }
                }
            }
            env.model.move_group(group, dest);
            self.resync(env);
            self.slide_to_ideal(env, &displaced);
            log::debug!("group {} moved past group {}", group.0, adj_group.0);
        } else {
            if offset.abs() <= tab_swap_threshold(tab_width, env.config) {
                return false;
            }
            let dest = if toward_end { adj_index + 1 } else { adj_index };
            let displaced = ElementKey::Tab(adj);
            let displaced_ideal = ideal_of(env.elements, displaced);
            env.model.move_group(group, dest);
            self.resync(env);
            self.slide_to_ideal(env, &[(displaced, displaced_ideal)]);
            log::debug!("group {} swapped past tab {}", group.0, adj.0);
        }
        true
    }

    // ── Auto-scroll ──────────────────────────────────────────────────

    /// Periodic tick while a reorder is active. Nudges the scroll offset
    /// when the dragged element sits in an edge gutter, at most once per
    /// minimum interval.
    pub fn update_auto_scroll(&mut self, env: &mut ReorderEnv, time: u64) {
        if self.off_strip {
            return;
        }
        let Some(session) = self.session.as_ref() else {
            return;
        };
        if let Some(last) = session.last_scroll_time {
            if time.saturating_sub(last) < env.config.reorder.min_autoscroll_interval_ms {
                return;
            }
        }
        let Some(index) = find_element(env.elements, session.interacting) else {
            return;
        };
        let x = env.elements[index].draw_x();
        let width = env.elements[index].width();
        let ratio =
            autoscroll::drag_speed_ratio(session, x, width, &env.viewport, env.config);

        let Some(session) = self.session.as_mut() else {
            return;
        };
        if ratio == 0.0 {
            session.last_scroll_time = None;
            return;
        }
        let delta_sec = session
            .last_scroll_time
            .map(|last| time.saturating_sub(last) as f32 / 1000.0);
        session.last_scroll_time = Some(time);
        // First tick in the gutter only arms the timer.
        let Some(delta_sec) = delta_sec else {
            return;
        };

        let nudge = env.config.reorder.edge_scroll_max_speed * ratio * delta_sec;
        let applied = env.scroll.scroll_by(nudge);
        if applied == 0.0 {
            return;
        }
        if env.scroll.is_finished() {
            // The strip slid under the stationary pointer: feed the
            // dragged element the countering visual delta so it stays
            // put while its neighbors flow past.
            let visual = from_logical_delta(-applied, env.viewport.rtl);
            self.apply_position_update(env, visual, true);
        }
        self.relayout(env);
        env.host.request_update();
    }

    // ── Stop ─────────────────────────────────────────────────────────

    /// Ends the active session. All trailing margins and drag offsets
    /// animate back to rest. Idempotent.
    pub fn stop_reorder(&mut self, env: &mut ReorderEnv) {
        let Some(session) = self.session.take() else {
            return;
        };
        self.off_strip = false;
        env.host.finish_animations();
        self.set_start_margin(env, 0.0);

        let mut animations = Vec::new();
        for element in env.elements.iter_mut() {
            if element.trailing_margin() != 0.0 {
                animations.push(Animation::new(
                    element.key(),
                    AnimatedProperty::TrailingMargin,
                    element.trailing_margin(),
                    0.0,
                    env.config.reorder.slide_duration_ms,
                ));
            }
        }
        match session.interacting {
            ElementKey::Tab(id) => {
                if let Some(index) = find_tab(env.elements, id) {
                    animations.push(Animation::new(
                        ElementKey::Tab(id),
                        AnimatedProperty::OffsetX,
                        env.elements[index].offset_x(),
                        0.0,
                        env.config.reorder.move_duration_ms,
                    ));
                    animations.push(Animation::new(
                        ElementKey::Tab(id),
                        AnimatedProperty::Lift,
                        1.0,
                        0.0,
                        env.config.reorder.attach_duration_ms,
                    ));
                    if let Some(tab) = env.elements[index].as_tab_mut() {
                        tab.reordering = false;
                        tab.dragged_off_strip = false;
                    }
                }
            }
            ElementKey::GroupTitle(group) => {
                let selected = env.model.selected_tab();
                for element in env.elements.iter() {
                    let riding = match element {
                        StripElement::GroupTitle(title) => title.group == group,
                        StripElement::Tab(tab) => tab.group == Some(group),
                    };
                    if !riding {
                        continue;
                    }
                    if element.offset_x() != 0.0 {
                        animations.push(Animation::new(
                            element.key(),
                            AnimatedProperty::OffsetX,
                            element.offset_x(),
                            0.0,
                            env.config.reorder.move_duration_ms,
                        ));
                    }
                    if let Some(tab) = element.as_tab() {
                        if selected == Some(tab.id) && !tab.attached {
                            animations.push(Animation::new(
                                ElementKey::Tab(tab.id),
                                AnimatedProperty::Lift,
                                1.0,
                                0.0,
                                env.config.reorder.attach_duration_ms,
                            ));
                        }
                    }
                }
            }
        }

        env.host
            .start_animations(animations, Some(CompletionEvent::ReorderVisualsSettled));
        self.relayout(env);
        env.host.request_update();
        log::debug!("reorder stopped");
    }

    // ── Shared helpers ───────────────────────────────────────────────

    /// Reserves drag headroom at the strip edges when the first or last
    /// tab is grouped, so an edge tab can still leave its group.
    fn set_edge_margins(&mut self, env: &mut ReorderEnv) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let margin = env.config.half_tab_width(session.tab_width)
            * env.config.reorder.overlap_switch_fraction;

        let first_grouped = env
            .model
            .tab_at(0)
            .and_then(|id| env.model.group_of(id))
            .is_some();
        self.set_start_margin(env, if first_grouped { margin } else { 0.0 });

        let last_grouped = env
            .model
            .len()
            .checked_sub(1)
            .and_then(|i| env.model.tab_at(i))
            .and_then(|id| env.model.group_of(id))
            .is_some();
        let trailing = if last_grouped { margin } else { 0.0 };
        if let Some(element) = env
            .elements
            .iter_mut()
            .rev()
            .find(|el| el.as_tab().is_some())
        {
            element.set_trailing_margin(trailing);
        }
    }

    /// Changes the reorder start margin, scrolling by the difference so
    /// the content does not visually jump.
    fn set_start_margin(&mut self, env: &mut ReorderEnv, margin: f32) {
        let old = env.scroll.reorder_start_margin();
        if (margin - old).abs() <= f32::EPSILON {
            return;
        }
        env.scroll.set_reorder_start_margin(margin);
        env.scroll.scroll_by(old - margin);
    }

    /// Rebuilds the element sequence from the model and lays it out.
    fn resync(&mut self, env: &mut ReorderEnv) {
        rebuild_elements(env.elements, env.model, env.tab_width, env.config);
        self.relayout(env);
    }

    fn relayout(&mut self, env: &mut ReorderEnv) {
        relayout(
            env.elements,
            env.scroll,
            &env.viewport,
            env.tab_width,
            env.config,
            true,
        );
    }

    /// Starts slide-back animations for views displaced by a reorder,
    /// from their pre-move ideal positions.
    fn slide_to_ideal(&mut self, env: &mut ReorderEnv, displaced: &[(ElementKey, f32)]) {
        let mut animations = Vec::new();
        for &(key, old_ideal) in displaced {
            let Some(index) = find_element(env.elements, key) else {
                continue;
            };
            let from = old_ideal - env.elements[index].ideal_x();
            if from == 0.0 {
                continue;
            }
            env.elements[index].set_offset_x(from);
            animations.push(Animation::new(
                key,
                AnimatedProperty::OffsetX,
                from,
                0.0,
                env.config.reorder.move_duration_ms,
            ));
        }
        env.host.start_animations(animations, None);
    }

    /// Animates a group's bottom indicator to match its new member count.
    fn animate_group_indicator(&mut self, env: &mut ReorderEnv, group: GroupId) {
        let count = env.model.group_member_count(group);
        if count == 0 {
            return;
        }
        let Some(index) = find_group_title(env.elements, group) else {
            return;
        };
        let Some(title) = env.elements[index].as_group_title() else {
            return;
        };
        let from = title.bottom_indicator_width;
        let to = bottom_indicator_width(count, title.width, env.tab_width, env.config);
        if from == to {
            return;
        }
        env.host.start_animations(
            vec![Animation::new(
                ElementKey::GroupTitle(group),
                AnimatedProperty::BottomIndicatorWidth,
                from,
                to,
                env.config.reorder.slide_duration_ms,
            )],
            None,
        );
    }
}

/// Compensates the drag offset so a committed reorder produces no
/// apparent movement of the dragged element.
///
/// The recomputed ideal position already reflects the new order plus any
/// scroll or margin change made while committing. When the delta itself
/// came from an auto-scroll nudge it is also already in the ideal
/// position, so it is backed out once.
fn adjust_offset_after_reorder(
    env: &ReorderEnv,
    key: ElementKey,
    offset: f32,
    delta: f32,
    old_ideal: f32,
    from_scroll: bool,
) -> f32 {
    let mut offset = offset + (old_ideal - ideal_of(env.elements, key));
    if from_scroll {
        offset -= delta;
    }
    offset
}

// ── Thresholds ───────────────────────────────────────────────────────

fn tab_swap_threshold(tab_width: f32, config: &StripConfig) -> f32 {
    config.effective_tab_width(tab_width) * config.reorder.overlap_switch_fraction
}

fn drag_in_threshold(tab_width: f32, config: &StripConfig) -> f32 {
    config.half_tab_width(tab_width) * config.reorder.overlap_switch_fraction
}

/// Leaving toward the group's start also crosses the title, so that side
/// gets the title's width added on top of the base threshold.
fn drag_out_threshold(tab_width: f32, title_width: f32, toward_end: bool, config: &StripConfig) -> f32 {
    drag_in_threshold(tab_width, config) + if toward_end { 0.0 } else { title_width }
}

fn group_swap_threshold(env: &ReorderEnv, adj_group: GroupId) -> f32 {
    let fraction = env.config.reorder.overlap_switch_fraction;
    let Some(index) = find_group_title(env.elements, adj_group) else {
        return f32::INFINITY;
    };
    let Some(title) = env.elements[index].as_group_title() else {
        return f32::INFINITY;
    };
    if env.model.is_group_collapsed(adj_group) {
        title.width * fraction
    } else {
        (title.bottom_indicator_width + env.config.layout.group_indicator_inset) * fraction
    }
}

/// Width of a group's bottom indicator for a given member count.
pub fn bottom_indicator_width(
    member_count: usize,
    title_width: f32,
    tab_width: f32,
    config: &StripConfig,
) -> f32 {
    config.effective_tab_width(tab_width) * member_count as f32
        - config.layout.group_indicator_inset
        + title_width
}

// ── Lookup helpers ───────────────────────────────────────────────────

fn find_element(elements: &[StripElement], key: ElementKey) -> Option<usize> {
    elements.iter().position(|el| el.key() == key)
}

fn ideal_of(elements: &[StripElement], key: ElementKey) -> f32 {
    find_element(elements, key)
        .map(|i| elements[i].ideal_x())
        .unwrap_or(0.0)
}

fn group_title_width(elements: &[StripElement], group: GroupId, config: &StripConfig) -> f32 {
    find_group_title(elements, group)
        .and_then(|i| elements[i].as_group_title())
        .map(|t| t.width)
        .unwrap_or(config.layout.group_title_width)
}

fn group_member_indices(model: &dyn TabCollection, group: GroupId) -> Vec<usize> {
    (0..model.len())
        .filter(|&i| {
            model
                .tab_at(i)
                .and_then(|id| model.group_of(id))
                == Some(group)
        })
        .collect()
}

fn last_tab_trailing_margin(elements: &[StripElement]) -> f32 {
    elements
        .iter()
        .rev()
        .find(|el| el.as_tab().is_some())
        .map(|el| el.trailing_margin())
        .unwrap_or(0.0)
}

#[cfg(test)]
#[path = "../../../tests/unit/reorder_engine.rs"]
mod tests;
