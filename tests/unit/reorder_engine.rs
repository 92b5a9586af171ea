use super::*;
use crate::config::StripConfig;
use crate::strip::animation::{Animation, AnimationHost, CompletionEvent};
use crate::strip::collection::{TabCollection, VecTabCollection};
use crate::strip::element::tab_ids;
use crate::strip::layout::Viewport;
use crate::strip::scroll::ScrollController;

#[derive(Default)]
struct RecordingHost {
    batches: Vec<(Vec<Animation>, Option<CompletionEvent>)>,
    updates: usize,
    haptics: usize,
}

impl AnimationHost for RecordingHost {
    fn start_animations(&mut self, animations: Vec<Animation>, on_complete: Option<CompletionEvent>) {
        self.batches.push((animations, on_complete));
    }
    fn finish_animations(&mut self) {}
    fn request_update(&mut self) {
        self.updates += 1;
    }
    fn haptic_feedback(&mut self) {
        self.haptics += 1;
    }
}

struct Fixture {
    engine: ReorderEngine,
    model: VecTabCollection,
    elements: Vec<StripElement>,
    scroll: ScrollController,
    host: RecordingHost,
    config: StripConfig,
    viewport: Viewport,
    tab_width: f32,
    pointer_x: f32,
}

impl Fixture {
    /// Tabs of width 100 with zero overlap, so the swap threshold is 53,
    /// the drag-in threshold 26.5, and the drag-out-toward-start
    /// threshold 26.5 + 48 (the title width).
    fn new(tabs: &[(u64, Option<u64>)]) -> Self {
        let mut config = StripConfig::default();
        config.layout.tab_overlap = 0.0;
        config.layout.group_title_overlap = 0.0;

        let mut model = VecTabCollection::new();
        for &(id, group) in tabs {
            model.push_tab(TabId(id), group.map(GroupId));
        }
        let mut fixture = Self {
            engine: ReorderEngine::new(),
            model,
            elements: Vec::new(),
            scroll: ScrollController::new(),
            host: RecordingHost::default(),
            config,
            viewport: Viewport {
                width: 2000.0,
                left_margin: 0.0,
                right_margin: 0.0,
                rtl: false,
            },
            tab_width: 100.0,
            pointer_x: 0.0,
        };
        fixture.refresh();
        fixture
    }

    fn refresh(&mut self) {
        rebuild_elements(&mut self.elements, &self.model, self.tab_width, &self.config);
        relayout(
            &mut self.elements,
            &mut self.scroll,
            &self.viewport,
            self.tab_width,
            &self.config,
            self.engine.in_reorder(),
        );
    }

    fn with_env<R>(&mut self, f: impl FnOnce(&mut ReorderEngine, &mut ReorderEnv) -> R) -> R {
        let mut env = ReorderEnv {
            elements: &mut self.elements,
            scroll: &mut self.scroll,
            model: &mut self.model,
            host: &mut self.host,
            config: &self.config,
            viewport: self.viewport,
            tab_width: self.tab_width,
        };
        f(&mut self.engine, &mut env)
    }

    fn start(&mut self, key: ElementKey, x: f32) {
        self.pointer_x = x;
        self.with_env(|engine, env| engine.start_reorder(env, key, x));
    }

    fn drag_to(&mut self, x: f32) {
        let delta = x - self.pointer_x;
        self.pointer_x = x;
        self.with_env(|engine, env| {
            engine.update_reorder_position(env, x, delta, ReorderType::DragWithinStrip)
        });
        let in_reorder = self.engine.in_reorder();
        relayout(
            &mut self.elements,
            &mut self.scroll,
            &self.viewport,
            self.tab_width,
            &self.config,
            in_reorder,
        );
    }

    fn tick(&mut self, time: u64) {
        self.with_env(|engine, env| engine.update_auto_scroll(env, time));
    }

    fn stop(&mut self) {
        self.with_env(|engine, env| engine.stop_reorder(env));
    }

    fn model_order(&self) -> Vec<u64> {
        (0..self.model.len())
            .filter_map(|i| self.model.tab_at(i))
            .map(|id| id.0)
            .collect()
    }

    fn element_order(&self) -> Vec<u64> {
        tab_ids(&self.elements).into_iter().map(|id| id.0).collect()
    }

    fn assert_group_contiguity(&self) {
        let mut seen: Vec<GroupId> = Vec::new();
        let mut last: Option<GroupId> = None;
        for element in &self.elements {
            match element {
                StripElement::GroupTitle(title) => {
                    assert!(
                        !seen.contains(&title.group),
                        "group {} appears twice",
                        title.group.0
                    );
                    seen.push(title.group);
                    last = Some(title.group);
                }
                StripElement::Tab(tab) => match tab.group {
                    Some(g) => assert_eq!(
                        last,
                        Some(g),
                        "tab {} not contiguous with its group",
                        tab.id.0
                    ),
                    None => last = None,
                },
            }
        }
    }
}

struct UninitializedCollection;

impl TabCollection for UninitializedCollection {
    fn len(&self) -> usize {
        0
    }
    fn is_initialized(&self) -> bool {
        false
    }
    fn tab_at(&self, _: usize) -> Option<TabId> {
        None
    }
    fn index_of_tab(&self, _: TabId) -> Option<usize> {
        None
    }
    fn group_of(&self, _: TabId) -> Option<GroupId> {
        None
    }
    fn group_member_count(&self, _: GroupId) -> usize {
        0
    }
    fn is_group_collapsed(&self, _: GroupId) -> bool {
        false
    }
    fn selected_tab(&self) -> Option<TabId> {
        None
    }
    fn select_tab(&mut self, _: TabId) {}
    fn move_tab(&mut self, _: TabId, _: usize) {}
    fn move_tab_into_group(&mut self, _: TabId, _: GroupId) {}
    fn move_tab_out_of_group(&mut self, _: TabId, _: bool) {}
    fn move_group(&mut self, _: GroupId, _: usize) {}
}

// ── Session lifecycle ────────────────────────────────────────────────

#[test]
fn start_selects_and_lifts_the_tab() {
    let mut f = Fixture::new(&[(1, None), (2, None)]);
    f.start(ElementKey::Tab(TabId(2)), 150.0);

    assert!(f.engine.in_reorder());
    assert_eq!(f.engine.interacting(), Some(ElementKey::Tab(TabId(2))));
    assert_eq!(f.model.selected_tab(), Some(TabId(2)));
    assert_eq!(f.host.haptics, 1);
    assert!(f.host.updates > 0);
    let tab = f.elements[1].as_tab().unwrap();
    assert!(tab.reordering && !tab.attached);
}

#[test]
fn second_start_is_ignored_while_active() {
    let mut f = Fixture::new(&[(1, None), (2, None)]);
    f.start(ElementKey::Tab(TabId(1)), 50.0);
    f.start(ElementKey::Tab(TabId(2)), 150.0);

    assert_eq!(f.engine.interacting(), Some(ElementKey::Tab(TabId(1))));
    assert_eq!(f.host.haptics, 1);
}

#[test]
fn start_requires_initialized_model() {
    let mut f = Fixture::new(&[(1, None)]);
    let mut model = UninitializedCollection;
    let mut env = ReorderEnv {
        elements: &mut f.elements,
        scroll: &mut f.scroll,
        model: &mut model,
        host: &mut f.host,
        config: &f.config,
        viewport: f.viewport,
        tab_width: f.tab_width,
    };
    f.engine.start_reorder(&mut env, ElementKey::Tab(TabId(1)), 50.0);
    assert!(!f.engine.in_reorder());
}

#[test]
fn start_skips_dying_tab() {
    let mut f = Fixture::new(&[(1, None), (2, None)]);
    f.elements[0].as_tab_mut().unwrap().dying = true;
    f.start(ElementKey::Tab(TabId(1)), 50.0);
    assert!(!f.engine.in_reorder());
}

#[test]
fn stop_is_idempotent() {
    let mut f = Fixture::new(&[(1, None), (2, None)]);
    f.start(ElementKey::Tab(TabId(1)), 50.0);
    f.stop();
    let batches = f.host.batches.len();
    f.stop();
    assert_eq!(f.host.batches.len(), batches);
    assert!(!f.engine.in_reorder());
}

// ── Plain swaps ──────────────────────────────────────────────────────

#[test]
fn swap_requires_crossing_the_threshold() {
    let mut f = Fixture::new(&[(1, None), (2, None), (3, None)]);
    f.start(ElementKey::Tab(TabId(2)), 150.0);

    // Clearly below the ~53dp threshold: no swap yet.
    f.drag_to(202.0);
    assert_eq!(f.model_order(), vec![1, 2, 3]);

    // Clearly past it: exactly one swap.
    f.drag_to(204.0);
    assert_eq!(f.model_order(), vec![1, 3, 2]);
    assert_eq!(f.element_order(), vec![1, 3, 2]);
}

#[test]
fn displaced_tab_slides_back() {
    let mut f = Fixture::new(&[(1, None), (2, None), (3, None)]);
    f.start(ElementKey::Tab(TabId(2)), 150.0);
    f.host.batches.clear();
    f.drag_to(210.0);

    // The displaced tab starts offset by a full slot and animates home.
    let slide = f
        .host
        .batches
        .iter()
        .flat_map(|(animations, _)| animations)
        .find(|a| a.target == ElementKey::Tab(TabId(3)))
        .expect("no slide animation for displaced tab");
    assert_eq!(slide.property, AnimatedProperty::OffsetX);
    assert_eq!(slide.to, 0.0);
    assert_eq!(slide.from, 100.0);
}

#[test]
fn swap_back_restores_order() {
    let mut f = Fixture::new(&[(1, None), (2, None), (3, None)]);
    f.start(ElementKey::Tab(TabId(2)), 150.0);
    f.drag_to(210.0);
    assert_eq!(f.model_order(), vec![1, 3, 2]);
    f.drag_to(130.0);
    assert_eq!(f.model_order(), vec![1, 2, 3]);
}

#[test]
fn sub_dp_moves_are_accumulated() {
    let mut f = Fixture::new(&[(1, None), (2, None), (3, None)]);
    f.start(ElementKey::Tab(TabId(2)), 150.0);
    for i in 1..=5 {
        f.drag_to(150.0 + i as f32 * 0.1);
    }
    // Half a dp of total motion: nothing processed, offset still zero.
    let index = crate::strip::element::find_tab(&f.elements, TabId(2)).unwrap();
    assert_eq!(f.elements[index].offset_x(), 0.0);
}

#[test]
fn first_tab_cannot_leave_the_strip_start() {
    let mut f = Fixture::new(&[(1, None), (2, None), (3, None)]);
    f.start(ElementKey::Tab(TabId(1)), 50.0);
    f.drag_to(-100.0);
    let index = crate::strip::element::find_tab(&f.elements, TabId(1)).unwrap();
    assert_eq!(f.elements[index].offset_x(), 0.0);
    assert_eq!(f.model_order(), vec![1, 2, 3]);
}

#[test]
fn rtl_swap_moves_toward_visual_left() {
    let mut f = Fixture::new(&[(1, None), (2, None), (3, None)]);
    f.viewport.rtl = true;
    f.refresh();
    f.start(ElementKey::Tab(TabId(2)), 1850.0);

    // Visually leftward is toward the end of an RTL strip.
    f.drag_to(1790.0);
    assert_eq!(f.model_order(), vec![1, 3, 2]);
    f.assert_group_contiguity();
}

// ── Group membership changes ─────────────────────────────────────────

#[test]
fn merge_into_adjacent_group_at_drag_in_threshold() {
    let mut f = Fixture::new(&[(1, None), (2, Some(7)), (3, Some(7))]);
    f.start(ElementKey::Tab(TabId(1)), 50.0);

    f.drag_to(76.0);
    assert_eq!(f.model.group_of(TabId(1)), None);

    f.drag_to(78.0);
    assert_eq!(f.model.group_of(TabId(1)), Some(GroupId(7)));
    assert_eq!(f.model.group_member_count(GroupId(7)), 3);
    f.assert_group_contiguity();

    // The group indicator animates to its three-member width.
    let indicator = f
        .host
        .batches
        .iter()
        .flat_map(|(animations, _)| animations)
        .find(|a| a.property == AnimatedProperty::BottomIndicatorWidth)
        .expect("no indicator animation");
    assert_eq!(
        indicator.to,
        bottom_indicator_width(3, 48.0, 100.0, &f.config)
    );
}

#[test]
fn merge_does_not_repeat_within_the_threshold_band() {
    let mut f = Fixture::new(&[(1, None), (2, Some(7)), (3, Some(7))]);
    f.start(ElementKey::Tab(TabId(1)), 50.0);
    f.drag_to(78.0);
    let merges = f
        .host
        .batches
        .iter()
        .flat_map(|(animations, _)| animations)
        .filter(|a| a.property == AnimatedProperty::BottomIndicatorWidth)
        .count();

    f.drag_to(80.0);
    f.drag_to(82.0);
    let after = f
        .host
        .batches
        .iter()
        .flat_map(|(animations, _)| animations)
        .filter(|a| a.property == AnimatedProperty::BottomIndicatorWidth)
        .count();
    assert_eq!(after, merges);
    assert_eq!(f.model.group_member_count(GroupId(7)), 3);
}

#[test]
fn eject_last_member_deletes_the_group() {
    let mut f = Fixture::new(&[(1, Some(5)), (2, None)]);
    f.start(ElementKey::Tab(TabId(1)), 80.0);

    f.drag_to(110.0);
    assert_eq!(f.model.group_of(TabId(1)), None);
    assert_eq!(f.model.take_emptied_groups(), vec![GroupId(5)]);
    assert!(crate::strip::element::find_group_title(&f.elements, GroupId(5)).is_none());
}

#[test]
fn eject_toward_start_also_crosses_the_title() {
    let mut f = Fixture::new(&[(2, None), (1, Some(5))]);
    f.start(ElementKey::Tab(TabId(1)), 180.0);

    // Base threshold alone is not enough when leaving past the title.
    f.drag_to(120.0);
    assert_eq!(f.model.group_of(TabId(1)), Some(GroupId(5)));

    // 26.5 + 48 = 74.5 from the grab point.
    f.drag_to(100.0);
    assert_eq!(f.model.group_of(TabId(1)), None);
}

#[test]
fn collapsed_group_is_hopped_in_one_move() {
    let mut f = Fixture::new(&[(1, None), (2, Some(7)), (3, Some(7)), (4, None)]);
    f.model.set_group_collapsed(GroupId(7), true);
    f.refresh();
    f.start(ElementKey::Tab(TabId(1)), 50.0);

    // Collapsed threshold is the title width scaled: 48 * 0.53 = 25.44.
    f.drag_to(80.0);
    assert_eq!(f.model_order(), vec![2, 3, 1, 4]);
    assert_eq!(f.model.group_of(TabId(1)), None);
    f.assert_group_contiguity();
}

// ── Whole-group drags ────────────────────────────────────────────────

#[test]
fn group_swaps_past_an_ungrouped_tab() {
    let mut f = Fixture::new(&[(1, Some(3)), (2, Some(3)), (4, None)]);
    f.start(ElementKey::GroupTitle(GroupId(3)), 30.0);

    f.drag_to(90.0);
    assert_eq!(f.model_order(), vec![4, 1, 2]);
    f.assert_group_contiguity();
}

#[test]
fn group_offsets_apply_to_title_and_members() {
    let mut f = Fixture::new(&[(1, Some(3)), (2, Some(3)), (4, None), (5, None)]);
    f.start(ElementKey::GroupTitle(GroupId(3)), 30.0);
    f.drag_to(50.0);

    for element in f.elements.iter().take(3) {
        assert_eq!(element.offset_x(), 20.0);
    }
    assert_eq!(f.elements[3].offset_x(), 0.0);
}

#[test]
fn group_hops_an_adjacent_group() {
    let mut f = Fixture::new(&[(1, Some(3)), (2, Some(3)), (4, Some(6)), (5, Some(6))]);
    f.start(ElementKey::GroupTitle(GroupId(3)), 30.0);

    // Expanded threshold: (indicator 244 + inset 4) * 0.53 = 131.44.
    f.drag_to(160.0);
    assert_eq!(f.model_order(), vec![1, 2, 4, 5]);

    f.drag_to(165.0);
    assert_eq!(f.model_order(), vec![4, 5, 1, 2]);
    f.assert_group_contiguity();
}

#[test]
fn leading_group_cannot_drag_past_the_start() {
    let mut f = Fixture::new(&[(1, Some(3)), (2, Some(3)), (4, None)]);
    f.start(ElementKey::GroupTitle(GroupId(3)), 30.0);
    f.drag_to(-20.0);
    assert_eq!(f.elements[0].offset_x(), 0.0);
}

// ── Edge margins ─────────────────────────────────────────────────────

#[test]
fn grouped_edges_get_reorder_margins() {
    let mut f = Fixture::new(&[(1, Some(5)), (2, None), (3, Some(6))]);
    f.start(ElementKey::Tab(TabId(2)), 150.0);

    // half tab width 50 * 0.53 on each grouped edge.
    assert!((f.scroll.reorder_start_margin() - 26.5).abs() < 1e-4);
    let last_tab = f
        .elements
        .iter()
        .rev()
        .find(|el| el.as_tab().is_some())
        .unwrap();
    assert!((last_tab.trailing_margin() - 26.5).abs() < 1e-4);
}

#[test]
fn stop_resets_margins_and_animates_offsets_home() {
    let mut f = Fixture::new(&[(1, Some(5)), (2, None), (3, Some(6))]);
    f.start(ElementKey::Tab(TabId(2)), 150.0);
    f.drag_to(170.0);
    f.host.batches.clear();
    f.stop();

    assert_eq!(f.scroll.reorder_start_margin(), 0.0);
    let (animations, on_complete) = f.host.batches.last().expect("no stop batch");
    assert_eq!(*on_complete, Some(CompletionEvent::ReorderVisualsSettled));
    assert!(animations
        .iter()
        .any(|a| a.property == AnimatedProperty::TrailingMargin && a.to == 0.0));
    assert!(animations
        .iter()
        .any(|a| a.target == ElementKey::Tab(TabId(2))
            && a.property == AnimatedProperty::OffsetX
            && a.to == 0.0));
    assert!(!f.elements[2].as_tab().unwrap().reordering);
}

// ── Auto-scroll ──────────────────────────────────────────────────────

fn overflowing_fixture() -> Fixture {
    let mut f = Fixture::new(
        &(1..=20)
            .map(|id| (id, None))
            .collect::<Vec<_>>(),
    );
    f.viewport.width = 600.0;
    f.refresh();
    f.scroll.set_offset(-700.0);
    f.refresh();
    f
}

#[test]
fn auto_scroll_honors_the_minimum_interval() {
    let mut f = overflowing_fixture();
    f.config.reorder.min_autoscroll_interval_ms = 16;
    // Tab 8 draws at x = 0 with the strip scrolled by -700.
    f.start(ElementKey::Tab(TabId(8)), 50.0);
    f.drag_to(45.0);
    let base = f.scroll.offset();

    let mut nudges = 0;
    for t in 0..10 {
        let before = f.scroll.offset();
        f.tick(t);
        if f.scroll.offset() != before {
            nudges += 1;
        }
    }
    assert_eq!(nudges, 0, "nudged within the minimum interval");
    assert_eq!(f.scroll.offset(), base);

    f.tick(16);
    assert!(f.scroll.offset() > base);
}

#[test]
fn auto_scroll_nudges_once_per_interval() {
    let mut f = overflowing_fixture();
    f.config.reorder.min_autoscroll_interval_ms = 4;
    f.start(ElementKey::Tab(TabId(8)), 50.0);
    f.drag_to(45.0);

    let mut nudges = 0;
    for t in 0..10 {
        let before = f.scroll.offset();
        f.tick(t);
        if f.scroll.offset() != before {
            nudges += 1;
        }
    }
    assert_eq!(nudges, 2);
}

#[test]
fn auto_scroll_requires_a_drag_in_that_direction() {
    let mut f = overflowing_fixture();
    // Only ever dragged right; the left gutter stays locked.
    f.start(ElementKey::Tab(TabId(8)), 50.0);
    f.drag_to(55.0);
    let base = f.scroll.offset();
    f.tick(0);
    f.tick(100);
    assert_eq!(f.scroll.offset(), base);
}

#[test]
fn off_strip_drag_pauses_auto_scroll() {
    let mut f = overflowing_fixture();
    f.start(ElementKey::Tab(TabId(8)), 50.0);
    f.drag_to(45.0);
    f.tick(0);
    f.tick(16);
    let scrolled = f.scroll.offset();
    assert!(scrolled > -700.0);

    // The drag leaves the strip: the tab hides and the gutter goes quiet.
    f.with_env(|engine, env| {
        engine.update_reorder_position(env, 45.0, 0.0, ReorderType::DragOutOfStrip)
    });
    let index = find_tab(&f.elements, TabId(8)).unwrap();
    assert!(f.elements[index].as_tab().unwrap().dragged_off_strip);
    f.tick(48);
    f.tick(80);
    assert_eq!(f.scroll.offset(), scrolled);

    // Re-entering shows the tab again and resumes edge scrolling.
    f.with_env(|engine, env| {
        engine.update_reorder_position(env, 45.0, 0.0, ReorderType::DragOntoStrip)
    });
    let index = find_tab(&f.elements, TabId(8)).unwrap();
    assert!(!f.elements[index].as_tab().unwrap().dragged_off_strip);
    f.tick(96);
    assert!(f.scroll.offset() > scrolled);
}

#[test]
fn leaving_the_gutter_disarms_the_timer() {
    let mut f = overflowing_fixture();
    f.start(ElementKey::Tab(TabId(8)), 50.0);
    f.drag_to(45.0);
    f.tick(0);

    // Drag back to the middle of the strip, wait, then return.
    f.drag_to(300.0);
    f.tick(100);
    let base = f.scroll.offset();
    f.drag_to(45.0);
    // First tick back in the gutter arms the timer and must not jump by
    // the full elapsed time.
    f.tick(200);
    assert_eq!(f.scroll.offset(), base);
}
