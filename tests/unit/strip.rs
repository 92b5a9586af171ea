use super::*;
use crate::config::StripConfig;
use crate::strip::collection::VecTabCollection;
use crate::strip::element::tab_ids;

#[derive(Default)]
struct RecordingHost {
    batches: Vec<(Vec<Animation>, Option<CompletionEvent>)>,
    haptics: usize,
}

impl AnimationHost for RecordingHost {
    fn start_animations(&mut self, animations: Vec<Animation>, on_complete: Option<CompletionEvent>) {
        self.batches.push((animations, on_complete));
    }
    fn finish_animations(&mut self) {}
    fn request_update(&mut self) {}
    fn haptic_feedback(&mut self) {
        self.haptics += 1;
    }
}

fn viewport(width: f32) -> Viewport {
    Viewport {
        width,
        left_margin: 0.0,
        right_margin: 0.0,
        rtl: false,
    }
}

fn strip_with_tabs(count: u64, width: f32) -> (Strip, VecTabCollection) {
    let mut model = VecTabCollection::new();
    for id in 1..=count {
        model.push_tab(TabId(id), None);
    }
    let mut strip = Strip::new(StripConfig::default(), viewport(width));
    strip.sync(&model);
    (strip, model)
}

#[test]
fn sync_inserts_titles_before_group_members() {
    let mut model = VecTabCollection::new();
    model.push_tab(TabId(1), None);
    model.push_tab(TabId(2), Some(GroupId(7)));
    model.push_tab(TabId(3), Some(GroupId(7)));
    let mut strip = Strip::new(StripConfig::default(), viewport(1200.0));
    strip.sync(&model);

    let kinds: Vec<&str> = strip
        .elements()
        .iter()
        .map(|el| match el {
            StripElement::Tab(_) => "tab",
            StripElement::GroupTitle(_) => "title",
        })
        .collect();
    assert_eq!(kinds, vec!["tab", "title", "tab", "tab"]);
    assert_eq!(
        tab_ids(strip.elements()),
        vec![TabId(1), TabId(2), TabId(3)]
    );
}

#[test]
fn sync_adapts_tab_width_to_the_viewport() {
    let (strip, _) = strip_with_tabs(3, 600.0);
    // (600 + 24 * 2) / 3 = 216, within the clamp range.
    assert_eq!(strip.tab_width(), 216.0);
    for element in strip.elements() {
        assert_eq!(element.width(), 216.0);
    }

    let (crowded, _) = strip_with_tabs(30, 600.0);
    assert_eq!(crowded.tab_width(), 108.0);
}

#[test]
fn ideal_positions_are_idempotent_across_syncs() {
    let (mut strip, model) = strip_with_tabs(5, 800.0);
    let first: Vec<f32> = strip.elements().iter().map(|el| el.ideal_x()).collect();
    strip.sync(&model);
    let second: Vec<f32> = strip.elements().iter().map(|el| el.ideal_x()).collect();
    assert_eq!(first, second);
}

#[test]
fn long_press_starts_reorder_on_the_hit_tab() {
    let (mut strip, mut model) = strip_with_tabs(3, 600.0);
    let mut host = RecordingHost::default();

    // Second tab spans [192, 408) at width 216 with 24 overlap.
    strip.on_long_press(0, 300.0, &mut model, &mut host);
    assert!(strip.in_reorder());
    assert_eq!(host.haptics, 1);
    assert_eq!(model.selected_tab(), Some(TabId(2)));
}

#[test]
fn long_press_on_empty_space_is_ignored() {
    let (mut strip, mut model) = strip_with_tabs(2, 1200.0);
    let mut host = RecordingHost::default();
    strip.on_long_press(0, 1100.0, &mut model, &mut host);
    assert!(!strip.in_reorder());
}

#[test]
fn drag_scrolls_an_overflowing_strip() {
    let (mut strip, mut model) = strip_with_tabs(20, 600.0);
    let mut host = RecordingHost::default();
    assert_eq!(strip.scroll_offset(), 0.0);

    strip.drag(0, 300.0, -150.0, ReorderType::DragWithinStrip, &mut model, &mut host);
    assert_eq!(strip.scroll_offset(), -150.0);

    // Dragging past the start clamps at zero.
    strip.drag(0, 300.0, 500.0, ReorderType::DragWithinStrip, &mut model, &mut host);
    assert_eq!(strip.scroll_offset(), 0.0);
}

#[test]
fn fling_coasts_and_settles() {
    let (mut strip, mut model) = strip_with_tabs(20, 600.0);
    let mut host = RecordingHost::default();
    strip.fling(0, -400.0, &mut host);

    let mut time = 0;
    while strip.update(time, &mut model, &mut host) {
        time += 16;
        assert!(time < 10_000, "fling never settled");
    }
    assert!(strip.scroll_offset() < 0.0);
}

#[test]
fn down_interrupts_a_fling() {
    let (mut strip, mut model) = strip_with_tabs(20, 600.0);
    let mut host = RecordingHost::default();
    strip.fling(0, -400.0, &mut host);
    strip.update(16, &mut model, &mut host);
    let at_touch = strip.scroll_offset();

    strip.on_down(20, 300.0);
    strip.update(32, &mut model, &mut host);
    assert_eq!(strip.scroll_offset(), at_touch);
}

#[test]
fn closed_tab_stays_until_its_animation_settles() {
    let (mut strip, mut model) = strip_with_tabs(3, 600.0);
    let mut host = RecordingHost::default();

    strip.tab_closed(TabId(2), &mut host);
    model.remove_tab(TabId(2));

    // Still drawn, but dying and slated for removal on completion.
    assert_eq!(strip.elements().len(), 3);
    assert!(strip.elements()[1].as_tab().unwrap().dying);
    let (_, on_complete) = host.batches.last().unwrap();
    assert_eq!(*on_complete, Some(CompletionEvent::ClosedTabSettled(TabId(2))));

    strip.on_animations_complete(CompletionEvent::ClosedTabSettled(TabId(2)), &model);
    assert_eq!(tab_ids(strip.elements()), vec![TabId(1), TabId(3)]);
    // Two tabs left: width grows back to the clamp maximum.
    assert_eq!(strip.tab_width(), 265.0);
}

#[test]
fn closing_an_already_dying_tab_is_ignored() {
    let (mut strip, _model) = strip_with_tabs(2, 600.0);
    let mut host = RecordingHost::default();
    strip.tab_closed(TabId(1), &mut host);
    let batches = host.batches.len();
    strip.tab_closed(TabId(1), &mut host);
    assert_eq!(host.batches.len(), batches);
}

#[test]
fn reorder_cycle_leaves_no_margins_behind() {
    let mut model = VecTabCollection::new();
    model.push_tab(TabId(1), Some(GroupId(5)));
    model.push_tab(TabId(2), None);
    model.push_tab(TabId(3), Some(GroupId(6)));
    let mut strip = Strip::new(StripConfig::default(), viewport(900.0));
    strip.sync(&model);
    let mut host = RecordingHost::default();

    let grab_x = strip.elements()[2].draw_x() + 10.0;
    strip.on_long_press(0, grab_x, &mut model, &mut host);
    assert!(strip.in_reorder());
    strip.drag(16, grab_x + 20.0, 20.0, ReorderType::DragWithinStrip, &mut model, &mut host);
    strip.on_up_or_cancel(&mut model, &mut host);
    assert!(!strip.in_reorder());

    strip.on_animations_complete(CompletionEvent::ReorderVisualsSettled, &model);
    for element in strip.elements() {
        assert_eq!(element.trailing_margin(), 0.0);
    }
    assert_eq!(strip.scroll_offset(), 0.0);
}

#[test]
fn scroll_tab_into_view_eases_to_the_target() {
    let (mut strip, mut model) = strip_with_tabs(20, 600.0);
    let mut host = RecordingHost::default();

    // Tab 15 sits at 14 * (108 - 24) = 1176, far past the right edge.
    strip.scroll_tab_into_view(0, TabId(15), true, &mut host);
    let mut time = 0;
    while strip.update(time, &mut model, &mut host) {
        time += 16;
        assert!(time < 10_000, "scroll never settled");
    }
    assert_eq!(strip.scroll_offset(), 600.0 - (1176.0 + 108.0));

    // Already visible: nothing moves.
    let settled = strip.scroll_offset();
    strip.scroll_tab_into_view(time, TabId(15), false, &mut host);
    assert_eq!(strip.scroll_offset(), settled);
}

#[test]
fn fade_tracks_the_scroll_position() {
    let (mut strip, mut model) = strip_with_tabs(20, 600.0);
    let mut host = RecordingHost::default();
    assert_eq!(strip.fade_opacity(true), 0.0);
    assert_eq!(strip.fade_opacity(false), 1.0);

    strip.drag(0, 300.0, -12.0, ReorderType::DragWithinStrip, &mut model, &mut host);
    assert_eq!(strip.fade_opacity(true), 0.5);
}
