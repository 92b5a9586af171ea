//! Animation requests the strip hands to its embedder.
//!
//! The strip never runs its own clock for visuals. It describes each
//! transition as an [`Animation`] and the host drives interpolation,
//! reporting completion back via [`CompletionEvent`].

use crate::strip::element::{ElementKey, StripElement, TabId};

/// Which element field an animation drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimatedProperty {
    /// Drag/slide offset from the ideal position.
    OffsetX,
    /// Gap opened after an element during reorder.
    TrailingMargin,
    Width,
    /// Contribution of the element to layout spacing, 0 to 1.
    WidthWeight,
    /// Width of a group title's bottom indicator line.
    BottomIndicatorWidth,
    /// Folio lift of the interacting tab, 0 attached to 1 lifted.
    Lift,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Animation {
    pub target: ElementKey,
    pub property: AnimatedProperty,
    pub from: f32,
    pub to: f32,
    pub duration_ms: u64,
}

impl Animation {
    pub fn new(
        target: ElementKey,
        property: AnimatedProperty,
        from: f32,
        to: f32,
        duration_ms: u64,
    ) -> Self {
        Self {
            target,
            property,
            from,
            to,
            duration_ms,
        }
    }
}

/// Completion signals the host must deliver when an animation batch ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionEvent {
    /// The offsets and margins from a finished reorder have settled.
    ReorderVisualsSettled,
    /// A closed tab's shrink finished and it can leave the strip.
    ClosedTabSettled(TabId),
}

/// Embedder-side animation and feedback surface.
pub trait AnimationHost {
    /// Queues a batch of animations. `on_complete`, when set, is reported
    /// back once the whole batch has finished or been cut short.
    fn start_animations(&mut self, animations: Vec<Animation>, on_complete: Option<CompletionEvent>);

    /// Jumps all running animations to their end values and delivers any
    /// pending completion events.
    fn finish_animations(&mut self);

    /// Asks the embedder for a fresh layout/draw pass.
    fn request_update(&mut self);

    /// Played when a reorder grabs a tab. Optional.
    fn haptic_feedback(&mut self) {}
}

/// Writes an animated value onto the element it targets. Hosts call this
/// per interpolation step; the strip calls it with `to` when finishing
/// animations itself.
pub fn apply_animation_value(elements: &mut [StripElement], animation: &Animation, value: f32) {
    let Some(element) = elements.iter_mut().find(|el| el.key() == animation.target) else {
        return;
    };
    match animation.property {
        AnimatedProperty::OffsetX => element.set_offset_x(value),
        AnimatedProperty::TrailingMargin => element.set_trailing_margin(value),
        AnimatedProperty::Width => match element {
            StripElement::Tab(tab) => tab.width = value,
            StripElement::GroupTitle(title) => title.width = value,
        },
        AnimatedProperty::WidthWeight => match element {
            StripElement::Tab(tab) => tab.width_weight = value,
            StripElement::GroupTitle(title) => title.width_weight = value,
        },
        AnimatedProperty::BottomIndicatorWidth => {
            if let StripElement::GroupTitle(title) = element {
                title.bottom_indicator_width = value;
            }
        }
        AnimatedProperty::Lift => {
            if let StripElement::Tab(tab) = element {
                tab.attached = value <= 0.0;
            }
        }
    }
}
