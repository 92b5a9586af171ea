//! Reorderable tab strip engine for tablet-style browser UIs.
//!
//! The crate models a horizontal tab strip as a sequence of tabs and
//! group titles, lays it out in an adaptive-width viewport, scrolls it
//! with fling physics, and reorders it through a drag state machine that
//! understands tab groups: swapping neighbors, merging into a group,
//! ejecting from one, and hopping collapsed groups, with edge
//! auto-scroll while dragging.
//!
//! The embedder supplies the two collaborators: a [`TabCollection`] with
//! the authoritative tab order, and an [`AnimationHost`] that runs the
//! animations the strip requests. All operations are synchronous and
//! single-threaded.

pub mod config;
pub mod strip;

pub use config::{LayoutConfig, ReorderConfig, ScrollConfig, StripConfig};
pub use strip::animation::{
    Animation, AnimatedProperty, AnimationHost, CompletionEvent,
};
pub use strip::collection::{TabCollection, VecTabCollection};
pub use strip::element::{ElementKey, GroupId, StripElement, TabId};
pub use strip::layout::Viewport;
pub use strip::reorder::ReorderType;
pub use strip::Strip;
