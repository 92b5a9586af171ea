//! Strip element model.
//!
//! A strip is an ordered sequence of [`StripElement`]s: tabs interleaved with
//! group-title markers. The sequence is order-isomorphic to the backing
//! [`TabCollection`](crate::strip::collection::TabCollection), with exactly one
//! [`GroupTitleElement`] immediately preceding the first tab of each
//! contiguous group.

/// Stable identifier for a tab. Assigned by the embedder, never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TabId(pub u64);

/// Stable identifier for a tab group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupId(pub u64);

/// Key addressing one element of the strip, independent of its index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKey {
    Tab(TabId),
    GroupTitle(GroupId),
}

/// One tab on the strip.
#[derive(Clone, Debug)]
pub struct TabElement {
    pub id: TabId,
    /// Mirror of the backing collection's membership; refreshed on rebuild.
    pub group: Option<GroupId>,
    pub width: f32,
    /// Tapers 0 -> 1 during creation and 1 -> 0 during closing. 0 when the
    /// tab is collapsed away inside a collapsed group.
    pub width_weight: f32,
    /// Extra gap after this tab. Nonzero only during an active reorder.
    pub trailing_margin: f32,
    /// Target x the tab animates toward.
    pub ideal_x: f32,
    /// Drag offset from the ideal position.
    pub offset_x: f32,
    /// Rendered x; `ideal_x + offset_x` after a layout pass.
    pub draw_x: f32,
    pub collapsed: bool,
    /// Pending removal; keeps its space until the close animation settles.
    pub dying: bool,
    pub pinned: bool,
    pub selected: bool,
    /// Drawn over neighboring tabs during reorder.
    pub foregrounded: bool,
    /// Container attached to the toolbar. Lifted (false) while dragging.
    pub attached: bool,
    /// Hidden because it is being dragged off this strip.
    pub dragged_off_strip: bool,
    pub reordering: bool,
}

impl TabElement {
    pub fn new(id: TabId, width: f32) -> Self {
        Self {
            id,
            group: None,
            width,
            width_weight: 1.0,
            trailing_margin: 0.0,
            ideal_x: 0.0,
            offset_x: 0.0,
            draw_x: 0.0,
            collapsed: false,
            dying: false,
            pinned: false,
            selected: false,
            foregrounded: false,
            attached: true,
            dragged_off_strip: false,
            reordering: false,
        }
    }
}

/// The title marker preceding a group's first tab.
#[derive(Clone, Debug)]
pub struct GroupTitleElement {
    pub group: GroupId,
    pub width: f32,
    pub width_weight: f32,
    pub collapsed: bool,
    /// Width of the underline spanning the group's member tabs.
    pub bottom_indicator_width: f32,
    pub trailing_margin: f32,
    pub ideal_x: f32,
    pub offset_x: f32,
    pub draw_x: f32,
    pub foregrounded: bool,
}

impl GroupTitleElement {
    pub fn new(group: GroupId, width: f32) -> Self {
        Self {
            group,
            width,
            width_weight: 1.0,
            collapsed: false,
            bottom_indicator_width: 0.0,
            trailing_margin: 0.0,
            ideal_x: 0.0,
            offset_x: 0.0,
            draw_x: 0.0,
            foregrounded: false,
        }
    }
}

/// A positioned, animatable item on the strip.
#[derive(Clone, Debug)]
pub enum StripElement {
    Tab(TabElement),
    GroupTitle(GroupTitleElement),
}

impl StripElement {
    pub fn key(&self) -> ElementKey {
        match self {
            StripElement::Tab(tab) => ElementKey::Tab(tab.id),
            StripElement::GroupTitle(title) => ElementKey::GroupTitle(title.group),
        }
    }

    pub fn width(&self) -> f32 {
        match self {
            StripElement::Tab(tab) => tab.width,
            StripElement::GroupTitle(title) => title.width,
        }
    }

    pub fn width_weight(&self) -> f32 {
        match self {
            StripElement::Tab(tab) => tab.width_weight,
            StripElement::GroupTitle(title) => title.width_weight,
        }
    }

    pub fn trailing_margin(&self) -> f32 {
        match self {
            StripElement::Tab(tab) => tab.trailing_margin,
            StripElement::GroupTitle(title) => title.trailing_margin,
        }
    }

    pub fn set_trailing_margin(&mut self, margin: f32) {
        match self {
            StripElement::Tab(tab) => tab.trailing_margin = margin,
            StripElement::GroupTitle(title) => title.trailing_margin = margin,
        }
    }

    pub fn ideal_x(&self) -> f32 {
        match self {
            StripElement::Tab(tab) => tab.ideal_x,
            StripElement::GroupTitle(title) => title.ideal_x,
        }
    }

    pub fn set_ideal_x(&mut self, x: f32) {
        match self {
            StripElement::Tab(tab) => tab.ideal_x = x,
            StripElement::GroupTitle(title) => title.ideal_x = x,
        }
    }

    pub fn offset_x(&self) -> f32 {
        match self {
            StripElement::Tab(tab) => tab.offset_x,
            StripElement::GroupTitle(title) => title.offset_x,
        }
    }

    pub fn set_offset_x(&mut self, offset: f32) {
        match self {
            StripElement::Tab(tab) => tab.offset_x = offset,
            StripElement::GroupTitle(title) => title.offset_x = offset,
        }
    }

    pub fn draw_x(&self) -> f32 {
        match self {
            StripElement::Tab(tab) => tab.draw_x,
            StripElement::GroupTitle(title) => title.draw_x,
        }
    }

    pub fn set_draw_x(&mut self, x: f32) {
        match self {
            StripElement::Tab(tab) => tab.draw_x = x,
            StripElement::GroupTitle(title) => title.draw_x = x,
        }
    }

    pub fn set_foregrounded(&mut self, foregrounded: bool) {
        match self {
            StripElement::Tab(tab) => tab.foregrounded = foregrounded,
            StripElement::GroupTitle(title) => title.foregrounded = foregrounded,
        }
    }

    pub fn as_tab(&self) -> Option<&TabElement> {
        match self {
            StripElement::Tab(tab) => Some(tab),
            StripElement::GroupTitle(_) => None,
        }
    }

    pub fn as_tab_mut(&mut self) -> Option<&mut TabElement> {
        match self {
            StripElement::Tab(tab) => Some(tab),
            StripElement::GroupTitle(_) => None,
        }
    }

    pub fn as_group_title(&self) -> Option<&GroupTitleElement> {
        match self {
            StripElement::GroupTitle(title) => Some(title),
            StripElement::Tab(_) => None,
        }
    }

    pub fn as_group_title_mut(&mut self) -> Option<&mut GroupTitleElement> {
        match self {
            StripElement::GroupTitle(title) => Some(title),
            StripElement::Tab(_) => None,
        }
    }
}

/// Returns the element index of the tab with the given id.
pub fn find_tab(elements: &[StripElement], id: TabId) -> Option<usize> {
    elements
        .iter()
        .position(|el| matches!(el, StripElement::Tab(tab) if tab.id == id))
}

/// Returns the element index of the title marker for the given group.
pub fn find_group_title(elements: &[StripElement], group: GroupId) -> Option<usize> {
    elements
        .iter()
        .position(|el| matches!(el, StripElement::GroupTitle(title) if title.group == group))
}

/// Returns the ids of the strip's tabs, in order.
pub fn tab_ids(elements: &[StripElement]) -> Vec<TabId> {
    elements
        .iter()
        .filter_map(|el| el.as_tab().map(|tab| tab.id))
        .collect()
}
