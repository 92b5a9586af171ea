//! The tab model the strip mirrors. The reorder engine mutates logical
//! order through this trait and the strip rebuilds its elements from it.

use crate::strip::element::{GroupId, TabId};

/// Logical tab order and grouping, as the embedder stores it.
///
/// `move_tab` uses pre-removal destination indices: moving a tab forward
/// past one neighbor takes `to = from + 2`.
pub trait TabCollection {
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// False until the embedder has restored its tabs. Interactions are
    /// ignored before that.
    fn is_initialized(&self) -> bool;

    fn tab_at(&self, index: usize) -> Option<TabId>;
    fn index_of_tab(&self, id: TabId) -> Option<usize>;
    fn group_of(&self, id: TabId) -> Option<GroupId>;
    fn group_member_count(&self, group: GroupId) -> usize;
    fn is_group_collapsed(&self, group: GroupId) -> bool;

    fn selected_tab(&self) -> Option<TabId>;
    fn select_tab(&mut self, id: TabId);

    fn move_tab(&mut self, id: TabId, to: usize);
    fn move_tab_into_group(&mut self, id: TabId, group: GroupId);
    /// Removes the tab from its group, placing it on the side the drag
    /// exited toward.
    fn move_tab_out_of_group(&mut self, id: TabId, toward_end: bool);
    /// Moves a whole group so its first member lands at `to`.
    fn move_group(&mut self, group: GroupId, to: usize);
}

// ── In-memory implementation ─────────────────────────────────────────

#[derive(Clone, Debug)]
struct TabRecord {
    id: TabId,
    group: Option<GroupId>,
}

/// A self-contained `TabCollection` backed by a `Vec`, for embedders
/// without their own model and for tests.
#[derive(Debug, Default)]
pub struct VecTabCollection {
    tabs: Vec<TabRecord>,
    collapsed: Vec<GroupId>,
    selected: Option<TabId>,
    emptied_groups: Vec<GroupId>,
}

impl VecTabCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_tab(&mut self, id: TabId, group: Option<GroupId>) {
        self.tabs.push(TabRecord { id, group });
        if self.selected.is_none() {
            self.selected = Some(id);
        }
    }

    pub fn remove_tab(&mut self, id: TabId) {
        let Some(index) = self.position(id) else {
            return;
        };
        let record = self.tabs.remove(index);
        if let Some(group) = record.group {
            self.note_if_emptied(group);
        }
        if self.selected == Some(id) {
            self.selected = self
                .tabs
                .get(index.min(self.tabs.len().saturating_sub(1)))
                .map(|r| r.id);
        }
    }

    pub fn set_group_collapsed(&mut self, group: GroupId, collapsed: bool) {
        if collapsed {
            if !self.collapsed.contains(&group) {
                self.collapsed.push(group);
            }
        } else {
            self.collapsed.retain(|g| *g != group);
        }
    }

    /// Groups deleted because their last member left, since the previous
    /// call. Lets the embedder react to implicit group removal.
    pub fn take_emptied_groups(&mut self) -> Vec<GroupId> {
        std::mem::take(&mut self.emptied_groups)
    }

    fn position(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|r| r.id == id)
    }

    fn note_if_emptied(&mut self, group: GroupId) {
        if self.group_member_count(group) == 0 {
            self.collapsed.retain(|g| *g != group);
            self.emptied_groups.push(group);
        }
    }

    fn group_span(&self, group: GroupId) -> Option<(usize, usize)> {
        let first = self.tabs.iter().position(|r| r.group == Some(group))?;
        let last = self.tabs.iter().rposition(|r| r.group == Some(group))?;
        Some((first, last))
    }
}

impl TabCollection for VecTabCollection {
    fn len(&self) -> usize {
        self.tabs.len()
    }

    fn is_initialized(&self) -> bool {
        true
    }

    fn tab_at(&self, index: usize) -> Option<TabId> {
        self.tabs.get(index).map(|r| r.id)
    }

    fn index_of_tab(&self, id: TabId) -> Option<usize> {
        self.position(id)
    }

    fn group_of(&self, id: TabId) -> Option<GroupId> {
        self.tabs.iter().find(|r| r.id == id)?.group
    }

    fn group_member_count(&self, group: GroupId) -> usize {
        self.tabs.iter().filter(|r| r.group == Some(group)).count()
    }

    fn is_group_collapsed(&self, group: GroupId) -> bool {
        self.collapsed.contains(&group)
    }

    fn selected_tab(&self) -> Option<TabId> {
        self.selected
    }

    fn select_tab(&mut self, id: TabId) {
        if self.position(id).is_some() {
            self.selected = Some(id);
        }
    }

    fn move_tab(&mut self, id: TabId, to: usize) {
        let Some(from) = self.position(id) else {
            return;
        };
        let record = self.tabs.remove(from);
        let dest = if to > from { to - 1 } else { to };
        self.tabs.insert(dest.min(self.tabs.len()), record);
    }

    fn move_tab_into_group(&mut self, id: TabId, group: GroupId) {
        if let Some(record) = self.tabs.iter_mut().find(|r| r.id == id) {
            let old = record.group;
            record.group = Some(group);
            if let Some(old) = old {
                if old != group {
                    self.note_if_emptied(old);
                }
            }
        }
    }

    fn move_tab_out_of_group(&mut self, id: TabId, _toward_end: bool) {
        // The caller already moved the tab past the group edge, so only
        // the membership changes here.
        if let Some(record) = self.tabs.iter_mut().find(|r| r.id == id) {
            let Some(group) = record.group.take() else {
                return;
            };
            self.note_if_emptied(group);
        }
    }

    fn move_group(&mut self, group: GroupId, to: usize) {
        let Some((first, last)) = self.group_span(group) else {
            return;
        };
        let members: Vec<TabRecord> = self.tabs.drain(first..=last).collect();
        let dest = if to > first {
            to.saturating_sub(members.len())
        } else {
            to
        };
        let dest = dest.min(self.tabs.len());
        for (i, record) in members.into_iter().enumerate() {
            self.tabs.insert(dest + i, record);
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
