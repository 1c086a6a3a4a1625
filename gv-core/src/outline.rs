//! Outline document model
//!
//! Headlines live in an arena keyed by id. Parent and child links are ids,
//! so the tree has no ownership cycles. Every headline's buffer ends with
//! [`APPEND_MARKER`], which content edits never remove.
//!
//! Detached headlines (deleted or absorbed by a join) stay in the arena as
//! tombstones until [`Outline::purge_detached`] is called.

use crate::piece_table::PieceTable;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unique identifier for a headline
pub type HeadlineId = usize;

/// Non-printing character terminating every headline buffer
pub const APPEND_MARKER: char = '\u{feff}';

/// How headline bullets are drawn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BulletStyle {
    /// Triangles for headlines with children, a dot for leaves
    #[default]
    Glyph,
    /// No bullets at all
    Plain,
}

/// One node of the outline tree
#[derive(Debug, Clone)]
pub struct Headline {
    id: HeadlineId,
    parent: Option<HeadlineId>,
    expanded: bool,
    buf: PieceTable,
    children: Vec<HeadlineId>,
    detached: bool,
}

impl Headline {
    fn new(id: HeadlineId, parent: Option<HeadlineId>, text: &str) -> Self {
        let mut buf = PieceTable::new(text);
        buf.append(&APPEND_MARKER.to_string());
        Self {
            id,
            parent,
            expanded: true,
            buf,
            children: Vec::new(),
            detached: false,
        }
    }

    pub fn id(&self) -> HeadlineId {
        self.id
    }

    pub fn parent(&self) -> Option<HeadlineId> {
        self.parent
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    pub fn children(&self) -> &[HeadlineId] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// The raw buffer, marker included
    pub fn buffer(&self) -> &PieceTable {
        &self.buf
    }

    /// Visible text (marker stripped)
    pub fn text(&self) -> String {
        let mut text = self.buf.text();
        if text.ends_with(APPEND_MARKER) {
            text.pop();
        }
        text
    }

    /// Offset of the append marker, the last valid cursor position
    pub fn last_offset(&self) -> usize {
        self.buf.len() - 1
    }
}

/// The outline document
#[derive(Debug, Clone)]
pub struct Outline {
    pub title: String,
    pub bullets: BulletStyle,
    /// Render top-level headlines without bullets, as list titles
    pub multi_list: bool,
    roots: Vec<HeadlineId>,
    headlines: HashMap<HeadlineId, Headline>,
    next_id: HeadlineId,
}

impl Outline {
    /// Create an outline holding a single blank headline
    pub fn new(title: impl Into<String>) -> Self {
        let mut outline = Self::empty(title);
        outline.new_headline("", None);
        outline
    }

    /// An outline with no headlines. Only valid while it is being populated.
    pub(crate) fn empty(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            bullets: BulletStyle::default(),
            multi_list: false,
            roots: Vec::new(),
            headlines: HashMap::new(),
            next_id: 1,
        }
    }

    /// Register a headline read from disk under an already attached parent.
    /// Returns false if the id is already taken.
    pub(crate) fn attach_loaded(
        &mut self,
        id: HeadlineId,
        parent: Option<HeadlineId>,
        expanded: bool,
        text: &str,
    ) -> bool {
        if self.headlines.contains_key(&id) {
            return false;
        }
        let mut headline = Headline::new(id, parent, text);
        headline.expanded = expanded;
        self.headlines.insert(id, headline);
        self.siblings_mut(parent).push(id);
        self.next_id = self.next_id.max(id + 1);
        true
    }

    // ----- queries -----

    /// Look up a headline, attached or tombstoned
    pub fn get(&self, id: HeadlineId) -> Option<&Headline> {
        self.headlines.get(&id)
    }

    /// Look up a headline. Panics on an unknown id.
    pub fn headline(&self, id: HeadlineId) -> &Headline {
        self.node(id)
    }

    /// Whether the arena holds `id`, tombstones included
    pub fn contains(&self, id: HeadlineId) -> bool {
        self.headlines.contains_key(&id)
    }

    /// Whether `id` is part of the tree (not tombstoned)
    pub fn is_attached(&self, id: HeadlineId) -> bool {
        self.headlines.get(&id).is_some_and(|h| !h.detached)
    }

    pub fn roots(&self) -> &[HeadlineId] {
        &self.roots
    }

    pub fn children(&self, id: HeadlineId) -> &[HeadlineId] {
        &self.node(id).children
    }

    pub fn parent(&self, id: HeadlineId) -> Option<HeadlineId> {
        self.node(id).parent
    }

    pub fn text(&self, id: HeadlineId) -> String {
        self.node(id).text()
    }

    pub fn last_offset(&self, id: HeadlineId) -> usize {
        self.node(id).last_offset()
    }

    /// Depth of `id`; roots are level 0
    pub fn level(&self, id: HeadlineId) -> usize {
        let mut level = 0;
        let mut current = self.node(id).parent;
        while let Some(parent) = current {
            level += 1;
            current = self.node(parent).parent;
        }
        level
    }

    /// Number of attached headlines
    pub fn len(&self) -> usize {
        self.headlines.values().filter(|h| !h.detached).count()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Ids of attached headlines, in no particular order
    pub fn ids(&self) -> impl Iterator<Item = HeadlineId> + '_ {
        self.headlines
            .values()
            .filter(|h| !h.detached)
            .map(|h| h.id)
    }

    pub fn tombstone_count(&self) -> usize {
        self.headlines.values().filter(|h| h.detached).count()
    }

    /// Drop tombstoned headlines from the arena. Returns how many were removed.
    pub fn purge_detached(&mut self) -> usize {
        let before = self.headlines.len();
        self.headlines.retain(|_, h| !h.detached);
        let purged = before - self.headlines.len();
        if purged > 0 {
            debug!("Purged {} detached headlines", purged);
        }
        purged
    }

    // ----- depth-first order -----

    pub fn first_visible(&self) -> Option<HeadlineId> {
        self.roots.first().copied()
    }

    /// The headline after `id` in depth-first order, skipping collapsed subtrees
    pub fn next_visible(&self, id: HeadlineId) -> Option<HeadlineId> {
        let node = self.node(id);
        if node.expanded {
            if let Some(&first) = node.children.first() {
                return Some(first);
            }
        }

        let mut current = id;
        loop {
            let parent = self.node(current).parent;
            let index = self.index_in_parent(current);
            if let Some(&next) = self.siblings(parent).get(index + 1) {
                return Some(next);
            }
            current = parent?;
        }
    }

    /// The headline before `id` in depth-first order, skipping collapsed subtrees
    pub fn previous_visible(&self, id: HeadlineId) -> Option<HeadlineId> {
        let parent = self.node(id).parent;
        let index = self.index_in_parent(id);
        if index == 0 {
            return parent;
        }

        // Deepest visible descendant of the previous sibling
        let mut current = self.siblings(parent)[index - 1];
        loop {
            let node = self.node(current);
            match node.children.last() {
                Some(&last) if node.expanded => current = last,
                _ => return Some(current),
            }
        }
    }

    /// Iterate over visible headlines in depth-first order
    pub fn visible(&self) -> Visible<'_> {
        Visible {
            outline: self,
            next: self.first_visible(),
        }
    }

    // ----- content edits -----

    /// Create a headline and append it to `parent`'s children (or the roots)
    pub fn new_headline(&mut self, text: &str, parent: Option<HeadlineId>) -> HeadlineId {
        let id = self.allocate(text, parent);
        self.siblings_mut(parent).push(id);
        id
    }

    /// Insert text into a headline before `position`
    pub fn insert_text(&mut self, id: HeadlineId, position: usize, text: &str) {
        let last = self.last_offset(id);
        assert!(
            position <= last,
            "insert position {} past end of headline {} ({})",
            position,
            id,
            last
        );
        self.node_mut(id).buf.insert(position, text);
    }

    /// Delete text from a headline. The append marker cannot be removed.
    pub fn delete_text(&mut self, id: HeadlineId, position: usize, length: usize) {
        let last = self.last_offset(id);
        assert!(
            position + length <= last,
            "delete span {}+{} would remove the end of headline {} ({})",
            position,
            length,
            id,
            last
        );
        self.node_mut(id).buf.delete(position, length);
    }

    pub fn set_expanded(&mut self, id: HeadlineId, expanded: bool) {
        self.node_mut(id).expanded = expanded;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn toggle_bullets(&mut self) {
        self.bullets = match self.bullets {
            BulletStyle::Glyph => BulletStyle::Plain,
            BulletStyle::Plain => BulletStyle::Glyph,
        };
    }

    pub fn toggle_multi_list(&mut self) {
        self.multi_list = !self.multi_list;
    }

    // ----- structural edits -----

    /// Move the text after `offset` into a new headline.
    ///
    /// The new headline becomes the next sibling of `id`, or its first child
    /// when `id` already has children.
    pub fn split_at(&mut self, id: HeadlineId, offset: usize) -> HeadlineId {
        let last = self.last_offset(id);
        assert!(
            offset <= last,
            "split offset {} past end of headline {} ({})",
            offset,
            id,
            last
        );

        let tail = self.node(id).buf.slice(offset, last);
        self.node_mut(id).buf.delete(offset, last - offset);

        let new_id = if self.node(id).children.is_empty() {
            let parent = self.node(id).parent;
            let index = self.index_in_parent(id);
            let new_id = self.allocate(&tail, parent);
            self.siblings_mut(parent).insert(index + 1, new_id);
            new_id
        } else {
            let new_id = self.allocate(&tail, Some(id));
            self.node_mut(id).children.insert(0, new_id);
            new_id
        };

        debug!("Split headline {} at {} into {}", id, offset, new_id);
        new_id
    }

    /// Append `id` to the previous headline in depth-first order.
    ///
    /// Returns the previous headline and the offset where the texts meet, or
    /// None when `id` is the first headline.
    pub fn join_with_previous(&mut self, id: HeadlineId) -> Option<(HeadlineId, usize)> {
        let previous = self.previous_visible(id)?;
        let join_at = self.absorb(previous, id);
        debug!("Joined headline {} into {}", id, previous);
        Some((previous, join_at))
    }

    /// Append the next headline in depth-first order to `id`.
    ///
    /// Returns the absorbed headline, or None when `id` is the last one.
    pub fn join_with_next(&mut self, id: HeadlineId) -> Option<HeadlineId> {
        let next = self.next_visible(id)?;
        self.absorb(id, next);
        debug!("Joined headline {} into {}", next, id);
        Some(next)
    }

    /// Indent `id` one level under the headline preceding it.
    ///
    /// If the preceding headline is our previous sibling we become its first
    /// child. Otherwise the preceding headline is a descendant of our previous
    /// sibling and we become that sibling's last child.
    pub fn promote(&mut self, id: HeadlineId) -> bool {
        let Some(previous) = self.previous_visible(id) else {
            return false;
        };
        let parent = self.node(id).parent;
        if parent == Some(previous) {
            return false;
        }

        let index = self.detach_from_parent(id);
        if self.node(previous).parent == parent {
            self.node_mut(previous).expanded = true;
            self.node_mut(previous).children.insert(0, id);
            self.node_mut(id).parent = Some(previous);
        } else {
            let sibling = self.siblings(parent)[index - 1];
            self.node_mut(sibling).children.push(id);
            self.node_mut(id).parent = Some(sibling);
        }

        debug!("Promoted headline {} under {:?}", id, self.node(id).parent);
        true
    }

    /// Outdent `id` to become the next sibling of its parent.
    ///
    /// Siblings that followed `id` become its trailing children.
    pub fn demote(&mut self, id: HeadlineId) -> bool {
        let Some(parent) = self.node(id).parent else {
            return false;
        };

        let index = self.index_in_parent(id);
        let followers = self.node_mut(parent).children.split_off(index + 1);
        self.node_mut(parent).children.remove(index);
        if !followers.is_empty() {
            for &follower in &followers {
                self.node_mut(follower).parent = Some(id);
            }
            let node = self.node_mut(id);
            node.children.extend(followers);
            node.expanded = true;
        }

        let grandparent = self.node(parent).parent;
        let parent_index = self.index_in_parent(parent);
        self.siblings_mut(grandparent).insert(parent_index + 1, id);
        self.node_mut(id).parent = grandparent;

        debug!("Demoted headline {} to {:?}", id, grandparent);
        true
    }

    /// Remove `id` and its subtree from the document.
    ///
    /// The first headline is never removed; its text is cleared instead.
    /// Returns the headline the cursor should move to.
    pub fn delete_headline(&mut self, id: HeadlineId) -> HeadlineId {
        match self.previous_visible(id) {
            Some(previous) => {
                self.detach_from_parent(id);
                self.mark_detached(id);
                debug!("Deleted headline {}", id);
                previous
            }
            None => {
                let last = self.last_offset(id);
                self.node_mut(id).buf.delete(0, last);
                id
            }
        }
    }

    // ----- internals -----

    fn node(&self, id: HeadlineId) -> &Headline {
        match self.headlines.get(&id) {
            Some(headline) => headline,
            None => panic!("unknown headline {}", id),
        }
    }

    fn node_mut(&mut self, id: HeadlineId) -> &mut Headline {
        match self.headlines.get_mut(&id) {
            Some(headline) => headline,
            None => panic!("unknown headline {}", id),
        }
    }

    /// Create and register a headline without linking it into a child list
    fn allocate(&mut self, text: &str, parent: Option<HeadlineId>) -> HeadlineId {
        let id = self.next_id;
        self.next_id += 1;
        self.headlines.insert(id, Headline::new(id, parent, text));
        id
    }

    fn siblings(&self, parent: Option<HeadlineId>) -> &[HeadlineId] {
        match parent {
            Some(parent) => &self.node(parent).children,
            None => &self.roots,
        }
    }

    fn siblings_mut(&mut self, parent: Option<HeadlineId>) -> &mut Vec<HeadlineId> {
        match parent {
            Some(parent) => &mut self.node_mut(parent).children,
            None => &mut self.roots,
        }
    }

    fn index_in_parent(&self, id: HeadlineId) -> usize {
        let parent = self.node(id).parent;
        match self.siblings(parent).iter().position(|&c| c == id) {
            Some(index) => index,
            None => panic!("headline {} is not attached to its parent", id),
        }
    }

    /// Unlink `id` from its parent's child list, returning its former index
    fn detach_from_parent(&mut self, id: HeadlineId) -> usize {
        let index = self.index_in_parent(id);
        let parent = self.node(id).parent;
        self.siblings_mut(parent).remove(index);
        index
    }

    fn mark_detached(&mut self, id: HeadlineId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = self.node_mut(current);
            node.detached = true;
            stack.extend(node.children.iter().copied());
        }
    }

    /// Move `source`'s text and children into `target` and detach `source`.
    /// Returns the offset in `target` where the two texts meet.
    fn absorb(&mut self, target: HeadlineId, source: HeadlineId) -> usize {
        let join_at = self.last_offset(target);
        let text = self.node(source).buf.text();
        {
            let node = self.node_mut(target);
            node.buf.delete(join_at, 1);
            node.buf.append(&text);
        }

        let children = std::mem::take(&mut self.node_mut(source).children);
        for &child in &children {
            self.node_mut(child).parent = Some(target);
        }

        if self.node(source).parent == Some(target) {
            // Keep document order: the children take the source's slot
            let slot = self.index_in_parent(source);
            self.node_mut(target).children.splice(slot..=slot, children);
        } else {
            self.detach_from_parent(source);
            self.node_mut(target).children.extend(children);
        }
        self.node_mut(source).detached = true;

        join_at
    }
}

/// Depth-first iterator over visible headlines
pub struct Visible<'a> {
    outline: &'a Outline,
    next: Option<HeadlineId>,
}

impl Iterator for Visible<'_> {
    type Item = HeadlineId;

    fn next(&mut self) -> Option<HeadlineId> {
        let current = self.next?;
        self.next = self.outline.next_visible(current);
        Some(current)
    }
}

#[cfg(test)]
impl Outline {
    /// Build an outline from `(level, text)` pairs in document order.
    /// The first pair must be level 0.
    pub(crate) fn from_levels(rows: &[(usize, &str)]) -> (Self, Vec<HeadlineId>) {
        let mut outline = Outline::new("test");
        let first = outline.roots()[0];
        let mut ids = Vec::new();
        let mut stack: Vec<HeadlineId> = Vec::new();

        for (i, &(level, text)) in rows.iter().enumerate() {
            stack.truncate(level);
            let id = if i == 0 {
                outline.insert_text(first, 0, text);
                first
            } else {
                outline.new_headline(text, stack.last().copied())
            };
            stack.push(id);
            ids.push(id);
        }

        (outline, ids)
    }

    /// Visible headline texts in depth-first order
    pub(crate) fn visible_texts(&self) -> Vec<String> {
        self.visible().map(|id| self.text(id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_outline_has_one_blank_headline() {
        let outline = Outline::new("Groceries");
        assert_eq!(outline.title, "Groceries");
        assert_eq!(outline.roots(), &[1]);
        assert_eq!(outline.text(1), "");
        assert_eq!(outline.last_offset(1), 0);
        assert_eq!(outline.headline(1).buffer().char_at(0), Some(APPEND_MARKER));
    }

    #[test]
    fn test_new_headline_assigns_increasing_ids() {
        let mut outline = Outline::new("t");
        let a = outline.new_headline("a", None);
        let b = outline.new_headline("b", Some(a));
        assert_eq!(a, 2);
        assert_eq!(b, 3);
        assert_eq!(outline.parent(b), Some(a));
        assert_eq!(outline.children(a), &[b]);
        assert_eq!(outline.level(b), 1);
        assert_eq!(outline.len(), 3);
    }

    #[test]
    fn test_split_without_children_creates_next_sibling() {
        let (mut outline, ids) = Outline::from_levels(&[(0, "hello world"), (0, "next")]);
        let new_id = outline.split_at(ids[0], 5);

        assert_eq!(outline.text(ids[0]), "hello");
        assert_eq!(outline.text(new_id), " world");
        assert_eq!(outline.roots(), &[ids[0], new_id, ids[1]]);
        assert_eq!(outline.parent(new_id), None);
    }

    #[test]
    fn test_split_with_children_creates_first_child() {
        let (mut outline, ids) = Outline::from_levels(&[(0, "A"), (1, "B")]);
        let end = outline.last_offset(ids[0]);
        let new_id = outline.split_at(ids[0], end);

        assert_eq!(outline.text(ids[0]), "A");
        assert_eq!(outline.text(new_id), "");
        assert_eq!(outline.children(ids[0]), &[new_id, ids[1]]);
        assert_eq!(outline.parent(new_id), Some(ids[0]));
    }

    #[test]
    fn test_split_then_join_restores_headline() {
        for rows in [
            &[(0, "alpha beta"), (0, "gamma")][..],
            &[(0, "alpha beta"), (1, "child"), (0, "gamma")][..],
        ] {
            let (mut outline, ids) = Outline::from_levels(rows);
            let children_before = outline.children(ids[0]).to_vec();

            outline.split_at(ids[0], 3);
            outline.join_with_next(ids[0]);

            assert_eq!(outline.text(ids[0]), "alpha beta");
            assert_eq!(outline.children(ids[0]), children_before.as_slice());
            assert_eq!(outline.last_offset(ids[0]), 10);
        }
    }

    #[test]
    fn test_join_with_previous_moves_text_and_children() {
        let (mut outline, ids) =
            Outline::from_levels(&[(0, "one"), (1, "x"), (0, "two"), (1, "y"), (1, "z")]);
        // previous of "two" is "x"
        let (target, join_at) = outline.join_with_previous(ids[2]).unwrap();

        assert_eq!(target, ids[1]);
        assert_eq!(join_at, 1);
        assert_eq!(outline.text(ids[1]), "xtwo");
        assert_eq!(outline.children(ids[1]), &[ids[3], ids[4]]);
        assert_eq!(outline.parent(ids[3]), Some(ids[1]));
        assert_eq!(outline.roots(), &[ids[0]]);
        assert!(!outline.is_attached(ids[2]));
        assert_eq!(outline.tombstone_count(), 1);
    }

    #[test]
    fn test_join_first_child_into_parent_keeps_order() {
        let (mut outline, ids) =
            Outline::from_levels(&[(0, "P"), (1, "c1"), (2, "g"), (1, "c2")]);
        let (target, join_at) = outline.join_with_previous(ids[1]).unwrap();

        assert_eq!(target, ids[0]);
        assert_eq!(join_at, 1);
        assert_eq!(outline.text(ids[0]), "Pc1");
        assert_eq!(outline.children(ids[0]), &[ids[2], ids[3]]);
        assert_eq!(outline.visible_texts(), vec!["Pc1", "g", "c2"]);
    }

    #[test]
    fn test_join_with_previous_on_first_headline() {
        let (mut outline, ids) = Outline::from_levels(&[(0, "only")]);
        assert_eq!(outline.join_with_previous(ids[0]), None);
        assert_eq!(outline.text(ids[0]), "only");
    }

    #[test]
    fn test_join_with_next_on_last_headline() {
        let (mut outline, ids) = Outline::from_levels(&[(0, "a"), (0, "b")]);
        assert_eq!(outline.join_with_next(ids[1]), None);
        assert_eq!(outline.join_with_next(ids[0]), Some(ids[1]));
        assert_eq!(outline.visible_texts(), vec!["ab"]);
    }

    #[test]
    fn test_promote_under_childless_previous_sibling() {
        let (mut outline, ids) = Outline::from_levels(&[(0, "a"), (0, "b"), (0, "c")]);
        assert!(outline.promote(ids[1]));

        assert_eq!(outline.roots(), &[ids[0], ids[2]]);
        assert_eq!(outline.children(ids[0]), &[ids[1]]);
        assert_eq!(outline.parent(ids[1]), Some(ids[0]));
    }

    #[test]
    fn test_promote_under_previous_sibling_with_children() {
        let (mut outline, ids) =
            Outline::from_levels(&[(0, "a"), (1, "a1"), (1, "a2"), (0, "b")]);
        assert!(outline.promote(ids[3]));

        assert_eq!(outline.roots(), &[ids[0]]);
        assert_eq!(outline.children(ids[0]), &[ids[1], ids[2], ids[3]]);
        assert_eq!(outline.visible_texts(), vec!["a", "a1", "a2", "b"]);
    }

    #[test]
    fn test_promote_first_headline_or_first_child_is_noop() {
        let (mut outline, ids) = Outline::from_levels(&[(0, "a"), (1, "b")]);
        assert!(!outline.promote(ids[0]));
        assert!(!outline.promote(ids[1]));
        assert_eq!(outline.children(ids[0]), &[ids[1]]);
    }

    #[test]
    fn test_promote_then_demote_restores_position() {
        let (mut outline, ids) =
            Outline::from_levels(&[(0, "root"), (1, "p"), (1, "h"), (1, "after")]);
        assert!(outline.promote(ids[2]));
        assert_eq!(outline.parent(ids[2]), Some(ids[1]));

        assert!(outline.demote(ids[2]));
        assert_eq!(outline.parent(ids[2]), Some(ids[0]));
        assert_eq!(outline.children(ids[0]), &[ids[1], ids[2], ids[3]]);
        assert!(outline.children(ids[1]).is_empty());
    }

    #[test]
    fn test_demote_adopts_following_siblings() {
        let (mut outline, ids) =
            Outline::from_levels(&[(0, "p"), (1, "a"), (1, "b"), (1, "c"), (0, "q")]);
        assert!(outline.demote(ids[1]));

        assert_eq!(outline.roots(), &[ids[0], ids[1], ids[4]]);
        assert!(outline.children(ids[0]).is_empty());
        assert_eq!(outline.children(ids[1]), &[ids[2], ids[3]]);
        assert_eq!(outline.parent(ids[3]), Some(ids[1]));
        assert_eq!(outline.visible_texts(), vec!["p", "a", "b", "c", "q"]);
    }

    #[test]
    fn test_demote_root_is_noop() {
        let (mut outline, ids) = Outline::from_levels(&[(0, "a"), (0, "b")]);
        assert!(!outline.demote(ids[1]));
        assert_eq!(outline.roots(), &[ids[0], ids[1]]);
    }

    #[test]
    fn test_delete_headline_tombstones_subtree() {
        let (mut outline, ids) = Outline::from_levels(&[(0, "a"), (0, "b"), (1, "b1")]);
        let cursor = outline.delete_headline(ids[1]);

        assert_eq!(cursor, ids[0]);
        assert_eq!(outline.roots(), &[ids[0]]);
        assert!(!outline.is_attached(ids[1]));
        assert!(!outline.is_attached(ids[2]));
        assert!(outline.get(ids[2]).unwrap().is_detached());
        assert_eq!(outline.len(), 1);

        assert!(outline.contains(ids[1]));
        assert_eq!(outline.purge_detached(), 2);
        assert!(!outline.contains(ids[1]));
    }

    #[test]
    fn test_delete_sole_headline_clears_text() {
        let (mut outline, ids) = Outline::from_levels(&[(0, "only one")]);
        let cursor = outline.delete_headline(ids[0]);

        assert_eq!(cursor, ids[0]);
        assert_eq!(outline.len(), 1);
        assert_eq!(outline.text(ids[0]), "");
        assert_eq!(outline.last_offset(ids[0]), 0);
    }

    #[test]
    fn test_depth_first_visits_every_headline_once() {
        let (outline, ids) = Outline::from_levels(&[
            (0, "a"),
            (1, "a1"),
            (2, "a1x"),
            (1, "a2"),
            (0, "b"),
            (1, "b1"),
            (0, "c"),
        ]);
        let visited: Vec<_> = outline.visible().collect();
        assert_eq!(visited, ids);

        let mut sorted = visited.clone();
        sorted.sort_unstable();
        let mut all: Vec<_> = outline.ids().collect();
        all.sort_unstable();
        assert_eq!(sorted, all);

        // previous_visible walks the same order backwards
        let mut back = vec![*ids.last().unwrap()];
        while let Some(prev) = outline.previous_visible(*back.last().unwrap()) {
            back.push(prev);
        }
        back.reverse();
        assert_eq!(back, ids);
    }

    #[test]
    fn test_collapsed_subtree_is_skipped() {
        let (mut outline, ids) =
            Outline::from_levels(&[(0, "a"), (1, "a1"), (2, "a1x"), (0, "b")]);
        outline.set_expanded(ids[1], false);

        assert_eq!(outline.visible_texts(), vec!["a", "a1", "b"]);
        assert_eq!(outline.next_visible(ids[1]), Some(ids[3]));
        assert_eq!(outline.previous_visible(ids[3]), Some(ids[1]));
    }

    #[test]
    fn test_toggle_settings() {
        let mut outline = Outline::new("t");
        assert_eq!(outline.bullets, BulletStyle::Glyph);
        outline.toggle_bullets();
        assert_eq!(outline.bullets, BulletStyle::Plain);
        outline.toggle_multi_list();
        assert!(outline.multi_list);
        outline.set_title("renamed");
        assert_eq!(outline.title, "renamed");
    }

    #[test]
    #[should_panic(expected = "would remove the end")]
    fn test_delete_text_cannot_remove_marker() {
        let (mut outline, ids) = Outline::from_levels(&[(0, "abc")]);
        outline.delete_text(ids[0], 2, 2);
    }

    #[test]
    #[should_panic(expected = "unknown headline")]
    fn test_unknown_id_panics() {
        let outline = Outline::new("t");
        outline.text(99);
    }
}
