//! Editing session: cursor, selection, scrolling and edits over one outline
//!
//! [`EditSession`] is what the terminal front-end drives. It owns the
//! [`Outline`], keeps its [`LineLayout`] current, and tracks the cursor
//! position, the selection, the top visible line, the dirty flag and the
//! file the outline came from.

use crate::error::OutlineResult;
use crate::layout::{LineLayout, VisualLine};
use crate::outline::{BulletStyle, HeadlineId, Outline};
use crate::persist;
use crate::selection::Selection;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Cursor movements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
}

/// Which neighbour a join pulls in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

pub struct EditSession {
    outline: Outline,
    layout: LineLayout,
    base_indent: usize,
    default_bullets: BulletStyle,
    width: usize,
    height: usize,
    headline: HeadlineId,
    offset: usize,
    top_line: usize,
    selection: Option<Selection>,
    clipboard: Option<String>,
    dirty: bool,
    path: Option<PathBuf>,
}

impl EditSession {
    /// Start editing `outline` with the cursor on its first headline
    pub fn new(outline: Outline) -> Self {
        let headline = outline.first_visible().unwrap_or_default();
        let mut session = Self {
            outline,
            layout: LineLayout::default(),
            base_indent: 0,
            default_bullets: BulletStyle::default(),
            width: 80,
            height: 24,
            headline,
            offset: 0,
            top_line: 0,
            selection: None,
            clipboard: None,
            dirty: false,
            path: None,
        };
        session.relayout();
        session
    }

    pub fn with_base_indent(mut self, base_indent: usize) -> Self {
        self.base_indent = base_indent;
        self.relayout();
        self
    }

    /// Bullet style given to outlines created by [`EditSession::new_document`]
    pub fn with_default_bullets(mut self, bullets: BulletStyle) -> Self {
        self.default_bullets = bullets;
        self
    }

    // ----- accessors -----

    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    pub fn layout(&self) -> &LineLayout {
        &self.layout
    }

    /// `(headline, offset)` of the cursor
    pub fn cursor(&self) -> (HeadlineId, usize) {
        (self.headline, self.offset)
    }

    /// Layout line the cursor is on
    pub fn cursor_line(&self) -> usize {
        self.layout
            .line_of(self.headline, self.offset)
            .unwrap_or_default()
    }

    /// Screen column of the cursor within the viewport
    pub fn cursor_column(&self) -> usize {
        let Some(line) = self.layout.get(self.cursor_line()) else {
            return 0;
        };
        let buffer = self.outline.headline(self.headline).buffer();
        let text_width: usize = buffer
            .slice(line.start, self.offset.max(line.start))
            .chars()
            .map(crate::layout::char_width)
            .sum();
        line.hanging_indent + text_width
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn clipboard(&self) -> Option<&str> {
        self.clipboard.as_deref()
    }

    pub fn top_line(&self) -> usize {
        self.top_line
    }

    /// Visible slice of the layout
    pub fn visible_lines(&self) -> &[VisualLine] {
        let lines = self.layout.lines();
        let start = self.top_line.min(lines.len());
        let end = (self.top_line + self.height).min(lines.len());
        &lines[start..end]
    }

    pub fn viewport(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = Some(path.into());
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    // ----- documents -----

    /// Replace the current outline with the one stored at `path`.
    /// On failure the current outline is left untouched.
    pub fn open(&mut self, path: &Path) -> OutlineResult<()> {
        let outline = persist::load(path)?;
        self.replace_outline(outline);
        self.path = Some(path.to_path_buf());
        self.dirty = false;
        Ok(())
    }

    /// Start a fresh, unsaved outline
    pub fn new_document(&mut self, title: &str) {
        let mut outline = Outline::new(title);
        outline.bullets = self.default_bullets;
        self.replace_outline(outline);
        self.path = None;
        self.dirty = true;
        info!("Created new outline '{}'", title);
    }

    /// Write the outline to `path` and make it the current file.
    /// A failed save leaves the session dirty.
    pub fn save(&mut self, path: &Path) -> OutlineResult<()> {
        persist::save(&self.outline, path)?;
        self.outline.purge_detached();
        self.path = Some(path.to_path_buf());
        self.dirty = false;
        Ok(())
    }

    /// Save to the current file. Returns false when there is none yet.
    pub fn save_current(&mut self) -> OutlineResult<bool> {
        let Some(path) = self.path.clone() else {
            return Ok(false);
        };
        self.save(&path)?;
        Ok(true)
    }

    fn replace_outline(&mut self, outline: Outline) {
        self.headline = outline.first_visible().unwrap_or_default();
        self.outline = outline;
        self.offset = 0;
        self.top_line = 0;
        self.selection = None;
        self.relayout();
    }

    // ----- viewport -----

    pub fn set_viewport(&mut self, width: usize, height: usize) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        self.width = width;
        self.height = height.max(1);
        self.relayout();
    }

    /// Rebuild the layout and keep the cursor on screen
    fn relayout(&mut self) {
        self.reveal(self.headline);
        self.layout = LineLayout::build(&self.outline, self.width, self.base_indent);
        let max_top = self.layout.len().saturating_sub(1);
        self.top_line = self.top_line.min(max_top);
        self.scroll_to_cursor();
    }

    /// Expand every collapsed ancestor of `headline`
    fn reveal(&mut self, headline: HeadlineId) {
        let mut current = self.outline.parent(headline);
        while let Some(parent) = current {
            if !self.outline.headline(parent).is_expanded() {
                self.outline.set_expanded(parent, true);
            }
            current = self.outline.parent(parent);
        }
    }

    fn scroll_to_cursor(&mut self) {
        let line = self.cursor_line();
        if line < self.top_line {
            self.top_line = line;
        } else if line >= self.top_line + self.height {
            self.top_line = line + 1 - self.height;
        }
    }

    // ----- navigation -----

    /// Move the cursor. With `extend` the selection grows with it and the
    /// cursor never leaves the current headline.
    pub fn move_cursor(&mut self, motion: Motion, extend: bool) {
        let start = (self.headline, self.offset);

        match motion {
            Motion::Left => self.step_left(extend),
            Motion::Right => self.step_right(extend),
            Motion::Up => self.move_vertically(-1, extend),
            Motion::Down => self.move_vertically(1, extend),
            Motion::PageUp => self.page(-1, extend),
            Motion::PageDown => self.page(1, extend),
            Motion::Home => self.offset = 0,
            Motion::End => self.offset = self.outline.last_offset(self.headline),
        }

        if extend {
            let selection = self
                .selection
                .get_or_insert_with(|| Selection::new(start.0, start.1));
            selection.cursor = self.offset;
        } else {
            self.selection = None;
        }

        self.scroll_to_cursor();
    }

    fn step_left(&mut self, extend: bool) {
        if self.offset > 0 {
            self.offset -= 1;
        } else if !extend {
            if let Some(previous) = self.outline.previous_visible(self.headline) {
                self.headline = previous;
                self.offset = self.outline.last_offset(previous);
            }
        }
    }

    fn step_right(&mut self, extend: bool) {
        if self.offset < self.outline.last_offset(self.headline) {
            self.offset += 1;
        } else if !extend {
            if let Some(next) = self.outline.next_visible(self.headline) {
                self.headline = next;
                self.offset = 0;
            }
        }
    }

    /// Move `delta` layout lines keeping the column
    fn move_vertically(&mut self, delta: isize, extend: bool) {
        let current = self.cursor_line();
        let last = self.layout.len().saturating_sub(1);
        let target = current.saturating_add_signed(delta).min(last);
        if target == current {
            return;
        }

        let (Some(from), Some(to)) = (self.layout.get(current), self.layout.get(target)) else {
            return;
        };
        if extend && to.headline != self.headline {
            return;
        }

        let column = self.offset - from.start;
        self.headline = to.headline;
        self.offset = (to.start + column).min(to.last_offset());
    }

    fn page(&mut self, direction: isize, extend: bool) {
        let before = self.cursor_line();
        self.move_vertically(direction * self.height as isize, extend);
        if self.cursor_line() == before {
            return;
        }

        let max_top = self.layout.len().saturating_sub(self.height);
        self.top_line = if direction > 0 {
            (self.top_line + self.height).min(max_top)
        } else {
            self.top_line.saturating_sub(self.height)
        };
    }

    // ----- text edits -----

    /// Insert one character into `headline` before `position`
    pub fn insert_at(&mut self, headline: HeadlineId, position: usize, c: char) {
        let mut buf = [0u8; 4];
        self.outline
            .insert_text(headline, position, c.encode_utf8(&mut buf));
        if headline == self.headline {
            self.offset = after_insert(self.offset, position, 1);
        }
        if let Some(sel) = self.selection.as_mut().filter(|s| s.headline == headline) {
            sel.anchor = after_insert(sel.anchor, position, 1);
            sel.cursor = after_insert(sel.cursor, position, 1);
        }
        self.touch();
    }

    /// Delete `length` characters from `headline` starting at `position`
    pub fn delete_at(&mut self, headline: HeadlineId, position: usize, length: usize) {
        self.outline.delete_text(headline, position, length);
        if headline == self.headline {
            self.offset = after_delete(self.offset, position, length);
        }
        if let Some(sel) = self.selection.as_mut().filter(|s| s.headline == headline) {
            sel.anchor = after_delete(sel.anchor, position, length);
            sel.cursor = after_delete(sel.cursor, position, length);
        }
        self.touch();
    }

    /// Type a character at the cursor
    pub fn insert_char(&mut self, c: char) {
        self.selection = None;
        self.insert_at(self.headline, self.offset, c);
        self.offset += 1;
        self.scroll_to_cursor();
    }

    /// Delete before the cursor, joining with the previous headline at offset 0
    pub fn backspace(&mut self) {
        self.selection = None;
        if self.offset > 0 {
            self.delete_at(self.headline, self.offset - 1, 1);
        } else {
            self.join(Direction::Previous);
        }
    }

    /// Delete under the cursor, joining the next headline at the end
    pub fn delete_forward(&mut self) {
        self.selection = None;
        if self.offset < self.outline.last_offset(self.headline) {
            self.delete_at(self.headline, self.offset, 1);
        } else {
            self.join(Direction::Next);
        }
    }

    // ----- structural edits -----

    /// Enter: split the headline at the cursor. On a collapsed headline with
    /// children the cursor moves to the next headline instead.
    pub fn split_at_cursor(&mut self) {
        self.selection = None;
        let current = self.outline.headline(self.headline);
        if current.has_children() && !current.is_expanded() {
            if let Some(next) = self.outline.next_visible(self.headline) {
                self.headline = next;
                self.offset = 0;
                self.scroll_to_cursor();
            }
            return;
        }

        let new_id = self.outline.split_at(self.headline, self.offset);
        self.headline = new_id;
        self.offset = 0;
        self.touch();
    }

    /// Merge the current headline with a neighbour. Returns false at the
    /// edges of the document.
    pub fn join(&mut self, direction: Direction) -> bool {
        self.selection = None;
        match direction {
            Direction::Previous => {
                let Some((previous, join_at)) = self.outline.join_with_previous(self.headline)
                else {
                    return false;
                };
                self.headline = previous;
                self.offset = join_at;
            }
            Direction::Next => {
                if self.outline.join_with_next(self.headline).is_none() {
                    return false;
                }
            }
        }
        self.touch();
        true
    }

    /// Tab: indent the current headline
    pub fn promote(&mut self) -> bool {
        self.structural(|outline, id| outline.promote(id))
    }

    /// Shift+Tab: outdent the current headline
    pub fn demote(&mut self) -> bool {
        self.structural(|outline, id| outline.demote(id))
    }

    pub fn delete_current_headline(&mut self) {
        self.selection = None;
        self.headline = self.outline.delete_headline(self.headline);
        self.offset = 0;
        self.touch();
    }

    pub fn expand_current(&mut self) {
        self.set_current_expanded(true);
    }

    pub fn collapse_current(&mut self) {
        self.set_current_expanded(false);
    }

    fn set_current_expanded(&mut self, expanded: bool) {
        let headline = self.outline.headline(self.headline);
        if headline.is_expanded() == expanded || !headline.has_children() {
            return;
        }
        self.outline.set_expanded(self.headline, expanded);
        self.touch();
    }

    pub fn toggle_bullets(&mut self) {
        self.outline.toggle_bullets();
        self.touch();
    }

    pub fn toggle_multi_list(&mut self) {
        self.outline.toggle_multi_list();
        self.touch();
    }

    pub fn set_title(&mut self, title: &str) {
        self.outline.set_title(title);
        self.dirty = true;
    }

    fn structural(&mut self, edit: impl FnOnce(&mut Outline, HeadlineId) -> bool) -> bool {
        self.selection = None;
        let changed = edit(&mut self.outline, self.headline);
        if changed {
            self.touch();
        }
        changed
    }

    /// Mark dirty and rebuild the layout
    fn touch(&mut self) {
        self.dirty = true;
        self.relayout();
    }

    // ----- clipboard -----

    /// Copy the selected text. Returns it for the system clipboard.
    pub fn copy_selection(&mut self) -> Option<String> {
        let selection = self.selection.filter(|s| !s.is_empty())?;
        let (start, end) = selection.range();
        let text = self
            .outline
            .headline(selection.headline)
            .buffer()
            .slice(start, end);
        debug!("Copied {} characters", text.chars().count());
        self.clipboard = Some(text.clone());
        Some(text)
    }

    /// Copy the selected text and remove it
    pub fn cut_selection(&mut self) -> Option<String> {
        let text = self.copy_selection()?;
        let selection = self.selection.take()?;
        let (start, end) = selection.range();
        self.delete_at(selection.headline, start, end - start);
        self.offset = start;
        self.scroll_to_cursor();
        Some(text)
    }

    /// Insert the clipboard text at the cursor
    pub fn paste_selection(&mut self) -> bool {
        match self.clipboard.clone() {
            Some(text) => self.paste_text(&text),
            None => false,
        }
    }

    /// Insert `text` at the cursor; line breaks become spaces
    pub fn paste_text(&mut self, text: &str) -> bool {
        let text: String = text
            .chars()
            .filter(|&c| c != '\r')
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        if text.is_empty() {
            return false;
        }

        self.selection = None;
        self.outline.insert_text(self.headline, self.offset, &text);
        self.offset += text.chars().count();
        self.touch();
        true
    }
}

/// Where `offset` ends up after `count` characters are inserted at `position`
fn after_insert(offset: usize, position: usize, count: usize) -> usize {
    if offset > position {
        offset + count
    } else {
        offset
    }
}

/// Where `offset` ends up after `length` characters are removed at `position`
fn after_delete(offset: usize, position: usize, length: usize) -> usize {
    if offset <= position {
        offset
    } else if offset >= position + length {
        offset - length
    } else {
        position
    }
}
