//! Visual projection of an outline
//!
//! [`LineLayout`] flattens the visible part of the tree into word-wrapped
//! [`VisualLine`]s. It is the single mapping between screen rows and
//! `(headline, offset)` positions, and is rebuilt after every edit, resize or
//! expand/collapse.

use crate::outline::{BulletStyle, HeadlineId, Outline, APPEND_MARKER};
use std::collections::HashMap;
use std::ops::Range;
use unicode_width::UnicodeWidthChar;

/// Columns added per nesting level
pub const LEVEL_INDENT: usize = 3;

/// Columns reserved for a bullet and its padding
pub const BULLET_WIDTH: usize = 3;

pub const BULLET_COLLAPSED: char = '\u{25B8}';
pub const BULLET_EXPANDED: char = '\u{25BE}';
pub const BULLET_LEAF: char = '\u{2022}';

/// One screen row: a fragment of a headline's text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualLine {
    pub headline: HeadlineId,
    /// Only the first fragment of a headline carries the bullet
    pub bullet: Option<char>,
    /// Column of the bullet (or text, when there is none) on the first fragment
    pub indent: usize,
    /// Column where text starts
    pub hanging_indent: usize,
    /// Offset of the first character in the headline's buffer
    pub start: usize,
    pub len: usize,
}

impl VisualLine {
    /// Offset one past the last character of this fragment
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end()
    }

    /// Fragment text with the append marker removed
    pub fn text(&self, outline: &Outline) -> String {
        outline
            .headline(self.headline)
            .buffer()
            .slice(self.start, self.end())
            .chars()
            .filter(|&c| c != APPEND_MARKER)
            .collect()
    }

    /// Last offset the cursor can occupy on this line
    pub fn last_offset(&self) -> usize {
        self.end().saturating_sub(1).max(self.start)
    }
}

/// The flattened, wrapped outline
#[derive(Debug, Clone, Default)]
pub struct LineLayout {
    lines: Vec<VisualLine>,
    width: usize,
    spans: HashMap<HeadlineId, Range<usize>>,
}

impl LineLayout {
    /// Lay out every visible headline for a viewport `width` columns wide
    pub fn build(outline: &Outline, width: usize, base_indent: usize) -> Self {
        let mut lines = Vec::new();
        let mut spans = HashMap::new();

        for id in outline.visible() {
            let level = outline.level(id);
            let indent = base_indent + level * LEVEL_INDENT;
            let bullet = bullet_for(outline, id, level);
            let hanging_indent = if bullet.is_some() {
                indent + BULLET_WIDTH
            } else {
                indent
            };

            let chars: Vec<char> = outline.headline(id).buffer().chars().collect();
            let first = lines.len();
            for (i, (start, len)) in wrap(&chars, width.saturating_sub(hanging_indent))
                .into_iter()
                .enumerate()
            {
                lines.push(VisualLine {
                    headline: id,
                    bullet: if i == 0 { bullet } else { None },
                    indent,
                    hanging_indent,
                    start,
                    len,
                });
            }
            spans.insert(id, first..lines.len());
        }

        Self {
            lines,
            width,
            spans,
        }
    }

    pub fn lines(&self) -> &[VisualLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&VisualLine> {
        self.lines.get(index)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Line indices occupied by `headline`, or None when it is hidden
    pub fn lines_of(&self, headline: HeadlineId) -> Option<Range<usize>> {
        self.spans.get(&headline).cloned()
    }

    pub fn first_line_of(&self, headline: HeadlineId) -> Option<usize> {
        self.spans.get(&headline).map(|r| r.start)
    }

    /// Line holding `offset` within `headline`
    pub fn line_of(&self, headline: HeadlineId, offset: usize) -> Option<usize> {
        let range = self.spans.get(&headline)?;
        let lines = &self.lines[range.clone()];
        let index = lines
            .iter()
            .position(|line| line.contains(offset))
            // Offsets past the end land on the last fragment
            .unwrap_or(lines.len().saturating_sub(1));
        Some(range.start + index)
    }
}

fn bullet_for(outline: &Outline, id: HeadlineId, level: usize) -> Option<char> {
    if outline.bullets == BulletStyle::Plain || (outline.multi_list && level == 0) {
        return None;
    }
    let headline = outline.headline(id);
    Some(if !headline.has_children() {
        BULLET_LEAF
    } else if headline.is_expanded() {
        BULLET_EXPANDED
    } else {
        BULLET_COLLAPSED
    })
}

/// Display width of a character; the append marker takes no space
pub fn char_width(c: char) -> usize {
    if c == APPEND_MARKER {
        0
    } else {
        c.width().unwrap_or(0)
    }
}

/// Greedy word wrap. Returns `(start, len)` spans covering `chars`.
/// Whitespace after a break stays on the fragment it follows and is not
/// counted against `available`.
fn wrap(chars: &[char], available: usize) -> Vec<(usize, usize)> {
    let available = available.max(1);
    let mut spans = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        let mut width = 0;
        let mut end = pos;
        while end < chars.len() {
            let w = char_width(chars[end]);
            if end > pos && width + w > available {
                break;
            }
            width += w;
            end += 1;
        }

        if end < chars.len() && chars[end].is_whitespace() {
            // Separators at the break hang off the end of the fragment
            while end < chars.len() && chars[end].is_whitespace() {
                end += 1;
            }
        } else if end < chars.len() {
            // Break after the last space; overlong words are cut mid-word
            if let Some(space) = (pos + 1..end).rev().find(|&i| chars[i].is_whitespace()) {
                end = space + 1;
            }
        }

        spans.push((pos, end - pos));
        pos = end;
    }

    spans
}
