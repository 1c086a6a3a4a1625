//! Character selection within a single headline

use crate::outline::HeadlineId;

/// A selection of characters in one headline.
///
/// `anchor` stays where the selection started; `cursor` follows the caret.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    pub headline: HeadlineId,
    pub anchor: usize,
    pub cursor: usize,
}

impl Selection {
    /// Create an empty selection at an offset
    pub fn new(headline: HeadlineId, offset: usize) -> Self {
        Self {
            headline,
            anchor: offset,
            cursor: offset,
        }
    }

    /// Half-open `(start, end)` span of the selection
    pub fn range(&self) -> (usize, usize) {
        let a = self.anchor.min(self.cursor);
        let b = self.anchor.max(self.cursor);
        (a, b)
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.cursor
    }

    pub fn len(&self) -> usize {
        let (start, end) = self.range();
        end - start
    }

    /// Whether `offset` in `headline` is covered
    pub fn contains(&self, headline: HeadlineId, offset: usize) -> bool {
        let (start, end) = self.range();
        self.headline == headline && offset >= start && offset < end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_forward_selection() {
        let sel = Selection {
            headline: 1,
            anchor: 5,
            cursor: 10,
        };
        assert_eq!(sel.range(), (5, 10));
        assert_eq!(sel.len(), 5);
    }

    #[test]
    fn test_range_backward_selection() {
        let sel = Selection {
            headline: 1,
            anchor: 10,
            cursor: 5,
        };
        assert_eq!(sel.range(), (5, 10));
    }

    #[test]
    fn test_new_selection_is_empty() {
        let sel = Selection::new(3, 7);
        assert_eq!(sel.range(), (7, 7));
        assert!(sel.is_empty());
        assert!(!sel.contains(3, 7));
    }

    #[test]
    fn test_contains_checks_headline() {
        let sel = Selection {
            headline: 2,
            anchor: 1,
            cursor: 4,
        };
        assert!(sel.contains(2, 1));
        assert!(sel.contains(2, 3));
        assert!(!sel.contains(2, 4));
        assert!(!sel.contains(1, 2));
    }
}
