//! Piece table text buffer
//!
//! The original text is captured once and never modified. Inserted text is
//! appended to an add-log, and the logical text is described by an ordered
//! list of pieces pointing into one of the two buffers. Edits only rewrite
//! the piece list.

use std::fmt;

/// Which backing buffer a piece points into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Original,
    Add,
}

/// A contiguous span of one backing buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub source: Source,
    pub start: usize,
    pub length: usize,
}

impl Piece {
    fn end(&self) -> usize {
        self.start + self.length
    }
}

/// Character-addressable mutable text buffer
#[derive(Clone, Default)]
pub struct PieceTable {
    original: Vec<char>,
    add: Vec<char>,
    pieces: Vec<Piece>,
    len: usize,
}

impl PieceTable {
    /// Create a buffer whose original content is `text`
    pub fn new(text: &str) -> Self {
        let original: Vec<char> = text.chars().collect();
        let len = original.len();
        let pieces = if len == 0 {
            Vec::new()
        } else {
            vec![Piece {
                source: Source::Original,
                start: 0,
                length: len,
            }]
        };

        Self {
            original,
            add: Vec::new(),
            pieces,
            len,
        }
    }

    /// Number of characters in the logical text
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current piece list, in logical order
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Insert `text` so that its first character lands at `position`.
    ///
    /// Panics if `position > len()`.
    pub fn insert(&mut self, position: usize, text: &str) {
        assert!(
            position <= self.len,
            "insert position {} out of range (len {})",
            position,
            self.len
        );

        let start = self.add.len();
        self.add.extend(text.chars());
        let length = self.add.len() - start;
        if length == 0 {
            return;
        }

        let piece = Piece {
            source: Source::Add,
            start,
            length,
        };

        if position == 0 {
            self.pieces.insert(0, piece);
        } else if position == self.len {
            self.pieces.push(piece);
        } else {
            let (index, offset) = self.locate(position);
            if offset == 0 {
                // Already on a piece boundary
                self.pieces.insert(index, piece);
            } else {
                let target = self.pieces[index];
                let left = Piece {
                    length: offset,
                    ..target
                };
                let right = Piece {
                    start: target.start + offset,
                    length: target.length - offset,
                    ..target
                };
                self.pieces.splice(index..=index, [left, piece, right]);
            }
        }

        self.len += length;
    }

    /// Append `text` at the logical end
    pub fn append(&mut self, text: &str) {
        self.insert(self.len, text);
    }

    /// Remove `length` characters starting at `position`.
    ///
    /// Panics if the span reaches past `len()`.
    pub fn delete(&mut self, position: usize, length: usize) {
        assert!(
            position
                .checked_add(length)
                .is_some_and(|end| end <= self.len),
            "delete span {}+{} out of range (len {})",
            position,
            length,
            self.len
        );
        if length == 0 {
            return;
        }

        let (index, offset) = self.locate(position);
        let first = self.pieces[index];

        if offset + length <= first.length {
            if offset == 0 {
                let piece = &mut self.pieces[index];
                piece.start += length;
                piece.length -= length;
            } else if offset + length == first.length {
                self.pieces[index].length -= length;
            } else {
                let left = Piece {
                    length: offset,
                    ..first
                };
                let right = Piece {
                    start: first.start + offset + length,
                    length: first.length - offset - length,
                    ..first
                };
                self.pieces.splice(index..=index, [left, right]);
            }
        } else {
            let mut remaining = length - (first.length - offset);
            self.pieces[index].length = offset;

            let mut next = index + 1;
            while remaining > 0 {
                let piece = &mut self.pieces[next];
                if piece.length <= remaining {
                    remaining -= piece.length;
                    piece.length = 0;
                    next += 1;
                } else {
                    piece.start += remaining;
                    piece.length -= remaining;
                    remaining = 0;
                }
            }
        }

        self.pieces.retain(|p| p.length > 0);
        self.len -= length;
    }

    /// Iterate over the logical text
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.pieces
            .iter()
            .flat_map(move |piece| self.span(piece).iter().copied())
    }

    /// Materialize the logical text
    pub fn text(&self) -> String {
        self.chars().collect()
    }

    /// Character at `position`, if any
    pub fn char_at(&self, position: usize) -> Option<char> {
        let (index, offset) = self.locate(position);
        self.pieces
            .get(index)
            .map(|piece| self.span(piece)[offset])
    }

    /// Text between two character offsets (end exclusive)
    pub fn slice(&self, start: usize, end: usize) -> String {
        assert!(
            start <= end && end <= self.len,
            "slice {}..{} out of range (len {})",
            start,
            end,
            self.len
        );
        self.chars().skip(start).take(end - start).collect()
    }

    fn span(&self, piece: &Piece) -> &[char] {
        let buffer = match piece.source {
            Source::Original => &self.original,
            Source::Add => &self.add,
        };
        &buffer[piece.start..piece.end()]
    }

    /// Index of the piece containing `position` and the offset inside it.
    /// Returns `(pieces.len(), 0)` for the logical end.
    fn locate(&self, position: usize) -> (usize, usize) {
        let mut total = 0;
        for (index, piece) in self.pieces.iter().enumerate() {
            if position < total + piece.length {
                return (index, position - total);
            }
            total += piece.length;
        }
        (self.pieces.len(), 0)
    }
}

impl fmt::Display for PieceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for piece in &self.pieces {
            for c in self.span(piece) {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for PieceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PieceTable")
            .field("text", &self.text())
            .field("pieces", &self.pieces)
            .finish()
    }
}

impl From<&str> for PieceTable {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

    #[test]
    fn test_new_empty() {
        let pt = PieceTable::new("");
        assert!(pt.is_empty());
        assert!(pt.pieces().is_empty());
        assert_eq!(pt.text(), "");
    }

    #[test]
    fn test_insert_at_beginning() {
        let mut pt = PieceTable::new(BASE);
        pt.insert(0, "FOO");
        assert_eq!(pt.text(), format!("FOO{}", BASE));
        assert_eq!(pt.pieces()[0].source, Source::Add);
    }

    #[test]
    fn test_insert_at_end() {
        let mut pt = PieceTable::new(BASE);
        pt.insert(26, "FOO");
        assert_eq!(pt.text(), format!("{}FOO", BASE));
        assert_eq!(pt.pieces().len(), 2);
    }

    #[test]
    fn test_insert_in_middle_splits_piece() {
        let mut pt = PieceTable::new(BASE);
        pt.insert(13, "FOO");
        assert_eq!(pt.text(), format!("{}FOO{}", &BASE[..13], &BASE[13..]));
        assert_eq!(pt.pieces().len(), 3);
        assert_eq!(pt.pieces()[0].length, 13);
        assert_eq!(pt.pieces()[2].start, 13);
    }

    #[test]
    fn test_insert_on_piece_boundary() {
        let mut pt = PieceTable::new(BASE);
        pt.insert(13, "FOO");
        pt.insert(16, "BAR");
        assert_eq!(pt.text(), format!("{}FOOBAR{}", &BASE[..13], &BASE[13..]));
        assert_eq!(pt.pieces().len(), 4);
    }

    #[test]
    fn test_multiple_inserts() {
        let mut pt = PieceTable::new(BASE);
        pt.insert(5, "FOO");
        pt.insert(10, "BAR");
        pt.insert(15, "123");
        pt.insert(20, "456789");
        pt.insert(7, "abc");
        let answer = format!(
            "{}FOabcO{}BAR{}123{}456789{}",
            &BASE[..5],
            &BASE[5..7],
            &BASE[7..9],
            &BASE[9..11],
            &BASE[11..]
        );
        assert_eq!(pt.text(), answer);
        assert_eq!(pt.len(), answer.len());
    }

    #[test]
    fn test_delete_across_multiple_pieces() {
        let mut pt = PieceTable::new(BASE);
        pt.insert(5, "FOO");
        pt.insert(10, "BAR");
        pt.insert(15, "123");
        pt.insert(20, "456789");
        pt.insert(7, "abc");

        pt.delete(6, 9);
        let answer = format!(
            "{}R{}123{}456789{}",
            &BASE[..6],
            &BASE[7..9],
            &BASE[9..11],
            &BASE[11..]
        );
        assert_eq!(pt.text(), answer);
        assert!(pt.pieces().iter().all(|p| p.length > 0));
    }

    #[test]
    fn test_delete_at_beginning() {
        let mut pt = PieceTable::new(BASE);
        pt.delete(0, 5);
        assert_eq!(pt.text(), &BASE[5..]);
        assert_eq!(pt.pieces()[0].start, 5);
    }

    #[test]
    fn test_delete_at_end() {
        let mut pt = PieceTable::new(BASE);
        pt.delete(BASE.len() - 5, 5);
        assert_eq!(pt.text(), &BASE[..BASE.len() - 5]);
    }

    #[test]
    fn test_delete_interior_splits_piece() {
        let mut pt = PieceTable::new(BASE);
        pt.delete(10, 3);
        assert_eq!(pt.text(), format!("{}{}", &BASE[..10], &BASE[13..]));
        assert_eq!(pt.pieces().len(), 2);
    }

    #[test]
    fn test_delete_everything() {
        let mut pt = PieceTable::new("abc");
        pt.insert(3, "def");
        pt.delete(0, 6);
        assert!(pt.is_empty());
        assert!(pt.pieces().is_empty());
        pt.insert(0, "x");
        assert_eq!(pt.text(), "x");
    }

    #[test]
    fn test_noop_edits() {
        let mut pt = PieceTable::new(BASE);
        pt.insert(4, "xyz");
        let before = pt.text();
        let pieces = pt.pieces().to_vec();

        pt.delete(3, 0);
        pt.insert(3, "");
        pt.delete(pt.len(), 0);

        assert_eq!(pt.text(), before);
        assert_eq!(pt.pieces(), pieces.as_slice());
    }

    #[test]
    fn test_original_buffer_never_mutated() {
        let mut pt = PieceTable::new("hello");
        pt.delete(1, 3);
        pt.insert(1, "ipp");
        assert_eq!(pt.text(), "hippo");
        assert_eq!(pt.original.iter().collect::<String>(), "hello");
        assert_eq!(pt.add.iter().collect::<String>(), "ipp");
    }

    #[test]
    fn test_multibyte_characters() {
        let mut pt = PieceTable::new("héllo wörld");
        pt.insert(5, ",");
        assert_eq!(pt.text(), "héllo, wörld");
        assert_eq!(pt.char_at(8), Some('ö'));
        pt.delete(1, 1);
        assert_eq!(pt.text(), "hllo, wörld");
    }

    #[test]
    fn test_char_at_and_slice() {
        let mut pt = PieceTable::new("abcdef");
        pt.insert(3, "XYZ");
        assert_eq!(pt.char_at(0), Some('a'));
        assert_eq!(pt.char_at(3), Some('X'));
        assert_eq!(pt.char_at(8), Some('f'));
        assert_eq!(pt.char_at(9), None);
        assert_eq!(pt.slice(2, 7), "cXYZd");
        assert_eq!(pt.to_string(), "abcXYZdef");
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_insert_past_end_panics() {
        let mut pt = PieceTable::new("abc");
        pt.insert(4, "x");
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_delete_past_end_panics() {
        let mut pt = PieceTable::new("abc");
        pt.delete(2, 2);
    }

    quickcheck::quickcheck! {
        fn prop_matches_naive_string(initial: String, ops: Vec<(bool, usize, usize, String)>) -> bool {
            let mut table = PieceTable::new(&initial);
            let mut naive: Vec<char> = initial.chars().collect();

            for (is_insert, a, b, text) in ops {
                let position = a % (naive.len() + 1);
                if is_insert {
                    table.insert(position, &text);
                    naive.splice(position..position, text.chars());
                } else {
                    let length = b % (naive.len() - position + 1);
                    table.delete(position, length);
                    naive.drain(position..position + length);
                }
            }

            table.len() == naive.len() && table.text() == naive.iter().collect::<String>()
        }
    }
}
