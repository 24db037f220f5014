//! Module with the position type and the line index it is computed from.
//! A position is a struct that contains a line and column number.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A position in the input.
/// The position is represented by a line and column number.
/// The line and column numbers are 1-based. The column counts characters, not bytes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    /// The line number of the position.
    pub line: usize,
    /// The column number of the position.
    pub column: usize,
}

impl Position {
    /// Create a new position.
    pub fn new(line: usize, column: usize) -> Self {
        debug_assert!(line > 0, "line number must be greater than 0");
        debug_assert!(column > 0, "column number must be greater than 0");
        Self { line, column }
    }

    /// Get the line number of the position.
    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Get the column number of the position.
    #[inline]
    pub fn column(&self) -> usize {
        self.column
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line: {}, column: {}", self.line, self.column)
    }
}

/// Byte offsets of all line starts of an input.
#[derive(Debug, Clone, Default)]
pub(crate) struct LineIndex {
    line_offsets: Vec<usize>,
}

impl LineIndex {
    pub(crate) fn new(input: &str) -> Self {
        let mut line_offsets = vec![0];
        line_offsets.extend(
            input
                .char_indices()
                .filter(|(_, c)| *c == '\n')
                .map(|(i, _)| i + 1),
        );
        Self { line_offsets }
    }

    /// Returns the line and column numbers of the given offset.
    /// Offsets beyond the input are measured from the last line start.
    pub(crate) fn position(&self, input: &str, offset: usize) -> Position {
        let offset = offset.min(input.len());
        let line = match self.line_offsets.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        let line_start = self.line_offsets[line];
        let column = input
            .get(line_start..offset)
            .map_or(offset - line_start, |s| s.chars().count());
        Position::new(line + 1, column + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position() {
        let pos = Position::new(1, 1);
        assert_eq!(pos.line(), 1);
        assert_eq!(pos.column(), 1);
        assert_eq!(format!("{}", pos), "line: 1, column: 1");
    }

    #[test]
    fn test_line_index() {
        let input = "ab\ncd\n\näx";
        let index = LineIndex::new(input);
        assert_eq!(index.position(input, 0), Position::new(1, 1));
        assert_eq!(index.position(input, 2), Position::new(1, 3));
        assert_eq!(index.position(input, 3), Position::new(2, 1));
        assert_eq!(index.position(input, 6), Position::new(3, 1));
        assert_eq!(index.position(input, 7), Position::new(4, 1));
        // 'ä' takes two bytes but counts as one column
        assert_eq!(index.position(input, 9), Position::new(4, 2));
        assert_eq!(index.position(input, 100), Position::new(4, 3));
    }
}
