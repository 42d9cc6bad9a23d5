//! Source locations attached to syntax nodes

use std::fmt;

/// Source location handed over by the parser.
///
/// `start..end` is a byte range into the source text (used when rendering
/// labels); `line` and `column` are what diagnostics quote. Lines are
/// 1-based, columns 0-based, matching what the parser reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// A span that only knows its line/column (no byte range)
    pub fn at(line: usize, column: usize) -> Self {
        Self::new(0, 0, line, column)
    }

    /// Smallest span covering both `self` and `other`
    pub fn to(self, other: Span) -> Span {
        let (first, _) = if self.start <= other.start {
            (self, other)
        } else {
            (other, self)
        };
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            line: first.line,
            column: first.column,
        }
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_quotes_line_and_column() {
        assert_eq!(Span::at(3, 7).to_string(), "line 3, column 7");
    }

    #[test]
    fn test_to_keeps_position_of_first() {
        let a = Span::new(10, 14, 2, 4);
        let b = Span::new(2, 6, 1, 2);
        let joined = a.to(b);
        assert_eq!(joined.range(), 2..14);
        assert_eq!((joined.line, joined.column), (1, 2));
    }
}
