//! Grid coordinates written as a row letter and a 1-based column, e.g. `B3`.

use core::fmt;
use core::str::FromStr;

use crate::common::AttackError;

/// A zero-based (row, col) cell address.
///
/// Parsing accepts uppercase row letters `A..Z` followed by a decimal column
/// starting at `1` with no leading zeros, so every accepted string is the
/// `Display` form of its coordinate. Grid bounds are not checked here; that
/// is the board's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coordinate {
    row: u8,
    col: u8,
}

impl Coordinate {
    /// Rows past `Z` (25) have no wire form; they display with a `?` row
    /// letter and never parse back.
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn col(&self) -> u8 {
        self.col
    }

    /// Row letter as written on the wire.
    pub fn row_letter(&self) -> char {
        if self.row < 26 {
            (b'A' + self.row) as char
        } else {
            '?'
        }
    }

    /// Cell `offset` steps away, or `None` if the index would overflow.
    pub(crate) fn offset(&self, d_row: u8, d_col: u8) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add(d_row)?,
            col: self.col.checked_add(d_col)?,
        })
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row_letter(), self.col as u16 + 1)
    }
}

impl FromStr for Coordinate {
    type Err = AttackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let row = match chars.next() {
            Some(c @ 'A'..='Z') => c as u8 - b'A',
            _ => return Err(AttackError::Malformed),
        };
        let digits = chars.as_str();
        if digits.is_empty()
            || digits.starts_with('0')
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(AttackError::Malformed);
        }
        let col: u8 = digits.parse().map_err(|_| AttackError::Malformed)?;
        Ok(Self { row, col: col - 1 })
    }
}

#[cfg(feature = "std")]
impl serde::Serialize for Coordinate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
