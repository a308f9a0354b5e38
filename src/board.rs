//! Fixed-size grid of cell marks.
//!
//! The same type backs both layers of a game: the ship board (written once
//! during placement) and the impact board (written by attack resolution).

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::common::BoardError;
use crate::coord::Coordinate;
use crate::ship::ShipKind;

/// Contents of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Empty,
    Ship(ShipKind),
    Hit,
    Miss,
}

impl Mark {
    pub fn symbol(self) -> char {
        match self {
            Mark::Empty => '~',
            Mark::Ship(kind) => kind.letter(),
            Mark::Hit => 'X',
            Mark::Miss => 'O',
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    rows: u8,
    cols: u8,
    cells: Vec<Mark>,
}

impl Board {
    /// Create a `rows`×`cols` board with every cell empty.
    pub fn new(rows: u8, cols: u8) -> Self {
        Board {
            rows,
            cols,
            cells: vec![Mark::Empty; rows as usize * cols as usize],
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        coord.row() < self.rows && coord.col() < self.cols
    }

    pub fn get(&self, coord: Coordinate) -> Result<Mark, BoardError> {
        let idx = self.index(coord)?;
        Ok(self.cells[idx])
    }

    pub fn set(&mut self, coord: Coordinate, mark: Mark) -> Result<(), BoardError> {
        let idx = self.index(coord)?;
        self.cells[idx] = mark;
        Ok(())
    }

    /// All coordinates in row-major order.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        (0..self.rows).flat_map(move |r| (0..self.cols).map(move |c| Coordinate::new(r, c)))
    }

    /// Returns `true` if no cell carries a mark.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|m| *m == Mark::Empty)
    }

    /// Number of cells holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|m| **m == mark).count()
    }

    /// `"A1" -> '~'` view used by snapshots.
    pub fn symbols(&self) -> BTreeMap<String, char> {
        self.coordinates()
            .map(|coord| (coord.to_string(), self.cells[self.flat(coord)].symbol()))
            .collect()
    }

    #[inline]
    fn flat(&self, coord: Coordinate) -> usize {
        coord.row() as usize * self.cols as usize + coord.col() as usize
    }

    #[inline]
    fn index(&self, coord: Coordinate) -> Result<usize, BoardError> {
        if self.contains(coord) {
            Ok(self.flat(coord))
        } else {
            Err(BoardError::OutOfBounds {
                row: coord.row(),
                col: coord.col(),
            })
        }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for c in 0..self.cols {
            write!(f, " {}", c as u16 + 1)?;
        }
        writeln!(f)?;
        for r in 0..self.rows {
            write!(f, "{} ", Coordinate::new(r, 0).row_letter())?;
            for c in 0..self.cols {
                write!(f, " {}", self.cells[self.flat(Coordinate::new(r, c))].symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
