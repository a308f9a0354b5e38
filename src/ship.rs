//! Ship kinds and the hit bookkeeping of a placed ship.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use crate::coord::Coordinate;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Extends towards increasing columns.
    Horizontal,
    /// Extends towards increasing rows.
    Vertical,
}

impl Orientation {
    /// Row and column step between consecutive cells.
    pub fn step(self) -> (u8, u8) {
        match self {
            Orientation::Horizontal => (0, 1),
            Orientation::Vertical => (1, 0),
        }
    }
}

/// The three ship kinds of the fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShipKind {
    Destroyer,
    Submarine,
    Battleship,
}

impl ShipKind {
    pub const ALL: [ShipKind; 3] = [
        ShipKind::Destroyer,
        ShipKind::Submarine,
        ShipKind::Battleship,
    ];

    /// Ship's display name, also used on the wire.
    pub fn name(self) -> &'static str {
        match self {
            ShipKind::Destroyer => "Destroyer",
            ShipKind::Submarine => "Submarine",
            ShipKind::Battleship => "Battleship",
        }
    }

    /// Lowercase key used in fleet snapshots.
    pub fn key(self) -> &'static str {
        match self {
            ShipKind::Destroyer => "destroyer",
            ShipKind::Submarine => "submarine",
            ShipKind::Battleship => "battleship",
        }
    }

    /// Number of cells the ship occupies.
    pub fn size(self) -> usize {
        match self {
            ShipKind::Destroyer => 1,
            ShipKind::Submarine => 2,
            ShipKind::Battleship => 3,
        }
    }

    /// Marker letter written on the ship board.
    pub fn letter(self) -> char {
        match self {
            ShipKind::Destroyer => 'D',
            ShipKind::Submarine => 'S',
            ShipKind::Battleship => 'B',
        }
    }

    pub fn index(self) -> usize {
        match self {
            ShipKind::Destroyer => 0,
            ShipKind::Submarine => 1,
            ShipKind::Battleship => 2,
        }
    }
}

/// A placed ship: its cells never change, its hits only grow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ship {
    kind: ShipKind,
    cells: Vec<Coordinate>,
    hits: BTreeSet<Coordinate>,
}

impl Ship {
    pub(crate) fn new(kind: ShipKind, cells: Vec<Coordinate>) -> Self {
        Self {
            kind,
            cells,
            hits: BTreeSet::new(),
        }
    }

    pub fn kind(&self) -> ShipKind {
        self.kind
    }

    /// Occupied cells, starting at the anchor.
    pub fn cells(&self) -> &[Coordinate] {
        &self.cells
    }

    pub fn hits(&self) -> &BTreeSet<Coordinate> {
        &self.hits
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        self.cells.contains(&coord)
    }

    /// Records a hit at `coord`. Returns `false` when the ship does not
    /// occupy `coord`.
    pub fn register_hit(&mut self, coord: Coordinate) -> bool {
        if self.contains(coord) {
            self.hits.insert(coord);
            true
        } else {
            false
        }
    }

    /// Check if the ship is sunk (all segments hit).
    pub fn is_sunk(&self) -> bool {
        self.hits.len() == self.kind.size()
    }

    pub fn status(&self) -> ShipStatus {
        ShipStatus {
            name: self.kind.name(),
            size: self.kind.size(),
            hits: self.hits.len(),
            sunk: self.is_sunk(),
            cells: self.cells.clone(),
        }
    }
}

/// Serializable per-ship view for snapshots and events.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct ShipStatus {
    pub name: &'static str,
    pub size: usize,
    pub hits: usize,
    pub sunk: bool,
    pub cells: Vec<Coordinate>,
}
