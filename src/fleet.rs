//! The three ships of a game, keyed by kind.

use alloc::collections::BTreeMap;

use crate::config::NUM_SHIPS;
use crate::coord::Coordinate;
use crate::ship::{Ship, ShipKind, ShipStatus};

/// A complete fleet. Only built by `Deployment::finish`, so every kind is
/// present and no two ships share a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fleet {
    ships: [Ship; NUM_SHIPS],
}

impl Fleet {
    pub(crate) fn from_ships(ships: [Ship; NUM_SHIPS]) -> Self {
        Self { ships }
    }

    pub fn ship(&self, kind: ShipKind) -> &Ship {
        &self.ships[kind.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ship> {
        self.ships.iter()
    }

    /// Ship occupying `coord`, if any.
    pub fn ship_at_mut(&mut self, coord: Coordinate) -> Option<&mut Ship> {
        self.ships.iter_mut().find(|s| s.contains(coord))
    }

    /// Returns `true` when all ships are sunk.
    pub fn all_sunk(&self) -> bool {
        self.ships.iter().all(Ship::is_sunk)
    }

    pub fn afloat(&self) -> usize {
        self.ships.iter().filter(|s| !s.is_sunk()).count()
    }

    /// Per-ship status keyed by the lowercase ship key.
    pub fn statuses(&self) -> BTreeMap<&'static str, ShipStatus> {
        self.ships
            .iter()
            .map(|s| (s.kind().key(), s.status()))
            .collect()
    }
}
