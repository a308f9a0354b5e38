//! Fleet deployment: manual placement plus the bounded-retry random placer.

use alloc::vec::Vec;
use rand::Rng;

use crate::board::{Board, Mark};
use crate::common::PlacementError;
use crate::config::{MAX_PLACEMENT_ATTEMPTS, NUM_SHIPS, PLACEMENT_ORDER};
use crate::coord::Coordinate;
use crate::fleet::Fleet;
use crate::ship::{Orientation, Ship, ShipKind};

/// Contiguous run of `size` cells starting at `anchor`, or `None` when the
/// run leaves a `rows`×`cols` grid.
pub fn ship_run(
    anchor: Coordinate,
    orientation: Orientation,
    size: usize,
    rows: u8,
    cols: u8,
) -> Option<Vec<Coordinate>> {
    let (dr, dc) = orientation.step();
    let mut run = Vec::with_capacity(size);
    for i in 0..size {
        let i = u8::try_from(i).ok()?;
        let cell = anchor.offset(dr * i, dc * i)?;
        if cell.row() >= rows || cell.col() >= cols {
            return None;
        }
        run.push(cell);
    }
    Some(run)
}

/// A ship board being filled in, one ship kind at a time.
#[derive(Debug, Clone)]
pub struct Deployment {
    board: Board,
    ships: [Option<Ship>; NUM_SHIPS],
}

impl Deployment {
    /// Empty deployment on a `rows`×`cols` board.
    pub fn new(rows: u8, cols: u8) -> Self {
        Self {
            board: Board::new(rows, cols),
            ships: [None, None, None],
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn is_placed(&self, kind: ShipKind) -> bool {
        self.ships[kind.index()].is_some()
    }

    /// Place `kind` at `anchor` extending in `orientation`.
    pub fn deploy(
        &mut self,
        kind: ShipKind,
        anchor: Coordinate,
        orientation: Orientation,
    ) -> Result<(), PlacementError> {
        if self.is_placed(kind) {
            return Err(PlacementError::AlreadyPlaced(kind));
        }
        let cells = ship_run(
            anchor,
            orientation,
            kind.size(),
            self.board.rows(),
            self.board.cols(),
        )
        .ok_or(PlacementError::OutOfBounds)?;
        // ensure no overlap
        for cell in &cells {
            if self.board.get(*cell).map_err(|_| PlacementError::OutOfBounds)? != Mark::Empty {
                return Err(PlacementError::Overlap);
            }
        }
        for cell in &cells {
            self.board
                .set(*cell, Mark::Ship(kind))
                .map_err(|_| PlacementError::OutOfBounds)?;
        }
        self.ships[kind.index()] = Some(Ship::new(kind, cells));
        Ok(())
    }

    /// Random anchors and orientations for `kind` until one fits, at most
    /// `MAX_PLACEMENT_ATTEMPTS` times.
    pub fn deploy_random<R: Rng>(
        &mut self,
        rng: &mut R,
        kind: ShipKind,
    ) -> Result<(), PlacementError> {
        if self.is_placed(kind) {
            return Err(PlacementError::AlreadyPlaced(kind));
        }
        if self.board.rows() == 0 || self.board.cols() == 0 {
            return Err(PlacementError::Exhausted {
                ship: kind,
                attempts: 0,
            });
        }
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let anchor = Coordinate::new(
                rng.random_range(0..self.board.rows()),
                rng.random_range(0..self.board.cols()),
            );
            let orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            match self.deploy(kind, anchor, orientation) {
                Ok(()) => return Ok(()),
                Err(PlacementError::OutOfBounds) | Err(PlacementError::Overlap) => continue,
                Err(e) => return Err(e),
            }
        }
        Err(PlacementError::Exhausted {
            ship: kind,
            attempts: MAX_PLACEMENT_ATTEMPTS,
        })
    }

    /// Consumes the deployment, yielding the ship board and the fleet.
    pub fn finish(self) -> Result<(Board, Fleet), PlacementError> {
        let [d, s, b] = self.ships;
        match (d, s, b) {
            (Some(d), Some(s), Some(b)) => Ok((self.board, Fleet::from_ships([d, s, b]))),
            _ => Err(PlacementError::Incomplete),
        }
    }
}

/// Randomly place the whole fleet, largest ship first.
pub fn place_fleet<R: Rng>(
    rng: &mut R,
    rows: u8,
    cols: u8,
) -> Result<(Board, Fleet), PlacementError> {
    let mut deployment = Deployment::new(rows, cols);
    for kind in PLACEMENT_ORDER {
        deployment.deploy_random(rng, kind)?;
    }
    deployment.finish()
}
