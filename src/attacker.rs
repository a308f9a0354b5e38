#![cfg(feature = "std")]
//! Attacker side: fires coordinates at a target and mirrors the replies on
//! its own tracking board.

use anyhow::anyhow;
use log::info;

use crate::board::{Board, Mark};
use crate::config::{BOARD_COLS, BOARD_ROWS};
use crate::coord::Coordinate;
use crate::protocol::{AttackReply, ReplyKind};
use crate::transport::AttackTarget;

/// Progress of the attacking player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackerState {
    /// No attack sent yet.
    Start,
    Attacking,
    /// One of our attacks destroyed the fleet.
    Victory,
    /// The server reported the game was already over.
    Ended,
}

pub struct Attacker<T: AttackTarget> {
    target: T,
    board: Board,
    state: AttackerState,
    attacks: usize,
    ships_sunk: usize,
}

impl<T: AttackTarget> Attacker<T> {
    pub fn new(target: T) -> Self {
        Self {
            target,
            board: Board::new(BOARD_ROWS, BOARD_COLS),
            state: AttackerState::Start,
            attacks: 0,
            ships_sunk: 0,
        }
    }

    /// Fire at `coord`. Coordinates outside the tracking board are refused
    /// without contacting the target.
    pub async fn fire(&mut self, coord: &str) -> anyhow::Result<AttackReply> {
        let cell = coord
            .parse::<Coordinate>()
            .ok()
            .filter(|c| self.board.contains(*c))
            .ok_or_else(|| anyhow!("{:?} is not a coordinate on the board", coord))?;

        let reply = self.target.attack(coord).await?;
        self.attacks += 1;
        self.record(cell, &reply)?;
        info!("{} -> {}", coord, reply);
        Ok(reply)
    }

    fn record(&mut self, cell: Coordinate, reply: &AttackReply) -> anyhow::Result<()> {
        if self.state == AttackerState::Start {
            self.state = AttackerState::Attacking;
        }
        match reply.kind {
            ReplyKind::Hit => self.board.set(cell, Mark::Hit)?,
            ReplyKind::Sunk => {
                self.board.set(cell, Mark::Hit)?;
                self.ships_sunk += 1;
            }
            ReplyKind::FleetDestroyed => {
                self.board.set(cell, Mark::Hit)?;
                self.ships_sunk += 1;
                self.state = AttackerState::Victory;
            }
            // A rejected repeat shares the miss reply; keep an earlier hit.
            ReplyKind::Miss => {
                if self.board.get(cell)? == Mark::Empty {
                    self.board.set(cell, Mark::Miss)?;
                }
            }
            ReplyKind::GameOver => {
                if self.state != AttackerState::Victory {
                    self.state = AttackerState::Ended;
                }
            }
        }
        Ok(())
    }

    pub fn state(&self) -> AttackerState {
        self.state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn attacks(&self) -> usize {
        self.attacks
    }

    pub fn ships_sunk(&self) -> usize {
        self.ships_sunk
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    /// Forget all progress, keeping the target.
    pub fn reset(&mut self) {
        self.board = Board::new(BOARD_ROWS, BOARD_COLS);
        self.state = AttackerState::Start;
        self.attacks = 0;
        self.ships_sunk = 0;
    }
}
