//! Attack resolution state machine for the defending side.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::format;
use alloc::string::String;
use rand::Rng;

use crate::board::{Board, Mark};
use crate::common::{AttackError, PlacementError};
use crate::config::{BOARD_COLS, BOARD_ROWS};
use crate::coord::Coordinate;
use crate::fleet::Fleet;
use crate::placement::place_fleet;
use crate::ship::{ShipKind, ShipStatus};

pub const CODE_SUNK: u16 = 200;
pub const CODE_HIT: u16 = 202;
pub const CODE_MISS: u16 = 404;
pub const CODE_OVER: u16 = 500;

pub const MSG_MISS: &str = "fallido";
pub const MSG_FLEET_DESTROYED: &str = "Toda la flota ha sido destruida. Fin del juego";
pub const MSG_GAME_OVER: &str = "Juego terminado. Toda la flota ha sido destruida";

/// Current status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    AwaitingAttacks,
    GameOver,
}

/// Result of a single attack.
///
/// On the wire `Miss` and every rejection share code 404, and
/// `FleetDestroyed` and `Rejected(GameOver)` share code 500; the message
/// text tells the two 500s apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackOutcome {
    Miss,
    Hit(ShipKind),
    Sunk(ShipKind),
    /// This attack sank the last ship afloat.
    FleetDestroyed(ShipKind),
    Rejected(AttackError),
}

impl AttackOutcome {
    pub fn code(&self) -> u16 {
        match self {
            AttackOutcome::Miss => CODE_MISS,
            AttackOutcome::Hit(_) => CODE_HIT,
            AttackOutcome::Sunk(_) => CODE_SUNK,
            AttackOutcome::FleetDestroyed(_) => CODE_OVER,
            AttackOutcome::Rejected(AttackError::GameOver) => CODE_OVER,
            AttackOutcome::Rejected(_) => CODE_MISS,
        }
    }

    pub fn message(&self) -> String {
        match self {
            AttackOutcome::Miss => String::from(MSG_MISS),
            AttackOutcome::Hit(kind) => format!("impactado:{}", kind.name()),
            AttackOutcome::Sunk(kind) => format!("hundido:{}", kind.name()),
            AttackOutcome::FleetDestroyed(_) => String::from(MSG_FLEET_DESTROYED),
            AttackOutcome::Rejected(AttackError::GameOver) => String::from(MSG_GAME_OVER),
            AttackOutcome::Rejected(_) => String::from(MSG_MISS),
        }
    }

    /// Ship struck by this attack.
    pub fn ship(&self) -> Option<ShipKind> {
        match self {
            AttackOutcome::Hit(k) | AttackOutcome::Sunk(k) | AttackOutcome::FleetDestroyed(k) => {
                Some(*k)
            }
            AttackOutcome::Miss | AttackOutcome::Rejected(_) => None,
        }
    }

    /// Whether the attack changed the game state.
    pub fn is_applied(&self) -> bool {
        !matches!(self, AttackOutcome::Rejected(_))
    }

    pub fn result(&self) -> AttackResult {
        AttackResult {
            code: format!("{}", self.code()),
            message: self.message(),
        }
    }
}

/// Code and message pair as shown to dashboards.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct AttackResult {
    pub code: String,
    pub message: String,
}

/// Serializable view of the whole game.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct GameSnapshot {
    pub board: BTreeMap<String, char>,
    pub impact_board: BTreeMap<String, char>,
    pub last_attack: Option<Coordinate>,
    pub last_result: Option<AttackResult>,
    pub total_attacks: usize,
    pub game_over: bool,
    pub fleet: BTreeMap<&'static str, ShipStatus>,
}

/// Everything one game owns. Replaced as a whole on reset.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    impacts: Board,
    fleet: Fleet,
    attacked: BTreeSet<Coordinate>,
    game_over: bool,
    last_attack: Option<Coordinate>,
    last_result: Option<AttackOutcome>,
}

impl GameState {
    /// Fresh game around an already placed fleet.
    pub fn new(board: Board, fleet: Fleet) -> Self {
        let impacts = Board::new(board.rows(), board.cols());
        Self {
            board,
            impacts,
            fleet,
            attacked: BTreeSet::new(),
            game_over: false,
            last_attack: None,
            last_result: None,
        }
    }

    /// Fresh game with a randomly placed fleet on the standard grid.
    pub fn random<R: Rng>(rng: &mut R) -> Result<Self, PlacementError> {
        let (board, fleet) = place_fleet(rng, BOARD_ROWS, BOARD_COLS)?;
        Ok(Self::new(board, fleet))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn impacts(&self) -> &Board {
        &self.impacts
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn attacked(&self) -> &BTreeSet<Coordinate> {
        &self.attacked
    }

    pub fn total_attacks(&self) -> usize {
        self.attacked.len()
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    pub fn status(&self) -> GameStatus {
        if self.game_over {
            GameStatus::GameOver
        } else {
            GameStatus::AwaitingAttacks
        }
    }

    pub fn last_attack(&self) -> Option<Coordinate> {
        self.last_attack
    }

    pub fn last_result(&self) -> Option<AttackOutcome> {
        self.last_result
    }

    /// Resolve a raw coordinate string such as `"B3"`.
    pub fn resolve(&mut self, raw: &str) -> AttackOutcome {
        if self.game_over {
            return AttackOutcome::Rejected(AttackError::GameOver);
        }
        match raw.parse::<Coordinate>() {
            Ok(coord) => self.attack(coord),
            Err(e) => AttackOutcome::Rejected(e),
        }
    }

    /// Resolve an attack on `coord`. Rejections leave the state untouched.
    pub fn attack(&mut self, coord: Coordinate) -> AttackOutcome {
        if self.game_over {
            return AttackOutcome::Rejected(AttackError::GameOver);
        }
        let outcome = self.apply(coord).unwrap_or_else(AttackOutcome::Rejected);
        if outcome.is_applied() {
            self.last_result = Some(outcome);
        }
        outcome
    }

    fn apply(&mut self, coord: Coordinate) -> Result<AttackOutcome, AttackError> {
        self.impacts.get(coord)?;
        if self.attacked.contains(&coord) {
            return Err(AttackError::AlreadyAttacked);
        }
        self.attacked.insert(coord);
        self.last_attack = Some(coord);

        let Some(ship) = self.fleet.ship_at_mut(coord) else {
            self.impacts.set(coord, Mark::Miss)?;
            return Ok(AttackOutcome::Miss);
        };
        ship.register_hit(coord);
        let kind = ship.kind();
        let sunk = ship.is_sunk();
        self.impacts.set(coord, Mark::Hit)?;

        if !sunk {
            return Ok(AttackOutcome::Hit(kind));
        }
        if self.fleet.all_sunk() {
            self.game_over = true;
            return Ok(AttackOutcome::FleetDestroyed(kind));
        }
        Ok(AttackOutcome::Sunk(kind))
    }

    /// Generate a serializable snapshot of the current state.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.symbols(),
            impact_board: self.impacts.symbols(),
            last_attack: self.last_attack,
            last_result: self.last_result.map(|o| o.result()),
            total_attacks: self.total_attacks(),
            game_over: self.game_over,
            fleet: self.fleet.statuses(),
        }
    }
}
