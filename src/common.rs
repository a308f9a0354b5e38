//! Error types shared by the board, placement and attack resolution.

use crate::ship::ShipKind;

/// Errors returned by `Board` cell access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Row or column lies outside the configured grid.
    OutOfBounds { row: u8, col: u8 },
}

impl core::fmt::Display for BoardError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BoardError::OutOfBounds { row, col } => {
                write!(f, "OutOfBounds: row={}, col={}", row, col)
            }
        }
    }
}

/// Reasons an attack is refused without touching the game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackError {
    /// Payload is not a coordinate at all.
    Malformed,
    /// Coordinate parses but lies outside the grid.
    OutOfBounds,
    /// Coordinate was attacked before.
    AlreadyAttacked,
    /// The fleet is already destroyed.
    GameOver,
}

impl From<BoardError> for AttackError {
    fn from(_: BoardError) -> Self {
        AttackError::OutOfBounds
    }
}

impl core::fmt::Display for AttackError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AttackError::Malformed => write!(f, "Payload is not a coordinate"),
            AttackError::OutOfBounds => write!(f, "Coordinate is outside the board"),
            AttackError::AlreadyAttacked => write!(f, "Coordinate was already attacked"),
            AttackError::GameOver => write!(f, "Game is already over"),
        }
    }
}

/// Errors raised while deploying the fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// Ship run leaves the grid.
    OutOfBounds,
    /// Ship run overlaps an already placed ship.
    Overlap,
    /// The ship kind was placed before.
    AlreadyPlaced(ShipKind),
    /// Not every ship of the fleet has been placed.
    Incomplete,
    /// Random placement ran out of attempts for this ship.
    Exhausted { ship: ShipKind, attempts: usize },
}

impl core::fmt::Display for PlacementError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PlacementError::OutOfBounds => write!(f, "Ship placement is out of bounds"),
            PlacementError::Overlap => write!(f, "Ship placement overlaps with another ship"),
            PlacementError::AlreadyPlaced(kind) => {
                write!(f, "{} is already placed on the board", kind.name())
            }
            PlacementError::Incomplete => write!(f, "Fleet is not fully placed"),
            PlacementError::Exhausted { ship, attempts } => write!(
                f,
                "Unable to place {} after {} attempts",
                ship.name(),
                attempts
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
#[cfg(feature = "std")]
impl std::error::Error for AttackError {}
#[cfg(feature = "std")]
impl std::error::Error for PlacementError {}
