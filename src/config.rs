use crate::ship::ShipKind;

pub const BOARD_ROWS: u8 = 5;
pub const BOARD_COLS: u8 = 5;
pub const NUM_SHIPS: usize = 3;

/// Fleet in the order ships are placed: largest first so the long runs
/// still find room.
pub const PLACEMENT_ORDER: [ShipKind; NUM_SHIPS] = [
    ShipKind::Battleship,
    ShipKind::Submarine,
    ShipKind::Destroyer,
];

/// Random anchors tried per ship before placement gives up.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 100;

/// Whole-fleet placement retries on start-up and reset.
pub const PLACEMENT_ROUNDS: usize = 3;

/// Total number of ship segments in the standard fleet.
pub const TOTAL_SHIP_CELLS: usize = 1 + 2 + 3;

pub const DEFAULT_ATTACK_PORT: u16 = 5001;
pub const DEFAULT_WEB_PORT: u16 = 5003;
