#![cfg(feature = "std")]
//! Shared handle to the single game of a defense server.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::stream::{self, Stream};
use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::common::PlacementError;
use crate::config::{BOARD_COLS, BOARD_ROWS, PLACEMENT_ROUNDS};
use crate::events::{AttackEvent, EventNotifier};
use crate::game::{AttackOutcome, GameSnapshot, GameState};
use crate::placement::place_fleet;
use crate::ship::ShipStatus;

/// Reply of a successful reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetReport {
    pub success: bool,
    pub fleet: BTreeMap<&'static str, ShipStatus>,
}

struct Shared {
    game: Mutex<GameState>,
    rng: Mutex<SmallRng>,
    events: EventNotifier,
}

/// Cheap-to-clone handle used by the socket server and the web façade.
///
/// Every resolve and reset holds the game lock for its whole duration, so
/// attacks are serialized and a reset swaps the state atomically.
#[derive(Clone)]
pub struct Defender {
    shared: Arc<Shared>,
}

impl Defender {
    /// Place a random fleet and start accepting attacks. A fixed `seed`
    /// makes every placement, including later resets, reproducible.
    pub fn new(seed: Option<u64>) -> Result<Self, PlacementError> {
        let mut rng = match seed {
            Some(s) => SmallRng::seed_from_u64(s),
            None => {
                let mut seed_rng = rand::rng();
                SmallRng::from_rng(&mut seed_rng)
            }
        };
        let state = place_with_retries(&mut rng, BOARD_ROWS, BOARD_COLS)?;
        log_fleet("Initial fleet placed", &state);
        Ok(Self::with_state(state, rng))
    }

    /// Wrap an existing game, e.g. one with a hand-placed fleet.
    pub fn with_state(state: GameState, rng: SmallRng) -> Self {
        Self {
            shared: Arc::new(Shared {
                game: Mutex::new(state),
                rng: Mutex::new(rng),
                events: EventNotifier::new(),
            }),
        }
    }

    /// Resolve one attack and queue its event when it changed the game.
    pub fn resolve_attack(&self, raw: &str) -> AttackOutcome {
        let mut game = lock(&self.shared.game);
        let outcome = game.resolve(raw);
        if outcome.is_applied() {
            if let Some(coord) = game.last_attack() {
                self.shared
                    .events
                    .publish(AttackEvent::attack(&game, coord, &outcome));
            }
            info!("Attack {} -> {}:{}", raw, outcome.code(), outcome.message());
        } else {
            debug!("Attack {:?} rejected: {:?}", raw, outcome);
        }
        outcome
    }

    pub fn snapshot(&self) -> GameSnapshot {
        lock(&self.shared.game).snapshot()
    }

    /// Start a new game with a freshly placed fleet on a grid of the same
    /// size as the running one.
    ///
    /// When placement fails the running game stays in place and pending
    /// events are kept.
    pub fn reset(&self) -> Result<ResetReport, PlacementError> {
        let mut game = lock(&self.shared.game);
        let fresh = {
            let mut rng = lock(&self.shared.rng);
            let (rows, cols) = (game.board().rows(), game.board().cols());
            place_with_retries(&mut *rng, rows, cols)?
        };
        *game = fresh;
        self.shared.events.reset_with(AttackEvent::reset(&game));
        log_fleet("Game reset", &game);
        Ok(ResetReport {
            success: true,
            fleet: game.fleet().statuses(),
        })
    }

    /// Current fleet status without the rest of the snapshot.
    pub fn fleet_status(&self) -> BTreeMap<&'static str, ShipStatus> {
        lock(&self.shared.game).fleet().statuses()
    }

    pub fn events(&self) -> &EventNotifier {
        &self.shared.events
    }

    /// Endless stream draining the event queue. Not restartable: a new
    /// subscription only sees events that are still queued.
    pub fn subscribe_events(&self) -> impl Stream<Item = AttackEvent> + Send + 'static {
        let shared = Arc::clone(&self.shared);
        stream::unfold(shared, |shared| async move {
            let event = shared.events.next().await;
            Some((event, shared))
        })
    }

    /// Run `f` against the current game under the lock.
    pub fn inspect<R>(&self, f: impl FnOnce(&GameState) -> R) -> R {
        let game = lock(&self.shared.game);
        f(&*game)
    }
}

fn place_with_retries(
    rng: &mut SmallRng,
    rows: u8,
    cols: u8,
) -> Result<GameState, PlacementError> {
    let mut last_err = PlacementError::Incomplete;
    for round in 1..=PLACEMENT_ROUNDS {
        match place_fleet(rng, rows, cols) {
            Ok((board, fleet)) => return Ok(GameState::new(board, fleet)),
            Err(e) => {
                warn!("Fleet placement round {} failed: {}", round, e);
                last_err = e;
            }
        }
    }
    Err(last_err)
}

fn log_fleet(what: &str, state: &GameState) {
    info!("{}", what);
    for ship in state.fleet().iter() {
        let cells: Vec<String> = ship.cells().iter().map(|c| c.to_string()).collect();
        info!("  {}: {:?}", ship.kind().name(), cells);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
