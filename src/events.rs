#![cfg(feature = "std")]
//! Attack and reset events queued for the live dashboard stream.

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tokio::sync::Notify;

use crate::coord::Coordinate;
use crate::game::{AttackOutcome, AttackResult, GameState};
use crate::ship::ShipStatus;

pub const RESET_CODE: &str = "REINICIO";
pub const RESET_MESSAGE: &str = "Juego reiniciado";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Attack,
    Reset,
}

/// Immutable record of one applied attack, or of a reset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttackEvent {
    pub kind: EventKind,
    pub coordinate: Option<Coordinate>,
    pub result: AttackResult,
    pub ship: Option<&'static str>,
    pub fleet: BTreeMap<&'static str, ShipStatus>,
    pub board: BTreeMap<String, char>,
    pub impact_board: BTreeMap<String, char>,
    pub total_attacks: usize,
    /// Seconds since the unix epoch.
    pub timestamp: f64,
}

impl AttackEvent {
    /// Event for an attack already applied to `state`.
    pub fn attack(state: &GameState, coord: Coordinate, outcome: &AttackOutcome) -> Self {
        Self::capture(
            state,
            EventKind::Attack,
            Some(coord),
            outcome.result(),
            outcome.ship().map(|k| k.name()),
        )
    }

    /// Reset marker carrying the freshly placed fleet.
    pub fn reset(state: &GameState) -> Self {
        let result = AttackResult {
            code: RESET_CODE.to_string(),
            message: RESET_MESSAGE.to_string(),
        };
        Self::capture(state, EventKind::Reset, None, result, None)
    }

    fn capture(
        state: &GameState,
        kind: EventKind,
        coordinate: Option<Coordinate>,
        result: AttackResult,
        ship: Option<&'static str>,
    ) -> Self {
        Self {
            kind,
            coordinate,
            result,
            ship,
            fleet: state.fleet().statuses(),
            board: state.board().symbols(),
            impact_board: state.impacts().symbols(),
            total_attacks: state.total_attacks(),
            timestamp: unix_now(),
        }
    }
}

fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default()
}

/// Process-wide FIFO of events with a waiting consumer.
///
/// Producers never block on the consumer. Events drained once are gone; a
/// late subscriber only sees what is still queued.
#[derive(Debug, Default)]
pub struct EventNotifier {
    queue: Mutex<VecDeque<AttackEvent>>,
    notify: Notify,
}

impl EventNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, event: AttackEvent) {
        self.queue().push_back(event);
        self.notify.notify_one();
    }

    /// Drop every pending event and queue `marker` alone.
    pub fn reset_with(&self, marker: AttackEvent) {
        {
            let mut queue = self.queue();
            queue.clear();
            queue.push_back(marker);
        }
        self.notify.notify_one();
    }

    pub fn try_next(&self) -> Option<AttackEvent> {
        self.queue().pop_front()
    }

    /// Wait until an event is available and take it.
    pub async fn next(&self) -> AttackEvent {
        loop {
            if let Some(event) = self.try_next() {
                return event;
            }
            self.notify.notified().await;
        }
    }

    pub fn len(&self) -> usize {
        self.queue().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue().is_empty()
    }

    fn queue(&self) -> MutexGuard<'_, VecDeque<AttackEvent>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
