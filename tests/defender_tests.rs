use std::time::Duration;

use futures::StreamExt;
use naval_battle::{
    AttackError, AttackOutcome, Board, Coordinate, Defender, Deployment, EventKind, GameState,
    Mark, Orientation, PlacementError, ShipKind, BOARD_COLS, BOARD_ROWS,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn c(s: &str) -> Coordinate {
    s.parse().unwrap()
}

/// Battleship A1-A3, Submarine C1-D1, Destroyer C3.
fn fixed_defender() -> Defender {
    let mut d = Deployment::new(BOARD_ROWS, BOARD_COLS);
    d.deploy(ShipKind::Battleship, c("A1"), Orientation::Horizontal)
        .unwrap();
    d.deploy(ShipKind::Submarine, c("C1"), Orientation::Vertical)
        .unwrap();
    d.deploy(ShipKind::Destroyer, c("C3"), Orientation::Horizontal)
        .unwrap();
    let (board, fleet) = d.finish().unwrap();
    Defender::with_state(GameState::new(board, fleet), SmallRng::seed_from_u64(9))
}

/// A running game on a 2x2 grid: no fresh fleet fits there, so every reset fails.
fn cramped_defender() -> Defender {
    let mut d = Deployment::new(BOARD_ROWS, BOARD_COLS);
    d.deploy(ShipKind::Battleship, c("A1"), Orientation::Horizontal)
        .unwrap();
    d.deploy(ShipKind::Submarine, c("C1"), Orientation::Vertical)
        .unwrap();
    d.deploy(ShipKind::Destroyer, c("C3"), Orientation::Horizontal)
        .unwrap();
    let (_, fleet) = d.finish().unwrap();
    Defender::with_state(
        GameState::new(Board::new(2, 2), fleet),
        SmallRng::seed_from_u64(9),
    )
}

#[test]
fn one_event_per_applied_attack() {
    let defender = fixed_defender();
    defender.resolve_attack("A1");
    defender.resolve_attack("A1"); // repeat
    defender.resolve_attack("Q9"); // off the grid
    defender.resolve_attack("E5");
    assert_eq!(defender.events().len(), 2);

    let first = defender.events().try_next().unwrap();
    assert_eq!(first.coordinate, Some(c("A1")));
    assert_eq!(first.ship, Some("Battleship"));
    let second = defender.events().try_next().unwrap();
    assert_eq!(second.coordinate, Some(c("E5")));
    assert_eq!(second.result.code, "404");
}

#[test]
fn destroying_the_fleet_emits_once_and_freezes() {
    let defender = fixed_defender();
    for raw in ["A1", "A2", "A3", "C1", "D1"] {
        defender.resolve_attack(raw);
    }
    assert_eq!(
        defender.resolve_attack("C3"),
        AttackOutcome::FleetDestroyed(ShipKind::Destroyer)
    );
    let events_before = defender.events().len();
    assert_eq!(events_before, 6);

    let snapshot = defender.snapshot();
    assert!(snapshot.game_over);
    for raw in ["E5", "C3", "nonsense"] {
        assert_eq!(
            defender.resolve_attack(raw),
            AttackOutcome::Rejected(AttackError::GameOver)
        );
    }
    assert_eq!(defender.events().len(), events_before);
    assert_eq!(defender.snapshot(), snapshot);
}

#[test]
fn reset_starts_a_clean_game() {
    let defender = fixed_defender();
    for raw in ["A1", "C3", "E5"] {
        defender.resolve_attack(raw);
    }
    let report = defender.reset().unwrap();
    assert!(report.success);
    assert_eq!(report.fleet.len(), 3);

    let snap = defender.snapshot();
    assert_eq!(snap.total_attacks, 0);
    assert!(!snap.game_over);
    assert_eq!(snap.last_attack, None);
    assert!(snap.impact_board.values().all(|s| *s == '~'));
    for status in snap.fleet.values() {
        assert_eq!(status.hits, 0);
        assert!(!status.sunk);
    }
    defender.inspect(|game| assert_eq!(game.impacts().count(Mark::Empty), 25));

    // only the reset marker survives
    assert_eq!(defender.events().len(), 1);
    let marker = defender.events().try_next().unwrap();
    assert_eq!(marker.kind, EventKind::Reset);
    assert_eq!(marker.coordinate, None);
    assert_eq!(marker.fleet, snap.fleet);
}

#[test]
fn failed_reset_keeps_game_and_events() {
    let defender = cramped_defender();
    assert_eq!(
        defender.resolve_attack("A1"),
        AttackOutcome::Hit(ShipKind::Battleship)
    );
    defender.resolve_attack("B2");
    let before = defender.snapshot();
    assert_eq!(defender.events().len(), 2);

    let err = defender.reset().unwrap_err();
    assert!(matches!(
        err,
        PlacementError::Exhausted {
            ship: ShipKind::Battleship,
            ..
        }
    ));
    assert_eq!(defender.snapshot(), before);
    assert_eq!(defender.events().len(), 2);
    let first = defender.events().try_next().unwrap();
    assert_eq!(first.kind, EventKind::Attack);
    assert_eq!(first.coordinate, Some(c("A1")));

    // the kept game still resolves attacks
    assert_eq!(defender.resolve_attack("A1").code(), 404);
    assert_eq!(
        defender.resolve_attack("A2"),
        AttackOutcome::Hit(ShipKind::Battleship)
    );
}

#[test]
fn reset_keeps_the_grid_size() {
    let mut d = Deployment::new(6, 7);
    d.deploy(ShipKind::Battleship, c("F5"), Orientation::Horizontal)
        .unwrap();
    d.deploy(ShipKind::Submarine, c("A1"), Orientation::Vertical)
        .unwrap();
    d.deploy(ShipKind::Destroyer, c("C3"), Orientation::Horizontal)
        .unwrap();
    let (board, fleet) = d.finish().unwrap();
    let defender = Defender::with_state(GameState::new(board, fleet), SmallRng::seed_from_u64(4));

    defender.reset().unwrap();
    defender.inspect(|game| {
        assert_eq!((game.board().rows(), game.board().cols()), (6, 7));
        assert_eq!(game.impacts().count(Mark::Empty), 42);
    });
}

#[test]
fn seeded_defenders_place_identical_fleets() {
    let a = Defender::new(Some(1234)).unwrap();
    let b = Defender::new(Some(1234)).unwrap();
    assert_eq!(a.snapshot().board, b.snapshot().board);
    a.reset().unwrap();
    b.reset().unwrap();
    assert_eq!(a.fleet_status(), b.fleet_status());
}

#[test]
fn concurrent_attacks_on_one_cell_apply_once() {
    let defender = fixed_defender();
    let handles: Vec<_> = (0..16)
        .map(|_| {
            let defender = defender.clone();
            std::thread::spawn(move || defender.resolve_attack("A2"))
        })
        .collect();
    let outcomes: Vec<AttackOutcome> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let applied = outcomes.iter().filter(|o| o.is_applied()).count();
    assert_eq!(applied, 1);
    assert!(outcomes
        .iter()
        .filter(|o| !o.is_applied())
        .all(|o| *o == AttackOutcome::Rejected(AttackError::AlreadyAttacked)));
    assert_eq!(defender.snapshot().total_attacks, 1);
    assert_eq!(defender.events().len(), 1);
}

#[tokio::test]
async fn subscription_streams_events_in_order() {
    let defender = fixed_defender();
    let mut events = Box::pin(defender.subscribe_events());

    defender.resolve_attack("C1");
    defender.resolve_attack("D1");
    let first = tokio::time::timeout(Duration::from_secs(2), events.next())
        .await
        .unwrap()
        .unwrap();
    let second = tokio::time::timeout(Duration::from_secs(2), events.next())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.result.message, "impactado:Submarine");
    assert_eq!(second.result.message, "hundido:Submarine");
}

#[tokio::test]
async fn late_subscriber_misses_drained_events() {
    let defender = fixed_defender();
    defender.resolve_attack("B2");
    let mut early = Box::pin(defender.subscribe_events());
    let drained = early.next().await.unwrap();
    assert_eq!(drained.coordinate, Some(c("B2")));

    let mut late = Box::pin(defender.subscribe_events());
    defender.resolve_attack("B3");
    let seen = tokio::time::timeout(Duration::from_secs(2), late.next())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(seen.coordinate, Some(c("B3")));
}
