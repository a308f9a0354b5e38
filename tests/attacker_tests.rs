use naval_battle::{
    Attacker, AttackerState, Coordinate, Defender, Deployment, GameState, LocalTarget, Mark,
    Orientation, ReplyKind, ShipKind, BOARD_COLS, BOARD_ROWS,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn c(s: &str) -> Coordinate {
    s.parse().unwrap()
}

fn fixed_defender() -> Defender {
    let mut d = Deployment::new(BOARD_ROWS, BOARD_COLS);
    d.deploy(ShipKind::Battleship, c("A1"), Orientation::Horizontal)
        .unwrap();
    d.deploy(ShipKind::Submarine, c("C1"), Orientation::Vertical)
        .unwrap();
    d.deploy(ShipKind::Destroyer, c("C3"), Orientation::Horizontal)
        .unwrap();
    let (board, fleet) = d.finish().unwrap();
    Defender::with_state(GameState::new(board, fleet), SmallRng::seed_from_u64(11))
}

#[tokio::test]
async fn attacker_tracks_replies() -> anyhow::Result<()> {
    let mut attacker = Attacker::new(LocalTarget::new(fixed_defender()));
    assert_eq!(attacker.state(), AttackerState::Start);

    let reply = attacker.fire("B2").await?;
    assert_eq!(reply.kind, ReplyKind::Miss);
    assert_eq!(attacker.state(), AttackerState::Attacking);
    assert_eq!(attacker.board().get(c("B2")), Ok(Mark::Miss));

    attacker.fire("C3").await?;
    assert_eq!(attacker.ships_sunk(), 1);
    assert_eq!(attacker.board().get(c("C3")), Ok(Mark::Hit));
    assert_eq!(attacker.attacks(), 2);

    let served = attacker.target().defender().snapshot();
    assert_eq!(served.total_attacks, 2);
    assert!(served.fleet["destroyer"].sunk);
    Ok(())
}

#[tokio::test]
async fn repeat_reject_keeps_the_hit_mark() -> anyhow::Result<()> {
    let mut attacker = Attacker::new(LocalTarget::new(fixed_defender()));
    assert_eq!(attacker.fire("A1").await?.kind, ReplyKind::Hit);
    assert_eq!(attacker.fire("A1").await?.kind, ReplyKind::Miss);
    assert_eq!(attacker.board().get(c("A1")), Ok(Mark::Hit));
    Ok(())
}

#[tokio::test]
async fn off_board_coordinates_never_reach_the_server() -> anyhow::Result<()> {
    let defender = fixed_defender();
    let mut attacker = Attacker::new(LocalTarget::new(defender.clone()));
    assert!(attacker.fire("F1").await.is_err());
    assert!(attacker.fire("junk").await.is_err());
    assert_eq!(attacker.attacks(), 0);
    assert_eq!(attacker.state(), AttackerState::Start);
    assert!(defender.events().is_empty());
    Ok(())
}

#[tokio::test]
async fn sinking_everything_is_victory() -> anyhow::Result<()> {
    let defender = fixed_defender();
    let mut attacker = Attacker::new(LocalTarget::new(defender.clone()));
    for coord in ["A1", "A2", "A3", "C1", "D1"] {
        attacker.fire(coord).await?;
    }
    let last = attacker.fire("C3").await?;
    assert_eq!(last.kind, ReplyKind::FleetDestroyed);
    assert_eq!(attacker.state(), AttackerState::Victory);
    assert_eq!(attacker.ships_sunk(), 3);

    // further shots are refused but do not undo the victory
    assert_eq!(attacker.fire("E5").await?.kind, ReplyKind::GameOver);
    assert_eq!(attacker.state(), AttackerState::Victory);
    assert_eq!(attacker.board().get(c("E5")), Ok(Mark::Empty));
    Ok(())
}

#[tokio::test]
async fn joining_a_finished_game_ends_the_attacker() -> anyhow::Result<()> {
    let defender = fixed_defender();
    for raw in ["A1", "A2", "A3", "C1", "D1", "C3"] {
        defender.resolve_attack(raw);
    }
    let mut attacker = Attacker::new(LocalTarget::new(defender));
    assert_eq!(attacker.fire("B4").await?.kind, ReplyKind::GameOver);
    assert_eq!(attacker.state(), AttackerState::Ended);

    attacker.reset();
    assert_eq!(attacker.state(), AttackerState::Start);
    assert_eq!(attacker.attacks(), 0);
    assert!(attacker.board().is_empty());
    Ok(())
}
