use log::LevelFilter;
use naval_battle::{
    init_logging_with, transport::tcp::serve, Attacker, AttackerState, Board, Defender,
    ListenerConfig, TcpTarget, BOARD_COLS, BOARD_ROWS,
};
use serde_json::json;
use tokio::net::TcpListener;

/// Seeded defender on an ephemeral port, swept row by row by a TCP attacker.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <seed>", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    init_logging_with(LevelFilter::Warn);

    let defender = Defender::new(Some(seed))?;
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let server = tokio::spawn(serve(listener, defender.clone(), ListenerConfig::default()));

    let mut attacker = Attacker::new(TcpTarget::new(addr.to_string()));
    let sweep: Vec<String> = Board::new(BOARD_ROWS, BOARD_COLS)
        .coordinates()
        .map(|c| c.to_string())
        .collect();
    for coord in &sweep {
        attacker.fire(coord).await?;
        if attacker.state() == AttackerState::Victory {
            break;
        }
    }
    server.abort();

    let snapshot = defender.snapshot();
    let result = json!({
        "seed": seed,
        "attacks": attacker.attacks(),
        "outcome": format!("{:?}", attacker.state()),
        "fleet": snapshot.fleet,
    });
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
