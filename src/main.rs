#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use naval_battle::{
    init_logging, transport::tcp::serve, web, Attacker, AttackerState, Defender,
    ListenerConfig, TcpTarget, DEFAULT_ATTACK_PORT, DEFAULT_WEB_PORT,
};

#[cfg(feature = "std")]
use clap::{Parser, Subcommand};
#[cfg(feature = "std")]
use tokio::net::TcpListener;
#[cfg(feature = "std")]
use tokio::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Run the defense server: attack socket plus dashboard API.
    Defend {
        #[arg(long, default_value_t = format!("0.0.0.0:{}", DEFAULT_ATTACK_PORT))]
        bind: String,
        #[arg(long = "web", default_value_t = format!("0.0.0.0:{}", DEFAULT_WEB_PORT))]
        web_bind: String,
        #[arg(long, help = "Fix RNG seed for reproducible fleets (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Fire one or more coordinates at a defense server.
    Attack {
        #[arg(long, default_value_t = format!("127.0.0.1:{}", DEFAULT_ATTACK_PORT))]
        connect: String,
        #[arg(long, default_value_t = 5)]
        timeout_secs: u64,
        /// Coordinates such as B3, fired in order.
        #[arg(required = true)]
        coords: Vec<String>,
    },
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Defend {
            bind,
            web_bind,
            seed,
        } => {
            if let Some(s) = seed {
                println!("Using fixed seed: {} (fleets will be reproducible)", s);
            }
            let defender = Defender::new(seed).map_err(|e| anyhow::anyhow!(e))?;

            let attack_listener = TcpListener::bind(&bind).await?;
            let attack_addr = attack_listener.local_addr()?;
            let web_listener = TcpListener::bind(&web_bind).await?;
            println!("Defense server: attacks on {}, dashboard on {}", attack_addr, web_bind);

            let socket_task = tokio::spawn(serve(
                attack_listener,
                defender.clone(),
                ListenerConfig::default(),
            ));
            let app = web::router(defender, attack_addr);
            let result = web::serve_web(web_listener, app).await;
            socket_task.abort();
            result?;
        }
        Commands::Attack {
            connect,
            timeout_secs,
            coords,
        } => {
            let target = TcpTarget::with_timeout(connect, Duration::from_secs(timeout_secs));
            let mut attacker = Attacker::new(target);
            for coord in &coords {
                match attacker.fire(coord).await {
                    Ok(reply) => println!("{} -> {}", coord, reply),
                    Err(e) => eprintln!(
                        "{} -> error from {}: {:#}",
                        coord,
                        attacker.target().addr(),
                        e
                    ),
                }
                if matches!(attacker.state(), AttackerState::Victory | AttackerState::Ended) {
                    break;
                }
            }
            println!("{:?}", attacker.board());
            println!(
                "State: {:?}, attacks: {}, ships sunk: {}",
                attacker.state(),
                attacker.attacks(),
                attacker.ships_sunk()
            );
        }
    }
    Ok(())
}
