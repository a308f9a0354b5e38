#![cfg(feature = "std")]
//! Thin HTTP façade over the defender: JSON state, reset, and a
//! Server-Sent-Events stream of attack events.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::routing::{get, post};
use axum::{Json, Router};
use futures::stream::{Stream, StreamExt};
use log::{info, warn};
use serde::Serialize;
use tokio::net::TcpListener;

use crate::defender::{Defender, ResetReport};
use crate::game::GameSnapshot;

#[derive(Clone)]
struct WebState {
    defender: Defender,
    attack_addr: SocketAddr,
}

/// Where attackers should connect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerInfo {
    pub ip: String,
    pub port: u16,
}

/// Routes of the dashboard API. `attack_addr` is the address reported by
/// `/server-info`.
pub fn router(defender: Defender, attack_addr: SocketAddr) -> Router {
    Router::new()
        .route("/state", get(state))
        .route("/reset", post(reset))
        .route("/events", get(events))
        .route("/server-info", get(server_info))
        .with_state(WebState {
            defender,
            attack_addr,
        })
}

/// Serve the dashboard API until the listener fails.
pub async fn serve_web(listener: TcpListener, app: Router) -> anyhow::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("Dashboard API listening on {}", addr);
    }
    axum::serve(listener, app).await?;
    Ok(())
}

async fn state(State(web): State<WebState>) -> Json<GameSnapshot> {
    Json(web.defender.snapshot())
}

async fn reset(State(web): State<WebState>) -> Json<ResetReport> {
    match web.defender.reset() {
        Ok(report) => Json(report),
        Err(e) => {
            warn!("Reset failed, keeping the current game: {}", e);
            Json(ResetReport {
                success: false,
                fleet: web.defender.fleet_status(),
            })
        }
    }
}

async fn events(
    State(web): State<WebState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = web.defender.subscribe_events().map(|event| {
        let data = serde_json::to_string(&event).unwrap_or_else(|e| {
            warn!("Could not serialize event: {}", e);
            String::from("{}")
        });
        Ok::<_, Infallible>(Event::default().data(data))
    });
    Sse::new(stream).keep_alive(KeepAlive::default())
}

async fn server_info(State(web): State<WebState>) -> Json<ServerInfo> {
    Json(ServerInfo {
        ip: web.attack_addr.ip().to_string(),
        port: web.attack_addr.port(),
    })
}
