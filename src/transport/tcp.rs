#![cfg(feature = "std")]

use anyhow::{anyhow, Context};
use log::{debug, info, warn};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream, ToSocketAddrs};
use tokio::time::{sleep, timeout, Duration};

use crate::defender::Defender;
use crate::protocol::{encode_reply, AttackReply, MAX_REQUEST_BYTES};
use crate::transport::AttackTarget;

/// Default time a connection gets to send its coordinate (30 seconds).
const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(30);

/// Default client-side timeout for one attack round trip (5 seconds).
pub const DEFAULT_ATTACK_TIMEOUT: Duration = Duration::from_secs(5);

/// Pause after a failed accept so a persistent error does not spin.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Per-connection limits of the attack socket.
#[derive(Debug, Clone, Copy)]
pub struct ListenerConfig {
    pub read_timeout: Duration,
    pub max_request_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            read_timeout: DEFAULT_READ_TIMEOUT,
            max_request_bytes: MAX_REQUEST_BYTES,
        }
    }
}

/// Accept attacks forever, one task per connection.
///
/// Failures of a single connection, including failed accepts, are logged and
/// never end the loop.
pub async fn serve(listener: TcpListener, defender: Defender, config: ListenerConfig) {
    if let Ok(addr) = listener.local_addr() {
        info!("Attack socket listening on {}", addr);
    }
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("Accept failed: {}", e);
                sleep(ACCEPT_BACKOFF).await;
                continue;
            }
        };
        let defender = defender.clone();
        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, &defender, config).await {
                warn!("Connection from {} dropped: {:#}", peer, e);
            }
        });
    }
}

/// Read one coordinate, resolve it, write the reply and close.
pub async fn handle_connection(
    mut stream: TcpStream,
    defender: &Defender,
    config: ListenerConfig,
) -> anyhow::Result<()> {
    let mut buf = vec![0u8; config.max_request_bytes];
    let n = timeout(config.read_timeout, stream.read(&mut buf))
        .await
        .map_err(|_| anyhow!("Read timeout after {:?}", config.read_timeout))?
        .context("Read error")?;
    if n == 0 {
        return Err(anyhow!("Connection closed before a coordinate arrived"));
    }

    let request = String::from_utf8_lossy(&buf[..n]);
    let coordinate = request.split('\n').next().unwrap_or_default().trim();
    debug!("Attack received: {:?}", coordinate);

    let outcome = defender.resolve_attack(coordinate);
    let reply = encode_reply(&outcome);
    stream
        .write_all(reply.as_bytes())
        .await
        .context("Write error")?;
    stream.shutdown().await.context("Shutdown error")?;
    debug!("Reply sent: {}", reply);
    Ok(())
}

/// Send one attack over a fresh connection and decode the reply.
pub async fn send_attack<A: ToSocketAddrs>(
    addr: A,
    coord: &str,
    timeout_duration: Duration,
) -> anyhow::Result<AttackReply> {
    let attack_op = async {
        let mut stream = TcpStream::connect(addr)
            .await
            .context("Could not connect to the defense server")?;
        stream
            .write_all(coord.as_bytes())
            .await
            .context("Write error")?;
        let mut buf = Vec::new();
        (&mut stream)
            .take(MAX_REQUEST_BYTES as u64)
            .read_to_end(&mut buf)
            .await
            .context("Read error")?;
        anyhow::Ok(buf)
    };
    let buf = timeout(timeout_duration, attack_op)
        .await
        .map_err(|_| anyhow!("Attack timeout after {:?}", timeout_duration))??;
    let reply = AttackReply::decode(&String::from_utf8_lossy(&buf))?;
    Ok(reply)
}

/// Remote defense server reached over TCP, one connection per attack.
#[derive(Debug, Clone)]
pub struct TcpTarget {
    addr: String,
    timeout_duration: Duration,
}

impl TcpTarget {
    pub fn new(addr: impl Into<String>) -> Self {
        Self::with_timeout(addr, DEFAULT_ATTACK_TIMEOUT)
    }

    pub fn with_timeout(addr: impl Into<String>, timeout_duration: Duration) -> Self {
        Self {
            addr: addr.into(),
            timeout_duration,
        }
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }
}

#[async_trait::async_trait]
impl AttackTarget for TcpTarget {
    async fn attack(&mut self, coord: &str) -> anyhow::Result<AttackReply> {
        send_attack(self.addr.as_str(), coord, self.timeout_duration).await
    }
}
