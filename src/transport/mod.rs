use crate::protocol::AttackReply;

/// Something an attacker can fire at: a remote defense server or an
/// in-process one.
#[async_trait::async_trait]
pub trait AttackTarget: Send + Sync {
    /// Fire at `coord` and return the decoded reply.
    async fn attack(&mut self, coord: &str) -> anyhow::Result<AttackReply>;
}

#[cfg(feature = "std")]
pub mod tcp;
#[cfg(feature = "std")]
pub mod in_memory;
