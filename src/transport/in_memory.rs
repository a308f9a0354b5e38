#![cfg(feature = "std")]

use crate::defender::Defender;
use crate::protocol::{encode_reply, AttackReply};
use crate::transport::AttackTarget;

/// Defense server living in the same process. Replies still go through the
/// wire codec so both sides see exactly what a socket would carry.
#[derive(Clone)]
pub struct LocalTarget {
    defender: Defender,
}

impl LocalTarget {
    pub fn new(defender: Defender) -> Self {
        Self { defender }
    }

    pub fn defender(&self) -> &Defender {
        &self.defender
    }
}

#[async_trait::async_trait]
impl AttackTarget for LocalTarget {
    async fn attack(&mut self, coord: &str) -> anyhow::Result<AttackReply> {
        let outcome = self.defender.resolve_attack(coord);
        let reply = AttackReply::decode(&encode_reply(&outcome))?;
        Ok(reply)
    }
}
