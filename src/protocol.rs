//! Text wire format between attacker and defender.
//!
//! A request is the coordinate itself (`B3`). A reply is `<code>:<message>`,
//! e.g. `202:impactado:Submarine`. Replies are decoded once into an
//! [`AttackReply`] so nothing downstream re-parses strings.

use alloc::format;
use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

use crate::game::{
    AttackOutcome, CODE_HIT, CODE_MISS, CODE_OVER, CODE_SUNK, MSG_GAME_OVER,
};

/// Requests longer than this are cut off by the server.
pub const MAX_REQUEST_BYTES: usize = 1024;

/// Encode an outcome as the `<code>:<message>` reply line.
pub fn encode_reply(outcome: &AttackOutcome) -> String {
    format!("{}:{}", outcome.code(), outcome.message())
}

/// What a reply means to the attacker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    /// Water, or a rejected attack (out of bounds, repeat, malformed).
    Miss,
    Hit,
    Sunk,
    /// The attack sank the last ship.
    FleetDestroyed,
    /// The game had already ended before the attack.
    GameOver,
}

/// Decoded reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackReply {
    pub code: u16,
    pub kind: ReplyKind,
    pub ship: Option<String>,
    pub message: String,
}

/// Errors raised while decoding a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// No `:` between code and message.
    MissingSeparator,
    /// Code is not a number.
    BadCode(String),
    /// Code and message do not form a known reply.
    UnknownReply(String),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::MissingSeparator => write!(f, "Reply has no code separator"),
            ProtocolError::BadCode(code) => write!(f, "Reply code is not numeric: {}", code),
            ProtocolError::UnknownReply(reply) => write!(f, "Unknown reply: {}", reply),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ProtocolError {}

impl AttackReply {
    /// Decode a `<code>:<message>` reply.
    pub fn decode(raw: &str) -> Result<Self, ProtocolError> {
        let raw = raw.trim();
        let (code, message) = raw.split_once(':').ok_or(ProtocolError::MissingSeparator)?;
        let code: u16 = code
            .trim()
            .parse()
            .map_err(|_| ProtocolError::BadCode(code.to_string()))?;
        let unknown = || ProtocolError::UnknownReply(raw.to_string());

        let (kind, ship) = match code {
            CODE_MISS => (ReplyKind::Miss, None),
            CODE_HIT => {
                let ship = ship_name(message, &["impactado", "hit"]).ok_or_else(unknown)?;
                (ReplyKind::Hit, Some(ship))
            }
            CODE_SUNK => {
                let ship = ship_name(message, &["hundido", "sunk"]).ok_or_else(unknown)?;
                (ReplyKind::Sunk, Some(ship))
            }
            CODE_OVER if message.starts_with(MSG_GAME_OVER) => (ReplyKind::GameOver, None),
            CODE_OVER => (ReplyKind::FleetDestroyed, None),
            _ => return Err(unknown()),
        };
        Ok(AttackReply {
            code,
            kind,
            ship,
            message: message.to_string(),
        })
    }

    /// Whether the attack landed on a ship.
    pub fn is_hit(&self) -> bool {
        matches!(
            self.kind,
            ReplyKind::Hit | ReplyKind::Sunk | ReplyKind::FleetDestroyed
        )
    }
}

impl FromStr for AttackReply {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl fmt::Display for AttackReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.code, self.message)
    }
}

fn ship_name(message: &str, tags: &[&str]) -> Option<String> {
    let (tag, name) = message.split_once(':')?;
    if tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) && !name.is_empty() {
        Some(name.to_string())
    } else {
        None
    }
}
