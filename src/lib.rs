#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

#[cfg(feature = "std")]
mod attacker;
mod board;
mod common;
mod config;
mod coord;
#[cfg(feature = "std")]
mod defender;
#[cfg(feature = "std")]
mod events;
mod fleet;
mod game;
#[cfg(feature = "std")]
mod logging;
mod placement;
pub mod protocol;
mod ship;
#[cfg(feature = "std")]
pub mod transport;
#[cfg(feature = "std")]
pub mod web;

#[cfg(feature = "std")]
pub use attacker::*;
pub use board::*;
pub use common::*;
pub use config::*;
pub use coord::*;
#[cfg(feature = "std")]
pub use defender::*;
#[cfg(feature = "std")]
pub use events::*;
pub use fleet::*;
pub use game::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, init_logging_with, LOG_ENV};
pub use placement::*;
pub use protocol::*;
pub use ship::*;
#[cfg(feature = "std")]
pub use transport::in_memory::LocalTarget;
#[cfg(feature = "std")]
pub use transport::tcp::{send_attack, ListenerConfig, TcpTarget};
#[cfg(feature = "std")]
pub use transport::AttackTarget;
