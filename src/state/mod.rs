//! Mutable state the enforcer keeps: cached channel topics and the
//! nick-to-hostmask roster.

mod channel;
mod roster;

pub use channel::{ChannelState, ChannelStateStore};
pub use roster::{NickResolver, Roster};
