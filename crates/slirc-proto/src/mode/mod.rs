//! Channel mode deltas.

mod parse;
mod types;

pub use self::types::{ChannelMode, ModeDelta};
