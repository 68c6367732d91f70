//! # slirc-proto
//!
//! The slice of the IRC protocol a channel enforcer needs to speak:
//!
//! - [`Hostmask`] parsing and ban mask derivation
//! - RFC 1459 case mapping ([`irc_to_lower`], [`irc_eq`])
//! - Wildcard mask matching ([`wildcard_match`], [`matches_hostmask`])
//! - Channel name validation ([`ChannelExt`])
//! - Channel mode deltas ([`ModeDelta`], [`ChannelMode`])
//! - Outbound [`Command`]s with wire serialization
//!
//! ## Quick Start
//!
//! ```rust
//! use slirc_proto::{Command, Hostmask, ModeDelta};
//!
//! let who: Hostmask = "spammer!bad@host.example.net".parse().unwrap();
//! assert_eq!(who.banmask(), "*!*@*.example.net");
//!
//! let ban = Command::ChannelMODE("#rust".into(), vec![ModeDelta::ban(&who.banmask())]);
//! assert_eq!(ban.to_string(), "MODE #rust +b *!*@*.example.net");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod casemap;
pub mod chan;
pub mod command;
pub mod error;
pub mod hostmask;
pub mod mode;
pub mod util;

pub use self::casemap::{irc_eq, irc_lower_char, irc_to_lower};
pub use self::chan::ChannelExt;
pub use self::command::Command;
pub use self::error::{HostmaskParseError, ModeParseError};
pub use self::hostmask::Hostmask;
pub use self::mode::{ChannelMode, ModeDelta};
pub use self::util::{matches_hostmask, wildcard_match};
