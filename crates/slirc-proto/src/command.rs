//! Outbound IRC commands.
//!
//! Only the commands an enforcer issues are modelled. Serialization follows
//! RFC 1459: the final parameter is written as a trailing parameter (`:`
//! prefixed) when it is empty, contains a space or starts with a colon, and
//! free-text parameters are always written as trailing.

use std::fmt::{self, Write};

use crate::mode::ModeDelta;

/// An IRC command ready to be written to the wire (without CRLF).
#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(non_camel_case_types, clippy::upper_case_acronyms)]
pub enum Command {
    /// `MODE <channel> <flags> [args...]`
    ChannelMODE(String, Vec<ModeDelta>),
    /// `KICK <channel> <nick> [:<reason>]`
    KICK(String, String, Option<String>),
    /// `TOPIC <channel> [:<topic>]`
    TOPIC(String, Option<String>),
    /// `INVITE <nick> <channel>`
    INVITE(String, String),
    /// `NOTICE <target> :<text>`
    NOTICE(String, String),
}

impl Command {
    /// The command verb.
    pub fn name(&self) -> &'static str {
        match self {
            Command::ChannelMODE(..) => "MODE",
            Command::KICK(..) => "KICK",
            Command::TOPIC(..) => "TOPIC",
            Command::INVITE(..) => "INVITE",
            Command::NOTICE(..) => "NOTICE",
        }
    }
}

fn needs_colon_prefix(param: &str) -> bool {
    param.is_empty() || param.contains(' ') || param.starts_with(':')
}

/// Write `VERB a b c`, prefixing the last parameter with `:` only when needed.
fn write_cmd(f: &mut fmt::Formatter<'_>, verb: &str, params: &[&str]) -> fmt::Result {
    f.write_str(verb)?;
    for (i, param) in params.iter().enumerate() {
        f.write_char(' ')?;
        if i == params.len() - 1 && needs_colon_prefix(param) {
            f.write_char(':')?;
        }
        f.write_str(param)?;
    }
    Ok(())
}

/// Write `VERB a b :c`, always treating the last parameter as free text.
fn write_cmd_freeform(f: &mut fmt::Formatter<'_>, verb: &str, params: &[&str]) -> fmt::Result {
    let Some((last, head)) = params.split_last() else {
        return f.write_str(verb);
    };
    f.write_str(verb)?;
    for param in head {
        f.write_char(' ')?;
        f.write_str(param)?;
    }
    f.write_str(" :")?;
    f.write_str(last)
}

/// Write `+ov-b` for a list of deltas, emitting a sign only when it changes.
fn write_collapsed_mode_flags(f: &mut fmt::Formatter<'_>, modes: &[ModeDelta]) -> fmt::Result {
    let mut current: Option<bool> = None;
    for delta in modes {
        if current != Some(delta.adding) {
            f.write_char(delta.sign())?;
            current = Some(delta.adding);
        }
        f.write_char(delta.mode.as_char())?;
    }
    Ok(())
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::ChannelMODE(c, modes) => {
                f.write_str("MODE ")?;
                f.write_str(c)?;
                if modes.is_empty() {
                    return Ok(());
                }
                f.write_char(' ')?;
                write_collapsed_mode_flags(f, modes)?;
                let args: Vec<&str> = modes.iter().filter_map(ModeDelta::arg).collect();
                for (i, arg) in args.iter().enumerate() {
                    f.write_char(' ')?;
                    if i == args.len() - 1 && needs_colon_prefix(arg) {
                        f.write_char(':')?;
                    }
                    f.write_str(arg)?;
                }
                Ok(())
            }
            Command::KICK(c, n, Some(r)) => write_cmd_freeform(f, "KICK", &[c.as_str(), n.as_str(), r.as_str()]),
            Command::KICK(c, n, None) => write_cmd(f, "KICK", &[c.as_str(), n.as_str()]),
            Command::TOPIC(c, Some(t)) => write_cmd_freeform(f, "TOPIC", &[c.as_str(), t.as_str()]),
            Command::TOPIC(c, None) => write_cmd(f, "TOPIC", &[c.as_str()]),
            Command::INVITE(n, c) => write_cmd(f, "INVITE", &[n.as_str(), c.as_str()]),
            Command::NOTICE(t, m) => write_cmd_freeform(f, "NOTICE", &[t.as_str(), m.as_str()]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_serialization() {
        let cmd = Command::ChannelMODE("#rust".into(), vec![ModeDelta::op("alice")]);
        assert_eq!(cmd.to_string(), "MODE #rust +o alice");

        let cmd = Command::ChannelMODE(
            "#rust".into(),
            vec![ModeDelta::op("a"), ModeDelta::voice("b"), ModeDelta::unban("*!*@x")],
        );
        assert_eq!(cmd.to_string(), "MODE #rust +ov-b a b *!*@x");
    }

    #[test]
    fn test_kick_serialization() {
        let cmd = Command::KICK("#rust".into(), "troll".into(), None);
        assert_eq!(cmd.to_string(), "KICK #rust troll");

        let cmd = Command::KICK("#rust".into(), "troll".into(), Some("go away".into()));
        assert_eq!(cmd.to_string(), "KICK #rust troll :go away");
    }

    #[test]
    fn test_topic_serialization() {
        let cmd = Command::TOPIC("#rust".into(), Some("[OFFICIAL] hello".into()));
        assert_eq!(cmd.to_string(), "TOPIC #rust :[OFFICIAL] hello");

        // An empty topic still has to be sent as a trailing parameter to clear it.
        let cmd = Command::TOPIC("#rust".into(), Some(String::new()));
        assert_eq!(cmd.to_string(), "TOPIC #rust :");
    }

    #[test]
    fn test_invite_and_notice() {
        assert_eq!(
            Command::INVITE("alice".into(), "#rust".into()).to_string(),
            "INVITE alice #rust"
        );
        assert_eq!(
            Command::NOTICE("alice".into(), "The operation succeeded.".into()).to_string(),
            "NOTICE alice :The operation succeeded."
        );
        assert_eq!(Command::INVITE("a".into(), "#b".into()).name(), "INVITE");
    }
}
