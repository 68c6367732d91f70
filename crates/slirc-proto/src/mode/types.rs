//! Channel mode types.
//!
//! Only the privilege and ban flags carry meaning for enforcement; every
//! other flag is preserved as [`ChannelMode::Other`] so a delta list can be
//! walked in its original order.
//!
//! # Reference
//! - RFC 2812 Section 3.2.3 (Channel Modes)

use std::fmt;

/// A channel mode flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelMode {
    /// 'o' - Channel operator (@)
    Oper,
    /// 'h' - Half-operator (%)
    Halfop,
    /// 'v' - Voice (+)
    Voice,
    /// 'b' - Ban mask
    Ban,
    /// Any other flag.
    Other(char),
}

impl ChannelMode {
    /// Map a mode character to its flag.
    pub fn from_char(c: char) -> Self {
        match c {
            'o' => Self::Oper,
            'h' => Self::Halfop,
            'v' => Self::Voice,
            'b' => Self::Ban,
            c => Self::Other(c),
        }
    }

    /// The mode character.
    pub fn as_char(&self) -> char {
        match self {
            Self::Oper => 'o',
            Self::Halfop => 'h',
            Self::Voice => 'v',
            Self::Ban => 'b',
            Self::Other(c) => *c,
        }
    }

    /// Type A list modes; may appear without an argument as a list query.
    pub(crate) fn is_list_mode(&self) -> bool {
        matches!(self, Self::Ban | Self::Other('e' | 'I' | 'q'))
    }

    /// Whether the flag consumes an argument in the given direction.
    pub(crate) fn takes_arg(&self, adding: bool) -> bool {
        match self {
            Self::Oper | Self::Halfop | Self::Voice | Self::Ban => true,
            Self::Other('e' | 'I' | 'q' | 'k') => true,
            Self::Other('l') => adding,
            Self::Other(_) => false,
        }
    }
}

impl fmt::Display for ChannelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One signed mode change, e.g. `+o alice` or `-b *!*@spam.example`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModeDelta {
    /// `true` for `+`, `false` for `-`.
    pub adding: bool,
    /// The flag being changed.
    pub mode: ChannelMode,
    /// Target nick, mask or value, if the flag takes one.
    pub arg: Option<String>,
}

impl ModeDelta {
    /// A `+` delta.
    pub fn plus(mode: ChannelMode, arg: Option<&str>) -> Self {
        Self {
            adding: true,
            mode,
            arg: arg.map(str::to_owned),
        }
    }

    /// A `-` delta.
    pub fn minus(mode: ChannelMode, arg: Option<&str>) -> Self {
        Self {
            adding: false,
            mode,
            arg: arg.map(str::to_owned),
        }
    }

    /// `+o nick`
    pub fn op(nick: &str) -> Self {
        Self::plus(ChannelMode::Oper, Some(nick))
    }

    /// `-o nick`
    pub fn deop(nick: &str) -> Self {
        Self::minus(ChannelMode::Oper, Some(nick))
    }

    /// `+h nick`
    pub fn halfop(nick: &str) -> Self {
        Self::plus(ChannelMode::Halfop, Some(nick))
    }

    /// `-h nick`
    pub fn dehalfop(nick: &str) -> Self {
        Self::minus(ChannelMode::Halfop, Some(nick))
    }

    /// `+v nick`
    pub fn voice(nick: &str) -> Self {
        Self::plus(ChannelMode::Voice, Some(nick))
    }

    /// `-v nick`
    pub fn devoice(nick: &str) -> Self {
        Self::minus(ChannelMode::Voice, Some(nick))
    }

    /// `+b mask`
    pub fn ban(mask: &str) -> Self {
        Self::plus(ChannelMode::Ban, Some(mask))
    }

    /// `-b mask`
    pub fn unban(mask: &str) -> Self {
        Self::minus(ChannelMode::Ban, Some(mask))
    }

    /// The argument, if any.
    pub fn arg(&self) -> Option<&str> {
        self.arg.as_deref()
    }

    /// The sign character.
    pub fn sign(&self) -> char {
        if self.adding {
            '+'
        } else {
            '-'
        }
    }
}

impl fmt::Display for ModeDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.sign(), self.mode)?;
        if let Some(arg) = &self.arg {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_char_roundtrips_known_flags() {
        for c in ['o', 'h', 'v', 'b', 'k', 'l', 't'] {
            assert_eq!(ChannelMode::from_char(c).as_char(), c);
        }
        assert_eq!(ChannelMode::from_char('o'), ChannelMode::Oper);
        assert_eq!(ChannelMode::from_char('t'), ChannelMode::Other('t'));
    }

    #[test]
    fn test_limit_only_takes_arg_when_set() {
        let limit = ChannelMode::Other('l');
        assert!(limit.takes_arg(true));
        assert!(!limit.takes_arg(false));
        assert!(ChannelMode::Other('k').takes_arg(false));
    }

    #[test]
    fn test_delta_display() {
        assert_eq!(ModeDelta::op("alice").to_string(), "+o alice");
        assert_eq!(ModeDelta::unban("*!*@x").to_string(), "-b *!*@x");
        assert_eq!(ModeDelta::plus(ChannelMode::Other('t'), None).to_string(), "+t");
    }
}
