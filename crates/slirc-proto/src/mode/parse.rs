//! Splitting raw mode parameters into deltas.

use crate::error::ModeParseError;

use super::types::{ChannelMode, ModeDelta};

impl ModeDelta {
    /// Split `MODE` parameters (`["+ov-b", "alice", "bob", "*!*@x"]`) into
    /// individual deltas, pairing argument-taking flags with their arguments
    /// in order.
    ///
    /// A list flag without an argument (`+b`) is a list query and yields a
    /// delta with no argument.
    pub fn parse(pieces: &[&str]) -> Result<Vec<ModeDelta>, ModeParseError> {
        let Some((flags, rest)) = pieces.split_first() else {
            return Err(ModeParseError::Empty);
        };

        let mut chars = flags.chars();
        let mut adding = match chars.next() {
            Some('+') => true,
            Some('-') => false,
            Some(_) => return Err(ModeParseError::MissingSign((*flags).to_owned())),
            None => return Err(ModeParseError::Empty),
        };

        let mut args = rest.iter().copied();
        let mut deltas = Vec::new();

        for c in chars {
            match c {
                '+' => adding = true,
                '-' => adding = false,
                _ => {
                    let mode = ChannelMode::from_char(c);
                    let arg = if mode.takes_arg(adding) {
                        match args.next() {
                            Some(arg) => Some(arg.to_owned()),
                            None if mode.is_list_mode() => None,
                            None => return Err(ModeParseError::MissingArgument(c)),
                        }
                    } else {
                        None
                    };
                    deltas.push(ModeDelta { adding, mode, arg });
                }
            }
        }

        let unused = args.count();
        if unused > 0 {
            return Err(ModeParseError::UnusedArguments(unused));
        }

        Ok(deltas)
    }
}
