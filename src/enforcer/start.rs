//! The `startenforcer` command.

use slirc_proto::{Command, Hostmask};

use super::EnforcerConfig;
use crate::error::{EnforcerError, REPLY_SUCCESS};

/// Command word recognised by [`StartArgs::parse_command`].
pub const START_COMMAND: &str = "startenforcer";

/// Arguments of `startenforcer [<trustedService> [<revenge> [<topicPrefix>]]]`.
/// Anything left out falls back to the configured defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartArgs {
    pub trusted_service: Option<String>,
    pub revenge: Option<bool>,
    pub topic_prefix: Option<String>,
}

impl StartArgs {
    /// Parse the argument text following the command word.
    ///
    /// The topic prefix is the rest of the line and may contain spaces; wrap
    /// it in double quotes to keep trailing whitespace.
    pub fn parse(args: &str) -> Result<Self, EnforcerError> {
        let (service, rest) = next_token(args);
        let (revenge, rest) = next_token(rest);

        let revenge = revenge.map(parse_switch).transpose()?;
        let prefix = rest.trim_start();
        let topic_prefix = if prefix.is_empty() {
            None
        } else {
            Some(unquote(prefix).to_string())
        };

        Ok(Self {
            trusted_service: service.map(str::to_string),
            revenge,
            topic_prefix,
        })
    }

    /// Parse a full command line. `None` if the line is not a start command.
    pub fn parse_command(line: &str) -> Option<Result<Self, EnforcerError>> {
        let (word, rest) = next_token(line);
        match word {
            Some(word) if word.eq_ignore_ascii_case(START_COMMAND) => Some(Self::parse(rest)),
            _ => None,
        }
    }

    /// Fill in absent arguments from `defaults`.
    pub fn resolve(self, defaults: &EnforcerConfig) -> EnforcerConfig {
        EnforcerConfig {
            trusted_service: self
                .trusted_service
                .unwrap_or_else(|| defaults.trusted_service.clone()),
            revenge: self.revenge.unwrap_or(defaults.revenge),
            topic_prefix: self
                .topic_prefix
                .unwrap_or_else(|| defaults.topic_prefix.clone()),
        }
    }
}

/// NOTICE sent back to whoever issued the start command.
pub fn start_reply(requester: &Hostmask, result: &Result<(), EnforcerError>) -> Option<Command> {
    let text = match result {
        Ok(()) => REPLY_SUCCESS.to_string(),
        Err(e) => e.reply_text()?,
    };
    Some(Command::NOTICE(requester.nick.clone(), text))
}

fn next_token(s: &str) -> (Option<&str>, &str) {
    let s = s.trim_start();
    if s.is_empty() {
        return (None, s);
    }
    match s.find(char::is_whitespace) {
        Some(end) => (Some(&s[..end]), &s[end..]),
        None => (Some(s), ""),
    }
}

fn parse_switch(value: &str) -> Result<bool, EnforcerError> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(EnforcerError::InvalidArgument(format!(
            "expected on or off for revenge, got {:?}",
            value
        ))),
    }
}

fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments() {
        assert_eq!(StartArgs::parse("").unwrap(), StartArgs::default());
        assert_eq!(StartArgs::parse("   ").unwrap(), StartArgs::default());
    }

    #[test]
    fn test_all_arguments() {
        let args = StartArgs::parse("X3 on [OFFICIAL] news: ").unwrap();
        assert_eq!(args.trusted_service.as_deref(), Some("X3"));
        assert_eq!(args.revenge, Some(true));
        assert_eq!(args.topic_prefix.as_deref(), Some("[OFFICIAL] news: "));

        let args = StartArgs::parse("ChanServ NO \"[OFFICIAL] \"").unwrap();
        assert_eq!(args.revenge, Some(false));
        assert_eq!(args.topic_prefix.as_deref(), Some("[OFFICIAL] "));
    }

    #[test]
    fn test_bad_switch() {
        let err = StartArgs::parse("ChanServ maybe").unwrap_err();
        assert_eq!(err.error_code(), "invalid_argument");
    }

    #[test]
    fn test_parse_command_and_resolve() {
        assert!(StartArgs::parse_command("stopenforcer").is_none());
        let args = StartArgs::parse_command("StartEnforcer Q").unwrap().unwrap();

        let defaults = EnforcerConfig {
            trusted_service: "ChanServ".into(),
            revenge: true,
            topic_prefix: "[X] ".into(),
        };
        let config = args.resolve(&defaults);
        assert_eq!(config.trusted_service, "Q");
        assert!(config.revenge);
        assert_eq!(config.topic_prefix, "[X] ");
    }

    #[test]
    fn test_replies() {
        let who = Hostmask::new("root", "r", "h");
        assert_eq!(
            start_reply(&who, &Ok(())).unwrap().to_string(),
            "NOTICE root :The operation succeeded."
        );
        let denied = Err(EnforcerError::PermissionDenied("admin".into()));
        assert_eq!(
            start_reply(&who, &denied).unwrap().to_string(),
            "NOTICE root :You don't have the admin capability."
        );
        assert!(start_reply(&who, &Err(EnforcerError::ActorGone)).is_none());
    }
}
