//! Channel name utilities.
//!
//! # Reference
//! - RFC 2812 Section 1.3: Channel names

/// Maximum channel name length, prefix included.
pub const MAX_CHANNEL_LEN: usize = 50;

/// Extension trait for checking if a string is a valid IRC channel name.
pub trait ChannelExt {
    /// Valid names start with `#`, `&`, `+` or `!`, are at most 50 characters
    /// long and contain no space, comma, BEL, NUL or other control character.
    fn is_channel_name(&self) -> bool;
}

impl ChannelExt for str {
    fn is_channel_name(&self) -> bool {
        let mut chars = self.chars();
        if !matches!(chars.next(), Some('#' | '&' | '+' | '!')) {
            return false;
        }
        if self.chars().count() > MAX_CHANNEL_LEN {
            return false;
        }
        chars.all(|c| c != ' ' && c != ',' && !c.is_control())
    }
}

impl ChannelExt for String {
    fn is_channel_name(&self) -> bool {
        self.as_str().is_channel_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_channels() {
        assert!("#rust".is_channel_name());
        assert!("&local".is_channel_name());
        assert!("+modeless".is_channel_name());
        assert!("!12345chan".is_channel_name());
    }

    #[test]
    fn test_invalid_channels() {
        assert!(!"".is_channel_name());
        assert!(!"rust".is_channel_name());
        assert!(!"#two words".is_channel_name());
        assert!(!"#a,b".is_channel_name());
        assert!(!"#bell\x07".is_channel_name());
        assert!(!format!("#{}", "x".repeat(50)).is_channel_name());
    }
}
