//! Channel-scoped capability names.
//!
//! Names take the form `<channel>,<capability>`. Anti-capabilities put a `-`
//! in front of the capability part (`#rust,-op`), which is how the classic
//! bot capability database spells them.

use std::fmt;

/// A capability the enforcer asks about, scoped to a channel at query time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Op,
    Halfop,
    Voice,
    Topic,
    Protected,
    AntiOp,
    AntiHalfop,
    AntiVoice,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Op => "op",
            Self::Halfop => "halfop",
            Self::Voice => "voice",
            Self::Topic => "topic",
            Self::Protected => "protected",
            Self::AntiOp => "-op",
            Self::AntiHalfop => "-halfop",
            Self::AntiVoice => "-voice",
        }
    }

    /// The scoped name for `channel`, e.g. `#rust,op`.
    pub fn scoped(&self, channel: &str) -> String {
        channel_capability(channel, self.as_str())
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Join a channel and a capability into a scoped capability name.
pub fn channel_capability(channel: &str, capability: &str) -> String {
    format!("{},{}", channel, capability)
}

/// Whether `name` (global or scoped) is an anti-capability.
pub fn is_anti_capability(name: &str) -> bool {
    let cap = name.rsplit_once(',').map_or(name, |(_, cap)| cap);
    cap.starts_with('-')
}

/// The anti form of a positive capability (`#rust,op` -> `#rust,-op`,
/// `admin` -> `-admin`). Anti names are returned unchanged.
pub fn anti_capability(name: &str) -> String {
    if is_anti_capability(name) {
        return name.to_string();
    }
    match name.rsplit_once(',') {
        Some((channel, cap)) => format!("{},-{}", channel, cap),
        None => format!("-{}", name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoped_names() {
        assert_eq!(Capability::Op.scoped("#rust"), "#rust,op");
        assert_eq!(Capability::Protected.scoped("#rust"), "#rust,protected");
        assert_eq!(Capability::AntiVoice.scoped("#rust"), "#rust,-voice");
    }

    #[test]
    fn test_anti_forms() {
        assert_eq!(anti_capability("#rust,op"), "#rust,-op");
        assert_eq!(anti_capability("admin"), "-admin");
        assert_eq!(anti_capability("#rust,-op"), "#rust,-op");
        assert!(is_anti_capability("#rust,-halfop"));
        assert!(!is_anti_capability("#rust,halfop"));
        assert!(is_anti_capability("-admin"));
    }
}
