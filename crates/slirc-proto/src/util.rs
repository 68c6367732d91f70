//! Wildcard mask matching.

use crate::casemap::irc_lower_char;

/// Match `text` against an IRC wildcard `pattern`.
///
/// `*` matches any run of characters (including none) and `?` matches exactly
/// one. Comparison uses RFC 1459 case mapping.
///
/// ```
/// use slirc_proto::wildcard_match;
///
/// assert!(wildcard_match("*", "anything"));
/// assert!(wildcard_match("te?t*", "TESTING"));
/// assert!(wildcard_match("#chan[*]", "#CHAN{x}"));
/// assert!(!wildcard_match("*.org", "example.com"));
/// ```
pub fn wildcard_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().map(irc_lower_char).collect();
    let text: Vec<char> = text.chars().map(irc_lower_char).collect();

    let (mut p, mut t) = (0, 0);
    // Backtrack point: pattern index after the last '*' and the text index it resumed at.
    let mut star: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some('*') => {
                star = Some((p + 1, t));
                p += 1;
            }
            Some(&c) if c == '?' || c == text[t] => {
                p += 1;
                t += 1;
            }
            _ => match star {
                Some((sp, st)) => {
                    p = sp;
                    t = st + 1;
                    star = Some((sp, st + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}

/// Match a `nick!user@host` string against a ban or access mask.
#[inline]
pub fn matches_hostmask(pattern: &str, hostmask: &str) -> bool {
    wildcard_match(pattern, hostmask)
}
