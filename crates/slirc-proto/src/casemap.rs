//! RFC 1459 case mapping.
//!
//! Nicknames and channel names compare case-insensitively, and the rfc1459
//! mapping additionally folds `[]\~` onto `{}|^`.

/// Fold a single character to IRC lowercase.
#[inline]
pub const fn irc_lower_char(c: char) -> char {
    match c {
        'A'..='Z' => c.to_ascii_lowercase(),
        '[' => '{',
        ']' => '}',
        '\\' => '|',
        '~' => '^',
        _ => c,
    }
}

/// Fold a string to IRC lowercase. Used for every map key that holds a nick
/// or channel name.
pub fn irc_to_lower(s: &str) -> String {
    s.chars().map(irc_lower_char).collect()
}

/// Case-insensitive equality under RFC 1459.
pub fn irc_eq(a: &str, b: &str) -> bool {
    a.len() == b.len()
        && a.chars()
            .zip(b.chars())
            .all(|(x, y)| irc_lower_char(x) == irc_lower_char(y))
}
