//! Redaction helpers for showing secrets on screen.
//!
//! Lengths are counted in characters so multi-byte input is never split.

const MASK_CHAR: char = '*';

fn masked(len: usize) -> String {
    std::iter::repeat(MASK_CHAR).take(len).collect()
}

fn last_chars(secret: &str, count: usize) -> String {
    let total = secret.chars().count();
    secret.chars().skip(total.saturating_sub(count)).collect()
}

/// Hide all but the last `visible` characters of `secret`.
///
/// When `secret` is no longer than `visible`, nothing is revealed and the
/// result is a run of mask characters as long as `secret`.
pub fn mask_secret(secret: &str, visible: usize) -> String {
    let total = secret.chars().count();
    if total > visible {
        let mut result = masked(total - visible);
        result.push_str(&last_chars(secret, visible));
        result
    } else {
        masked(total)
    }
}

/// The last `count` characters of `secret`, or a fully masked string when
/// `secret` is too short to reveal only a suffix.
pub fn visible_suffix(secret: &str, count: usize) -> String {
    let total = secret.chars().count();
    if total > count {
        last_chars(secret, count)
    } else {
        masked(total)
    }
}
