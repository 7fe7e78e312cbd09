//! Message ID and content hash generation.
//!
//! The hash is a human-readable fingerprint, not a cryptographic digest:
//!
//! ```text
//! <first two chars of id>:<sequence>:<FIRSTWORD><LASTWORD>
//! ```

use rand::Rng;

use super::types::MAX_ID_LENGTH;

/// Generate a random 10-digit message ID.
///
/// Uniqueness is not checked here; see `MessageSession::compose`.
pub fn generate_id() -> String {
    generate_id_with(&mut rand::rng())
}

/// Generate a message ID from the given random source.
pub fn generate_id_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..MAX_ID_LENGTH)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

/// Keep only ASCII letters and upper-case them.
fn hash_word(word: &str) -> String {
    word.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Compute the content hash.
///
/// Returns an empty string if either `id` or `content` is unset. A
/// single-word content repeats that word; empty content yields empty words.
///
/// # Examples
///
/// ```
/// use quickchat::message::fingerprint::compute_hash;
///
/// let hash = compute_hash(
///     Some("0012345678"),
///     1,
///     Some("Hi Mike, can you join us for dinner tonight."),
/// );
/// assert_eq!(hash, "00:1:HITONIGHT");
/// assert_eq!(compute_hash(None, 1, Some("Hi")), "");
/// ```
pub fn compute_hash(id: Option<&str>, sequence: u32, content: Option<&str>) -> String {
    let (Some(id), Some(content)) = (id, content) else {
        return String::new();
    };

    let prefix: String = id.chars().take(2).collect();
    let mut words = content.split_whitespace();
    let first = words.next().unwrap_or("");
    let last = words.last().unwrap_or(first);

    format!(
        "{prefix}:{sequence}:{}{}",
        hash_word(first),
        hash_word(last)
    )
}

/// Read the sequence number back out of a hash.
pub fn parse_sequence(hash: &str) -> Option<u32> {
    let mut parts = hash.splitn(3, ':');
    parts.next()?;
    parts.next()?.parse().ok()
}
