//! Field validation for QuickChat messages.
//!
//! Two content paths exist on purpose: content assigned to a message is
//! clipped by [`truncate_content`], while [`check_send`] rejects oversized
//! content outright and reports the overflow.

use super::types::{SendError, MAX_CONTENT_LENGTH, MAX_ID_LENGTH};

/// Length of a valid `+27` number including the plus sign.
const INTERNATIONAL_LENGTH: usize = 12;

/// Length of a valid `027` number, prefix included.
const LOCAL_PREFIX_LENGTH: usize = 11;

/// Strip everything except digits and a leading `+` from a recipient.
///
/// # Examples
///
/// ```
/// use quickchat::message::validation::normalize_recipient;
///
/// assert_eq!(normalize_recipient("+27 71-869 3002"), "+27718693002");
/// assert_eq!(normalize_recipient("27+71"), "2771");
/// ```
pub fn normalize_recipient(recipient: &str) -> String {
    let mut normalized = String::with_capacity(recipient.len());
    for c in recipient.chars() {
        if c.is_ascii_digit() || (c == '+' && normalized.is_empty()) {
            normalized.push(c);
        }
    }
    normalized
}

fn is_valid_normalized(number: &str) -> bool {
    (number.starts_with("+27") && number.len() == INTERNATIONAL_LENGTH)
        || (number.starts_with("027") && number.len() == LOCAL_PREFIX_LENGTH)
}

/// Check a recipient cell number.
///
/// Valid iff the normalized number is `+27` followed by 9 digits (12
/// characters), or starts with `027` and is 11 characters long.
///
/// # Examples
///
/// ```
/// use quickchat::message::validation::valid_recipient;
///
/// assert!(valid_recipient("+27718693002"));
/// assert!(valid_recipient("027 718 693 00"));
/// assert!(!valid_recipient("08575975889"));
/// ```
pub fn valid_recipient(recipient: &str) -> bool {
    is_valid_normalized(&normalize_recipient(recipient))
}

/// Check message content: non-blank and at most [`MAX_CONTENT_LENGTH`] characters.
pub fn valid_content(content: &str) -> bool {
    !content.trim().is_empty() && content.chars().count() <= MAX_CONTENT_LENGTH
}

/// Check a message ID: present and at most [`MAX_ID_LENGTH`] characters.
pub fn valid_id(id: Option<&str>) -> bool {
    id.is_some_and(|id| id.chars().count() <= MAX_ID_LENGTH)
}

/// Clip content to [`MAX_CONTENT_LENGTH`] characters.
///
/// Returns the content and whether anything was cut.
pub fn truncate_content(content: String) -> (String, bool) {
    match content.char_indices().nth(MAX_CONTENT_LENGTH) {
        Some((byte_index, _)) => {
            let mut clipped = content;
            clipped.truncate(byte_index);
            (clipped, true)
        }
        None => (content, false),
    }
}

/// Check the send guards against raw content and recipient.
///
/// Guards are checked in order: length, recipient, emptiness. The first
/// violation is returned.
pub fn check_send(content: &str, recipient: &str) -> Result<(), SendError> {
    let length = content.chars().count();
    if length > MAX_CONTENT_LENGTH {
        return Err(SendError::TooLong {
            excess: length - MAX_CONTENT_LENGTH,
        });
    }
    if !valid_recipient(recipient) {
        return Err(SendError::InvalidRecipient);
    }
    if content.trim().is_empty() {
        return Err(SendError::EmptyContent);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_recipient_international() {
        assert!(valid_recipient("+27718693002"));
        assert!(valid_recipient("+27 71 869 3002"));
        assert!(valid_recipient("(+27) 71-869-3002"));
    }

    #[test]
    fn test_valid_recipient_local_prefix() {
        assert!(valid_recipient("02771869300"));
        assert!(valid_recipient("027 718 693 00"));
        assert!(!valid_recipient("027718693002"));
    }

    #[test]
    fn test_invalid_recipient() {
        assert!(!valid_recipient("08575975889"));
        assert!(!valid_recipient("invalid_number"));
        assert!(!valid_recipient(""));
        assert!(!valid_recipient("+2771869300"));
        assert!(!valid_recipient("+277186930021"));
        assert!(!valid_recipient("+44718693002"));
        assert!(!valid_recipient("27718693002"));
    }

    #[test]
    fn test_plus_only_kept_when_leading() {
        assert_eq!(normalize_recipient("+27+718693002"), "+27718693002");
        assert_eq!(normalize_recipient("abc+27"), "+27");
        assert_eq!(normalize_recipient("0+27718693002"), "027718693002");
        assert!(!valid_recipient("0+27718693002"));
    }

    #[test]
    fn test_valid_content() {
        assert!(valid_content("Hello"));
        assert!(valid_content(&"a".repeat(250)));
        assert!(!valid_content(&"a".repeat(251)));
        assert!(!valid_content(""));
        assert!(!valid_content("   \t\n"));
    }

    #[test]
    fn test_valid_content_counts_characters() {
        assert!(valid_content(&"é".repeat(250)));
    }

    #[test]
    fn test_valid_id() {
        assert!(valid_id(Some("1234567890")));
        assert!(valid_id(Some("")));
        assert!(!valid_id(Some("12345678901")));
        assert!(!valid_id(None));
    }

    #[test]
    fn test_truncate_content() {
        let (content, truncated) = truncate_content("a".repeat(300));
        assert!(truncated);
        assert_eq!(content.len(), 250);

        let (content, truncated) = truncate_content("hello".to_string());
        assert!(!truncated);
        assert_eq!(content, "hello");

        let (content, truncated) = truncate_content("ü".repeat(251));
        assert!(truncated);
        assert_eq!(content.chars().count(), 250);
    }

    #[test]
    fn test_check_send_overflow() {
        let content = "a".repeat(300);
        assert_eq!(
            check_send(&content, "+27718693002"),
            Err(SendError::TooLong { excess: 50 })
        );
    }

    #[test]
    fn test_check_send_overflow_reported_before_recipient() {
        let content = "a".repeat(251);
        assert_eq!(
            check_send(&content, "bad"),
            Err(SendError::TooLong { excess: 1 })
        );
    }

    #[test]
    fn test_check_send_invalid_recipient() {
        assert_eq!(
            check_send("Hello", "invalid_number"),
            Err(SendError::InvalidRecipient)
        );
    }

    #[test]
    fn test_check_send_empty() {
        assert_eq!(
            check_send("   ", "+27718693002"),
            Err(SendError::EmptyContent)
        );
    }

    #[test]
    fn test_check_send_ok() {
        assert!(check_send("Hello, this is a test message", "+27718693002").is_ok());
    }
}
