//! Document key sanitization
//!
//! Hosted document stores reserve `.`, `#`, `$`, `/`, `[` and `]` in key
//! names. Every key that ends up in a persisted document goes through
//! [`sanitize_key`] first, so in-memory keys and stored keys always agree.

/// Characters that may not appear in a document key
pub const RESERVED_KEY_CHARS: [char; 6] = ['.', '#', '$', '/', '[', ']'];

/// Replace each reserved character with `_`, then trim surrounding whitespace.
pub fn sanitize_key(raw: &str) -> String {
    raw.replace(&RESERVED_KEY_CHARS[..], "_").trim().to_string()
}
