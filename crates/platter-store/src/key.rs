//! Key validation.
//!
//! A key names exactly one file directly inside the namespace directory, so
//! anything that could resolve elsewhere is rejected before any I/O:
//!
//! - Must be non-empty
//! - Must not contain a path separator (`/` or `\`), `:`, or NUL
//! - Must not contain `..`
//! - Must not start with `.` (also reserves the `.tmp-` staging prefix)
//!
//! Keys are rejected, never normalized: normalization could alias two
//! distinct caller keys onto the same file.

use crate::error::{StoreError, StoreResult};

/// Characters that are forbidden anywhere in a key.
const FORBIDDEN_CHARS: &[char] = &['/', '\\', ':', '\0'];

/// Validate a key, returning `Ok(())` if it safely names a file inside the
/// namespace directory.
pub fn validate_key(key: &str) -> StoreResult<()> {
    if key.is_empty() {
        return Err(invalid(key, "key must not be empty"));
    }

    if key.starts_with('.') {
        return Err(invalid(key, "key must not start with '.'"));
    }

    for ch in FORBIDDEN_CHARS {
        if key.contains(*ch) {
            return Err(invalid(key, format!("contains forbidden character: {ch:?}")));
        }
    }

    if key.contains("..") {
        return Err(invalid(key, "must not contain '..'"));
    }

    Ok(())
}

fn invalid(key: &str, reason: impl Into<String>) -> StoreError {
    StoreError::InvalidKey {
        key: key.to_string(),
        reason: reason.into(),
    }
}
