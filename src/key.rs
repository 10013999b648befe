//! Key length policy and the validated [`Key`] type.

use thiserror::Error;

/// Inclusive lower bound on key length in bytes.
pub const MIN_KEY_LENGTH: usize = 4;
/// Exclusive upper bound on key length in bytes.
pub const MAX_KEY_LENGTH: usize = 127;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("key must be at least {} bytes ({0} given)", MIN_KEY_LENGTH)]
    TooShort(usize),
    #[error("key must be shorter than {} bytes ({0} given)", MAX_KEY_LENGTH)]
    TooLong(usize),
}

/// Check a candidate key against the length policy.
///
/// Only the length is constrained; any byte values are acceptable,
/// including non-printable ones. The check is pure and returns the same
/// verdict for the same bytes on every call.
pub fn validate(key: &[u8]) -> Result<(), KeyError> {
    if key.len() < MIN_KEY_LENGTH {
        return Err(KeyError::TooShort(key.len()));
    }
    if key.len() >= MAX_KEY_LENGTH {
        return Err(KeyError::TooLong(key.len()));
    }
    Ok(())
}

/// A key that has passed [`validate`].
///
/// Construction always goes through validation, so holding a `Key`
/// proves the length bounds hold. The engine borrows one for the
/// duration of a transform and never copies the material.
#[derive(Clone, PartialEq, Eq)]
pub struct Key(Vec<u8>);

impl Key {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, KeyError> {
        let bytes = bytes.into();
        validate(&bytes)?;
        Ok(Self(bytes))
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for Key {
    // Key material stays out of logs and panic messages.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Key({} bytes)", self.0.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_lengths_inside_bounds() {
        assert!(validate(b"abcd").is_ok());
        assert!(validate(b"a longer passphrase").is_ok());
        assert!(validate(&[0x5A; 126]).is_ok());
    }

    #[test]
    fn rejects_short_keys() {
        assert_eq!(validate(b""), Err(KeyError::TooShort(0)));
        assert_eq!(validate(b"abc"), Err(KeyError::TooShort(3)));
    }

    #[test]
    fn rejects_long_keys() {
        assert_eq!(validate(&[7; 127]), Err(KeyError::TooLong(127)));
        assert_eq!(validate(&[7; 200]), Err(KeyError::TooLong(200)));
    }

    #[test]
    fn any_byte_values_allowed() {
        assert!(validate(&[0x00, 0xFF, 0x0A, 0x80]).is_ok());
    }

    #[test]
    fn validation_is_repeatable() {
        let key = b"same key";
        let first = validate(key);
        for _ in 0..8 {
            assert_eq!(validate(key), first);
        }
    }

    #[test]
    fn key_preserves_bytes() {
        let key = Key::new(&b"hunter42"[..]).unwrap();
        assert_eq!(key.as_bytes(), b"hunter42");
        assert_eq!(key.len(), 8);
        assert!(!key.is_empty());
    }

    #[test]
    fn debug_does_not_leak_material() {
        let key = Key::new(&b"hunter42"[..]).unwrap();
        let shown = format!("{key:?}");
        assert!(!shown.contains("hunter42"));
        assert!(shown.contains("8 bytes"));
    }
}
