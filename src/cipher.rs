//! Repeating-key XOR combine step.
//!
//! One call transforms one chunk: byte `i` of `data` is XORed with
//! `key[i % key.len()]`, where `i` counts from the start of the chunk.
//! The engine invokes this once per chunk it reads, so the key phase
//! restarts at index 0 on every chunk boundary instead of continuing
//! across the stream. That reset is part of the on-disk format: both
//! directions apply the same phase, and output stays byte-for-byte
//! compatible with files produced by earlier versions of the tool.

/// XOR `data` in place against a repeating `key`.
///
/// Self-inverse: applying the same call twice with the same key restores
/// the original bytes.
///
/// # Panics
/// Panics if `key` is empty. Callers hold a validated
/// [`Key`](crate::key::Key), which cannot be empty.
#[inline]
pub fn xor_in_place(data: &mut [u8], key: &[u8]) {
    assert!(!key.is_empty(), "XOR key must not be empty");
    for (i, byte) in data.iter_mut().enumerate() {
        *byte ^= key[i % key.len()];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_repeats_across_the_buffer() {
        let mut data = vec![0u8; 10];
        xor_in_place(&mut data, b"abc");
        assert_eq!(data, b"abcabcabca");
    }

    #[test]
    fn positions_use_index_mod_key_length() {
        let mut data = vec![0u8; 9];
        xor_in_place(&mut data, b"km");
        assert_eq!(data, b"kmkmkmkmk");
    }

    #[test]
    fn self_inverse() {
        let original: Vec<u8> = (0u8..=255).collect();
        let mut data = original.clone();
        xor_in_place(&mut data, b"not so secret");
        assert_ne!(data, original);
        xor_in_place(&mut data, b"not so secret");
        assert_eq!(data, original);
    }

    #[test]
    fn length_never_changes() {
        let mut data = vec![0xA7u8; 1234];
        xor_in_place(&mut data, b"four");
        assert_eq!(data.len(), 1234);
    }

    #[test]
    fn phase_restarts_on_each_call() {
        let key = b"test";
        let mut whole = vec![0u8; 10];
        xor_in_place(&mut whole, key);

        let mut split = vec![0u8; 10];
        let (head, tail) = split.split_at_mut(6);
        xor_in_place(head, key);
        xor_in_place(tail, key);

        // 6 is not a multiple of 4, so the second call restarts the key
        // where a single pass would have continued it.
        assert_eq!(&split[..6], &whole[..6]);
        assert_ne!(&split[6..], &whole[6..]);
        assert_eq!(split[6], b't');
    }

    #[test]
    fn empty_data_is_a_no_op() {
        let mut data: Vec<u8> = Vec::new();
        xor_in_place(&mut data, b"four");
        assert!(data.is_empty());
    }

    #[test]
    #[should_panic(expected = "XOR key must not be empty")]
    fn empty_key_panics() {
        let mut data = vec![1u8, 2, 3];
        xor_in_place(&mut data, b"");
    }
}
