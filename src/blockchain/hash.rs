use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};
use thiserror::Error;

use std::fmt;
use std::str::FromStr;

/// Errors that can occur when building or reading a hash
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HashError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Byte index {index} out of range for hash of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// An immutable digest value
///
/// The bytes are always copied in on construction and copied out by
/// [`Hash::raw_bytes`], so no caller can alias the stored buffer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Hash(Box<[u8]>);

impl Hash {
    /// Creates a hash holding a copy of `data`
    pub fn new(data: &[u8]) -> Self {
        Hash(data.into())
    }

    /// The zero-length hash used as the genesis block's previous hash
    pub fn empty() -> Self {
        Hash::default()
    }

    /// Computes the SHA-256 digest of `data`
    pub fn sha256(data: &[u8]) -> Self {
        Hash::from(Sha256::digest(data).as_slice())
    }

    /// Parses a hex string (either case) into a hash
    pub fn from_hex(s: &str) -> Result<Self, HashError> {
        hex::decode(s.trim())
            .map(|bytes| Hash(bytes.into_boxed_slice()))
            .map_err(|e| HashError::InvalidInput(format!("'{}' is not a hex hash: {}", s, e)))
    }

    /// Number of bytes in the hash
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Gets the byte at position `index`
    ///
    /// # Errors
    ///
    /// [`HashError::IndexOutOfRange`] if `index >= self.len()`
    pub fn byte_at(&self, index: usize) -> Result<u8, HashError> {
        self.0
            .get(index)
            .copied()
            .ok_or(HashError::IndexOutOfRange {
                index,
                len: self.0.len(),
            })
    }

    /// Returns a fresh copy of the stored bytes
    pub fn raw_bytes(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    /// Borrows the stored bytes read-only
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<&[u8]> for Hash {
    fn from(data: &[u8]) -> Self {
        Hash::new(data)
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode_upper(&self.0))
    }
}

impl FromStr for Hash {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hash::from_hex(s)
    }
}

impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_basic_accessors() {
        let hash = Hash::new(&[1, 1, 2, 3, 5, 8]);

        assert_eq!(hash.len(), 6);
        assert_eq!(hash.byte_at(0).unwrap(), 1);
        assert_eq!(hash.byte_at(4).unwrap(), 5);
        assert_eq!(hash.byte_at(5).unwrap(), 8);
        assert_eq!(hash.raw_bytes(), vec![1, 1, 2, 3, 5, 8]);
    }

    #[test]
    fn test_byte_at_out_of_range() {
        let hash = Hash::new(&[1, 2, 3]);

        assert_eq!(
            hash.byte_at(3),
            Err(HashError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert!(Hash::empty().byte_at(0).is_err());
    }

    #[test]
    fn test_construction_copies_input() {
        let mut data = vec![9, 9, 9];
        let hash = Hash::new(&data);
        data[0] = 0;

        assert_eq!(hash.byte_at(0).unwrap(), 9);

        // Mutating the returned copy leaves the hash alone
        let mut out = hash.raw_bytes();
        out[1] = 0;
        assert_eq!(hash.byte_at(1).unwrap(), 9);
    }

    #[test]
    fn test_equality_is_structural() {
        let hash = Hash::new(&[1, 1, 2, 3, 5, 8]);

        assert_eq!(hash, Hash::new(&[1, 1, 2, 3, 5, 8]));
        assert_ne!(hash, Hash::new(&[1, 1, 2, 3, 5]));
        assert_ne!(hash, Hash::new(&[1, 1, 2, 3, 5, 8, 11]));
        assert_ne!(hash, Hash::new(&[0, 1, 2, 3, 5, 8]));
        assert_ne!(hash, Hash::new(&[1, 1, 2, 3, 5, 7]));

        let mut set = HashSet::new();
        set.insert(hash.clone());
        assert!(set.contains(&Hash::new(&[1, 1, 2, 3, 5, 8])));
    }

    #[test]
    fn test_display_is_uppercase_hex() {
        assert_eq!(Hash::new(&[3, 1, 4, 1, 5]).to_string(), "0301040105");
        assert_eq!(Hash::new(&[0xab, 0x0f, 0xff]).to_string(), "AB0FFF");
        assert_eq!(Hash::empty().to_string(), "");
    }

    #[test]
    fn test_parse_hex() {
        let hash = Hash::new(&[0xde, 0xad, 0xbe, 0xef]);

        assert_eq!(hash.to_string().parse::<Hash>().unwrap(), hash);
        assert_eq!(Hash::from_hex("deadbeef").unwrap(), hash);
        assert!(matches!(Hash::from_hex("abc"), Err(HashError::InvalidInput(_))));
        assert!(matches!(Hash::from_hex("zz"), Err(HashError::InvalidInput(_))));
    }

    #[test]
    fn test_sha256_length() {
        let hash = Hash::sha256(b"hello");
        assert_eq!(hash.len(), 32);
        assert_eq!(
            hash.to_string(),
            "2CF24DBA5FB0A30E26E83B2AC5B9E29E1B161E5C1FA7425E73043362938B9824"
        );
    }
}
