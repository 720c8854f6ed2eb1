use super::hash::Hash;

/// Decides whether a hash is acceptable proof of work
///
/// Blocks and chains treat the validator as an opaque predicate, so the
/// difficulty policy can change without touching hashing or chain code.
/// Any `Fn(&Hash) -> bool` closure is a validator.
pub trait HashValidator {
    fn is_valid(&self, hash: &Hash) -> bool;
}

impl<F> HashValidator for F
where
    F: Fn(&Hash) -> bool,
{
    fn is_valid(&self, hash: &Hash) -> bool {
        self(hash)
    }
}

/// Accepts hashes whose first `n` bytes are all zero
///
/// Hashes shorter than `n` bytes are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadingZeroBytes(pub usize);

impl HashValidator for LeadingZeroBytes {
    fn is_valid(&self, hash: &Hash) -> bool {
        hash.len() >= self.0 && hash.as_bytes()[..self.0].iter().all(|&b| b == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_validator() {
        let starts_with_five = |h: &Hash| h.byte_at(0) == Ok(5);

        assert!(starts_with_five.is_valid(&Hash::new(&[5, 1])));
        assert!(!starts_with_five.is_valid(&Hash::new(&[1, 5])));
        assert!(!starts_with_five.is_valid(&Hash::empty()));
    }

    #[test]
    fn test_leading_zero_bytes() {
        let validator = LeadingZeroBytes(3);

        assert!(validator.is_valid(&Hash::new(&[0, 0, 0, 7])));
        assert!(validator.is_valid(&Hash::new(&[0, 0, 0])));
        assert!(!validator.is_valid(&Hash::new(&[0, 0, 1, 0])));
        assert!(!validator.is_valid(&Hash::new(&[0, 0])));
    }

    #[test]
    fn test_zero_difficulty_accepts_everything() {
        assert!(LeadingZeroBytes(0).is_valid(&Hash::empty()));
        assert!(LeadingZeroBytes(0).is_valid(&Hash::new(&[0xff])));
    }
}
