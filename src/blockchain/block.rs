use log::debug;
use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

use std::fmt;
use std::ops::RangeInclusive;

use super::hash::Hash;
use super::transaction::Transaction;
use super::validator::HashValidator;

/// Errors that can occur while building a block
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BlockError {
    #[error("Proof of work exhausted: no nonce in {first}..={last} satisfies the validator")]
    ProofOfWorkExhausted { first: u64, last: u64 },
}

/// Represents a block in the blockchain
///
/// Fields are private so `hash` always matches the other four: it is
/// computed once in [`Block::with_nonce`] or found by [`Block::mine`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    /// Index of the block in the chain
    index: u32,

    /// The single transaction carried by this block
    transaction: Transaction,

    /// Hash of the previous block, empty for the genesis block
    previous_hash: Hash,

    /// Proof of work
    nonce: u64,

    /// Hash of this block
    hash: Hash,
}

impl Block {
    /// Creates a block with a known nonce, computing its hash
    pub fn with_nonce(index: u32, transaction: Transaction, previous_hash: Hash, nonce: u64) -> Self {
        let hash = Block::digest(index, &transaction, &previous_hash, nonce);

        Block {
            index,
            transaction,
            previous_hash,
            nonce,
            hash,
        }
    }

    /// Mines a block, trying nonces from zero upward until the validator
    /// accepts the hash
    ///
    /// # Errors
    ///
    /// [`BlockError::ProofOfWorkExhausted`] if no `u64` nonce works
    pub fn mine<V>(
        index: u32,
        transaction: Transaction,
        previous_hash: Hash,
        validator: &V,
    ) -> Result<Self, BlockError>
    where
        V: HashValidator + ?Sized,
    {
        Block::mine_within(index, transaction, previous_hash, validator, 0..=u64::MAX)
    }

    /// Mines a block, searching only the nonces in `nonces` in ascending order
    pub fn mine_within<V>(
        index: u32,
        transaction: Transaction,
        previous_hash: Hash,
        validator: &V,
        nonces: RangeInclusive<u64>,
    ) -> Result<Self, BlockError>
    where
        V: HashValidator + ?Sized,
    {
        let (first, last) = (*nonces.start(), *nonces.end());

        for nonce in nonces {
            let hash = Block::digest(index, &transaction, &previous_hash, nonce);

            if validator.is_valid(&hash) {
                debug!(
                    "Mined block {} with nonce {} after {} attempts",
                    index,
                    nonce,
                    (nonce - first).saturating_add(1)
                );
                return Ok(Block {
                    index,
                    transaction,
                    previous_hash,
                    nonce,
                    hash,
                });
            }
        }

        Err(BlockError::ProofOfWorkExhausted { first, last })
    }

    /// Computes the SHA-256 hash of a block's contents
    ///
    /// Fields are fed in a fixed order: index (4 bytes, big-endian), source
    /// bytes, target bytes, amount (4 bytes, big-endian), previous hash
    /// bytes, nonce (8 bytes, big-endian).
    pub fn digest(index: u32, transaction: &Transaction, previous_hash: &Hash, nonce: u64) -> Hash {
        let mut hasher = Sha256::new();

        hasher.update(index.to_be_bytes());
        hasher.update(transaction.source().as_bytes());
        hasher.update(transaction.target().as_bytes());
        hasher.update(transaction.amount().to_be_bytes());
        hasher.update(previous_hash.as_bytes());
        hasher.update(nonce.to_be_bytes());

        Hash::from(hasher.finalize().as_slice())
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn previous_hash(&self) -> &Hash {
        &self.previous_hash
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn hash(&self) -> &Hash {
        &self.hash
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Block {} (Transaction: {}, Nonce: {}, prevHash: {}, hash: {})",
            self.index, self.transaction, self.nonce, self.previous_hash, self.hash
        )
    }
}
