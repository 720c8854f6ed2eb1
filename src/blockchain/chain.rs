use log::{debug, info, warn};
use thiserror::Error;

use std::fmt;
use std::slice;

use super::block::{Block, BlockError};
use super::hash::Hash;
use super::transaction::Transaction;
use super::validator::HashValidator;

/// Errors that can occur during blockchain operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BlockchainError {
    #[error("Block error: {0}")]
    BlockError(#[from] BlockError),

    #[error("Linkage mismatch: block's previous hash {found} does not match tail hash {expected}")]
    LinkageMismatch { expected: Hash, found: Hash },

    #[error("Invalid proof of work: hash {0} rejected by the validator")]
    InvalidProofOfWork(Hash),

    #[error("Invalid chain at block {index}: {reason}")]
    ChainInvalid { index: u32, reason: String },
}

/// Represents the blockchain
///
/// Never empty: the genesis block is mined on construction and cannot be
/// removed. Every later block must link to the tail's hash and satisfy the
/// validator the chain was built with.
pub struct Blockchain {
    /// The chain of blocks, genesis first
    blocks: Vec<Block>,

    /// Proof-of-work policy for genesis, appends and validity checks
    validator: Box<dyn HashValidator>,
}

impl fmt::Debug for Blockchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blockchain")
            .field("blocks", &self.blocks)
            .finish_non_exhaustive()
    }
}

impl Blockchain {
    /// Creates a new blockchain, mining its genesis block with `validator`
    ///
    /// # Errors
    ///
    /// [`BlockchainError::BlockError`] if no nonce satisfies the validator
    /// for the genesis block
    pub fn new<V>(validator: V) -> Result<Self, BlockchainError>
    where
        V: HashValidator + 'static,
    {
        let genesis = Block::mine(0, Transaction::genesis(), Hash::empty(), &validator)?;
        info!("Created genesis block with hash {}", genesis.hash());

        Ok(Blockchain {
            blocks: vec![genesis],
            validator: Box::new(validator),
        })
    }

    /// Number of blocks, including the genesis block
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Never true: the genesis block always exists
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Gets the last block in the chain
    pub fn last_block(&self) -> &Block {
        // The genesis block is never removed.
        &self.blocks[self.blocks.len() - 1]
    }

    /// Gets the hash of the last block in the chain
    pub fn last_hash(&self) -> &Hash {
        self.last_block().hash()
    }

    /// Index given to the next mined block: the current length
    pub fn next_index(&self) -> u32 {
        self.blocks.len() as u32
    }

    /// Mines a block for `transaction` that would extend the current tail
    ///
    /// The chain is not modified; pass the result to [`Blockchain::append`].
    pub fn mine(&self, transaction: Transaction) -> Result<Block, BlockchainError> {
        let block = Block::mine(
            self.next_index(),
            transaction,
            self.last_hash().clone(),
            self.validator.as_ref(),
        )?;

        Ok(block)
    }

    /// Appends a block to the end of the chain
    ///
    /// The block's index is not checked against the tail.
    ///
    /// # Errors
    ///
    /// * [`BlockchainError::LinkageMismatch`] if the block does not point at the tail
    /// * [`BlockchainError::InvalidProofOfWork`] if the validator rejects its hash
    pub fn append(&mut self, block: Block) -> Result<(), BlockchainError> {
        if block.previous_hash() != self.last_hash() {
            warn!("Rejected block {}: previous hash does not match tail", block.index());
            return Err(BlockchainError::LinkageMismatch {
                expected: self.last_hash().clone(),
                found: block.previous_hash().clone(),
            });
        }

        if !self.validator.is_valid(block.hash()) {
            warn!("Rejected block {}: invalid proof of work", block.index());
            return Err(BlockchainError::InvalidProofOfWork(block.hash().clone()));
        }

        debug!("Appended block {} with hash {}", block.index(), block.hash());
        self.blocks.push(block);

        Ok(())
    }

    /// Removes the last block, unless only the genesis block remains
    ///
    /// # Returns
    ///
    /// true if a block was removed, false otherwise
    pub fn remove_last(&mut self) -> bool {
        if self.blocks.len() <= 1 {
            return false;
        }

        if let Some(block) = self.blocks.pop() {
            debug!("Removed block {}", block.index());
        }

        true
    }

    /// Validates the blockchain
    ///
    /// # Returns
    ///
    /// true if the blockchain is valid, false otherwise
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Validates the blockchain, reporting the first broken block
    ///
    /// Checks that each block links to its predecessor's hash and that every
    /// block's hash satisfies the validator.
    pub fn validate(&self) -> Result<(), BlockchainError> {
        for (i, current_block) in self.blocks.iter().enumerate() {
            if !self.validator.is_valid(current_block.hash()) {
                let err = BlockchainError::ChainInvalid {
                    index: current_block.index(),
                    reason: "hash does not satisfy the validator".to_string(),
                };
                warn!("{}", err);
                return Err(err);
            }

            if let Some(next_block) = self.blocks.get(i + 1) {
                if next_block.previous_hash() != current_block.hash() {
                    let err = BlockchainError::ChainInvalid {
                        index: next_block.index(),
                        reason: "previous hash does not match preceding block".to_string(),
                    };
                    warn!("{}", err);
                    return Err(err);
                }
            }
        }

        Ok(())
    }

    /// Computes a user's balance over every transaction in the chain
    ///
    /// A transaction credits its target and debits its source. A user who
    /// appears in no transaction has a balance of zero.
    pub fn balance_of(&self, user: &str) -> i64 {
        self.transactions().fold(0, |balance, transaction| {
            let amount = i64::from(transaction.amount());

            if transaction.target() == user {
                balance + amount
            } else if transaction.source() == user {
                balance - amount
            } else {
                balance
            }
        })
    }

    /// Iterates over the target of every transaction, in chain order
    ///
    /// Only targets are listed; an account that has only ever sent funds
    /// does not appear. The genesis block contributes an empty name.
    pub fn users(&self) -> impl Iterator<Item = &str> + '_ {
        self.transactions().map(Transaction::target)
    }

    /// Iterates over the blocks, genesis first
    pub fn blocks(&self) -> slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    /// Iterates over the transactions, genesis first
    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> + '_ {
        self.blocks.iter().map(Block::transaction)
    }
}

impl<'a> IntoIterator for &'a Blockchain {
    type Item = &'a Transaction;
    type IntoIter = std::iter::Map<slice::Iter<'a, Block>, fn(&'a Block) -> &'a Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter().map(Block::transaction as fn(&'a Block) -> &'a Transaction)
    }
}
