// Blockchain module
//
// This module contains the core ledger implementation:
// - Hash value type
// - Transaction record
// - Hash validators (proof-of-work policy)
// - Block structure and mining
// - Blockchain structure

pub mod block;
pub mod chain;
pub mod hash;
pub mod transaction;
pub mod validator;

// Re-export main components for easier access
pub use block::{Block, BlockError};
pub use chain::{Blockchain, BlockchainError};
pub use hash::{Hash, HashError};
pub use transaction::Transaction;
pub use validator::{HashValidator, LeadingZeroBytes};
