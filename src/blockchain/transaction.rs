use serde::Serialize;

use std::fmt;

/// Represents a movement of funds recorded in one block
///
/// An empty `source` marks a deposit: funds entering the ledger rather than
/// moving between two accounts. Amounts are not checked here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    /// Account the funds leave, empty for a deposit
    source: String,

    /// Account the funds arrive at
    target: String,

    /// Amount moved
    amount: i32,
}

impl Transaction {
    /// Creates a new transfer from `source` to `target`
    pub fn new(source: impl Into<String>, target: impl Into<String>, amount: i32) -> Self {
        Transaction {
            source: source.into(),
            target: target.into(),
            amount,
        }
    }

    /// Creates a deposit into `target`
    pub fn deposit(target: impl Into<String>, amount: i32) -> Self {
        Transaction::new("", target, amount)
    }

    /// The empty transaction carried by the genesis block
    pub fn genesis() -> Self {
        Transaction::new("", "", 0)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn amount(&self) -> i32 {
        self.amount
    }

    /// Checks if the transaction is a deposit
    pub fn is_deposit(&self) -> bool {
        self.source.is_empty()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_deposit() {
            write!(f, "[Deposit, Target: {}, Amount: {}]", self.target, self.amount)
        } else {
            write!(
                f,
                "[Source: {}, Target: {}, Amount: {}]",
                self.source, self.target, self.amount
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_transaction() {
        let transaction = Transaction::new("Alice", "Bob", 42);

        assert_eq!(transaction.source(), "Alice");
        assert_eq!(transaction.target(), "Bob");
        assert_eq!(transaction.amount(), 42);
        assert!(!transaction.is_deposit());
    }

    #[test]
    fn test_deposit() {
        let transaction = Transaction::deposit("Someone", 555);

        assert_eq!(transaction.source(), "");
        assert!(transaction.is_deposit());
        assert_eq!(transaction, Transaction::new("", "Someone", 555));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Transaction::new("Here", "There", 12).to_string(),
            "[Source: Here, Target: There, Amount: 12]"
        );
        assert_eq!(
            Transaction::deposit("There", -3).to_string(),
            "[Deposit, Target: There, Amount: -3]"
        );
    }
}
