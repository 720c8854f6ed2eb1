//! Runtime configuration for the ledger shell

use anyhow::{bail, Result};
use clap::Parser;

/// Length of a SHA-256 digest; no difficulty above this can be met
pub const MAX_DIFFICULTY: usize = 32;

/// Interactive proof-of-work ledger
#[derive(Debug, Clone, Parser)]
#[command(name = "ledger-chain", version, about)]
pub struct Config {
    /// Number of leading zero bytes a block hash must have
    #[arg(short, long, default_value_t = 3)]
    pub difficulty: usize,

    /// Default log filter when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Config {
    /// Parses the command line and checks the values
    pub fn load() -> Result<Self> {
        let config = Config::parse();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.difficulty > MAX_DIFFICULTY {
            bail!(
                "difficulty must be between 0 and {}, got {}",
                MAX_DIFFICULTY,
                self.difficulty
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["ledger-chain"]).unwrap();

        assert_eq!(config.difficulty, 3);
        assert_eq!(config.log_level, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_difficulty_flag() {
        let config = Config::try_parse_from(["ledger-chain", "--difficulty", "1"]).unwrap();
        assert_eq!(config.difficulty, 1);

        let config = Config::try_parse_from(["ledger-chain", "-d", "0", "--log-level", "debug"]).unwrap();
        assert_eq!(config.difficulty, 0);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_difficulty_out_of_range() {
        let config = Config::try_parse_from(["ledger-chain", "--difficulty", "33"]).unwrap();
        assert!(config.validate().is_err());

        assert!(Config::try_parse_from(["ledger-chain", "--difficulty", "-1"]).is_err());
    }
}
