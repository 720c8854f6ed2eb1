use std::fmt;
use std::str::FromStr;

/// A shell command, parsed case-insensitively
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Mine,
    Append,
    Remove,
    Check,
    Users,
    Balance,
    Transactions,
    Blocks,
    Json,
    Help,
    Quit,
}

impl Command {
    pub const ALL: [Command; 11] = [
        Command::Mine,
        Command::Append,
        Command::Remove,
        Command::Check,
        Command::Users,
        Command::Balance,
        Command::Transactions,
        Command::Blocks,
        Command::Json,
        Command::Help,
        Command::Quit,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Command::Mine => "mine",
            Command::Append => "append",
            Command::Remove => "remove",
            Command::Check => "check",
            Command::Users => "users",
            Command::Balance => "balance",
            Command::Transactions => "transactions",
            Command::Blocks => "blocks",
            Command::Json => "json",
            Command::Help => "help",
            Command::Quit => "quit",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Command::Mine => "discovers the nonce for a given transaction",
            Command::Append => "appends a new block onto the end of the chain",
            Command::Remove => "removes the last block from the end of the chain",
            Command::Check => "checks that the block chain is valid",
            Command::Users => "prints a list of users",
            Command::Balance => "finds a user's balance",
            Command::Transactions => "prints out the chain of transactions",
            Command::Blocks => "prints out the chain of blocks (for debugging only)",
            Command::Json => "prints the chain of blocks as JSON",
            Command::Help => "prints this list of commands",
            Command::Quit => "quits the program",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for a line that names no command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand(pub String);

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();

        Command::ALL
            .into_iter()
            .find(|command| command.name() == wanted)
            .ok_or_else(|| UnknownCommand(s.to_string()))
    }
}
