use anyhow::{Context, Result};
use log::info;

use std::io::{BufRead, Write};

use super::commands::Command;
use super::prompt::{read_int, read_line, read_long};
use crate::blockchain::{Block, Blockchain, Transaction};

/// Prompts for the three fields of a transaction
fn read_transaction<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Transaction> {
    let source = read_line(input, output, "Source (return for deposit): ")?;
    let target = read_line(input, output, "Target: ")?;
    let amount = read_int(input, output, "Amount: ")?;

    Ok(Transaction::new(source, target, amount))
}

/// Prints the list of commands
pub fn help<W: Write>(output: &mut W) -> Result<()> {
    writeln!(output, "Valid commands:")?;
    for command in Command::ALL {
        writeln!(output, "{}: {}", command, command.description())?;
    }
    Ok(())
}

/// Mines a block for a transaction and reports its nonce, leaving the chain alone
pub fn mine<R: BufRead, W: Write>(chain: &Blockchain, input: &mut R, output: &mut W) -> Result<()> {
    let transaction = read_transaction(input, output)?;

    match chain.mine(transaction) {
        Ok(block) => {
            info!("Mined nonce {} for block {}", block.nonce(), block.index());
            writeln!(output, "Nonce: {}", block.nonce())?;
        }
        Err(err) => writeln!(output, "Error mining block: {}", err)?,
    }
    Ok(())
}

/// Builds a block from a transaction and a known nonce and appends it
pub fn append<R: BufRead, W: Write>(chain: &mut Blockchain, input: &mut R, output: &mut W) -> Result<()> {
    let transaction = read_transaction(input, output)?;
    let nonce = read_long(input, output, "Nonce: ")?;

    let block = Block::with_nonce(chain.next_index(), transaction, chain.last_hash().clone(), nonce);

    match chain.append(block) {
        Ok(()) => writeln!(output, "Block appended successfully.")?,
        Err(err) => writeln!(output, "Error appending block: {}", err)?,
    }
    Ok(())
}

pub fn remove<W: Write>(chain: &mut Blockchain, output: &mut W) -> Result<()> {
    if chain.remove_last() {
        writeln!(output, "Last block removed successfully.")?;
    } else {
        writeln!(output, "Cannot remove the genesis block.")?;
    }
    Ok(())
}

pub fn check<W: Write>(chain: &Blockchain, output: &mut W) -> Result<()> {
    match chain.validate() {
        Ok(()) => writeln!(output, "The blockchain is valid.")?,
        Err(err) => writeln!(output, "Blockchain is invalid: {}", err)?,
    }
    Ok(())
}

pub fn users<W: Write>(chain: &Blockchain, output: &mut W) -> Result<()> {
    writeln!(output, "Users:")?;
    for user in chain.users() {
        writeln!(output, "{}", user)?;
    }
    Ok(())
}

pub fn balance<R: BufRead, W: Write>(chain: &Blockchain, input: &mut R, output: &mut W) -> Result<()> {
    let user = read_line(input, output, "User: ")?;
    writeln!(output, "{}'s balance is {}", user, chain.balance_of(&user))?;
    Ok(())
}

pub fn transactions<W: Write>(chain: &Blockchain, output: &mut W) -> Result<()> {
    writeln!(output, "Transactions:")?;
    for transaction in chain {
        writeln!(output, "{}", transaction)?;
    }
    Ok(())
}

pub fn blocks<W: Write>(chain: &Blockchain, output: &mut W) -> Result<()> {
    writeln!(output, "Blocks:")?;
    for block in chain.blocks() {
        writeln!(output, "{}", block)?;
    }
    Ok(())
}

/// Prints every block as pretty JSON
pub fn json<W: Write>(chain: &Blockchain, output: &mut W) -> Result<()> {
    let blocks: Vec<&Block> = chain.blocks().collect();
    let rendered = serde_json::to_string_pretty(&blocks).context("Failed to serialize blocks")?;
    writeln!(output, "{}", rendered)?;
    Ok(())
}
