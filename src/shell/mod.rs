// Shell module
//
// This module contains the line-oriented command shell that drives the
// blockchain: command parsing, prompting helpers and one handler per command.

pub mod commands;
pub mod handlers;
pub mod prompt;

use anyhow::Result;
use log::debug;

use std::io::{BufRead, Write};

use crate::blockchain::Blockchain;
use commands::{Command, UnknownCommand};

/// Interactive session over one blockchain
pub struct Shell<R, W> {
    chain: Blockchain,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(chain: Blockchain, input: R, output: W) -> Self {
        Shell { chain, input, output }
    }

    /// Runs commands until `quit` or end of input
    ///
    /// Rejected operations are reported and the session continues. Only I/O
    /// failures, or input ending in the middle of a prompt, end it early.
    pub fn run(&mut self) -> Result<()> {
        handlers::help(&mut self.output)?;

        loop {
            write!(self.output, "\nCommand: ")?;
            self.output.flush()?;

            let line = match prompt::next_line(&mut self.input)? {
                Some(line) => line,
                None => break,
            };

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(UnknownCommand(text)) => {
                    writeln!(self.output, "Invalid command: '{}'. Try again.", text)?;
                    continue;
                }
            };
            debug!("Running command {}", command);

            match command {
                Command::Mine => handlers::mine(&self.chain, &mut self.input, &mut self.output)?,
                Command::Append => handlers::append(&mut self.chain, &mut self.input, &mut self.output)?,
                Command::Remove => handlers::remove(&mut self.chain, &mut self.output)?,
                Command::Check => handlers::check(&self.chain, &mut self.output)?,
                Command::Users => handlers::users(&self.chain, &mut self.output)?,
                Command::Balance => handlers::balance(&self.chain, &mut self.input, &mut self.output)?,
                Command::Transactions => handlers::transactions(&self.chain, &mut self.output)?,
                Command::Blocks => handlers::blocks(&self.chain, &mut self.output)?,
                Command::Json => handlers::json(&self.chain, &mut self.output)?,
                Command::Help => handlers::help(&mut self.output)?,
                Command::Quit => break,
            }
        }

        writeln!(self.output, "\nGoodbye")?;
        self.output.flush()?;
        Ok(())
    }

    pub fn chain(&self) -> &Blockchain {
        &self.chain
    }

    /// Ends the session, handing back the chain and the output
    pub fn into_parts(self) -> (Blockchain, W) {
        (self.chain, self.output)
    }
}
