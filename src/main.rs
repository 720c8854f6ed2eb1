use anyhow::{Context, Result};
use log::info;

use std::io;

mod blockchain;
mod config;
mod shell;

use blockchain::{Blockchain, LeadingZeroBytes};
use config::Config;
use shell::Shell;

fn main() -> Result<()> {
    let config = Config::load()?;

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(config.log_level.as_str()));

    info!("Mining genesis block at difficulty {}", config.difficulty);
    let chain = Blockchain::new(LeadingZeroBytes(config.difficulty))
        .context("Failed to create the genesis block")?;

    let stdin = io::stdin();
    let mut shell = Shell::new(chain, stdin.lock(), io::stdout());
    shell.run()?;

    info!("Session ended with {} blocks", shell.chain().len());
    Ok(())
}
