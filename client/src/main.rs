use anyhow::Context;
use clap::Parser;
use config::{Config, FileConfig};
use libgame::Board;
use options::{Mode, Options};
use simple_logger::SimpleLogger;

mod batch;
mod cli;
mod config;
mod options;

fn main() -> anyhow::Result<()> {
    let options = Options::parse();

    SimpleLogger::new()
        .with_level(options.log_level())
        .init()
        .context("Couldn't set up logging")?;

    let file_config = match &options.config_path {
        Some(config_path) => FileConfig::load(config_path)?,
        None => FileConfig::default(),
    };
    let config = Config::resolve(&options, file_config);
    log::debug!("Resolved config: {config:?}");

    let mut board = Board::new(config.width, config.rule).context("Invalid board configuration")?;
    log::info!("Board of {} cells, rule {}", board.len(), board.rule());

    if config.random {
        let seed = board.set_random_board(config.seed);
        log::info!("Random start with seed {seed}");
    }

    match config.mode {
        Mode::Batch => batch::run_batch(&mut board, &config).print(),
        Mode::Interactive => cli::run_cli(&mut board, config.parallel)?,
    }

    Ok(())
}
