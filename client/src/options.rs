use std::{path::PathBuf, str::FromStr};

use clap::{ArgAction, ArgGroup, Parser};
use libgame::Rule;
use log::LevelFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Batch,
    Interactive,
}

#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(name = "conways")]
#[command(about = "Conway's Game of Life, and other Life-like rules, on a bounded square grid")]
#[command(group(ArgGroup::new("mode").args(["batch", "interactive"])))]
pub struct Options {
    /// Width (and height) of the grid [default: 50]
    #[arg(short, long)]
    pub width: Option<usize>,

    /// Number of generations to run in batch mode [default: 0]
    #[arg(short = 'n')]
    pub generations: Option<usize>,

    /// Start with every cell set to a random state
    #[arg(short, long)]
    pub random: bool,

    /// Seed for the random start (implies --random)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Rule in B/S notation or a preset name [default: B3/S23]
    #[arg(long, value_parser = Rule::from_str)]
    pub rule: Option<Rule>,

    /// Batch mode: run the generations and exit
    #[arg(short = 'c')]
    pub batch: bool,

    /// Interactive mode: read commands from stdin
    #[arg(short = 'i')]
    pub interactive: bool,

    /// Report progress during batch runs
    #[arg(short = 'l', long = "loading")]
    pub progress: bool,

    /// Step generations on all cores
    #[arg(short, long)]
    pub parallel: bool,

    /// JSON config file, command line flags take precedence
    #[arg(long = "config")]
    pub config_path: Option<PathBuf>,

    /// More logging, repeat for more (-vvv)
    #[arg(short, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Options {
    pub fn mode(&self) -> Option<Mode> {
        if self.batch {
            Some(Mode::Batch)
        } else if self.interactive {
            Some(Mode::Interactive)
        } else {
            None
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
