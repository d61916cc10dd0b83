use std::{fs, path::Path};

use anyhow::Context;
use libgame::Rule;
use serde::{Deserialize, Serialize};

use crate::options::{Mode, Options};

/// Settings as they appear in a config file. Anything left out falls back to the command line or
/// the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub width: Option<usize>,
    pub generations: Option<usize>,
    pub random: Option<bool>,
    pub seed: Option<u64>,
    pub rule: Option<Rule>,
    pub progress: Option<bool>,
    pub parallel: Option<bool>,
}

impl FileConfig {
    pub fn load<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let config_serialized = fs::read(path).context("Couldn't read config")?;
        let config =
            serde_json::from_slice(&config_serialized).context("Couldn't deserialize config")?;
        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub width: usize,
    pub generations: usize,
    pub random: bool,
    pub seed: Option<u64>,
    pub rule: Rule,
    pub mode: Mode,
    pub progress: bool,
    pub parallel: bool,
}

impl Config {
    pub const DEFAULT_WIDTH: usize = 50;

    pub fn resolve(options: &Options, file: FileConfig) -> Self {
        let generations = options.generations.or(file.generations).unwrap_or(0);
        let seed = options.seed.or(file.seed);

        let mode = options.mode().unwrap_or(if generations > 0 {
            Mode::Batch
        } else {
            Mode::Interactive
        });

        Self {
            width: options.width.or(file.width).unwrap_or(Self::DEFAULT_WIDTH),
            generations,
            random: options.random || file.random.unwrap_or(false) || seed.is_some(),
            seed,
            rule: options.rule.or(file.rule).unwrap_or_default(),
            mode,
            progress: options.progress || file.progress.unwrap_or(false),
            parallel: options.parallel || file.parallel.unwrap_or(false),
        }
    }
}
