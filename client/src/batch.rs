use std::time::{Duration, Instant};

use colored::Colorize;
use libgame::Board;

use crate::config::Config;

#[derive(Debug, Clone, Copy)]
pub struct BatchReport {
    pub generations: usize,
    pub elapsed: Duration,
    pub alive: usize,
}

impl BatchReport {
    pub fn millis_per_generation(&self) -> Option<f64> {
        (self.generations > 0)
            .then(|| self.elapsed.as_secs_f64() * 1000.0 / self.generations as f64)
    }

    pub fn print(&self) {
        println!(
            "{} {} generation/s in {:.2} ms",
            "Finished".green(),
            self.generations,
            self.elapsed.as_secs_f64() * 1000.0
        );

        if let Some(per_generation) = self.millis_per_generation() {
            println!("{:.4} ms/generation", per_generation);
        }

        println!("{} cells alive", self.alive);
    }
}

pub fn run_batch(board: &mut Board, config: &Config) -> BatchReport {
    let generations = config.generations;
    log::info!("Starting {generations} generation/s.");

    let mut progress = config.progress.then(|| ProgressReporter::new(generations));
    let observer = |generation: usize| {
        if let Some(progress) = progress.as_mut() {
            progress.update(generation);
        }
    };

    let start = Instant::now();
    if config.parallel {
        board.par_run_for_n(generations, observer);
    } else {
        board.run_for_n(generations, observer);
    }
    let elapsed = start.elapsed();

    log::info!("Finished {generations} generation/s.");

    BatchReport {
        generations,
        elapsed,
        alive: board.alive_count(),
    }
}

/// Prints a progress line at most once a second, and always for the last generation.
struct ProgressReporter {
    total: usize,
    last_instant: Instant,
    last_generation: usize,
}

impl ProgressReporter {
    fn new(total: usize) -> Self {
        Self {
            total,
            last_instant: Instant::now(),
            last_generation: 0,
        }
    }

    fn update(&mut self, generation: usize) {
        let current_instant = Instant::now();
        let passed_time = current_instant.duration_since(self.last_instant);

        if generation != self.total && passed_time.as_millis() < 1000 {
            return;
        }

        let generations_per_second =
            (generation - self.last_generation) as f32 / passed_time.as_secs_f32().max(f32::EPSILON);
        let percent = generation as f32 * 100.0 / self.total as f32;

        println!(
            "{} {generation:7}/{} {} | {:4.2} gen/s",
            "gen".bright_blue(),
            self.total,
            format!("{percent:5.1}%").green(),
            generations_per_second,
        );

        self.last_instant = current_instant;
        self.last_generation = generation;
    }
}
