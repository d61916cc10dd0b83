use std::io::{self, BufRead, Write};

use anyhow::{Context, bail};
use libgame::{Board, Position};

const HELP: &str = "\
step [n]      advance n generations (default 1)
toggle <x> <y> flip one cell
random [seed] randomise the board
clear         kill every cell
resize <n>    replace the board with an empty n x n one
print         draw the board
count         number of alive cells
rule          the rule in use
exit          quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

pub fn run_cli(board: &mut Board, parallel: bool) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    run_commands(board, parallel, stdin.lock(), &mut stdout)
}

fn run_commands<R, W>(
    board: &mut Board,
    parallel: bool,
    input: R,
    out: &mut W,
) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
{
    for line_res in input.lines() {
        let line = line_res.context("Couldn't read command")?;
        let args = line.split_whitespace();

        match handle_cmd(board, parallel, args, out) {
            Ok(Flow::Continue) => writeln!(out, "OK")?,
            Ok(Flow::Exit) => break,
            Err(e) => writeln!(out, "! {e:#}")?,
        }
    }

    Ok(())
}

fn handle_cmd<'a, I, W>(
    board: &mut Board,
    parallel: bool,
    mut args: I,
    out: &mut W,
) -> anyhow::Result<Flow>
where
    I: Iterator<Item = &'a str>,
    W: Write,
{
    match args.next().context("No command")? {
        "step" => {
            let times = args.next().unwrap_or("1").parse::<usize>()?;

            if parallel {
                board.par_run_for_n(times, |_: usize| {});
            } else {
                board.run_for_n(times, |_: usize| {});
            }
            log::debug!("Stepped {times} generation/s, {} alive", board.alive_count());
        }

        "toggle" => {
            let x = args.next().context("missing x")?.parse::<usize>()?;
            let y = args.next().context("missing y")?.parse::<usize>()?;

            board.toggle_cell(Position { x, y })?;
        }

        "random" => {
            let seed = args.next().map(str::parse::<u64>).transpose()?;

            let seed = board.set_random_board(seed);
            writeln!(out, "seed {seed}")?;
        }

        "clear" => {
            board.reset();
        }

        "resize" => {
            let size = args.next().context("missing size")?.parse::<usize>()?;

            board.resize(size)?;
        }

        "print" => {
            write!(out, "{board}")?;
        }

        "count" => {
            writeln!(out, "{}", board.alive_count())?;
        }

        "rule" => {
            writeln!(out, "{}", board.rule())?;
        }

        "help" => {
            writeln!(out, "{HELP}")?;
        }

        "exit" | "quit" => {
            return Ok(Flow::Exit);
        }

        _ => bail!("Unknown command"),
    }

    Ok(Flow::Continue)
}
