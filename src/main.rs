use std::fmt::Display;

use anyhow::{ensure, Context, Result};
use console::{style, Term};
use gridworld_solver::config::Config;
use gridworld_solver::{Puzzle, Search, Snapshot, Step, Trail};
use indicatif::{ProgressBar, ProgressStyle};

const RULE: &str = "-----------------------------------";

fn fmt_list<T: Display>(items: impl IntoIterator<Item = T>) -> String {
    let items = items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>();
    format!("[{}]", items.join(", "))
}

fn trace(search: &Search<'_>, step: &Step) {
    let current = match step {
        Step::Expanded { current, .. } | Step::Reached(current) => *current,
        Step::Exhausted => return,
    };
    let snapshot = Snapshot {
        grid: search.grid(),
        current,
    };
    println!("{RULE}\nWorld:\n{snapshot}");
    let Step::Expanded { options, .. } = step else {
        println!("Found {} from {}!", search.goal(), search.start());
        return;
    };
    println!(
        "At {current}; movement options: {}. Remaining queue: {}",
        fmt_list(options),
        // The queue as it stood before this expansion appended the options.
        fmt_list(search.frontier().iter().take(search.frontier().len() - options.len())),
    );
    let parents = search
        .parents()
        .iter()
        .map(|(pos, parent)| format!("{pos}: {parent}"))
        .collect::<Vec<_>>();
    println!("Parents map: {{{}}}", parents.join(", "));
    if options.is_empty() {
        println!("Nowhere new to move from here. Continuing with the queue of locations to explore...");
    }
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let name = args
        .next()
        .context("Missing puzzle file argument (a file name inside the puzzles directory)")?;
    ensure!(args.next().is_none(), "Expecting a single puzzle file argument");

    let config = Config::from_env().context("Invalid configuration")?;
    let puzzle = Puzzle::load(&config.puzzles_dir, &name)?;

    let term = Term::stderr();
    term.write_line(&format!(
        "Loaded {name}: {}x{} grid, start {}, goal {}",
        puzzle.grid.height(),
        puzzle.grid.width(),
        puzzle.start,
        puzzle.goal,
    ))?;

    let pb = if config.quiet {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::with_template("{spinner} {pos} expanded, at {msg}")?);
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut search = Search::new(&puzzle.grid, puzzle.start, puzzle.goal)?;
    let on_step = |search: &Search<'_>, step: &Step| {
        if !config.quiet {
            trace(search, step);
        }
        if let Step::Expanded { current, .. } = step {
            pb.set_message(current.to_string());
            pb.inc(1);
        }
    };
    let path = match config.max_steps {
        Some(max_steps) => search.run_with_budget(max_steps, on_step)?,
        None => search.run(on_step),
    };
    pb.finish_and_clear();

    match path {
        Some(path) => {
            println!(
                "{} {} steps: {path}",
                style("Found!").green().bold(),
                path.steps(),
            );
            println!(
                "{}",
                Trail {
                    grid: &puzzle.grid,
                    path: &path,
                }
            );
        }
        None => {
            if !config.quiet {
                println!("Nothing remaining to visit; not found.");
            }
            println!("{}", style("Not found").red().bold());
        }
    }
    Ok(())
}
