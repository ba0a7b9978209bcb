use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use rgb_quiz_core::{DEFAULT_TIME_LIMIT_SECS, QuizConfig, QuizEngine};

mod host;
mod render;

/// Play the RGB Quiz module in a terminal.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Seed for puzzle generation, random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Module number shown in log lines
    #[arg(long, default_value_t = 1)]
    module_id: u32,

    /// Seconds available once the first stage is shown
    #[arg(long, default_value_t = DEFAULT_TIME_LIMIT_SECS)]
    time_limit: u16,

    /// Print the generated puzzle as JSON and exit
    #[arg(long)]
    dump_puzzle: bool,

    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbosity.log_level_filter())
        .format_timestamp(None)
        .init();

    let seed = cli.seed.unwrap_or_else(seed_from_clock);
    log::debug!("Using seed {seed}");
    let config = QuizConfig::new(cli.module_id, cli.time_limit);
    let engine = QuizEngine::with_seed(config, seed);

    if cli.dump_puzzle {
        let json = serde_json::to_string_pretty(engine.puzzle())?;
        println!("{json}");
        return Ok(());
    }

    let mut host = host::Host::new(engine, seed);
    println!("{}", rgb_quiz_core::COMMAND_HELP);
    host.render();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read command")?;
        if host.handle(&line)?.is_break() {
            break;
        }
    }

    Ok(())
}

fn seed_from_clock() -> u64 {
    web_time::SystemTime::now()
        .duration_since(web_time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
