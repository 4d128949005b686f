//! Self-play CLI.
//!
//! Plays games between computer-controlled powers and prints one JSON game
//! record per line.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Options:
//!   --games N        Number of games, played in parallel (default: 1)
//!   --max-year Y     Last year played (default: 1910)
//!   --seed N         Seed of the first game (default: 1)
//!   --random P,Q     Powers playing random legal orders, e.g. england,turkey
//!   --config FILE    AI configuration as JSON
//!   --sequential     Score candidates on one thread
//!
//! Set RUST_LOG=info for per-game results, debug for per-turn detail.

use std::env;
use std::io::{self, BufWriter, Write};
use std::process;
use std::str::FromStr;
use std::time::Instant;

use log::info;

use concordat::board::Power;
use concordat::search::AiConfig;
use concordat::selfplay::{self, SelfPlayConfig};

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    match args.get(i) {
        Some(v) => v.as_str(),
        None => fail(&format!("{flag} needs a value")),
    }
}

fn number<T: FromStr>(args: &[String], i: usize, flag: &str) -> T {
    let raw = value(args, i, flag);
    raw.parse()
        .unwrap_or_else(|_| fail(&format!("invalid {flag} value '{raw}'")))
}

fn fail(msg: &str) -> ! {
    eprintln!("error: {msg}");
    print_usage();
    process::exit(1);
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut config = SelfPlayConfig::default();
    let mut games = 1usize;
    let mut sequential = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => {
                i += 1;
                games = number(&args, i, "--games");
            }
            "--max-year" => {
                i += 1;
                config.max_year = number(&args, i, "--max-year");
            }
            "--seed" => {
                i += 1;
                config.seed = number(&args, i, "--seed");
            }
            "--random" => {
                i += 1;
                for name in value(&args, i, "--random").split(',') {
                    match Power::from_name(name.trim()) {
                        Some(p) => config.random_powers.push(p),
                        None => fail(&format!("unknown power '{name}'")),
                    }
                }
            }
            "--config" => {
                i += 1;
                let path = value(&args, i, "--config");
                config.ai = AiConfig::load(path).unwrap_or_else(|e| fail(&format!("{path}: {e}")));
            }
            "--sequential" => sequential = true,
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => fail(&format!("unknown argument '{other}'")),
        }
        i += 1;
    }
    if sequential {
        config.ai.parallel = false;
    }

    info!(
        "{games} game(s) from seed {}, up to {}, random: {:?}",
        config.seed, config.max_year, config.random_powers
    );
    let start = Instant::now();
    let records = selfplay::play_games(&config, games);
    info!("finished in {:.1}s", start.elapsed().as_secs_f64());

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for record in &records {
        let written = serde_json::to_writer(&mut out, record)
            .map_err(io::Error::from)
            .and_then(|()| writeln!(out));
        if let Err(e) = written {
            eprintln!("error: cannot write record: {e}");
            process::exit(1);
        }
    }
    if let Err(e) = out.flush() {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!("Usage: selfplay [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N        Number of games, played in parallel (default: 1)");
    eprintln!("  --max-year Y     Last year played (default: 1910)");
    eprintln!("  --seed N         Seed of the first game (default: 1)");
    eprintln!("  --random P,Q     Powers playing random legal orders");
    eprintln!("  --config FILE    AI configuration as JSON");
    eprintln!("  --sequential     Score candidates on one thread");
}
