//! # CLI - bloom filter shell
//!
//! A REPL-style command-line interface over the scalable partitioned
//! Bloom filter command surface. Reads commands from stdin, executes them
//! against an in-process [`engine::Store`], and prints results to stdout.
//! Designed for both interactive use and scripted testing (pipe commands
//! via stdin).
//!
//! ## Commands
//!
//! ```text
//! BFADD key [ERROR e] [ELEMENTS v1 v2 ...]   Create/update a bloom filter
//! BFEXIST key value                          Test membership
//! BFCOUNT key                                Cardinality estimate
//! BFDEBUG STATUS key                         n:<numfilters> e:<error>
//! BFDEBUG FILTER key idx                     k:<k> s:<s> b:<b>
//! EXIT / QUIT                                Shut down
//! ```
//!
//! ## Configuration
//!
//! All settings are controlled via environment variables:
//!
//! ```text
//! BLOOM_DEFAULT_ERROR   Default error rate for keys created without ERROR (default: 0.003)
//! BLOOM_LOG             tracing filter directive (falls back to RUST_LOG, default: "info")
//! ```
//!
//! ## Example
//!
//! ```text
//! $ cargo run -p cli
//! bloom filter shell started (default_error=0.003)
//! > BFADD bloom ELEMENTS a b c
//! 3
//! > BFEXIST bloom a
//! 1
//! > EXIT
//! bye
//! ```
use std::io::{self, BufRead, Write};

use anyhow::Result;
use config::HostConfig;
use engine::{commands, Store};

fn main() -> Result<()> {
    let cfg = HostConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(cfg.log_filter.clone())
        .init();

    let mut store = Store::with_default_error(cfg.default_error);

    println!("bloom filter shell started (default_error={})", cfg.default_error);
    println!("Commands: BFADD key [ERROR e] [ELEMENTS v1 v2 ...] | BFEXIST key value");
    println!("          BFCOUNT key | BFDEBUG STATUS key | BFDEBUG FILTER key idx | EXIT");
    print!("> ");
    io::stdout().flush().ok();

    let stdin = io::stdin();

    for line in stdin.lock().lines() {
        let line = line?;
        let tokens: Vec<&str> = line.split_whitespace().collect();

        if let Some(&cmd) = tokens.first() {
            match cmd.to_uppercase().as_str() {
                "BFADD" => print_result(commands::bfadd(&mut store, &tokens[1..])),
                "BFEXIST" => match (tokens.get(1), tokens.get(2)) {
                    (Some(key), Some(value)) => {
                        print_result(commands::bfexist(&store, key, value));
                    }
                    _ => println!("ERR usage: BFEXIST key value"),
                },
                "BFCOUNT" => match tokens.get(1) {
                    Some(key) => print_result(commands::bfcount(&store, key)),
                    None => println!("ERR usage: BFCOUNT key"),
                },
                "BFDEBUG" => dispatch_bfdebug(&store, &tokens[1..]),
                "EXIT" | "QUIT" => {
                    println!("bye");
                    break;
                }
                other => {
                    println!("unknown command: {other}");
                }
            }
        }

        print!("> ");
        io::stdout().flush().ok();
    }

    Ok(())
}

fn dispatch_bfdebug(store: &Store, args: &[&str]) {
    match args.first().map(|s| s.to_uppercase()) {
        Some(sub) if sub == "STATUS" => match args.get(1) {
            Some(key) => print_result(commands::bfdebug_status(store, key)),
            None => println!("ERR usage: BFDEBUG STATUS key"),
        },
        Some(sub) if sub == "FILTER" => {
            match (args.get(1), args.get(2).and_then(|s| s.parse::<usize>().ok())) {
                (Some(key), Some(idx)) => print_result(commands::bfdebug_filter(store, key, idx)),
                _ => println!("ERR usage: BFDEBUG FILTER key idx"),
            }
        }
        _ => println!("ERR usage: BFDEBUG STATUS key | BFDEBUG FILTER key idx"),
    }
}

fn print_result(result: Result<engine::Reply, engine::CommandError>) {
    match result {
        Ok(reply) => println!("{reply}"),
        Err(e) => {
            tracing::warn!("command failed: {e}");
            println!("{e}");
        }
    }
}
