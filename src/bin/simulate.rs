//! Runner balance simulator CLI.
//!
//! Plays seeded headless runs with the autopilot and reports how far each
//! difficulty gets.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                      # 100 runs per difficulty
//!   cargo run --bin simulate -- -n 500 -d hard    # 500 Hard runs
//!   cargo run --bin simulate -- --seed 42         # Reproducible run

use hopper::runner::{Difficulty, Features};
use hopper::simulator::{run_simulation, SimConfig};
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();
    let (config, write_json) = parse_args(&args);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              HOPPER BALANCE SIMULATOR                         ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {} per difficulty", config.num_runs);
    println!(
        "  Difficulties:   {}",
        config
            .difficulties
            .iter()
            .map(|d| d.name())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("  Max Frames:     {}", config.max_frames_per_run);
    println!("  Features:       {:?}", config.features);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);

    println!("{}", report.to_text());

    if write_json {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, report.to_json()) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => eprintln!("Failed to write JSON report: {}", e),
        }
    }
}

fn parse_args(args: &[String]) -> (SimConfig, bool) {
    let mut config = SimConfig::default();
    let mut write_json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(100);
                    i += 1;
                }
            }
            "-d" | "--difficulty" => {
                if i + 1 < args.len() {
                    if let Some(d) = Difficulty::from_key(&args[i + 1]) {
                        config.difficulties = vec![d];
                    }
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-f" | "--frames" => {
                if i + 1 < args.len() {
                    if let Ok(frames) = args[i + 1].parse() {
                        config.max_frames_per_run = frames;
                    }
                    i += 1;
                }
            }
            "--classic" => {
                config.features = Features::classic();
            }
            "--no-carrots" => {
                config.features.collectibles = false;
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "--json" => {
                write_json = true;
            }
            "--quick" => {
                config = SimConfig {
                    seed: config.seed,
                    ..SimConfig::quick()
                };
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    (config, write_json)
}

fn print_help() {
    println!("Hopper Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>          Runs per difficulty (default: 100)");
    println!("    -d, --difficulty <D>    Only simulate easy, normal or hard");
    println!("    -s, --seed <S>          Random seed for reproducibility");
    println!("    -f, --frames <F>        Max frames per run (default: 10 minutes)");
    println!("    --classic               Classic rules (no lives, scroll, carrots)");
    println!("    --no-carrots            Disable life pickups");
    println!("    -v, --verbose           Print every run");
    println!("    --json                  Save JSON report");
    println!("    --quick                 Quick check (20 short runs)");
    println!("    -h, --help              Show this help");
}
