//! sim-runner: headless runner for the LCG demand simulation.
//!
//! Usage:
//!   sim-runner --seed 35 --multiplier 13 --increment 7 --modulus 100 --days 10
//!   sim-runner --config demand.json --json
//!   sim-runner --demand-count 8 --strict
//!
//! Flags override values loaded from --config.
//! --demand-count replaces the distribution with the default one of that size.
//! --strict enforces the interactive front end's input bounds.

use anyhow::Result;
use demand_core::{InputLimits, SimulationConfig, SimulationReport};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let json = args.iter().any(|a| a == "--json");
    let strict = args.iter().any(|a| a == "--strict");

    let mut config = match find_arg(&args, "--config") {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(count) = parse_opt(&args, "--demand-count") {
        config = config.with_demand_count(count);
    }
    config.lcg.seed = parse_arg(&args, "--seed", config.lcg.seed);
    config.lcg.multiplier = parse_arg(&args, "--multiplier", config.lcg.multiplier);
    config.lcg.increment = parse_arg(&args, "--increment", config.lcg.increment);
    config.lcg.modulus = parse_arg(&args, "--modulus", config.lcg.modulus);
    config.days = parse_arg(&args, "--days", config.days);

    if strict {
        config.validate_limits(&InputLimits::default())?;
    }

    let report = SimulationReport::build(&config)?;

    if json {
        println!("{}", report.to_json_pretty()?);
    } else {
        print_summary(&report);
    }
    Ok(())
}

fn print_summary(report: &SimulationReport) {
    let p = &report.params;
    println!("Monte Carlo demand simulation (LCG)");
    println!("  seed:       {}", p.seed);
    println!("  multiplier: {}", p.multiplier);
    println!("  increment:  {}", p.increment);
    println!("  modulus:    {}", p.modulus);
    println!("  days:       {}", report.statistics.days);
    println!();

    if report.normalization.was_rescaled() {
        println!("  (probabilities were normalized to sum to 1)");
    }
    println!("=== CUMULATIVE PROBABILITY TABLE ===");
    println!("  {:>10} {:>12} {:>12}", "Demand", "Probability", "Cumulative");
    for row in &report.distribution {
        println!(
            "  {:>10} {:>12.4} {:>12.4}",
            row.demand, row.probability, row.cumulative
        );
    }

    println!();
    println!("=== SIMULATION RESULTS ===");
    println!("  {:>5} {:>10} {:>8} {:>10}", "Day", "X (LCG)", "U = X/m", "Demand");
    for d in report.run.days() {
        println!(
            "  {:>5} {:>10} {:>8.4} {:>10}",
            d.day,
            d.raw_value,
            d.uniform_rounded(),
            d.demand
        );
    }

    println!();
    let stats = &report.statistics;
    if let Some(avg_6) = stats.average_first_six {
        println!("  Average demand for first 6 days: {avg_6:.2}");
    }
    println!(
        "  Average demand for first {} days: {:.2}",
        stats.days, stats.average_all
    );
    if let Some(day5) = stats.day_five_demand {
        println!("  Demand on 5th day: {day5}");
    }
}

fn find_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_opt<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    let raw = find_arg(args, flag)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("ignoring unparseable {flag} value {raw:?}");
            None
        }
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    parse_opt(args, flag).unwrap_or(default)
}
