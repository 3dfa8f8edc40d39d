//! Entry point for the ru_stdev application.
//! Handles CLI parsing, input loading, and prints the computed standard deviation.

use clap::Parser;
use ru_stdev::cli::{run, Args};
use serde_json::Value;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match run(&args)? {
        Value::Null => println!("∅ No value: the input is empty"),
        Value::Number(n) => println!("📊 Standard deviation: {n}"),
        Value::String(s) => println!("📊 Standard deviation: {s}"),
        result => {
            println!("📊 Standard deviations:");
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
