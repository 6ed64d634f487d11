// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use scalekey::{
    ConfigFile, EngineConfig, GenerationOptions, Instrument, PitchClass, ScaleKeyEngine, ScaleType,
};

fn print_usage() {
    println!("scalekey - Scale and key explorer");
    println!();
    println!("Usage: scalekey [--config <FILE>] <COMMAND>");
    println!();
    println!("Commands:");
    println!("  --scale <KEY> <SCALE> [--instrument <I>] [--count <N>] [--octave <O>]");
    println!("                              Generate a scale and print it as JSON");
    println!("  --transpose <FROM> <TO> <NOTE>...");
    println!("                              Transpose note strings between keys");
    println!("  --chords <KEY> <SCALE>      Print triad suggestions");
    println!("  --relative <KEY> <SCALE>    Print the relative major or minor");
    println!("  --list-scales               List scale types by category");
    println!("  --help                      Show this help message");
    println!();
    println!("Options:");
    println!("  --config <FILE>             Load engine settings from YAML or TOML");
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

/// Value following a flag, if present
fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}

fn require<'a>(args: &'a [String], index: usize, what: &str) -> Result<&'a str> {
    args.get(index)
        .map(|s| s.as_str())
        .ok_or_else(|| anyhow!("Missing {}; run with --help for usage", what))
}

fn generate(engine: &mut ScaleKeyEngine, args: &[String]) -> Result<()> {
    let key = require(args, 1, "key")?;
    let scale_type = require(args, 2, "scale type")?;

    let mut options = GenerationOptions::new();
    if let Some(name) = flag_value(args, "--instrument") {
        let instrument: Instrument = name.parse().map_err(|e: String| anyhow!(e))?;
        options = options.with_instrument(instrument);
    }
    if let Some(count) = flag_value(args, "--count") {
        let count: usize = count
            .parse()
            .map_err(|_| anyhow!("Invalid note count: {}", count))?;
        options = options.with_note_count(count);
    }
    if let Some(octave) = flag_value(args, "--octave") {
        let octave: i32 = octave
            .parse()
            .map_err(|_| anyhow!("Invalid octave: {}", octave))?;
        options = options.with_octave(octave);
    }

    let scale = engine.generate_scale(key, scale_type, options)?;
    info!(key, scale_type, notes = scale.notes.len(), "generated scale");
    print_json(&*scale)
}

fn list_scales(engine: &ScaleKeyEngine) {
    let mut by_category: Vec<(String, Vec<ScaleType>)> = Vec::new();
    for scale_type in engine.all_scale_types() {
        let category = scale_type.definition().category.to_string();
        match by_category.iter_mut().find(|(c, _)| *c == category) {
            Some((_, types)) => types.push(scale_type),
            None => by_category.push((category, vec![scale_type])),
        }
    }

    for (category, types) in by_category {
        println!("{}:", category);
        for scale_type in types {
            println!("  {:<18} {}", scale_type.key(), scale_type.definition().name);
        }
    }
}

fn main() -> Result<()> {
    let mut args: Vec<String> = env::args().skip(1).collect();

    let config = match args.iter().position(|a| a == "--config") {
        Some(i) => {
            let path = args
                .get(i + 1)
                .cloned()
                .ok_or_else(|| anyhow!("--config requires a file path"))?;
            args.drain(i..=i + 1);
            ConfigFile::load(&path)?.engine
        }
        None => EngineConfig::default(),
    };

    init_logging(&config.log_level);

    if args.is_empty() {
        println!("scalekey - Scale and key explorer");
        println!("Run with --help for usage information");
        return Ok(());
    }

    let mut engine = ScaleKeyEngine::new(config)?;

    match args[0].as_str() {
        "--scale" => generate(&mut engine, &args)?,
        "--transpose" => {
            let from = require(&args, 1, "source key")?;
            let to = require(&args, 2, "target key")?;
            let notes = &args[3.min(args.len())..];
            if notes.is_empty() {
                eprintln!("Error: --transpose requires at least one note");
                std::process::exit(1);
            }
            let transposed = engine.transpose_key(from, to, notes)?;
            println!("{}", transposed.join(" "));
        }
        "--chords" => {
            let key = require(&args, 1, "key")?;
            let scale_type = require(&args, 2, "scale type")?;
            let chords = engine.chord_suggestions(key, scale_type)?;
            print_json(&chords)?;
        }
        "--relative" => {
            let key: PitchClass = require(&args, 1, "key")?.parse()?;
            let scale_type: ScaleType = require(&args, 2, "scale type")?.parse()?;
            print_json(&engine.relative_key(key, scale_type))?;
        }
        "--list-scales" => list_scales(&engine),
        "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown option: {}", args[0]);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}
