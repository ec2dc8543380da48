//! Command-line interface for urine_colorscan
//!
//! Basic CLI tool for testing the analysis engine on a photo

use std::{env, path::Path, process};
use tracing::{error, info};
use urine_colorscan::{logger, AnalysisConfig, AnalysisEngine, AnalysisMode, AnalysisResult, ClassifierProfile};
use urine_colorscan::image_loader::ImageFormat;

fn main() {
    logger::init();

    let args: Vec<String> = env::args().collect();

    let mut mode_arg: Option<String> = None;
    let mut profile_arg: Option<String> = None;
    let mut config_arg: Option<String> = None;
    let mut image_path_arg = None;

    // Parse arguments
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--mode" | "--profile" | "--config" => {
                let Some(value) = args.get(i + 1) else {
                    eprintln!("Error: {} requires a value", args[i]);
                    process::exit(1);
                };
                match args[i].as_str() {
                    "--mode" => mode_arg = Some(value.clone()),
                    "--profile" => profile_arg = Some(value.clone()),
                    _ => config_arg = Some(value.clone()),
                }
                i += 1;
            }
            "--help" | "-h" => {
                print_help(&args[0]);
                process::exit(0);
            }
            arg if !arg.starts_with("--") => {
                if image_path_arg.is_none() {
                    image_path_arg = Some(arg.to_string());
                } else {
                    eprintln!("Error: Multiple image paths provided");
                    process::exit(1);
                }
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                eprintln!("Use --help for usage information");
                process::exit(1);
            }
        }
        i += 1;
    }

    let image_path_str = match image_path_arg {
        Some(path) => path,
        None => {
            print_help(&args[0]);
            process::exit(1);
        }
    };

    let image_path = Path::new(&image_path_str);

    if ImageFormat::from_extension(image_path).is_none() {
        eprintln!("Error: '{}' is not a PNG or JPEG file", image_path.display());
        process::exit(1);
    }

    let mut config = match config_arg {
        Some(path) => match AnalysisConfig::from_json_file(Path::new(&path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Error loading config file: {}", e);
                process::exit(1);
            }
        },
        None => AnalysisConfig::default(),
    };

    if let Some(profile) = profile_arg {
        config.classification.profile = match profile.as_str() {
            "five_band" => ClassifierProfile::FiveBand,
            "comparative" => ClassifierProfile::Comparative,
            other => {
                eprintln!("Unknown profile: {} (expected five_band or comparative)", other);
                process::exit(1);
            }
        };
    }

    let mode = AnalysisMode::from_selector(mode_arg.as_deref());
    info!(%mode, path = %image_path.display(), "analyzing sample");

    let engine = AnalysisEngine::new(config);
    match engine.analyze_file(image_path, mode) {
        Ok(result) => print_result(&result),
        Err(err) => {
            error!("Analysis failed: {}", err);
            eprintln!("{}", err.user_message());
            process::exit(1);
        }
    }
}

fn print_help(program_name: &str) {
    eprintln!("Usage: {} [OPTIONS] <image_path>", program_name);
    eprintln!();
    eprintln!("Analyze the color of a urine sample or test-strip photo.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --mode MODE        yellow, white, yellow_protein, white_protein,");
    eprintln!("                     yellow_nitrite or white_nitrite");
    eprintln!("  --profile PROFILE  five_band (default) or comparative");
    eprintln!("  --config FILE      JSON engine configuration");
    eprintln!("  --help, -h         Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} --mode white_nitrite strip.jpg", program_name);
    eprintln!("  {} --profile comparative --mode yellow sample.png", program_name);
}

fn print_result(result: &AnalysisResult) {
    // Print JSON to stdout for programmatic use
    match serde_json::to_string_pretty(result) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing result: {}", e),
    }

    // Print summary to stderr for human reading
    let (r, g, b) = result.display_rgb();
    eprintln!();
    eprintln!("Sample Analysis Summary:");
    eprintln!("  Color: {}", result.category.description());
    eprintln!("  Estimate: {}", result.estimate_label);
    eprintln!("  Mean RGB: ({:.2}, {:.2}, {:.2})  Hex: {}", r, g, b, result.hex);
}
