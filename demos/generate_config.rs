//! Generate the default engine configuration file
//!
//! Creates a JSON config with all default parameters

use std::{env, path::Path, process};
use urine_colorscan::AnalysisConfig;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <output_config.json>", args[0]);
        eprintln!();
        eprintln!("Example:");
        eprintln!("  {} config/analysis.json", args[0]);
        process::exit(1);
    }

    let output_path = Path::new(&args[1]);

    // Create parent directory if needed
    if let Some(parent) = output_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            process::exit(1);
        }
    }

    let config = AnalysisConfig::default();

    match config.to_json_file(output_path) {
        Ok(_) => {
            let sampling = &config.sampling;
            eprintln!("Configuration saved to {}", output_path.display());
            eprintln!();
            eprintln!("Config summary:");
            eprintln!("  Qualitative region:  {}", sampling.selection.qualitative);
            eprintln!("  Quantitative region: {}", sampling.selection.quantitative);
            eprintln!("  Crop {}px, canonical {}px, centre {}px",
                     sampling.geometry.crop_size,
                     sampling.geometry.canonical_size,
                     sampling.geometry.canonical_roi_size);
            eprintln!("  Classifier profile: {:?}", config.classification.profile);
        }
        Err(e) => {
            eprintln!("Error saving config: {}", e);
            process::exit(1);
        }
    }
}
