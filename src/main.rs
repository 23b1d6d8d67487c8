//! Command line frontend: reads the Overpass JSON of a rail line, stitches
//! its ways into continuous paths and writes them out as `GeoJSON`.

mod args;

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use args::{Args, Settings};
use railstitch_core::create_graph_model;

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match args.settings().map_err(Into::into).and_then(|s| run(&s)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let reconstruction = create_graph_model(&settings.reconstruction)?;
    let graph = &reconstruction.graph;

    let output = if settings.pretty {
        serde_json::to_string_pretty(&graph.to_geojson()?)?
    } else {
        graph.to_geojson_string()?
    };

    match &settings.output {
        Some(path) => {
            std::fs::write(path, output)?;
            info!(
                "Wrote {} ways and {} stops to {}",
                graph.way_count(),
                graph.stops().len(),
                path.display()
            );
        }
        None => println!("{output}"),
    }
    Ok(())
}

/// Logs go to stderr, `RUST_LOG` overrides the verbosity flags.
/// Records from the `log` facade used by the core are captured as well.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
