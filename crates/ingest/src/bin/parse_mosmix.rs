use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use csv::QuoteStyle;
use ingest::kml::{parse_kml, KmlStation};

#[derive(Parser, Debug)]
#[command(author, version, about = "Parse DWD MOSMIX KML files")]
struct Cli {
    /// Path to the MOSMIX KML file
    kml_file: PathBuf,

    /// Output format (text, csv, json)
    #[arg(short, long, default_value = "text")]
    output: String,

    /// Write CSV output to this file instead of stdout (CSV only)
    #[arg(short = 'f', long)]
    output_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error parsing KML file: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    if !cli.kml_file.exists() {
        anyhow::bail!("file does not exist: {}", cli.kml_file.display());
    }

    let content = std::fs::read_to_string(&cli.kml_file)
        .with_context(|| format!("failed to read {}", cli.kml_file.display()))?;
    let stations = parse_kml(&content)?;

    if stations.is_empty() {
        eprintln!("No stations found or error parsing the file.");
        return Ok(ExitCode::FAILURE);
    }

    let format = cli.output.to_lowercase();
    if let Some(warning) = ignored_output_file_warning(&format, cli.output_file.as_deref()) {
        eprintln!("Warning: {warning}");
    }

    match format.as_str() {
        "text" => print_text(&stations),
        "csv" => write_csv(&stations, cli.output_file.as_deref())?,
        "json" => println!("{}", serde_json::to_string_pretty(&stations)?),
        other => {
            eprintln!("Unknown output format: {other}");
            return Ok(ExitCode::FAILURE);
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// `--output-file` only applies to CSV output; flag the combination so a
/// caller does not assume the file was written.
fn ignored_output_file_warning(format: &str, output_file: Option<&Path>) -> Option<String> {
    match output_file {
        Some(path) if format != "csv" => Some(format!(
            "--output-file {} is ignored for {format} output",
            path.display()
        )),
        _ => None,
    }
}

fn print_text(stations: &[KmlStation]) {
    println!("Found {} stations:", stations.len());
    for station in stations {
        println!(
            "ID: {}, Name: {}, Lat: {}, Lon: {}, Elev: {}m",
            station.id, station.name, station.latitude, station.longitude, station.elevation
        );
    }
}

/// Fields are quoted unconditionally so downstream spreadsheet imports
/// never re-type station ids.
fn write_csv(stations: &[KmlStation], output_file: Option<&Path>) -> anyhow::Result<()> {
    let mut builder = csv::WriterBuilder::new();
    builder.quote_style(QuoteStyle::Always);

    match output_file {
        Some(path) => {
            let mut writer = builder
                .from_path(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            for station in stations {
                writer.serialize(station)?;
            }
            writer.flush()?;
        }
        None => {
            let mut writer = builder.from_writer(io::stdout());
            for station in stations {
                writer.serialize(station)?;
            }
            writer.flush()?;
        }
    }

    Ok(())
}
