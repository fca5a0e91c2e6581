//! gpx2geojson converts the supplied GPX file to GeoJSON and writes it to
//! stdout. The GPX data can be given as a file or piped in via stdin.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use gpx2geojson::OutputOptions;
use gpx2geojson_cli::{init_logging, input::read_input};

const NAME: &str = "gpx2geojson";

#[derive(Parser, Debug)]
#[command(name = NAME, version, about = "Convert a GPX file into GeoJSON")]
struct Args {
    /// Prettify the generated GeoJSON
    #[arg(short, long)]
    format: bool,

    /// GPX file to convert; read from stdin when omitted
    file: Option<PathBuf>,
}

fn main() -> ExitCode {
    init_logging("warn");
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{NAME}: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let input = read_input(args.file.as_deref())?;
    let gpx = std::str::from_utf8(&input).context("input is not valid UTF-8")?;

    let opts = OutputOptions {
        pretty: args.format,
    };
    let mut json = gpx2geojson::convert(gpx, &opts).context("unable to convert GPX")?;
    if opts.pretty {
        json.push('\n');
    }

    let mut stdout = io::stdout().lock();
    stdout.write_all(json.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
