//! geojsonview displays GeoJSON data on a web map.
//!
//! It is a self-contained web server that takes GeoJSON from a file or stdin
//! and plots it with Leaflet over OpenStreetMap.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use gpx2geojson_cli::viewer::{self, ViewerState};
use gpx2geojson_cli::{init_logging, input::read_input};

#[derive(Parser, Debug)]
#[command(name = "geojsonview", version, about = "View GeoJSON files on the web")]
struct Args {
    /// Address for the local server
    #[arg(short, long, default_value = "localhost:8080")]
    addr: String,

    /// GeoJSON file to show; read from stdin when omitted
    file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging("info,tower_http=debug");
    let args = Args::parse();

    let input = read_input(args.file.as_deref())?;
    let geojson = String::from_utf8(input).context("input is not valid UTF-8")?;

    println!("View tracklog at http://{}/ (Ctrl-C to quit)", args.addr);
    viewer::serve(&args.addr, ViewerState::new(geojson)).await
}
