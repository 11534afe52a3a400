use anyhow::{Context, Result};
use log::info;
use std::io;
use synop::{console, ImgwClient, StationBrowser, TextTable};

fn main() -> Result<()> {
    // Set RUST_LOG=info (or debug) to see fetch and pipeline details
    env_logger::init();

    let client = ImgwClient::builder()
        .build()
        .context("Could not set up the IMGW client")?;
    info!("Using station list endpoint {}", client.url());

    let mut browser = StationBrowser::new(client, TextTable::new(io::stdout()));
    console::run(&mut browser, io::stdin().lock(), io::stdout())?;
    Ok(())
}
