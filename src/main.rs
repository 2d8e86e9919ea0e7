use anyhow::Result;
use clap::Parser;
use eventboard::app::{self, App};
use eventboard::cli::Cli;
use eventboard::events_download::fetcher_for;
use eventboard::loader::DataLoader;
use eventboard::logging;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_file, cli.log_level)?;

    let location = cli.source_location()?;
    let fetcher = fetcher_for(&location)?;
    info!("eventboard starting, source: {}", location);

    let mut app = App::with_preferences(cli.sort_key(), cli.theme);
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();

    // The one and only fetch; its result arrives in the UI loop.
    app.begin_loading();
    DataLoader::new(fetcher, location).spawn(tx);

    app::start_ui(app, rx)
}
