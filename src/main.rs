use std::fs::OpenOptions;

use clap::Parser;
use coin_dash::app::App;
use coin_dash::config::Settings;
use color_eyre::Result;
use env_logger::{Env, Target};

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let settings = Settings::parse();

    // The terminal is taken by the dashboard, so logs go to a file.
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&settings.log_file)?;
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(log_file)))
        .init();

    let app = App::new(settings);
    app.run().await
}
