use chrono::Local;
use clap::Parser;
use tracing::{debug, error, info};

use joblog_monitor::cli::Cli;
use joblog_monitor::core::run;
use joblog_monitor::telemetry;

fn main() {
    let cli = Cli::parse();
    let now = Local::now().naive_local();

    if let Err(err) = telemetry::init(&cli.log_config(now)) {
        eprintln!("{err}");
        std::process::exit(1);
    }
    info!("Program started.");
    debug!("Provided arguments: {cli:?}");

    let paths = cli.run_paths(now);
    if let Err(err) = run(&paths, &cli.monitor_config()) {
        error!("{err}");
        std::process::exit(1);
    }

    info!("Program ended.");
}
