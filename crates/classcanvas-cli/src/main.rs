use std::{fmt::Write as _, process};

use clap::Parser;
use log::{LevelFilter, debug, info};

use classcanvas_cli::{Args, error_adapter::to_reportable};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level: LevelFilter = args.log_level.parse().unwrap_or_else(|_| {
        eprintln!("unknown log level `{}`, falling back to warn", args.log_level);
        LevelFilter::Warn
    });
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    debug!(args:?; "Parsed arguments");

    let Err(err) = classcanvas_cli::run(&args) else {
        info!("Done");
        return;
    };

    // Diagnostics go to stderr even when logging is off
    let mut report = String::new();
    if miette::GraphicalReportHandler::new()
        .render_report(&mut report, &to_reportable(&err))
        .is_err()
    {
        let _ = write!(report, "{err}");
    }
    eprintln!("{report}");
    process::exit(1);
}
