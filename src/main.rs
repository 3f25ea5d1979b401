use clap::Parser;
use log::{debug, warn};
use snafu::ErrorCompat;
use std::io;

use crate::args::Args;

mod args;
mod menu;

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
    debug!("args: {:?}", args);

    let stdin = io::stdin();
    let res = menu::run_session(&args, stdin.lock(), io::stdout());
    if let Err(e) = res {
        warn!("Error occured {:?}", e);
        eprintln!("An error occured {}", e);
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            debug!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}
