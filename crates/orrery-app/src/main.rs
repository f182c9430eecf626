//! The `orrery` binary.

use clap::Parser;
use orrery_app::{AppError, PlatformDirs, load_system, run_headless, run_with_config};
use orrery_config::{CliArgs, Config};

fn run(args: CliArgs) -> Result<(), AppError> {
    let mut dirs = PlatformDirs::resolve()?;
    if let Some(config_dir) = &args.config {
        dirs = dirs.with_config_dir(config_dir);
    }
    dirs.create_dirs()?;

    let mut config = Config::load_or_create(&dirs.config_dir)?;
    config.apply_cli_overrides(&args);

    orrery_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    tracing::info!(
        "Orrery starting: config {}, logs {}",
        dirs.config_dir.display(),
        dirs.log_dir.display()
    );

    let system = load_system(&config)?;

    match args.headless_ticks {
        Some(ticks) => {
            let json = run_headless(&config, system, ticks)?;
            println!("{json}");
            Ok(())
        }
        None => run_with_config(config, system),
    }
}

fn main() {
    let args = CliArgs::parse();
    if let Err(e) = run(args) {
        tracing::error!("{e}");
        eprintln!("orrery: {e}");
        std::process::exit(1);
    }
}
