//! The `orbis` binary.

use clap::Parser;
use orbis_app::PlatformDirs;
use orbis_config::{CliArgs, Config};

fn main() {
    let args = CliArgs::parse();

    let dirs = match PlatformDirs::resolve() {
        Ok(dirs) => match args.config.clone() {
            Some(config_dir) => dirs.with_config_dir(config_dir),
            None => dirs,
        },
        Err(e) => {
            eprintln!("Failed to resolve platform directories: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = dirs.create_dirs() {
        eprintln!("Failed to create platform directories: {e}");
        std::process::exit(1);
    }

    let mut config = match Config::load_or_create(&dirs.config_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };
    config.apply_cli_overrides(&args);

    orbis_log::init_logging(
        Some(&dirs.log_dir),
        cfg!(debug_assertions),
        Some(&config),
    );
    tracing::info!(
        "Orbis starting (config: {}, texture: {})",
        dirs.config_dir.display(),
        config.scene.texture_path.display()
    );

    if let Err(e) = orbis_app::run(config, Some(dirs.config_dir)) {
        tracing::error!("Orbis stopped: {e}");
        std::process::exit(1);
    }
}
