use std::path::PathBuf;
use std::process;

use clap::ArgMatches;
use log::{error, info, warn, Level, LevelFilter};

use clipship::api::ClipService;
use clipship::commands::{build_cli, ClipshipCommandFactory, CommandFactory};
use clipship::config::Settings;
use clipship::engine::CancelFlag;
use clipship::errors::ClipResult;
use clipship::source::{DirectoryLayerResolver, LayerResolver, NoLayers};
use clipship::utils::logger::Logger;

fn init_logging(matches: &ArgMatches) {
    let verbose = matches.get_flag("verbose");

    match matches.get_one::<String>("log-file") {
        Some(log_file) => {
            let level = if verbose { Level::Debug } else { Level::Info };
            if let Err(e) = Logger::init_global_logger(log_file, level) {
                eprintln!("Error setting up global logger: {}", e);
                process::exit(1);
            }
        },
        None => {
            let level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };
            Logger::init_env_logger(level);
        },
    }
}

fn load_settings(matches: &ArgMatches) -> ClipResult<Settings> {
    let mut settings = match matches.get_one::<String>("config") {
        Some(path) => Settings::from_file(path)?,
        None => {
            info!("No settings file given, using defaults");
            Settings::default()
        },
    };

    if let Some(dir) = matches.get_one::<String>("layers-dir") {
        settings.layers_directory = Some(PathBuf::from(dir));
    }
    Ok(settings)
}

fn build_service(settings: Settings) -> ClipResult<ClipService> {
    let resolver: Box<dyn LayerResolver> = match &settings.layers_directory {
        Some(dir) => {
            info!("Resolving layers under {}", dir.display());
            Box::new(DirectoryLayerResolver::new(dir.clone()))
        },
        None => Box::new(NoLayers),
    };
    ClipService::new(settings, resolver)
}

fn main() {
    let matches = build_cli().get_matches();
    init_logging(&matches);

    let service = match load_settings(&matches).and_then(build_service) {
        Ok(service) => service,
        Err(e) => {
            error!("Failed to start: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    // Ctrl+C stops a running extraction; the child tool is killed
    let cancel = CancelFlag::new();
    let trigger = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        eprintln!("Interrupted, stopping extraction...");
        trigger.cancel();
    }) {
        warn!("Failed to set signal handler: {}", e);
    }

    let factory = ClipshipCommandFactory::with_cancel(cancel);

    let command_result = factory.create_command(&matches, &service);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
