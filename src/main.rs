// envkit: typed environment snapshots
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Check | Validate | Schema | Files | Random | Version
//! ```

use std::process::ExitCode;

use envkit::cli::global::GlobalOptions;
use envkit::cli::{self, Command};
use envkit::cmd::check::run_check_command;
use envkit::cmd::random::run_random_command;
use envkit::cmd::schema::{run_files_command, run_schema_command};
use envkit::cmd::validate::run_validate_command;
use envkit::config::{CONFIG_FILE, Config, ConfigLoader, ENV_PREFIX};
use envkit::error::Result;
use envkit::logging::init_logging;
use envkit::logging::{LogConfig, LogLevel};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let config = load_config(&cli.global);
    let log_config = build_log_config(&cli.global, config.as_ref().ok());
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, config)
}

fn build_log_config(global: &GlobalOptions, config: Option<&Config>) -> LogConfig {
    match config {
        Some(config) => LogConfig::builder()
            .with_console_level(config.log.level)
            .with_file_level(config.log.file_level)
            .maybe_with_log_file(config.log.file.clone())
            .build(),
        None => {
            let console_level = global
                .log_level
                .and_then(LogLevel::from_u8)
                .unwrap_or(LogLevel::INFO);

            let file_level = global
                .file_log_level
                .and_then(LogLevel::from_u8)
                .unwrap_or(console_level);

            LogConfig::builder()
                .with_console_level(console_level)
                .with_file_level(file_level)
                .maybe_with_log_file(global.log_file.clone())
                .build()
        }
    }
}

fn dispatch_command(cli: &cli::Cli, config: Result<Config>) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Files) => {
            let loader = build_config_loader(&cli.global);
            run_files_command(&loader);
            Ok(())
        }
        Some(Command::Validate(args)) => run_validate_command(args),
        Some(Command::Random(args)) => run_random_command(args),
        Some(Command::Check(args)) => config.and_then(|config| run_check_command(args, &config)),
        Some(Command::Schema) => config.and_then(|config| run_schema_command(&config)),
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> ConfigLoader {
    let mut loader = ConfigLoader::new();
    if !global.no_default_config {
        loader = loader.add_toml_file_optional(CONFIG_FILE);
    }
    for config_path in &global.configs {
        loader = loader.add_toml_file(config_path);
    }
    loader.with_env_prefix(ENV_PREFIX)
}

fn load_config(global: &GlobalOptions) -> Result<Config> {
    let mut loader = build_config_loader(global);
    for (key, value) in global.to_config_overrides() {
        loader = loader.set(key, value)?;
    }
    loader.build().map_err(|e| e.context("failed to load config"))
}
