use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

mod action;
mod cli;
mod codegen;
mod config;
mod error;
mod handler;
mod http;
mod logger;
mod server;

use cli::{Cli, Command};
use codegen::{CodegenError, Lang};
use config::{Config, LogFormat};
use error::ServerError;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        None | Some(Command::Serve) => serve(&cli.config),
        Some(Command::Codegen {
            schema,
            action,
            out,
            lang,
        }) => {
            logger::init("info", LogFormat::Text);
            generate(&schema, &action, out, &lang).map_err(Into::into)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger::log_fatal(e.as_ref());
            ExitCode::FAILURE
        }
    }
}

fn serve(config_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = match Config::load_from(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            // No config means no log settings yet
            logger::init("info", LogFormat::Text);
            return Err(Box::new(ServerError::from(e)));
        }
    };
    logger::init(&cfg.logging.level, cfg.logging.format);

    // Worker threads follow `server.workers`, defaulting to CPU cores
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    logger::log_workers(cfg.server.workers);

    let runtime = runtime_builder.build().map_err(ServerError::from)?;
    runtime.block_on(server::run(&cfg))?;
    Ok(())
}

fn generate(
    schema_path: &Path,
    action: &str,
    out: Option<PathBuf>,
    languages: &[Lang],
) -> Result<(), CodegenError> {
    let sdl = std::fs::read_to_string(schema_path)?;
    let files = codegen::templater(action, &sdl, languages)?;

    match out {
        Some(dir) => {
            codegen::write_files(&dir, &files)?;
        }
        None => {
            for file in &files {
                println!("// {}\n{}", file.name, file.content);
            }
        }
    }
    Ok(())
}
