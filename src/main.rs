//! Quill terminal editor
//!
//! Places the terminal into raw mode, decodes keys, and repaints the
//! screen once per input cycle.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use log::error;

use quill::renderer;
use quill::{App, CliArgs, Config, EmptyDocument, LogSink, RawMode, ViewportSize};

fn main() -> ExitCode {
    // stderr only; stdout belongs to the frame composer while running
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = CliArgs::parse();
    let config = match Config::load_with_args(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("configuration error: {}", e);
            eprintln!("Configuration error: {}", e);
            return ExitCode::from(1);
        }
    };

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Raw mode is already restored (the guard dropped on the way
            // out); reset the screen so the shell is left readable, then
            // report the failure.
            let mut stdout = io::stdout();
            let _ = stdout.write_all(renderer::CLEAR_AND_HOME);
            let _ = stdout.flush();
            error!("fatal: {}", e);
            eprintln!("quill: {}", e);
            ExitCode::from(1)
        }
    }
}

fn run(config: &Config) -> quill::Result<()> {
    let size = match config.dimensions {
        Some((cols, rows)) => ViewportSize::new(cols, rows),
        None => ViewportSize::query()?,
    };

    let _raw = RawMode::enable()?;

    let mut app = App::new(config, size);
    app.run(
        io::stdin().lock(),
        &mut io::stdout().lock(),
        &EmptyDocument,
        &mut LogSink,
    )
}
