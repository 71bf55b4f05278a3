mod ui;

use anyhow::Result;
use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;
use tala_core::{Config, Session, Storage};

#[derive(Parser)]
#[command(
    name = "tala",
    version,
    about = "Conversational task tracker",
    long_about = "tala keeps a single task list behind a chat-style command line.\n\nRun with no arguments for an interactive session, or pass one command\n(e.g. `tala todo Buy milk`) to process it and exit."
)]
struct Cli {
    /// Task store file (overrides TALA_FILE and the config file)
    #[arg(long)]
    file: Option<PathBuf>,

    /// A single command to process instead of starting the chat loop
    #[arg(trailing_var_arg = true)]
    command: Vec<String>,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let data_file = match cli.file {
        Some(path) => path,
        None => Config::load()?.data_file,
    };
    let (mut session, load_warning) = Session::open(Storage::new(data_file));
    if let Some(warning) = load_warning {
        ui::render(&warning);
    }

    if !cli.command.is_empty() {
        // One-shot mode: the same request/response seam the chat loop uses.
        let reply = session.handle(&cli.command.join(" "));
        ui::render(&reply.text);
        return Ok(());
    }

    ui::render(Session::greeting());
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let reply = session.handle(&line?);
        ui::render(&reply.text);
        if reply.exit {
            break;
        }
    }
    Ok(())
}
