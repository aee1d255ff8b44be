use clap::{Parser, Subcommand};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::error::Error;

mod import;
mod session;
use self::import::*;
use self::session::*;

// From Cargo.toml
const PKG_NAME: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

pub(crate) trait SubApp {
    fn process(&mut self) -> Result<(), Box<dyn Error>>;
}

#[derive(Parser, Debug)]
#[command(name = PKG_NAME, version = VERSION, about = "Ghosting and asset import helpers for animation scenes")]
struct Options {
    #[command(subcommand)]
    commands: SubCommand,
    #[arg(short, long, global = true, help = "Enable debug logging")]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum SubCommand {
    #[command(name = "session", about = "Replay a ghosting session script against an in-memory scene")]
    Session(SessionApp),
    #[command(name = "import", about = "Plan skeletal mesh and animation imports")]
    Import(ImportApp),
}

#[derive(Debug)]
pub struct GhostTool {
    options: Options,
}

impl GhostTool {
    pub fn new() -> GhostTool {
        GhostTool {
            options: Options::parse()
        }
    }

    pub fn run(&mut self) -> Result<(), Box<dyn Error>> {
        let level = if self.options.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };

        TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)?;

        match &mut self.options.commands {
            SubCommand::Session(app) => app.process(),
            SubCommand::Import(app) => app.process(),
        }
    }
}
