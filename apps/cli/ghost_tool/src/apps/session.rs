use crate::apps::SubApp;
use clap::Parser;
use ghoster::scene::MemoryScene;
use ghoster::session::Session;
use ghoster::GhosterSettings;
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct SessionApp {
    #[arg(help = "Path to session script (.json)", required = true)]
    pub script_path: PathBuf,
    #[arg(short, long, help = "Path to settings file (.json)")]
    pub config: Option<PathBuf>,
    #[arg(short, long, help = "Path to write report to, prints to stdout if omitted")]
    pub output_path: Option<PathBuf>,
}

impl SubApp for SessionApp {
    fn process(&mut self) -> Result<(), Box<dyn Error>> {
        let settings = match &self.config {
            Some(path) => GhosterSettings::from_file(path)?,
            None => GhosterSettings::default(),
        };

        let script = std::fs::read_to_string(&self.script_path)?;
        let commands = Session::parse_script(&script)?;
        log::info!("Replaying {} command(s)", commands.len());

        let mut session = Session::new(MemoryScene::new(), settings);
        session.run(&commands)?;

        let report = serde_json::to_string_pretty(&session.report())?;
        match &self.output_path {
            Some(path) => std::fs::write(path, report)?,
            None => println!("{report}"),
        }

        Ok(())
    }
}
