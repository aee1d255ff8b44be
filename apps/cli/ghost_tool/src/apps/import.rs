use crate::apps::SubApp;
use clap::Parser;
use ghoster::import::*;
use serde::Serialize;
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct ImportApp {
    #[arg(help = "Path to skeletal mesh (.fbx)", required = true)]
    pub mesh_path: PathBuf,
    #[arg(help = "Directory containing animation files (.fbx)", required = true)]
    pub anim_dir: PathBuf,
}

#[derive(Serialize)]
struct ImportPlan<'a> {
    summary: &'a ImportSummary,
    tasks: &'a [ImportTask],
}

impl SubApp for ImportApp {
    fn process(&mut self) -> Result<(), Box<dyn Error>> {
        // Engine isn't reachable from here, only the plan is produced
        let mut tools = DryRunAssetTools::new();
        let summary = import_mesh_and_anims(&mut tools, &self.mesh_path, &self.anim_dir)?;

        if summary.animations.is_empty() {
            log::warn!("No animation files found in \"{}\"", self.anim_dir.display());
        }

        let plan = ImportPlan {
            summary: &summary,
            tasks: &tools.tasks,
        };

        println!("{}", serde_json::to_string_pretty(&plan)?);
        Ok(())
    }
}
