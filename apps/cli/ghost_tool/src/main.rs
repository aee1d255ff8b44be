mod apps;

use apps::GhostTool;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let mut tool = GhostTool::new();
    tool.run()
}
