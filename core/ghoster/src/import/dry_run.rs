use super::{AssetTools, ImportError, ImportTask, ImportedAsset, asset_name};

/// Records tasks instead of importing and makes up plausible asset paths
#[derive(Debug, Default)]
pub struct DryRunAssetTools {
    pub tasks: Vec<ImportTask>,
}

impl DryRunAssetTools {
    pub fn new() -> DryRunAssetTools {
        DryRunAssetTools::default()
    }
}

impl AssetTools for DryRunAssetTools {
    fn import_task(&mut self, task: &ImportTask) -> Result<Vec<ImportedAsset>, ImportError> {
        let name = asset_name(&task.filename);
        if name.is_empty() {
            return Err(ImportError::Rejected {
                path: task.filename.to_owned(),
                reason: String::from("no file name"),
            });
        }

        let dest = &task.destination_path;
        let skeleton = task.options.import_mesh
            .then(|| format!("{dest}/{name}_Skeleton.{name}_Skeleton"));

        self.tasks.push(task.clone());

        Ok(vec![ImportedAsset {
            path_name: format!("{dest}/{name}.{name}"),
            skeleton,
        }])
    }
}
