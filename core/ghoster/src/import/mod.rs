mod dry_run;

use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error as ThisError;
pub use dry_run::*;

pub const ASSET_ROOT: &str = "/game";
pub const ANIMATION_DIR_NAME: &str = "animations";
pub const ANIMATION_EXTENSION: &str = "fbx";

#[derive(Debug, ThisError)]
pub enum ImportError {
    #[error("Unable to read animation directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("Import of \"{}\" produced no assets", .path.display())]
    NothingImported {
        path: PathBuf
    },
    #[error("Imported mesh \"{path_name}\" has no skeleton")]
    MissingSkeleton {
        path_name: String
    },
    #[error("Asset tools rejected \"{}\": {reason}", .path.display())]
    Rejected {
        path: PathBuf,
        reason: String
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum FbxImportType {
    SkeletalMesh,
    Animation,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FbxImportOptions {
    pub import_mesh: bool,
    pub import_as_skeletal: bool,
    pub import_animations: bool,
    pub import_morph_targets: bool,
    pub use_t0_as_ref_pose: bool,
    pub skeleton: Option<String>,
    pub automated_import_should_detect_type: bool,
    pub original_import_type: Option<FbxImportType>,
    pub mesh_type_to_import: Option<FbxImportType>,
}

impl FbxImportOptions {
    pub fn skeletal_mesh() -> FbxImportOptions {
        FbxImportOptions {
            import_mesh: true,
            import_as_skeletal: true,
            import_morph_targets: true,
            use_t0_as_ref_pose: true,
            automated_import_should_detect_type: true,
            ..Default::default()
        }
    }

    pub fn animation(skeleton: &str) -> FbxImportOptions {
        FbxImportOptions {
            import_mesh: false,
            import_as_skeletal: true,
            import_animations: true,
            skeleton: Some(skeleton.to_owned()),
            automated_import_should_detect_type: false,
            original_import_type: Some(FbxImportType::SkeletalMesh),
            mesh_type_to_import: Some(FbxImportType::Animation),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ImportTask {
    pub filename: PathBuf,
    pub destination_path: String,
    // Suppresses the interactive options dialog
    pub automated: bool,
    pub save: bool,
    pub replace_existing: bool,
    pub options: FbxImportOptions,
}

impl ImportTask {
    pub fn new<T>(path: T, options: FbxImportOptions) -> ImportTask where T: AsRef<Path> {
        let path = path.as_ref();

        ImportTask {
            filename: path.to_owned(),
            destination_path: format!("{ASSET_ROOT}/{}", asset_name(path)),
            automated: true,
            save: true,
            replace_existing: true,
            options,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ImportedAsset {
    /// Engine object path, e.g. `/Game/Hero/Hero.Hero`
    pub path_name: String,
    pub skeleton: Option<String>,
}

impl ImportedAsset {
    pub fn directory(&self) -> &str {
        self.path_name
            .rsplit_once('/')
            .map(|(dir, _)| dir)
            .unwrap_or("")
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ImportSummary {
    pub mesh: ImportedAsset,
    pub animations: Vec<PathBuf>,
}

pub trait AssetTools {
    fn import_task(&mut self, task: &ImportTask) -> Result<Vec<ImportedAsset>, ImportError>;
}

// File name up to its first dot
pub fn asset_name<T>(path: T) -> String where T: AsRef<Path> {
    path.as_ref()
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.split('.').next())
        .unwrap_or_default()
        .to_owned()
}

pub fn import_skeletal_mesh<T>(tools: &mut dyn AssetTools, mesh_path: T) -> Result<ImportedAsset, ImportError> where T: AsRef<Path> {
    let mesh_path = mesh_path.as_ref();
    let task = ImportTask::new(mesh_path, FbxImportOptions::skeletal_mesh());

    log::info!("Importing skeletal mesh \"{}\" to \"{}\"", mesh_path.display(), task.destination_path);

    tools
        .import_task(&task)?
        .into_iter()
        .next()
        .ok_or_else(|| ImportError::NothingImported { path: mesh_path.to_owned() })
}

pub fn import_anim<T>(tools: &mut dyn AssetTools, mesh: &ImportedAsset, anim_path: T) -> Result<(), ImportError> where T: AsRef<Path> {
    let Some(skeleton) = mesh.skeleton.as_deref() else {
        return Err(ImportError::MissingSkeleton { path_name: mesh.path_name.to_owned() });
    };

    let mut task = ImportTask::new(&anim_path, FbxImportOptions::animation(skeleton));
    task.destination_path = format!("{}/{ANIMATION_DIR_NAME}", mesh.directory());

    log::info!("Importing animation \"{}\" to \"{}\"", anim_path.as_ref().display(), task.destination_path);
    tools.import_task(&task)?;

    Ok(())
}

/// Animation files directly under `anim_dir`, sorted by name
pub fn find_animation_files<T>(anim_dir: T) -> Result<Vec<PathBuf>, ImportError> where T: AsRef<Path> {
    let mut files = Vec::new();

    for entry in std::fs::read_dir(anim_dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }

        let is_anim = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case(ANIMATION_EXTENSION))
            .unwrap_or(false);

        if is_anim {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Imports a skeletal mesh, then every animation file next to it in `anim_dir`
pub fn import_mesh_and_anims<A, B>(tools: &mut dyn AssetTools, mesh_path: A, anim_dir: B) -> Result<ImportSummary, ImportError> where A: AsRef<Path>, B: AsRef<Path> {
    let mesh = import_skeletal_mesh(tools, mesh_path)?;
    let animations = find_animation_files(anim_dir)?;

    for anim_path in animations.iter() {
        import_anim(tools, &mesh, anim_path)?;
    }

    Ok(ImportSummary {
        mesh,
        animations,
    })
}
