use ghoster::import::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn touch(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, b"").unwrap();
    path
}

#[test]
fn mesh_then_animations_in_name_order() {
    let dir = TempDir::new().unwrap();
    touch(&dir, "walk.fbx");
    touch(&dir, "idle.FBX");
    touch(&dir, "notes.txt");
    fs::create_dir(dir.path().join("nested.fbx")).unwrap();

    let mut tools = DryRunAssetTools::new();
    let summary = import_mesh_and_anims(&mut tools, "/assets/Alex.fbx", dir.path()).unwrap();

    assert_eq!(summary.mesh.path_name, "/game/Alex/Alex.Alex");
    assert_eq!(summary.animations, vec![dir.path().join("idle.FBX"), dir.path().join("walk.fbx")]);

    let tasks = &tools.tasks;
    assert_eq!(tasks.len(), 3);
    assert_eq!(tasks[0].filename, Path::new("/assets/Alex.fbx"));
    assert!(tasks[0].options.import_mesh);

    for task in tasks[1..].iter() {
        assert_eq!(task.destination_path, "/game/Alex/animations");
        assert!(!task.options.import_mesh);
        assert_eq!(task.options.skeleton.as_deref(), Some("/game/Alex/Alex_Skeleton.Alex_Skeleton"));
    }
}

#[test]
fn empty_directory_imports_mesh_only() {
    let dir = TempDir::new().unwrap();

    let mut tools = DryRunAssetTools::new();
    let summary = import_mesh_and_anims(&mut tools, "/assets/Hero.fbx", dir.path()).unwrap();

    assert!(summary.animations.is_empty());
    assert_eq!(tools.tasks.len(), 1);
}

#[test]
fn missing_directory_is_an_io_error() {
    let mut tools = DryRunAssetTools::new();
    let result = import_mesh_and_anims(&mut tools, "/assets/Hero.fbx", "/definitely/not/here");

    assert!(matches!(result, Err(ImportError::Io(_))));
}

struct EmptyTools;

impl AssetTools for EmptyTools {
    fn import_task(&mut self, _task: &ImportTask) -> Result<Vec<ImportedAsset>, ImportError> {
        Ok(Vec::new())
    }
}

#[test]
fn mesh_import_without_result_fails() {
    let result = import_skeletal_mesh(&mut EmptyTools, "/assets/Hero.fbx");
    assert!(matches!(result, Err(ImportError::NothingImported { .. })));
}

#[test]
fn animation_needs_skeleton() {
    let mesh = ImportedAsset {
        path_name: "/game/Prop/Prop.Prop".into(),
        skeleton: None,
    };

    let result = import_anim(&mut DryRunAssetTools::new(), &mesh, "/assets/spin.fbx");
    assert!(matches!(result, Err(ImportError::MissingSkeleton { .. })));
}
